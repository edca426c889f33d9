// tests/run_e2e.rs
//
// Whole runs against the scripted launcher: cleanup, isolation, naming.
//
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use calamine::{open_workbook, Reader, Xlsx};
use encoding_rs::BIG5;
use tw_monthly::browser::scripted::{Call, Delivery, ScriptedLauncher};
use tw_monthly::config::options::{RunOptions, Timeouts};
use tw_monthly::config::tasks::{Locator, PreAction, ReportTask};
use tw_monthly::error::{RunError, TaskError};
use tw_monthly::finalize::Conversion;
use tw_monthly::period::PeriodTag;
use tw_monthly::progress::Progress;
use tw_monthly::runner::run;

const UNIT: Duration = Duration::from_millis(100);
const CSV_BTN: Locator = Locator::Css(r#"button.response[data-format="csv"]"#);
const MONTHLY: Locator = Locator::Id("label2");

const TASKS: &[ReportTask] = &[
    ReportTask { name: "OTC Trading", url: "https://tpex.test/stats", pre_actions: &[], trigger: CSV_BTN },
    ReportTask {
        name: "Institutional",
        url: "https://twse.test/bfi82u",
        pre_actions: &[PreAction { locator: MONTHLY, label: "monthly view" }],
        trigger: Locator::Css("button.csv"),
    },
    ReportTask { name: "OTC Institutional", url: "https://tpex.test/inst", pre_actions: &[], trigger: CSV_BTN },
];

fn options(dir: &Path) -> RunOptions {
    RunOptions {
        download_dir: dir.to_path_buf(),
        timeouts: Timeouts {
            element: UNIT,
            arrival: UNIT * 30,
            poll: Duration::from_millis(20),
        },
        ..RunOptions::default()
    }
}

fn period() -> PeriodTag {
    PeriodTag::for_date(chrono::NaiveDate::from_ymd_opt(2026, 9, 1).unwrap())
}

fn big5(text: &str) -> Vec<u8> {
    BIG5.encode(text).0.into_owned()
}

fn files_in(dir: &Path) -> Vec<String> {
    let mut v: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    v.sort();
    v
}

fn first_cell(path: &Path) -> String {
    let mut wb: Xlsx<_> = open_workbook(path).unwrap();
    let range = wb.worksheet_range("Data").unwrap();
    range.rows().next().unwrap()[0].to_string()
}

#[derive(Default)]
struct Recorder {
    total: usize,
    done: Vec<String>,
    failed: Vec<(String, String)>,
    finished: Option<(usize, usize)>,
}

impl Progress for Recorder {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }
    fn item_done(&mut self, task: &str, _path: &Path, _c: &Conversion) {
        self.done.push(task.to_string());
    }
    fn item_failed(&mut self, task: &str, err: &TaskError) {
        self.failed.push((task.to_string(), err.kind().to_string()));
    }
    fn finish(&mut self, written: usize, failed: usize) {
        self.finished = Some((written, failed));
    }
}

#[tokio::test]
async fn all_tasks_succeed_and_directory_ends_clean() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("stale.crdownload"), b"").unwrap();
    fs::write(dir.path().join("leftover.csv"), b"").unwrap();
    fs::write(dir.path().join("202608_otc_trading.xlsx"), b"last month").unwrap();

    let launcher = ScriptedLauncher::new()
        .deliver_on(TASKS[0].url, CSV_BTN, Delivery::new("month.csv", big5("上櫃,1\n"), UNIT))
        .deliver_on(TASKS[1].url, TASKS[1].trigger, Delivery::new("BFI82U.csv", big5("三大法人,2\n"), UNIT))
        .deliver_on(TASKS[2].url, CSV_BTN, Delivery::new("summary.csv", big5("法人,3\n"), UNIT));

    let mut rec = Recorder::default();
    let summary = run(&options(dir.path()), TASKS, &launcher, &period(), Some(&mut rec))
        .await
        .unwrap();

    assert!(summary.failed.is_empty(), "{:?}", summary.failed);
    assert_eq!(summary.written, vec![
        dir.path().join("202609_otc_trading.xlsx"),
        dir.path().join("202609_institutional.xlsx"),
        dir.path().join("202609_otc_institutional.xlsx"),
    ]);
    assert_eq!(files_in(dir.path()), vec![
        "202608_otc_trading.xlsx",
        "202609_institutional.xlsx",
        "202609_otc_institutional.xlsx",
        "202609_otc_trading.xlsx",
    ]);
    assert_eq!(first_cell(&summary.written[1]), "三大法人");

    assert_eq!(rec.total, 3);
    assert_eq!(rec.done.len(), 3);
    assert_eq!(rec.finished, Some((3, 0)));

    // One session per task, each torn down.
    assert_eq!(launcher.count(|c| matches!(c, Call::Open(_))), 3);
    assert_eq!(launcher.count(|c| matches!(c, Call::Teardown)), 3);
}

#[tokio::test]
async fn failures_are_isolated() {
    let dir = tempfile::tempdir().unwrap();
    let launcher = ScriptedLauncher::new()
        // task 0: export never shows up
        .never_ready(MONTHLY) // task 1: pre-action stuck
        .deliver_on(TASKS[2].url, CSV_BTN, Delivery::new("summary.csv", big5("法人,3\n"), UNIT));

    let mut opts = options(dir.path());
    opts.timeouts.arrival = UNIT * 3;

    let mut rec = Recorder::default();
    let summary = run(&opts, TASKS, &launcher, &period(), Some(&mut rec)).await.unwrap();

    assert_eq!(summary.written, vec![dir.path().join("202609_otc_institutional.xlsx")]);
    assert_eq!(rec.failed, vec![
        ("OTC Trading".to_string(), "ArrivalTimeout".to_string()),
        ("Institutional".to_string(), "PreActionTimeout".to_string()),
    ]);
    match &summary.failed[1].1 {
        TaskError::PreActionTimeout { label, .. } => assert_eq!(label, "monthly view"),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(files_in(dir.path()), vec!["202609_otc_institutional.xlsx"]);
    assert_eq!(launcher.count(|c| matches!(c, Call::Teardown)), 3);
}

#[tokio::test]
async fn rerun_same_period_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let only = &TASKS[..1];

    let first = ScriptedLauncher::new()
        .deliver_on(only[0].url, CSV_BTN, Delivery::new("month.csv", big5("舊,1\n"), UNIT));
    run(&options(dir.path()), only, &first, &period(), None).await.unwrap();

    let second = ScriptedLauncher::new()
        .deliver_on(only[0].url, CSV_BTN, Delivery::new("month.csv", big5("新,2\n"), UNIT));
    let summary = run(&options(dir.path()), only, &second, &period(), None).await.unwrap();

    assert_eq!(files_in(dir.path()), vec!["202609_otc_trading.xlsx"]);
    assert_eq!(first_cell(&summary.written[0]), "新");
}

#[tokio::test]
async fn unusable_directory_aborts_before_any_task() {
    let dir = tempfile::tempdir().unwrap();
    let not_a_dir: PathBuf = dir.path().join("file");
    fs::write(&not_a_dir, b"x").unwrap();

    let launcher = ScriptedLauncher::new();
    let err = run(&options(&not_a_dir), TASKS, &launcher, &period(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, RunError::TargetDir { .. }));
    assert!(launcher.calls().is_empty());
}

#[tokio::test]
async fn missing_directory_is_created() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("share").join("monthly");

    let launcher = ScriptedLauncher::new();
    let summary = run(&options(&target), &[], &launcher, &period(), None).await.unwrap();
    assert!(target.is_dir());
    assert!(summary.written.is_empty() && summary.failed.is_empty());
    assert_eq!(summary.period.as_str(), "202609");
}
