// tests/fetch.rs
//
// Browser-driving half of a task, against the scripted launcher.
//
use std::time::Duration;

use tw_monthly::arrival::{wait_for_arrival, Snapshot};
use tw_monthly::browser::scripted::{Call, Delivery, ScriptedLauncher};
use tw_monthly::config::tasks::{Locator, PreAction, ReportTask};
use tw_monthly::error::TaskError;
use tw_monthly::fetch::run_task;

const UNIT: Duration = Duration::from_millis(100);

const SWITCH: Locator = Locator::Id("label2");
const SEARCH: Locator = Locator::Css("div.submit > button.search");
const CSV_BTN: Locator = Locator::Css("button.csv");

const PLAIN: ReportTask = ReportTask {
    name: "A",
    url: "https://reports.test/a",
    pre_actions: &[],
    trigger: CSV_BTN,
};

const WITH_PRE: ReportTask = ReportTask {
    name: "B",
    url: "https://reports.test/b",
    pre_actions: &[
        PreAction { locator: SWITCH, label: "switch to monthly" },
        PreAction { locator: SEARCH, label: "search" },
    ],
    trigger: CSV_BTN,
};

fn is_teardown(c: &Call) -> bool {
    matches!(c, Call::Teardown)
}

#[tokio::test]
async fn trigger_click_starts_download() {
    let dir = tempfile::tempdir().unwrap();
    let launcher = ScriptedLauncher::new()
        .deliver_on(PLAIN.url, CSV_BTN, Delivery::new("export.csv", "a,b\n", UNIT * 2));

    let baseline = Snapshot::capture(dir.path()).unwrap();
    let download = run_task(&launcher, &PLAIN, dir.path(), UNIT).await.unwrap();
    // Session stays open until released.
    assert_eq!(launcher.count(is_teardown), 0);

    let name = wait_for_arrival(dir.path(), &baseline, ".csv", UNIT * 60, Duration::from_millis(20))
        .await
        .unwrap();
    assert_eq!(name, "export.csv");

    download.release().await.unwrap();
    assert_eq!(launcher.count(is_teardown), 1);
    assert_eq!(launcher.calls(), vec![
        Call::Open(dir.path().to_path_buf()),
        Call::Navigate(PLAIN.url.to_string()),
        Call::Click(CSV_BTN.to_string()),
        Call::Teardown,
    ]);
}

#[tokio::test]
async fn pre_actions_run_in_order_before_trigger() {
    let dir = tempfile::tempdir().unwrap();
    let launcher = ScriptedLauncher::new();

    let download = run_task(&launcher, &WITH_PRE, dir.path(), UNIT).await.unwrap();
    download.release().await.unwrap();

    let clicks: Vec<Call> = launcher
        .calls()
        .into_iter()
        .filter(|c| matches!(c, Call::Click(_)))
        .collect();
    assert_eq!(clicks, vec![
        Call::Click(SWITCH.to_string()),
        Call::Click(SEARCH.to_string()),
        Call::Click(CSV_BTN.to_string()),
    ]);
}

#[tokio::test]
async fn first_pre_action_timeout_stops_the_task() {
    let dir = tempfile::tempdir().unwrap();
    let launcher = ScriptedLauncher::new().never_ready(SWITCH);

    let err = run_task(&launcher, &WITH_PRE, dir.path(), UNIT).await.err().unwrap();
    match err {
        TaskError::PreActionTimeout { label, waited } => {
            assert_eq!(label, "switch to monthly");
            assert_eq!(waited, UNIT);
        }
        other => panic!("unexpected {other:?}"),
    }

    // Neither the second pre-action nor the trigger was clicked; session released.
    assert_eq!(launcher.count(|c| matches!(c, Call::Click(_))), 0);
    assert_eq!(launcher.count(is_teardown), 1);
}

#[tokio::test]
async fn trigger_timeout_is_its_own_kind() {
    let dir = tempfile::tempdir().unwrap();
    let launcher = ScriptedLauncher::new().never_ready(CSV_BTN);

    let err = run_task(&launcher, &WITH_PRE, dir.path(), UNIT).await.err().unwrap();
    assert!(matches!(err, TaskError::TriggerTimeout { .. }));
    assert_eq!(err.kind(), "TriggerTimeout");
    assert_eq!(launcher.count(|c| matches!(c, Call::Click(_))), 2);
    assert_eq!(launcher.count(is_teardown), 1);
}

#[tokio::test]
async fn navigation_failure_tears_down() {
    let dir = tempfile::tempdir().unwrap();
    let launcher = ScriptedLauncher::new().unreachable(PLAIN.url);

    let err = run_task(&launcher, &PLAIN, dir.path(), UNIT).await.err().unwrap();
    assert!(matches!(err, TaskError::Browser(_)));
    assert_eq!(launcher.count(is_teardown), 1);
}

#[tokio::test]
async fn session_refused() {
    let dir = tempfile::tempdir().unwrap();
    let launcher = ScriptedLauncher::new().refuse_open();

    let err = run_task(&launcher, &PLAIN, dir.path(), UNIT).await.err().unwrap();
    assert_eq!(err.kind(), "BrowserFailure");
    assert!(launcher.calls().is_empty());
}
