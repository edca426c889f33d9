// src/runner.rs
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::{
    arrival::{wait_for_arrival, Snapshot},
    browser::SessionLauncher,
    config::{consts::RAW_SUFFIX, options::RunOptions, tasks::ReportTask},
    error::{RunError, TaskError},
    fetch, file,
    finalize::{finalize, Conversion},
    janitor::purge_transient,
    period::PeriodTag,
    progress::Progress,
};

/// Summary of what was produced.
#[derive(Debug)]
pub struct RunSummary {
    pub period: PeriodTag,
    pub written: Vec<PathBuf>,
    pub failed: Vec<(String, TaskError)>,
}

/// Top-level runner: clean, fetch every task in order, clean again.
/// A task failure is reported through `progress` and never stops the others;
/// only an unusable download directory aborts the run.
pub async fn run(
    opts: &RunOptions,
    tasks: &[ReportTask],
    launcher: &dyn SessionLauncher,
    period: &PeriodTag,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunSummary, RunError> {
    let dir = &opts.download_dir;
    file::ensure_directory(dir).map_err(|source| RunError::TargetDir {
        path: dir.clone(),
        source,
    })?;

    let purged = purge_transient(dir);
    debug!("Run: pre-clean removed {} file(s)", purged.removed.len());

    if let Some(p) = progress.as_deref_mut() {
        p.begin(tasks.len());
    }

    let mut summary = RunSummary {
        period: period.clone(),
        written: Vec::with_capacity(tasks.len()),
        failed: Vec::new(),
    };

    for task in tasks {
        if let Some(p) = progress.as_deref_mut() {
            p.log(&format!("[{}] {}", task.name, task.url));
        }
        match run_one(opts, task, launcher, period).await {
            Ok((path, conversion)) => {
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(task.name, &path, &conversion);
                }
                summary.written.push(path);
            }
            Err(e) => {
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(task.name, &e);
                }
                summary.failed.push((s!(task.name), e));
            }
        }
    }

    let purged = purge_transient(dir);
    debug!("Run: post-clean removed {} file(s)", purged.removed.len());

    if let Some(p) = progress.as_deref_mut() {
        p.finish(summary.written.len(), summary.failed.len());
    }
    Ok(summary)
}

/// Fetch → detect → finalize for one task.
pub async fn run_one(
    opts: &RunOptions,
    task: &ReportTask,
    launcher: &dyn SessionLauncher,
    period: &PeriodTag,
) -> Result<(PathBuf, Conversion), TaskError> {
    let dir = &opts.download_dir;
    let final_path = file::final_path(dir, period, task.name);

    // Taken right before the click so an older export can't pass for this one.
    let baseline = Snapshot::capture(dir).map_err(TaskError::Snapshot)?;
    let download = fetch::run_task(launcher, task, dir, opts.timeouts.element).await?;

    let arrived = wait_for_arrival(
        dir,
        &baseline,
        RAW_SUFFIX,
        opts.timeouts.arrival,
        opts.timeouts.poll,
    )
    .await;
    if let Err(e) = download.release().await {
        warn!("Run: [{}] browser teardown: {e}", task.name);
    }
    let raw_name = arrived?;

    let conversion = finalize(&dir.join(&raw_name), &final_path, opts.decode)?;
    Ok((final_path, conversion))
}
