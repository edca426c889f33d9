// src/fetch.rs
use std::path::Path;
use std::time::Duration;

use tracing::{info, warn};

use crate::browser::{BrowserSession, SessionLauncher};
use crate::config::tasks::ReportTask;
use crate::error::{BrowserError, TaskError};

/// A triggered export. Owns the browser session, which has to stay open
/// while the file streams in; call `release` once arrival detection is over.
pub struct RawDownload {
    session: Box<dyn BrowserSession>,
}

impl RawDownload {
    pub async fn release(mut self) -> Result<(), BrowserError> {
        self.session.teardown().await
    }
}

/// Open a session, navigate, run the pre-actions in order, click the export.
/// Returns as soon as the export was clicked; does not wait for the file.
pub async fn run_task(
    launcher: &dyn SessionLauncher,
    task: &ReportTask,
    target_dir: &Path,
    element_timeout: Duration,
) -> Result<RawDownload, TaskError> {
    let mut session = launcher.open(target_dir).await?;

    let driven = drive(&mut *session, task, element_timeout).await;
    match driven {
        Ok(()) => Ok(RawDownload { session }),
        Err(e) => {
            if let Err(te) = session.teardown().await {
                warn!("Fetch: [{}] teardown after failure: {te}", task.name);
            }
            Err(e)
        }
    }
}

async fn drive(
    session: &mut dyn BrowserSession,
    task: &ReportTask,
    element_timeout: Duration,
) -> Result<(), TaskError> {
    session.navigate(task.url).await?;

    for act in task.pre_actions {
        session
            .click_when_ready(&act.locator, element_timeout)
            .await
            .map_err(|e| match e {
                BrowserError::NotReady { waited, .. } => TaskError::PreActionTimeout {
                    label: s!(act.label),
                    waited,
                },
                other => TaskError::Browser(other),
            })?;
        info!("Fetch: [{}] · {}", task.name, act.label);
    }

    session
        .click_when_ready(&task.trigger, element_timeout)
        .await
        .map_err(|e| match e {
            BrowserError::NotReady { waited, .. } => TaskError::TriggerTimeout { waited },
            other => TaskError::Browser(other),
        })?;
    info!("Fetch: [{}] export triggered", task.name);
    Ok(())
}
