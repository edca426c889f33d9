// src/browser/scripted.rs
// In-process browser stand-in: no network, no Chrome. Clicking a scripted
// locator drops a file into the download directory after a delay, going
// through a `.crdownload` stage first the way Chrome does.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;
use tracing::debug;

use super::{BrowserSession, SessionLauncher};
use crate::config::consts::IN_PROGRESS_SUFFIX;
use crate::config::tasks::Locator;
use crate::error::BrowserError;

/// A file the fake "server" streams into the download directory.
#[derive(Clone, Debug)]
pub struct Delivery {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub delay: Duration,
}

impl Delivery {
    pub fn new(file_name: &str, bytes: impl Into<Vec<u8>>, delay: Duration) -> Self {
        Self { file_name: s!(file_name), bytes: bytes.into(), delay }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Open(PathBuf),
    Navigate(String),
    Click(String),
    Teardown,
}

#[derive(Default)]
pub struct ScriptedLauncher {
    never_ready: Vec<Locator>,
    unreachable: Vec<String>,
    deliveries: Vec<(String, Locator, Delivery)>,
    refuse_open: bool,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl ScriptedLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// `locator` never becomes clickable; waiting on it burns the full timeout.
    pub fn never_ready(mut self, locator: Locator) -> Self {
        self.never_ready.push(locator);
        self
    }

    /// Navigating to `url` fails.
    pub fn unreachable(mut self, url: &str) -> Self {
        self.unreachable.push(s!(url));
        self
    }

    /// Clicking `locator` while on `url` starts `delivery`.
    pub fn deliver_on(mut self, url: &str, locator: Locator, delivery: Delivery) -> Self {
        self.deliveries.push((s!(url), locator, delivery));
        self
    }

    /// Sessions can't be opened at all (e.g. chromedriver not running).
    pub fn refuse_open(mut self) -> Self {
        self.refuse_open = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        lock(&self.calls).clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        lock(&self.calls).iter().filter(|c| pred(c)).count()
    }
}

fn lock(calls: &Mutex<Vec<Call>>) -> MutexGuard<'_, Vec<Call>> {
    calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl SessionLauncher for ScriptedLauncher {
    async fn open(&self, download_dir: &Path) -> Result<Box<dyn BrowserSession>, BrowserError> {
        if self.refuse_open {
            return Err(BrowserError::Session(s!("scripted: connection refused")));
        }
        lock(&self.calls).push(Call::Open(download_dir.to_path_buf()));
        Ok(Box::new(ScriptedSession {
            dir: download_dir.to_path_buf(),
            url: None,
            never_ready: self.never_ready.clone(),
            unreachable: self.unreachable.clone(),
            deliveries: self.deliveries.clone(),
            calls: Arc::clone(&self.calls),
            closed: false,
        }))
    }
}

struct ScriptedSession {
    dir: PathBuf,
    url: Option<String>,
    never_ready: Vec<Locator>,
    unreachable: Vec<String>,
    deliveries: Vec<(String, Locator, Delivery)>,
    calls: Arc<Mutex<Vec<Call>>>,
    closed: bool,
}

impl ScriptedSession {
    fn check_open(&self) -> Result<(), BrowserError> {
        if self.closed {
            return Err(BrowserError::Session(s!("scripted: session already closed")));
        }
        Ok(())
    }
}

#[async_trait]
impl BrowserSession for ScriptedSession {
    async fn navigate(&mut self, url: &str) -> Result<(), BrowserError> {
        self.check_open()?;
        lock(&self.calls).push(Call::Navigate(s!(url)));
        if self.unreachable.iter().any(|u| u == url) {
            return Err(BrowserError::Session(format!("scripted: {url} unreachable")));
        }
        self.url = Some(s!(url));
        Ok(())
    }

    async fn click_when_ready(&mut self, locator: &Locator, timeout: Duration) -> Result<(), BrowserError> {
        self.check_open()?;
        if self.never_ready.contains(locator) {
            sleep(timeout).await;
            return Err(BrowserError::NotReady {
                locator: locator.to_string(),
                waited: timeout,
                detail: s!("scripted: never clickable"),
            });
        }
        lock(&self.calls).push(Call::Click(locator.to_string()));

        let url = self.url.as_deref().unwrap_or_default();
        if let Some((_, _, delivery)) = self
            .deliveries
            .iter()
            .find(|(u, l, _)| u == url && l == locator)
        {
            spawn_delivery(self.dir.clone(), delivery.clone());
        }
        Ok(())
    }

    async fn teardown(&mut self) -> Result<(), BrowserError> {
        if !self.closed {
            self.closed = true;
            lock(&self.calls).push(Call::Teardown);
        }
        Ok(())
    }
}

fn spawn_delivery(dir: PathBuf, delivery: Delivery) {
    tokio::spawn(async move {
        let partial = dir.join(join!(&delivery.file_name, IN_PROGRESS_SUFFIX));
        let done = dir.join(&delivery.file_name);
        let half = delivery.bytes.len() / 2;

        if let Err(e) = tokio::fs::write(&partial, &delivery.bytes[..half]).await {
            debug!("Scripted: partial write failed: {e}");
            return;
        }
        sleep(delivery.delay).await;
        let finished = async {
            tokio::fs::write(&partial, &delivery.bytes).await?;
            tokio::fs::rename(&partial, &done).await
        };
        if let Err(e) = finished.await {
            debug!("Scripted: delivery of {} failed: {e}", delivery.file_name);
        }
    });
}
