// src/browser/mod.rs
//! Browser automation seam.
//!
//! The fetch/arrival/finalize pipeline only needs four things from a browser:
//! a session that saves downloads into a given directory, navigation, a
//! "wait until clickable, then click", and teardown. `webdriver` provides the
//! real thing over chromedriver; `scripted` is an in-process stand-in that
//! writes files on a schedule instead of talking to a site.
pub mod scripted;
pub mod webdriver;

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::tasks::Locator;
use crate::error::BrowserError;

pub use scripted::ScriptedLauncher;
pub use webdriver::WebDriverLauncher;

/// Opens isolated sessions. One session per task.
#[async_trait]
pub trait SessionLauncher: Send + Sync {
    /// New session whose triggered downloads land in `download_dir` without prompts.
    async fn open(&self, download_dir: &Path) -> Result<Box<dyn BrowserSession>, BrowserError>;
}

#[async_trait]
pub trait BrowserSession: Send {
    async fn navigate(&mut self, url: &str) -> Result<(), BrowserError>;

    /// Wait up to `timeout` for `locator` to be displayed and enabled, then click it.
    /// Expiry is reported as `BrowserError::NotReady`.
    async fn click_when_ready(&mut self, locator: &Locator, timeout: Duration) -> Result<(), BrowserError>;

    /// Release the session. Safe to call more than once.
    async fn teardown(&mut self) -> Result<(), BrowserError>;
}
