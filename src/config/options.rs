// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use super::consts::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    pub download_dir: PathBuf,
    pub browser: BrowserOptions,
    pub timeouts: Timeouts,
    pub decode: DecodePolicy,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            download_dir: PathBuf::from(DOWNLOAD_ROOT),
            browser: BrowserOptions::default(),
            timeouts: Timeouts::default(),
            decode: DecodePolicy::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BrowserOptions {
    pub webdriver_url: String,
    pub headless: bool,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            webdriver_url: s!(WEBDRIVER_URL),
            headless: HEADLESS,
        }
    }
}

/// Bounds for every suspension point of a task.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timeouts {
    /// Wait for a pre-action or the export trigger to become clickable.
    pub element: Duration,
    /// Wait for the raw export to land in the download directory.
    pub arrival: Duration,
    /// Directory polling interval while waiting for arrival.
    pub poll: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            element: Duration::from_secs(ELEMENT_TIMEOUT_SECS),
            arrival: Duration::from_secs(ARRIVAL_TIMEOUT_SECS),
            poll: Duration::from_millis(POLL_INTERVAL_MS),
        }
    }
}

/// What to do with byte sequences that are not valid CP950.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DecodePolicy {
    /// Drop undecodable sequences and keep going (conversion is flagged as degraded).
    #[default]
    Lenient,
    /// Fail the conversion.
    Strict,
}
