// src/arrival.rs
use std::collections::BTreeSet;
use std::io;
use std::path::Path;
use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

use crate::config::consts::IN_PROGRESS_SUFFIX;
use crate::error::ArrivalError;
use crate::file::{has_suffix_ci, list_file_names};

/// File names present in the download directory at one point in time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Snapshot(BTreeSet<String>);

impl Snapshot {
    pub fn capture(dir: &Path) -> io::Result<Self> {
        Ok(Self(list_file_names(dir)?.into_iter().collect()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// New since `baseline`, right suffix, and not a browser in-progress file.
pub fn qualifies(name: &str, baseline: &Snapshot, expected_suffix: &str) -> bool {
    !baseline.contains(name)
        && has_suffix_ci(name, expected_suffix)
        && !has_suffix_ci(name, IN_PROGRESS_SUFFIX)
}

/// Qualifying names currently in `dir`, sorted.
pub fn candidates(dir: &Path, baseline: &Snapshot, expected_suffix: &str) -> io::Result<Vec<String>> {
    let mut found: Vec<String> = list_file_names(dir)?
        .into_iter()
        .filter(|n| qualifies(n, baseline, expected_suffix))
        .collect();
    found.sort_unstable();
    Ok(found)
}

/// Poll `dir` until a new `expected_suffix` file shows up or `timeout` elapses.
///
/// With several candidates in one poll the lexically first name wins; the rest
/// are logged and left for the janitor.
pub async fn wait_for_arrival(
    dir: &Path,
    baseline: &Snapshot,
    expected_suffix: &str,
    timeout: Duration,
    poll: Duration,
) -> Result<String, ArrivalError> {
    let start = Instant::now();
    let deadline = start + timeout;

    loop {
        match candidates(dir, baseline, expected_suffix) {
            Ok(found) if !found.is_empty() => {
                if found.len() > 1 {
                    warn!("Arrival: {} candidates {:?}; taking {}", found.len(), found, found[0]);
                }
                let name = found.into_iter().next().unwrap_or_default();
                debug!("Arrival: {name} after {:?}", start.elapsed());
                return Ok(name);
            }
            Ok(_) => {}
            Err(e) => debug!("Arrival: listing {} failed: {e}", dir.display()),
        }

        let now = Instant::now();
        if now >= deadline {
            return Err(ArrivalError::Timeout { elapsed: now - start });
        }
        sleep(poll.min(deadline - now)).await;
    }
}
