// src/janitor.rs
//! Keeps the shared download directory down to finished `.xlsx` files.
//! Anything with a transient suffix (partial downloads, staging files, raw
//! CSV exports) is removed before and after every run.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::config::consts::TRANSIENT_SUFFIXES;
use crate::file::{has_suffix_ci, list_file_names};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PurgeReport {
    pub removed: Vec<String>,
    pub failed: Vec<String>,
}

pub fn is_transient(name: &str) -> bool {
    TRANSIENT_SUFFIXES.iter().any(|sfx| has_suffix_ci(name, sfx))
}

/// Best-effort: a file that can't be removed is logged and skipped.
pub fn purge_transient(dir: &Path) -> PurgeReport {
    let mut report = PurgeReport::default();

    let names = match list_file_names(dir) {
        Ok(v) => v,
        Err(e) => {
            warn!("Janitor: cannot list {}: {e}", dir.display());
            return report;
        }
    };

    for name in names.into_iter().filter(|n| is_transient(n)) {
        match fs::remove_file(dir.join(&name)) {
            Ok(()) => {
                debug!("Janitor: removed {name}");
                report.removed.push(name);
            }
            Err(e) => {
                warn!("Janitor: could not remove {name}: {e}");
                report.failed.push(name);
            }
        }
    }
    report
}
