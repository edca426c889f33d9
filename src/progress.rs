// src/progress.rs
use std::path::Path;

use tracing::{error, info, warn};

use crate::error::TaskError;
use crate::finalize::Conversion;

/// Lightweight progress reporting for a run.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the number of tasks.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// A task produced its artifact.
    fn item_done(&mut self, _task: &str, _path: &Path, _conversion: &Conversion) {}

    /// A task failed; the run carries on.
    fn item_failed(&mut self, _task: &str, _err: &TaskError) {}

    /// Called at the end, successful or not.
    fn finish(&mut self, _written: usize, _failed: usize) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Progress as log lines; what the CLI uses.
pub struct LogProgress;

impl Progress for LogProgress {
    fn begin(&mut self, total: usize) {
        info!("Run: {total} report(s) queued");
    }

    fn log(&mut self, msg: &str) {
        info!("Run: {msg}");
    }

    fn item_done(&mut self, task: &str, path: &Path, conversion: &Conversion) {
        if conversion.malformed {
            warn!("Run: [{task}] EncodingFailure: undecodable CP950 bytes dropped");
        }
        info!(
            "Run: [{task}] wrote {} ({} rows x {} cols)",
            path.display(),
            conversion.rows,
            conversion.columns
        );
    }

    fn item_failed(&mut self, task: &str, err: &TaskError) {
        error!("Run: [{task}] {}: {err}", err.kind());
    }

    fn finish(&mut self, written: usize, failed: usize) {
        info!("Run: finished, {written} written, {failed} failed");
    }
}
