// src/error.rs
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Failures surfaced by a browser session.
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("element {locator} not clickable after {waited:?}: {detail}")]
    NotReady {
        locator: String,
        waited: Duration,
        detail: String,
    },
    #[error("browser session: {0}")]
    Session(String),
}

#[derive(Debug, Error)]
pub enum ArrivalError {
    #[error("no new download after {elapsed:?}")]
    Timeout { elapsed: Duration },
}

#[derive(Debug, Error)]
pub enum FinalizeError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("{path}: invalid CP950 byte sequence")]
    Encoding { path: PathBuf },
    #[error("xlsx: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error("cell at row {row}, column {column} is outside the sheet")]
    CellOutOfRange { row: usize, column: usize },
}

/// Everything that can end one task. Never fatal to the run.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("pre-action '{label}' timed out after {waited:?}")]
    PreActionTimeout { label: String, waited: Duration },
    #[error("export trigger timed out after {waited:?}")]
    TriggerTimeout { waited: Duration },
    #[error("download did not arrive within {elapsed:?}")]
    ArrivalTimeout { elapsed: Duration },
    #[error("browser: {0}")]
    Browser(#[from] BrowserError),
    #[error("directory snapshot: {0}")]
    Snapshot(#[source] std::io::Error),
    #[error("finalize: {0}")]
    Finalize(#[from] FinalizeError),
}

impl TaskError {
    /// Stable short name for reports.
    pub fn kind(&self) -> &'static str {
        match self {
            TaskError::PreActionTimeout { .. } => "PreActionTimeout",
            TaskError::TriggerTimeout { .. } => "TriggerTimeout",
            TaskError::ArrivalTimeout { .. } => "ArrivalTimeout",
            TaskError::Browser(_) => "BrowserFailure",
            TaskError::Snapshot(_) => "SnapshotFailure",
            TaskError::Finalize(FinalizeError::Encoding { .. }) => "EncodingFailure",
            TaskError::Finalize(_) => "FinalizeIOFailure",
        }
    }
}

impl From<ArrivalError> for TaskError {
    fn from(e: ArrivalError) -> Self {
        match e {
            ArrivalError::Timeout { elapsed } => TaskError::ArrivalTimeout { elapsed },
        }
    }
}

/// The only error that stops a run before any task starts.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("download directory {path} unusable: {source}")]
    TargetDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
