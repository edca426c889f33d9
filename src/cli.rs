// src/cli.rs
use std::path::Path;

use crate::browser::WebDriverLauncher;
use crate::config::{consts::LOG_FILE, options::RunOptions, tasks::TASKS};
use crate::error::RunError;
use crate::period::PeriodTag;
use crate::progress::LogProgress;
use crate::runner::{self, RunSummary};

/// One full run with the compiled-in configuration. No arguments.
pub async fn run() -> Result<RunSummary, RunError> {
    crate::log::init(Path::new(LOG_FILE));

    let opts = RunOptions::default();
    let launcher = WebDriverLauncher::new(opts.browser.clone());
    let period = PeriodTag::current();
    let mut progress = LogProgress;

    runner::run(&opts, TASKS, &launcher, &period, Some(&mut progress)).await
}
