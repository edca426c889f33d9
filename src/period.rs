// src/period.rs
use std::fmt;

use chrono::{Datelike, Local, NaiveDate};

/// `YYYYMM` prefix shared by every artifact of one run.
/// Computed once at start so a run that crosses midnight keeps one tag.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PeriodTag(String);

impl PeriodTag {
    pub fn current() -> Self {
        Self::for_date(Local::now().date_naive())
    }

    pub fn for_date(date: NaiveDate) -> Self {
        Self(format!("{:04}{:02}", date.year(), date.month()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PeriodTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
