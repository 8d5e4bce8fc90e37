//! Clock seam for deadline classification.
//!
//! # Responsibility
//! - Isolate "what day is it" behind a trait so tests can pin the date.
//!
//! # Invariants
//! - Implementations return local calendar dates; classification is
//!   day-granular and never inspects the time of day.

use chrono::{Local, NaiveDate};

/// Source of the current calendar date.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Production clock backed by local system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Test clock pinned to one date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
