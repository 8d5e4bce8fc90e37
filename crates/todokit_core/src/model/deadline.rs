//! Deadline value type and wire format.
//!
//! # Responsibility
//! - Represent "no deadline" and calendar-date deadlines as one value type.
//! - Own the `D/M/YYYY` wire/display format and its parsing rules.
//!
//! # Invariants
//! - The sentinel wire string is fixed; changing it breaks stored blobs.
//! - Wire output never zero-pads day or month.
//! - Malformed wire input is rejected, never coerced.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed wire marker for "no deadline set".
///
/// Inherited from the shipped app's stored data; kept verbatim so existing
/// blobs keep loading.
pub const NO_DEADLINE_SENTINEL: &str = "Brak terminu";

/// A task deadline: either unset or a calendar date with no time component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Deadline {
    /// No deadline set (wire sentinel).
    None,
    /// Due on this calendar date.
    On(NaiveDate),
}

impl Deadline {
    /// Parses the wire form: the sentinel string or `D/M/YYYY`.
    pub fn parse(value: &str) -> Result<Self, DeadlineParseError> {
        if value == NO_DEADLINE_SENTINEL {
            return Ok(Self::None);
        }

        let mut parts = value.splitn(4, '/');
        let day = next_component(&mut parts, value)?;
        let month = next_component(&mut parts, value)?;
        let year = next_component(&mut parts, value)?;
        if parts.next().is_some() {
            return Err(DeadlineParseError::BadShape(value.to_string()));
        }

        NaiveDate::from_ymd_opt(year, month as u32, day as u32)
            .map(Self::On)
            .ok_or_else(|| DeadlineParseError::NoSuchDate(value.to_string()))
    }

    /// Formats the wire form, which doubles as the display form.
    pub fn to_wire(&self) -> String {
        match self {
            Self::None => NO_DEADLINE_SENTINEL.to_string(),
            Self::On(date) => format!("{}/{}/{}", date.day(), date.month(), date.year()),
        }
    }

    /// Returns the underlying date, if one is set.
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::None => None,
            Self::On(date) => Some(*date),
        }
    }

    /// True iff the deadline falls exactly on `today`. False for the sentinel.
    pub fn is_on(&self, today: NaiveDate) -> bool {
        self.date() == Some(today)
    }

    /// True iff the deadline is strictly before `today`, at day granularity.
    /// False for the sentinel, and false for a deadline due `today`.
    pub fn is_before(&self, today: NaiveDate) -> bool {
        self.date().is_some_and(|date| date < today)
    }
}

fn next_component(
    parts: &mut std::str::SplitN<'_, char>,
    original: &str,
) -> Result<i32, DeadlineParseError> {
    let part = parts
        .next()
        .ok_or_else(|| DeadlineParseError::BadShape(original.to_string()))?;
    part.trim()
        .parse::<i32>()
        .map_err(|_| DeadlineParseError::BadShape(original.to_string()))
}

impl Display for Deadline {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_wire())
    }
}

impl From<Deadline> for String {
    fn from(value: Deadline) -> Self {
        value.to_wire()
    }
}

impl TryFrom<String> for Deadline {
    type Error = DeadlineParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

/// Rejection reasons for malformed deadline wire strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeadlineParseError {
    /// Not the sentinel and not three `/`-separated integers.
    BadShape(String),
    /// Three integers, but not a real calendar date (e.g. `31/2/2025`).
    NoSuchDate(String),
}

impl Display for DeadlineParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadShape(value) => {
                write!(f, "deadline `{value}` is not in D/M/YYYY form")
            }
            Self::NoSuchDate(value) => {
                write!(f, "deadline `{value}` is not a valid calendar date")
            }
        }
    }
}

impl Error for DeadlineParseError {}
