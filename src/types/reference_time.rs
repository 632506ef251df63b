//! Time filters for Frost observation queries.
//!
//! Frost expects `referencetime` as an ISO-8601 interval `start/end` where the end is
//! exclusive. The conversions here take inclusive calendar periods and produce that form.

use crate::types::into_utc_trait::IntoUtcDateTime;
use chrono::{DateTime, Days, NaiveDate, Utc};
use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct Year(pub i32);

impl Year {
    pub fn get(self) -> i32 {
        self.0
    }
}

impl Display for Year {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// A `referencetime` value understood by the Frost API.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReferenceTime {
    /// Half-open interval `[start, end)`.
    Interval {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    /// Passed to the API unchanged, e.g. `"latest"` or a hand-written interval.
    Raw(String),
}

impl ReferenceTime {
    /// Interval between two instants, end exclusive.
    pub fn between(start: impl IntoUtcDateTime, end: impl IntoUtcDateTime) -> Self {
        ReferenceTime::Interval {
            start: start.into_utc(),
            end: end.into_utc(),
        }
    }

    /// Covers every day from `first` through `last`, both inclusive.
    pub fn days(first: NaiveDate, last: NaiveDate) -> Option<Self> {
        let end = last.checked_add_days(Days::new(1))?;
        Some(Self::between(first, end))
    }

    /// Covers whole calendar years from `first` through `last`, both inclusive.
    pub fn years(first: Year, last: Year) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(first.0, 1, 1)?;
        let end = NaiveDate::from_ymd_opt(last.0.checked_add(1)?, 1, 1)?;
        Some(Self::between(start, end))
    }

    /// Frost query parameter representation.
    pub fn to_query_value(&self) -> String {
        self.to_string()
    }

    /// Filesystem-friendly rendition used in cache keys.
    pub(crate) fn cache_key(&self) -> String {
        match self {
            ReferenceTime::Interval { start, end } => format!(
                "{}_{}",
                start.format("%Y%m%dT%H%M%S"),
                end.format("%Y%m%dT%H%M%S")
            ),
            ReferenceTime::Raw(raw) => raw.clone(),
        }
    }
}

impl Display for ReferenceTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceTime::Interval { start, end } => write!(
                f,
                "{}/{}",
                start.format("%Y-%m-%dT%H:%M:%SZ"),
                end.format("%Y-%m-%dT%H:%M:%SZ")
            ),
            ReferenceTime::Raw(raw) => f.write_str(raw),
        }
    }
}

impl From<Year> for ReferenceTime {
    fn from(year: Year) -> Self {
        ReferenceTime::years(year, year).unwrap_or_else(|| ReferenceTime::Raw(year.to_string()))
    }
}

impl From<&str> for ReferenceTime {
    fn from(raw: &str) -> Self {
        ReferenceTime::Raw(raw.to_string())
    }
}

impl From<String> for ReferenceTime {
    fn from(raw: String) -> Self {
        ReferenceTime::Raw(raw)
    }
}
