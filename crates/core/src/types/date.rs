//! Calendar dates accepted in several input layouts.

use core::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Input layouts tried in order. Output always uses the first.
pub const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d",
    "%d.%m.%Y",
    "%Y/%m/%d",
    "%d-%m-%Y",
    "%Y.%m.%d",
    "%d/%m/%Y",
];

/// Error returned when no layout in [`DATE_FORMATS`] matches.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unsupported date format: {input:?}")]
pub struct DateError {
    input: String,
}

/// A date without time, serialized as `YYYY-MM-DD`.
///
/// Deserialization accepts any of [`DATE_FORMATS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateOnly(NaiveDate);

impl DateOnly {
    /// Wrap a calendar date.
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Today in UTC.
    #[must_use]
    pub fn today() -> Self {
        Self(chrono::Utc::now().date_naive())
    }

    /// Parse using the first matching layout.
    ///
    /// # Errors
    ///
    /// Returns [`DateError`] if no layout matches.
    pub fn parse(s: &str) -> Result<Self, DateError> {
        let s = s.trim();
        DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
            .map(Self)
            .ok_or_else(|| DateError { input: s.to_owned() })
    }

    /// Get the underlying date.
    #[must_use]
    pub const fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for DateOnly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMATS[0]))
    }
}

impl From<NaiveDate> for DateOnly {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl TryFrom<String> for DateOnly {
    type Error = DateError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<DateOnly> for String {
    fn from(date: DateOnly) -> Self {
        date.to_string()
    }
}
