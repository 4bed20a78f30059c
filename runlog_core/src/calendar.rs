//! Calendar parsing for record keys and report periods.
//!
//! Dates are always the zero-padded `YYYY-MM-DD` form. Width is validated
//! explicitly before chrono sees the string, so `2024-5-1` is rejected even
//! though chrono would accept it.

use chrono::{Datelike, NaiveDate};
use std::fmt;
use thiserror::Error;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid month {0:?}, expected YYYY-MM")]
    InvalidMonth(String),

    #[error("invalid date range {0:?}, expected YYYY-MM-DD, YYYY-MM-DD")]
    InvalidRange(String),

    #[error("end date {end} is before start date {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
}

/// Checks that `s` is digits with `-` exactly at the given byte offsets.
fn is_digits_with_dashes(s: &str, len: usize, dashes: &[usize]) -> bool {
    s.len() == len
        && s.bytes().enumerate().all(|(i, b)| {
            if dashes.contains(&i) {
                b == b'-'
            } else {
                b.is_ascii_digit()
            }
        })
}

/// Parse a zero-padded `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate, DateError> {
    if !is_digits_with_dashes(s, 10, &[4, 7]) {
        return Err(DateError::InvalidDate(s.to_string()));
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| DateError::InvalidDate(s.to_string()))
}

#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// A calendar month, used by the monthly distance report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, DateError> {
        if (1..=12).contains(&month) && (0..=9999).contains(&year) {
            Ok(Self { year, month })
        } else {
            Err(DateError::InvalidMonth(format!("{year}-{month}")))
        }
    }

    /// Parse `YYYY-MM`, ignoring surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, DateError> {
        let s = s.trim();
        let invalid = || DateError::InvalidMonth(s.to_string());
        if !is_digits_with_dashes(s, 7, &[4]) {
            return Err(invalid());
        }
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        let year = year.parse().map_err(|_| invalid())?;
        let month = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }

    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Three-letter upper-case month name, e.g. `MAY`.
    #[must_use]
    pub fn abbreviation(self) -> &'static str {
        MONTH_ABBREVIATIONS
            .iter()
            .zip(1u32..)
            .find(|(_, month)| *month == self.month)
            .map_or("", |(name, _)| name)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Inclusive date range, used by the weekly distance report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateError> {
        if end < start {
            return Err(DateError::EndBeforeStart { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parse `startDate, endDate` (comma separated, whitespace tolerant).
    pub fn parse(s: &str) -> Result<Self, DateError> {
        let parts: Vec<&str> = s.trim().split(',').map(str::trim).collect();
        let [start, end] = parts.as_slice() else {
            return Err(DateError::InvalidRange(s.to_string()));
        };
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}
