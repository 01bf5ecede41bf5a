//! FILENAME: core/engine/src/date.rs
//! PURPOSE: Day-first date parsing, dataset date bounds and month buckets.
//! CONTEXT: Order dates arrive as text (`01/02/2023`), as ISO strings, or as
//! spreadsheet serial numbers. Ambiguous numeric dates are read day-first.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// PARSING
// ============================================================================

/// Which field order produced a parsed date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrder {
    /// `YYYY-MM-DD` or `YYYY/MM/DD`.
    YearFirst,
    /// `DD/MM/YYYY`, the preferred reading.
    DayFirst,
    /// `MM/DD/YYYY`, used only when the day-first reading is not a valid date.
    MonthFirst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedDate {
    pub date: NaiveDate,
    pub order: DateOrder,
}

/// Parses a date string with day-first preference, reporting the order used.
///
/// Accepts `/`, `-` and `.` as separators, two- or four-digit years, and
/// ignores a trailing time (`2023-02-01 10:30`, `2023-02-01T10:30:00`).
pub fn parse_date(input: &str) -> Option<ParsedDate> {
    let trimmed = input.trim();
    let date_part = trimmed
        .split(|c: char| c.is_whitespace() || c == 'T')
        .next()
        .unwrap_or("");
    if date_part.is_empty() {
        return None;
    }

    let parts: Vec<&str> = date_part.split(['/', '-', '.']).collect();
    if parts.len() != 3 || parts.iter().any(|p| p.is_empty()) {
        return None;
    }

    let mut numbers = [0u32; 3];
    for (slot, part) in numbers.iter_mut().zip(&parts) {
        if !part.chars().all(|c| c.is_ascii_digit()) || part.len() > 4 {
            return None;
        }
        *slot = part.parse().ok()?;
    }

    if parts[0].len() == 4 {
        let date = NaiveDate::from_ymd_opt(numbers[0] as i32, numbers[1], numbers[2])?;
        return Some(ParsedDate {
            date,
            order: DateOrder::YearFirst,
        });
    }

    let year = expand_year(numbers[2], parts[2].len());
    if let Some(date) = NaiveDate::from_ymd_opt(year, numbers[1], numbers[0]) {
        return Some(ParsedDate {
            date,
            order: DateOrder::DayFirst,
        });
    }

    NaiveDate::from_ymd_opt(year, numbers[0], numbers[1]).map(|date| ParsedDate {
        date,
        order: DateOrder::MonthFirst,
    })
}

/// Parses a date string day-first: `01/02/2023` is 1 February 2023.
pub fn parse_day_first(input: &str) -> Option<NaiveDate> {
    parse_date(input).map(|p| p.date)
}

/// Two-digit years follow the POSIX `%y` pivot: 69-99 are 19xx, 00-68 are 20xx.
fn expand_year(value: u32, digits: usize) -> i32 {
    if digits <= 2 {
        if value <= 68 {
            2000 + value as i32
        } else {
            1900 + value as i32
        }
    } else {
        value as i32
    }
}

/// Converts a spreadsheet serial day number (1900 date system) to a date.
/// The time-of-day fraction is dropped.
pub fn from_excel_serial(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    // Day 0 is 1899-12-30 once the fictitious 1900-02-29 is accounted for
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    let days = if serial < 61.0 {
        serial.floor() as u64 + 1
    } else {
        serial.floor() as u64
    };
    base.checked_add_days(Days::new(days))
}

// ============================================================================
// BOUNDS
// ============================================================================

/// Earliest and latest order date of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateBounds {
    pub min: NaiveDate,
    pub max: NaiveDate,
}

impl DateBounds {
    /// Returns `None` for an empty iterator.
    pub fn from_dates<I: IntoIterator<Item = NaiveDate>>(dates: I) -> Option<Self> {
        dates.into_iter().fold(None, |acc, d| match acc {
            None => Some(DateBounds { min: d, max: d }),
            Some(b) => Some(DateBounds {
                min: b.min.min(d),
                max: b.max.max(d),
            }),
        })
    }
}

// ============================================================================
// MONTH BUCKET
// ============================================================================

/// A date truncated to its calendar month. Orders chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthBucket {
    pub year: i32,
    pub month: u32,
}

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

impl MonthBucket {
    pub fn of(date: NaiveDate) -> Self {
        MonthBucket {
            year: date.year(),
            month: date.month(),
        }
    }

    /// `Year-Mon` label, e.g. `2023-Feb`.
    pub fn label(&self) -> String {
        format!("{}-{}", self.year, &month_name(self.month)[..3])
    }
}

impl fmt::Display for MonthBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Full English month name for a 1-based month number.
pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES
        .get(month.wrapping_sub(1) as usize)
        .copied()
        .unwrap_or("Unknown")
}
