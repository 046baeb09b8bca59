use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ComplianceError;

/// A calendar day as logged in the record files.
///
/// No validity is enforced on construction: `31-02-2024` is a perfectly
/// sortable value. Use [`Date::is_valid`] where calendar correctness matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Date {
    pub day: i32,
    pub month: i32,
    pub year: i32,
}

impl Date {
    pub const fn new(day: i32, month: i32, year: i32) -> Self {
        Self { day, month, year }
    }

    /// Whether this is a real Gregorian calendar day.
    pub fn is_valid(&self) -> bool {
        self.year >= 1
            && (1..=12).contains(&self.month)
            && self.day >= 1
            && self.day <= days_in_month(self.month, self.year)
    }
}

/// Leap years follow the Gregorian rule (every 4, except centuries not divisible by 400).
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month`, or 0 for an out-of-range month.
pub fn days_in_month(month: i32, year: i32) -> i32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

impl Ord for Date {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.year, self.month, self.day).cmp(&(other.year, other.month, other.day))
    }
}

impl PartialOrd for Date {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}-{:04}", self.day, self.month, self.year)
    }
}

/// Parses `dd-mm-yyyy`. Only the shape is checked, not calendar validity.
impl FromStr for Date {
    type Err = ComplianceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ComplianceError::InvalidDate(s.to_string());

        let mut parts = s.trim().splitn(3, '-');
        let mut next = || -> Result<i32, ComplianceError> {
            parts
                .next()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .ok_or_else(invalid)?
                .parse()
                .map_err(|_| invalid())
        };

        let day = next()?;
        let month = next()?;
        let year = next()?;
        Ok(Date::new(day, month, year))
    }
}

/// Where a date falls relative to a [`Period`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodPosition {
    Before,
    Within,
    After,
}

/// A closed date interval `[begin, end]`.
///
/// `begin <= end` is not enforced. An inverted period is compared literally,
/// which means no date is ever classified as [`PeriodPosition::Within`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub begin: Date,
    pub end: Date,
}

impl Period {
    pub const fn new(begin: Date, end: Date) -> Self {
        Self { begin, end }
    }

    /// A single-day period.
    pub const fn at(date: Date) -> Self {
        Self {
            begin: date,
            end: date,
        }
    }

    /// Tri-state comparison of `date` against this period, both bounds inclusive.
    ///
    /// The lower bound is checked first, so for an inverted period every date
    /// comes out as `Before` or `After`.
    pub fn classify(&self, date: Date) -> PeriodPosition {
        if date < self.begin {
            PeriodPosition::Before
        } else if date > self.end {
            PeriodPosition::After
        } else {
            PeriodPosition::Within
        }
    }

    #[inline]
    pub fn contains(&self, date: Date) -> bool {
        self.classify(date) == PeriodPosition::Within
    }

    pub fn is_inverted(&self) -> bool {
        self.begin > self.end
    }

    /// Grow the period so that `date` falls within it.
    ///
    /// Returns the classification of `date` before the period was extended.
    pub fn extend_to(&mut self, date: Date) -> PeriodPosition {
        let position = self.classify(date);
        match position {
            PeriodPosition::Before => self.begin = date,
            PeriodPosition::After => self.end = date,
            PeriodPosition::Within => {}
        }
        position
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.begin, self.end)
    }
}

/// Free-function form of [`Period::classify`].
pub fn classify(date: Date, period: &Period) -> PeriodPosition {
    period.classify(date)
}
