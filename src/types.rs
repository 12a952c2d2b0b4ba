use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, DECEMBER, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, JANUARY,
    LEAP_YEAR_CYCLE, MONTHS_PER_YEAR, MONTH_YEAR_FORMAT,
};
use crate::format::{DateFormat, parse_iso, to_iso_date};
use crate::{ParseError, prelude::*};

const END_OF_DAY: NaiveTime = match NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999) {
    Some(time) => time,
    None => NaiveTime::MIN,
};

/// Midnight at the start of the day containing `moment`.
pub const fn start_of_day(moment: NaiveDateTime) -> NaiveDateTime {
    NaiveDateTime::new(moment.date(), NaiveTime::MIN)
}

/// Last representable nanosecond of the day containing `moment`.
pub const fn end_of_day(moment: NaiveDateTime) -> NaiveDateTime {
    NaiveDateTime::new(moment.date(), END_OF_DAY)
}

/// A calendar month: a year plus a month number in `1..=12`.
///
/// Stored as the first day of the month so that every value is a date chrono
/// can represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}", "first.year()", "first.month()")]
pub struct YearMonth {
    first: NaiveDate,
}

impl YearMonth {
    /// Creates a month, validating the month number and the year range.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidMonth` if `month` is outside `1..=12` and
    /// `ParseError::InvalidYear` if chrono cannot represent the year.
    pub fn new(year: i32, month: u32) -> Result<Self, ParseError> {
        if month < JANUARY || month > MONTHS_PER_YEAR {
            return Err(ParseError::InvalidMonth(month));
        }
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or(ParseError::InvalidYear(year))?;
        Ok(Self { first })
    }

    /// The month containing `date`
    pub fn of(date: impl Datelike) -> Self {
        Self::new(date.year(), date.month()).unwrap_or(Self {
            first: NaiveDate::MIN,
        })
    }

    /// Returns the year
    pub fn year(&self) -> i32 {
        self.first.year()
    }

    /// Returns the month number, 1-12
    pub fn month(&self) -> u32 {
        self.first.month()
    }

    /// Returns the 1st of the month
    pub const fn first_day(&self) -> NaiveDate {
        self.first
    }

    /// Returns the last day of the month
    pub fn last_day(&self) -> NaiveDate {
        self.first
            .with_day(self.days_in_month())
            .unwrap_or(self.first)
    }

    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year(), self.month())
    }

    /// The following month, or `None` past chrono's last representable year
    pub fn next(&self) -> Option<Self> {
        let (year, month) = if self.month() == DECEMBER {
            (self.year().checked_add(1)?, JANUARY)
        } else {
            (self.year(), self.month() + 1)
        };
        Self::new(year, month).ok()
    }

    /// The preceding month, or `None` before chrono's first representable year
    pub fn previous(&self) -> Option<Self> {
        let (year, month) = if self.month() == JANUARY {
            (self.year().checked_sub(1)?, DECEMBER)
        } else {
            (self.year(), self.month() - 1)
        };
        Self::new(year, month).ok()
    }

    /// Header label such as "February 2026"
    pub fn label(&self) -> String {
        DateFormat::new(MONTH_YEAR_FORMAT).format_date(self.first)
    }
}

impl FromStr for YearMonth {
    type Err = ParseError;

    /// Parses `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }
        let (year, month) = trimmed
            .split_once('-')
            .ok_or_else(|| ParseError::InvalidFormat(trimmed.to_owned()))?;
        let year = year
            .trim()
            .parse::<i32>()
            .map_err(|_| ParseError::InvalidFormat(trimmed.to_owned()))?;
        let month = month
            .trim()
            .parse::<u32>()
            .map_err(|_| ParseError::InvalidFormat(trimmed.to_owned()))?;
        Self::new(year, month)
    }
}

pub const fn is_leap_year(year: i32) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: i32, month: u32) -> u32 {
    debug_assert!(month != 0 && month <= MONTHS_PER_YEAR);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

/// One cell of a month grid.
///
/// A pure projection of (month, selection, hover, min/max); it is rebuilt on
/// every request and never updated in place by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    /// Midnight of the cell's day
    pub date:             NaiveDateTime,
    pub day_number:       u32,
    pub is_current_month: bool,
    pub is_today:         bool,
    pub is_selected:      bool,
    pub is_in_range:      bool,
    pub is_range_start:   bool,
    pub is_range_end:     bool,
    pub is_disabled:      bool,
    pub is_weekend:       bool,
}

impl CalendarDay {
    /// Undecorated cell for `date` as shown in the grid of `month`
    pub fn new(date: NaiveDate, month: YearMonth, today: NaiveDate) -> Self {
        Self {
            date:             NaiveDateTime::new(date, NaiveTime::MIN),
            day_number:       date.day(),
            is_current_month: YearMonth::of(date) == month,
            is_today:         date == today,
            is_selected:      false,
            is_in_range:      false,
            is_range_start:   false,
            is_range_end:     false,
            is_disabled:      false,
            is_weekend:       matches!(date.weekday(), Weekday::Sat | Weekday::Sun),
        }
    }
}

/// A possibly incomplete selected range.
///
/// Ranges built by [`crate::Selection`] keep `start <= end`; ranges written
/// directly are taken as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DateRange {
    pub start: Option<NaiveDateTime>,
    pub end:   Option<NaiveDateTime>,
}

impl DateRange {
    pub const fn empty() -> Self {
        Self {
            start: None,
            end:   None,
        }
    }

    pub const fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start: Some(start),
            end:   Some(end),
        }
    }

    /// Both ends set
    pub const fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Inclusive containment; false for an incomplete range
    pub fn contains(&self, date: NaiveDateTime) -> bool {
        crate::grid::is_date_in_range(date, self.start, self.end)
    }

    /// Serialized form with both ends as ISO calendar dates
    pub fn to_value(&self) -> DateRangeValue {
        DateRangeValue {
            start: self.start.map(to_iso_date),
            end:   self.end.map(to_iso_date),
        }
    }
}

impl From<(NaiveDateTime, NaiveDateTime)> for DateRange {
    fn from((start, end): (NaiveDateTime, NaiveDateTime)) -> Self {
        Self::new(start, end)
    }
}

/// Which end of a range a value refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeEnd {
    #[display(fmt = "start")]
    Start,
    #[display(fmt = "end")]
    End,
}

/// The serialized range exchanged with host forms:
/// `{ "start": "2026-02-01" | null, "end": "2026-02-28" | null }`.
///
/// Empty strings count as absent. Present strings are parsed lazily, so a
/// value holding malformed text can still be carried and reported.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DateRangeValue {
    pub start: Option<String>,
    pub end:   Option<String>,
}

impl DateRangeValue {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: Some(start.into()),
            end:   Some(end.into()),
        }
    }

    pub const fn empty() -> Self {
        Self {
            start: None,
            end:   None,
        }
    }

    /// Raw text of one end, `None` when absent or empty
    pub fn raw(&self, which: RangeEnd) -> Option<&str> {
        let raw = match which {
            RangeEnd::Start => self.start.as_deref(),
            RangeEnd::End => self.end.as_deref(),
        };
        raw.filter(|s| !s.trim().is_empty())
    }

    /// Parsed end, `None` when absent or malformed
    pub fn date(&self, which: RangeEnd) -> Option<NaiveDateTime> {
        self.raw(which).and_then(|raw| parse_iso(raw).ok())
    }

    pub fn start_date(&self) -> Option<NaiveDateTime> {
        self.date(RangeEnd::Start)
    }

    pub fn end_date(&self) -> Option<NaiveDateTime> {
        self.date(RangeEnd::End)
    }

    /// Both ends present as text
    pub fn is_filled(&self) -> bool {
        self.raw(RangeEnd::Start).is_some() && self.raw(RangeEnd::End).is_some()
    }

    /// Parses both ends into a range; malformed ends become `None`
    pub fn to_range(&self) -> DateRange {
        DateRange {
            start: self.start_date(),
            end:   self.end_date(),
        }
    }
}

impl From<DateRange> for DateRangeValue {
    fn from(range: DateRange) -> Self {
        range.to_value()
    }
}
