//! Calendar grids, two-click range selection, presets and validators for
//! date-range picker and week-view widgets.
//!
//! The crate holds no global state: each widget builds its own
//! [`PickerState`] from a [`PickerConfig`] and a [`Clock`].

mod clock;
mod config;
mod consts;
mod format;
mod grid;
mod picker;
mod prelude;
mod presets;
mod selection;
mod types;
pub mod validators;
mod week;

#[cfg(test)]
mod test_utils;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, PickerConfig, TwoMonthsMode};
pub use consts::*;
pub use format::{DateFormat, format_date_range, parse_iso, to_iso_date};
pub use grid::{
    calendar_days_for, days_between, decorate_days, generate_calendar_days, grid_start, is_date_disabled,
    is_date_in_range, weekday_headers,
};
pub use picker::PickerState;
pub use presets::{Preset, default_presets};
pub use selection::Selection;
pub use types::{
    CalendarDay, DateRange, DateRangeValue, RangeEnd, YearMonth, days_in_month, end_of_day, is_leap_year,
    start_of_day,
};
pub use validators::{RangeValidator, ValidationFailure, validate_all};
pub use week::{TimeSlot, WeekView, time_slots, week_days, week_label, week_number, week_start};

use crate::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {_0}")]
    InvalidYear(i32),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MONTHS_PER_YEAR)]
    InvalidMonth(u32),
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}
