use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::grid::days_between;
use crate::types::{end_of_day, start_of_day};
use crate::{DateRangeValue, RangeEnd, format::parse_iso};

/// Why a serialized range was rejected.
///
/// Serializes to the keyed shape host forms expect, e.g.
/// `{"maxRangeDays":{"max":10,"actual":19}}` or `"required"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, thiserror::Error, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationFailure {
    /// Start or end is missing.
    #[error("both a start and an end date are required")]
    Required,

    /// Start falls before the minimum day.
    #[error("start date {actual} is before the earliest allowed date {min}")]
    MinDate { min: NaiveDate, actual: NaiveDate },

    /// End falls after the maximum day.
    #[error("end date {actual} is after the latest allowed date {max}")]
    MaxDate { max: NaiveDate, actual: NaiveDate },

    /// The range spans more whole days than allowed.
    #[error("range spans {actual} days, more than the allowed {max}")]
    MaxRangeDays { max: i64, actual: i64 },

    /// End is before start.
    #[error("end date is before start date")]
    #[serde(rename = "validRange")]
    InvalidRange,

    /// A present end is not an ISO-8601 date.
    #[error("{field} date {value:?} is not an ISO-8601 date")]
    Malformed { field: RangeEnd, value: String },
}

/// Fails unless both ends are present.
///
/// # Errors
/// Returns `ValidationFailure::Required` when either end is absent or empty.
pub fn required(value: &DateRangeValue) -> Result<(), ValidationFailure> {
    if value.is_filled() {
        Ok(())
    } else {
        Err(ValidationFailure::Required)
    }
}

/// Fails when the start is before the start of `bound`'s day; passes without
/// a start.
///
/// # Errors
/// Returns `ValidationFailure::MinDate` with both calendar dates.
pub fn min_date(value: &DateRangeValue, bound: NaiveDateTime) -> Result<(), ValidationFailure> {
    match value.start_date() {
        Some(start) if start < start_of_day(bound) => Err(ValidationFailure::MinDate {
            min:    bound.date(),
            actual: start.date(),
        }),
        _ => Ok(()),
    }
}

/// Fails when the end is after the end of `bound`'s day; passes without an
/// end.
///
/// # Errors
/// Returns `ValidationFailure::MaxDate` with both calendar dates.
pub fn max_date(value: &DateRangeValue, bound: NaiveDateTime) -> Result<(), ValidationFailure> {
    match value.end_date() {
        Some(end) if end > end_of_day(bound) => Err(ValidationFailure::MaxDate {
            max:    bound.date(),
            actual: end.date(),
        }),
        _ => Ok(()),
    }
}

/// Fails when `days_between(start, end)` exceeds `max`; passes unless both
/// ends are present.
///
/// # Errors
/// Returns `ValidationFailure::MaxRangeDays` with the limit and the span.
pub fn max_range_days(value: &DateRangeValue, max: i64) -> Result<(), ValidationFailure> {
    let (Some(start), Some(end)) = (value.start_date(), value.end_date()) else {
        return Ok(());
    };
    let actual = days_between(start, end);
    if actual > max {
        return Err(ValidationFailure::MaxRangeDays { max, actual });
    }
    Ok(())
}

/// Fails when the end is before the start. Equal ends pass, as does a value
/// missing either end.
///
/// # Errors
/// Returns `ValidationFailure::InvalidRange`.
pub fn valid_range(value: &DateRangeValue) -> Result<(), ValidationFailure> {
    match (value.start_date(), value.end_date()) {
        (Some(start), Some(end)) if end < start => Err(ValidationFailure::InvalidRange),
        _ => Ok(()),
    }
}

/// Fails when a present end cannot be parsed. The other validators treat
/// such an end as missing.
///
/// # Errors
/// Returns `ValidationFailure::Malformed` for the first unparseable end.
pub fn well_formed(value: &DateRangeValue) -> Result<(), ValidationFailure> {
    for field in [RangeEnd::Start, RangeEnd::End] {
        if let Some(raw) = value.raw(field)
            && parse_iso(raw).is_err()
        {
            return Err(ValidationFailure::Malformed {
                field,
                value: raw.to_owned(),
            });
        }
    }
    Ok(())
}

/// One configurable check, for building validator lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeValidator {
    Required,
    MinDate(NaiveDateTime),
    MaxDate(NaiveDateTime),
    MaxRangeDays(i64),
    ValidRange,
    WellFormed,
}

impl RangeValidator {
    /// Runs this check against `value`.
    ///
    /// # Errors
    /// Returns the failure produced by the wrapped validator.
    pub fn validate(&self, value: &DateRangeValue) -> Result<(), ValidationFailure> {
        match *self {
            Self::Required => required(value),
            Self::MinDate(bound) => min_date(value, bound),
            Self::MaxDate(bound) => max_date(value, bound),
            Self::MaxRangeDays(max) => max_range_days(value, max),
            Self::ValidRange => valid_range(value),
            Self::WellFormed => well_formed(value),
        }
    }
}

/// Runs every validator and collects all failures, in list order.
pub fn validate_all(validators: &[RangeValidator], value: &DateRangeValue) -> Vec<ValidationFailure> {
    validators
        .iter()
        .filter_map(|validator| validator.validate(value).err())
        .collect()
}
