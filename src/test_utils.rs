use chrono::{NaiveDate, NaiveDateTime};

use crate::{DateRangeValue, FixedClock, YearMonth};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("invalid test date")
}

pub fn midnight(year: i32, month: u32, day: u32) -> NaiveDateTime {
    at(year, month, day, 0, 0)
}

pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    date(year, month, day)
        .and_hms_opt(hour, minute, 0)
        .expect("invalid test time")
}

pub fn clock_at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> FixedClock {
    FixedClock::new(at(year, month, day, hour, minute))
}

pub fn year_month(year: i32, month: u32) -> YearMonth {
    YearMonth::new(year, month).expect("invalid test month")
}

pub fn value(start: Option<&str>, end: Option<&str>) -> DateRangeValue {
    DateRangeValue {
        start: start.map(str::to_owned),
        end:   end.map(str::to_owned),
    }
}
