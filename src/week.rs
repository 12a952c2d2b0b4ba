use chrono::{Datelike, Days, NaiveDate, NaiveTime, Timelike};
use serde::Serialize;

use crate::consts::{DAYS_PER_WEEK, SLOT_MINUTES, SLOTS_PER_DAY, TIME_SLOT_FORMAT, WEEK_LABEL_SEPARATOR};
use crate::{Clock, DateFormat};

const DAY_MONTH_FORMAT: &str = "d MMMM";

/// First day of the week containing `anchor`
pub fn week_start(anchor: NaiveDate, start_with_sunday: bool) -> NaiveDate {
    let offset = if start_with_sunday {
        anchor.weekday().num_days_from_sunday()
    } else {
        anchor.weekday().num_days_from_monday()
    };
    anchor
        .checked_sub_days(Days::new(u64::from(offset)))
        .unwrap_or(anchor)
}

/// The seven dates of the week containing `anchor`, in display order.
pub fn week_days(anchor: NaiveDate, start_with_sunday: bool) -> [NaiveDate; DAYS_PER_WEEK] {
    let start = week_start(anchor, start_with_sunday);
    let mut days = [start; DAYS_PER_WEEK];
    for (day, date) in days.iter_mut().zip(start.iter_days()) {
        *day = date;
    }
    days
}

/// Heading for the week beginning on `start`.
///
/// `"9 February - 15 February, 2026"`, or with both years when the week
/// crosses into January: `"29 December, 2025 - 4 January, 2026"`.
pub fn week_label(start: NaiveDate) -> String {
    let end = start
        .checked_add_days(Days::new(DAYS_PER_WEEK as u64 - 1))
        .unwrap_or(start);
    let day_month = DateFormat::new(DAY_MONTH_FORMAT);
    let from = day_month.format_date(start);
    let to = day_month.format_date(end);

    if start.year() == end.year() {
        format!("{from}{WEEK_LABEL_SEPARATOR}{to}, {}", start.year())
    } else {
        format!("{from}, {}{WEEK_LABEL_SEPARATOR}{to}, {}", start.year(), end.year())
    }
}

/// ISO 8601 week number of `anchor`
pub fn week_number(anchor: NaiveDate) -> u32 {
    anchor.iso_week().week()
}

/// One half-hour row of the week view's time column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSlot {
    pub hour:      u32,
    pub minute:    u32,
    /// Minute at which the slot ends (30 or 60)
    pub limit:     u32,
    pub label:     String,
    pub highlight: bool,
}

impl TimeSlot {
    pub fn contains(&self, time: NaiveTime) -> bool {
        time.hour() == self.hour && (self.minute..self.limit).contains(&time.minute())
    }
}

/// The 48 half-hour slots of a day. Exactly one, the slot containing `now`,
/// is highlighted.
pub fn time_slots(now: NaiveTime) -> Vec<TimeSlot> {
    let label_format = DateFormat::new(TIME_SLOT_FORMAT);
    (0..SLOTS_PER_DAY)
        .map(|index| {
            let minutes = u32::try_from(index).unwrap_or_default() * SLOT_MINUTES;
            let hour = minutes / 60;
            let minute = minutes % 60;
            let label = NaiveTime::from_hms_opt(hour, minute, 0)
                .map(|time| label_format.format_time(time))
                .unwrap_or_default();
            let mut slot = TimeSlot {
                hour,
                minute,
                limit: minute + SLOT_MINUTES,
                label,
                highlight: false,
            };
            slot.highlight = slot.contains(now);
            slot
        })
        .collect()
}

/// Everything the week view renders for one week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekView {
    pub days:        [NaiveDate; DAYS_PER_WEEK],
    pub label:       String,
    pub week_number: u32,
    pub time_slots:  Vec<TimeSlot>,
}

impl WeekView {
    /// The week containing `anchor`, with the current slot taken from `clock`.
    pub fn new(anchor: NaiveDate, start_with_sunday: bool, clock: &dyn Clock) -> Self {
        let days = week_days(anchor, start_with_sunday);
        Self {
            days,
            label: week_label(days[0]),
            week_number: week_number(anchor),
            time_slots: time_slots(clock.now().time()),
        }
    }

    /// The week containing today
    pub fn current(start_with_sunday: bool, clock: &dyn Clock) -> Self {
        Self::new(clock.today(), start_with_sunday, clock)
    }

    pub fn highlighted_slot(&self) -> Option<&TimeSlot> {
        self.time_slots.iter().find(|slot| slot.highlight)
    }
}
