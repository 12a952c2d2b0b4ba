use std::fmt;
use std::sync::Arc;

use chrono::{Days, NaiveDateTime, NaiveTime};

use crate::types::{end_of_day, start_of_day};
use crate::{Clock, DateRange, YearMonth};

type Resolver = dyn Fn(NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) + Send + Sync;

/// A named range relative to "now".
///
/// The resolver runs each time the preset is chosen, so "Today" means the
/// day of the click, not the day the preset list was built.
#[derive(Clone)]
pub struct Preset {
    label:    String,
    resolver: Arc<Resolver>,
}

impl Preset {
    pub fn new<F>(label: impl Into<String>, resolver: F) -> Self
    where
        F: Fn(NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) + Send + Sync + 'static,
    {
        Self {
            label:    label.into(),
            resolver: Arc::new(resolver),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Concrete `(start, end)` for the current moment of `clock`
    pub fn resolve(&self, clock: &dyn Clock) -> (NaiveDateTime, NaiveDateTime) {
        self.resolve_at(clock.now())
    }

    pub fn resolve_at(&self, now: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
        (self.resolver)(now)
    }

    /// [`Preset::resolve`] as a complete [`DateRange`]
    pub fn range(&self, clock: &dyn Clock) -> DateRange {
        self.resolve(clock).into()
    }
}

impl fmt::Debug for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Preset")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

fn days_ago(now: NaiveDateTime, days: u64) -> NaiveDateTime {
    now.checked_sub_days(Days::new(days)).unwrap_or(now)
}

/// Whole days: start of `days` days ago through the end of today.
fn trailing_days(now: NaiveDateTime, days: u64) -> (NaiveDateTime, NaiveDateTime) {
    (start_of_day(days_ago(now, days.saturating_sub(1))), end_of_day(now))
}

fn whole_month(month: YearMonth) -> (NaiveDateTime, NaiveDateTime) {
    (
        month.first_day().and_time(NaiveTime::MIN),
        end_of_day(month.last_day().and_time(NaiveTime::MIN)),
    )
}

/// Today, Yesterday, Last 7 Days, Last 30 Days, This Month, Last Month
pub fn default_presets() -> Vec<Preset> {
    vec![
        Preset::new("Today", |now| (start_of_day(now), end_of_day(now))),
        Preset::new("Yesterday", |now| {
            let yesterday = days_ago(now, 1);
            (start_of_day(yesterday), end_of_day(yesterday))
        }),
        Preset::new("Last 7 Days", |now| trailing_days(now, 7)),
        Preset::new("Last 30 Days", |now| trailing_days(now, 30)),
        Preset::new("This Month", |now| whole_month(YearMonth::of(now))),
        Preset::new("Last Month", |now| {
            let this_month = YearMonth::of(now);
            whole_month(this_month.previous().unwrap_or(this_month))
        }),
    ]
}
