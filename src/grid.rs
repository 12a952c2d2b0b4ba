use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, TimeDelta};
use tracing::trace;

use crate::consts::{DAYS_IN_GRID, DAYS_PER_WEEK, WEEKDAY_HEADERS};
use crate::types::{end_of_day, start_of_day};
use crate::{CalendarDay, Clock, Selection, YearMonth};

/// First cell of the grid for `month`: the configured week-start day on or
/// before the 1st.
pub fn grid_start(month: YearMonth, start_with_sunday: bool) -> NaiveDate {
    let first = month.first_day();
    let offset = if start_with_sunday {
        first.weekday().num_days_from_sunday()
    } else {
        first.weekday().num_days_from_monday()
    };
    first
        .checked_sub_days(Days::new(u64::from(offset)))
        .unwrap_or(first)
}

/// Six full weeks (42 cells) covering `month`, undecorated.
///
/// `today` only feeds the `is_today` flag; pass the injected clock's date.
pub fn generate_calendar_days(
    month: YearMonth,
    start_with_sunday: bool,
    today: NaiveDate,
) -> Vec<CalendarDay> {
    trace!(%month, start_with_sunday, "generating calendar grid");
    grid_start(month, start_with_sunday)
        .iter_days()
        .take(DAYS_IN_GRID)
        .map(|date| CalendarDay::new(date, month, today))
        .collect()
}

/// [`generate_calendar_days`] with "today" read from `clock`
pub fn calendar_days_for(month: YearMonth, start_with_sunday: bool, clock: &dyn Clock) -> Vec<CalendarDay> {
    generate_calendar_days(month, start_with_sunday, clock.today())
}

/// Inclusive on both ends; false unless both ends are set.
pub fn is_date_in_range(
    date: NaiveDateTime,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
) -> bool {
    match (start, end) {
        (Some(start), Some(end)) => start <= date && date <= end,
        _ => false,
    }
}

/// True before the start of `min`'s day or after the end of `max`'s day.
pub fn is_date_disabled(
    date: NaiveDateTime,
    min: Option<NaiveDateTime>,
    max: Option<NaiveDateTime>,
) -> bool {
    min.is_some_and(|min| date < start_of_day(min)) || max.is_some_and(|max| date > end_of_day(max))
}

/// Whole days from `start` to `end`, rounded down.
pub fn days_between(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    let delta = end.signed_duration_since(start);
    let days = delta.num_days();
    // num_days truncates toward zero
    if delta < TimeDelta::days(days) { days - 1 } else { days }
}

/// Short weekday labels in display order
pub fn weekday_headers(start_with_sunday: bool) -> [&'static str; DAYS_PER_WEEK] {
    let mut headers = WEEKDAY_HEADERS;
    if start_with_sunday {
        headers.rotate_right(1);
    }
    headers
}

fn same_day(a: NaiveDateTime, b: Option<NaiveDateTime>) -> bool {
    b.is_some_and(|b| a.date() == b.date())
}

/// Fills the selection-dependent flags of each cell.
///
/// A complete selection highlights its own span. A started selection with a
/// hover date highlights the preview span instead. Start, end and selected
/// flags compare calendar dates only.
pub fn decorate_days(
    days: Vec<CalendarDay>,
    selection: &Selection,
    hover: Option<NaiveDateTime>,
    min: Option<NaiveDateTime>,
    max: Option<NaiveDateTime>,
) -> Vec<CalendarDay> {
    let start = selection.start();
    let end = selection.end();
    let preview = hover.and_then(|h| selection.hover_preview(h));

    days.into_iter()
        .map(|mut day| {
            day.is_selected = same_day(day.date, start) || same_day(day.date, end);
            day.is_in_range = match preview {
                Some((from, to)) => is_date_in_range(day.date, Some(from), Some(to)),
                None => is_date_in_range(day.date, start, end),
            };
            day.is_range_start = same_day(day.date, start);
            day.is_range_end = same_day(day.date, end);
            day.is_disabled = is_date_disabled(day.date, min, max);
            day
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Weekday;

    use super::*;
    use crate::test_utils::{at, clock_at, date, midnight, year_month};

    #[test]
    fn test_grid_always_has_42_days() {
        for year in [2024, 2026] {
            for month in 1..=12 {
                let ym = year_month(year, month);
                let days = generate_calendar_days(ym, false, date(2026, 2, 15));
                assert_eq!(days.len(), 42, "{ym}");
                let sunday_days = generate_calendar_days(ym, true, date(2026, 2, 15));
                assert_eq!(sunday_days.len(), 42, "{ym} sunday-first");
            }
        }
    }

    #[test]
    fn test_current_month_count_matches_month_length() {
        for (year, month, expected) in [(2026, 2, 28), (2024, 2, 29), (2026, 3, 31), (2026, 4, 30)] {
            let ym = year_month(year, month);
            for start_with_sunday in [false, true] {
                let days = generate_calendar_days(ym, start_with_sunday, date(2026, 1, 1));
                let current = days.iter().filter(|d| d.is_current_month).count();
                assert_eq!(current, expected, "{ym} sunday-first={start_with_sunday}");
            }
        }
    }

    #[test]
    fn test_grid_anchors_on_week_start() {
        let ym = year_month(2026, 2);
        let monday_first = generate_calendar_days(ym, false, date(2026, 2, 15));
        assert_eq!(monday_first[0].date.weekday(), Weekday::Mon);
        assert_eq!(monday_first[0].date.date(), date(2026, 1, 26));

        // 2026-02-01 is itself a Sunday
        let sunday_first = generate_calendar_days(ym, true, date(2026, 2, 15));
        assert_eq!(sunday_first[0].date.weekday(), Weekday::Sun);
        assert_eq!(sunday_first[0].date.date(), date(2026, 2, 1));
    }

    #[test]
    fn test_grid_marks_today_and_weekends() {
        let ym = year_month(2026, 2);
        let days = calendar_days_for(ym, false, &clock_at(2026, 2, 18, 9, 30));
        let today: Vec<_> = days.iter().filter(|d| d.is_today).collect();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].day_number, 18);

        let weekends: Vec<_> = days.iter().filter(|d| d.is_weekend).collect();
        assert_eq!(weekends.len(), 12);
        for day in weekends {
            assert!(matches!(day.date.weekday(), Weekday::Sat | Weekday::Sun));
        }
    }

    #[test]
    fn test_is_date_in_range_cases() {
        let start = midnight(2026, 2, 1);
        let end = midnight(2026, 2, 28);
        assert!(is_date_in_range(midnight(2026, 2, 15), Some(start), Some(end)));
        assert!(is_date_in_range(start, Some(start), Some(end)));
        assert!(is_date_in_range(end, Some(start), Some(end)));
        assert!(!is_date_in_range(midnight(2026, 3, 1), Some(start), Some(end)));
        assert!(!is_date_in_range(midnight(2026, 2, 15), None, None));
        assert!(!is_date_in_range(midnight(2026, 2, 15), Some(start), None));
        assert!(!is_date_in_range(midnight(2026, 2, 15), None, Some(end)));
    }

    #[test]
    fn test_is_date_disabled_cases() {
        struct TestCase {
            date:        NaiveDateTime,
            min:         Option<NaiveDateTime>,
            max:         Option<NaiveDateTime>,
            disabled:    bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                date:        midnight(2026, 2, 5),
                min:         Some(midnight(2026, 2, 10)),
                max:         None,
                disabled:    true,
                description: "before min",
            },
            TestCase {
                date:        midnight(2026, 2, 25),
                min:         None,
                max:         Some(midnight(2026, 2, 20)),
                disabled:    true,
                description: "after max",
            },
            TestCase {
                date:        midnight(2026, 2, 15),
                min:         Some(midnight(2026, 2, 1)),
                max:         Some(midnight(2026, 2, 28)),
                disabled:    false,
                description: "between bounds",
            },
            TestCase {
                date:        midnight(2026, 2, 15),
                min:         None,
                max:         None,
                disabled:    false,
                description: "no bounds",
            },
            TestCase {
                date:        midnight(2026, 2, 10),
                min:         Some(at(2026, 2, 10, 15, 0)),
                max:         None,
                disabled:    false,
                description: "min compares from the start of its day",
            },
            TestCase {
                date:        date(2026, 2, 20).and_hms_nano_opt(23, 59, 59, 999_500_000).unwrap(),
                min:         None,
                max:         Some(midnight(2026, 2, 20)),
                disabled:    false,
                description: "sub-millisecond moment on the max day",
            },
            TestCase {
                date:        midnight(2026, 2, 21),
                min:         None,
                max:         Some(at(2026, 2, 20, 23, 59)),
                disabled:    true,
                description: "midnight after the max day",
            },
            TestCase {
                date:        at(2026, 2, 20, 23, 0),
                min:         None,
                max:         Some(midnight(2026, 2, 20)),
                disabled:    false,
                description: "max extends to the end of its day",
            },
        ];

        for case in &cases {
            assert_eq!(
                is_date_disabled(case.date, case.min, case.max),
                case.disabled,
                "{}",
                case.description
            );
        }
    }

    #[test]
    fn test_days_between() {
        assert_eq!(days_between(midnight(2026, 2, 15), midnight(2026, 2, 15)), 0);
        assert_eq!(days_between(midnight(2026, 1, 31), midnight(2026, 2, 1)), 1);
        assert_eq!(days_between(midnight(2026, 2, 1), midnight(2026, 2, 10)), 9);
        assert_eq!(days_between(midnight(2026, 2, 1), at(2026, 2, 7, 23, 59)), 6);
        assert_eq!(days_between(midnight(2026, 2, 10), at(2026, 2, 9, 12, 0)), -1);
    }

    #[test]
    fn test_weekday_headers() {
        let monday = weekday_headers(false);
        assert_eq!(monday.len(), 7);
        assert_eq!(monday[0], "Mon");
        assert_eq!(monday[6], "Sun");

        let sunday = weekday_headers(true);
        assert_eq!(sunday.len(), 7);
        assert_eq!(sunday[0], "Sun");
        assert_eq!(sunday[6], "Sat");
    }

    #[test]
    fn test_decorate_complete_selection() {
        let ym = year_month(2026, 2);
        let selection = Selection::Complete {
            start: midnight(2026, 2, 10),
            end:   midnight(2026, 2, 12),
        };
        let days = decorate_days(
            generate_calendar_days(ym, false, date(2026, 2, 1)),
            &selection,
            Some(midnight(2026, 2, 20)),
            None,
            None,
        );

        let in_range: Vec<u32> = days.iter().filter(|d| d.is_in_range).map(|d| d.day_number).collect();
        assert_eq!(in_range, vec![10, 11, 12], "hover is ignored once complete");
        let selected: Vec<u32> = days.iter().filter(|d| d.is_selected).map(|d| d.day_number).collect();
        assert_eq!(selected, vec![10, 12]);
        assert_eq!(days.iter().filter(|d| d.is_range_start).count(), 1);
        assert_eq!(days.iter().filter(|d| d.is_range_end).count(), 1);
    }

    #[test]
    fn test_decorate_hover_preview() {
        let ym = year_month(2026, 2);
        let selection = Selection::Started {
            start: midnight(2026, 2, 14),
        };
        let days = decorate_days(
            generate_calendar_days(ym, false, date(2026, 2, 1)),
            &selection,
            Some(midnight(2026, 2, 11)),
            None,
            None,
        );
        let in_range: Vec<u32> = days.iter().filter(|d| d.is_in_range).map(|d| d.day_number).collect();
        assert_eq!(in_range, vec![11, 12, 13, 14]);
        assert_eq!(days.iter().filter(|d| d.is_range_end).count(), 0);
    }

    #[test]
    fn test_decorate_disables_outside_bounds() {
        let ym = year_month(2026, 2);
        let days = decorate_days(
            generate_calendar_days(ym, false, date(2026, 2, 1)),
            &Selection::Empty,
            None,
            Some(midnight(2026, 2, 5)),
            Some(midnight(2026, 2, 25)),
        );
        let enabled: Vec<_> = days.iter().filter(|d| !d.is_disabled).collect();
        assert_eq!(enabled.len(), 21);
        assert!(enabled.iter().all(|d| d.is_current_month));
        assert!(days.iter().all(|d| !d.is_in_range && !d.is_selected));
    }
}
