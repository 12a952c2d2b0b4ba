use chrono::NaiveDateTime;
use tracing::debug;

use crate::DateRange;

/// Two-click range selection.
///
/// Each operation consumes the current state and returns the next one:
///
/// ```text
/// Empty --select(D)--> Started(D) --select(E)--> Complete(min(D,E), max(D,E))
///                          ^                            |
///                          +--------select(F)-----------+
/// ```
///
/// `set_range` jumps straight to `Complete` and `clear_selection` back to
/// `Empty` from anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Selection {
    /// Nothing selected
    #[default]
    Empty,
    /// First click made, waiting for the second
    Started { start: NaiveDateTime },
    /// Both ends chosen. `start <= end` unless written through `set_range`
    Complete {
        start: NaiveDateTime,
        end:   NaiveDateTime,
    },
}

impl Selection {
    /// Applies one click on `date`.
    ///
    /// A second click earlier than the first swaps the ends, so a range
    /// completed here is always ordered. A click on a complete range starts
    /// over from `date`.
    #[must_use]
    pub fn select_date(self, date: NaiveDateTime) -> Self {
        let next = match self {
            Self::Empty | Self::Complete { .. } => Self::Started { start: date },
            Self::Started { start } if date < start => Self::Complete { start: date, end: start },
            Self::Started { start } => Self::Complete { start, end: date },
        };
        debug!(?date, from = ?self, to = ?next, "selection transition");
        next
    }

    /// Forces a complete range without ordering or validating it.
    #[must_use]
    pub fn set_range(self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        debug!(?start, ?end, "selection range set");
        Self::Complete { start, end }
    }

    #[must_use]
    pub fn clear_selection(self) -> Self {
        debug!(from = ?self, "selection cleared");
        Self::Empty
    }

    /// Range highlighted while the pointer rests on `hover`.
    ///
    /// Only a started selection has a preview; it is never stored.
    pub fn hover_preview(&self, hover: NaiveDateTime) -> Option<(NaiveDateTime, NaiveDateTime)> {
        match *self {
            Self::Started { start } => Some((start.min(hover), start.max(hover))),
            Self::Empty | Self::Complete { .. } => None,
        }
    }

    pub const fn start(&self) -> Option<NaiveDateTime> {
        match *self {
            Self::Empty => None,
            Self::Started { start } | Self::Complete { start, .. } => Some(start),
        }
    }

    pub const fn end(&self) -> Option<NaiveDateTime> {
        match *self {
            Self::Complete { end, .. } => Some(end),
            Self::Empty | Self::Started { .. } => None,
        }
    }

    pub const fn is_complete(&self) -> bool {
        matches!(self, Self::Complete { .. })
    }

    pub const fn range(&self) -> DateRange {
        DateRange {
            start: self.start(),
            end:   self.end(),
        }
    }
}

impl From<Selection> for DateRange {
    fn from(selection: Selection) -> Self {
        selection.range()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::midnight;

    #[test]
    fn test_first_click_starts() {
        let d = midnight(2026, 2, 10);
        let selection = Selection::Empty.select_date(d);
        assert_eq!(selection, Selection::Started { start: d });
        assert_eq!(selection.range(), DateRange { start: Some(d), end: None });
        assert!(!selection.is_complete());
    }

    #[test]
    fn test_second_click_completes_in_order() {
        let selection = Selection::Empty
            .select_date(midnight(2026, 2, 10))
            .select_date(midnight(2026, 2, 20));
        assert_eq!(
            selection.range(),
            DateRange::new(midnight(2026, 2, 10), midnight(2026, 2, 20))
        );
        assert!(selection.is_complete());
    }

    #[test]
    fn test_second_click_earlier_swaps() {
        let selection = Selection::Empty
            .select_date(midnight(2026, 2, 20))
            .select_date(midnight(2026, 2, 10));
        assert_eq!(
            selection,
            Selection::Complete {
                start: midnight(2026, 2, 10),
                end:   midnight(2026, 2, 20),
            }
        );
    }

    #[test]
    fn test_same_day_twice_is_single_day_range() {
        let d = midnight(2026, 2, 15);
        let selection = Selection::Empty.select_date(d).select_date(d);
        assert_eq!(selection, Selection::Complete { start: d, end: d });
    }

    #[test]
    fn test_third_click_restarts() {
        let third = midnight(2026, 3, 5);
        let selection = Selection::Empty
            .select_date(midnight(2026, 2, 20))
            .select_date(midnight(2026, 2, 10))
            .select_date(third);
        assert_eq!(selection, Selection::Started { start: third });
        assert_eq!(selection.end(), None);
    }

    #[test]
    fn test_set_range_skips_ordering() {
        let later = midnight(2026, 2, 20);
        let earlier = midnight(2026, 2, 10);
        let selection = Selection::Started { start: later }.set_range(later, earlier);
        assert_eq!(selection.start(), Some(later));
        assert_eq!(selection.end(), Some(earlier));
    }

    #[test]
    fn test_clear_from_every_state() {
        let d = midnight(2026, 2, 10);
        let states = [
            Selection::Empty,
            Selection::Started { start: d },
            Selection::Complete { start: d, end: d },
        ];
        for state in states {
            assert_eq!(state.clear_selection(), Selection::Empty);
        }
    }

    #[test]
    fn test_hover_preview_only_while_started() {
        let start = midnight(2026, 2, 10);
        let before = midnight(2026, 2, 5);
        let after = midnight(2026, 2, 15);

        let started = Selection::Started { start };
        assert_eq!(started.hover_preview(after), Some((start, after)));
        assert_eq!(started.hover_preview(before), Some((before, start)));

        assert_eq!(Selection::Empty.hover_preview(after), None);
        let complete = Selection::Complete { start, end: after };
        assert_eq!(complete.hover_preview(before), None);
        // previewing never mutates the selection
        assert_eq!(started, Selection::Started { start });
    }
}
