use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::{debug, warn};

use crate::config::{PickerConfig, TwoMonthsMode};
use crate::consts::DAYS_PER_WEEK;
use crate::format::format_date_range;
use crate::grid::{decorate_days, generate_calendar_days, weekday_headers};
use crate::validators::{ValidationFailure, max_date, max_range_days, min_date, valid_range};
use crate::{CalendarDay, Clock, DateRange, DateRangeValue, Preset, Selection, SystemClock, YearMonth};

/// State owned by one date-range picker widget.
///
/// Each widget constructs its own state; nothing is shared between
/// instances except, optionally, the clock.
#[derive(Debug, Clone)]
pub struct PickerState {
    config:    PickerConfig,
    presets:   Vec<Preset>,
    clock:     Arc<dyn Clock>,
    month:     YearMonth,
    selection: Selection,
    hover:     Option<NaiveDateTime>,
}

impl PickerState {
    /// A picker showing the clock's current month with nothing selected.
    pub fn new(config: PickerConfig, clock: Arc<dyn Clock>) -> Self {
        let month = YearMonth::of(clock.today());
        Self {
            config,
            presets: Vec::new(),
            clock,
            month,
            selection: Selection::Empty,
            hover: None,
        }
    }

    /// [`PickerState::new`] on the system clock
    pub fn with_system_clock(config: PickerConfig) -> Self {
        Self::new(config, Arc::new(SystemClock))
    }

    /// Replaces the preset list
    #[must_use]
    pub fn with_presets(mut self, presets: Vec<Preset>) -> Self {
        self.presets = presets;
        self
    }

    /// Returns the current configuration
    pub const fn config(&self) -> &PickerConfig {
        &self.config
    }

    /// Replaces the configuration; takes effect on the next render
    pub fn update_config(&mut self, config: PickerConfig) {
        debug!(?config, "picker config updated");
        self.config = config;
    }

    /// Returns whether the whole picker is disabled
    pub const fn is_disabled(&self) -> bool {
        self.config.disabled
    }

    /// Presets to offer; empty when the config hides them
    pub fn presets(&self) -> &[Preset] {
        if self.config.show_presets { &self.presets } else { &[] }
    }

    // --- month navigation ---

    /// Returns the displayed month
    pub const fn current_month(&self) -> YearMonth {
        self.month
    }

    /// Returns the displayed month as `"February 2026"`
    pub fn current_month_label(&self) -> String {
        self.month.label()
    }

    /// Shows the previous month
    pub fn previous_month(&mut self) {
        if let Some(month) = self.month.previous() {
            debug!(from = %self.month, to = %month, "previous month");
            self.month = month;
        }
    }

    /// Shows the next month
    pub fn next_month(&mut self) {
        if let Some(month) = self.month.next() {
            debug!(from = %self.month, to = %month, "next month");
            self.month = month;
        }
    }

    /// Shows `month`
    pub fn navigate_to_month(&mut self, month: YearMonth) {
        debug!(from = %self.month, to = %month, "navigate to month");
        self.month = month;
    }

    /// Returns the weekday labels for the configured week start
    pub fn weekday_headers(&self) -> [&'static str; DAYS_PER_WEEK] {
        weekday_headers(self.config.start_with_sunday)
    }

    // --- grids ---

    /// The displayed month, decorated with selection, hover preview and
    /// min/max disabling
    pub fn calendar_days(&self) -> Vec<CalendarDay> {
        self.decorated(self.month, self.hover)
    }

    /// The neighbouring month of a two-month popup, `None` unless enabled
    pub fn second_month(&self) -> Option<YearMonth> {
        if !self.config.show_two_months {
            return None;
        }
        match self.config.two_months_mode {
            TwoMonthsMode::CurrentNext => self.month.next(),
            TwoMonthsMode::PreviousCurrent => self.month.previous(),
        }
    }

    /// Grid of [`PickerState::second_month`]; no hover preview is drawn there
    pub fn second_month_days(&self) -> Vec<CalendarDay> {
        self.second_month()
            .map(|month| self.decorated(month, None))
            .unwrap_or_default()
    }

    /// Returns the label of the second month, empty when hidden
    pub fn second_month_label(&self) -> String {
        self.second_month().map(|m| m.label()).unwrap_or_default()
    }

    fn decorated(&self, month: YearMonth, hover: Option<NaiveDateTime>) -> Vec<CalendarDay> {
        decorate_days(
            generate_calendar_days(month, self.config.start_with_sunday, self.clock.today()),
            &self.selection,
            hover,
            self.config.min_date,
            self.config.max_date,
        )
    }

    // --- selection ---

    /// Returns the selection as a range
    pub const fn selection(&self) -> DateRange {
        self.selection.range()
    }

    /// Returns the raw selection state
    pub const fn selection_state(&self) -> Selection {
        self.selection
    }

    /// Applies one click on `date` to the selection
    pub fn select_date(&mut self, date: NaiveDateTime) {
        self.selection = self.selection.select_date(date);
    }

    /// Selects `start..=end` as given, without reordering
    pub fn set_range(&mut self, start: NaiveDateTime, end: NaiveDateTime) {
        self.selection = self.selection.set_range(start, end);
    }

    /// Drops the selection
    pub fn clear_selection(&mut self) {
        self.selection = self.selection.clear_selection();
    }

    /// Sets or clears the hovered date
    pub fn set_hover_date(&mut self, date: Option<NaiveDateTime>) {
        self.hover = date;
    }

    /// Returns the hovered date, if any
    pub const fn hover_date(&self) -> Option<NaiveDateTime> {
        self.hover
    }

    /// Handles a click on a grid cell.
    ///
    /// Disabled cells and a disabled picker ignore clicks. With
    /// `allow_single_day` off, clicking the start day again does nothing.
    /// Returns the range when this click completes one.
    pub fn click_day(&mut self, day: &CalendarDay) -> Option<(NaiveDateTime, NaiveDateTime)> {
        if day.is_disabled || self.config.disabled {
            return None;
        }
        if !self.config.allow_single_day
            && let Selection::Started { start } = self.selection
            && start.date() == day.date.date()
        {
            debug!(date = ?day.date, "single-day range not allowed");
            return None;
        }

        self.select_date(day.date);
        match self.selection {
            Selection::Complete { start, end } => Some((start, end)),
            Selection::Empty | Selection::Started { .. } => None,
        }
    }

    /// Hovering a disabled cell leaves the preview unchanged.
    pub fn hover_day(&mut self, day: &CalendarDay) {
        if !day.is_disabled {
            self.hover = Some(day.date);
        }
    }

    /// Clears the hover preview
    pub fn leave_day(&mut self) {
        self.hover = None;
    }

    /// Resolves `preset` now and selects its range; `None` when disabled.
    pub fn apply_preset(&mut self, preset: &Preset) -> Option<(NaiveDateTime, NaiveDateTime)> {
        if self.config.disabled {
            return None;
        }
        let (start, end) = preset.resolve(self.clock.as_ref());
        debug!(label = preset.label(), ?start, ?end, "preset applied");
        self.set_range(start, end);
        Some((start, end))
    }

    // --- form integration ---

    /// Loads a value written by the host form. A value missing either end,
    /// or holding text that does not parse, clears the selection.
    pub fn write_value(&mut self, value: &DateRangeValue) {
        match (value.start_date(), value.end_date()) {
            (Some(start), Some(end)) => self.set_range(start, end),
            _ => {
                if value.is_filled() {
                    warn!(?value, "ignoring unparseable range value");
                }
                self.clear_selection();
            }
        }
    }

    /// The selection as the host form sees it
    pub fn value(&self) -> DateRangeValue {
        self.selection.range().to_value()
    }

    /// Text for the picker input; empty until both ends are chosen
    pub fn display_value(&self) -> String {
        let range = self.selection.range();
        format_date_range(range.start, range.end, &self.config.date_format)
    }

    /// Checks `value` against this picker's config, reporting the first
    /// failure in the order: range order, min date, max date, max span.
    ///
    /// A value missing either end passes; pair with
    /// [`crate::validators::required`] when the field is mandatory.
    ///
    /// # Errors
    /// Returns the first `ValidationFailure` found.
    pub fn validate(&self, value: &DateRangeValue) -> Result<(), ValidationFailure> {
        if value.start_date().is_none() || value.end_date().is_none() {
            return Ok(());
        }
        valid_range(value)?;
        if let Some(min) = self.config.min_date {
            min_date(value, min)?;
        }
        if let Some(max) = self.config.max_date {
            max_date(value, max)?;
        }
        if let Some(max) = self.config.max_range_days {
            max_range_days(value, max)?;
        }
        Ok(())
    }
}
