use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::DateFormat;
use crate::consts::DEFAULT_PLACEHOLDER;

/// Which neighbour the second calendar of a two-month popup shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TwoMonthsMode {
    /// Current month, then the next one
    #[default]
    CurrentNext,
    /// Previous month, then the current one
    PreviousCurrent,
}

/// Options for one picker instance. Read on every render, never mutated by
/// the picker itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    pub start_with_sunday: bool,
    #[serde(with = "crate::format::iso_opt")]
    pub min_date:          Option<NaiveDateTime>,
    #[serde(with = "crate::format::iso_opt")]
    pub max_date:          Option<NaiveDateTime>,
    /// Largest allowed `days_between(start, end)`; `Some(0)` allows only
    /// single-day ranges
    pub max_range_days:    Option<i64>,
    pub show_presets:      bool,
    /// When false, a second click on the start day does not complete a range
    pub allow_single_day:  bool,
    pub date_format:       DateFormat,
    pub show_clear_button: bool,
    pub placeholder:       String,
    pub disabled:          bool,
    pub show_two_months:   bool,
    pub two_months_mode:   TwoMonthsMode,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            start_with_sunday: false,
            min_date:          None,
            max_date:          None,
            max_range_days:    None,
            show_presets:      true,
            allow_single_day:  true,
            date_format:       DateFormat::default(),
            show_clear_button: true,
            placeholder:       DEFAULT_PLACEHOLDER.to_owned(),
            disabled:          false,
            show_two_months:   false,
            two_months_mode:   TwoMonthsMode::default(),
        }
    }
}

/// Error type for loading a picker configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read picker config {}: {source}", path.display())]
    Read {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML did not describe a valid configuration.
    #[error(transparent)]
    Parse(#[from] toml::de::Error),
}

impl PickerConfig {
    /// Parses a configuration from TOML; missing keys keep their defaults.
    ///
    /// ```toml
    /// start_with_sunday = true
    /// min_date = "2026-01-01"
    /// max_range_days = 30
    /// date_format = "yyyy-MM-dd"
    /// two_months_mode = "previous-current"
    /// ```
    ///
    /// # Errors
    /// Returns `ConfigError::Parse` for malformed TOML, unknown enum values
    /// or dates that are not ISO-8601.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        debug!(?config, "parsed picker config");
        Ok(config)
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    /// Returns `ConfigError::Read` if the file cannot be read and
    /// `ConfigError::Parse` if its contents are invalid.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        info!("loading picker config");
        Self::from_toml_str(&raw)
    }
}
