use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::consts::{DEFAULT_DATE_FORMAT, ISO_DATE_FORMAT, ISO_TIME_SEPARATOR, RANGE_DISPLAY_SEPARATOR};
use crate::{ParseError, prelude::*};

/// ISO 8601 local date-time layouts accepted after the `T` separator
const ISO_DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y%m%dT%H%M%S%.f",
    "%Y%m%dT%H%M",
];

/// ISO 8601 calendar date layouts, extended then basic
const ISO_DATE_LAYOUTS: [&str; 2] = [ISO_DATE_FORMAT, "%Y%m%d"];

/// Minutes appended to an hour-only time (`T10` reads as `T10:00`)
const HOUR_ONLY_SUFFIX: &str = ":00";

/// A display pattern written in the widget token language
/// (`dd MMM yyyy`, `yyyy-MM-dd`, `hh:mm a`, ...).
///
/// The pattern is compiled once into a chrono strftime string. Text inside
/// single quotes is copied literally (`''` is a quote); letters with no
/// token meaning are copied as well.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{pattern}")]
#[serde(from = "String", into = "String")]
pub struct DateFormat {
    pattern:  String,
    strftime: String,
}

impl DateFormat {
    pub fn new(pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let strftime = compile(&pattern);
        Self { pattern, strftime }
    }

    /// The pattern as written
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The equivalent chrono strftime string
    pub fn strftime(&self) -> &str {
        &self.strftime
    }

    pub fn format(&self, moment: NaiveDateTime) -> String {
        moment.format(&self.strftime).to_string()
    }

    pub fn format_date(&self, date: NaiveDate) -> String {
        self.format(NaiveDateTime::new(date, NaiveTime::MIN))
    }

    pub fn format_time(&self, time: NaiveTime) -> String {
        self.format(NaiveDateTime::new(NaiveDate::MIN, time))
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_FORMAT)
    }
}

impl From<String> for DateFormat {
    fn from(pattern: String) -> Self {
        Self::new(pattern)
    }
}

impl From<&str> for DateFormat {
    fn from(pattern: &str) -> Self {
        Self::new(pattern)
    }
}

impl From<DateFormat> for String {
    fn from(format: DateFormat) -> Self {
        format.pattern
    }
}

fn compile(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == '\'' {
            // quoted literal; '' inside or outside quotes is one quote
            i += 1;
            if chars.get(i) == Some(&'\'') {
                out.push('\'');
                i += 1;
                continue;
            }
            while i < chars.len() {
                if chars[i] == '\'' {
                    if chars.get(i + 1) == Some(&'\'') {
                        out.push('\'');
                        i += 2;
                        continue;
                    }
                    i += 1;
                    break;
                }
                push_literal(&mut out, chars[i]);
                i += 1;
            }
            continue;
        }

        if c.is_ascii_alphabetic() {
            let run = chars[i..].iter().take_while(|&&next| next == c).count();
            match token(c, run) {
                Some(directive) => out.push_str(directive),
                None => {
                    if is_token_letter(c) {
                        warn!(pattern, letter = %c, count = run, "unsupported token length copied as text");
                    }
                    (0..run).for_each(|_| push_literal(&mut out, c));
                }
            }
            i += run;
            continue;
        }

        push_literal(&mut out, c);
        i += 1;
    }

    out
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}

/// Letters that form a token at some run length
const fn is_token_letter(letter: char) -> bool {
    matches!(letter, 'y' | 'M' | 'L' | 'd' | 'E' | 'c' | 'o' | 'W' | 'H' | 'h' | 'm' | 's' | 'S' | 'a')
}

/// strftime equivalent of a run of `count` copies of `letter`
const fn token(letter: char, count: usize) -> Option<&'static str> {
    let directive = match (letter, count) {
        ('y', 2) => "%y",
        ('y', _) => "%Y",
        ('M' | 'L', 1) => "%-m",
        ('M' | 'L', 2) => "%m",
        ('M' | 'L', 3) => "%b",
        ('M' | 'L', _) => "%B",
        ('d', 1) => "%-d",
        ('d', 2) => "%d",
        ('E' | 'c', 1) => "%u",
        ('E' | 'c', 3) => "%a",
        ('E' | 'c', 4) => "%A",
        ('o', 3) => "%j",
        ('W', 1) => "%-V",
        ('W', 2) => "%V",
        ('H', 1) => "%-H",
        ('H', 2) => "%H",
        ('h', 1) => "%-I",
        ('h', 2) => "%I",
        ('m', 1) => "%-M",
        ('m', 2) => "%M",
        ('s', 1) => "%-S",
        ('s', 2) => "%S",
        ('S', 3) => "%3f",
        ('a', 1) => "%p",
        _ => return None,
    };
    Some(directive)
}

/// Formats both ends and joins them with " - "; empty unless both are set.
pub fn format_date_range(
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    format: &DateFormat,
) -> String {
    match (start, end) {
        (Some(start), Some(end)) => {
            format!("{}{RANGE_DISPLAY_SEPARATOR}{}", format.format(start), format.format(end))
        }
        _ => String::new(),
    }
}

/// The ISO calendar date of `moment` (`2026-02-01`)
pub fn to_iso_date(moment: NaiveDateTime) -> String {
    moment.format(ISO_DATE_FORMAT).to_string()
}

/// Parses an ISO 8601 date or local date-time.
///
/// Accepts calendar dates in extended or basic form (`2026-02-01`,
/// `20260201`) as midnight, and date-times down to the hour
/// (`2026-02-01T10`, `2026-02-01T10:30[:00[.000]]`, `20260201T1030`).
///
/// A UTC offset (`Z`, `+05:00`) is dropped without converting: the wall
/// time written in the string is the one returned.
///
/// # Errors
/// Returns `ParseError::EmptyInput` for blank input and
/// `ParseError::InvalidFormat` for anything else that does not parse.
pub fn parse_iso(raw: &str) -> Result<NaiveDateTime, ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    if !trimmed.contains(ISO_TIME_SEPARATOR) {
        return ISO_DATE_LAYOUTS
            .iter()
            .find_map(|layout| NaiveDate::parse_from_str(trimmed, layout).ok())
            .map(|date| NaiveDateTime::new(date, NaiveTime::MIN))
            .ok_or_else(|| ParseError::InvalidFormat(trimmed.to_owned()));
    }

    ISO_DATE_TIME_FORMATS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(trimmed, layout).ok())
        .or_else(|| {
            // chrono needs minutes, so an hour-only time gets ":00"
            let padded = format!("{trimmed}{HOUR_ONLY_SUFFIX}");
            NaiveDateTime::parse_from_str(&padded, ISO_DATE_TIME_FORMATS[1]).ok()
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|dt| dt.naive_local())
        })
        .ok_or_else(|| ParseError::InvalidFormat(trimmed.to_owned()))
}

/// Serde adapter for optional dates written as ISO strings
pub(crate) mod iso_opt {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{parse_iso, to_iso_date};

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(moment) => serializer.serialize_str(&to_iso_date(*moment)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        raw.map(|s| parse_iso(&s).map_err(serde::de::Error::custom))
            .transpose()
    }
}
