//! Core format dispatch for `datef`, a command-line timestamp converter.
//!
//! A [`Format`] describes one way of writing a point in time as text: seconds
//! or milliseconds since the Unix epoch, a named layout like `RFC3339`, or an
//! arbitrary [strftime](https://docs.rs/chrono/latest/chrono/format/strftime/) pattern.
//! The same [`Format`] value is used symmetrically for parsing input
//! timestamps and rendering output timestamps, with all instants normalized to
//! UTC in between.

#![deny(missing_docs, rust_2018_idioms, unused, unused_import_braces, unused_lifetimes, unused_qualifications, warnings)]
#![forbid(unsafe_code)]

use {
    std::{
        convert::Infallible,
        fmt::{
            self,
            Write as _,
        },
        str::FromStr,
    },
    chrono::{
        SecondsFormat,
        prelude::*,
    },
};

/// An error that occurred while parsing a timestamp against a [`Format`].
///
/// This is the only error in the crate: constructing a [`Format`] cannot fail,
/// and rendering cannot fail either.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{input:?} is an invalid value for format {format}")]
pub struct FormatError {
    /// The string that failed to parse.
    pub input: String,
    /// The display form of the format it was parsed against.
    pub format: String,
}

/// How a named format maps onto chrono's formatting machinery.
#[derive(Debug, Clone, Copy)]
enum Style {
    /// chrono's dedicated RFC 2822 support.
    Rfc2822,
    /// chrono's dedicated RFC 3339 support, rendering UTC with a `Z` suffix.
    Rfc3339,
    /// A plain strftime pattern.
    Pattern(&'static str),
}

/// An alias for a common timestamp layout, selectable by name instead of
/// spelling out its pattern.
#[derive(Debug, Clone, Copy)]
pub struct NamedFormat {
    name: &'static str,
    style: Style,
    description: &'static str,
}

impl NamedFormat {
    /// The alias under which this layout is selected.
    pub fn name(&self) -> &'static str { self.name }

    /// A one-line description, shown in the usage text.
    pub fn description(&self) -> &'static str { self.description }
}

/// All named formats, sorted by name.
pub static NAMED_FORMATS: &[NamedFormat] = &[
    NamedFormat { name: "RFC2822", style: Style::Rfc2822, description: "RFC2822 timestamp" },
    NamedFormat { name: "RFC3339", style: Style::Rfc3339, description: "RFC3339 timestamp" },
    NamedFormat { name: "date", style: Style::Pattern("%Y-%m-%d"), description: "calendar date, midnight UTC" },
];

fn named_format(name: &str) -> Option<&'static NamedFormat> {
    NAMED_FORMATS.iter().find(|named| named.name == name)
}

/// A timestamp encoding. Values are constructed with [`FromStr`], which cannot
/// fail: unrecognized specifiers become custom patterns, validated only when
/// they are first used to parse or render.
#[derive(Debug, Clone)]
pub enum Format {
    /// Whole seconds since the Unix epoch, as an optionally signed base-10 integer.
    UnixSeconds,
    /// Milliseconds since the Unix epoch, as an optionally signed base-10 integer.
    UnixMillis,
    /// An entry of [`NAMED_FORMATS`].
    Named(&'static NamedFormat),
    /// A custom strftime pattern, kept verbatim.
    Custom(String),
}

impl Format {
    /// Parses `input` according to this format, normalized to UTC.
    pub fn parse(&self, input: &str) -> Result<DateTime<Utc>, FormatError> {
        match self {
            Format::UnixSeconds => input.parse().ok().and_then(|secs| DateTime::from_timestamp(secs, 0)),
            Format::UnixMillis => input.parse().ok().and_then(DateTime::from_timestamp_millis),
            Format::Named(named) => match named.style {
                Style::Rfc2822 => DateTime::parse_from_rfc2822(input).ok().map(|date_time| date_time.with_timezone(&Utc)),
                Style::Rfc3339 => DateTime::parse_from_rfc3339(input).ok().map(|date_time| date_time.with_timezone(&Utc)),
                Style::Pattern(pattern) => parse_pattern(pattern, input),
            },
            Format::Custom(pattern) => parse_pattern(pattern, input),
        }.ok_or_else(|| FormatError { input: input.to_owned(), format: self.to_string() })
    }

    /// Renders `date_time` in this format. Fixed formats truncate to their
    /// granularity; rendering never fails.
    pub fn render(&self, date_time: DateTime<Utc>) -> String {
        match self {
            Format::UnixSeconds => date_time.timestamp().to_string(),
            Format::UnixMillis => date_time.timestamp_millis().to_string(),
            Format::Named(named) => match named.style {
                Style::Rfc2822 => date_time.to_rfc2822(),
                Style::Rfc3339 => date_time.to_rfc3339_opts(SecondsFormat::Secs, true),
                Style::Pattern(pattern) => render_pattern(pattern, &date_time),
            },
            Format::Custom(pattern) => render_pattern(pattern, &date_time),
        }
    }
}

impl FromStr for Format {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Format, Infallible> {
        Ok(match s {
            "unix" => Format::UnixSeconds,
            "unixms" => Format::UnixMillis,
            _ => if let Some(named) = named_format(s) {
                Format::Named(named)
            } else {
                Format::Custom(s.to_owned())
            },
        })
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::UnixSeconds => f.write_str("unix"),
            Format::UnixMillis => f.write_str("unixms"),
            Format::Named(named) => f.write_str(named.name),
            Format::Custom(pattern) => f.write_str(pattern),
        }
    }
}

/// Patterns without offset information are interpreted as UTC, patterns
/// without a time of day as midnight.
fn parse_pattern(pattern: &str, input: &str) -> Option<DateTime<Utc>> {
    if let Ok(date_time) = DateTime::parse_from_str(input, pattern) {
        return Some(date_time.with_timezone(&Utc))
    }
    if let Ok(date_time) = NaiveDateTime::parse_from_str(input, pattern) {
        return Some(date_time.and_utc())
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, pattern) {
        return Some(date.and_time(NaiveTime::default()).and_utc())
    }
    None
}

fn render_pattern(pattern: &str, date_time: &DateTime<Utc>) -> String {
    let mut rendered = String::default();
    match write!(rendered, "{}", date_time.format(pattern)) {
        // chrono reports unrecognized specifiers through fmt::Error at render
        // time; echo the pattern so rendering stays total
        Ok(()) => rendered,
        Err(fmt::Error) => pattern.to_owned(),
    }
}
