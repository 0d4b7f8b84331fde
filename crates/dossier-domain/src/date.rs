//! Document date parsing
//!
//! Identity documents print dates as `DD/MM/YYYY`. Text coming back from the
//! extractor is unreliable, so parsing is strict about the shape and reports
//! shape problems separately from impossible calendar dates.

use chrono::NaiveDate;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static DOCUMENT_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{2})/([0-9]{2})/([0-9]{4})$").expect("static regex"));

/// Why a document date could not be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateParseError {
    /// The text is empty
    Empty,
    /// The text does not have the `DD/MM/YYYY` shape
    Format,
    /// The shape is right but the day does not exist (e.g. `31/02/1990`)
    Calendar,
}

impl fmt::Display for DateParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateParseError::Empty => write!(f, "date is empty"),
            DateParseError::Format => write!(f, "date is not in DD/MM/YYYY format"),
            DateParseError::Calendar => write!(f, "date does not exist in the calendar"),
        }
    }
}

impl std::error::Error for DateParseError {}

/// Parse a `DD/MM/YYYY` document date into a calendar date
///
/// Surrounding whitespace is ignored.
///
/// # Examples
///
/// ```
/// use dossier_domain::parse_document_date;
/// use chrono::NaiveDate;
///
/// assert_eq!(
///     parse_document_date("15/07/1990"),
///     Ok(NaiveDate::from_ymd_opt(1990, 7, 15).unwrap())
/// );
/// assert!(parse_document_date("1990-07-15").is_err());
/// ```
pub fn parse_document_date(text: &str) -> Result<NaiveDate, DateParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(DateParseError::Empty);
    }

    let caps = DOCUMENT_DATE.captures(text).ok_or(DateParseError::Format)?;
    // ASCII digits of bounded width
    let day: u32 = caps[1].parse().map_err(|_| DateParseError::Format)?;
    let month: u32 = caps[2].parse().map_err(|_| DateParseError::Format)?;
    let year: i32 = caps[3].parse().map_err(|_| DateParseError::Format)?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or(DateParseError::Calendar)
}

/// Render a calendar date as `YYYY-MM-DD`
pub fn format_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
