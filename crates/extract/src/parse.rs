//! Value parsers for the leaf fields of scraped markup.
//!
//! Every parser comes in two flavours: a strict `try_*` variant that reports
//! why a value was rejected, and a lenient variant that applies the field's
//! documented default instead of failing:
//!
//! | Parser                         | Default on failure   |
//! |--------------------------------|----------------------|
//! | [`price`]                      | `0.0`                |
//! | [`date`]                       | today (UTC)          |
//! | [`integer`]                    | `0`                  |
//! | [`float`]                      | `0.0`                |
//! | [`slug`]                       | empty string         |
//! | [`absolute_url`]               | empty string         |

use crate::consts::BASE_URL;
use crate::error::{ErrorKind, Result};
use exn::{OptionExt, ResultExt};
use regex::Regex;
use std::sync::LazyLock;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, UtcDateTime};

static ORDINAL_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(\d{1,2})(?:st|nd|rd|th)\b").unwrap());
static INTEGER_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d[\d,]*").unwrap());
static FLOAT_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").unwrap());

/// Parses a currency string such as `"$3.99"`, rejecting anything without
/// a parsable number once every non-digit, non-decimal-point character has
/// been stripped.
pub fn try_price(text: &str) -> Result<f64> {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();
    digits.parse::<f64>().or_raise(|| ErrorKind::ParseError {
        field: "price",
        value: text.to_string(),
    })
}

/// Parses a currency string, defaulting to `0.0`.
pub fn price(text: &str) -> f64 {
    try_price(text).unwrap_or(0.0)
}

/// Parses a human date such as `"Jan 3rd, 2024"`, `"January 3, 2024"`,
/// `"2024-01-03"` or `"1/3/2024"`. Ordinal suffixes are ignored.
pub fn try_date(text: &str) -> Result<Date> {
    let cleaned = ORDINAL_REGEX.replace_all(text, "$1").replace(',', " ");
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    let formats: [&[BorrowedFormatItem<'_>]; 4] = [
        format_description!("[month repr:short case_sensitive:false] [day padding:none] [year]"),
        format_description!("[month repr:long case_sensitive:false] [day padding:none] [year]"),
        format_description!("[year]-[month]-[day]"),
        format_description!("[month padding:none]/[day padding:none]/[year]"),
    ];
    formats
        .iter()
        .find_map(|format| Date::parse(&cleaned, *format).ok())
        .ok_or_raise(|| ErrorKind::ParseError {
            field: "date",
            value: text.to_string(),
        })
}

/// Parses a human date, defaulting to today's date (UTC).
pub fn date(text: &str) -> Date {
    try_date(text).unwrap_or_else(|_| today())
}

pub(crate) fn today() -> Date {
    UtcDateTime::now().date()
}

/// Parses the first run of digits in `text`, ignoring thousands separators
/// (`"1,234 ratings"` becomes `1234`).
pub fn try_integer(text: &str) -> Result<u64> {
    let found = INTEGER_REGEX.find(text).ok_or_raise(|| ErrorKind::ParseError {
        field: "integer",
        value: text.to_string(),
    })?;
    found.as_str().replace(',', "").parse::<u64>().or_raise(|| ErrorKind::ParseError {
        field: "integer",
        value: text.to_string(),
    })
}

/// Parses an integer, defaulting to `0`.
pub fn integer(text: &str) -> u64 {
    try_integer(text).unwrap_or(0)
}

/// Parses the first decimal number in `text` (`"4.5 / 5"` becomes `4.5`).
pub fn try_float(text: &str) -> Result<f64> {
    let found = FLOAT_REGEX.find(text).ok_or_raise(|| ErrorKind::ParseError {
        field: "float",
        value: text.to_string(),
    })?;
    found.as_str().parse::<f64>().or_raise(|| ErrorKind::ParseError {
        field: "float",
        value: text.to_string(),
    })
}

/// Parses a decimal number, defaulting to `0.0`.
pub fn float(text: &str) -> f64 {
    try_float(text).unwrap_or(0.0)
}

/// Extracts the title slug (last path segment) from a comic URL, absolute
/// or relative: `/comic/1234/batman-1?variant=9` becomes `batman-1`.
pub fn slug(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let path = path.split_once("://").map_or(path, |(_, rest)| rest.split_once('/').map_or("", |(_, p)| p));
    path.split('/').rfind(|segment| !segment.is_empty()).unwrap_or_default().to_string()
}

/// Resolves `href` against the site origin unless it is already absolute.
pub fn absolute_url(href: &str) -> String {
    let href = href.trim();
    if href.is_empty() {
        return String::new();
    }
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }
    if let Some(rest) = href.strip_prefix("//") {
        return format!("https://{rest}");
    }
    if href.starts_with('/') {
        format!("{BASE_URL}{href}")
    } else {
        format!("{BASE_URL}/{href}")
    }
}
