//! Value formatting
//!
//! Turns attribute values into escaped, human readable [`SafeString`]s.
//! The rule is selected by an explicit match over the column type hint
//! and the value variant:
//!
//! | input                 | output                      |
//! |-----------------------|-----------------------------|
//! | nil                   | empty string                |
//! | boolean               | `yes` / `no`                |
//! | integer               | `10,000,000`                |
//! | float / decimal       | `3.15` (round half up)      |
//! | date                  | `1910-01-01`                |
//! | time                  | `01:01`                     |
//! | datetime              | `2010-01-01 11:21`          |
//! | text                  | `<p>` paragraphs with `<br />` |
//! | anything else         | escaped string              |
//!
//! # Examples
//!
//! ```rust
//! use dry_crud::config::FormatSettings;
//! use dry_crud::format::format_value;
//! use dry_crud::model::{ColumnType, Value};
//!
//! let settings = FormatSettings::default();
//! let html = format_value(&Value::from(10_000_000), Some(ColumnType::Integer), &settings);
//! assert_eq!(html.as_str(), "10,000,000");
//! ```

mod caption;

pub use caption::captionize;

use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::FormatSettings;
use crate::html::SafeString;
use crate::model::{ColumnType, Value};

static LINE_ENDINGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r\n?").expect("Invalid regex"));
static PARAGRAPH_BREAKS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\n+").expect("Invalid regex"));

/// Format a value, optionally guided by its column type
///
/// The hint wins where it changes the presentation (text, temporal and
/// numeric columns); otherwise the value variant decides.
#[must_use]
pub fn format_value(value: &Value, hint: Option<ColumnType>, settings: &FormatSettings) -> SafeString {
    match (hint, value) {
        (_, Value::Nil) => SafeString::empty(),
        (Some(ColumnType::Text), Value::String(text)) => simple_format(text),
        (Some(ColumnType::Time), Value::Time(_) | Value::DateTime(_)) => {
            value.as_time().map_or_else(SafeString::empty, |t| format_time(t, settings))
        }
        (Some(ColumnType::Date), Value::Date(_) | Value::DateTime(_)) => {
            value.as_date().map_or_else(SafeString::empty, |d| format_date(d, settings))
        }
        (Some(ColumnType::Float | ColumnType::Decimal), Value::Integer(i)) => {
            format_decimal(Decimal::from(*i), settings)
        }
        (Some(ColumnType::Integer), Value::Float(f)) => {
            // Truncation to the integer column's representation is intended.
            #[allow(clippy::cast_possible_truncation)]
            let whole = f.round() as i64;
            format_integer(whole, settings)
        }
        _ => format_plain(value, settings),
    }
}

/// Format a value by its own variant, without a column hint
#[must_use]
pub fn format_plain(value: &Value, settings: &FormatSettings) -> SafeString {
    match value {
        Value::Nil => SafeString::empty(),
        Value::Bool(b) => format_bool(*b, settings),
        Value::Integer(i) => format_integer(*i, settings),
        Value::Float(f) => format_float(*f, settings),
        Value::Decimal(d) => format_decimal(*d, settings),
        Value::Date(d) => format_date(*d, settings),
        Value::Time(t) => format_time(*t, settings),
        Value::DateTime(dt) => format_datetime(*dt, settings),
        Value::String(s) => SafeString::escape(s),
    }
}

/// `yes` / `no`
#[must_use]
pub fn format_bool(value: bool, settings: &FormatSettings) -> SafeString {
    let label = if value {
        &settings.true_label
    } else {
        &settings.false_label
    };
    SafeString::escape(label)
}

/// Integer with thousands delimiters
#[must_use]
pub fn format_integer(value: i64, settings: &FormatSettings) -> SafeString {
    SafeString::escape(&number_with_delimiter(value, &settings.delimiter))
}

/// Float with fixed precision
#[must_use]
pub fn format_float(value: f64, settings: &FormatSettings) -> SafeString {
    SafeString::escape(&float_with_precision(
        value,
        settings.precision,
        &settings.separator,
    ))
}

/// Decimal with fixed precision
#[must_use]
pub fn format_decimal(value: Decimal, settings: &FormatSettings) -> SafeString {
    SafeString::escape(&decimal_with_precision(
        value,
        settings.precision,
        &settings.separator,
    ))
}

/// Date as configured, `YYYY-MM-DD` by default
#[must_use]
pub fn format_date(value: NaiveDate, settings: &FormatSettings) -> SafeString {
    SafeString::escape(&value.format(&settings.date_format).to_string())
}

/// Time of day as configured, `HH:MM` by default
#[must_use]
pub fn format_time(value: NaiveTime, settings: &FormatSettings) -> SafeString {
    SafeString::escape(&value.format(&settings.time_format).to_string())
}

/// Date and time joined by a space
#[must_use]
pub fn format_datetime(value: NaiveDateTime, settings: &FormatSettings) -> SafeString {
    let mut html = format_date(value.date(), settings);
    html.push_escaped(" ");
    html.push(&format_time(value.time(), settings));
    html
}

/// Group the digits of an integer in threes
///
/// ```rust
/// use dry_crud::format::number_with_delimiter;
///
/// assert_eq!(number_with_delimiter(10_000_000, ","), "10,000,000");
/// assert_eq!(number_with_delimiter(-1234, "'"), "-1'234");
/// ```
#[must_use]
pub fn number_with_delimiter(value: i64, delimiter: &str) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push_str(delimiter);
        }
        out.push(ch);
    }
    out
}

/// Round half away from zero and render exactly `precision` decimals
#[must_use]
pub fn decimal_with_precision(value: Decimal, precision: u32, separator: &str) -> String {
    let rounded = value.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);
    let rendered = format!("{rounded:.prec$}", prec = precision as usize);
    with_separator(rendered, separator)
}

/// Round a float half away from zero at `precision` decimals
///
/// Rounding starts from the shortest decimal representation of the
/// float, so `3.145` becomes `3.15` although its binary value is slightly
/// below the midpoint.
#[must_use]
pub fn float_with_precision(value: f64, precision: u32, separator: &str) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    Decimal::from_str(&value.to_string()).map_or_else(
        |_| with_separator(format!("{value:.prec$}", prec = precision as usize), separator),
        |d| decimal_with_precision(d, precision, separator),
    )
}

fn with_separator(rendered: String, separator: &str) -> String {
    if separator == "." {
        rendered
    } else {
        rendered.replacen('.', separator, 1)
    }
}

/// Wrap text in paragraphs and turn single line breaks into `<br />`
///
/// Text columns hold rich text, so allowed markup such as `<b>` or `<a>`
/// passes through. Everything else goes through an allow-list sanitizer
/// that drops scripts, event handlers and unknown tags.
///
/// ```rust
/// use dry_crud::format::simple_format;
///
/// let html = simple_format("AAAAA\nBBBBB\n");
/// assert_eq!(html.as_str(), "<p>AAAAA\n<br />BBBBB\n</p>");
///
/// let html = simple_format("<b>bold</b><script>alert(1)</script>");
/// assert_eq!(html.as_str(), "<p><b>bold</b></p>");
/// ```
#[must_use]
pub fn simple_format(text: &str) -> SafeString {
    let sanitized = ammonia::clean(text);
    let normalized = LINE_ENDINGS.replace_all(&sanitized, "\n");
    let paragraphs = PARAGRAPH_BREAKS.replace_all(&normalized, "</p>\n\n<p>");
    let mut html = String::with_capacity(paragraphs.len() + 16);
    html.push_str("<p>");
    html.push_str(&insert_line_breaks(&paragraphs));
    html.push_str("</p>");
    SafeString::new(html)
}

/// Append `<br />` after every newline that sits between two non-newline characters
fn insert_line_breaks(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut chars = text.chars().peekable();
    let mut previous: Option<char> = None;
    while let Some(ch) = chars.next() {
        out.push(ch);
        if ch == '\n' {
            let after_text = previous.is_some_and(|p| p != '\n');
            let before_text = chars.peek().is_some_and(|n| *n != '\n');
            if after_text && before_text {
                out.push_str("<br />");
            }
        }
        previous = Some(ch);
    }
    out
}
