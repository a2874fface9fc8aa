//! Scalar conversion: raw text and decoded scalars into richer native types.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::{Captures, Regex};
use serde_json::Value;

use crate::error::DocumentError;
use crate::value::ResolvedValue;

fn integer_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]{1,19}$").unwrap())
}

fn float_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^-?[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?$").unwrap())
}

fn date_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})( (\d{1,2}):(\d{1,2}):(\d{1,2}))?$").unwrap()
    })
}

/// Convert raw scalar text into its richest native form.
///
/// Rules, in order: an unsigned run of up to 19 digits is an integer (a
/// match beyond `i64::MAX` widens to a float rather than failing); text
/// with a fractional part is a float; `YYYY-MM-DD`, optionally followed by
/// ` hh:mm:ss`, is a date-time (midnight when the time is absent, and a
/// `DateConversion` error when a captured field is out of range); anything
/// else is returned unchanged as text.
pub(crate) fn convert_text(text: &str) -> Result<ResolvedValue, DocumentError> {
    if integer_regex().is_match(text) {
        return Ok(match text.parse::<i64>() {
            Ok(n) => ResolvedValue::Integer(n),
            Err(_) => ResolvedValue::Float(text.parse::<f64>().unwrap_or(0.0)),
        });
    }
    if float_regex().is_match(text) {
        if let Ok(f) = text.parse::<f64>() {
            return Ok(ResolvedValue::Float(f));
        }
    }
    if let Some(caps) = date_regex().captures(text) {
        return convert_date(&caps);
    }
    Ok(ResolvedValue::String(text.to_string()))
}

fn convert_date(caps: &Captures<'_>) -> Result<ResolvedValue, DocumentError> {
    let field = |i: usize| -> u32 { caps.get(i).map_or(0, |m| m.as_str().parse().unwrap_or(0)) };

    let (year, month, day) = (field(1) as i32, field(2), field(3));
    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        DocumentError::DateConversion(format!("{year:04}-{month:02}-{day:02} is out of range"))
    })?;

    let (hour, minute, second) = if caps.get(4).is_some() {
        (field(5), field(6), field(7))
    } else {
        (0, 0, 0)
    };
    let datetime = date.and_hms_opt(hour, minute, second).ok_or_else(|| {
        DocumentError::DateConversion(format!("{hour:02}:{minute:02}:{second:02} is out of range"))
    })?;

    Ok(ResolvedValue::DateTime(datetime))
}

/// Convert an already-decoded scalar. Strings go through [`convert_text`];
/// numbers keep their natural width; `null` resolves to `Missing`.
pub(crate) fn convert_value(value: &Value, formatted: bool) -> Result<ResolvedValue, DocumentError> {
    Ok(match value {
        Value::Null => ResolvedValue::Missing,
        Value::Bool(b) => ResolvedValue::Bool(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => ResolvedValue::Integer(i),
            None => ResolvedValue::Float(n.as_f64().unwrap_or(0.0)),
        },
        Value::String(s) if formatted => convert_text(s)?,
        Value::String(s) => ResolvedValue::String(s.clone()),
        container => {
            return Err(DocumentError::QueryExecution(format!(
                "expected a scalar, found {container}"
            )))
        }
    })
}
