// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Type coercion for plain scalars.
//!
//! Only plain scalars are coerced. Quoted and block scalars always stay
//! strings, which is what lets the serializer protect look-alike strings by
//! quoting them.

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use regex::Regex;

use crate::value::Value;

static INTEGER: OnceLock<Regex> = OnceLock::new();
static FLOAT: OnceLock<Regex> = OnceLock::new();
static DATE_PREFIX: OnceLock<Regex> = OnceLock::new();

/// Date-time layouts accepted without an offset; they are read as UTC.
const NAIVE_DATE_TIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

#[allow(clippy::unwrap_used, reason = "The patterns are constant and valid")]
fn pattern(cell: &'static OnceLock<Regex>, source: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(source).unwrap())
}

/// Convert the text of a plain scalar into a typed value.
#[must_use]
pub fn coerce_plain(text: &str) -> Value {
    match text {
        "" | "null" => return Value::Null,
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        ".inf" => return Value::Float(f64::INFINITY),
        "-.inf" => return Value::Float(f64::NEG_INFINITY),
        ".nan" => return Value::Float(f64::NAN),
        _ => {}
    }

    if pattern(&INTEGER, r"^-?[0-9]+$").is_match(text) {
        // Out of i64 range: fall back to a float
        return match text.parse::<i64>() {
            Ok(int) => Value::Int(int),
            Err(_) => text
                .parse::<f64>()
                .map_or_else(|_| Value::String(text.to_owned()), Value::Float),
        };
    }
    if pattern(&FLOAT, r"^-?[0-9]*\.[0-9]+$").is_match(text) {
        return text
            .parse::<f64>()
            .map_or_else(|_| Value::String(text.to_owned()), Value::Float);
    }
    if pattern(&DATE_PREFIX, r"^[0-9]{4}-[0-9]{2}-[0-9]{2}").is_match(text) {
        return Value::String(normalize_date(text).unwrap_or_else(|| text.to_owned()));
    }
    Value::String(text.to_owned())
}

/// Normalize a date or date-time to `YYYY-MM-DDTHH:MM:SS.sssZ` in UTC.
///
/// Returns `None` if the text is not a date or date-time.
#[must_use]
pub fn normalize_date(text: &str) -> Option<String> {
    let timestamp = if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        date.and_hms_opt(0, 0, 0)?.and_utc()
    } else if let Ok(date_time) = DateTime::parse_from_rfc3339(text) {
        date_time.with_timezone(&Utc)
    } else {
        NAIVE_DATE_TIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())?
            .and_utc()
    };
    Some(timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
}
