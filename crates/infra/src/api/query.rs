//! Query-parameter normalization
//!
//! Callers describe filters with camelCase keys (`siteId`, `dateFrom`); the
//! REST API expects snake_case and ISO-8601 UTC timestamps. Everything here
//! is pure.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use hotjar_domain::{HotjarError, Result};
use serde_json::{Map, Value};

const NAIVE_DATETIME_FORMATS: &[&str] =
    &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"];

/// Normalize caller parameters into API query parameters.
///
/// - `null` and `""` values are dropped
/// - `dateFrom` / `dateTo` become `date_from` / `date_to` with the value
///   reformatted by [`format_date`]
/// - every other key is converted to snake_case, value untouched
///
/// # Errors
/// `HotjarError::InvalidDate` if a date value cannot be parsed.
pub fn build_query_params(params: &Map<String, Value>) -> Result<Map<String, Value>> {
    let mut query = Map::new();

    for (key, value) in params {
        if is_empty_value(value) {
            continue;
        }

        match key.as_str() {
            "dateFrom" => {
                query.insert("date_from".to_string(), Value::String(format_date_value(value)?));
            }
            "dateTo" => {
                query.insert("date_to".to_string(), Value::String(format_date_value(value)?));
            }
            _ => {
                query.insert(to_snake_case(key), value.clone());
            }
        }
    }

    Ok(query)
}

/// Reformat a date or timestamp as ISO-8601 UTC with millisecond precision.
///
/// Accepts RFC 3339 timestamps, naive date-times (read as UTC) and plain
/// `YYYY-MM-DD` dates (UTC midnight).
///
/// ```
/// use hotjar_infra::api::query::format_date;
///
/// assert_eq!(format_date("2024-01-15").unwrap(), "2024-01-15T00:00:00.000Z");
/// assert!(format_date("not-a-date").is_err());
/// ```
///
/// # Errors
/// `HotjarError::InvalidDate` carrying the rejected input.
pub fn format_date(input: &str) -> Result<String> {
    parse_date(input.trim())
        .map(to_iso_millis)
        .ok_or_else(|| HotjarError::InvalidDate(input.to_string()))
}

/// `siteId` -> `site_id`. Only ASCII capitals start a new word.
pub fn to_snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            out.push('_');
        }
        out.push(ch);
    }
    out.to_lowercase()
}

/// Flatten a query map into `(key, value)` pairs for the URL.
///
/// Arrays repeat their key once per element; objects are sent as JSON text.
pub fn to_query_pairs(query: &Map<String, Value>) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(query.len());
    for (key, value) in query {
        match value {
            Value::Array(items) => {
                pairs.extend(items.iter().map(|item| (key.clone(), scalar_to_string(item))));
            }
            other => pairs.push((key.clone(), scalar_to_string(other))),
        }
    }
    pairs
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn format_date_value(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => format_date(s),
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(to_iso_millis)
            .ok_or_else(|| HotjarError::InvalidDate(n.to_string())),
        other => Err(HotjarError::InvalidDate(other.to_string())),
    }
}

fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn to_iso_millis(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
