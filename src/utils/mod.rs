use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::warn;

use crate::config::RetryPolicy;
use crate::error::{LlamaError, Result};

/// Slug used by the volume/fees overviews: transliterated to ASCII, lowercase,
/// quotes dropped, every run of other non-alphanumeric characters collapsed into `-`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in deunicode::deunicode(text).chars().filter(|c| *c != '\'' && *c != '"') {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

pub fn is_numeric(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}

/// Run `f` until it succeeds, `should_retry` says stop, or the policy's budget is spent.
/// The last outcome is returned as-is.
pub async fn retry<T, E, F, Fut, P>(policy: &RetryPolicy, mut should_retry: P, mut f: F) -> std::result::Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = std::result::Result<T, E>>,
    P: FnMut(&std::result::Result<T, E>) -> bool,
{
    let mut attempt = 0u32;
    loop {
        let outcome = f().await;
        if attempt >= policy.retries() || !should_retry(&outcome) {
            return outcome;
        }
        attempt += 1;
        let delay = policy.backoff(attempt);
        warn!(attempt, delay_ms = delay.as_millis() as u64, "request failed, retrying");
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M:%S%z"];

const DATETIME_FORMATS: [&str; 17] = [
    "%Y-%m-%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%b %d, %Y %H:%M:%S",
    "%d %b %Y %H:%M:%S",
    "%Y%m%d%H%M%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y%m%d %H:%M:%S",
    "%Y/%m/%d %I:%M:%S %p",
    "%Y-%m-%dT%H:%M:%S%.fZ",
    "%Y-%m-%dT%H:%M:%S",
    "%m-%d-%Y %H:%M:%S",
    "%m/%d/%y %H:%M:%S",
    "%b %d %Y %H:%M:%S",
    "%b. %d, %Y %H:%M:%S",
    "%d %b, %Y %H:%M:%S",
    "%d %B %Y %H:%M:%S",
    "%B %d %Y %H:%M:%S",
];

const DATE_FORMATS: [&str; 15] = [
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%d-%b-%Y",
    "%d-%b-%y",
    "%b %d, %Y",
    "%d %b %Y",
    "%Y%m%d",
    "%Y/%m/%d",
    "%m-%d-%Y",
    "%m/%d/%y",
    "%b %d %Y",
    "%b. %d, %Y",
    "%d %b, %Y",
    "%d %B %Y",
    "%B %d %Y",
];

/// Anything accepted where the API wants a unix timestamp.
#[derive(Debug, Clone, PartialEq)]
pub enum DateInput {
    Unix(i64),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Utc(DateTime<Utc>),
    Text(String),
}

impl From<i64> for DateInput {
    fn from(ts: i64) -> Self {
        DateInput::Unix(ts)
    }
}

impl From<NaiveDate> for DateInput {
    fn from(date: NaiveDate) -> Self {
        DateInput::Date(date)
    }
}

impl From<NaiveDateTime> for DateInput {
    fn from(dt: NaiveDateTime) -> Self {
        DateInput::DateTime(dt)
    }
}

impl From<DateTime<Utc>> for DateInput {
    fn from(dt: DateTime<Utc>) -> Self {
        DateInput::Utc(dt)
    }
}

impl From<&str> for DateInput {
    fn from(text: &str) -> Self {
        DateInput::Text(text.to_string())
    }
}

impl From<String> for DateInput {
    fn from(text: String) -> Self {
        DateInput::Text(text)
    }
}

/// Convert a date to unix seconds. Naive dates and times are read as UTC.
pub fn to_timestamp(date: impl Into<DateInput>) -> Result<i64> {
    match date.into() {
        DateInput::Unix(ts) => Ok(ts),
        DateInput::Utc(dt) => Ok(dt.timestamp()),
        DateInput::DateTime(dt) => Ok(dt.and_utc().timestamp()),
        DateInput::Date(d) => Ok(d.and_time(chrono::NaiveTime::MIN).and_utc().timestamp()),
        DateInput::Text(text) => parse_timestamp(text.trim()),
    }
}

fn parse_timestamp(text: &str) -> Result<i64> {
    if let Some(dt) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(text, fmt).ok())
    {
        return Ok(dt.timestamp());
    }
    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
    {
        return Ok(dt.and_utc().timestamp());
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .map(|d| d.and_time(chrono::NaiveTime::MIN).and_utc().timestamp())
        .ok_or_else(|| LlamaError::InvalidDate(text.to_string()))
}

pub fn from_timestamp(timestamp: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(timestamp, 0)
        .ok_or_else(|| LlamaError::InvalidDate(format!("timestamp out of range: {}", timestamp)))
}

pub fn format_timestamp(timestamp: i64, fmt: &str) -> Result<String> {
    Ok(from_timestamp(timestamp)?.format(fmt).to_string())
}

/// Unix seconds `delta_days` before now.
pub fn previous_timestamp(delta_days: i64) -> i64 {
    (Utc::now() - chrono::Duration::days(delta_days)).timestamp()
}
