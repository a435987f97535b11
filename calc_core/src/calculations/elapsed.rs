//! # Elapsed Time
//!
//! Time since a past instant, broken into days, hours, minutes and seconds,
//! plus a calendar view in years/months/days. The CLI recomputes it every
//! second through [`crate::ticker::Ticker`].

use chrono::{DateTime, Datelike, Months, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Input for the elapsed-time calculator.
///
/// ## JSON Example
///
/// ```json
/// { "label": "Quit smoking", "since": "2024-01-01T00:00:00Z" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElapsedInput {
    #[serde(default)]
    pub label: String,
    pub since: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElapsedResult {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub total_seconds: i64,
    /// `since` lies after `now`; the fields then count down instead
    pub in_future: bool,
    pub calendar_years: u32,
    pub calendar_months: u32,
    pub calendar_days: u32,
}

impl ElapsedResult {
    /// `"12d 03h 04m 05s"`
    pub fn clock(&self) -> String {
        format!(
            "{}d {:02}h {:02}m {:02}s",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// Whole calendar months from `start` to `end` (`start <= end`), then the leftover days.
fn calendar_span(start: DateTime<Utc>, end: DateTime<Utc>) -> (u32, u32, u32) {
    let mut months = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    let months_u32 = |m: i32| u32::try_from(m.max(0)).unwrap_or(0);

    let mut anchor = start.checked_add_months(Months::new(months_u32(months)));
    while months > 0 && anchor.map_or(true, |a| a > end) {
        months -= 1;
        anchor = start.checked_add_months(Months::new(months_u32(months)));
    }

    let whole = months_u32(months);
    let days = anchor
        .map(|a| (end - a).num_days())
        .and_then(|d| u32::try_from(d).ok())
        .unwrap_or(0);
    (whole / 12, whole % 12, days)
}

pub fn elapsed_between(since: DateTime<Utc>, now: DateTime<Utc>) -> ElapsedResult {
    let in_future = since > now;
    let (start, end) = if in_future { (now, since) } else { (since, now) };
    let total_seconds = (end - start).num_seconds();
    let (calendar_years, calendar_months, calendar_days) = calendar_span(start, end);

    ElapsedResult {
        days: total_seconds / 86_400,
        hours: total_seconds % 86_400 / 3_600,
        minutes: total_seconds % 3_600 / 60,
        seconds: total_seconds % 60,
        total_seconds,
        in_future,
        calendar_years,
        calendar_months,
        calendar_days,
    }
}

/// Parse an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (midnight UTC).
pub fn parse_since(s: &str) -> CalcResult<DateTime<Utc>> {
    let trimmed = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| CalcError::invalid_input("since", s, "Expected YYYY-MM-DD or an RFC 3339 timestamp"))
}

pub fn calculate(input: &ElapsedInput) -> CalcResult<ElapsedResult> {
    Ok(elapsed_between(input.since, Utc::now()))
}
