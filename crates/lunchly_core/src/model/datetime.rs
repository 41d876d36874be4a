//! Human-readable renderings of reservation start times.
//!
//! # Responsibility
//! - Long form: `March 5th 2024, 7:30 pm`.
//! - Relative form against a reference instant: `3 days ago`, `in 2 hours`.
//!
//! Relative buckets follow the usual "time ago" thresholds: under 45 seconds
//! is "a few seconds", under 45 minutes counts minutes, under 22 hours counts
//! hours, under 26 days counts days, under 11 months counts months.

use chrono::{DateTime, Datelike, TimeZone};
use std::fmt::Display;

const MS_PER_SECOND: f64 = 1_000.0;
const MS_PER_MINUTE: f64 = 60.0 * MS_PER_SECOND;
const MS_PER_HOUR: f64 = 60.0 * MS_PER_MINUTE;
const MS_PER_DAY: f64 = 24.0 * MS_PER_HOUR;
// 400 Gregorian years hold 146_097 days and 4_800 months.
const DAYS_PER_MONTH: f64 = 146_097.0 / 4_800.0;

/// Renders `value` as `Month Dth YYYY, h:mm am`.
pub fn format_long<Tz>(value: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let day = value.day();
    format!(
        "{} {}{} {}, {}",
        value.format("%B"),
        day,
        ordinal_suffix(day),
        value.format("%Y"),
        value.format("%-I:%M %P"),
    )
}

/// Renders the distance from `now` to `value`, e.g. `in 3 days` or `an hour ago`.
pub fn format_relative<Tz1, Tz2>(value: &DateTime<Tz1>, now: &DateTime<Tz2>) -> String
where
    Tz1: TimeZone,
    Tz2: TimeZone,
{
    let delta_ms = value.timestamp_millis() - now.timestamp_millis();
    let phrase = relative_phrase(delta_ms.unsigned_abs() as f64);
    if delta_ms > 0 {
        format!("in {phrase}")
    } else {
        format!("{phrase} ago")
    }
}

fn relative_phrase(abs_ms: f64) -> String {
    let seconds = (abs_ms / MS_PER_SECOND).round();
    let minutes = (abs_ms / MS_PER_MINUTE).round();
    let hours = (abs_ms / MS_PER_HOUR).round();
    let days = (abs_ms / MS_PER_DAY).round();
    let months = (abs_ms / MS_PER_DAY / DAYS_PER_MONTH).round();
    let years = (abs_ms / MS_PER_DAY / DAYS_PER_MONTH / 12.0).round();

    if seconds < 45.0 {
        "a few seconds".to_string()
    } else if minutes <= 1.0 {
        "a minute".to_string()
    } else if minutes < 45.0 {
        format!("{minutes} minutes")
    } else if hours <= 1.0 {
        "an hour".to_string()
    } else if hours < 22.0 {
        format!("{hours} hours")
    } else if days <= 1.0 {
        "a day".to_string()
    } else if days < 26.0 {
        format!("{days} days")
    } else if months <= 1.0 {
        "a month".to_string()
    } else if months < 11.0 {
        format!("{months} months")
    } else if years <= 1.0 {
        "a year".to_string()
    } else {
        format!("{years} years")
    }
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}
