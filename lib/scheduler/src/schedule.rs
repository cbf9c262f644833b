//! Pure schedule math for date and weekly triggers.
//!
//! Everything here is generic over the time zone and takes "now" as a
//! parameter, so the registry can evaluate wall-clock schedules while
//! tests pin fixed instants.

use crate::error::ScheduleError;
use amber_relay_workflow::trigger::DayEntry;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone};

/// Parses a time of day in `HH:MM` or `HH:MM:SS` form.
///
/// # Errors
///
/// Returns an error when the string has the wrong shape or names an
/// impossible time.
pub fn parse_time_of_day(text: &str) -> Result<NaiveTime, ScheduleError> {
    let invalid = || ScheduleError::InvalidTime {
        value: text.to_owned(),
    };

    let mut parts = text.split(':');
    let hour: u32 = parts
        .next()
        .and_then(|p| p.trim().parse().ok())
        .ok_or_else(invalid)?;
    let minute: u32 = parts
        .next()
        .and_then(|p| p.trim().parse().ok())
        .ok_or_else(invalid)?;
    let second: u32 = match parts.next() {
        Some(p) => p.trim().parse().map_err(|_| invalid())?,
        None => 0,
    };
    if parts.next().is_some() {
        return Err(invalid());
    }

    NaiveTime::from_hms_opt(hour, minute, second).ok_or_else(invalid)
}

/// The instant a one-shot date trigger activates at.
///
/// With a date, the activation is that calendar day at the given time of
/// day in `now`'s time zone; without one it defaults to 60 seconds from
/// now.
pub fn specific_date_instant<Tz: TimeZone>(
    date: Option<&str>,
    time: &str,
    now: &DateTime<Tz>,
) -> Result<DateTime<Tz>, ScheduleError> {
    let Some(text) = date else {
        return Ok(now.clone() + Duration::seconds(60));
    };

    let day = NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|_| {
        ScheduleError::InvalidDate {
            value: text.to_owned(),
        }
    })?;
    let time = parse_time_of_day(time)?;

    now.timezone()
        .from_local_datetime(&day.and_time(time))
        .earliest()
        .ok_or_else(|| ScheduleError::InvalidDate {
            value: text.to_owned(),
        })
}

/// The given weekday and time within `now`'s week (anchored on Sunday).
///
/// The occurrence may already lie in the past; callers decide whether to
/// roll it forward. `None` only when the local instant does not exist
/// (e.g. inside a daylight-saving gap).
pub fn occurrence_in_week<Tz: TimeZone>(
    now: &DateTime<Tz>,
    weekday: u8,
    time: NaiveTime,
) -> Option<DateTime<Tz>> {
    let offset =
        i64::from(weekday) - i64::from(now.weekday().num_days_from_sunday());
    let date = now.date_naive() + Duration::days(offset);

    now.timezone().from_local_datetime(&date.and_time(time)).earliest()
}

/// Selects the instant a weekly trigger next activates at.
///
/// Every `(day, time)` pair expands to its occurrence within the current
/// week; the earliest one strictly after `now` wins. When every
/// occurrence has already passed, the earliest of them advanced by exactly
/// 7 days is used. `None` when `days` is empty.
pub fn next_weekly_occurrence<Tz: TimeZone>(
    days: &[DayEntry],
    shared_time: &str,
    now: &DateTime<Tz>,
) -> Result<Option<DateTime<Tz>>, ScheduleError> {
    if days.is_empty() {
        return Ok(None);
    }

    let mut dates = Vec::new();
    for entry in days {
        match entry {
            DayEntry::Day(id) => {
                let time = parse_time_of_day(shared_time)?;
                if let Some(date) = occurrence_in_week(now, *id, time) {
                    dates.push(date);
                }
            }
            DayEntry::WithTimes { id, times } => {
                for text in times {
                    let time = parse_time_of_day(text)?;
                    if let Some(date) = occurrence_in_week(now, *id, time) {
                        dates.push(date);
                    }
                }
            }
        }
    }
    dates.sort_unstable();

    let Some(first) = dates.first().cloned() else {
        return Ok(None);
    };
    let next = dates
        .iter()
        .find(|date| **date > *now)
        .cloned()
        .unwrap_or_else(|| first + Duration::days(7));
    Ok(Some(next))
}
