use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use icalendar::{Alarm, Calendar, CalendarDateTime, Component, Event, EventLike, Property};
use tracing::{debug, warn};

use crate::error::EventFormatError;
use crate::models::event::CanonicalEvent;

pub const TIMEZONE: &str = "Europe/Prague";
pub const ACTIVITY_NAME: &str = "Veřejné bruslení";
pub const LOCATION: &str = "GAF Aréna Žamberk";
const UID_DOMAIN: &str = "gaf-arena-zamberk";

/// A rendered VCALENDAR and the number of VEVENTs in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDocument {
    pub content: String,
    pub entries: usize,
}

/// Renders `events` as one VCALENDAR. Events without date or time, or with the
/// placeholder title, are left out silently. Events whose date or time text
/// cannot be parsed are logged and left out; the rest still render.
pub fn render_calendar(events: &[CanonicalEvent], now: DateTime<Utc>) -> CalendarDocument {
    let mut calendar = Calendar::new();
    calendar
        .name(&format!("{} - {}", LOCATION, ACTIVITY_NAME))
        .timezone(TIMEZONE)
        .append_property(Property::new("METHOD", "PUBLISH"));

    let mut entries = 0;
    for event in events {
        if event.date.is_empty() || event.time.is_empty() || event.has_placeholder_title() {
            debug!(title = %event.title, "Skipping incomplete event");
            continue;
        }
        match calendar_entry(event, now) {
            Ok(entry) => {
                calendar.push(entry);
                entries += 1;
            }
            Err(e) => warn!(title = %event.title, error = %e, "Failed to parse event"),
        }
    }

    CalendarDocument {
        content: calendar.to_string(),
        entries,
    }
}

pub fn to_ics(events: &[CanonicalEvent], now: DateTime<Utc>) -> String {
    render_calendar(events, now).content
}

fn calendar_entry(event: &CanonicalEvent, now: DateTime<Utc>) -> Result<Event, EventFormatError> {
    let (start, end) = event_span(&event.date, &event.time)?;
    Ok(Event::new()
        .uid(&event_uid(event))
        .timestamp(now)
        .starts(local_time(start))
        .ends(local_time(end))
        .summary(&event.title)
        .location(LOCATION)
        .alarm(Alarm::display(
            &format!("{} za 1 hodinu", ACTIVITY_NAME),
            -Duration::hours(1),
        ))
        .alarm(Alarm::display(
            &format!("{} za 30 minut", ACTIVITY_NAME),
            -Duration::minutes(30),
        ))
        .done())
}

fn local_time(value: NaiveDateTime) -> CalendarDateTime {
    CalendarDateTime::WithTimezone {
        date_time: value,
        tzid: TIMEZONE.to_string(),
    }
}

/// Namespaced source id, or base64 of `date-time-title` when there is none.
pub fn event_uid(event: &CanonicalEvent) -> String {
    match &event.id {
        Some(id) => format!("event-{}@{}", id, UID_DOMAIN),
        None => {
            let raw = format!("{}-{}-{}", event.date, event.time, event.title);
            format!("{}@{}", STANDARD.encode(raw), UID_DOMAIN)
        }
    }
}

/// Local start and end. A start-only time lasts one hour; an end earlier than
/// the start belongs to the next day.
pub fn event_span(date: &str, time: &str) -> Result<(NaiveDateTime, NaiveDateTime), EventFormatError> {
    let day = parse_date(date)?;
    let (start, end) = parse_time_range(time)?;
    let start = day.and_time(start);
    let end = match end {
        Some(end) => {
            let end = day.and_time(end);
            if end < start { end + Duration::days(1) } else { end }
        }
        None => start + Duration::hours(1),
    };
    Ok((start, end))
}

/// `D.M.YYYY`, leading zeros optional.
pub fn parse_date(text: &str) -> Result<NaiveDate, EventFormatError> {
    let invalid = || EventFormatError::Date(text.to_string());
    let parts: Vec<&str> = text.trim().split('.').collect();
    let [day, month, year] = parts.as_slice() else {
        return Err(invalid());
    };
    let day: u32 = day.trim().parse().map_err(|_| invalid())?;
    let month: u32 = month.trim().parse().map_err(|_| invalid())?;
    let year: i32 = year.trim().parse().map_err(|_| invalid())?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

/// `HH:MM` or `HH:MM - HH:MM`.
pub fn parse_time_range(text: &str) -> Result<(NaiveTime, Option<NaiveTime>), EventFormatError> {
    let invalid = || EventFormatError::Time(text.to_string());
    match text.split_once(" - ") {
        Some((start, end)) => Ok((
            parse_clock(start).ok_or_else(invalid)?,
            Some(parse_clock(end).ok_or_else(invalid)?),
        )),
        None => Ok((parse_clock(text).ok_or_else(invalid)?, None)),
    }
}

fn parse_clock(text: &str) -> Option<NaiveTime> {
    let (hour, minute) = text.trim().split_once(':')?;
    NaiveTime::from_hms_opt(hour.parse().ok()?, minute.parse().ok()?, 0)
}
