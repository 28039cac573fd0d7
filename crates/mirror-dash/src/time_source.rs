use std::cell::Cell;
use std::rc::Rc;

use chrono::{FixedOffset, Local, NaiveDateTime, NaiveTime, Utc};

use crate::error::TimeParseError;

/// Source of the current wall-clock date and time.
///
/// Widgets never read the system clock directly, so tests can pin time.
pub trait TimeSource {
    fn now(&self) -> NaiveDateTime;
}

/// System local time.
#[derive(Debug, Default, Copy, Clone)]
pub struct LocalTime;

impl TimeSource for LocalTime {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// UTC shifted by a fixed offset.
#[derive(Debug, Copy, Clone)]
pub struct OffsetTime(pub FixedOffset);

impl TimeSource for OffsetTime {
    fn now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.0).naive_local()
    }
}

/// Manually set time.
#[derive(Debug)]
pub struct ManualTime(Cell<NaiveDateTime>);

impl ManualTime {
    pub fn new(at: NaiveDateTime) -> Self {
        Self(Cell::new(at))
    }

    pub fn set(&self, at: NaiveDateTime) {
        self.0.set(at);
    }
}

impl TimeSource for ManualTime {
    fn now(&self) -> NaiveDateTime {
        self.0.get()
    }
}

/// Parses `±HH:MM`, `±HH` or `Z`/`UTC`.
pub fn parse_utc_offset(text: &str) -> Result<FixedOffset, TimeParseError> {
    let invalid = || TimeParseError::UtcOffset(text.to_string());
    let t = text.trim();
    if t.eq_ignore_ascii_case("z") || t.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).ok_or_else(invalid);
    }

    let (sign, rest) = match t.as_bytes().first() {
        Some(b'+') => (1, &t[1..]),
        Some(b'-') => (-1, &t[1..]),
        _ => return Err(invalid()),
    };
    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None => (rest, "0"),
    };
    if hours.is_empty() || hours.len() > 2 || minutes.is_empty() || minutes.len() > 2 {
        return Err(invalid());
    }
    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
    if hours > 14 || minutes >= 60 {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}

/// Parses a 24-hour `HH:MM` time of day.
pub fn parse_time_of_day(text: &str) -> Result<NaiveTime, TimeParseError> {
    NaiveTime::parse_from_str(text.trim(), "%H:%M")
        .map_err(|_| TimeParseError::TimeOfDay(text.to_string()))
}

/// Time source for an optional configured offset.
///
/// A malformed offset is logged and falls back to local time.
pub fn source_for_offset(offset: Option<&str>) -> Rc<dyn TimeSource> {
    match offset.map(parse_utc_offset) {
        None => Rc::new(LocalTime),
        Some(Ok(offset)) => {
            log::info!("using fixed UTC offset {offset}");
            Rc::new(OffsetTime(offset))
        }
        Some(Err(err)) => {
            log::warn!("{err}; falling back to local time");
            Rc::new(LocalTime)
        }
    }
}
