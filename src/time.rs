//! Time of day, calendar date and UTC offset.
//!
//! NMEA sentences only carry a time of day. The absolute [Epoch] is
//! rebuilt from a [CalendarDate] and a [UtcOffset] supplied by the user.
//! Day rollovers are not corrected: a capture spanning several days has to
//! be split by the caller.
use crate::{error::ConfigError, fields};

use hifitime::{Duration, Epoch};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const NANOS_PER_SECOND: i128 = 1_000_000_000;

/// Time elapsed since midnight, with nanosecond resolution.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeOfDay(Duration);

impl TimeOfDay {
    /// Builds a [TimeOfDay] from its components
    pub fn from_hms_nanos(hours: u8, minutes: u8, seconds: u8, nanos: u32) -> Self {
        let total = (hours as i128 * 3600 + minutes as i128 * 60 + seconds as i128)
            * NANOS_PER_SECOND
            + nanos as i128;
        Self(Duration::from_total_nanoseconds(total))
    }
    /// Returns [Duration] elapsed since midnight
    pub fn duration(&self) -> Duration {
        self.0
    }
    /// Decomposes self into (hours, minutes, seconds, nanoseconds)
    pub fn to_parts(&self) -> (u8, u8, u8, u32) {
        let total = self.0.total_nanoseconds();
        let nanos = (total % NANOS_PER_SECOND) as u32;
        let seconds = total / NANOS_PER_SECOND;
        (
            (seconds / 3600) as u8,
            ((seconds % 3600) / 60) as u8,
            (seconds % 60) as u8,
            nanos,
        )
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let (hh, mm, ss, nanos) = self.to_parts();
        write!(f, "{:02}:{:02}:{:02}.{:02}", hh, mm, ss, nanos / 10_000_000)
    }
}

impl std::str::FromStr for TimeOfDay {
    type Err = crate::error::ParsingError;
    /// Parses the NMEA `HHMMSS.ss` representation
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        fields::time_of_day(s)
    }
}

/// Calendar date stamped onto every time of day.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct CalendarDate {
    year: i32,
    month: u8,
    day: u8,
}

impl Default for CalendarDate {
    fn default() -> Self {
        Self {
            year: 2000,
            month: 1,
            day: 1,
        }
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

impl CalendarDate {
    /// Builds a new [CalendarDate], verifying it exists
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, ConfigError> {
        if !(1900..=2999).contains(&year) || day == 0 || day > days_in_month(year, month) {
            return Err(ConfigError::CalendarDate(format!(
                "{:04}-{:02}-{:02}",
                year, month, day
            )));
        }
        Ok(Self { year, month, day })
    }
    pub fn year(&self) -> i32 {
        self.year
    }
    pub fn month(&self) -> u8 {
        self.month
    }
    pub fn day(&self) -> u8 {
        self.day
    }
    /// Returns midnight of this day, in UTC
    pub fn midnight_utc(&self) -> Epoch {
        Epoch::from_gregorian_utc_at_midnight(self.year, self.month, self.day)
    }
    /// Stamps given [TimeOfDay] onto this date, then shifts it by `offset`.
    /// This is how every aligned row obtains its absolute [Epoch].
    pub fn epoch(&self, time_of_day: TimeOfDay, offset: UtcOffset) -> Epoch {
        self.midnight_utc() + time_of_day.duration() + offset.duration()
    }
}

impl std::fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl std::str::FromStr for CalendarDate {
    type Err = ConfigError;
    /// Parses "YYYY-MM-DD"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ConfigError::CalendarDate(s.to_string());
        let mut items = s.trim().split('-');
        let year = items.next().ok_or_else(bad)?;
        let month = items.next().ok_or_else(bad)?;
        let day = items.next().ok_or_else(bad)?;
        if items.next().is_some() || year.len() != 4 {
            return Err(bad());
        }
        let year = i32::from_str(year).or(Err(bad()))?;
        let month = u8::from_str(month).or(Err(bad()))?;
        let day = u8::from_str(day).or(Err(bad()))?;
        Self::new(year, month, day)
    }
}

impl TryFrom<String> for CalendarDate {
    type Error = ConfigError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<CalendarDate> for String {
    fn from(date: CalendarDate) -> String {
        date.to_string()
    }
}

/// Signed offset added to every stamped [Epoch], correcting the
/// receiver's UTC time of day to the desired time zone.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct UtcOffset {
    minutes: i16,
}

impl UtcOffset {
    /// Builds a new [UtcOffset]. `minutes` carries the sign of `hours`.
    pub fn new(hours: i8, minutes: u8) -> Result<Self, ConfigError> {
        if hours.unsigned_abs() > 23 || minutes > 59 {
            return Err(ConfigError::UtcOffset(format!("{}:{:02}", hours, minutes)));
        }
        let total = hours.unsigned_abs() as i16 * 60 + minutes as i16;
        Ok(Self {
            minutes: if hours < 0 { -total } else { total },
        })
    }
    /// Builds a new [UtcOffset] from whole hours
    pub fn from_hours(hours: i8) -> Result<Self, ConfigError> {
        Self::new(hours, 0)
    }
    /// Returns total offset in minutes
    pub fn total_minutes(&self) -> i16 {
        self.minutes
    }
    /// Returns offset as [Duration]
    pub fn duration(&self) -> Duration {
        Duration::from_total_nanoseconds(self.minutes as i128 * 60 * NANOS_PER_SECOND)
    }
}

impl std::fmt::Display for UtcOffset {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let sign = if self.minutes < 0 { '-' } else { '+' };
        let abs = self.minutes.unsigned_abs();
        write!(f, "{}{:02}:{:02}", sign, abs / 60, abs % 60)
    }
}

impl std::str::FromStr for UtcOffset {
    type Err = ConfigError;
    /// Parses "±HH", "±HH:MM" or "±HHMM"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ConfigError::UtcOffset(s.to_string());
        let content = s.trim();
        let (negative, content) = if let Some(rem) = content.strip_prefix('-') {
            (true, rem)
        } else if let Some(rem) = content.strip_prefix('+') {
            (false, rem)
        } else {
            (false, content)
        };

        let (hours, minutes) = if let Some((hh, mm)) = content.split_once(':') {
            (hh, mm)
        } else if content.len() == 4 {
            content.split_at(2)
        } else {
            (content, "0")
        };

        if hours.is_empty() || hours.len() > 2 {
            return Err(bad());
        }

        let hours = u8::from_str(hours).or(Err(bad()))?;
        let minutes = u8::from_str(minutes).or(Err(bad()))?;
        if hours > 23 || minutes > 59 {
            return Err(bad());
        }

        let total = hours as i16 * 60 + minutes as i16;
        Ok(Self {
            minutes: if negative { -total } else { total },
        })
    }
}

impl TryFrom<String> for UtcOffset {
    type Error = ConfigError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<UtcOffset> for String {
    fn from(offset: UtcOffset) -> String {
        offset.to_string()
    }
}
