//! Parser configuration
use crate::time::{CalendarDate, UtcOffset};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// [Config] gathers everything the log itself cannot tell:
/// the calendar date of the capture and the offset to apply.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Calendar date stamped onto every time of day
    pub date: CalendarDate,
    /// Offset applied to every stamped epoch
    pub utc_offset: UtcOffset,
    /// Reject sentences whose checksum does not match.
    /// Sentences without checksum are always accepted.
    pub checksum_validation: bool,
}

impl Config {
    /// Copies and returns [Config] with given [CalendarDate]
    pub fn with_date(&self, date: CalendarDate) -> Self {
        let mut s = *self;
        s.date = date;
        s
    }
    /// Copies and returns [Config] with given [UtcOffset]
    pub fn with_utc_offset(&self, offset: UtcOffset) -> Self {
        let mut s = *self;
        s.utc_offset = offset;
        s
    }
    /// Copies and returns [Config] with checksum validation
    pub fn with_checksum_validation(&self, validation: bool) -> Self {
        let mut s = *self;
        s.checksum_validation = validation;
        s
    }
}
