//! Field decoders: time of day, numbers, angles and enumerated codes.
//!
//! Empty fields are legal and always decode to `None`: a missing value
//! is never replaced by zero.
use crate::{error::ParsingError, time::TimeOfDay};

use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Decodes a `HHMMSS[.sss]` time of day.
/// The integer part must be exactly 6 digits long, the fractional part
/// is optional and resolved down to the nanosecond.
pub fn time_of_day(field: &str) -> Result<TimeOfDay, ParsingError> {
    let bad = || ParsingError::BadTimeField(field.to_string());

    let (hms, fraction) = match field.split_once('.') {
        Some((hms, fraction)) => (hms, fraction),
        None => (field, ""),
    };

    if hms.len() != 6 || !hms.bytes().all(|b| b.is_ascii_digit()) {
        return Err(bad());
    }
    if fraction.len() > 9 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return Err(bad());
    }

    let hours = u8::from_str(&hms[0..2]).or(Err(bad()))?;
    let minutes = u8::from_str(&hms[2..4]).or(Err(bad()))?;
    let seconds = u8::from_str(&hms[4..6]).or(Err(bad()))?;

    // leap second tolerated
    if hours > 23 || minutes > 59 || seconds > 60 {
        return Err(bad());
    }

    let nanos = if fraction.is_empty() {
        0
    } else {
        let scaling = 10_u32.pow(9 - fraction.len() as u32);
        u32::from_str(fraction).or(Err(bad()))? * scaling
    };

    Ok(TimeOfDay::from_hms_nanos(hours, minutes, seconds, nanos))
}

/// Decodes an optional floating point value.
pub fn float(field: &str) -> Result<Option<f64>, ParsingError> {
    if field.is_empty() {
        return Ok(None);
    }
    let value = f64::from_str(field).or(Err(ParsingError::BadNumericField(field.to_string())))?;
    if value.is_finite() {
        Ok(Some(value))
    } else {
        // "nan" / "inf" are accepted by the std parser, not by receivers
        Err(ParsingError::BadNumericField(field.to_string()))
    }
}

/// Decodes an optional unsigned integer (satellite count, station id..).
pub fn integer<T: FromStr>(field: &str) -> Result<Option<T>, ParsingError> {
    if field.is_empty() {
        return Ok(None);
    }
    T::from_str(field)
        .map(Some)
        .or(Err(ParsingError::BadNumericField(field.to_string())))
}

/// Decodes an optional enumerated code.
pub fn code<T: FromStr<Err = ParsingError>>(field: &str) -> Result<Option<T>, ParsingError> {
    if field.is_empty() {
        return Ok(None);
    }
    T::from_str(field).map(Some)
}

/// Converts a `(D)DDMM.MMMM` angle to unsigned decimal degrees.
pub fn ddmm_to_ddeg(raw: f64) -> f64 {
    let degrees = (raw / 100.0).floor();
    degrees + (raw - 100.0 * degrees) / 60.0
}

/// Converts a raw `(D)DDMM.MMMM` angle and its hemisphere to signed
/// decimal degrees. Both are required: without hemisphere the sign is unknown.
pub fn angle(raw: Option<f64>, hemisphere: Option<Hemisphere>) -> Option<f64> {
    let raw = raw?;
    let hemisphere = hemisphere?;
    Some(hemisphere.sign() * ddmm_to_ddeg(raw))
}

/// Hemisphere letter that follows every raw angle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    /// Returns true if this hemisphere qualifies a latitude
    pub fn is_latitude(&self) -> bool {
        matches!(self, Self::North | Self::South)
    }
    /// Returns true if this hemisphere qualifies a longitude
    pub fn is_longitude(&self) -> bool {
        !self.is_latitude()
    }
    pub(crate) fn sign(&self) -> f64 {
        match self {
            Self::South | Self::West => -1.0,
            Self::North | Self::East => 1.0,
        }
    }
}

impl std::fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::North => f.write_str("N"),
            Self::South => f.write_str("S"),
            Self::East => f.write_str("E"),
            Self::West => f.write_str("W"),
        }
    }
}

impl std::str::FromStr for Hemisphere {
    type Err = ParsingError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "N" => Ok(Self::North),
            "S" => Ok(Self::South),
            "E" => Ok(Self::East),
            "W" => Ok(Self::West),
            _ => Err(ParsingError::UnknownEnumValue(s.to_string())),
        }
    }
}

/// GGA fix quality indicator
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FixQuality {
    /// Fix not available
    #[default]
    Invalid,
    /// Autonomous GNSS fix
    Fix,
    /// Differential GNSS fix
    DifferentialFix,
    /// PPS fix
    Pps,
    /// RTK with fixed integer ambiguities
    RtkFixed,
    /// RTK with float ambiguities
    RtkFloat,
    /// Estimated (dead reckoning)
    Estimated,
    /// Manual input mode
    Manual,
    /// Simulation mode
    Simulation,
}

impl FixQuality {
    /// Returns true if a position solution is available
    pub fn is_fix(&self) -> bool {
        *self != Self::Invalid
    }
    /// Returns true if differential corrections were applied
    pub fn is_differential(&self) -> bool {
        matches!(self, Self::DifferentialFix | Self::RtkFixed | Self::RtkFloat)
    }
}

impl std::fmt::Display for FixQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Invalid => f.write_str("0"),
            Self::Fix => f.write_str("1"),
            Self::DifferentialFix => f.write_str("2"),
            Self::Pps => f.write_str("3"),
            Self::RtkFixed => f.write_str("4"),
            Self::RtkFloat => f.write_str("5"),
            Self::Estimated => f.write_str("6"),
            Self::Manual => f.write_str("7"),
            Self::Simulation => f.write_str("8"),
        }
    }
}

impl std::str::FromStr for FixQuality {
    type Err = ParsingError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0" => Ok(Self::Invalid),
            "1" => Ok(Self::Fix),
            "2" => Ok(Self::DifferentialFix),
            "3" => Ok(Self::Pps),
            "4" => Ok(Self::RtkFixed),
            "5" => Ok(Self::RtkFloat),
            "6" => Ok(Self::Estimated),
            "7" => Ok(Self::Manual),
            "8" => Ok(Self::Simulation),
            _ => Err(ParsingError::UnknownEnumValue(s.to_string())),
        }
    }
}

/// Distance unit attached to altitude and geoid separation
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Unit {
    #[default]
    Meters,
    Feet,
}

impl Unit {
    /// Converts given value expressed in this unit, to meters
    pub fn to_meters(&self, value: f64) -> f64 {
        match self {
            Self::Meters => value,
            Self::Feet => value * 0.3048,
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Meters => f.write_str("M"),
            Self::Feet => f.write_str("F"),
        }
    }
}

impl std::str::FromStr for Unit {
    type Err = ParsingError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "M" => Ok(Self::Meters),
            "F" => Ok(Self::Feet),
            _ => Err(ParsingError::UnknownEnumValue(s.to_string())),
        }
    }
}
