//! Talker identifier: the two letters preceding the sentence identifier.
use gnss::prelude::Constellation;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// [Talker] identifies the system that produced a sentence.
/// When the receiver combines several systems, the talker is `GN`
/// and statistics pertain to the combined solution.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Talker {
    /// GP
    GPS,
    /// GL
    Glonass,
    /// GA
    Galileo,
    /// GB or BD
    BeiDou,
    /// GQ or QZ
    QZSS,
    /// GI
    NavIC,
    /// GN: multi constellation solution
    Mixed,
    /// Any other (possibly proprietary) talker
    Other(String),
}

impl Default for Talker {
    fn default() -> Self {
        Self::GPS
    }
}

impl Talker {
    /// Returns the [Constellation] this talker reports for, if any
    pub fn constellation(&self) -> Option<Constellation> {
        match self {
            Self::GPS => Some(Constellation::GPS),
            Self::Glonass => Some(Constellation::Glonass),
            Self::Galileo => Some(Constellation::Galileo),
            Self::BeiDou => Some(Constellation::BeiDou),
            Self::QZSS => Some(Constellation::QZSS),
            Self::NavIC => Some(Constellation::IRNSS),
            Self::Mixed => Some(Constellation::Mixed),
            Self::Other(_) => None,
        }
    }
}

impl std::fmt::Display for Talker {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::GPS => f.write_str("GP"),
            Self::Glonass => f.write_str("GL"),
            Self::Galileo => f.write_str("GA"),
            Self::BeiDou => f.write_str("GB"),
            Self::QZSS => f.write_str("GQ"),
            Self::NavIC => f.write_str("GI"),
            Self::Mixed => f.write_str("GN"),
            Self::Other(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Talker {
    fn from(s: &str) -> Self {
        match s {
            "GP" => Self::GPS,
            "GL" => Self::Glonass,
            "GA" => Self::Galileo,
            "GB" | "BD" => Self::BeiDou,
            "GQ" | "QZ" => Self::QZSS,
            "GI" => Self::NavIC,
            "GN" => Self::Mixed,
            other => Self::Other(other.to_string()),
        }
    }
}
