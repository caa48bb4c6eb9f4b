//! Record classification and decoding
use crate::{
    error::ParsingError,
    fields::{self, FixQuality, Hemisphere, Unit},
    sentence::Sentence,
    talker::Talker,
    time::TimeOfDay,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Supported message kinds
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Kind {
    /// GST: pseudorange error statistics
    ErrorStats,
    /// GGA: position fix data
    PositionFix,
}

impl Kind {
    /// Identifies the [Kind] of sentence by exact suffix match on its tag.
    /// Returns None for any other sentence.
    pub fn from_tag(tag: &str) -> Option<Self> {
        if tag.ends_with("GST") {
            Some(Self::ErrorStats)
        } else if tag.ends_with("GGA") {
            Some(Self::PositionFix)
        } else {
            None
        }
    }
    /// Minimal number of fields (tag excluded)
    pub fn nb_fields(&self) -> usize {
        match self {
            Self::ErrorStats => 8,
            Self::PositionFix => 14,
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::ErrorStats => f.write_str("GST"),
            Self::PositionFix => f.write_str("GGA"),
        }
    }
}

/// GST content. These statistics support RAIM: pseudorange errors
/// translated to the position domain.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ErrorStats {
    pub talker: Talker,
    /// RMS value of the standard deviation of the range inputs
    pub rms: Option<f64>,
    /// Standard deviation of semi-major axis of error ellipse (m)
    pub sigma_major: Option<f64>,
    /// Standard deviation of semi-minor axis of error ellipse (m)
    pub sigma_minor: Option<f64>,
    /// Orientation of semi-major axis (degrees from true north)
    pub orientation: Option<f64>,
    /// Standard deviation of latitude error (m)
    pub sigma_lat: Option<f64>,
    /// Standard deviation of longitude error (m)
    pub sigma_lon: Option<f64>,
    /// Standard deviation of altitude error (m)
    pub sigma_alt: Option<f64>,
}

/// GGA content
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PositionFix {
    pub talker: Talker,
    /// Raw latitude, `DDMM.MMMM`
    pub latitude: Option<f64>,
    pub north_south: Option<Hemisphere>,
    /// Raw longitude, `DDDMM.MMMM`
    pub longitude: Option<f64>,
    pub east_west: Option<Hemisphere>,
    pub quality: Option<FixQuality>,
    /// Number of satellites in use
    pub num_sats: Option<u8>,
    /// Horizontal dilution of precision
    pub hdop: Option<f64>,
    /// Antenna altitude above mean sea level
    pub altitude: Option<f64>,
    pub altitude_unit: Option<Unit>,
    /// Difference between WGS84 ellipsoid and mean sea level.
    /// Negative when mean sea level is below the ellipsoid.
    pub geoid_separation: Option<f64>,
    pub geoid_separation_unit: Option<Unit>,
    /// Seconds since last differential correction.
    /// None when DGPS is not used.
    pub dgps_age: Option<f64>,
    /// Differential reference station, 0000-1023
    pub dgps_station: Option<u16>,
    /// Decimal latitude, derived by the coordinates normalizer
    pub latitude_ddeg: Option<f64>,
    /// Decimal longitude, derived by the coordinates normalizer
    pub longitude_ddeg: Option<f64>,
}

/// Decoded sentence
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Record {
    ErrorStats(ErrorStats),
    PositionFix(PositionFix),
}

impl Record {
    pub fn kind(&self) -> Kind {
        match self {
            Self::ErrorStats(_) => Kind::ErrorStats,
            Self::PositionFix(_) => Kind::PositionFix,
        }
    }
    pub fn as_error_stats(&self) -> Option<&ErrorStats> {
        match self {
            Self::ErrorStats(r) => Some(r),
            _ => None,
        }
    }
    pub fn as_position_fix(&self) -> Option<&PositionFix> {
        match self {
            Self::PositionFix(r) => Some(r),
            _ => None,
        }
    }
}

/// [Record] tied to its time of day and to the line it was found on
#[derive(Debug, Clone, PartialEq)]
pub struct DatedRecord {
    pub line: usize,
    pub time_of_day: TimeOfDay,
    pub record: Record,
}

impl DatedRecord {
    pub fn kind(&self) -> Kind {
        self.record.kind()
    }
}

/// Result of a successful classification: the [DatedRecord] and
/// the field level issues that were nulled out while decoding it.
#[derive(Debug, Clone, PartialEq)]
pub struct Classified {
    pub record: DatedRecord,
    pub issues: Vec<ParsingError>,
}

/// Walks the fields of one sentence, collecting field level issues
/// instead of aborting.
struct FieldDecoder<'a> {
    fields: &'a [String],
    issues: Vec<ParsingError>,
}

impl<'a> FieldDecoder<'a> {
    fn new(fields: &'a [String]) -> Self {
        Self {
            fields,
            issues: Vec::new(),
        }
    }
    fn keep<T>(&mut self, result: Result<Option<T>, ParsingError>) -> Option<T> {
        match result {
            Ok(value) => value,
            Err(e) => {
                self.issues.push(e);
                None
            },
        }
    }
    fn float(&mut self, nth: usize) -> Option<f64> {
        let result = fields::float(&self.fields[nth]);
        self.keep(result)
    }
    fn integer<T: std::str::FromStr>(&mut self, nth: usize) -> Option<T> {
        let result = fields::integer::<T>(&self.fields[nth]);
        self.keep(result)
    }
    fn code<T: std::str::FromStr<Err = ParsingError>>(&mut self, nth: usize) -> Option<T> {
        let result = fields::code::<T>(&self.fields[nth]);
        self.keep(result)
    }
    fn hemisphere(&mut self, nth: usize, latitude: bool) -> Option<Hemisphere> {
        let hemisphere = self.code::<Hemisphere>(nth)?;
        if hemisphere.is_latitude() == latitude {
            Some(hemisphere)
        } else {
            self.issues
                .push(ParsingError::UnknownEnumValue(self.fields[nth].clone()));
            None
        }
    }
}

/// Classifies and decodes given [Sentence], found at `line`.
/// - Ok(None): sentence kind is not supported, it should be ignored.
/// - Err: structural error, the sentence should be skipped. A sentence
///   whose time of day cannot be decoded cannot be aligned, it is
///   rejected with [ParsingError::BadTimeField].
pub fn classify(sentence: &Sentence, line: usize) -> Result<Option<Classified>, ParsingError> {
    let kind = match Kind::from_tag(sentence.tag()) {
        Some(kind) => kind,
        None => return Ok(None),
    };

    let fields = sentence.fields();
    if fields.len() < kind.nb_fields() {
        return Err(ParsingError::FieldCountMismatch {
            kind,
            expected: kind.nb_fields(),
            found: fields.len(),
        });
    }

    let time_of_day = fields::time_of_day(&fields[0])?;
    let talker = sentence.talker();
    let mut decoder = FieldDecoder::new(fields);

    let record = match kind {
        Kind::ErrorStats => Record::ErrorStats(ErrorStats {
            talker,
            rms: decoder.float(1),
            sigma_major: decoder.float(2),
            sigma_minor: decoder.float(3),
            orientation: decoder.float(4),
            sigma_lat: decoder.float(5),
            sigma_lon: decoder.float(6),
            sigma_alt: decoder.float(7),
        }),
        Kind::PositionFix => Record::PositionFix(PositionFix {
            talker,
            latitude: decoder.float(1),
            north_south: decoder.hemisphere(2, true),
            longitude: decoder.float(3),
            east_west: decoder.hemisphere(4, false),
            quality: decoder.code(5),
            num_sats: decoder.integer(6),
            hdop: decoder.float(7),
            altitude: decoder.float(8),
            altitude_unit: decoder.code(9),
            geoid_separation: decoder.float(10),
            geoid_separation_unit: decoder.code(11),
            dgps_age: decoder.float(12),
            dgps_station: decoder.integer(13),
            latitude_ddeg: None,
            longitude_ddeg: None,
        }),
    };

    Ok(Some(Classified {
        record: DatedRecord {
            line,
            time_of_day,
            record,
        },
        issues: decoder.issues,
    }))
}
