use thiserror::Error;

use crate::{record::Kind, time::TimeOfDay};

/// Fatal errors: nothing could be produced.
#[derive(Error, Debug)]
pub enum Error {
    #[error("file i/o error")]
    IoError(#[from] std::io::Error),
    #[error("empty input: no sentence to parse")]
    EmptyInput,
    #[error(".gz input requires the flate2 feature")]
    GzipNotSupported,
}

/// Errors that may rise while parsing a single sentence.
/// None of them aborts the whole parsing process.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParsingError {
    /// Empty line, or line without field separator
    #[error("malformed line")]
    MalformedLine,
    #[error("failed to parse time of day from \"{0}\"")]
    BadTimeField(String),
    #[error("failed to parse number from \"{0}\"")]
    BadNumericField(String),
    #[error("unknown code \"{0}\"")]
    UnknownEnumValue(String),
    /// Sentence is structurally too short for its kind
    #[error("{kind} expects {expected} fields, got {found}")]
    FieldCountMismatch {
        kind: Kind,
        expected: usize,
        found: usize,
    },
    #[error("checksum mismatch: computed {computed:02X}, got \"{found}\"")]
    ChecksumMismatch { computed: u8, found: String },
}

/// Data quality warnings
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Warning {
    /// Same kind of sentence seen twice at the same time of day:
    /// the last one was retained.
    #[error("duplicate {kind} sentence at {time}")]
    DuplicateTimestamp { kind: Kind, time: TimeOfDay },
    /// Time of day jumped backwards by more than 12 hours,
    /// most likely a UTC midnight crossing, which is not corrected.
    #[error("time of day jumped back from {previous} to {current}")]
    DayRollover {
        previous: TimeOfDay,
        current: TimeOfDay,
    },
}

/// Invalid configuration values
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid calendar date \"{0}\"")]
    CalendarDate(String),
    #[error("invalid utc offset \"{0}\"")]
    UtcOffset(String),
}
