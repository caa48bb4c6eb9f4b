#![doc(html_logo_url = "https://raw.githubusercontent.com/georust/meta/master/logo/logo.png")]
#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate gnss_rs as gnss;

pub mod config;
pub mod coordinates;
pub mod diagnostics;
pub mod error;
pub mod fields;
pub mod record;
pub mod sentence;
pub mod talker;
pub mod time;
pub mod timeseries;

mod export;
mod reader;
mod sampling;

#[cfg(test)]
mod tests;

use std::{io::BufRead, path::Path, str::FromStr};

use crate::{
    diagnostics::Diagnostics,
    error::{Error, ParsingError},
    reader::BufferedReader,
    record::classify,
    sentence::{is_comment, Sentence},
    timeseries::Aligner,
};

#[cfg(feature = "log")]
use log::debug;

/// Package to include all basic structures
pub mod prelude {
    pub use crate::{
        config::Config,
        coordinates::GroundPosition,
        diagnostics::{Diagnostic, Diagnostics, Issue, IssueKind},
        error::{ConfigError, Error, ParsingError, Warning},
        fields::{FixQuality, Hemisphere, Unit},
        record::{DatedRecord, ErrorStats, Kind, PositionFix, Record},
        sampling::{SamplingEntry, SamplingSummary},
        sentence::Sentence,
        talker::Talker,
        time::{CalendarDate, TimeOfDay, UtcOffset},
        timeseries::{AlignedRow, Table},
        NmeaLog,
    };
    // pub re-export
    pub use gnss::prelude::Constellation;
    pub use hifitime::{Duration, Epoch, TimeScale};
}

pub use crate::sampling::{SamplingEntry, SamplingSummary};

/// [NmeaLog] is the result of one parsing run: the aligned time series
/// and everything that went wrong while forming it.
#[derive(Debug, Clone, Default)]
pub struct NmeaLog {
    /// Aligned time series, coordinates normalized
    pub table: timeseries::Table,
    /// Non fatal issues
    pub diagnostics: Diagnostics,
}

impl NmeaLog {
    /// Parses the log file located at `path`. `.gz` files are
    /// decompressed on the fly when the `flate2` feature is enabled.
    /// ```
    /// use nmea_log::prelude::*;
    /// let cfg = Config::default()
    ///     .with_date(CalendarDate::new(2014, 4, 23).unwrap());
    /// let log = NmeaLog::from_file("test_resources/NMEA/interleaved.log", &cfg)
    ///     .unwrap();
    /// assert!(log.table.len() > 0);
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P, cfg: &config::Config) -> Result<Self, Error> {
        let reader = BufferedReader::new(path)?;
        Self::from_reader(reader, cfg)
    }

    /// Parses from any [BufRead]able interface.
    /// Input is entirely read prior parsing. Lines that are not valid
    /// UTF-8 are reported as [ParsingError::MalformedLine].
    pub fn from_reader<R: BufRead>(reader: R, cfg: &config::Config) -> Result<Self, Error> {
        let lines = reader.split(b'\n').collect::<Result<Vec<Vec<u8>>, _>>()?;
        Self::from_lines(
            lines
                .into_iter()
                .map(|bytes| String::from_utf8(bytes).or(Err(ParsingError::MalformedLine))),
            cfg,
        )
    }

    /// Parses in memory content
    pub fn parse(content: &str, cfg: &config::Config) -> Result<Self, Error> {
        Self::from_lines(content.lines().map(Ok), cfg)
    }

    fn from_lines<S: AsRef<str>, I: Iterator<Item = Result<S, ParsingError>>>(
        lines: I,
        cfg: &config::Config,
    ) -> Result<Self, Error> {
        let mut diagnostics = Diagnostics::default();
        let mut aligner = Aligner::default();
        let mut nb_sentences = 0;

        for (nth, line) in lines.enumerate() {
            let line_number = nth + 1;

            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    nb_sentences += 1;
                    diagnostics.push(line_number, e);
                    continue;
                },
            };

            let line = line.as_ref().trim_end_matches('\r');

            if line.trim().is_empty() {
                continue;
            }
            nb_sentences += 1;

            if is_comment(line) {
                continue;
            }

            let sentence = match Sentence::from_str(line) {
                Ok(sentence) => sentence,
                Err(e) => {
                    diagnostics.push(line_number, e);
                    continue;
                },
            };

            if cfg.checksum_validation {
                if let Err(e) = sentence.verify_checksum() {
                    diagnostics.push(line_number, e);
                    continue;
                }
            }

            match classify(&sentence, line_number) {
                Ok(Some(classified)) => {
                    for issue in classified.issues {
                        diagnostics.push(line_number, issue);
                    }
                    aligner.push(classified.record, &mut diagnostics);
                },
                Ok(None) => {}, // unsupported sentence
                Err(e) => diagnostics.push(line_number, e),
            }
        }

        if nb_sentences == 0 {
            return Err(Error::EmptyInput);
        }

        #[cfg(feature = "log")]
        debug!(
            "{} lines processed: {} rows, {}",
            nb_sentences,
            aligner.len(),
            diagnostics
        );

        let mut table = aligner.finish(cfg.date, cfg.utc_offset);
        table.normalize_coordinates();

        Ok(Self { table, diagnostics })
    }

    /// Returns number of issues of this [diagnostics::IssueKind]
    pub fn issue_count(&self, kind: diagnostics::IssueKind) -> usize {
        self.diagnostics.count(kind)
    }
}

impl FromStr for NmeaLog {
    type Err = Error;
    /// Parses in memory content with default [config::Config]
    fn from_str(content: &str) -> Result<Self, Self::Err> {
        Self::parse(content, &config::Config::default())
    }
}
