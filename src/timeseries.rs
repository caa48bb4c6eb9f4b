//! Time series alignment.
//!
//! Sentences are merged on their time of day (outer join): GST and GGA
//! sentences sharing a time of day end up in the same [AlignedRow],
//! whatever their order of appearance. Rows are then stamped with the
//! configured date and offset.
use crate::{
    diagnostics::Diagnostics,
    error::Warning,
    record::{DatedRecord, ErrorStats, Kind, PositionFix, Record},
    time::{CalendarDate, TimeOfDay, UtcOffset},
};

use hifitime::{Duration, Epoch};
use std::collections::BTreeMap;

#[cfg(feature = "log")]
use log::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A backwards jump of time of day this large is flagged as
/// a possible UTC midnight crossing.
const ROLLOVER_THRESHOLD_HOURS: f64 = 12.0;

/// One row of the aligned [Table]. Either kind may be missing.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AlignedRow {
    pub time_of_day: TimeOfDay,
    pub error_stats: Option<ErrorStats>,
    pub position_fix: Option<PositionFix>,
}

impl AlignedRow {
    /// Returns true if both kinds are present
    pub fn is_complete(&self) -> bool {
        self.error_stats.is_some() && self.position_fix.is_some()
    }
}

/// [Aligner] performs the time of day keyed merge, one record at a time,
/// as a single sequential reduction.
#[derive(Debug, Default)]
pub struct Aligner {
    rows: BTreeMap<TimeOfDay, AlignedRow>,
    previous: Option<TimeOfDay>,
}

impl Aligner {
    /// Merges a new record. On duplicate time of day within the same kind,
    /// the last record wins and a warning is recorded.
    pub fn push(&mut self, dated: DatedRecord, diagnostics: &mut Diagnostics) {
        let DatedRecord {
            line,
            time_of_day,
            record,
        } = dated;

        if let Some(previous) = self.previous {
            if previous.duration() - time_of_day.duration()
                > Duration::from_hours(ROLLOVER_THRESHOLD_HOURS)
            {
                diagnostics.push(
                    line,
                    Warning::DayRollover {
                        previous,
                        current: time_of_day,
                    },
                );
            }
        }
        self.previous = Some(time_of_day);

        let row = self.rows.entry(time_of_day).or_insert_with(|| AlignedRow {
            time_of_day,
            ..Default::default()
        });

        let kind = record.kind();
        let replaced = match record {
            Record::ErrorStats(stats) => row.error_stats.replace(stats).is_some(),
            Record::PositionFix(fix) => row.position_fix.replace(fix).is_some(),
        };

        if replaced {
            diagnostics.push(
                line,
                Warning::DuplicateTimestamp {
                    kind,
                    time: time_of_day,
                },
            );
        }
    }
    /// Returns number of rows formed so far
    pub fn len(&self) -> usize {
        self.rows.len()
    }
    /// Returns true if nothing was merged yet
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
    /// Stamps every row with `date` and `offset` and returns the final [Table]
    pub fn finish(self, date: CalendarDate, offset: UtcOffset) -> Table {
        let rows = self
            .rows
            .into_iter()
            .map(|(tod, row)| (date.epoch(tod, offset), row))
            .collect::<BTreeMap<_, _>>();

        #[cfg(feature = "log")]
        debug!("aligned {} rows ({} {})", rows.len(), date, offset);

        Table { rows }
    }
}

/// [Table] is the aligned time series, indexed by absolute [Epoch].
/// Rows serialize as a chronological sequence of `(epoch, row)` pairs.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Table {
    #[cfg_attr(feature = "serde", serde(with = "rows_as_seq"))]
    pub(crate) rows: BTreeMap<Epoch, AlignedRow>,
}

#[cfg(feature = "serde")]
mod rows_as_seq {
    use super::AlignedRow;
    use hifitime::Epoch;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::collections::BTreeMap;

    pub fn serialize<S: Serializer>(
        rows: &BTreeMap<Epoch, AlignedRow>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(rows.iter())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<Epoch, AlignedRow>, D::Error> {
        let rows = Vec::<(Epoch, AlignedRow)>::deserialize(deserializer)?;
        Ok(rows.into_iter().collect())
    }
}

impl Table {
    /// Aligns given records and stamps them with `date` and `offset`
    pub fn align<I: IntoIterator<Item = DatedRecord>>(
        records: I,
        date: CalendarDate,
        offset: UtcOffset,
        diagnostics: &mut Diagnostics,
    ) -> Self {
        let mut aligner = Aligner::default();
        for record in records {
            aligner.push(record, diagnostics);
        }
        aligner.finish(date, offset)
    }
    /// Returns number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }
    /// Returns true if table is empty
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
    /// Returns row at this [Epoch], if any
    pub fn get(&self, epoch: &Epoch) -> Option<&AlignedRow> {
        self.rows.get(epoch)
    }
    /// Iterates rows in chronological order
    pub fn iter(&self) -> impl Iterator<Item = (&Epoch, &AlignedRow)> + '_ {
        self.rows.iter()
    }
    /// Iterates [Epoch]s in chronological order
    pub fn epoch_iter(&self) -> impl Iterator<Item = Epoch> + '_ {
        self.rows.keys().copied()
    }
    /// Iterates all [ErrorStats]
    pub fn error_stats_iter(&self) -> impl Iterator<Item = (Epoch, &ErrorStats)> + '_ {
        self.rows
            .iter()
            .filter_map(|(t, row)| Some((*t, row.error_stats.as_ref()?)))
    }
    /// Iterates all [PositionFix]es
    pub fn position_fix_iter(&self) -> impl Iterator<Item = (Epoch, &PositionFix)> + '_ {
        self.rows
            .iter()
            .filter_map(|(t, row)| Some((*t, row.position_fix.as_ref()?)))
    }
    /// Returns number of rows that contain this [Kind]
    pub fn count(&self, kind: Kind) -> usize {
        match kind {
            Kind::ErrorStats => self.error_stats_iter().count(),
            Kind::PositionFix => self.position_fix_iter().count(),
        }
    }
    /// RMS of the range inputs, over time
    pub fn rms(&self) -> impl Iterator<Item = (Epoch, f64)> + '_ {
        self.error_stats_iter()
            .filter_map(|(t, stats)| Some((t, stats.rms?)))
    }
    /// Standard deviation of altitude error, over time
    pub fn sigma_altitude(&self) -> impl Iterator<Item = (Epoch, f64)> + '_ {
        self.error_stats_iter()
            .filter_map(|(t, stats)| Some((t, stats.sigma_alt?)))
    }
    /// Age of differential corrections, over time
    pub fn dgps_age(&self) -> impl Iterator<Item = (Epoch, f64)> + '_ {
        self.position_fix_iter()
            .filter_map(|(t, fix)| Some((t, fix.dgps_age?)))
    }
    /// Number of satellites in use, over time
    pub fn num_sats(&self) -> impl Iterator<Item = (Epoch, u8)> + '_ {
        self.position_fix_iter()
            .filter_map(|(t, fix)| Some((t, fix.num_sats?)))
    }
    /// Horizontal dilution of precision, over time
    pub fn hdop(&self) -> impl Iterator<Item = (Epoch, f64)> + '_ {
        self.position_fix_iter()
            .filter_map(|(t, fix)| Some((t, fix.hdop?)))
    }
    /// Antenna altitude in meters, over time
    pub fn altitude(&self) -> impl Iterator<Item = (Epoch, f64)> + '_ {
        self.position_fix_iter().filter_map(|(t, fix)| {
            let unit = fix.altitude_unit.unwrap_or_default();
            Some((t, unit.to_meters(fix.altitude?)))
        })
    }
    /// Decimal (latitude, longitude) over time.
    /// Requires the coordinates to be normalized first.
    pub fn positions(&self) -> impl Iterator<Item = (Epoch, (f64, f64))> + '_ {
        self.position_fix_iter()
            .filter_map(|(t, fix)| Some((t, (fix.latitude_ddeg?, fix.longitude_ddeg?))))
    }
    /// Decimal (latitude, longitude, rms) for rows where both kinds
    /// were aligned: spatial view of the error statistics.
    pub fn rms_positions(&self) -> impl Iterator<Item = (Epoch, (f64, f64, f64))> + '_ {
        self.rows.iter().filter_map(|(t, row)| {
            let fix = row.position_fix.as_ref()?;
            let stats = row.error_stats.as_ref()?;
            Some((
                *t,
                (fix.latitude_ddeg?, fix.longitude_ddeg?, stats.rms?),
            ))
        })
    }
}
