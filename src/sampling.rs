use crate::{
    prelude::{Duration, Epoch},
    timeseries::{AlignedRow, Table},
};

use itertools::Itertools;
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sampling figures of one row: time elapsed since previous row
/// and the instantaneous sampling rate.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SamplingEntry {
    pub epoch: Epoch,
    /// Zero on first row
    pub delta: Duration,
    /// None when delta is zero
    pub rate_hz: Option<f64>,
}

/// Overall sampling figures
#[derive(Debug, Copy, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SamplingSummary {
    /// Mean interval between two rows, first row excluded
    pub mean_interval: Option<Duration>,
    /// Inverse of [Self::mean_interval]
    pub mean_rate_hz: Option<f64>,
    /// Number of rows for which the rate is not defined
    pub undefined_rates: usize,
}

fn rate_hz(delta: Duration) -> Option<f64> {
    let seconds = delta.to_seconds();
    if seconds > 0.0 {
        Some(1.0 / seconds)
    } else {
        None
    }
}

impl Table {
    /// Returns first [Epoch] encountered in time
    pub fn first_epoch(&self) -> Option<Epoch> {
        self.epoch_iter().next()
    }

    /// Returns last [Epoch] encountered in time
    pub fn last_epoch(&self) -> Option<Epoch> {
        self.epoch_iter().last()
    }

    /// Returns total [Duration] of this [Table]
    pub fn duration(&self) -> Option<Duration> {
        let start = self.first_epoch()?;
        let end = self.last_epoch()?;
        Some(end - start)
    }

    /// Per row sampling figures, in chronological order.
    /// The first row has a zero delta, hence no rate.
    pub fn sampling(&self) -> impl Iterator<Item = SamplingEntry> + '_ {
        let mut previous: Option<Epoch> = None;
        self.epoch_iter().map(move |epoch| {
            let delta = match previous {
                Some(prev) => epoch - prev,
                None => Duration::ZERO,
            };
            previous = Some(epoch);
            SamplingEntry {
                epoch,
                delta,
                rate_hz: rate_hz(delta),
            }
        })
    }

    /// Instantaneous sampling rate, over time
    pub fn sampling_rate(&self) -> impl Iterator<Item = (Epoch, f64)> + '_ {
        self.sampling()
            .filter_map(|entry| Some((entry.epoch, entry.rate_hz?)))
    }

    /// Mean sampling interval and rate, excluding the first row
    pub fn sampling_summary(&self) -> SamplingSummary {
        let undefined_rates = self
            .sampling()
            .filter(|entry| entry.rate_hz.is_none())
            .count();

        let nb_intervals = self.len().saturating_sub(1);
        if nb_intervals == 0 {
            return SamplingSummary {
                mean_interval: None,
                mean_rate_hz: None,
                undefined_rates,
            };
        }

        let total = self
            .sampling()
            .skip(1)
            .map(|entry| entry.delta.total_nanoseconds())
            .sum::<i128>();

        let mean = Duration::from_total_nanoseconds(total / nb_intervals as i128);

        SamplingSummary {
            mean_interval: Some(mean),
            mean_rate_hz: rate_hz(mean),
            undefined_rates,
        }
    }

    /// Histogram of intervals between successive rows:
    /// (interval, population), sorted by interval.
    pub fn sampling_histogram(&self) -> impl Iterator<Item = (Duration, usize)> {
        self.epoch_iter()
            .tuple_windows()
            .map(|(ek, ekp1)| ekp1 - ek)
            .fold(BTreeMap::<Duration, usize>::new(), |mut histogram, dt| {
                *histogram.entry(dt).or_insert(0) += 1;
                histogram
            })
            .into_iter()
    }

    /// Returns most encountered interval between rows.
    /// Ties resolve to the shortest interval.
    pub fn dominant_sampling_interval(&self) -> Option<Duration> {
        self.sampling_histogram()
            .max_by(|(dt_i, pop_i), (dt_j, pop_j)| pop_i.cmp(pop_j).then(dt_j.cmp(dt_i)))
            .map(|(dt, _)| dt)
    }

    /// Returns dominant sampling rate in Hertz
    pub fn dominant_sampling_rate_hz(&self) -> Option<f64> {
        rate_hz(self.dominant_sampling_interval()?)
    }

    /// Returns true if all rows are evenly spaced
    pub fn steady_sampling(&self) -> bool {
        self.sampling_histogram().count() == 1
    }

    /// Returns an iterator over unexpected data gaps,
    /// in the form ([Epoch], [Duration]), where epoch is the last
    /// row before the gap. When `tolerance` is None, any interval larger
    /// than the dominant interval is a gap.
    pub fn data_gaps(
        &self,
        tolerance: Option<Duration>,
    ) -> Box<dyn Iterator<Item = (Epoch, Duration)> + '_> {
        let tolerance = match tolerance.or_else(|| self.dominant_sampling_interval()) {
            Some(dt) => dt,
            None => return Box::new(std::iter::empty()),
        };
        Box::new(
            self.epoch_iter()
                .tuple_windows()
                .filter_map(move |(ek, ekp1)| {
                    let dt = ekp1 - ek;
                    if dt > tolerance {
                        Some((ek, dt))
                    } else {
                        None
                    }
                }),
        )
    }

    /// Keeps one row every `ratio` rows, starting with the first one.
    /// A ratio of 0 or 1 keeps everything.
    pub fn decimate_by_ratio(&self, ratio: usize) -> Self {
        let ratio = ratio.max(1);
        Self {
            rows: self
                .rows
                .iter()
                .step_by(ratio)
                .map(|(t, row)| (*t, row.clone()))
                .collect::<BTreeMap<Epoch, AlignedRow>>(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        diagnostics::Diagnostics,
        record::{DatedRecord, ErrorStats, Record},
        time::{CalendarDate, TimeOfDay, UtcOffset},
    };

    fn table(times: &[(u8, u8, u8, u32)]) -> Table {
        let records = times.iter().enumerate().map(|(i, (h, m, s, ns))| DatedRecord {
            line: i + 1,
            time_of_day: TimeOfDay::from_hms_nanos(*h, *m, *s, *ns),
            record: Record::ErrorStats(ErrorStats::default()),
        });
        let mut diag = Diagnostics::default();
        Table::align(
            records,
            CalendarDate::default(),
            UtcOffset::default(),
            &mut diag,
        )
    }

    #[test]
    fn instantaneous_rate() {
        let table = table(&[
            (10, 0, 0, 0),
            (10, 0, 0, 500_000_000),
            (10, 0, 1, 0),
            (10, 0, 2, 0),
        ]);
        let entries = table.sampling().collect::<Vec<_>>();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].delta, Duration::ZERO);
        assert_eq!(entries[0].rate_hz, None);
        assert_eq!(entries[1].rate_hz, Some(2.0));
        assert_eq!(entries[2].rate_hz, Some(2.0));
        assert_eq!(entries[3].rate_hz, Some(1.0));

        let summary = table.sampling_summary();
        assert_eq!(summary.undefined_rates, 1);
        assert_eq!(
            summary.mean_interval,
            Some(Duration::from_total_nanoseconds(666_666_666))
        );
        assert!((summary.mean_rate_hz.unwrap() - 1.5).abs() < 1.0E-6);
        assert_eq!(table.sampling_rate().count(), 3);
    }

    #[test]
    fn single_row() {
        let table = table(&[(10, 0, 0, 0)]);
        let summary = table.sampling_summary();
        assert_eq!(summary.mean_interval, None);
        assert_eq!(summary.mean_rate_hz, None);
        assert_eq!(summary.undefined_rates, 1);
        assert_eq!(table.duration(), Some(Duration::ZERO));
        assert_eq!(table.dominant_sampling_interval(), None);
        assert_eq!(table.data_gaps(None).count(), 0);
    }

    #[test]
    fn empty_table() {
        let table = Table::default();
        assert_eq!(table.sampling().count(), 0);
        assert_eq!(table.sampling_summary(), SamplingSummary::default());
        assert_eq!(table.first_epoch(), None);
        assert_eq!(table.duration(), None);
    }

    #[test]
    fn histogram_and_gaps() {
        let table = table(&[
            (10, 0, 0, 0),
            (10, 0, 1, 0),
            (10, 0, 2, 0),
            (10, 0, 3, 0),
            (10, 0, 13, 0),
            (10, 0, 14, 0),
        ]);
        assert_eq!(
            table.sampling_histogram().collect::<Vec<_>>(),
            vec![
                (Duration::from_seconds(1.0), 4),
                (Duration::from_seconds(10.0), 1),
            ]
        );
        assert!(!table.steady_sampling());
        assert_eq!(
            table.dominant_sampling_interval(),
            Some(Duration::from_seconds(1.0))
        );
        assert_eq!(table.dominant_sampling_rate_hz(), Some(1.0));

        let gaps = table.data_gaps(None).collect::<Vec<_>>();
        assert_eq!(
            gaps,
            vec![(
                Epoch::from_gregorian_utc(2000, 1, 1, 10, 0, 3, 0),
                Duration::from_seconds(10.0)
            )]
        );
        assert_eq!(
            table
                .data_gaps(Some(Duration::from_seconds(10.0)))
                .count(),
            0
        );
        assert_eq!(table.duration(), Some(Duration::from_seconds(14.0)));
    }

    #[test]
    fn decimation() {
        let table = table(&[
            (10, 0, 0, 0),
            (10, 0, 1, 0),
            (10, 0, 2, 0),
            (10, 0, 3, 0),
            (10, 0, 4, 0),
        ]);
        let decimated = table.decimate_by_ratio(2);
        assert_eq!(decimated.len(), 3);
        assert_eq!(
            decimated.first_epoch(),
            Some(Epoch::from_gregorian_utc(2000, 1, 1, 10, 0, 0, 0))
        );
        assert_eq!(
            decimated.last_epoch(),
            Some(Epoch::from_gregorian_utc(2000, 1, 1, 10, 0, 4, 0))
        );
        assert_eq!(table.decimate_by_ratio(0), table);
    }
}
