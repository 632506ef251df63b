//! Day-granularity view over an irregular series of timestamped readings.
//!
//! A [`DailyGrid`] has exactly one slot per calendar day (UTC) between the first and
//! the last day that carries a reading, inclusive. Days without any reading are kept
//! as `None` so that they can break runs during event detection.

use crate::types::into_utc_trait::IntoUtcDateTime;
use chrono::{DateTime, Days, NaiveDate, Utc};
use std::collections::BTreeMap;

/// A single timestamped reading. `value` is `None` when the source reported no value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub time: DateTime<Utc>,
    pub value: Option<f64>,
}

impl Observation {
    pub fn new(time: impl IntoUtcDateTime, value: Option<f64>) -> Self {
        Self {
            time: time.into_utc(),
            value,
        }
    }

    /// NaN is treated the same as a missing value.
    fn reading(&self) -> Option<f64> {
        self.value.filter(|v| !v.is_nan())
    }
}

/// Selects which value survives when a calendar day holds more than one reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SameDayReading {
    /// Keep the highest reading of the day.
    #[default]
    Max,
    /// Keep the reading with the latest timestamp. Ties keep the last one in input order.
    Latest,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyGrid {
    start: NaiveDate,
    values: Vec<Option<f64>>,
}

impl DailyGrid {
    /// Builds the grid from unordered, possibly duplicated observations.
    ///
    /// Returns `None` when no observation carries a value.
    pub fn from_observations<I>(observations: I, same_day: SameDayReading) -> Option<Self>
    where
        I: IntoIterator<Item = Observation>,
    {
        let mut present: Vec<(DateTime<Utc>, f64)> = observations
            .into_iter()
            .filter_map(|obs| obs.reading().map(|value| (obs.time, value)))
            .collect();
        if present.is_empty() {
            return None;
        }
        // Stable, so equal timestamps keep their input order.
        present.sort_by_key(|(time, _)| *time);

        let mut by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for (time, value) in present {
            by_day
                .entry(time.date_naive())
                .and_modify(|kept| {
                    *kept = match same_day {
                        SameDayReading::Max => kept.max(value),
                        SameDayReading::Latest => value,
                    }
                })
                .or_insert(value);
        }

        let start = *by_day.keys().next()?;
        let end = *by_day.keys().next_back()?;
        let values = start
            .iter_days()
            .take_while(|day| *day <= end)
            .map(|day| by_day.get(&day).copied())
            .collect();

        Some(Self { start, values })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the grid, inclusive.
    pub fn end(&self) -> NaiveDate {
        let offset = Days::new(self.values.len().saturating_sub(1) as u64);
        self.start.checked_add_days(offset).unwrap_or(self.start)
    }

    /// Number of days from [`start`](Self::start) to [`end`](Self::end), inclusive.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`: a grid is only built when at least one day carries a value.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterates the grid in chronological order.
    pub fn days(&self) -> impl Iterator<Item = (NaiveDate, Option<f64>)> + '_ {
        self.start.iter_days().zip(self.values.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_grid_fills_missing_days() {
        let grid = DailyGrid::from_observations(
            [
                Observation::new(at(2020, 8, 4, 0), Some(3.0)),
                Observation::new(at(2020, 8, 1, 0), Some(1.0)),
            ],
            SameDayReading::Max,
        )
        .unwrap();

        assert_eq!(grid.start(), date(2020, 8, 1));
        assert_eq!(grid.end(), date(2020, 8, 4));
        assert_eq!(grid.len(), 4);
        let days: Vec<_> = grid.days().collect();
        assert_eq!(
            days,
            vec![
                (date(2020, 8, 1), Some(1.0)),
                (date(2020, 8, 2), None),
                (date(2020, 8, 3), None),
                (date(2020, 8, 4), Some(3.0)),
            ]
        );
    }

    #[test]
    fn test_grid_ignores_absent_and_nan_values() {
        let grid = DailyGrid::from_observations(
            [
                Observation::new(at(2020, 7, 30, 0), None),
                Observation::new(at(2020, 8, 1, 0), Some(f64::NAN)),
                Observation::new(at(2020, 8, 2, 0), Some(5.0)),
                Observation::new(at(2020, 8, 3, 0), None),
            ],
            SameDayReading::Max,
        )
        .unwrap();

        // The range is spanned by present values only.
        assert_eq!(grid.start(), date(2020, 8, 2));
        assert_eq!(grid.end(), date(2020, 8, 2));
        assert_eq!(grid.len(), 1);
        assert!(!grid.is_empty());
    }

    #[test]
    fn test_grid_end_across_years() {
        let grid = DailyGrid::from_observations(
            [
                Observation::new(at(2019, 12, 30, 0), Some(1.0)),
                Observation::new(at(2020, 3, 1, 0), Some(2.0)),
            ],
            SameDayReading::Max,
        )
        .unwrap();

        // 2 days of 2019, 31 + 29 of 2020, then 1 March.
        assert_eq!(grid.len(), 63);
        assert_eq!(grid.end(), date(2020, 3, 1));
        assert_eq!(grid.days().last().map(|(day, _)| day), Some(grid.end()));
        assert!(!grid.is_empty());
    }

    #[test]
    fn test_grid_without_values_is_none() {
        assert!(DailyGrid::from_observations(Vec::new(), SameDayReading::Max).is_none());
        assert!(DailyGrid::from_observations(
            [Observation::new(at(2020, 8, 1, 0), None)],
            SameDayReading::Max
        )
        .is_none());
    }

    #[test]
    fn test_same_day_max_and_latest() {
        let readings = [
            Observation::new(at(2020, 8, 1, 18), Some(10.0)),
            Observation::new(at(2020, 8, 1, 6), Some(40.0)),
            Observation::new(at(2020, 8, 1, 12), Some(20.0)),
        ];

        let max = DailyGrid::from_observations(readings, SameDayReading::Max).unwrap();
        assert_eq!(max.days().next(), Some((date(2020, 8, 1), Some(40.0))));

        let latest = DailyGrid::from_observations(readings, SameDayReading::Latest).unwrap();
        assert_eq!(latest.days().next(), Some((date(2020, 8, 1), Some(10.0))));
    }

    #[test]
    fn test_offsets_are_normalized_to_utc_days() {
        use chrono::FixedOffset;
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        // 01:00 at +02:00 is still the previous day in UTC.
        let local = plus_two.with_ymd_and_hms(2020, 8, 2, 1, 0, 0).unwrap();

        let grid = DailyGrid::from_observations(
            [Observation::new(local, Some(1.0))],
            SameDayReading::Max,
        )
        .unwrap();
        assert_eq!(grid.start(), date(2020, 8, 1));
    }
}
