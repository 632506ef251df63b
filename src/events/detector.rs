//! Counts hurricane events per year from a daily wind-speed series.
//!
//! An event is a maximal run of consecutive days whose value strictly exceeds the
//! threshold. Days without a reading end a run just like days below the threshold.
//! Each event is attributed to the year of its first day.

use crate::events::daily_grid::{DailyGrid, Observation, SameDayReading};
use bon::Builder;
use chrono::Datelike;
use std::collections::BTreeMap;

/// Wind speed, in m/s, above which a day counts towards a hurricane event.
pub const HURRICANE_THRESHOLD_MS: f64 = 32.6;

/// Parameters for event detection.
///
/// # Examples
///
/// ```
/// use frost_events::{EventConfig, SameDayReading, HURRICANE_THRESHOLD_MS};
///
/// let default = EventConfig::default();
/// assert_eq!(default.threshold, HURRICANE_THRESHOLD_MS);
///
/// let storm = EventConfig::builder()
///     .threshold(24.5)
///     .same_day(SameDayReading::Latest)
///     .build();
/// assert_eq!(storm.threshold, 24.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Builder)]
pub struct EventConfig {
    /// Strict lower bound a day's value must exceed.
    #[builder(default = HURRICANE_THRESHOLD_MS)]
    pub threshold: f64,
    /// How several readings on one day collapse into a single value.
    #[builder(default)]
    pub same_day: SameDayReading,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            threshold: HURRICANE_THRESHOLD_MS,
            same_day: SameDayReading::default(),
        }
    }
}

/// Number of events that started in `year`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearlyEvents {
    pub year: i32,
    pub events: u32,
}

/// Counts threshold-crossing episodes per year.
///
/// The result is sorted by year and only contains years with at least one event.
pub fn count_events<I>(observations: I, config: &EventConfig) -> Vec<YearlyEvents>
where
    I: IntoIterator<Item = Observation>,
{
    let Some(grid) = DailyGrid::from_observations(observations, config.same_day) else {
        return Vec::new();
    };

    let mut counts: BTreeMap<i32, u32> = BTreeMap::new();
    let mut in_event = false;
    for (day, value) in grid.days() {
        let above = value.is_some_and(|v| v > config.threshold);
        if above && !in_event {
            *counts.entry(day.year()).or_default() += 1;
            in_event = true;
        } else if !above {
            in_event = false;
        }
    }

    counts
        .into_iter()
        .map(|(year, events)| YearlyEvents { year, events })
        .collect()
}
