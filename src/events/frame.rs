//! Runs event detection over Polars frames.
//!
//! The detector accepts any frame with a time column and a numeric wind column,
//! for example the wide frame produced by [`crate::Frost::wide_observations`].

use crate::events::daily_grid::Observation;
use crate::events::detector::{count_events, EventConfig, YearlyEvents};
use crate::events::error::EventError;
use crate::utils::parse_timestamp;
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use log::debug;
use polars::prelude::*;

pub const TIME_COLUMN: &str = "time";
pub const YEAR_COLUMN: &str = "year";
pub const EVENTS_COLUMN: &str = "events";

/// Detects hurricane events in tabular wind data.
///
/// # Examples
///
/// ```
/// use frost_events::{EventConfig, HurricaneDetector};
/// use polars::prelude::*;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let df = df!(
///     "time" => ["2020-08-01", "2020-08-02", "2020-08-03"],
///     "max(wind_speed_of_gust P1D)" => [35.0, 36.0, 20.0],
/// )?;
///
/// let events = HurricaneDetector::default().detect(&df, "max(wind_speed_of_gust P1D)")?;
/// assert_eq!(events.height(), 1);
/// assert_eq!(events.column("year")?.i32()?.get(0), Some(2020));
/// assert_eq!(events.column("events")?.u32()?.get(0), Some(1));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HurricaneDetector {
    config: EventConfig,
}

impl HurricaneDetector {
    pub fn new(config: EventConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EventConfig {
        &self.config
    }

    /// Counts events per year using the `time` column for timestamps.
    pub fn detect(&self, df: &DataFrame, wind_col: &str) -> Result<DataFrame, EventError> {
        self.detect_with_time_column(df, TIME_COLUMN, wind_col)
    }

    /// Counts events per year in `df`, reading timestamps from `time_col`.
    ///
    /// Returns a `{year: Int32, events: UInt32}` frame sorted by year. An empty input
    /// frame yields an empty result with the same schema.
    ///
    /// # Errors
    ///
    /// * [`EventError::MissingColumn`] if either column is absent.
    /// * [`EventError::TimestampParse`] if a timestamp is null or unparsable.
    /// * [`EventError::Polars`] if the wind column cannot be cast to `Float64`.
    pub fn detect_with_time_column(
        &self,
        df: &DataFrame,
        time_col: &str,
        wind_col: &str,
    ) -> Result<DataFrame, EventError> {
        if df.height() == 0 {
            return Ok(empty_events_frame()?);
        }
        let observations = observations_from_frame(df, time_col, wind_col)?;
        let counts = count_events(observations, &self.config);
        debug!(
            "Detected {} events across {} years in '{}'",
            counts.iter().map(|c| c.events).sum::<u32>(),
            counts.len(),
            wind_col
        );
        Ok(events_frame(&counts)?)
    }
}

/// Shorthand for [`HurricaneDetector::detect`] with the default threshold.
pub fn hurricane_events(df: &DataFrame, wind_col: &str) -> Result<DataFrame, EventError> {
    HurricaneDetector::default().detect(df, wind_col)
}

/// Extracts `(time, value)` pairs from two columns of a frame.
pub fn observations_from_frame(
    df: &DataFrame,
    time_col: &str,
    wind_col: &str,
) -> Result<Vec<Observation>, EventError> {
    let time = required_column(df, time_col)?;
    let wind = required_column(df, wind_col)?.cast(&DataType::Float64)?;

    let times = column_timestamps(time, time_col)?;
    let values = wind.f64()?;

    Ok(times
        .into_iter()
        .zip(values)
        .map(|(time, value)| Observation { time, value })
        .collect())
}

fn required_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, EventError> {
    df.column(name)
        .map_err(|_| EventError::MissingColumn(name.to_string()))
}

fn column_timestamps(column: &Column, name: &str) -> Result<Vec<DateTime<Utc>>, EventError> {
    let parse_error = |value: &str| EventError::TimestampParse {
        column: name.to_string(),
        value: value.to_string(),
    };

    match column.dtype() {
        DataType::String => column
            .str()?
            .into_iter()
            .map(|opt| {
                let raw = opt.ok_or_else(|| parse_error("null"))?;
                parse_timestamp(raw).ok_or_else(|| parse_error(raw))
            })
            .collect(),
        DataType::Datetime(unit, _) => {
            let unit = *unit;
            let raw = column.cast(&DataType::Int64)?;
            raw.i64()?
                .into_iter()
                .map(|opt| {
                    let value = opt.ok_or_else(|| parse_error("null"))?;
                    from_epoch(value, unit).ok_or(EventError::TimestampOutOfRange {
                        column: name.to_string(),
                        value,
                    })
                })
                .collect()
        }
        DataType::Date => {
            let raw = column.cast(&DataType::Int32)?;
            raw.i32()?
                .into_iter()
                .map(|opt| {
                    let days = opt.ok_or_else(|| parse_error("null"))?;
                    NaiveDate::default()
                        .checked_add_signed(TimeDelta::days(days.into()))
                        .and_then(|d| d.and_hms_opt(0, 0, 0))
                        .map(|naive| naive.and_utc())
                        .ok_or(EventError::TimestampOutOfRange {
                            column: name.to_string(),
                            value: days.into(),
                        })
                })
                .collect()
        }
        other => Err(EventError::UnsupportedTimeType {
            column: name.to_string(),
            dtype: other.to_string(),
        }),
    }
}

fn from_epoch(value: i64, unit: TimeUnit) -> Option<DateTime<Utc>> {
    match unit {
        TimeUnit::Milliseconds => DateTime::from_timestamp_millis(value),
        TimeUnit::Microseconds => DateTime::from_timestamp_micros(value),
        TimeUnit::Nanoseconds => Some(DateTime::from_timestamp_nanos(value)),
    }
}

/// Builds the `{year, events}` output frame.
pub fn events_frame(counts: &[YearlyEvents]) -> PolarsResult<DataFrame> {
    let years: Vec<i32> = counts.iter().map(|c| c.year).collect();
    let events: Vec<u32> = counts.iter().map(|c| c.events).collect();
    DataFrame::new(vec![
        Column::new(YEAR_COLUMN.into(), years),
        Column::new(EVENTS_COLUMN.into(), events),
    ])
}

pub fn empty_events_frame() -> PolarsResult<DataFrame> {
    events_frame(&[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::detector::HURRICANE_THRESHOLD_MS;

    const WIND: &str = "max(wind_speed_of_gust P1D)";

    fn years_and_events(df: &DataFrame) -> Vec<(i32, u32)> {
        let years = df.column(YEAR_COLUMN).unwrap().i32().unwrap();
        let events = df.column(EVENTS_COLUMN).unwrap().u32().unwrap();
        years
            .into_iter()
            .zip(events)
            .map(|(y, e)| (y.unwrap(), e.unwrap()))
            .collect()
    }

    fn assert_events_schema(df: &DataFrame) {
        assert_eq!(df.get_column_names(), [YEAR_COLUMN, EVENTS_COLUMN]);
        assert_eq!(df.column(YEAR_COLUMN).unwrap().dtype(), &DataType::Int32);
        assert_eq!(df.column(EVENTS_COLUMN).unwrap().dtype(), &DataType::UInt32);
    }

    #[test]
    fn test_detect_from_string_times() -> Result<(), Box<dyn std::error::Error>> {
        let df = df!(
            "time" => ["2020-08-03T00:00:00.000Z", "2020-08-01T00:00:00.000Z", "2020-08-02T00:00:00.000Z"],
            WIND => [Some(45.0), Some(40.0), Some(10.0)],
        )?;

        let events = hurricane_events(&df, WIND)?;
        assert_events_schema(&events);
        assert_eq!(years_and_events(&events), vec![(2020, 2)]);
        Ok(())
    }

    #[test]
    fn test_detect_from_datetime_column() -> Result<(), Box<dyn std::error::Error>> {
        let day_ms = 86_400_000i64;
        // 2020-12-31 and 2021-01-01 in epoch milliseconds.
        let start = 1_609_372_800_000i64;
        let time = Series::new("ts".into(), [start, start + day_ms])
            .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?;
        let df = DataFrame::new(vec![
            time.into(),
            Column::new("gust".into(), [40.0, 41.0]),
        ])?;

        let events = HurricaneDetector::default().detect_with_time_column(&df, "ts", "gust")?;
        assert_eq!(years_and_events(&events), vec![(2020, 1)]);
        Ok(())
    }

    #[test]
    fn test_detect_from_date_column() -> Result<(), Box<dyn std::error::Error>> {
        // Days since epoch for 2020-08-01 and 2020-08-03.
        let time = Series::new("time".into(), [18_475i32, 18_477])
            .cast(&DataType::Date)?;
        let df = DataFrame::new(vec![time.into(), Column::new(WIND.into(), [40.0, 40.0])])?;

        let events = hurricane_events(&df, WIND)?;
        assert_eq!(years_and_events(&events), vec![(2020, 2)]);
        Ok(())
    }

    #[test]
    fn test_integer_wind_column_is_cast() -> Result<(), Box<dyn std::error::Error>> {
        let df = df!(
            "time" => ["2021-02-01", "2021-02-02"],
            "wind" => [33i64, 10],
        )?;
        let events = hurricane_events(&df, "wind")?;
        assert_eq!(years_and_events(&events), vec![(2021, 1)]);
        Ok(())
    }

    #[test]
    fn test_empty_frame_yields_empty_schema() -> Result<(), Box<dyn std::error::Error>> {
        let df = DataFrame::empty();
        let events = hurricane_events(&df, WIND)?;
        assert_eq!(events.height(), 0);
        assert_events_schema(&events);

        // Running again on a frame with no events gives the same empty result.
        let again = hurricane_events(&events, EVENTS_COLUMN)?;
        assert!(again.equals(&events));
        Ok(())
    }

    #[test]
    fn test_no_events_found_keeps_schema() -> Result<(), Box<dyn std::error::Error>> {
        let df = df!(
            "time" => ["2020-08-01", "2020-08-02"],
            // Exactly at the threshold is not above it.
            WIND => [Some(HURRICANE_THRESHOLD_MS), None],
        )?;
        let events = hurricane_events(&df, WIND)?;
        assert_eq!(events.height(), 0);
        assert_events_schema(&events);
        Ok(())
    }

    #[test]
    fn test_missing_column_is_reported() {
        let df = df!("time" => ["2020-08-01"], "wind" => [40.0]).unwrap();

        let err = hurricane_events(&df, WIND).unwrap_err();
        assert!(matches!(err, EventError::MissingColumn(ref c) if c == WIND));

        let err = HurricaneDetector::default()
            .detect_with_time_column(&df, "referenceTime", "wind")
            .unwrap_err();
        assert!(matches!(err, EventError::MissingColumn(ref c) if c == "referenceTime"));
    }

    #[test]
    fn test_malformed_timestamp_fails() {
        let df = df!(
            "time" => ["2020-08-01", "not a date"],
            "wind" => [40.0, 40.0],
        )
        .unwrap();

        let err = hurricane_events(&df, "wind").unwrap_err();
        match err {
            EventError::TimestampParse { column, value } => {
                assert_eq!(column, "time");
                assert_eq!(value, "not a date");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unsupported_time_dtype() {
        let df = df!("time" => [1.5f64], "wind" => [40.0]).unwrap();
        let err = hurricane_events(&df, "wind").unwrap_err();
        assert!(matches!(err, EventError::UnsupportedTimeType { .. }));
    }

    #[test]
    fn test_custom_threshold_detector() -> Result<(), Box<dyn std::error::Error>> {
        let df = df!(
            "time" => ["2019-01-01", "2019-01-02", "2019-01-03"],
            "wind" => [25.0, 15.0, 25.0],
        )?;
        let detector = HurricaneDetector::new(EventConfig::builder().threshold(20.0).build());
        assert_eq!(years_and_events(&detector.detect(&df, "wind")?), vec![(2019, 2)]);
        assert_eq!(hurricane_events(&df, "wind")?.height(), 0);
        Ok(())
    }
}
