//! Fetch weather observations from the MET Norway [Frost API](https://frost.met.no) and
//! count hurricane events per year in daily wind-speed series.
//!
//! The detector can be used on its own with any Polars frame that has a time column and a
//! numeric wind column:
//!
//! ```
//! use frost_events::hurricane_events;
//! use polars::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let df = df!(
//!     "time" => ["2020-12-31", "2021-01-01", "2021-01-02"],
//!     "gust" => [40.0, 41.0, 12.0],
//! )?;
//! let events = hurricane_events(&df, "gust")?;
//! assert_eq!(events.column("year")?.i32()?.get(0), Some(2020));
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod events;
mod frost;
mod observations;
mod types;
mod utils;

pub use config::{ConfigError, FrostConfig, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};
pub use error::FrostError;
pub use frost::Frost;

pub use events::daily_grid::{DailyGrid, Observation, SameDayReading};
pub use events::detector::{count_events, EventConfig, YearlyEvents, HURRICANE_THRESHOLD_MS};
pub use events::error::EventError;
pub use events::frame::{
    empty_events_frame, events_frame, hurricane_events, observations_from_frame,
    HurricaneDetector,
};

pub use observations::cache::ObservationCache;
pub use observations::error::ObservationError;
pub use observations::fetcher::ObservationFetcher;
pub use observations::frame::{element_names, pivot_elements, rows_to_frame};
pub use observations::query::{ObservationQuery, DEFAULT_LIMIT, DEFAULT_QUALITIES};
pub use observations::response::{ObservationRow, PageCursor};

pub use types::into_utc_trait::IntoUtcDateTime;
pub use types::reference_time::{ReferenceTime, Year};
