//! Main entry point: fetch Frost observations as Polars frames and count hurricane events.

use crate::config::FrostConfig;
use crate::error::FrostError;
use crate::events::daily_grid::SameDayReading;
use crate::events::detector::EventConfig;
use crate::events::frame::HurricaneDetector;
use crate::observations::cache::ObservationCache;
use crate::observations::error::ObservationError;
use crate::observations::fetcher::ObservationFetcher;
use crate::observations::frame::{pivot_elements, rows_to_frame};
use crate::observations::query::ObservationQuery;
use crate::types::reference_time::ReferenceTime;
use crate::utils::ensure_cache_dir_exists;
use bon::bon;
use log::warn;
use polars::prelude::*;

/// Client for the Frost observations API.
///
/// Create one with [`Frost::new()`] to read settings from the environment, or
/// [`Frost::with_config()`] for explicit settings.
///
/// # Examples
///
/// ```no_run
/// # use frost_events::{Frost, FrostError, Year};
/// # #[tokio::main]
/// # async fn main() -> Result<(), FrostError> {
/// let client = Frost::new().await?;
///
/// let events = client
///     .hurricane_events()
///     .source("SN18700")
///     .element("max(wind_speed_of_gust P1D)")
///     .reference_time(Year(2020))
///     .call()
///     .await?;
/// println!("{}", events);
/// # Ok(())
/// # }
/// ```
pub struct Frost {
    fetcher: ObservationFetcher,
    cache: Option<ObservationCache>,
    events: EventConfig,
}

#[bon]
impl Frost {
    /// Creates a client from explicit settings. Creates the cache directory if one is set.
    ///
    /// # Errors
    ///
    /// Returns [`FrostError::CacheDirCreation`] if the cache directory cannot be created and
    /// [`FrostError::Observations`] if the HTTP client cannot be built.
    pub async fn with_config(config: FrostConfig) -> Result<Self, FrostError> {
        let cache = match &config.cache_dir {
            Some(dir) => {
                ensure_cache_dir_exists(dir)
                    .await
                    .map_err(|e| FrostError::CacheDirCreation(dir.clone(), e))?;
                Some(ObservationCache::new(dir))
            }
            None => None,
        };
        Ok(Self {
            fetcher: ObservationFetcher::new(&config)?,
            cache,
            events: config.events,
        })
    }

    /// Creates a client configured from the environment (see [`FrostConfig::from_env`]).
    pub async fn new() -> Result<Self, FrostError> {
        Self::with_config(FrostConfig::from_env()?).await
    }

    /// Fetches observations in long form: one row per `(time, source, element)` value.
    ///
    /// # Arguments
    ///
    /// * `.sources(..)`: **Required.** Comma-separated Frost source ids, e.g. `"SN18700"`.
    /// * `.elements(..)`: **Required.** Comma-separated element ids.
    /// * `.reference_time(..)`: **Required.** Time filter, see [`ReferenceTime`].
    /// * `.qualities(..)`: Optional. Accepted quality codes. Defaults to `"0,1,2,3,4"`.
    /// * `.limit(..)`: Optional. Page size. Defaults to `100000`.
    ///
    /// # Errors
    ///
    /// Returns [`FrostError::Observations`] for network, HTTP status, parse and cache failures.
    #[builder]
    pub async fn observations(
        &self,
        #[builder(into)] sources: String,
        #[builder(into)] elements: String,
        #[builder(into)] reference_time: ReferenceTime,
        #[builder(into)] qualities: Option<String>,
        limit: Option<u32>,
    ) -> Result<LazyFrame, FrostError> {
        let query = ObservationQuery::builder()
            .sources(sources)
            .elements(elements)
            .reference_time(reference_time)
            .maybe_qualities(qualities)
            .maybe_limit(limit)
            .build();
        self.long_frame(&query).await
    }

    /// Fetches observations as a wide frame: `time` plus one column per element.
    ///
    /// Takes the same arguments as [`Frost::observations`].
    #[builder]
    pub async fn wide_observations(
        &self,
        #[builder(into)] sources: String,
        #[builder(into)] elements: String,
        #[builder(into)] reference_time: ReferenceTime,
        #[builder(into)] qualities: Option<String>,
        limit: Option<u32>,
    ) -> Result<LazyFrame, FrostError> {
        let long = self
            .observations()
            .sources(sources)
            .elements(elements)
            .reference_time(reference_time)
            .maybe_qualities(qualities)
            .maybe_limit(limit)
            .call()
            .await?
            .collect()?;
        Ok(pivot_elements(&long)?)
    }

    /// Counts hurricane events per year for one wind element at one source.
    ///
    /// Returns a `{year, events}` frame sorted by year.
    ///
    /// # Arguments
    ///
    /// * `.source(..)`: **Required.** Frost source id.
    /// * `.element(..)`: **Required.** Wind element id, e.g. `"max(wind_speed_of_gust P1D)"`.
    /// * `.reference_time(..)`: **Required.** Time filter.
    /// * `.threshold(f64)`: Optional. Overrides the configured threshold.
    /// * `.same_day(SameDayReading)`: Optional. Overrides the configured same-day policy.
    #[builder]
    pub async fn hurricane_events(
        &self,
        #[builder(into)] source: String,
        #[builder(into)] element: String,
        #[builder(into)] reference_time: ReferenceTime,
        threshold: Option<f64>,
        same_day: Option<SameDayReading>,
    ) -> Result<DataFrame, FrostError> {
        let wide = self
            .wide_observations()
            .sources(source)
            .elements(element.clone())
            .reference_time(reference_time)
            .call()
            .await?
            .collect()?;

        let config = EventConfig {
            threshold: threshold.unwrap_or(self.events.threshold),
            same_day: same_day.unwrap_or(self.events.same_day),
        };
        Ok(HurricaneDetector::new(config).detect(&wide, &element)?)
    }

    async fn long_frame(&self, query: &ObservationQuery) -> Result<LazyFrame, FrostError> {
        if let Some(cache) = &self.cache {
            if let Some(frame) = cache.load(query).await? {
                return Ok(frame);
            }
            warn!(
                "Cache miss for sources '{}' elements '{}'. Downloading.",
                query.sources, query.elements
            );
        }

        let rows = self.fetcher.fetch(query).await?;
        let df = rows_to_frame(&rows).map_err(ObservationError::from)?;

        if let Some(cache) = &self.cache {
            cache.store(query, df.clone()).await?;
        }
        Ok(df.lazy())
    }
}
