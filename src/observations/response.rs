//! Serde model of a Frost `observations/v0.jsonld` response page.

use crate::observations::error::ObservationError;
use crate::utils::parse_timestamp;
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct ObservationsPage {
    #[serde(default)]
    data: Vec<DataItem>,
    #[serde(default)]
    page: Option<PageInfo>,
}

#[derive(Debug, Deserialize)]
struct PageInfo {
    next: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DataItem {
    source_id: String,
    reference_time: String,
    #[serde(default)]
    observations: Vec<RawObservation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawObservation {
    element_id: String,
    value: Option<f64>,
    unit: Option<String>,
}

/// One observed value, flattened out of the nested response.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationRow {
    pub time: DateTime<Utc>,
    pub source: String,
    pub element: String,
    pub value: Option<f64>,
    pub unit: Option<String>,
}

impl ObservationsPage {
    pub(crate) fn has_next(&self) -> bool {
        self.page.as_ref().is_some_and(|p| p.next.is_some())
    }

    pub(crate) fn into_rows(self) -> Result<Vec<ObservationRow>, ObservationError> {
        let mut rows = Vec::new();
        for item in self.data {
            let time = parse_timestamp(&item.reference_time)
                .ok_or_else(|| ObservationError::ReferenceTime(item.reference_time.clone()))?;
            rows.extend(item.observations.into_iter().map(|obs| ObservationRow {
                time,
                source: item.source_id.clone(),
                element: obs.element_id,
                value: obs.value,
                unit: obs.unit,
            }));
        }
        Ok(rows)
    }
}

/// Position in a paginated result. The first request carries no page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageCursor {
    page: Option<u32>,
}

impl PageCursor {
    pub fn first() -> Self {
        Self::default()
    }

    pub fn page(&self) -> Option<u32> {
        self.page
    }

    pub fn advance(self) -> Self {
        Self {
            page: Some(self.page.map_or(1, |p| p + 1)),
        }
    }
}
