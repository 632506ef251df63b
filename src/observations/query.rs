//! Parameters of a Frost `observations` request.

use crate::types::reference_time::ReferenceTime;
use bon::Builder;

pub const DEFAULT_QUALITIES: &str = "0,1,2,3,4";
pub const DEFAULT_LIMIT: u32 = 100_000;

/// A single observations query.
///
/// `sources` and `elements` are comma-separated lists as accepted by Frost,
/// e.g. `"SN18700"` and `"max(wind_speed_of_gust P1D)"`.
///
/// # Examples
///
/// ```
/// use frost_events::{ObservationQuery, Year};
///
/// let query = ObservationQuery::builder()
///     .sources("SN18700")
///     .elements("max(wind_speed_of_gust P1D)")
///     .reference_time(Year(2020))
///     .build();
///
/// assert_eq!(query.qualities, "0,1,2,3,4");
/// assert_eq!(query.limit, 100_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Builder)]
pub struct ObservationQuery {
    #[builder(into)]
    pub sources: String,
    #[builder(into)]
    pub elements: String,
    #[builder(into)]
    pub reference_time: ReferenceTime,
    #[builder(into, default = DEFAULT_QUALITIES.to_string())]
    pub qualities: String,
    #[builder(default = DEFAULT_LIMIT)]
    pub limit: u32,
}

impl ObservationQuery {
    /// Query parameters for the given page. The first page carries no `page` key.
    pub(crate) fn params(&self, page: Option<u32>) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("sources", self.sources.clone()),
            ("elements", self.elements.clone()),
            ("referencetime", self.reference_time.to_query_value()),
            ("qualities", self.qualities.clone()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(page) = page {
            params.push(("page", page.to_string()));
        }
        params
    }

    /// Stable, filesystem-safe identifier for this query.
    pub(crate) fn cache_key(&self) -> String {
        let raw = format!(
            "{}-{}-{}-q{}-l{}",
            self.sources,
            self.elements,
            self.reference_time.cache_key(),
            self.qualities,
            self.limit
        );
        raw.chars()
            .map(|c| match c {
                'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' => c,
                _ => '_',
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::reference_time::Year;

    fn query() -> ObservationQuery {
        ObservationQuery::builder()
            .sources("SN18700")
            .elements("max(wind_speed_of_gust P1D)")
            .reference_time(Year(2020))
            .build()
    }

    #[test]
    fn test_params_first_page_has_no_page_key() {
        let params = query().params(None);
        assert!(params.iter().all(|(k, _)| *k != "page"));
        assert!(params.contains(&("qualities", "0,1,2,3,4".to_string())));
        assert!(params.contains(&("limit", "100000".to_string())));
        assert!(params.contains(&(
            "referencetime",
            "2020-01-01T00:00:00Z/2021-01-01T00:00:00Z".to_string()
        )));
    }

    #[test]
    fn test_params_with_page() {
        let params = query().params(Some(2));
        assert_eq!(params.last(), Some(&("page", "2".to_string())));
    }

    #[test]
    fn test_cache_key_is_path_safe() {
        let key = query().cache_key();
        assert_eq!(
            key,
            "SN18700-max_wind_speed_of_gust_P1D_-20200101T000000_20210101T000000-q0_1_2_3_4-l100000"
        );
        assert!(!key.contains('/'));
    }
}
