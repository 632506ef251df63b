use crate::config::FrostConfig;
use crate::observations::error::ObservationError;
use crate::observations::query::ObservationQuery;
use crate::observations::response::{ObservationRow, ObservationsPage, PageCursor};
use log::{debug, info, warn};
use reqwest::Client;

const ERROR_BODY_PREVIEW: usize = 1000;

/// Downloads every page of an observations query.
pub struct ObservationFetcher {
    client: Client,
    endpoint: String,
    client_id: Option<String>,
}

impl ObservationFetcher {
    pub fn new(config: &FrostConfig) -> Result<Self, ObservationError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ObservationError::NetworkRequest(config.endpoint.clone(), e))?;
        if config.client_id.is_none() {
            warn!("No Frost client id configured; requests will be sent without credentials");
        }
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            client_id: config.client_id.clone(),
        })
    }

    /// Follows `page.next` until the last page and returns all rows in response order.
    pub async fn fetch(
        &self,
        query: &ObservationQuery,
    ) -> Result<Vec<ObservationRow>, ObservationError> {
        let mut rows = Vec::new();
        let mut cursor = PageCursor::first();
        loop {
            let page = self.fetch_page(query, cursor).await?;
            let has_next = page.has_next();
            rows.extend(page.into_rows()?);
            if !has_next {
                break;
            }
            cursor = cursor.advance();
        }
        info!(
            "Fetched {} observations for sources '{}' elements '{}'",
            rows.len(),
            query.sources,
            query.elements
        );
        Ok(rows)
    }

    async fn fetch_page(
        &self,
        query: &ObservationQuery,
        cursor: PageCursor,
    ) -> Result<ObservationsPage, ObservationError> {
        let mut request = self
            .client
            .get(&self.endpoint)
            .query(&query.params(cursor.page()));
        if let Some(client_id) = &self.client_id {
            request = request.basic_auth(client_id, Some(""));
        }

        let response = request
            .send()
            .await
            .map_err(|e| ObservationError::NetworkRequest(self.endpoint.clone(), e))?;
        let url = response.url().to_string();
        let status = response.status();
        debug!("GET {} -> {}", url, status);

        if !status.is_success() {
            // Frost explains rejected queries in the body.
            let body: String = match response.text().await {
                Ok(text) => text.chars().take(ERROR_BODY_PREVIEW).collect(),
                Err(e) => {
                    debug!("Failed to read error body from {}: {}", url, e);
                    String::new()
                }
            };
            warn!("HTTP error for {}: {} {}", url, status, body);
            return Err(ObservationError::HttpStatus { url, status, body });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ObservationError::NetworkRequest(url.clone(), e))?;
        serde_json::from_slice(&bytes).map_err(|source| ObservationError::JsonParse { url, source })
    }
}
