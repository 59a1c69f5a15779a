use std::time::Duration;

use log::{debug, error, info};
use reqwest::Client;

use crate::api::{SearchEnvelope, SongRecord};
use crate::config::AdapterConfig;
use crate::errors::{AppError, Result};

/// Client for the remote song-search endpoint.
///
/// One GET per call, no retries: a failed or empty search surfaces as an
/// error the facade maps to its "not found" outcome.
#[derive(Debug, Clone)]
pub struct SearchClient {
    client: Client,
    base_url: String,
}

impl SearchClient {
    pub fn new(config: &AdapterConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.as_str());

        if let Some(proxy_url) = &config.proxy {
            if let Ok(proxy) = reqwest::Proxy::all(proxy_url) {
                builder = builder.proxy(proxy);
            }
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.api_base_url.clone(),
        })
    }

    /// Runs a free-text search and returns the result records.
    ///
    /// The query is passed through opaquely; links are handed to the service
    /// as-is and it resolves them on its side.
    pub async fn search(&self, query: &str) -> Result<Vec<SongRecord>> {
        if query.contains("http") {
            debug!("🔗 [SEARCH] Query looks like a link, passing through: {}", query);
        }

        let search_url = format!("{}?query={}", self.base_url, urlencoding::encode(query));
        info!("🔍 [SEARCH] Searching: {}", query);

        let response = self.client.get(&search_url).send().await?;

        if !response.status().is_success() {
            error!("❌ [SEARCH] API error: {}", response.status());
            return Err(AppError::Search(format!(
                "search request failed with status {}",
                response.status()
            )));
        }

        let envelope: SearchEnvelope = response.json().await?;
        let results = extract_results(envelope, query)?;

        info!("✅ [SEARCH] Found {} results", results.len());
        Ok(results)
    }

    /// First record for a query.
    pub async fn first(&self, query: &str) -> Result<SongRecord> {
        let mut results = self.search(query).await?;
        Ok(results.swap_remove(0))
    }

    /// Record at `index`, clamped to the first record when out of range.
    pub async fn at_index(&self, query: &str, index: usize) -> Result<SongRecord> {
        let mut results = self.search(query).await?;
        let idx = clamped_index(results.len(), index);
        Ok(results.swap_remove(idx))
    }
}

/// Unwraps a search envelope into its result records. A failure flag or an
/// empty result list both count as "not found".
fn extract_results(envelope: SearchEnvelope, query: &str) -> Result<Vec<SongRecord>> {
    if !envelope.success {
        error!("❌ [SEARCH] Service reported failure for query: {}", query);
        return Err(AppError::NotFound(format!("no results for '{}'", query)));
    }

    let results = envelope.data.map(|d| d.results).unwrap_or_default();
    if results.is_empty() {
        error!("❌ [SEARCH] No results found for query: {}", query);
        return Err(AppError::NotFound(format!("no results for '{}'", query)));
    }

    Ok(results)
}

/// Out-of-range indices fall back to the first result.
pub fn clamped_index(len: usize, index: usize) -> usize {
    if index < len {
        index
    } else {
        0
    }
}
