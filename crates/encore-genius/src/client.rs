// SPDX-License-Identifier: GPL-3.0-or-later

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info, trace, warn};
use url::Url;

use crate::error::{GeniusError, Result};
use crate::models::{Artist, ArtistResponse, LookupRow, LookupTable, SearchResponse};

const GENIUS_API_BASE: &str = "https://api.genius.com";

/// Genius API client.
///
/// Holds the bearer credential and base URL and nothing else; every call is
/// stateless relative to prior calls.
#[derive(Debug, Clone)]
pub struct GeniusClient {
    client: Client,
    base_url: String,
    auth_header: String,
}

impl GeniusClient {
    /// Create a client with default settings for the given access token.
    ///
    /// The token is used as-is to build the `Authorization: Bearer` header;
    /// no format validation is applied.
    pub fn new(access_token: impl Into<String>) -> Result<Self> {
        Self::builder().build(access_token)
    }

    /// Create a client builder for custom configuration.
    pub fn builder() -> GeniusClientBuilder {
        GeniusClientBuilder::default()
    }

    /// Search Genius for a term.
    ///
    /// # Example
    /// ```no_run
    /// # use encore_genius::GeniusClient;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = GeniusClient::new("token")?;
    /// let response = client.search("Drake").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn search(&self, term: &str) -> Result<SearchResponse> {
        let mut url = Url::parse(&format!("{}/search", self.base_url))
            .map_err(|e| GeniusError::InvalidResponse(e.to_string()))?;

        url.query_pairs_mut().append_pair("q", term);

        self.get(url.as_str()).await
    }

    /// Fetch the full artist record for a Genius artist id.
    pub async fn artist(&self, id: u64) -> Result<ArtistResponse> {
        let url = format!("{}/artists/{}", self.base_url, id);
        self.get(&url).await
    }

    /// Resolve an artist name to its full record.
    ///
    /// Best-effort: transport failures, non-2xx statuses, unexpected payload
    /// shapes, and empty hit lists are all logged and collapsed to `None`;
    /// nothing propagates to the caller.
    pub async fn resolve_artist(&self, term: &str) -> Option<Artist> {
        info!(target: "genius", "searching for artist '{}'", term);

        let search = match self.search(term).await {
            Ok(search) => search,
            Err(e) => {
                warn!(target: "genius", "search for '{}' failed: {}", term, e);
                return None;
            }
        };

        let Some(hit) = search.response.hits.first() else {
            info!(target: "genius", "artist '{}' not found", term);
            return None;
        };

        let primary = &hit.result.primary_artist;
        info!(target: "genius", "found artist id {} ({})", primary.id, primary.name);

        match self.artist(primary.id).await {
            Ok(payload) => match payload.response.artist {
                Some(artist) => Some(artist),
                None => {
                    warn!(
                        target: "genius",
                        "artist payload for '{}' has no artist object", term
                    );
                    None
                }
            },
            Err(e) => {
                warn!(target: "genius", "artist fetch for '{}' failed: {}", term, e);
                None
            }
        }
    }

    /// Resolve a batch of artist names, strictly sequentially.
    ///
    /// Returns one row per term, in input order, with no deduplication.
    /// Individual failures produce a row with empty artist fields and never
    /// abort the batch; an empty input yields an empty table.
    pub async fn resolve_artists<S: AsRef<str>>(&self, terms: &[S]) -> LookupTable {
        let mut table = LookupTable::default();

        for term in terms {
            let term = term.as_ref();
            let row = match self.resolve_artist(term).await {
                Some(artist) => LookupRow::resolved(term, &artist),
                None => LookupRow::unresolved(term),
            };
            table.push(row);
            debug!(target: "genius", "--------------------");
        }

        table
    }

    /// Internal method to perform authenticated GET requests.
    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        trace!(target: "genius", "GET {}", url);

        let response = self
            .client
            .get(url)
            .header("Authorization", &self.auth_header)
            .send()
            .await?;

        let status = response.status();
        debug!(target: "genius", "response status: {}", status);

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GeniusError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        trace!(target: "genius", "response body: {}", body);

        serde_json::from_str(&body).map_err(|e| {
            GeniusError::InvalidResponse(format!("Failed to parse response: {}", e))
        })
    }
}

/// Builder for configuring a Genius client.
#[derive(Debug)]
pub struct GeniusClientBuilder {
    base_url: String,
    timeout: Duration,
}

impl Default for GeniusClientBuilder {
    fn default() -> Self {
        Self {
            base_url: GENIUS_API_BASE.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl GeniusClientBuilder {
    /// Set a custom base URL (useful for testing with mock servers).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout duration.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the client with the given access token.
    pub fn build(self, access_token: impl Into<String>) -> Result<GeniusClient> {
        let client = Client::builder().timeout(self.timeout).build()?;

        Ok(GeniusClient {
            client,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            auth_header: format!("Bearer {}", access_token.into()),
        })
    }
}
