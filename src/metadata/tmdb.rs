/*!
 * TMDB v3 catalog client.
 *
 * Searches go to `/search/movie` and `/search/tv`, detail records come from
 * `/movie/{id}` and `/tv/{id}`. The key travels as the `api_key` query
 * parameter.
 */

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::errors::MetadataError;
use super::{Catalog, CatalogCandidate, CatalogDetails, EntryKind};

/// TMDB v3 catalog client
#[derive(Debug)]
pub struct TmdbClient {
    /// HTTP client for API requests
    client: Client,
    /// API key, sent as the `api_key` query parameter
    api_key: String,
    /// Base URL, e.g. `https://api.themoviedb.org/3`
    endpoint: String,
    /// Language of detail records, e.g. `en-US`
    language: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

/// Movies carry `title`, TV shows carry `name`
#[derive(Debug, Deserialize)]
struct SearchResult {
    id: u64,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    overview: Option<String>,
}

impl TmdbClient {
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        language: impl Into<String>,
        timeout_secs: u64,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            language: language.into(),
        }
    }

    fn search_url(&self, title: &str, kind: EntryKind) -> Result<Url, MetadataError> {
        let path = match kind {
            EntryKind::Film => "search/movie",
            EntryKind::Series => "search/tv",
        };
        let url = Url::parse_with_params(
            &format!("{}/{}", self.endpoint, path),
            &[("api_key", self.api_key.as_str()), ("query", title)],
        )?;
        Ok(url)
    }

    fn details_url(&self, id: u64, kind: EntryKind) -> Result<Url, MetadataError> {
        let path = match kind {
            EntryKind::Film => "movie",
            EntryKind::Series => "tv",
        };
        let url = Url::parse_with_params(
            &format!("{}/{}/{}", self.endpoint, path, id),
            &[("api_key", self.api_key.as_str()), ("language", self.language.as_str())],
        )?;
        Ok(url)
    }

    async fn get_body(&self, url: Url) -> Result<String, MetadataError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(MetadataError::Status {
                status_code: status.as_u16(),
                message: body,
            });
        }
        Ok(body)
    }
}

/// Parse a search body into ranked candidates
pub fn parse_search(body: &str) -> Result<Vec<CatalogCandidate>, MetadataError> {
    let response: SearchResponse =
        serde_json::from_str(body).map_err(|e| MetadataError::Parse(e.to_string()))?;

    Ok(response
        .results
        .into_iter()
        .map(|result| CatalogCandidate {
            id: result.id,
            title: result.title.or(result.name).unwrap_or_default(),
        })
        .collect())
}

/// Parse a movie or TV detail body
pub fn parse_details(body: &str) -> Result<CatalogDetails, MetadataError> {
    let response: DetailsResponse =
        serde_json::from_str(body).map_err(|e| MetadataError::Parse(e.to_string()))?;

    Ok(CatalogDetails {
        title: response.title.or(response.name).unwrap_or_default(),
        overview: response.overview.unwrap_or_default(),
    })
}

#[async_trait]
impl Catalog for TmdbClient {
    async fn search(&self, title: &str, kind: EntryKind) -> Result<Vec<CatalogCandidate>, MetadataError> {
        debug!("Searching TMDB for {} '{}'", kind, title);
        let body = self.get_body(self.search_url(title, kind)?).await?;
        parse_search(&body)
    }

    async fn details(&self, id: u64, kind: EntryKind) -> Result<CatalogDetails, MetadataError> {
        debug!("Fetching TMDB {} details for id {}", kind, id);
        let body = self.get_body(self.details_url(id, kind)?).await?;
        parse_details(&body)
    }
}
