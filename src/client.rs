use anyhow::{Context, Result};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::SearchError;
use crate::models::JobRecord;
use crate::query::SearchQuery;

const SEARCH_ENDPOINT: &str = "/search";

// --- Source trait ---

/// Anything that can answer a search query with one page of raw records.
pub trait JobSource {
    fn search(&self, query: &SearchQuery, credential: &str) -> Result<Vec<JobRecord>, SearchError>;
}

// --- JSearch over RapidAPI ---

#[derive(Debug)]
pub struct JSearchClient {
    base_url: String,
    api_host: String,
    client: reqwest::blocking::Client,
}

impl JSearchClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("Failed to build HTTP client")?;
        Ok(Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_host: config.api_host.clone(),
            client,
        })
    }
}

impl JobSource for JSearchClient {
    fn search(&self, query: &SearchQuery, credential: &str) -> Result<Vec<JobRecord>, SearchError> {
        let url = format!("{}{}", self.base_url, SEARCH_ENDPOINT);
        debug!(%url, query = %query.query, page = query.page, "Sending search request");

        let response = self
            .client
            .get(&url)
            .query(&query.params())
            .header("x-rapidapi-key", credential)
            .header("x-rapidapi-host", &self.api_host)
            .send()
            .map_err(|e| SearchError::NetworkError(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| SearchError::NetworkError(e.to_string()))?;
        debug!(status, bytes = body.len(), "Received search response");

        classify_response(status, &body)
    }
}

/// Maps a settled HTTP exchange onto the search outcome.
pub fn classify_response(status: u16, body: &str) -> Result<Vec<JobRecord>, SearchError> {
    match status {
        200..=299 => {}
        401 | 403 => return Err(SearchError::InvalidCredential),
        429 => return Err(SearchError::RateLimited),
        other => return Err(SearchError::RemoteError(other)),
    }

    let payload: Value =
        serde_json::from_str(body).map_err(|e| SearchError::MalformedResponse(e.to_string()))?;

    let items = match payload.get("data") {
        None | Some(Value::Null) => return Err(SearchError::NoResults),
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(SearchError::MalformedResponse(
                "`data` is not an array".to_string(),
            ));
        }
    };

    let jobs: Vec<JobRecord> = items
        .iter()
        .filter_map(|item| match serde_json::from_value(item.clone()) {
            Ok(job) => Some(job),
            Err(e) => {
                warn!("Skipping unreadable job record: {}", e);
                None
            }
        })
        .collect();

    if jobs.is_empty() {
        return Err(SearchError::NoResults);
    }
    Ok(jobs)
}
