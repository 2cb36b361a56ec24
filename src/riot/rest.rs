//! REST API client for the Riot match-v5 endpoints

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

use super::messages::MatchRecord;
use crate::common::errors::{ClientError, Result};
use crate::common::traits::MatchSource;
use crate::common::types::{MatchId, Region};
use crate::config::types::RiotConfig;

/// Header carrying the API key
const RIOT_TOKEN_HEADER: &str = "X-Riot-Token";

/// REST API client for Riot match data
#[derive(Debug, Clone)]
pub struct RiotRestClient {
    /// HTTP client
    client: Client,
    /// API key sent on every request
    api_key: String,
    /// Fixed host used instead of the regional one when set
    base_url: Option<String>,
}

impl RiotRestClient {
    /// Create a new REST client using the regional Riot hosts
    pub fn new(api_key: &str) -> Result<Self> {
        Self::with_timeout(api_key, None, Duration::from_secs(30))
    }

    /// Create a new REST client with a host override and custom timeout
    pub fn with_timeout(api_key: &str, base_url: Option<&str>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Internal(e.to_string()))?;

        let base_url = match base_url {
            Some(url) => {
                Url::parse(url)
                    .map_err(|e| ClientError::Configuration(format!("Invalid base URL: {}", e)))?;
                Some(url.trim_end_matches('/').to_string())
            }
            None => None,
        };

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url,
        })
    }

    /// Build a client from configuration
    pub fn from_config(config: &RiotConfig, timeout: Duration) -> Result<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .ok_or_else(|| ClientError::Configuration("RIOT_API_KEY is not set".to_string()))?;
        Self::with_timeout(api_key, config.base_url.as_deref(), timeout)
    }

    /// Host serving the given region
    fn regional_url(&self, region: Region) -> String {
        match &self.base_url {
            Some(url) => url.clone(),
            None => format!("https://{}.api.riotgames.com", region.as_str()),
        }
    }

    /// Map a non-success response onto the error taxonomy
    async fn check_status(response: Response, resource: &str) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        match status {
            StatusCode::NOT_FOUND => Err(ClientError::NotFound(resource.to_string())),
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after_seconds = response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.trim().parse::<u64>().ok());
                warn!("Rate limited on {} (retry-after {:?})", resource, retry_after_seconds);
                Err(ClientError::RateLimit {
                    message: format!("Rate limited on {}", resource),
                    retry_after_seconds,
                })
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ClientError::Authentication(
                format!("Invalid API key (status {})", status.as_u16()),
            )),
            _ => {
                let body = response.text().await.unwrap_or_default();
                Err(ClientError::HttpStatus {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }

    /// Get the detail record of one match
    #[instrument(skip(self))]
    pub async fn get_match(&self, match_id: &str, region: Region) -> Result<MatchRecord> {
        let url = format!(
            "{}/lol/match/v5/matches/{}",
            self.regional_url(region),
            match_id
        );
        debug!("Fetching match from: {}", url);

        let response = self
            .client
            .get(&url)
            .header(RIOT_TOKEN_HEADER, &self.api_key)
            .send()
            .await?;
        let response = Self::check_status(response, match_id).await?;

        let record: MatchRecord = response.json().await?;
        Ok(record)
    }

    /// Get one page of a player's match ids
    #[instrument(skip(self))]
    pub async fn get_match_ids(
        &self,
        puuid: &str,
        region: Region,
        start_time: i64,
        start: u32,
        count: u32,
    ) -> Result<Vec<MatchId>> {
        let url = format!(
            "{}/lol/match/v5/matches/by-puuid/{}/ids",
            self.regional_url(region),
            puuid
        );
        debug!("Fetching match ids from: {} (start={}, count={})", url, start, count);

        let response = self
            .client
            .get(&url)
            .header(RIOT_TOKEN_HEADER, &self.api_key)
            .query(&[
                ("startTime", start_time.to_string()),
                ("start", start.to_string()),
                ("count", count.to_string()),
            ])
            .send()
            .await?;
        let response = Self::check_status(response, puuid).await?;

        let ids: Vec<MatchId> = response.json().await?;
        Ok(ids)
    }
}

#[async_trait]
impl MatchSource for RiotRestClient {
    async fn fetch_match_detail(&self, match_id: &str, region: Region) -> Result<MatchRecord> {
        self.get_match(match_id, region).await
    }

    async fn list_match_ids(
        &self,
        puuid: &str,
        region: Region,
        start_time: i64,
        offset: u32,
        count: u32,
    ) -> Result<Vec<MatchId>> {
        self.get_match_ids(puuid, region, start_time, offset, count)
            .await
    }
}
