//! Match fetching with rate-limit backoff

use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};

use super::sink::EventSink;
use crate::common::errors::{ClientError, Result};
use crate::common::traits::MatchSource;
use crate::common::types::Region;
use crate::config::types::AppSettings;
use crate::riot::messages::MatchRecord;

/// How rate-limited requests are retried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Wait used when the server gives no usable delay
    pub fallback_delay: Duration,
    /// Rate-limited attempts tolerated per match; `None` retries forever
    pub max_retries: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            fallback_delay: Duration::from_secs(1),
            max_retries: None,
        }
    }
}

impl RetryPolicy {
    pub fn from_settings(settings: &AppSettings) -> Self {
        Self {
            fallback_delay: Duration::from_secs(settings.default_retry_after_seconds.max(1)),
            max_retries: match settings.max_rate_limit_retries {
                0 => None,
                n => Some(n),
            },
        }
    }

    /// Delay to honour for a `Retry-After` value; zero counts as absent
    pub fn delay_for(&self, retry_after_seconds: Option<u64>) -> Duration {
        match retry_after_seconds {
            Some(seconds) if seconds > 0 => Duration::from_secs(seconds),
            _ => self.fallback_delay,
        }
    }
}

/// Fetches match records, sleeping through 429 responses
pub struct RateLimitedFetcher {
    source: Arc<dyn MatchSource>,
    policy: RetryPolicy,
}

impl RateLimitedFetcher {
    pub fn new(source: Arc<dyn MatchSource>, policy: RetryPolicy) -> Self {
        Self { source, policy }
    }

    /// Fetch one match, retrying the same request while rate limited.
    ///
    /// Every wait is announced on `sink` as a status event. Any other error
    /// is returned immediately.
    #[instrument(skip(self, sink))]
    pub async fn fetch(
        &self,
        match_id: &str,
        region: Region,
        sink: &EventSink,
    ) -> Result<MatchRecord> {
        let mut rate_limited = 0u32;

        loop {
            match self.source.fetch_match_detail(match_id, region).await {
                Ok(record) => return Ok(record),
                Err(e) if e.is_recoverable() => {
                    rate_limited += 1;
                    if let Some(max) = self.policy.max_retries {
                        if rate_limited > max {
                            return Err(ClientError::RetriesExhausted {
                                attempts: rate_limited,
                            });
                        }
                    }

                    let delay = self.policy.delay_for(e.retry_after_seconds());
                    info!(
                        "Rate limited. Retrying after {} seconds...",
                        delay.as_secs()
                    );
                    sink.status(format!(
                        "Rate limited. Retrying in {}s...",
                        delay.as_secs()
                    ))
                    .await?;
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
