//! Trait definitions for the remote match platform

use async_trait::async_trait;

use super::errors::Result;
use super::types::{MatchId, Region};
use crate::riot::messages::MatchRecord;

/// Source of match data (the Riot REST API in production)
///
/// Implementations surface HTTP failures as the matching `ClientError`
/// kind: `RateLimit`, `NotFound`, `Authentication`, `HttpStatus`, or
/// `HttpRequest` for transport problems. Retrying is the caller's job.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MatchSource: Send + Sync {
    /// Fetch the full detail record of one match
    async fn fetch_match_detail(&self, match_id: &str, region: Region) -> Result<MatchRecord>;

    /// Fetch one page of match ids for a player, newest first
    ///
    /// # Arguments
    /// * `start_time` - Epoch seconds; only matches after this are listed
    /// * `offset` - Index of the first id to return
    /// * `count` - Page size (the API caps it at 100)
    async fn list_match_ids(
        &self,
        puuid: &str,
        region: Region,
        start_time: i64,
        offset: u32,
        count: u32,
    ) -> Result<Vec<MatchId>>;
}
