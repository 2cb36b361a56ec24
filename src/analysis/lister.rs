//! Season match-id pagination

use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::common::errors::Result;
use crate::common::traits::MatchSource;
use crate::common::types::{MatchId, Region};

/// Ids requested per page (the API maximum)
pub const PAGE_SIZE: u32 = 100;

/// Epoch second of January 1st, 00:00, of `now`'s year in `now`'s timezone
pub fn season_start_timestamp<Tz: TimeZone>(now: &DateTime<Tz>) -> i64 {
    NaiveDate::from_ymd_opt(now.year(), 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| {
            now.timezone()
                .from_local_datetime(&midnight)
                .earliest()
                .map(|dt| dt.timestamp())
                .unwrap_or_else(|| midnight.and_utc().timestamp())
        })
        .unwrap_or_default()
}

/// Lists every match id a player has this season
pub struct MatchIdLister {
    source: Arc<dyn MatchSource>,
}

impl MatchIdLister {
    pub fn new(source: Arc<dyn MatchSource>) -> Self {
        Self { source }
    }

    /// List this season's ids using the local clock
    pub async fn list(&self, puuid: &str, region: Region) -> Result<Vec<MatchId>> {
        let start_time = season_start_timestamp(&Local::now());
        self.list_since(puuid, region, start_time).await
    }

    /// Request pages until one comes back short
    #[instrument(skip(self))]
    pub async fn list_since(
        &self,
        puuid: &str,
        region: Region,
        start_time: i64,
    ) -> Result<Vec<MatchId>> {
        let mut match_ids = Vec::new();
        let mut offset = 0;

        loop {
            let page = self
                .source
                .list_match_ids(puuid, region, start_time, offset, PAGE_SIZE)
                .await?;
            let page_len = page.len();
            debug!("Page at offset {} returned {} ids", offset, page_len);

            match_ids.extend(page);
            if page_len < PAGE_SIZE as usize {
                break;
            }
            offset += PAGE_SIZE;
        }

        info!("Listed {} matches since {}", match_ids.len(), start_time);
        Ok(match_ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::errors::ClientError;
    use crate::common::traits::MockMatchSource;
    use chrono::{FixedOffset, Utc};
    use mockall::predicate::eq;

    fn page(offset: u32, len: u32) -> Vec<MatchId> {
        (offset..offset + len).map(|i| format!("NA1_{}", i)).collect()
    }

    #[test]
    fn test_season_start_utc() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 15, 30, 0).unwrap();
        assert_eq!(season_start_timestamp(&now), 1_767_225_600);
    }

    #[test]
    fn test_season_start_respects_timezone() {
        let paris = FixedOffset::east_opt(3600).unwrap();
        let now = paris.with_ymd_and_hms(2026, 1, 1, 0, 30, 0).unwrap();
        assert_eq!(season_start_timestamp(&now), 1_767_225_600 - 3600);
    }

    #[tokio::test]
    async fn test_full_pages_request_one_more() {
        let mut source = MockMatchSource::new();
        for (offset, len) in [(0u32, 100u32), (100, 100), (200, 0)] {
            source
                .expect_list_match_ids()
                .with(
                    eq("player"),
                    eq(Region::Americas),
                    eq(42i64),
                    eq(offset),
                    eq(PAGE_SIZE),
                )
                .times(1)
                .returning(move |_, _, _, _, _| Ok(page(offset, len)));
        }

        let lister = MatchIdLister::new(Arc::new(source));
        let ids = lister
            .list_since("player", Region::Americas, 42)
            .await
            .unwrap();

        assert_eq!(ids.len(), 200);
        assert_eq!(ids.first().map(String::as_str), Some("NA1_0"));
        assert_eq!(ids.last().map(String::as_str), Some("NA1_199"));
    }

    #[tokio::test]
    async fn test_short_page_stops() {
        let mut source = MockMatchSource::new();
        source
            .expect_list_match_ids()
            .times(1)
            .returning(|_, _, _, _, _| Ok(page(0, 37)));

        let lister = MatchIdLister::new(Arc::new(source));
        let ids = lister.list_since("player", Region::Asia, 0).await.unwrap();
        assert_eq!(ids.len(), 37);
    }

    #[tokio::test]
    async fn test_page_error_propagates() {
        let mut source = MockMatchSource::new();
        source
            .expect_list_match_ids()
            .returning(|_, _, _, _, _| Err(ClientError::Authentication("forbidden".to_string())));

        let lister = MatchIdLister::new(Arc::new(source));
        let result = lister.list_since("player", Region::Asia, 0).await;
        assert!(matches!(result, Err(ClientError::Authentication(_))));
    }
}
