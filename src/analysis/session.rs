//! One analysis run for one client request

use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use super::aggregate::AggregateState;
use super::fetcher::{RateLimitedFetcher, RetryPolicy};
use super::finalize::{finalize, AnalysisSummary};
use super::lister::MatchIdLister;
use super::protocol::StartAnalysis;
use super::sink::EventSink;
use crate::common::errors::{ClientError, Result};
use crate::common::traits::MatchSource;
use crate::common::types::{MatchId, Region};
use crate::config::types::AppSettings;

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    FetchingIds,
    Processing,
    Finalizing,
    /// Sent exactly one `complete` event
    Complete,
    /// Sent exactly one `error` event
    Aborted,
    /// Client went away; nothing terminal was sent
    Cancelled,
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SessionState::Complete | SessionState::Aborted | SessionState::Cancelled
        )
    }
}

/// Sequential fetch-and-fold over a player's matches.
///
/// Each session owns its aggregate; nothing is shared between sessions
/// except the remote rate limit.
pub struct AnalysisSession {
    source: Arc<dyn MatchSource>,
    fetcher: RateLimitedFetcher,
    throttle: Duration,
    cancel: CancellationToken,
    state: SessionState,
}

impl AnalysisSession {
    pub fn new(
        source: Arc<dyn MatchSource>,
        settings: &AppSettings,
        cancel: CancellationToken,
    ) -> Self {
        Self::with_policy(
            source,
            RetryPolicy::from_settings(settings),
            settings.match_throttle(),
            cancel,
        )
    }

    pub fn with_policy(
        source: Arc<dyn MatchSource>,
        policy: RetryPolicy,
        throttle: Duration,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            fetcher: RateLimitedFetcher::new(source.clone(), policy),
            source,
            throttle,
            cancel,
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    fn transition(&mut self, next: SessionState) {
        debug!("Session state {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Analyze a pre-listed sequence of matches
    #[instrument(skip_all, fields(puuid = %request.puuid, region = %request.region, matches = request.match_ids.len()))]
    pub async fn run(mut self, request: &StartAnalysis, sink: EventSink) -> SessionState {
        let cancel = self.cancel.clone();
        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ClientError::Cancelled),
            _ = sink.closed() => Err(ClientError::Cancelled),
            result = self.process(&request.match_ids, &request.puuid, request.region, &sink) => result,
        };
        self.finish(outcome, sink).await
    }

    /// List this season's matches first, then analyze them
    #[instrument(skip(self, sink))]
    pub async fn run_for_player(
        mut self,
        puuid: &str,
        region: Region,
        sink: EventSink,
    ) -> SessionState {
        let cancel = self.cancel.clone();
        let lister = MatchIdLister::new(self.source.clone());
        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ClientError::Cancelled),
            _ = sink.closed() => Err(ClientError::Cancelled),
            result = async {
                self.transition(SessionState::FetchingIds);
                let match_ids = lister.list(puuid, region).await?;
                self.process(&match_ids, puuid, region, &sink).await
            } => result,
        };
        self.finish(outcome, sink).await
    }

    async fn process(
        &mut self,
        match_ids: &[MatchId],
        puuid: &str,
        region: Region,
        sink: &EventSink,
    ) -> Result<AnalysisSummary> {
        self.transition(SessionState::Processing);

        let total = match_ids.len();
        let mut aggregate = AggregateState::new();

        for (index, match_id) in match_ids.iter().enumerate() {
            let record = self.fetcher.fetch(match_id, region, sink).await?;
            if !aggregate.fold(&record, puuid) {
                debug!("Player not found in match {}, skipping", match_id);
            }

            sink.progress(index + 1, total).await?;
            tokio::time::sleep(self.throttle).await;
        }

        self.transition(SessionState::Finalizing);
        Ok(finalize(&aggregate))
    }

    async fn finish(mut self, outcome: Result<AnalysisSummary>, sink: EventSink) -> SessionState {
        match outcome {
            Ok(summary) => match sink.complete(summary).await {
                Ok(()) => {
                    info!("Analysis complete");
                    self.transition(SessionState::Complete);
                }
                Err(e) => {
                    warn!("Could not deliver completion: {}", e);
                    self.transition(SessionState::Cancelled);
                }
            },
            Err(ClientError::Cancelled) | Err(ClientError::ChannelSend(_)) => {
                info!("Client disconnected, stopping analysis");
                self.transition(SessionState::Cancelled);
            }
            Err(e) => {
                error!("Error during match processing: {}", e);
                if let Err(send_err) = sink.error().await {
                    warn!("Could not deliver error event: {}", send_err);
                }
                self.transition(SessionState::Aborted);
            }
        }
        self.state
    }
}
