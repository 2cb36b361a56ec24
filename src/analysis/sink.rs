//! Ordered event delivery for one session

use tokio::sync::mpsc;
use tracing::debug;

use super::finalize::AnalysisSummary;
use super::protocol::{ServerMessage, ANALYSIS_FAILED_MESSAGE};
use crate::common::errors::{ClientError, Result};

/// Writes a session's events to its client channel, in order.
///
/// The terminal methods consume the sink, so a session can emit at most
/// one of `complete` or `error`.
#[derive(Debug)]
pub struct EventSink {
    sender: mpsc::Sender<ServerMessage>,
}

impl EventSink {
    pub fn new(sender: mpsc::Sender<ServerMessage>) -> Self {
        Self { sender }
    }

    async fn send(&self, message: ServerMessage) -> Result<()> {
        debug!("Sending event: {:?}", message);
        self.sender
            .send(message)
            .await
            .map_err(|e| ClientError::ChannelSend(e.to_string()))
    }

    pub async fn status(&self, message: impl Into<String>) -> Result<()> {
        self.send(ServerMessage::Status {
            message: message.into(),
        })
        .await
    }

    pub async fn progress(&self, processed: usize, total: usize) -> Result<()> {
        self.send(ServerMessage::Progress { processed, total }).await
    }

    pub async fn complete(self, summary: AnalysisSummary) -> Result<()> {
        self.send(ServerMessage::Complete { data: summary }).await
    }

    pub async fn error(self) -> Result<()> {
        self.send(ServerMessage::Error {
            message: ANALYSIS_FAILED_MESSAGE.to_string(),
        })
        .await
    }

    /// Resolves once the receiving side has gone away
    pub async fn closed(&self) {
        self.sender.closed().await
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}
