//! Push-channel message envelopes

use serde::{Deserialize, Serialize};

use super::finalize::AnalysisSummary;
use crate::common::errors::{ClientError, Result};
use crate::common::types::{MatchId, Region};

/// Message sent to the client on any aborted session
pub const ANALYSIS_FAILED_MESSAGE: &str = "Failed to analyze matches";

/// Outbound events, serialized as `{"type": ..., ...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMessage {
    /// Informational notice, e.g. a rate-limit wait
    Status { message: String },
    /// One per processed match
    Progress { processed: usize, total: usize },
    /// Terminal success
    Complete { data: AnalysisSummary },
    /// Terminal failure
    Error { message: String },
}

impl ServerMessage {
    /// Whether this event ends its session
    pub fn is_terminal(&self) -> bool {
        matches!(self, ServerMessage::Complete { .. } | ServerMessage::Error { .. })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Inbound control messages, serialized as `{"type": ..., "payload": ...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum ClientMessage {
    StartAnalysis(StartAnalysis),
}

/// Request to analyze a pre-listed sequence of matches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartAnalysis {
    pub match_ids: Vec<MatchId>,
    pub puuid: String,
    pub region: Region,
}

/// Parse a text frame from the client
///
/// Anything that is not a complete, known control message is rejected
/// as `MalformedMessage`.
pub fn parse_client_message(text: &str) -> Result<ClientMessage> {
    let message: ClientMessage =
        serde_json::from_str(text).map_err(|e| ClientError::MalformedMessage(e.to_string()))?;

    match &message {
        ClientMessage::StartAnalysis(request) if request.puuid.trim().is_empty() => Err(
            ClientError::MalformedMessage("startAnalysis without puuid".to_string()),
        ),
        _ => Ok(message),
    }
}
