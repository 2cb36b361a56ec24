//! MatchInsights Library
//!
//! A Rust library that aggregates a Riot player's season matches into a
//! statistical summary, streaming progress to websocket clients.

pub mod analysis;
pub mod common;
pub mod config;
pub mod riot;
pub mod server;

// Re-export commonly used types
pub use common::errors::{ClientError, Result};
pub use common::traits::MatchSource;
pub use common::types::{MatchId, Region};
pub use config::types::AppConfig;
pub use riot::messages::{MatchRecord, Participant};
pub use riot::rest::RiotRestClient;
pub use server::AnalysisServer;

// Analysis types
pub use analysis::{
    finalize, AggregateState, AnalysisSession, AnalysisSummary, BestDuo, ClientMessage,
    EventSink, MatchIdLister, Persona, RateLimitedFetcher, RetryPolicy, ServerMessage,
    SessionState, StartAnalysis,
};
