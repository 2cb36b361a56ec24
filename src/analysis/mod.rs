//! Analysis module - match aggregation pipeline
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    UP FRONT (once)                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  MatchIdLister                                              │
//! │    - Pages through this season's ids, 100 at a time         │
//! └─────────────────────────────────────────────────────────────┘
//!
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    SESSION (per request)                    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  for each match id, in order:                               │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  RateLimitedFetcher.fetch()  ── 429 → status, sleep, retry  │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  AggregateState.fold()                                      │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  progress event, throttle pause                             │
//! │                                                             │
//! │  finalize() → exactly one complete (or one error)           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Components
//!
//! - [`RateLimitedFetcher`]: fetches one match, waiting out rate limits
//! - [`MatchIdLister`]: season match-id pagination
//! - [`AggregateState`]: running totals for one player
//! - [`finalize`]: KDA, role, persona and duo derivation
//! - [`AnalysisSession`]: the per-request state machine
//! - [`EventSink`]: ordered delivery of [`ServerMessage`]s

pub mod aggregate;
pub mod fetcher;
pub mod finalize;
pub mod lister;
pub mod protocol;
pub mod session;
pub mod sink;

pub use aggregate::{AggregateState, GameHighlight, KdaHighlight, MultiKills, PartnerRecord};
pub use fetcher::{RateLimitedFetcher, RetryPolicy};
pub use finalize::{finalize, AnalysisSummary, BestDuo, Persona};
pub use lister::{season_start_timestamp, MatchIdLister, PAGE_SIZE};
pub use protocol::{parse_client_message, ClientMessage, ServerMessage, StartAnalysis};
pub use session::{AnalysisSession, SessionState};
pub use sink::EventSink;
