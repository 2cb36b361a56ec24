//! Server module - WebSocket push channel for analysis sessions

pub mod websocket;

pub use websocket::AnalysisServer;
