//! Channel type definitions for inter-task communication

use tokio::sync::mpsc;

use crate::analysis::protocol::ServerMessage;

/// Default channel buffer size
pub const DEFAULT_CHANNEL_SIZE: usize = 1000;

/// Create a new session event channel with the default buffer size
pub fn create_event_channel() -> (mpsc::Sender<ServerMessage>, mpsc::Receiver<ServerMessage>) {
    mpsc::channel(DEFAULT_CHANNEL_SIZE)
}
