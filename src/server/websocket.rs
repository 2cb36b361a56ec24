//! WebSocket push channel serving analysis sessions

use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_tungstenite::{accept_async, tungstenite::protocol::Message};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use crate::analysis::protocol::{parse_client_message, ClientMessage, ServerMessage};
use crate::analysis::session::AnalysisSession;
use crate::analysis::sink::EventSink;
use crate::common::channels::create_event_channel;
use crate::common::errors::{ClientError, Result};
use crate::common::traits::MatchSource;
use crate::config::types::AppSettings;

/// Accepts client connections and runs one session per `startAnalysis`
#[derive(Clone)]
pub struct AnalysisServer {
    source: Arc<dyn MatchSource>,
    settings: AppSettings,
}

impl AnalysisServer {
    pub fn new(source: Arc<dyn MatchSource>, settings: AppSettings) -> Self {
        Self { source, settings }
    }

    /// Bind `address` and serve until the listener fails
    pub async fn run(self, address: &str) -> Result<()> {
        let listener = TcpListener::bind(address)
            .await
            .map_err(|e| ClientError::WebSocketConnection(format!("bind {}: {}", address, e)))?;
        info!("Server listening on {}", address);
        self.serve(listener).await
    }

    /// Serve connections from an already bound listener
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        loop {
            let (stream, peer) = listener
                .accept()
                .await
                .map_err(|e| ClientError::WebSocketConnection(e.to_string()))?;

            let server = self.clone();
            tokio::spawn(async move {
                if let Err(e) = server.handle_connection(stream, peer).await {
                    warn!("Connection {} ended with error: {}", peer, e);
                }
            });
        }
    }

    /// Drive one client connection.
    ///
    /// Sessions started on this connection are cancelled when it closes.
    #[instrument(skip(self, stream))]
    async fn handle_connection(&self, stream: TcpStream, peer: SocketAddr) -> Result<()> {
        let ws_stream = accept_async(stream)
            .await
            .map_err(|e| ClientError::WebSocketConnection(e.to_string()))?;
        info!("Client connected");

        let (mut write, mut read) = ws_stream.split();
        let (event_tx, mut event_rx) = create_event_channel();
        let cancel = CancellationToken::new();

        // Forward session events to the socket
        let writer_cancel = cancel.clone();
        let writer = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = writer_cancel.cancelled() => break,
                    event = event_rx.recv() => {
                        let Some(event) = event else { break };
                        let text = match event.to_json() {
                            Ok(text) => text,
                            Err(e) => {
                                error!("Failed to serialize event: {}", e);
                                continue;
                            }
                        };
                        if let Err(e) = write.send(Message::Text(text)).await {
                            warn!("Failed to send event: {}", e);
                            break;
                        }
                    }
                }
            }
            writer_cancel.cancel();
            let _ = write.close().await;
        });

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                msg = read.next() => match msg {
                    Some(Ok(Message::Text(text))) => {
                        self.handle_text(&text, &event_tx, &cancel);
                    }
                    Some(Ok(Message::Close(frame))) => {
                        debug!("Close frame: {:?}", frame);
                        break;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        warn!("WebSocket error: {}", e);
                        break;
                    }
                    None => break,
                }
            }
        }

        info!("Client disconnected");
        cancel.cancel();
        drop(event_tx);
        let _ = writer.await;
        Ok(())
    }

    fn handle_text(
        &self,
        text: &str,
        event_tx: &mpsc::Sender<ServerMessage>,
        cancel: &CancellationToken,
    ) {
        match parse_client_message(text) {
            Ok(ClientMessage::StartAnalysis(request)) => {
                info!(
                    "Starting analysis of {} matches for {}",
                    request.match_ids.len(),
                    request.puuid
                );
                let session =
                    AnalysisSession::new(self.source.clone(), &self.settings, cancel.child_token());
                let sink = EventSink::new(event_tx.clone());
                tokio::spawn(async move {
                    let state = session.run(&request, sink).await;
                    debug!("Session finished in state {:?}", state);
                });
            }
            Err(e) => warn!("Ignoring client message: {}", e),
        }
    }
}
