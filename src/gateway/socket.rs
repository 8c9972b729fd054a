use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket};
use futures::stream::StreamExt;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

/// Simple WebSocket abstraction - all we care about is send/receive
#[async_trait]
pub trait SocketWrapper: Send {
    /// Send a text frame to the adapter
    async fn send_message(&mut self, message: String) -> Result<(), SocketError>;

    /// Receive the next text frame (None if connection closed)
    async fn receive_message(&mut self) -> Result<Option<String>, SocketError>;

    async fn close(&mut self) -> Result<(), SocketError>;
}

/// Handler for frames arriving from the platform adapter
#[async_trait]
pub trait FrameHandler: Send + Sync {
    /// Handle an incoming frame; a returned string is written straight back
    /// to the same connection
    async fn handle_frame(&self, platform: &str, frame: String) -> Option<String>;
}

#[derive(Debug)]
pub enum SocketError {
    SendFailed(String),
    ReceiveFailed(String),
}

/// Direct implementation on axum's WebSocket
#[async_trait]
impl SocketWrapper for WebSocket {
    async fn send_message(&mut self, message: String) -> Result<(), SocketError> {
        self.send(Message::Text(message))
            .await
            .map_err(|e| SocketError::SendFailed(e.to_string()))
    }

    async fn receive_message(&mut self) -> Result<Option<String>, SocketError> {
        loop {
            match self.next().await {
                Some(Ok(Message::Text(text))) => return Ok(Some(text)),
                Some(Ok(Message::Close(_))) => return Ok(None),
                Some(Ok(_)) => continue, // Ignore binary/ping/pong
                Some(Err(e)) => return Err(SocketError::ReceiveFailed(e.to_string())),
                None => return Ok(None),
            }
        }
    }

    async fn close(&mut self) -> Result<(), SocketError> {
        self.send(Message::Close(None))
            .await
            .map_err(|e| SocketError::SendFailed(e.to_string()))
    }
}

/// A managed gateway connection
///
/// Outbound frames arrive through the receiver registered with the
/// ConnectionManager; inbound frames go to the frame handler.
pub struct Connection {
    pub connection_id: String,
    pub platform: String,
    socket: Box<dyn SocketWrapper>,
    outbound_receiver: mpsc::UnboundedReceiver<String>,
    frame_handler: Arc<dyn FrameHandler>,
}

impl Connection {
    pub fn new(
        connection_id: String,
        platform: String,
        socket: Box<dyn SocketWrapper>,
        outbound_receiver: mpsc::UnboundedReceiver<String>,
        frame_handler: Arc<dyn FrameHandler>,
    ) -> Self {
        Self {
            connection_id,
            platform,
            socket,
            outbound_receiver,
            frame_handler,
        }
    }

    /// Run the connection until either side hangs up
    pub async fn run(mut self) -> Result<(), SocketError> {
        loop {
            tokio::select! {
                msg = self.outbound_receiver.recv() => {
                    match msg {
                        Some(frame) => self.socket.send_message(frame).await?,
                        None => {
                            // Sender dropped: a newer gateway replaced this one
                            debug!(connection_id = %self.connection_id, "Outbound channel closed");
                            break;
                        }
                    }
                }

                msg = self.socket.receive_message() => {
                    match msg {
                        Ok(Some(frame)) => {
                            if let Some(response) = self
                                .frame_handler
                                .handle_frame(&self.platform, frame)
                                .await
                            {
                                self.socket.send_message(response).await?;
                            }
                        }
                        Ok(None) => break,
                        Err(e) => return Err(e),
                    }
                }
            }
        }

        let _ = self.socket.close().await;
        Ok(())
    }
}
