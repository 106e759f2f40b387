//! In-process [`MessageChannel`] used to drive a session without a socket.
//!
//! The peer side speaks raw JSON text inbound, so the same decoding path as a
//! real transport is exercised, and receives typed [`OutboundMessage`]s back.

use super::{ChannelError, MessageChannel};
use crate::message::{InboundMessage, OutboundMessage};
use tokio::sync::{Mutex, mpsc};

/// Server-facing half of an in-memory connection.
pub struct MemoryChannel {
    inbound: Mutex<mpsc::UnboundedReceiver<String>>,
    outbound: mpsc::UnboundedSender<OutboundMessage>,
}

/// Client-facing half of an in-memory connection.
pub struct MemoryPeer {
    inbound: Option<mpsc::UnboundedSender<String>>,
    outbound: mpsc::UnboundedReceiver<OutboundMessage>,
}

impl MemoryChannel {
    /// Creates a connected `(channel, peer)` pair.
    pub fn pair() -> (MemoryChannel, MemoryPeer) {
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();

        (
            MemoryChannel {
                inbound: Mutex::new(inbound_rx),
                outbound: outbound_tx,
            },
            MemoryPeer {
                inbound: Some(inbound_tx),
                outbound: outbound_rx,
            },
        )
    }
}

#[async_trait::async_trait]
impl MessageChannel for MemoryChannel {
    async fn receive(&self) -> Result<Option<InboundMessage>, ChannelError> {
        let text = match self.inbound.lock().await.recv().await {
            Some(text) => text,
            None => return Ok(None),
        };

        InboundMessage::from_json_str(&text)
            .map(Some)
            .map_err(ChannelError::Decode)
    }

    async fn send(&self, message: OutboundMessage) -> Result<(), ChannelError> {
        self.outbound
            .send(message)
            .map_err(|_| ChannelError::Closed)
    }
}

impl MemoryPeer {
    /// Sends raw text, exactly as a socket frame would carry it.
    pub fn send_text(&self, text: impl Into<String>) -> Result<(), ChannelError> {
        match &self.inbound {
            Some(tx) => tx.send(text.into()).map_err(|_| ChannelError::Closed),
            None => Err(ChannelError::Closed),
        }
    }

    pub fn send_json(&self, value: &serde_json::Value) -> Result<(), ChannelError> {
        self.send_text(value.to_string())
    }

    /// Waits for the next message the server wrote.
    ///
    /// Returns `None` once the server side has been dropped.
    pub async fn recv(&mut self) -> Option<OutboundMessage> {
        self.outbound.recv().await
    }

    /// Returns an already-written message without waiting.
    pub fn try_recv(&mut self) -> Option<OutboundMessage> {
        self.outbound.try_recv().ok()
    }

    /// Ends the inbound stream; the server sees a clean end-of-stream.
    pub fn close(&mut self) {
        self.inbound.take();
    }
}
