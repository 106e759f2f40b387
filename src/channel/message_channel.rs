use super::ChannelError;
use crate::message::{InboundMessage, OutboundMessage};
use std::sync::Arc;

/// A channel handle shared between the receive loop and in-flight handlers.
pub type SharedMessageChannel = Arc<dyn MessageChannel>;

/// Bidirectional exchange of structured messages over one logical connection.
///
/// Implementations know nothing about the protocol; they only move
/// [`InboundMessage`]s in and [`OutboundMessage`]s out.
///
/// Concurrent calls to [`send`](MessageChannel::send) must be serialized by
/// the implementation so that frames never interleave on the wire. Malformed
/// peer data must surface as [`ChannelError::Decode`], never as a panic.
#[async_trait::async_trait]
pub trait MessageChannel: Send + Sync {
    /// Waits for the next message.
    ///
    /// Returns `Ok(None)` once the peer has cleanly ended the stream.
    async fn receive(&self) -> Result<Option<InboundMessage>, ChannelError>;

    /// Transmits a single message.
    async fn send(&self, message: OutboundMessage) -> Result<(), ChannelError>;
}
