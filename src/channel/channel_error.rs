use thiserror::Error;

/// Failures surfaced by a [`MessageChannel`](super::MessageChannel).
#[derive(Debug, Error)]
pub enum ChannelError {
    /// The peer is gone; nothing more can be sent or received.
    #[error("channel closed")]
    Closed,

    /// The peer sent something that is not a valid message.
    #[error("failed to decode inbound message: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("failed to encode outbound message: {0}")]
    Encode(#[source] serde_json::Error),

    /// No traffic arrived from the peer within the allowed window.
    #[error("peer timed out")]
    TimedOut,

    /// Transport-specific failure (socket reset, protocol violation, ...).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ChannelError {
    /// Wraps any transport error.
    pub fn transport<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        ChannelError::Transport(err.into())
    }
}
