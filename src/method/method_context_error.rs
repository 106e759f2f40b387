use crate::channel::ChannelError;
use thiserror::Error;

/// Errors returned to a handler by [`MethodContext`](super::MethodContext).
///
/// These never travel over the wire; the handler decides what they mean.
#[derive(Debug, Error)]
pub enum MethodContextError {
    /// A result or error was already sent for this call.
    #[error("results already sent for method call `{0}`")]
    AlreadyResponded(String),

    /// The `updated` signal was already sent for this call.
    #[error("updated already sent for method call `{0}`")]
    AlreadyUpdated(String),

    /// The response could not be written, e.g. the peer disconnected.
    #[error(transparent)]
    Channel(#[from] ChannelError),
}
