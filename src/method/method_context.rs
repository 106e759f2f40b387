use super::MethodContextError;
use crate::channel::SharedMessageChannel;
use crate::message::OutboundMessage;
use serde_json::Value;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

/// The lifetime of one in-flight remote call.
///
/// Two independent, one-way tracks guard what may be written back:
///
/// - the result track, consumed by either [`send_result`](Self::send_result)
///   or [`send_error`](Self::send_error);
/// - the update track, consumed by [`send_updated`](Self::send_updated).
///
/// Each track is claimed with an atomic swap before any I/O happens, so even
/// when a handler shares the context across tasks only the first claimant
/// writes. A write that fails still consumes the track.
pub struct MethodContext {
    id: String,
    params: Vec<Value>,
    channel: SharedMessageChannel,
    result_sent: AtomicBool,
    update_sent: AtomicBool,
}

impl MethodContext {
    pub fn new(id: String, params: Vec<Value>, channel: SharedMessageChannel) -> Self {
        Self {
            id,
            params,
            channel,
            result_sent: AtomicBool::new(false),
            update_sent: AtomicBool::new(false),
        }
    }

    /// The caller-chosen correlation id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Positional arguments, exactly as received.
    pub fn params(&self) -> &[Value] {
        &self.params
    }

    pub fn param(&self, index: usize) -> Option<&Value> {
        self.params.get(index)
    }

    pub fn is_result_sent(&self) -> bool {
        self.result_sent.load(Ordering::Acquire)
    }

    pub fn is_update_sent(&self) -> bool {
        self.update_sent.load(Ordering::Acquire)
    }

    /// Sends the call's return value.
    pub async fn send_result(&self, result: Value) -> Result<(), MethodContextError> {
        self.claim_result()?;
        let message = OutboundMessage::result(self.id.clone(), result);
        Ok(self.channel.send(message).await?)
    }

    /// Sends a failure in place of a result.
    pub async fn send_error(&self, error: impl Into<String>) -> Result<(), MethodContextError> {
        self.claim_result()?;
        let message = OutboundMessage::error(self.id.clone(), error);
        Ok(self.channel.send(message).await?)
    }

    /// Signals that every data change caused by this call has reached the
    /// caller.
    ///
    /// Only call this after the call's data messages have been written. It is
    /// independent of the result track.
    pub async fn send_updated(&self) -> Result<(), MethodContextError> {
        if self.update_sent.swap(true, Ordering::AcqRel) {
            return Err(MethodContextError::AlreadyUpdated(self.id.clone()));
        }

        let message = OutboundMessage::updated(self.id.clone());
        Ok(self.channel.send(message).await?)
    }

    fn claim_result(&self) -> Result<(), MethodContextError> {
        if self.result_sent.swap(true, Ordering::AcqRel) {
            return Err(MethodContextError::AlreadyResponded(self.id.clone()));
        }
        Ok(())
    }
}

impl fmt::Debug for MethodContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodContext")
            .field("id", &self.id)
            .field("params", &self.params)
            .field("result_sent", &self.is_result_sent())
            .field("update_sent", &self.is_update_sent())
            .finish_non_exhaustive()
    }
}
