use super::Dispatcher;
use crate::channel::{ChannelError, SharedMessageChannel};
use crate::method::MethodContext;
use crate::utils::SessionIdGenerator;
use std::future::Future;

/// Top-level composition of the method table and the dispatcher.
///
/// Handlers are registered through `&mut self` during setup. Once the server
/// is shared (typically behind an `Arc`) the table can only be read, which is
/// what lets every connection look handlers up without locking.
#[derive(Default)]
pub struct SessionServer {
    dispatcher: Dispatcher,
}

impl SessionServer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the generator used for `connected` session ids.
    pub fn with_session_id_generator<G>(mut self, generator: G) -> Self
    where
        G: SessionIdGenerator + 'static,
    {
        self.dispatcher.set_session_id_generator(generator);
        self
    }

    /// Registers `handler` under `name`; a later registration of the same
    /// name wins.
    pub fn register_method<F, Fut>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(MethodContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.dispatcher.registry_mut().register(name, handler);
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Runs the receive loop for one connection until it ends.
    ///
    /// A clean end-of-stream yields `Ok(())`. Any receive failure is logged and
    /// returned; it only ends this connection. Failures writing `connected`
    /// or `pong` replies are logged and the loop keeps reading, so a dead peer
    /// is detected by the next `receive`.
    pub async fn run_session(&self, channel: SharedMessageChannel) -> Result<(), ChannelError> {
        loop {
            match channel.receive().await {
                Ok(Some(message)) => {
                    tracing::trace!("Received {:?} message", message.tag());
                    if let Err(err) = self.dispatcher.handle(&channel, message).await {
                        tracing::warn!("Failed to write reply: {}", err);
                    }
                }
                Ok(None) => {
                    tracing::debug!("Peer ended the stream.");
                    return Ok(());
                }
                Err(err) => {
                    tracing::error!("Read error, ending session: {}", err);
                    return Err(err);
                }
            }
        }
    }
}
