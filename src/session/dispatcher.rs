use crate::channel::{ChannelError, SharedMessageChannel};
use crate::message::{InboundMessage, OutboundMessage};
use crate::method::{MethodContext, MethodRegistry};
use crate::utils::{RandomSessionIdGenerator, SessionIdGenerator};
use serde_json::Value;

/// Routes inbound messages by their type tag.
///
/// Holds no per-connection state; the same dispatcher serves every
/// connection.
pub struct Dispatcher {
    registry: MethodRegistry,
    session_ids: Box<dyn SessionIdGenerator>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(MethodRegistry::new())
    }
}

impl Dispatcher {
    pub fn new(registry: MethodRegistry) -> Self {
        Self {
            registry,
            session_ids: Box::new(RandomSessionIdGenerator::default()),
        }
    }

    pub fn set_session_id_generator<G>(&mut self, generator: G)
    where
        G: SessionIdGenerator + 'static,
    {
        self.session_ids = Box::new(generator);
    }

    pub fn registry(&self) -> &MethodRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut MethodRegistry {
        &mut self.registry
    }

    /// Handles a single inbound message.
    ///
    /// `connect` and `ping` are answered before this returns. A `method` call
    /// is handed to its handler on a freshly spawned task and this returns
    /// without waiting for it. Unknown methods and unknown tags are dropped
    /// with a local diagnostic; nothing is written back for them.
    ///
    /// Must be called from within a Tokio runtime.
    pub async fn handle(
        &self,
        channel: &SharedMessageChannel,
        message: InboundMessage,
    ) -> Result<(), ChannelError> {
        match message {
            InboundMessage::Connect => self.handle_connect(channel).await,
            InboundMessage::Ping { id } => self.handle_ping(channel, id).await,
            InboundMessage::Method { id, method, params } => {
                self.handle_method(channel, id, method, params);
                Ok(())
            }
            InboundMessage::Unknown { msg } => {
                tracing::warn!("Dropping message with unknown type: {:?}", msg);
                Ok(())
            }
        }
    }

    async fn handle_connect(&self, channel: &SharedMessageChannel) -> Result<(), ChannelError> {
        let session = self.session_ids.generate();
        tracing::debug!("Opening session {}", session);
        channel.send(OutboundMessage::connected(session)).await
    }

    async fn handle_ping(
        &self,
        channel: &SharedMessageChannel,
        id: Option<String>,
    ) -> Result<(), ChannelError> {
        channel.send(OutboundMessage::pong(id)).await
    }

    fn handle_method(
        &self,
        channel: &SharedMessageChannel,
        id: String,
        method: String,
        params: Vec<Value>,
    ) {
        let Some(handler) = self.registry.lookup(&method) else {
            tracing::warn!("Method not found: `{}` (call id {})", method, id);
            return;
        };

        tracing::trace!("Invoking `{}` for call id {}", method, id);
        let ctx = MethodContext::new(id, params, channel.clone());

        // Fire and forget: the protocol has no cancellation message.
        tokio::spawn(handler(ctx));
    }
}
