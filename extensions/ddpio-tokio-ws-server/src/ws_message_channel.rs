use axum::extract::ws::{Message, WebSocket};
use bytes::Bytes;
use ddpio::channel::{ChannelError, MessageChannel};
use ddpio::message::{InboundMessage, OutboundMessage};
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use std::time::Duration;
use tokio::{sync::Mutex, time::timeout};

/// A [`MessageChannel`] over one upgraded WebSocket.
///
/// Messages travel as JSON text frames; binary frames holding UTF-8 JSON are
/// accepted inbound as well. Each half sits behind its own mutex, so handler
/// tasks writing concurrently never interleave frames and never wait on the
/// receive loop.
///
/// Both halves are released by [`close`](Self::close). The socket is dropped
/// at that point even while handlers still hold the channel; their later
/// writes fail with [`ChannelError::Closed`].
pub struct WsMessageChannel {
    sender: Mutex<Option<SplitSink<WebSocket, Message>>>,
    receiver: Mutex<Option<SplitStream<WebSocket>>>,
    client_timeout: Option<Duration>,
}

impl WsMessageChannel {
    pub fn new(socket: WebSocket, client_timeout: Option<Duration>) -> Self {
        let (sender, receiver) = socket.split();
        Self {
            sender: Mutex::new(Some(sender)),
            receiver: Mutex::new(Some(receiver)),
            client_timeout,
        }
    }

    /// Sends a WebSocket-level Ping frame.
    pub async fn send_ping(&self) -> Result<(), ChannelError> {
        self.write(Message::Ping(Bytes::new())).await
    }

    /// Sends a Close frame (best effort) and drops the socket.
    ///
    /// Idempotent. Must not be called while a `receive` is pending on another
    /// task, since it waits for the receive half.
    pub async fn close(&self) {
        if let Some(mut sender) = self.sender.lock().await.take() {
            if let Err(err) = sender.close().await {
                tracing::trace!("Close frame not delivered: {}", err);
            }
        }
        self.receiver.lock().await.take();
    }

    async fn write(&self, frame: Message) -> Result<(), ChannelError> {
        let mut sender = self.sender.lock().await;
        let Some(sender) = sender.as_mut() else {
            return Err(ChannelError::Closed);
        };
        sender.send(frame).await.map_err(ChannelError::transport)
    }
}

#[async_trait::async_trait]
impl MessageChannel for WsMessageChannel {
    async fn receive(&self) -> Result<Option<InboundMessage>, ChannelError> {
        let mut receiver = self.receiver.lock().await;
        let Some(receiver) = receiver.as_mut() else {
            return Ok(None);
        };

        loop {
            // Every frame, including Pong, restarts the idle window.
            let next = match self.client_timeout {
                Some(window) => timeout(window, receiver.next())
                    .await
                    .map_err(|_| ChannelError::TimedOut)?,
                None => receiver.next().await,
            };

            match next {
                Some(Ok(Message::Text(text))) => {
                    return InboundMessage::from_json_str(text.as_str())
                        .map(Some)
                        .map_err(ChannelError::Decode);
                }
                Some(Ok(Message::Binary(bytes))) => {
                    return InboundMessage::from_json_slice(&bytes)
                        .map(Some)
                        .map_err(ChannelError::Decode);
                }
                // Pings are answered by the socket itself.
                Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => {
                    tracing::trace!("Received keep-alive frame");
                }
                Some(Ok(Message::Close(_))) | None => return Ok(None),
                Some(Err(err)) => return Err(ChannelError::transport(err)),
            }
        }
    }

    async fn send(&self, message: OutboundMessage) -> Result<(), ChannelError> {
        let text = message.to_json_string().map_err(ChannelError::Encode)?;
        self.write(Message::Text(text.into())).await
    }
}
