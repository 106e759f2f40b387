//! Note: This server accepts every WebSocket upgrade and has no
//! authentication or authorization. Session ids are handed out for protocol
//! compliance only. Any transport that implements
//! [`MessageChannel`](ddpio::channel::MessageChannel) can drive a
//! [`SessionServer`]; this one does so over WebSockets using the Axum web
//! framework.

use crate::{WsMessageChannel, WsServerConfig};
use axum::{
    Router,
    extract::ConnectInfo,
    extract::ws::{WebSocket, WebSocketUpgrade},
    response::IntoResponse,
    routing::get,
};
use ddpio::channel::SharedMessageChannel;
use ddpio::method::MethodContext;
use ddpio::session::SessionServer;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, ToSocketAddrs};

/// A ddpio server that accepts WebSocket connections and runs one session
/// per connection.
///
/// Methods are registered on the owned value; serving consumes it, so the
/// method table is fixed before the first connection is accepted.
pub struct DdpWsServer {
    session_server: SessionServer,
    config: WsServerConfig,
}

impl Default for DdpWsServer {
    fn default() -> Self {
        Self::new()
    }
}

impl DdpWsServer {
    pub fn new() -> Self {
        Self::with_config(WsServerConfig::default())
    }

    pub fn with_config(config: WsServerConfig) -> Self {
        Self::from_session_server(SessionServer::new(), config)
    }

    /// Wraps an already configured [`SessionServer`], e.g. one with a custom
    /// session id generator or with methods registered elsewhere.
    pub fn from_session_server(session_server: SessionServer, config: WsServerConfig) -> Self {
        Self {
            session_server,
            config,
        }
    }

    pub fn config(&self) -> &WsServerConfig {
        &self.config
    }

    pub fn session_server(&self) -> &SessionServer {
        &self.session_server
    }

    /// Registers a method handler. A later registration of the same name
    /// replaces the earlier one.
    pub fn register_method<F, Fut>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(MethodContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.session_server.register_method(name, handler);
    }

    /// Binds to an address and starts the server.
    ///
    /// The address can be any type that implements `ToSocketAddrs`, such as
    /// a string "127.0.0.1:3000" or a `SocketAddr`.
    pub async fn serve<A: ToSocketAddrs>(self, addr: A) -> Result<SocketAddr, axum::BoxError> {
        let listener = TcpListener::bind(addr).await?;
        Arc::new(self).serve_with_listener(listener).await
    }

    /// Starts the server on a specific host and port.
    pub async fn serve_on(self, host: &str, port: u16) -> Result<SocketAddr, axum::BoxError> {
        self.serve(format!("{host}:{port}")).await
    }

    /// Starts the server with a pre-bound `TcpListener`.
    ///
    /// Useful when binding to an ephemeral port (port 0) and reading the
    /// actual address back first.
    pub async fn serve_with_listener(
        self: Arc<Self>,
        listener: TcpListener,
    ) -> Result<SocketAddr, axum::BoxError> {
        let address = listener.local_addr()?;
        let app = Router::new().route(
            &self.config.path,
            get({
                let server = self.clone();
                move |ws, conn| Self::ws_handler(ws, conn, server)
            }),
        );
        tracing::info!(
            "Server running on {:?} (path {})",
            address,
            self.config.path
        );
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await?;
        Ok(address)
    }

    async fn ws_handler(
        ws: WebSocketUpgrade,
        ConnectInfo(addr): ConnectInfo<SocketAddr>,
        server: Arc<DdpWsServer>,
    ) -> impl IntoResponse {
        tracing::info!("Client connected: {}", addr);
        ws.on_upgrade(move |socket| server.handle_socket(socket, addr))
    }

    /// Runs the session for one upgraded socket, alongside an optional
    /// heartbeat task, until the session ends.
    async fn handle_socket(self: Arc<Self>, socket: WebSocket, addr: SocketAddr) {
        let channel = Arc::new(WsMessageChannel::new(socket, self.config.client_timeout));

        let heartbeat = self
            .config
            .heartbeat_interval
            .map(|interval| tokio::spawn(Self::heartbeat_task(channel.clone(), interval, addr)));

        let shared: SharedMessageChannel = channel.clone();
        match self.session_server.run_session(shared).await {
            Ok(()) => tracing::info!("Client {} disconnected.", addr),
            Err(err) => tracing::warn!("Client {} session ended with error: {}", addr, err),
        }

        if let Some(heartbeat) = heartbeat {
            heartbeat.abort();
        }

        // Handlers still in flight keep their channel handle; closing here
        // releases the socket now and turns their writes into errors.
        channel.close().await;
        tracing::info!("Terminated connection for {}.", addr);
    }

    /// Periodically pings the client so idle-but-alive peers keep answering
    /// within the client timeout.
    async fn heartbeat_task(channel: Arc<WsMessageChannel>, interval: Duration, addr: SocketAddr) {
        loop {
            tokio::time::sleep(interval).await;
            if let Err(err) = channel.send_ping().await {
                tracing::info!("Client {} disconnected (failed to send ping: {}).", addr, err);
                break;
            }
        }
    }
}
