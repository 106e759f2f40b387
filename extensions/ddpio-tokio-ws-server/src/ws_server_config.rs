use std::time::Duration;

/// Route the WebSocket upgrade is served on.
pub const DEFAULT_WS_PATH: &str = "/websocket";

/// The interval, in seconds, at which the server sends Ping frames.
pub const HEARTBEAT_INTERVAL: u64 = 5;

/// The maximum time, in seconds, to wait for any frame from the client
/// (including Pong) before considering the connection timed out.
pub const CLIENT_TIMEOUT: u64 = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WsServerConfig {
    pub path: String,
    /// `None` disables server-initiated pings.
    pub heartbeat_interval: Option<Duration>,
    /// `None` lets a connection stay idle forever.
    pub client_timeout: Option<Duration>,
}

impl Default for WsServerConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_WS_PATH.to_string(),
            heartbeat_interval: Some(Duration::from_secs(HEARTBEAT_INTERVAL)),
            client_timeout: Some(Duration::from_secs(CLIENT_TIMEOUT)),
        }
    }
}

impl WsServerConfig {
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_heartbeat_interval(mut self, interval: Option<Duration>) -> Self {
        self.heartbeat_interval = interval;
        self
    }

    pub fn with_client_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.client_timeout = timeout;
        self
    }
}
