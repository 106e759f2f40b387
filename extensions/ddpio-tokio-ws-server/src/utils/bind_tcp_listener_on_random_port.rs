use std::io::Result;
use tokio::net::TcpListener;

/// Binds a `TcpListener` to an ephemeral loopback port.
///
/// The OS picks a free port, which is returned alongside the listener so a
/// server can be started with `serve_with_listener` and clients can be
/// pointed at it without any fixed port configuration. Mostly useful for
/// tests and the demo application.
pub async fn bind_tcp_listener_on_random_port() -> Result<(TcpListener, u16)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();

    Ok((listener, port))
}
