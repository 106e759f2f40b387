use std::io::Result;
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Builds the `ws://` URL a client should dial to reach a server bound to
/// `listener` and serving its upgrade route on `path`.
///
/// IPv6 addresses are bracketed by `SocketAddr`'s `Display`, so the result is
/// a valid URL for either address family.
pub fn tcp_listener_to_ws_url(listener: &TcpListener, path: &str) -> Result<String> {
    let local: SocketAddr = listener.local_addr()?;
    Ok(format!("ws://{local}{path}"))
}
