use ddpio::session::SessionServer;
use ddpio_tokio_ws_server::utils::tcp_listener_to_ws_url;
use ddpio_tokio_ws_server::{DdpWsServer, WsServerConfig};
use example_ddpio_ws_app::{
    ADDR_ENV_VAR, DEFAULT_ADDR, DemoError, register_demo_methods, run_demo_client,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), DemoError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let addr = std::env::var(ADDR_ENV_VAR).unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let config = WsServerConfig::default();

    let listener = TcpListener::bind(addr.as_str()).await?;
    let url = tcp_listener_to_ws_url(&listener, &config.path)?;

    {
        let mut session_server = SessionServer::new();
        register_demo_methods(&mut session_server);
        let server = DdpWsServer::from_session_server(session_server, config);

        // Spawn the server using the pre-bound listener
        let _server_task = tokio::spawn(async move {
            if let Err(err) = Arc::new(server).serve_with_listener(listener).await {
                tracing::error!("Server failed: {}", err);
            }
        });
    }

    let roundtrip = run_demo_client(&url).await?;

    println!("Connected with session {}", roundtrip.session);
    for (id, reply) in &roundtrip.results {
        println!("Result for call {}: {}", id, reply);
    }
    println!("Calls that signalled updated: {:?}", roundtrip.updated);

    Ok(())
}
