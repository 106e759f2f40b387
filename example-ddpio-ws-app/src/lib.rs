//! Sample methods served by the demo application, and the client side of
//! the demo roundtrip.

use ddpio::method::MethodContext;
use ddpio::session::SessionServer;
use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::time::Duration;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message as WsMessage};

/// Environment variable holding the listen address.
pub const ADDR_ENV_VAR: &str = "DDPIO_ADDR";

/// Port 0 lets the OS pick a free port.
pub const DEFAULT_ADDR: &str = "127.0.0.1:0";

pub type DemoError = Box<dyn std::error::Error + Send + Sync>;

/// Registers `add`, `echo` and `slow_echo` on `server`.
pub fn register_demo_methods(server: &mut SessionServer) {
    server.register_method("add", add);
    server.register_method("echo", echo);
    server.register_method("slow_echo", slow_echo);
}

/// Sums every parameter. Non-numeric parameters are reported as an error.
pub async fn add(ctx: MethodContext) {
    let numbers: Option<Vec<f64>> = ctx.params().iter().map(Value::as_f64).collect();

    let sent = match numbers {
        Some(numbers) => ctx.send_result(json!(numbers.iter().sum::<f64>())).await,
        None => ctx.send_error("add expects only numeric params").await,
    };

    if let Err(err) = sent {
        tracing::warn!("add({}) could not reply: {}", ctx.id(), err);
    }
}

/// Returns its parameters unchanged.
pub async fn echo(ctx: MethodContext) {
    let params = Value::Array(ctx.params().to_vec());
    if let Err(err) = ctx.send_result(params).await {
        tracing::warn!("echo({}) could not reply: {}", ctx.id(), err);
    }
}

/// Waits `params[0]` milliseconds, echoes the remaining parameters, then
/// signals `updated`.
pub async fn slow_echo(ctx: MethodContext) {
    let Some(delay) = ctx.param(0).and_then(Value::as_u64) else {
        if let Err(err) = ctx
            .send_error("slow_echo expects a delay in milliseconds first")
            .await
        {
            tracing::warn!("slow_echo({}) could not reply: {}", ctx.id(), err);
        }
        return;
    };

    tokio::time::sleep(Duration::from_millis(delay)).await;

    let rest = Value::Array(ctx.params().iter().skip(1).cloned().collect());
    if let Err(err) = ctx.send_result(rest).await {
        tracing::warn!("slow_echo({}) could not reply: {}", ctx.id(), err);
        return;
    }
    if let Err(err) = ctx.send_updated().await {
        tracing::warn!("slow_echo({}) could not signal updated: {}", ctx.id(), err);
    }
}

/// What the demo client saw.
#[derive(Debug)]
pub struct DemoRoundtrip {
    pub session: String,
    /// `result` replies keyed by call id.
    pub results: BTreeMap<String, Value>,
    /// Call ids that signalled `updated`, in arrival order.
    pub updated: Vec<String>,
}

/// The calls the demo client makes, as `(id, method, params)`.
pub fn demo_calls() -> Vec<(&'static str, &'static str, Value)> {
    vec![
        ("1", "add", json!([1.0, 2.0, 3.0])),
        ("2", "add", json!([8.0, 3.0, 7.0])),
        ("3", "echo", json!(["hello", {"nested": true}])),
        ("4", "slow_echo", json!([100, "slow"])),
        ("5", "add", json!(["not a number"])),
    ]
}

/// Connects to `url`, performs the handshake, issues every call from
/// [`demo_calls`] at once and waits for all of their results.
pub async fn run_demo_client(url: &str) -> Result<DemoRoundtrip, DemoError> {
    let (mut socket, _) = connect_async(url).await?;

    socket
        .send(WsMessage::text(json!({"msg": "connect", "version": "1", "support": ["1"]}).to_string()))
        .await?;

    let calls = demo_calls();
    for (id, method, params) in &calls {
        let request = json!({"msg": "method", "id": id, "method": method, "params": params});
        socket.send(WsMessage::text(request.to_string())).await?;
    }

    let mut session = None;
    let mut results = BTreeMap::new();
    let mut updated = Vec::new();

    while session.is_none() || results.len() < calls.len() {
        let frame = match socket.next().await {
            Some(frame) => frame?,
            None => return Err("server closed the connection early".into()),
        };

        let WsMessage::Text(text) = frame else {
            continue;
        };
        let reply: Value = serde_json::from_str(text.as_str())?;

        match reply["msg"].as_str() {
            Some("connected") => {
                session = reply["session"].as_str().map(str::to_string);
            }
            Some("result") => {
                if let Some(id) = reply["id"].as_str() {
                    results.insert(id.to_string(), reply.clone());
                }
            }
            Some("updated") => {
                if let Some(ids) = reply["methods"].as_array() {
                    updated.extend(ids.iter().filter_map(Value::as_str).map(str::to_string));
                }
            }
            other => tracing::debug!("Ignoring {:?} message", other),
        }
    }

    let _ = socket.close(None).await;

    Ok(DemoRoundtrip {
        session: session.unwrap_or_default(),
        results,
        updated,
    })
}
