use ddpio::channel::{ChannelError, MemoryChannel, SharedMessageChannel};
use ddpio::message::OutboundMessage;
use ddpio::method::{MethodContext, MethodContextError};
use serde_json::json;
use std::sync::Arc;

fn context_with_peer(id: &str) -> (MethodContext, ddpio::channel::MemoryPeer) {
    let (channel, peer) = MemoryChannel::pair();
    let channel: SharedMessageChannel = Arc::new(channel);
    let ctx = MethodContext::new(id.to_string(), vec![json!(1), json!("two")], channel);
    (ctx, peer)
}

#[tokio::test]
async fn test_send_result_writes_result_envelope() {
    let (ctx, mut peer) = context_with_peer("call-1");

    ctx.send_result(json!({"answer": 42})).await.unwrap();

    assert_eq!(
        peer.recv().await,
        Some(OutboundMessage::result("call-1", json!({"answer": 42})))
    );
    assert!(ctx.is_result_sent());
    assert!(!ctx.is_update_sent());
}

#[tokio::test]
async fn test_second_result_is_rejected_without_io() {
    let (ctx, mut peer) = context_with_peer("call-2");

    ctx.send_result(json!(1)).await.unwrap();
    let err = ctx.send_result(json!(2)).await.unwrap_err();

    assert!(matches!(err, MethodContextError::AlreadyResponded(ref id) if id == "call-2"));
    assert_eq!(peer.recv().await, Some(OutboundMessage::result("call-2", json!(1))));
    assert_eq!(peer.try_recv(), None);
}

#[tokio::test]
async fn test_result_and_error_share_one_guard() {
    // result, then error
    let (ctx, mut peer) = context_with_peer("a");
    ctx.send_result(json!(null)).await.unwrap();
    assert!(matches!(
        ctx.send_error("too late").await,
        Err(MethodContextError::AlreadyResponded(_))
    ));
    assert_eq!(peer.recv().await, Some(OutboundMessage::result("a", json!(null))));
    assert_eq!(peer.try_recv(), None);

    // error, then result
    let (ctx, mut peer) = context_with_peer("b");
    ctx.send_error("boom").await.unwrap();
    assert!(matches!(
        ctx.send_result(json!(true)).await,
        Err(MethodContextError::AlreadyResponded(_))
    ));
    assert!(matches!(
        ctx.send_error("boom again").await,
        Err(MethodContextError::AlreadyResponded(_))
    ));
    assert_eq!(peer.recv().await, Some(OutboundMessage::error("b", "boom")));
    assert_eq!(peer.try_recv(), None);
}

#[tokio::test]
async fn test_concurrent_responders_succeed_exactly_once() {
    let (ctx, mut peer) = context_with_peer("race");
    let ctx = Arc::new(ctx);

    let mut tasks = Vec::new();
    for i in 0..16 {
        let ctx = ctx.clone();
        tasks.push(tokio::spawn(async move {
            if i % 2 == 0 {
                ctx.send_result(json!(i)).await
            } else {
                ctx.send_error(format!("error {i}")).await
            }
        }));
    }

    let mut successes = 0;
    let mut rejections = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(()) => successes += 1,
            Err(MethodContextError::AlreadyResponded(_)) => rejections += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(rejections, 15);

    let first = peer.recv().await.unwrap();
    assert!(matches!(first, OutboundMessage::Result { ref id, .. } if id == "race"));
    assert_eq!(peer.try_recv(), None);
}

#[tokio::test]
async fn test_updated_is_sent_at_most_once() {
    let (ctx, mut peer) = context_with_peer("upd");

    ctx.send_updated().await.unwrap();
    let err = ctx.send_updated().await.unwrap_err();

    assert!(matches!(err, MethodContextError::AlreadyUpdated(ref id) if id == "upd"));
    assert_eq!(peer.recv().await, Some(OutboundMessage::updated("upd")));
    assert_eq!(peer.try_recv(), None);
}

#[tokio::test]
async fn test_updated_is_independent_of_result() {
    // updated before result
    let (ctx, mut peer) = context_with_peer("x");
    ctx.send_updated().await.unwrap();
    ctx.send_result(json!("done")).await.unwrap();
    assert_eq!(peer.recv().await, Some(OutboundMessage::updated("x")));
    assert_eq!(peer.recv().await, Some(OutboundMessage::result("x", json!("done"))));

    // updated after error
    let (ctx, mut peer) = context_with_peer("y");
    ctx.send_error("nope").await.unwrap();
    ctx.send_updated().await.unwrap();
    assert_eq!(peer.recv().await, Some(OutboundMessage::error("y", "nope")));
    assert_eq!(peer.recv().await, Some(OutboundMessage::updated("y")));
}

#[tokio::test]
async fn test_send_after_peer_dropped_returns_write_error() {
    let (ctx, peer) = context_with_peer("gone");
    drop(peer);

    let err = ctx.send_result(json!(1)).await.unwrap_err();
    assert!(matches!(err, MethodContextError::Channel(ChannelError::Closed)));

    // The failed write still consumed the result track.
    assert!(matches!(
        ctx.send_error("retry").await,
        Err(MethodContextError::AlreadyResponded(_))
    ));

    let err = ctx.send_updated().await.unwrap_err();
    assert!(matches!(err, MethodContextError::Channel(ChannelError::Closed)));
}

#[tokio::test]
async fn test_params_are_passed_through_unmodified() {
    let (ctx, _peer) = context_with_peer("p");

    assert_eq!(ctx.id(), "p");
    assert_eq!(ctx.params(), &[json!(1), json!("two")]);
    assert_eq!(ctx.param(1), Some(&json!("two")));
    assert_eq!(ctx.param(2), None);
}
