//! Session core for a minimal DDP-style protocol.
//!
//! Only the `connect`, `ping` and `method` messages are understood. Transport
//! concerns live behind the [`channel::MessageChannel`] trait so the dispatch
//! logic can be driven by a WebSocket, an in-memory pair, or anything else
//! that moves structured messages.

pub mod channel;
pub mod constants;
pub mod message;
pub mod method;
pub mod session;
pub mod utils;
