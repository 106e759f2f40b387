mod inbound_message;
mod outbound_message;

pub use inbound_message::InboundMessage;
pub use outbound_message::{MethodError, MethodOutcome, OutboundMessage};
