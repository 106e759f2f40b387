mod channel_error;
mod memory_channel;
mod message_channel;

pub use channel_error::ChannelError;
pub use memory_channel::{MemoryChannel, MemoryPeer};
pub use message_channel::{MessageChannel, SharedMessageChannel};
