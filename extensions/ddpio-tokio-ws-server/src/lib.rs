mod ddp_ws_server;
pub use ddp_ws_server::DdpWsServer;

mod ws_message_channel;
pub use ws_message_channel::WsMessageChannel;

mod ws_server_config;
pub use ws_server_config::*;

pub mod utils;

pub use ddpio::method::{MethodContext, MethodContextError};
pub use ddpio::session::SessionServer;
