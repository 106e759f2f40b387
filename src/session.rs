mod dispatcher;
mod session_server;

pub use dispatcher::Dispatcher;
pub use session_server::SessionServer;
