mod generate_session_id;
pub use generate_session_id::{RandomSessionIdGenerator, SessionIdGenerator, generate_session_id};
