/// Length of the session id handed out in `connected` replies.
pub const DEFAULT_SESSION_ID_LENGTH: usize = 17;

/// Characters a generated session id is drawn from.
pub const SESSION_ID_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Field carrying the message type tag on the wire.
pub const MESSAGE_TAG_FIELD: &str = "msg";
