use crate::constants::{DEFAULT_SESSION_ID_LENGTH, SESSION_ID_ALPHABET};
use rand::Rng;

/// Produces the session ids handed out in `connected` replies.
///
/// Sessions are not used for authorization, so implementations only need to
/// be unpredictable enough to avoid accidental collisions.
pub trait SessionIdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Random letters drawn from [`SESSION_ID_ALPHABET`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomSessionIdGenerator {
    length: usize,
}

impl RandomSessionIdGenerator {
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomSessionIdGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_ID_LENGTH)
    }
}

impl SessionIdGenerator for RandomSessionIdGenerator {
    fn generate(&self) -> String {
        generate_session_id(self.length)
    }
}

/// Not cryptographically secure; uses the thread-local RNG.
#[inline]
pub fn generate_session_id(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| SESSION_ID_ALPHABET[rng.random_range(0..SESSION_ID_ALPHABET.len())] as char)
        .collect()
}
