//! Opaque record id generation.
//!
//! Ids look like `<prefix>_<token>`, e.g. `p_k3x9qa` for a movie or
//! `a_0fz2mm` for an actor. The provider is a strategy so tests can swap in
//! [`SequentialIds`] and assert on exact ids.

use std::collections::HashMap;
use std::sync::Mutex;

use uuid::Uuid;

/// Prefix for movie ids.
pub const MOVIE_PREFIX: &str = "p";
/// Prefix for actor ids.
pub const ACTOR_PREFIX: &str = "a";

const TOKEN_LEN: usize = 6;
const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Source of new record ids.
pub trait IdProvider: Send + Sync {
    /// Produce a new id for the given type prefix.
    fn new_id(&self, prefix: &str) -> String;
}

/// Random 6-character lowercase alphanumeric tokens.
///
/// Draws from v4 UUID randomness. Collisions are unlikely at catalog scale
/// but not impossible; callers re-check against the collection.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdProvider for RandomIds {
    fn new_id(&self, prefix: &str) -> String {
        let bytes = Uuid::new_v4().into_bytes();
        let token: String = bytes
            .iter()
            .take(TOKEN_LEN)
            .map(|b| ALPHABET[usize::from(*b) % ALPHABET.len()] as char)
            .collect();
        format!("{prefix}_{token}")
    }
}

/// Deterministic ids: `p_1`, `p_2`, `a_1`, ... counted per prefix.
#[derive(Debug, Default)]
pub struct SequentialIds {
    counters: Mutex<HashMap<String, u64>>,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdProvider for SequentialIds {
    fn new_id(&self, prefix: &str) -> String {
        let mut counters = match self.counters.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let next = counters.entry(prefix.to_string()).or_insert(0);
        *next += 1;
        format!("{prefix}_{next}")
    }
}
