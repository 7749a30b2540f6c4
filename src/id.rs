//! Short-link identifier generation

use rand::Rng;

/// Number of random bytes behind an id (48 bits of entropy)
pub const ID_BYTES: usize = 6;

/// Length of a generated id in characters
pub const ID_LEN: usize = ID_BYTES * 2;

/// Collisions tolerated before giving up on a single request
pub const MAX_ATTEMPTS: u32 = 16;

/// Returned when every candidate collided with an existing id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exhausted {
    pub attempts: u32,
}

/// Draws a fresh random token of [`ID_LEN`] lowercase hex characters.
pub fn random_token() -> String {
    let bytes: [u8; ID_BYTES] = rand::rng().random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Generates an id for which `taken` returns false.
pub fn generate<F>(taken: F) -> Result<String, Exhausted>
where
    F: Fn(&str) -> bool,
{
    generate_with(taken, random_token, MAX_ATTEMPTS)
}

/// Like [`generate`] with an explicit candidate source and retry bound.
pub fn generate_with<F, G>(taken: F, mut candidate: G, max_attempts: u32) -> Result<String, Exhausted>
where
    F: Fn(&str) -> bool,
    G: FnMut() -> String,
{
    for _ in 0..max_attempts {
        let id = candidate();
        if !taken(&id) {
            return Ok(id);
        }
        tracing::debug!(%id, "generated id collided, retrying");
    }
    Err(Exhausted {
        attempts: max_attempts,
    })
}
