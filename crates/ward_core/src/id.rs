//! Deterministic session id generation.

use rand::Rng;
use uuid::Uuid;

/// Builds a v4-format uuid from rng bytes, so seeded sessions get
/// reproducible ids.
pub fn session_id(rng: &mut impl Rng) -> Uuid {
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes);
    uuid::Builder::from_random_bytes(bytes).into_uuid()
}
