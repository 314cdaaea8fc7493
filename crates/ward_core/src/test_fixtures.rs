//! Shared test fixtures for ward_core and downstream crates.
//!
//! `base_session()` is a full-health player with an empty 36-slot
//! inventory; tests place items into specific slots with `stack()`.
//! `input_at()` derives the wall clock from the tick at the fixed 20 Hz
//! rate, which is also what the CLI driver does.

use crate::{
    Config, Counters, GuardState, Health, Inventory, ItemId, ItemStack, PlayerState, SessionMeta,
    SessionState, TickInput, MILLIS_PER_TICK, SCHEMA_VERSION,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub const FULL_HEALTH: f32 = 20.0;
pub const FIXTURE_SLOTS: usize = 36;

pub fn base_config() -> Config {
    Config::default()
}

pub fn stack(kind: &str, count: u32) -> ItemStack {
    ItemStack {
        kind: ItemId(kind.to_string()),
        count,
    }
}

pub fn base_player() -> PlayerState {
    PlayerState {
        health: Health {
            current: FULL_HEALTH,
            max: FULL_HEALTH,
        },
        inventory: Inventory::with_slots(FIXTURE_SLOTS),
        reserved: None,
    }
}

pub fn base_session() -> SessionState {
    let mut rng = make_rng();
    SessionState {
        meta: SessionMeta {
            session_id: crate::session_id(&mut rng),
            seed: 42,
            schema_version: SCHEMA_VERSION,
            last_tick: 0,
        },
        player: Some(base_player()),
        guard: GuardState::default(),
        counters: Counters { next_effect_id: 0 },
    }
}

/// Input for `world_tick` with `now_ms` derived at 20 ticks per second.
pub fn input_at(world_tick: u64, swap_presses: u32) -> TickInput {
    TickInput {
        world_tick,
        now_ms: world_tick * MILLIS_PER_TICK,
        swap_presses,
    }
}

pub fn make_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(42)
}
