//! `ward_core`: deterministic low-health auto-equip engine.
//!
//! No IO, no clocks of its own. Time arrives through `TickInput`; each tick
//! returns effects for the host to interpret.

mod engine;
mod fallback;
mod id;
mod locate;
mod overlay;
mod swap;
mod trigger;
mod types;

#[cfg(any(test, feature = "test-support"))]
pub mod test_fixtures;

pub use engine::tick;
pub use id::session_id;
pub use locate::locate_item;
pub use overlay::{overlay_alpha, overlay_frame, FADE_IN_MS, FADE_OUT_MS, MILLIS_PER_TICK};
pub use swap::kind_totals;
pub use trigger::{COMBAT_WINDOW_TICKS, TICKS_PER_SECOND};
pub use types::*;

pub(crate) fn emit(counters: &mut Counters, tick: u64, effect: Effect) -> EffectEnvelope {
    let id = EffectId(format!("fx_{:06}", counters.next_effect_id));
    counters.next_effect_id += 1;
    EffectEnvelope { id, tick, effect }
}

#[cfg(test)]
mod tests;
