//! Readiness trigger: health gate, combat window, reserved-slot suppression.

use crate::{Config, GuardState, Health, PlayerState};

/// Fixed simulation rate the combat window is calibrated against.
pub const TICKS_PER_SECOND: u64 = 20;

/// Recent-damage window: 5 seconds of ticks.
pub const COMBAT_WINDOW_TICKS: u64 = 5 * TICKS_PER_SECOND;

/// Configured thresholds at or below zero mean this fraction of max health.
const FALLBACK_THRESHOLD_RATIO: f32 = 0.3;

/// One trigger evaluation. `ready` is the conjunction; the inputs are kept
/// for the debug trace.
pub(crate) struct TriggerRead {
    pub low_health: bool,
    pub in_combat: bool,
    pub suppressed: bool,
    pub ready: bool,
}

pub(crate) fn effective_threshold(health: &Health, configured: f32) -> f32 {
    if configured <= 0.0 {
        health.max * FALLBACK_THRESHOLD_RATIO
    } else {
        configured
    }
}

/// At or below the effective threshold. The gate is inclusive: sitting
/// exactly on the threshold counts as low.
pub(crate) fn is_low_health(health: &Health, configured: f32) -> bool {
    health.current <= effective_threshold(health, configured)
}

/// Open while the last reported damage is fewer than `COMBAT_WINDOW_TICKS`
/// ticks ago. Saturating, so a damage tick ahead of the clock still counts.
pub(crate) fn in_combat_window(last_damage_tick: Option<u64>, now_tick: u64) -> bool {
    last_damage_tick.is_some_and(|hit| now_tick.saturating_sub(hit) < COMBAT_WINDOW_TICKS)
}

pub(crate) fn evaluate(
    player: &PlayerState,
    guard: &GuardState,
    config: &Config,
    now_tick: u64,
) -> TriggerRead {
    let low_health = is_low_health(&player.health, config.hp_threshold);
    let in_combat = !config.fight_only || in_combat_window(guard.last_damage_tick, now_tick);
    let suppressed = player.reserved_holds(&config.guarded_item);
    let ready = config.enabled && low_health && in_combat && !suppressed;
    TriggerRead {
        low_health,
        in_combat,
        suppressed,
        ready,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
