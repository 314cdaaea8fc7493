//! Per-tick orchestration: trigger evaluation, readiness transitions, press
//! handling.

use crate::fallback::respond_missing;
use crate::locate::locate_item;
use crate::overlay::set_readiness;
use crate::swap::execute_swap;
use crate::trigger::{self, TriggerRead};
use crate::{
    Config, Counters, CueKind, Effect, EffectEnvelope, EffectLevel, GuardState, MessageTone,
    PlayerState, SessionState, TickInput,
};

pub(crate) const READY_CUE_VOLUME: f32 = 0.3;
pub(crate) const READY_CUE_PITCH: f32 = 1.5;
pub(crate) const SWAP_CUE_VOLUME: f32 = 0.5;
pub(crate) const SWAP_CUE_PITCH: f32 = 1.0;

/// Advance the engine by one tick.
///
/// Order of operations:
/// 1. Evaluate the trigger against health, the combat window, and the
///    reserved slot.
/// 2. Apply the readiness transition: fade hand-off, `ReadinessChanged`,
///    and the one-shot chime on a rising edge.
/// 3. Drain queued swap presses, each as an independent attempt (skipped
///    entirely while disabled).
/// 4. Emit the trigger trace at `EffectLevel::Debug`.
///
/// Returns all effects produced this tick. With no player loaded this is a
/// silent no-op.
pub fn tick(
    state: &mut SessionState,
    input: &TickInput,
    config: &Config,
    effect_level: EffectLevel,
) -> Vec<EffectEnvelope> {
    let mut effects = Vec::new();
    state.meta.last_tick = input.world_tick;

    let Some(player) = state.player.as_mut() else {
        return effects;
    };

    let read = trigger::evaluate(player, &state.guard, config, input.world_tick);
    apply_readiness(
        &mut state.guard,
        &read,
        config,
        input,
        &mut state.counters,
        &mut effects,
    );

    if config.enabled {
        for _ in 0..input.swap_presses {
            handle_press(
                player,
                &mut state.guard,
                config,
                input,
                &mut state.counters,
                &mut effects,
            );
        }
    }

    if effect_level == EffectLevel::Debug {
        effects.push(crate::emit(
            &mut state.counters,
            input.world_tick,
            Effect::TriggerTrace {
                low_health: read.low_health,
                in_combat: read.in_combat,
                suppressed: read.suppressed,
                ready: read.ready,
            },
        ));
    }

    effects
}

/// Latches a changed readiness value. The fade hand-off runs before the
/// flag flips so the overlay resumes from its current alpha.
fn apply_readiness(
    guard: &mut GuardState,
    read: &TriggerRead,
    config: &Config,
    input: &TickInput,
    counters: &mut Counters,
    effects: &mut Vec<EffectEnvelope>,
) {
    if read.ready == guard.ready {
        return;
    }
    set_readiness(guard, read.ready, input.now_ms);
    effects.push(crate::emit(
        counters,
        input.world_tick,
        Effect::ReadinessChanged { ready: read.ready },
    ));
    if read.ready && config.low_health_sound {
        effects.push(crate::emit(
            counters,
            input.world_tick,
            Effect::PlayCue {
                cue: CueKind::ReadyChime,
                volume: READY_CUE_VOLUME,
                pitch: READY_CUE_PITCH,
            },
        ));
    }
}

/// One swap attempt. Presses work whether or not the trigger is armed; only
/// the enabled flag gates them.
fn handle_press(
    player: &mut PlayerState,
    guard: &mut GuardState,
    config: &Config,
    input: &TickInput,
    counters: &mut Counters,
    effects: &mut Vec<EffectEnvelope>,
) {
    let label = config.guarded_item.label();
    if player.reserved_holds(&config.guarded_item) {
        effects.push(crate::emit(
            counters,
            input.world_tick,
            Effect::ShowMessage {
                text: format!("{label} already equipped!"),
                tone: MessageTone::Info,
            },
        ));
        return;
    }
    let Some(source_slot) = locate_item(&player.inventory, config.priority, &config.guarded_item)
    else {
        respond_missing(config, counters, input.world_tick, effects);
        return;
    };

    let displaced = execute_swap(player, source_slot);
    effects.push(crate::emit(
        counters,
        input.world_tick,
        Effect::ItemEquipped {
            kind: config.guarded_item.clone(),
            from_slot: source_slot,
            displaced,
        },
    ));
    effects.push(crate::emit(
        counters,
        input.world_tick,
        Effect::PlayCue {
            cue: CueKind::SwapClick,
            volume: SWAP_CUE_VOLUME,
            pitch: SWAP_CUE_PITCH,
        },
    ));
    effects.push(crate::emit(
        counters,
        input.world_tick,
        Effect::ShowMessage {
            text: format!("{label} equipped!"),
            tone: MessageTone::Confirm,
        },
    ));

    // The reserved slot now satisfies the trigger; stand down without
    // waiting for the next evaluation.
    if guard.ready {
        set_readiness(guard, false, input.now_ms);
        effects.push(crate::emit(
            counters,
            input.world_tick,
            Effect::ReadinessChanged { ready: false },
        ));
    }
}
