//! Missing-item fallback: what a swap press does when nothing is found.

use crate::{Config, Counters, CueKind, Effect, EffectEnvelope, MessageTone, MissingItemBehavior};

pub(crate) const MISSING_CUE_VOLUME: f32 = 0.5;
pub(crate) const MISSING_CUE_PITCH: f32 = 0.5;

/// Appends the configured missing-item response. Pure dispatch on the
/// behavior variant; reads nothing but the config.
///
/// The buzz is deliberately not gated by `low_health_sound`: that flag only
/// covers the ready chime.
pub(crate) fn respond_missing(
    config: &Config,
    counters: &mut Counters,
    tick: u64,
    effects: &mut Vec<EffectEnvelope>,
) {
    match config.missing_item_behavior {
        MissingItemBehavior::None => {}
        MissingItemBehavior::Sound => {
            effects.push(crate::emit(counters, tick, buzz()));
        }
        MissingItemBehavior::Text => {
            effects.push(crate::emit(counters, tick, missing_message(config)));
        }
        MissingItemBehavior::Both => {
            effects.push(crate::emit(counters, tick, buzz()));
            effects.push(crate::emit(counters, tick, missing_message(config)));
        }
    }
}

fn buzz() -> Effect {
    Effect::PlayCue {
        cue: CueKind::MissingBuzz,
        volume: MISSING_CUE_VOLUME,
        pitch: MISSING_CUE_PITCH,
    }
}

fn missing_message(config: &Config) -> Effect {
    Effect::ShowMessage {
        text: format!("No {} available!", config.guarded_item.label()),
        tone: MessageTone::Alert,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
