use super::*;
use crate::test_fixtures::{base_config, base_session, input_at, stack};

mod engine;
mod warnings;

// --- Shared test helpers ------------------------------------------------

/// Session whose trigger conditions already hold: hurt below the default
/// threshold, damaged at tick 0, one ward totem in the backpack. Not yet
/// ticked, so the readiness latch is still false.
fn armed_session() -> SessionState {
    let mut session = base_session();
    session.note_damage(0);
    hurt(&mut session, 4.0);
    place(&mut session, 20, stack("ward_totem", 1));
    session
}

fn hurt(session: &mut SessionState, hp: f32) {
    session.player.as_mut().unwrap().health.current = hp;
}

fn place(session: &mut SessionState, slot: usize, item: ItemStack) {
    session.player.as_mut().unwrap().inventory.slots[slot] = Some(item);
}

fn reserve(session: &mut SessionState, item: ItemStack) {
    session.player.as_mut().unwrap().reserved = Some(item);
}

fn equip_count(effects: &[EffectEnvelope]) -> usize {
    effects
        .iter()
        .filter(|envelope| matches!(envelope.effect, Effect::ItemEquipped { .. }))
        .count()
}

fn cue_count(effects: &[EffectEnvelope], cue: CueKind) -> usize {
    effects
        .iter()
        .filter(|envelope| {
            matches!(&envelope.effect, Effect::PlayCue { cue: played, .. } if *played == cue)
        })
        .count()
}

fn message_texts(effects: &[EffectEnvelope]) -> Vec<String> {
    effects
        .iter()
        .filter_map(|envelope| match &envelope.effect {
            Effect::ShowMessage { text, .. } => Some(text.clone()),
            _ => None,
        })
        .collect()
}

fn readiness_changes(effects: &[EffectEnvelope]) -> Vec<bool> {
    effects
        .iter()
        .filter_map(|envelope| match &envelope.effect {
            Effect::ReadinessChanged { ready } => Some(*ready),
            _ => None,
        })
        .collect()
}
