use super::*;

#[test]
fn test_no_player_is_a_silent_noop() {
    let config = base_config();
    let mut session = base_session();
    session.player = None;

    let effects = tick(&mut session, &input_at(5, 3), &config, EffectLevel::Debug);

    assert!(effects.is_empty());
    assert_eq!(session.meta.last_tick, 5, "the tick counter still advances");
    assert_eq!(session.counters.next_effect_id, 0);
}

#[test]
fn test_effect_ids_are_sequential_across_ticks() {
    let config = base_config();
    let mut session = armed_session();

    let first = tick(&mut session, &input_at(1, 0), &config, EffectLevel::Normal);
    let second = tick(&mut session, &input_at(2, 1), &config, EffectLevel::Normal);

    let ids: Vec<String> = first
        .iter()
        .chain(second.iter())
        .map(|envelope| envelope.id.0.clone())
        .collect();
    assert_eq!(
        ids,
        vec![
            "fx_000000", "fx_000001", "fx_000002", "fx_000003", "fx_000004", "fx_000005",
        ]
    );
    assert_eq!(session.counters.next_effect_id, 6);
    assert!(second.iter().all(|envelope| envelope.tick == 2));
}

#[test]
fn test_debug_level_emits_trigger_trace() {
    let config = base_config();
    let mut session = base_session();

    let effects = tick(&mut session, &input_at(1, 0), &config, EffectLevel::Debug);

    assert_eq!(effects.len(), 1);
    match &effects[0].effect {
        Effect::TriggerTrace {
            low_health,
            in_combat,
            suppressed,
            ready,
        } => {
            assert!(!low_health);
            assert!(!in_combat);
            assert!(!suppressed);
            assert!(!ready);
        }
        other => panic!("expected a trace, got {other:?}"),
    }
}

#[test]
fn test_normal_level_omits_trigger_trace() {
    let config = base_config();
    let mut session = base_session();

    let effects = tick(&mut session, &input_at(1, 0), &config, EffectLevel::Normal);

    assert!(effects.is_empty());
}

#[test]
fn test_trace_snapshots_the_start_of_the_tick() {
    let config = base_config();
    let mut session = armed_session();

    let effects = tick(&mut session, &input_at(1, 1), &config, EffectLevel::Debug);

    // The press moved a ward into the reserved slot mid-tick, but the trace
    // reports the evaluation that opened the tick.
    let trace = effects.last().unwrap();
    match &trace.effect {
        Effect::TriggerTrace {
            suppressed, ready, ..
        } => {
            assert!(!suppressed);
            assert!(ready);
        }
        other => panic!("expected a trace, got {other:?}"),
    }
    assert!(session
        .player
        .as_ref()
        .unwrap()
        .reserved_holds(&config.guarded_item));
}

#[test]
fn test_disabling_mid_session_stands_down_gracefully() {
    let mut config = base_config();
    let mut session = armed_session();

    tick(&mut session, &input_at(1, 0), &config, EffectLevel::Normal);
    assert!(session.guard.ready);

    config.enabled = false;
    let effects = tick(&mut session, &input_at(2, 0), &config, EffectLevel::Normal);

    assert!(!session.guard.ready);
    assert_eq!(readiness_changes(&effects), vec![false]);
    // The fade-out picks up from the partial fade-in, not a hard cut.
    assert!((session.guard.alpha_at_transition - 0.1).abs() < 1e-4);
}

#[test]
fn test_externally_equipped_ward_stands_down() {
    let config = base_config();
    let mut session = armed_session();

    tick(&mut session, &input_at(1, 0), &config, EffectLevel::Normal);
    assert!(session.guard.ready);

    // Host-side equip outside the engine, picked up on the next evaluation.
    reserve(&mut session, stack("ward_totem", 1));
    let effects = tick(&mut session, &input_at(2, 0), &config, EffectLevel::Normal);

    assert!(!session.guard.ready);
    assert_eq!(readiness_changes(&effects), vec![false]);
}
