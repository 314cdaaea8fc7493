use super::*;

/// Arms the trigger with no totem anywhere, so a later press exercises the
/// missing-item path without transition noise in the same tick.
fn armed_without_totem(config: &Config) -> SessionState {
    let mut session = base_session();
    session.note_damage(0);
    hurt(&mut session, 4.0);
    tick(&mut session, &input_at(1, 0), config, EffectLevel::Normal);
    assert!(session.guard.ready);
    session
}

#[test]
fn test_overlay_hidden_before_arming() {
    let config = base_config();
    let session = base_session();

    assert!(overlay_frame(&session.guard, &config, 0).is_none());
}

#[test]
fn test_overlay_fades_in_after_arming() {
    let config = base_config();
    let mut session = armed_session();

    tick(&mut session, &input_at(1, 0), &config, EffectLevel::Normal);

    // Armed at 50 ms; halfway through the 500 ms fade-in at 300 ms.
    assert!((overlay_alpha(&session.guard, 300) - 0.5).abs() < 1e-5);
    let frame = overlay_frame(&session.guard, &config, 300).unwrap();
    assert_eq!(frame.text, "Ward Totem ready - press G");
    assert_eq!(frame.anchor, OverlayAnchor::BottomRight);
}

#[test]
fn test_overlay_solid_once_fade_in_completes() {
    let config = base_config();
    let mut session = armed_session();

    tick(&mut session, &input_at(1, 0), &config, EffectLevel::Normal);

    assert!((overlay_alpha(&session.guard, 550) - 1.0).abs() < 1e-5);
    assert!((overlay_alpha(&session.guard, 9_999) - 1.0).abs() < 1e-5);
}

#[test]
fn test_stand_down_fades_out_from_current_value() {
    let config = base_config();
    let mut session = armed_session();

    tick(&mut session, &input_at(1, 0), &config, EffectLevel::Normal);
    hurt(&mut session, 20.0);
    // Stand down at 300 ms, a quarter of the way through the fade-in.
    tick(&mut session, &input_at(6, 0), &config, EffectLevel::Normal);

    assert!((session.guard.alpha_at_transition - 0.5).abs() < 1e-5);
    assert!((overlay_alpha(&session.guard, 390) - 0.2).abs() < 1e-5);
    assert!(overlay_alpha(&session.guard, 450).abs() < 1e-5);
    assert!(overlay_frame(&session.guard, &config, 450).is_none());
}

#[test]
fn test_rearming_resumes_fade_from_current_value() {
    let config = base_config();
    let mut session = armed_session();

    tick(&mut session, &input_at(1, 0), &config, EffectLevel::Normal);
    hurt(&mut session, 20.0);
    tick(&mut session, &input_at(6, 0), &config, EffectLevel::Normal);
    hurt(&mut session, 4.0);
    session.note_damage(7);
    // Re-arm at 400 ms, 100 ms into the fade-out from 0.5.
    tick(&mut session, &input_at(8, 0), &config, EffectLevel::Normal);

    let expected = 0.5_f32 - 100.0 / 300.0;
    assert!((session.guard.alpha_at_transition - expected).abs() < 1e-4);
    assert!(session.guard.ready);
}

#[test]
fn test_missing_fallback_sound_buzzes() {
    let config = base_config();
    let mut session = armed_without_totem(&config);

    let effects = tick(&mut session, &input_at(2, 1), &config, EffectLevel::Normal);

    assert_eq!(effects.len(), 1);
    match &effects[0].effect {
        Effect::PlayCue { cue, volume, pitch } => {
            assert_eq!(*cue, CueKind::MissingBuzz);
            assert!((volume - 0.5).abs() < 1e-5);
            assert!((pitch - 0.5).abs() < 1e-5);
        }
        other => panic!("expected a buzz, got {other:?}"),
    }
}

#[test]
fn test_missing_fallback_text_shows_alert() {
    let mut config = base_config();
    config.missing_item_behavior = MissingItemBehavior::Text;
    let mut session = armed_without_totem(&config);

    let effects = tick(&mut session, &input_at(2, 1), &config, EffectLevel::Normal);

    assert_eq!(effects.len(), 1);
    match &effects[0].effect {
        Effect::ShowMessage { text, tone } => {
            assert_eq!(text, "No Ward Totem available!");
            assert_eq!(*tone, MessageTone::Alert);
        }
        other => panic!("expected an alert, got {other:?}"),
    }
}

#[test]
fn test_missing_fallback_both_emits_cue_then_text() {
    let mut config = base_config();
    config.missing_item_behavior = MissingItemBehavior::Both;
    let mut session = armed_without_totem(&config);

    let effects = tick(&mut session, &input_at(2, 1), &config, EffectLevel::Normal);

    assert_eq!(effects.len(), 2);
    assert!(matches!(effects[0].effect, Effect::PlayCue { .. }));
    assert!(matches!(effects[1].effect, Effect::ShowMessage { .. }));
}

#[test]
fn test_missing_fallback_none_is_silent() {
    let mut config = base_config();
    config.missing_item_behavior = MissingItemBehavior::None;
    let mut session = armed_without_totem(&config);

    let effects = tick(&mut session, &input_at(2, 1), &config, EffectLevel::Normal);

    assert!(effects.is_empty());
}

#[test]
fn test_buzz_ignores_low_health_sound_flag() {
    let mut config = base_config();
    config.low_health_sound = false;
    let mut session = armed_without_totem(&config);

    let effects = tick(&mut session, &input_at(2, 1), &config, EffectLevel::Normal);

    assert_eq!(cue_count(&effects, CueKind::MissingBuzz), 1);
}
