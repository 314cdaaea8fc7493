//! Overlay fade state as a pure function of elapsed time.
//!
//! `GuardState` only records when the last readiness flip happened and what
//! the alpha was at that instant; alpha at any later moment is computed on
//! demand. Hosts may call these at render rate between ticks.

use crate::{Config, GuardState, OverlayFrame};

/// Wall-clock milliseconds per world tick at the fixed 20 Hz rate.
pub const MILLIS_PER_TICK: u64 = 50;

/// Linear fade-in duration from alpha 0 to 1.
pub const FADE_IN_MS: u64 = 500;

/// Linear fade-out duration from alpha 1 to 0.
pub const FADE_OUT_MS: u64 = 300;

/// The backing fill only appears once the text is this solid.
const BACKGROUND_VISIBILITY_FLOOR: f32 = 0.5;

/// Backing fill opacity relative to the text alpha.
const BACKGROUND_ALPHA_SCALE: f32 = 0.3;

const TEXT_RGB: u32 = 0x00FF_FFFF;
const BACKGROUND_RGB: u32 = 0x0000_0000;

/// Current overlay opacity in `[0, 1]`.
///
/// Fades run linearly from the alpha captured at the last readiness flip,
/// so a fade interrupted mid-flight resumes from its current value instead
/// of snapping to a rail. Elapsed time saturates: a clock that jumps
/// backwards freezes the fade.
pub fn overlay_alpha(guard: &GuardState, now_ms: u64) -> f32 {
    let Some(transition_ms) = guard.last_transition_ms else {
        return if guard.ready { 1.0 } else { 0.0 };
    };
    let elapsed = now_ms.saturating_sub(transition_ms) as f32;
    if guard.ready {
        (guard.alpha_at_transition + elapsed / FADE_IN_MS as f32).min(1.0)
    } else {
        (guard.alpha_at_transition - elapsed / FADE_OUT_MS as f32).max(0.0)
    }
}

/// Latches a new readiness value, recording the hand-off point the next
/// fade resumes from.
pub(crate) fn set_readiness(guard: &mut GuardState, ready: bool, now_ms: u64) {
    guard.alpha_at_transition = overlay_alpha(guard, now_ms);
    guard.last_transition_ms = Some(now_ms);
    guard.ready = ready;
}

/// Drawable overlay description, or `None` when there is nothing to show
/// (prompt disabled, or fully faded out).
pub fn overlay_frame(guard: &GuardState, config: &Config, now_ms: u64) -> Option<OverlayFrame> {
    if !config.warning_text {
        return None;
    }
    let alpha = overlay_alpha(guard, now_ms);
    if alpha <= 0.0 {
        return None;
    }
    let text = format!(
        "{} ready - press {}",
        config.guarded_item.label(),
        key_label(&config.swap_key)
    );
    let background_argb = (alpha > BACKGROUND_VISIBILITY_FLOOR)
        .then(|| pack_argb(alpha * BACKGROUND_ALPHA_SCALE, BACKGROUND_RGB));
    Some(OverlayFrame {
        anchor: config.overlay_anchor,
        text,
        alpha,
        color_argb: pack_argb(alpha, TEXT_RGB),
        background_argb,
    })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn pack_argb(alpha: f32, rgb: u32) -> u32 {
    let byte = (alpha.clamp(0.0, 1.0) * 255.0) as u32;
    (byte << 24) | (rgb & 0x00FF_FFFF)
}

/// Display label for a key binding string: the last dot-segment, uppercased
/// (`key.keyboard.g` shows as `G`).
pub(crate) fn key_label(swap_key: &str) -> String {
    swap_key
        .rsplit('.')
        .next()
        .unwrap_or(swap_key)
        .to_uppercase()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
