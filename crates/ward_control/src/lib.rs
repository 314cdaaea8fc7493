use rand::Rng;
use serde::{Deserialize, Serialize};
use ward_core::{overlay_frame, Config, ItemId, PlayerState, SessionState};

pub trait PressSource {
    fn presses(&mut self, session: &SessionState, config: &Config, now_ms: u64) -> u32;
}

/// Presses the swap key the way a player would:
/// 1. Notice the overlay prompt once it becomes visible.
/// 2. Wait out a fixed reaction delay.
/// 3. Press once, then wait for the next sighting.
pub struct ReflexPilot {
    reaction_ms: u64,
    noticed_at_ms: Option<u64>,
}

impl ReflexPilot {
    pub fn new(reaction_ms: u64) -> Self {
        Self {
            reaction_ms,
            noticed_at_ms: None,
        }
    }
}

impl PressSource for ReflexPilot {
    fn presses(&mut self, session: &SessionState, config: &Config, now_ms: u64) -> u32 {
        if overlay_frame(&session.guard, config, now_ms).is_none() {
            self.noticed_at_ms = None;
            return 0;
        }
        match self.noticed_at_ms {
            None => {
                self.noticed_at_ms = Some(now_ms);
                0
            }
            Some(seen) if now_ms.saturating_sub(seen) >= self.reaction_ms => {
                self.noticed_at_ms = None;
                1
            }
            Some(_) => 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Skirmish
// ---------------------------------------------------------------------------

/// Scripted combat pressure for harness runs: random strikes, slow recovery,
/// and the ward-or-die resolution on a lethal hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skirmish {
    pub hit_chance: f64,
    pub min_hit: f32,
    pub max_hit: f32,
    pub recover_chance: f64,
    pub recover_amount: f32,
    /// Health the player is left with when a reserved ward absorbs a
    /// lethal hit.
    pub revive_health: f32,
}

impl Default for Skirmish {
    fn default() -> Self {
        Self {
            hit_chance: 0.35,
            min_hit: 1.0,
            max_hit: 4.0,
            recover_chance: 0.25,
            recover_amount: 1.0,
            revive_health: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SkirmishEvent {
    Struck { amount: f32 },
    Recovered { amount: f32 },
    /// A lethal hit landed while a ward was reserved; one charge consumed.
    WardSpent,
    /// A lethal hit landed with no ward reserved. The run respawns the
    /// player at full health to keep going.
    Downed,
}

impl Skirmish {
    /// Advances the fight by one tick, mutating player health and the
    /// damage recency record.
    ///
    /// All three rolls are drawn every tick, so the rng stream shape does
    /// not depend on outcomes.
    pub fn advance(
        &self,
        session: &mut SessionState,
        config: &Config,
        world_tick: u64,
        rng: &mut impl Rng,
    ) -> Vec<SkirmishEvent> {
        let mut events = Vec::new();
        let hit = rng.gen_bool(self.hit_chance);
        let amount = rng.gen_range(self.min_hit..=self.max_hit);
        let recovers = rng.gen_bool(self.recover_chance);

        if hit && session.player.is_some() {
            session.note_damage(world_tick);
        }
        let Some(player) = session.player.as_mut() else {
            return events;
        };

        if hit {
            if player.health.current - amount <= 0.0 {
                if spend_ward(player, &config.guarded_item) {
                    player.health.current = self.revive_health;
                    events.push(SkirmishEvent::WardSpent);
                } else {
                    player.health.current = player.health.max;
                    events.push(SkirmishEvent::Downed);
                }
            } else {
                player.health.current -= amount;
                events.push(SkirmishEvent::Struck { amount });
            }
        } else if recovers && player.health.current < player.health.max {
            let amount = self
                .recover_amount
                .min(player.health.max - player.health.current);
            player.health.current += amount;
            events.push(SkirmishEvent::Recovered { amount });
        }
        events
    }
}

/// Consumes one charge from the reserved stack if it holds the guarded item.
fn spend_ward(player: &mut PlayerState, kind: &ItemId) -> bool {
    let Some(reserved) = player.reserved.as_mut() else {
        return false;
    };
    if !reserved.matches(kind) {
        return false;
    }
    reserved.count -= 1;
    if reserved.count == 0 {
        player.reserved = None;
    }
    true
}
