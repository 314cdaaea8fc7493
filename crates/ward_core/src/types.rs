//! Type definitions for `ward_core`.
//!
//! All public types, structs, enums, and ID newtypes used by the engine.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Bumped whenever a state type changes shape.
pub const SCHEMA_VERSION: u32 = 1;

/// The hotbar is the first slice of the inventory; everything after it is
/// the backpack.
pub const HOTBAR_SLOTS: usize = 9;

// ---------------------------------------------------------------------------
// ID newtypes
// ---------------------------------------------------------------------------

macro_rules! string_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(ItemId);
string_id!(EffectId);

impl ItemId {
    /// Human label for messages and the overlay prompt:
    /// `ward_totem` becomes `Ward Totem`.
    pub fn label(&self) -> String {
        let mut label = String::with_capacity(self.0.len());
        for (i, word) in self.0.split('_').enumerate() {
            if i > 0 {
                label.push(' ');
            }
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                label.extend(first.to_uppercase());
                label.push_str(chars.as_str());
            }
        }
        label
    }
}

// ---------------------------------------------------------------------------
// Core enums
// ---------------------------------------------------------------------------

/// Scan order for locating the guarded item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchPriority {
    HotbarFirst,
    InventoryOnly,
    IgnoreInventory,
}

/// Response when a swap press finds no guarded item anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissingItemBehavior {
    None,
    Sound,
    Text,
    Both,
}

/// Screen corner (or center) the host should place the overlay at. Pixel
/// placement is the host's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverlayAnchor {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageTone {
    Confirm,
    Info,
    Alert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CueKind {
    ReadyChime,
    SwapClick,
    MissingBuzz,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectLevel {
    Normal,
    Debug,
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Engine configuration. Every field has a serde default so partial config
/// files load; unknown keys are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Health at or below this arms the trigger. A threshold at or below
    /// zero means "30% of max health".
    #[serde(default = "default_hp_threshold")]
    pub hp_threshold: f32,
    #[serde(default = "default_guarded_item")]
    pub guarded_item: ItemId,
    /// Key binding string carried for the host and the overlay prompt.
    #[serde(default = "default_swap_key")]
    pub swap_key: String,
    #[serde(default = "default_priority")]
    pub priority: SearchPriority,
    /// Gates the one-shot ready chime. The missing-item buzz is separate.
    #[serde(default = "default_low_health_sound")]
    pub low_health_sound: bool,
    /// Gates the overlay prompt entirely.
    #[serde(default = "default_warning_text")]
    pub warning_text: bool,
    /// When set, readiness also requires damage within the combat window.
    #[serde(default = "default_fight_only")]
    pub fight_only: bool,
    #[serde(default = "default_missing_item_behavior")]
    pub missing_item_behavior: MissingItemBehavior,
    #[serde(default = "default_overlay_anchor")]
    pub overlay_anchor: OverlayAnchor,
}

fn default_enabled() -> bool {
    true
}

fn default_hp_threshold() -> f32 {
    6.0
}

fn default_guarded_item() -> ItemId {
    ItemId("ward_totem".to_string())
}

fn default_swap_key() -> String {
    "key.keyboard.g".to_string()
}

fn default_priority() -> SearchPriority {
    SearchPriority::HotbarFirst
}

fn default_low_health_sound() -> bool {
    true
}

fn default_warning_text() -> bool {
    true
}

fn default_fight_only() -> bool {
    true
}

fn default_missing_item_behavior() -> MissingItemBehavior {
    MissingItemBehavior::Sound
}

fn default_overlay_anchor() -> OverlayAnchor {
    OverlayAnchor::BottomRight
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            hp_threshold: default_hp_threshold(),
            guarded_item: default_guarded_item(),
            swap_key: default_swap_key(),
            priority: default_priority(),
            low_health_sound: default_low_health_sound(),
            warning_text: default_warning_text(),
            fight_only: default_fight_only(),
            missing_item_behavior: default_missing_item_behavior(),
            overlay_anchor: default_overlay_anchor(),
        }
    }
}

// ---------------------------------------------------------------------------
// State types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub kind: ItemId,
    pub count: u32,
}

impl ItemStack {
    /// A stack counts as holding `kind` only while it has charges left.
    pub fn matches(&self, kind: &ItemId) -> bool {
        self.kind == *kind && self.count > 0
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    pub slots: Vec<Option<ItemStack>>,
}

impl Inventory {
    pub fn with_slots(count: usize) -> Self {
        Self {
            slots: vec![None; count],
        }
    }

    /// End of the hotbar range, clamped for inventories shorter than a full
    /// hotbar.
    pub fn hotbar_end(&self) -> usize {
        self.slots.len().min(HOTBAR_SLOTS)
    }

    pub fn count_of(&self, kind: &ItemId) -> u64 {
        self.slots
            .iter()
            .flatten()
            .filter(|stack| stack.kind == *kind)
            .map(|stack| u64::from(stack.count))
            .sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    pub health: Health,
    pub inventory: Inventory,
    /// The equipment slot the engine fills. Empty or exactly one stack.
    pub reserved: Option<ItemStack>,
}

impl PlayerState {
    pub fn reserved_holds(&self, kind: &ItemId) -> bool {
        self.reserved.as_ref().is_some_and(|stack| stack.matches(kind))
    }
}

/// Readiness latch plus the overlay fade clock.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuardState {
    pub ready: bool,
    /// World tick of the last damage the host reported via `note_damage`.
    pub last_damage_tick: Option<u64>,
    /// Wall-clock instant of the last readiness flip. `None` until the first
    /// flip.
    pub last_transition_ms: Option<u64>,
    /// Overlay alpha captured at the last flip; fades resume from here.
    pub alpha_at_transition: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionMeta {
    pub session_id: Uuid,
    pub seed: u64,
    pub schema_version: u32,
    /// World tick of the most recent `tick` call.
    pub last_tick: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Counters {
    pub next_effect_id: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub meta: SessionMeta,
    /// `None` while no player is loaded (menus, loading screens). The engine
    /// is a silent no-op then.
    pub player: Option<PlayerState>,
    pub guard: GuardState,
    pub counters: Counters,
}

impl SessionState {
    /// Host damage hook. Call when the player takes damage, with the world
    /// tick it landed on; this is what opens the combat window.
    pub fn note_damage(&mut self, world_tick: u64) {
        self.guard.last_damage_tick = Some(world_tick);
    }
}

/// Per-tick input from the host.
///
/// Two clocks ride along: `world_tick` drives the combat window and
/// `now_ms` drives overlay fades. Hosts that render faster than they tick
/// pass the same `now_ms` source to `overlay_frame` between ticks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TickInput {
    pub world_tick: u64,
    pub now_ms: u64,
    /// Swap key presses accumulated since the previous tick, drained in
    /// arrival order.
    pub swap_presses: u32,
}

// ---------------------------------------------------------------------------
// Effect types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectEnvelope {
    pub id: EffectId,
    pub tick: u64,
    pub effect: Effect,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Effect {
    ReadinessChanged {
        ready: bool,
    },
    PlayCue {
        cue: CueKind,
        volume: f32,
        pitch: f32,
    },
    ShowMessage {
        text: String,
        tone: MessageTone,
    },
    ItemEquipped {
        kind: ItemId,
        from_slot: usize,
        /// What the exchange moved back into `from_slot`, if anything.
        displaced: Option<ItemStack>,
    },
    /// Only emitted at `EffectLevel::Debug`. Snapshot of the trigger
    /// evaluation taken at the start of the tick.
    TriggerTrace {
        low_health: bool,
        in_combat: bool,
        suppressed: bool,
        ready: bool,
    },
}

// ---------------------------------------------------------------------------
// Overlay frame
// ---------------------------------------------------------------------------

/// Ready-to-draw overlay description. Produced by `overlay_frame` only while
/// there is something to show.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayFrame {
    pub anchor: OverlayAnchor,
    pub text: String,
    pub alpha: f32,
    /// Text color with the fade alpha packed into the top byte.
    pub color_argb: u32,
    /// Backing fill, present only while the text is solid enough to need it.
    pub background_argb: Option<u32>,
}
