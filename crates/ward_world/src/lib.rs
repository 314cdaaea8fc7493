//! Config persistence and session bootstrap shared by the ward harness.

use anyhow::{Context, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use ward_core::{
    session_id, Config, Counters, GuardState, Health, Inventory, ItemId, ItemStack, PlayerState,
    SessionMeta, SessionState, HOTBAR_SLOTS, SCHEMA_VERSION,
};

/// Stack kinds used to pad generated inventories.
const FILLER_KINDS: [&str; 4] = ["torch", "rope", "bandage", "dried_meat"];

/// Generated players start at vanilla full health.
const PLAYER_MAX_HEALTH: f32 = 20.0;

pub fn load_config(path: &Path) -> Result<Config> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let config: Config =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    Ok(sanitize_config(config))
}

pub fn save_config(path: &Path, config: &Config) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    let text = serde_json::to_string_pretty(config).context("serializing config")?;
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Loads the config, writing defaults on first run.
///
/// An unreadable or malformed file is reported and left exactly as found;
/// the run continues on defaults so a typo never bricks the session.
pub fn load_or_init(path: &Path) -> Config {
    if !path.exists() {
        let config = Config::default();
        match save_config(path, &config) {
            Ok(()) => tracing::info!("created default config at {}", path.display()),
            Err(err) => tracing::warn!("could not write default config: {err:#}"),
        }
        return config;
    }
    match load_config(path) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("config unusable, running with defaults: {err:#}");
            Config::default()
        }
    }
}

/// Replaces unusable field values with their defaults, warning about each.
///
/// A zero-or-negative threshold is not unusable: the engine reads it as
/// "30% of max health", so it passes through untouched.
pub fn sanitize_config(mut config: Config) -> Config {
    if !config.hp_threshold.is_finite() {
        tracing::warn!(
            "hp_threshold {} is not a usable number, using default",
            config.hp_threshold
        );
        config.hp_threshold = Config::default().hp_threshold;
    }
    if config.guarded_item.0.is_empty() {
        tracing::warn!("guarded_item is empty, using default");
        config.guarded_item = Config::default().guarded_item;
    }
    if config.swap_key.is_empty() {
        tracing::warn!("swap_key is empty, using default");
        config.swap_key = Config::default().swap_key;
    }
    config
}

// ---------------------------------------------------------------------------
// Session bootstrap
// ---------------------------------------------------------------------------

/// Shape of a generated session inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loadout {
    pub inventory_slots: usize,
    /// Guarded-item stacks scattered across free slots, one charge each.
    pub wards: u32,
    pub filler_stacks: usize,
}

impl Default for Loadout {
    fn default() -> Self {
        Self {
            inventory_slots: 36,
            wards: 2,
            filler_stacks: 6,
        }
    }
}

/// Builds a fresh session with the loadout scattered over random slots.
///
/// Panics if the loadout cannot hold a full hotbar.
pub fn build_session(
    seed: u64,
    config: &Config,
    loadout: &Loadout,
    rng: &mut impl Rng,
) -> SessionState {
    assert!(
        loadout.inventory_slots >= HOTBAR_SLOTS,
        "loadout must provide a full hotbar ({} slots < {HOTBAR_SLOTS})",
        loadout.inventory_slots,
    );
    let mut inventory = Inventory::with_slots(loadout.inventory_slots);
    for _ in 0..loadout.wards {
        scatter(&mut inventory, &config.guarded_item, 1, rng);
    }
    for i in 0..loadout.filler_stacks {
        let kind = ItemId(FILLER_KINDS[i % FILLER_KINDS.len()].to_string());
        let count = rng.gen_range(1..=8);
        scatter(&mut inventory, &kind, count, rng);
    }
    SessionState {
        meta: SessionMeta {
            session_id: session_id(rng),
            seed,
            schema_version: SCHEMA_VERSION,
            last_tick: 0,
        },
        player: Some(PlayerState {
            health: Health {
                current: PLAYER_MAX_HEALTH,
                max: PLAYER_MAX_HEALTH,
            },
            inventory,
            reserved: None,
        }),
        guard: GuardState::default(),
        counters: Counters { next_effect_id: 0 },
    }
}

/// Drops one stack into a random free slot; skips silently when full.
fn scatter(inventory: &mut Inventory, kind: &ItemId, count: u32, rng: &mut impl Rng) {
    let free: Vec<usize> = inventory
        .slots
        .iter()
        .enumerate()
        .filter_map(|(i, slot)| slot.is_none().then_some(i))
        .collect();
    if free.is_empty() {
        return;
    }
    let slot = free[rng.gen_range(0..free.len())];
    inventory.slots[slot] = Some(ItemStack {
        kind: kind.clone(),
        count,
    });
}
