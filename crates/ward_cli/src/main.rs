use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::filter::EnvFilter;
use ward_control::{PressSource, ReflexPilot, Skirmish, SkirmishEvent};
use ward_core::{
    overlay_alpha, Config, Effect, EffectEnvelope, EffectLevel, SessionState, TickInput,
    MILLIS_PER_TICK,
};
use ward_world::{build_session, load_or_init, save_config, Loadout};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "ward_cli", about = "Low-health ward auto-equip harness")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scripted skirmish against the engine for a fixed number of ticks.
    Run {
        #[arg(long, default_value_t = 1200)]
        ticks: u64,
        /// Session seed; random when omitted.
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value = "ward.json")]
        config: PathBuf,
        /// Simulated player reaction time in milliseconds.
        #[arg(long, default_value_t = 350)]
        reaction_ms: u64,
        /// Chance per tick that the skirmish lands a hit.
        #[arg(long, default_value_t = 0.35, value_parser = parse_chance)]
        hit_chance: f64,
        /// Ticks between status lines.
        #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u64).range(1..))]
        print_every: u64,
        #[arg(long, default_value = "normal", value_parser = ["normal", "debug"])]
        effect_level: String,
        /// Disable the runs/ directory artifacts (run_info.json, effects.jsonl).
        #[arg(long)]
        no_log: bool,
    },
    /// Write a fresh default config file.
    InitConfig {
        #[arg(long, default_value = "ward.json")]
        path: PathBuf,
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

/// Parses a per-tick probability argument, rejecting values outside `0.0..=1.0`.
fn parse_chance(raw: &str) -> Result<f64, String> {
    let chance: f64 = raw.parse().map_err(|err| format!("{err}"))?;
    if (0.0..=1.0).contains(&chance) {
        Ok(chance)
    } else {
        Err(format!("{chance} is outside 0.0..=1.0"))
    }
}

// ---------------------------------------------------------------------------
// Run artifacts
// ---------------------------------------------------------------------------

fn generate_run_id(seed: u64) -> String {
    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    format!("{timestamp}_seed{seed}")
}

fn create_run_dir(run_id: &str) -> Result<PathBuf> {
    let dir = PathBuf::from("runs").join(run_id);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("creating run directory: {}", dir.display()))?;
    Ok(dir)
}

#[allow(clippy::too_many_arguments)]
fn write_run_info(
    dir: &Path,
    run_id: &str,
    session: &SessionState,
    config: &Config,
    loadout: &Loadout,
    skirmish: &Skirmish,
    ticks: u64,
    reaction_ms: u64,
) -> Result<()> {
    let info = serde_json::json!({
        "run_id": run_id,
        "seed": session.meta.seed,
        "session_id": session.meta.session_id,
        "schema_version": session.meta.schema_version,
        "runner": "ward_cli",
        "config": config,
        "loadout": loadout,
        "skirmish": skirmish,
        "args": {
            "ticks": ticks,
            "reaction_ms": reaction_ms,
        }
    });
    let path = dir.join("run_info.json");
    let file =
        std::fs::File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(file, &info)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Run loop
// ---------------------------------------------------------------------------

#[allow(clippy::too_many_arguments)]
fn run(
    ticks: u64,
    seed: Option<u64>,
    config_path: &Path,
    reaction_ms: u64,
    hit_chance: f64,
    print_every: u64,
    effect_level: EffectLevel,
    no_log: bool,
) -> Result<()> {
    let config = load_or_init(config_path);
    let resolved_seed = seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(resolved_seed);
    let loadout = Loadout::default();
    let mut session = build_session(resolved_seed, &config, &loadout, &mut rng);

    let skirmish = Skirmish {
        hit_chance,
        ..Skirmish::default()
    };
    let mut pilot = ReflexPilot::new(reaction_ms);

    let mut effects_log = None;
    if !no_log {
        let run_id = generate_run_id(resolved_seed);
        let run_dir = create_run_dir(&run_id)?;
        write_run_info(
            &run_dir,
            &run_id,
            &session,
            &config,
            &loadout,
            &skirmish,
            ticks,
            reaction_ms,
        )?;
        let path = run_dir.join("effects.jsonl");
        let file =
            std::fs::File::create(&path).with_context(|| format!("creating {}", path.display()))?;
        effects_log = Some(std::io::BufWriter::new(file));
        println!("Run directory: {}", run_dir.display());
    }

    println!(
        "Starting skirmish: ticks={ticks} seed={resolved_seed} item={} threshold={}",
        config.guarded_item, config.hp_threshold,
    );
    println!("{}", "-".repeat(72));

    let mut equips = 0u64;
    let mut wards_spent = 0u64;
    let mut downs = 0u64;

    for world_tick in 0..ticks {
        let now_ms = world_tick * MILLIS_PER_TICK;

        for event in skirmish.advance(&mut session, &config, world_tick, &mut rng) {
            match event {
                SkirmishEvent::WardSpent => {
                    wards_spent += 1;
                    println!("*** WARD SPENT at tick={world_tick:04} ***");
                }
                SkirmishEvent::Downed => {
                    downs += 1;
                    println!("*** DOWNED at tick={world_tick:04} (no ward equipped) ***");
                }
                SkirmishEvent::Struck { .. } | SkirmishEvent::Recovered { .. } => {}
            }
        }

        let input = TickInput {
            world_tick,
            now_ms,
            swap_presses: pilot.presses(&session, &config, now_ms),
        };
        let effects = ward_core::tick(&mut session, &input, &config, effect_level);

        for envelope in &effects {
            print_effect(envelope, world_tick);
            if matches!(envelope.effect, Effect::ItemEquipped { .. }) {
                equips += 1;
            }
            if let Some(ref mut log) = effects_log {
                serde_json::to_writer(&mut *log, envelope).context("writing effects log")?;
                writeln!(log).context("writing effects log")?;
            }
        }

        if world_tick % print_every == 0 {
            print_status(&session, &config, now_ms);
        }
    }

    println!("{}", "-".repeat(72));
    println!("Done. equips={equips} wards_spent={wards_spent} downs={downs}");
    print_status(&session, &config, ticks * MILLIS_PER_TICK);

    if let Some(mut log) = effects_log {
        log.flush().context("final effects flush")?;
    }
    Ok(())
}

fn print_effect(envelope: &EffectEnvelope, world_tick: u64) {
    match &envelope.effect {
        Effect::ItemEquipped {
            kind, from_slot, ..
        } => {
            println!("*** {kind} EQUIPPED from slot {from_slot} at tick={world_tick:04} ***");
        }
        Effect::ShowMessage { text, .. } => println!("  [msg] {text}"),
        Effect::PlayCue { cue, .. } => println!("  [cue] {cue:?}"),
        Effect::ReadinessChanged { ready } => println!("  [trigger] ready={ready}"),
        Effect::TriggerTrace {
            low_health,
            in_combat,
            suppressed,
            ready,
        } => {
            println!(
                "  [trace] low_health={low_health} in_combat={in_combat} \
                 suppressed={suppressed} ready={ready}"
            );
        }
    }
}

fn print_status(session: &SessionState, config: &Config, now_ms: u64) {
    let tick = session.meta.last_tick;
    let Some(player) = session.player.as_ref() else {
        println!("[tick={tick:04}]  no player");
        return;
    };
    let reserved = player.reserved.as_ref().map_or_else(
        || "empty".to_string(),
        |stack| format!("{} x{}", stack.kind, stack.count),
    );
    println!(
        "[tick={tick:04}]  hp={current:.1}/{max:.1}  ready={ready}  alpha={alpha:.2}  \
         reserved={reserved}  stowed={stowed}",
        current = player.health.current,
        max = player.health.max,
        ready = session.guard.ready,
        alpha = overlay_alpha(&session.guard, now_ms),
        stowed = player.inventory.count_of(&config.guarded_item),
    );
}

fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }
    let config = Config::default();
    save_config(path, &config)?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            ticks,
            seed,
            config,
            reaction_ms,
            hit_chance,
            print_every,
            effect_level,
            no_log,
        } => {
            let level = match effect_level.as_str() {
                "debug" => EffectLevel::Debug,
                _ => EffectLevel::Normal,
            };
            run(
                ticks,
                seed,
                &config,
                reaction_ms,
                hit_chance,
                print_every,
                level,
                no_log,
            )?;
        }
        Commands::InitConfig { path, force } => init_config(&path, force)?,
    }
    Ok(())
}
