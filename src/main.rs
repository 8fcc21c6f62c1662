//! Headless spritesheet animation demo.
//!
//! Runs the fox sprite for a fixed number of simulated ticks with scripted
//! input and logs the draw commands a rendering backend would receive.
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run --release -- --ticks 900 --seed 3
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info, warn};

use sheetanim::components::animator::AnimationControl;
use sheetanim::components::sprite::Sprite;
use sheetanim::game::{self, FOX_ANIMATIONS_JSON, ScriptedInput};
use sheetanim::resources::animationstore::AnimationStore;
use sheetanim::resources::drawqueue::DrawQueue;
use sheetanim::resources::gameconfig::EngineConfig;
use sheetanim::resources::input::InputState;

/// Spritesheet animator demo
#[derive(Parser)]
#[command(version, about = "Plays the fox spritesheet demo without a window")]
struct Cli {
    /// INI configuration file. Missing files fall back to defaults.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// JSON animation definitions. Overrides the config file.
    #[arg(long, value_name = "PATH")]
    animations: Option<PathBuf>,

    /// Number of ticks to simulate. Overrides the config file.
    #[arg(long)]
    ticks: Option<u64>,

    /// Tick length in milliseconds. Overrides the config file.
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Seed for the scripted input. Overrides the config file.
    #[arg(long)]
    seed: Option<u64>,

    /// Log a draw command every N ticks.
    #[arg(long, default_value_t = 30)]
    report_every: u64,
}

fn load_store(config: &EngineConfig, explicit: bool) -> Result<AnimationStore, String> {
    match AnimationStore::load_from_file(&config.animations_path) {
        Ok(store) => Ok(store),
        Err(e) if !explicit => {
            warn!("{e}; using built-in fox animations");
            AnimationStore::from_json_str(FOX_ANIMATIONS_JSON).map_err(|e| e.to_string())
        }
        Err(e) => Err(e.to_string()),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = EngineConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{e}; using defaults");
    }
    if let Some(path) = cli.animations.clone() {
        config.animations_path = path;
    }
    if let Some(ticks) = cli.ticks {
        config.ticks = ticks;
    }
    if let Some(tick_ms) = cli.tick_ms {
        config.tick_ms = tick_ms;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }

    let store = match load_store(&config, cli.animations.is_some()) {
        Ok(store) => store,
        Err(e) => {
            error!("Error loading animations: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut world = game::build_world(&config, store);
    let fox = match game::spawn_fox(&mut world) {
        Ok(entity) => entity,
        Err(e) => {
            error!("Error creating fox sprite: {e}");
            return ExitCode::FAILURE;
        }
    };
    let mut schedule = game::build_schedule();
    let mut input = ScriptedInput::new(config.seed);
    let dt = config.tick_seconds();

    info!(
        "Running {} ticks of {}ms (seed {})",
        config.ticks, config.tick_ms, config.seed
    );
    for frame in 0..config.ticks {
        let held = input.next_tick().to_vec();
        world.resource_mut::<InputState>().apply(&held);
        game::tick(&mut world, &mut schedule, dt);

        if cli.report_every > 0 && frame % cli.report_every == 0 {
            let playing = world
                .get::<Sprite>(fox)
                .and_then(|s| s.animator.as_ref())
                .and_then(|a| a.current_name().map(str::to_owned));
            let mut queue = world.resource_mut::<DrawQueue>();
            for cmd in queue.drain() {
                info!(
                    "tick {:>5} {:<10} src=({},{})-({},{}) pos=({:.0},{:.0}) scale=({},{})",
                    frame,
                    playing.as_deref().unwrap_or("-"),
                    cmd.params.source.min.x,
                    cmd.params.source.min.y,
                    cmd.params.source.max.x,
                    cmd.params.source.max.y,
                    cmd.params.position.x,
                    cmd.params.position.y,
                    cmd.params.scale.x,
                    cmd.params.scale.y,
                );
            }
        }
    }

    if let Some(animator) = world.get::<Sprite>(fox).and_then(|s| s.animator.as_ref()) {
        info!(
            "Finished on '{}' (paused: {}, cycle {:?})",
            animator.current_name().unwrap_or("-"),
            animator.is_paused(),
            animator.total_cycle_duration()
        );
    }
    ExitCode::SUCCESS
}
