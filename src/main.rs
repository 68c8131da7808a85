//! Headless scene runner.
//!
//! The smallest possible "exported build" host: load a scene JSON, step the
//! simulation at a fixed rate, honor scene-change requests by loading
//! sibling scene files, and optionally dump the final snapshot as JSON.
//!
//! There is no renderer here. The runner exists to exercise the engine
//! façade end to end and to reproduce authored scenes deterministically
//! (fixed delta, seeded randomness) outside the editor.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- assets/scenes/level1.json --frames 600
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info, warn};

use nodalengine::components::scene::Scene;
use nodalengine::engine::Simulation;
use nodalengine::resources::config::RunnerConfig;

#[derive(Parser)]
#[command(version, about = "Headless runner for Nodal Engine scenes")]
struct Cli {
    /// Scene JSON file to simulate.
    scene: PathBuf,

    /// Number of frames to step (overrides the config file).
    #[arg(long)]
    frames: Option<u64>,

    /// Simulation rate in frames per second (overrides the config file).
    #[arg(long)]
    fps: Option<u32>,

    /// Random seed (overrides the config file).
    #[arg(long)]
    seed: Option<u64>,

    /// Path to an INI configuration file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the final object snapshot as JSON on exit.
    #[arg(long)]
    dump_snapshot: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => RunnerConfig::with_path(path.clone()),
        None => RunnerConfig::new(),
    };
    match config.load_from_file() {
        Ok(()) => {}
        Err(e) if cli.config.is_some() => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
        // No explicit config given; defaults are fine.
        Err(_) => {}
    }
    if let Some(frames) = cli.frames {
        config.max_frames = frames;
    }
    if let Some(fps) = cli.fps {
        config.target_fps = fps.max(1);
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }

    let scene = match Scene::from_file(&cli.scene) {
        Ok(scene) => scene,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let scene_dir = cli
        .scene
        .parent()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    info!(
        "Simulating {:?}: {} objects, {} nodes, {} fps, {} frames, seed {}",
        cli.scene,
        scene.game_objects.len(),
        scene.nodes.len(),
        config.target_fps,
        config.max_frames,
        config.seed
    );

    let delta = 1.0 / config.target_fps as f32;
    let mut sim = Simulation::new(&scene, config.seed);
    for _ in 0..config.max_frames {
        sim.step(delta);
        if let Some(request) = sim.take_scene_request() {
            let path = scene_dir.join(format!("{}.json", request));
            match Scene::from_file(&path) {
                Ok(next) => {
                    info!("Switching to scene '{}'", request);
                    sim.load_scene(&next);
                }
                Err(e) => warn!("Ignoring scene request '{}': {}", request, e),
            }
        }
    }

    let snapshot = sim.snapshot();
    info!(
        "Done: {} frames, {} objects, camera at ({}, {}) zoom {}",
        sim.frame(),
        snapshot.objects.len(),
        snapshot.camera.position.x,
        snapshot.camera.position.y,
        snapshot.camera.zoom
    );
    if cli.dump_snapshot {
        match serde_json::to_string_pretty(snapshot.objects) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("Failed to serialize snapshot: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
