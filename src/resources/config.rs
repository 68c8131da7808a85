//! Headless runner configuration.
//!
//! Settings loaded from an INI configuration file. Provides defaults for
//! safe startup; missing values keep their defaults.
//!
//! # Configuration File Format
//!
//! ```ini
//! [runner]
//! target_fps = 60
//! max_frames = 600
//! seed = 0
//! ```

use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_MAX_FRAMES: u64 = 600;
const DEFAULT_SEED: u64 = 0;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Runner configuration.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Simulation step rate; the fixed delta is `1 / target_fps`.
    pub target_fps: u32,
    /// How many frames to step before exiting.
    pub max_frames: u64,
    /// Seed for the simulation's random source.
    pub seed: u64,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RunnerConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            target_fps: DEFAULT_TARGET_FPS,
            max_frames: DEFAULT_MAX_FRAMES,
            seed: DEFAULT_SEED,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        if let Some(fps) = config.getuint("runner", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }
        if let Some(frames) = config.getuint("runner", "max_frames").ok().flatten() {
            self.max_frames = frames;
        }
        if let Some(seed) = config.getuint("runner", "seed").ok().flatten() {
            self.seed = seed;
        }

        info!(
            "Loaded config: fps={}, max_frames={}, seed={}",
            self.target_fps, self.max_frames, self.seed
        );

        Ok(())
    }
}
