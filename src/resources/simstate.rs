//! Aggregate mutable simulation state.
//!
//! Everything a tick may read or write lives here, created on scene load and
//! reset on reload. There is no global singleton: the engine owns one
//! [`SimState`] and threads it through the execution context, so the live
//! preview and the exported build share state-handling code exactly.

use fastrand::Rng;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::components::gameobject::GameObject;
use crate::interpreter::value::Value;
use crate::resources::camera::CameraState;
use crate::resources::input::KeyboardState;
use crate::resources::media::{AudioChannels, VideoState};
use crate::resources::store::ObjectStore;
use crate::resources::timers::{CountdownStore, TimerStore};

/// All per-scene mutable state of the simulation.
pub struct SimState {
    pub store: ObjectStore,
    pub keyboard: KeyboardState,
    pub camera: CameraState,
    pub audio: AudioChannels,
    pub video: VideoState,
    pub timers: TimerStore,
    pub countdowns: CountdownStore,
    /// Node ids whose `triggerOnce` already fired this simulation lifetime.
    pub triggered_once: FxHashSet<String>,
    /// Tick-scoped memo of node outputs, keyed `(node_id, output_pin_id)`.
    /// Cleared at the start of every root wave.
    pub node_cache: FxHashMap<(String, String), Value>,
    /// Deterministic random source, seeded by the host.
    pub rng: Rng,
    /// Simulation clock in milliseconds, accumulated from tick deltas.
    pub clock_ms: f64,
    /// Scene change requested by a `changeScene` node; the host collects it
    /// via the engine façade.
    pub scene_request: Option<String>,
    pub paused: bool,
    /// Entity+clip pairs already warned about, to keep the log readable.
    pub warned_missing_clips: FxHashSet<String>,
}

impl SimState {
    /// Build the state for a fresh scene.
    pub fn new(objects: Vec<GameObject>, seed: u64) -> Self {
        Self {
            store: ObjectStore::from_objects(objects),
            keyboard: KeyboardState::default(),
            camera: CameraState::default(),
            audio: AudioChannels::default(),
            video: VideoState::default(),
            timers: TimerStore::default(),
            countdowns: CountdownStore::default(),
            triggered_once: FxHashSet::default(),
            node_cache: FxHashMap::default(),
            rng: Rng::with_seed(seed),
            clock_ms: 0.0,
            scene_request: None,
            paused: false,
            warned_missing_clips: FxHashSet::default(),
        }
    }

    /// Clear the per-wave output memo.
    pub fn clear_node_cache(&mut self) {
        self.node_cache.clear();
    }

    /// Cached value for a node output, if computed this wave.
    pub fn cached(&self, node_id: &str, pin_id: &str) -> Option<&Value> {
        self.node_cache
            .get(&(node_id.to_string(), pin_id.to_string()))
    }

    /// Record a node output for the rest of the wave.
    pub fn cache_output(&mut self, node_id: &str, pin_id: &str, value: Value) {
        self.node_cache
            .insert((node_id.to_string(), pin_id.to_string()), value);
    }
}
