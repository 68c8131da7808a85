//! The simulation façade shared by both hosts.
//!
//! The in-editor live preview and the exported standalone build each embed
//! one [`Simulation`] and drive it the same way: feed keyboard transitions,
//! call [`Simulation::step`] once per frame with the frame delta, render
//! the [`Snapshot`], and honor any scene request a `changeScene` node
//! queued. Everything behavioral lives below this façade, which is what
//! keeps the two hosts byte-for-byte consistent.
//!
//! # Tick order
//!
//! 1. due timers and countdowns fire their `finished` waves
//! 2. the animation clock advances all clips
//! 3. AI entities decide and move (their own physics pass)
//! 4. patrol platforms and projectiles integrate
//! 5. key press/release waves, then the `onUpdate` wave
//! 6. hitbox overlap detection fires `onCollision` waves
//!
//! While paused, only the key waves run (so an unpause binding keeps
//! working); the clock does not advance.

use glam::Vec2;

use crate::components::gameobject::Category;
use crate::components::scene::Scene;
use crate::components::simobject::SimulatedGameObject;
use crate::interpreter::context::GraphIndex;
use crate::interpreter::{run_event, RootEvent};
use crate::resources::camera::CameraState;
use crate::resources::input::KeyboardState;
use crate::resources::media::VideoState;
use crate::resources::simstate::SimState;
use crate::systems::collision::detect_overlaps;
use crate::systems::{ai, animation, kinematics, timers};

/// Per-tick output for the renderer.
#[derive(Debug)]
pub struct Snapshot<'a> {
    pub objects: &'a [SimulatedGameObject],
    pub camera: CameraState,
    pub video: &'a VideoState,
}

/// One running scene.
pub struct Simulation {
    graph: GraphIndex,
    state: SimState,
    seed: u64,
    started: bool,
    frame: u64,
}

impl Simulation {
    /// Build a simulation for a scene. `seed` fixes the random source so a
    /// run can be reproduced exactly.
    pub fn new(scene: &Scene, seed: u64) -> Self {
        Self {
            graph: GraphIndex::build(&scene.nodes, &scene.connections),
            state: SimState::new(scene.game_objects.clone(), seed),
            seed,
            started: false,
            frame: 0,
        }
    }

    /// Replace the running scene. All per-scene mutable state (timers,
    /// countdowns, trigger-once set, camera, media, input) resets to
    /// defaults; `onStart` roots run again on the next step.
    pub fn load_scene(&mut self, scene: &Scene) {
        self.graph = GraphIndex::build(&scene.nodes, &scene.connections);
        self.state = SimState::new(scene.game_objects.clone(), self.seed);
        self.started = false;
    }

    /// Advance the simulation by one tick.
    pub fn step(&mut self, delta: f32) {
        if !self.started {
            self.started = true;
            run_event(&self.graph, &mut self.state, delta, RootEvent::Start);
        }

        // Key waves run even while paused, so a pause toggle bound to a key
        // can resume the game.
        let pressed: Vec<String> = self
            .state
            .keyboard
            .pressed_keys()
            .map(str::to_string)
            .collect();
        let released: Vec<String> = self
            .state
            .keyboard
            .released_keys()
            .map(str::to_string)
            .collect();

        if !self.state.paused {
            self.state.clock_ms += delta as f64 * 1000.0;
            timers::update_timers(&self.graph, &mut self.state, delta);
            animation::advance_animations(&mut self.state.store, delta);
            ai::update_ai(&mut self.state, delta);
            kinematics::update_kinematics(&mut self.state.store, delta);
        }

        for key in &pressed {
            run_event(
                &self.graph,
                &mut self.state,
                delta,
                RootEvent::KeyPress(key),
            );
        }
        for key in &released {
            run_event(
                &self.graph,
                &mut self.state,
                delta,
                RootEvent::KeyRelease(key),
            );
        }

        if !self.state.paused {
            run_event(&self.graph, &mut self.state, delta, RootEvent::Update);

            for event in detect_overlaps(self.state.store.objects()) {
                run_event(
                    &self.graph,
                    &mut self.state,
                    delta,
                    RootEvent::Collision(&event),
                );
            }
        }

        self.state.keyboard.end_tick();
        self.frame += 1;
    }

    /// Current output snapshot: the object list, camera, and video state.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            objects: self.state.store.objects(),
            camera: self.state.camera,
            video: &self.state.video,
        }
    }

    pub fn objects(&self) -> &[SimulatedGameObject] {
        self.state.store.objects()
    }

    /// Keyboard feed for the host.
    pub fn keyboard_mut(&mut self) -> &mut KeyboardState {
        &mut self.state.keyboard
    }

    pub fn pause(&mut self) {
        self.state.paused = true;
    }

    pub fn resume(&mut self) {
        self.state.paused = false;
    }

    pub fn toggle_pause(&mut self) {
        self.state.paused = !self.state.paused;
    }

    pub fn is_paused(&self) -> bool {
        self.state.paused
    }

    /// Spawn a fresh object of the category at a position; the engine-side
    /// half of the façade's `spawnGameObject`.
    pub fn spawn_game_object(&mut self, category: Category, position: Vec2) -> String {
        self.state.store.spawn(category, position)
    }

    /// Scene change queued by a `changeScene` node, if any. The host is
    /// expected to follow up with [`Simulation::load_scene`].
    pub fn take_scene_request(&mut self) -> Option<String> {
        self.state.scene_request.take()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Direct state access for tests and embedding hosts.
    pub fn state(&self) -> &SimState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SimState {
        &mut self.state
    }
}
