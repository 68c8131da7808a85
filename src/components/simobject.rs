//! Runtime projection of an authored game object.
//!
//! Created once per simulation start by copying the authored record and
//! lifting its transform into mutable `position`/`velocity` fields. All
//! simulation-time mutation flows through whole-object replacement in the
//! [`ObjectStore`](crate::resources::store::ObjectStore); nothing holds a
//! long-lived reference into the store.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::components::aistate::AiState;
use crate::components::animation::AnimationClip;
use crate::components::behavior::{Behavior, ScriptBehavior, TextRendererBehavior};
use crate::components::gameobject::GameObject;

/// A game object while the simulation is running.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatedGameObject {
    #[serde(flatten)]
    pub object: GameObject,
    #[serde(with = "crate::components::vec2xy")]
    pub position: Vec2,
    #[serde(default, with = "crate::components::vec2xy")]
    pub velocity: Vec2,
    /// Anchor for patrol motion; never changes after projection.
    #[serde(with = "crate::components::vec2xy")]
    pub initial_position: Vec2,
    #[serde(default)]
    pub is_grounded: bool,
    #[serde(default)]
    pub current_animation: Option<String>,
    #[serde(default)]
    pub animation_time: f32,
    #[serde(default = "default_speed")]
    pub animation_speed: f32,
    #[serde(default)]
    pub current_frame: usize,
    #[serde(default)]
    pub ai: Option<AiState>,
}

fn default_speed() -> f32 {
    1.0
}

impl SimulatedGameObject {
    /// Project an authored object into its runtime form.
    pub fn from_object(object: GameObject) -> Self {
        let position = object
            .transform()
            .map(|t| t.position)
            .unwrap_or(Vec2::ZERO);
        Self {
            object,
            position,
            velocity: Vec2::ZERO,
            initial_position: position,
            is_grounded: false,
            current_animation: None,
            animation_time: 0.0,
            animation_speed: 1.0,
            current_frame: 0,
            ai: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.object.id
    }

    pub fn name(&self) -> &str {
        &self.object.name
    }

    /// Transform scale, `(1, 1)` when no transform behavior is attached.
    pub fn scale(&self) -> Vec2 {
        self.object
            .transform()
            .map(|t| t.scale)
            .unwrap_or(Vec2::ONE)
    }

    /// The clip currently playing, if any.
    pub fn current_clip(&self) -> Option<&AnimationClip> {
        let name = self.current_animation.as_deref()?;
        self.object.animation(name)
    }

    pub fn script_mut(&mut self, name: &str) -> Option<&mut ScriptBehavior> {
        self.object.behaviors.iter_mut().find_map(|b| match b {
            Behavior::Script(s) if s.script == name => Some(s),
            _ => None,
        })
    }

    pub fn text_renderer_mut(&mut self) -> Option<&mut TextRendererBehavior> {
        self.object.behaviors.iter_mut().find_map(|b| match b {
            Behavior::TextRenderer(t) => Some(t),
            _ => None,
        })
    }
}
