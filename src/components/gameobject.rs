//! Authored game objects: identity, category, and attached behaviors.

use serde::{Deserialize, Serialize};

use crate::components::animation::AnimationClip;
use crate::components::behavior::{
    Behavior, CollisionType, PlatformControllerBehavior, SpriteRendererBehavior,
    TextRendererBehavior, TransformBehavior,
};

/// Category tag deciding default behaviors and how systems treat the object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Player,
    Enemy,
    Platform,
    Background,
    Bullet,
    Text,
    Hitbox,
    Empty,
}

impl Category {
    /// Parse the editor's category tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "player" => Some(Category::Player),
            "enemy" => Some(Category::Enemy),
            "platform" => Some(Category::Platform),
            "background" => Some(Category::Background),
            "bullet" => Some(Category::Bullet),
            "text" => Some(Category::Text),
            "hitbox" => Some(Category::Hitbox),
            "empty" => Some(Category::Empty),
            _ => None,
        }
    }

    /// Behavior set a freshly spawned object of this category starts with.
    pub fn default_behaviors(self) -> Vec<Behavior> {
        let transform = Behavior::Transform(TransformBehavior::default());
        match self {
            Category::Player | Category::Enemy | Category::Bullet => vec![
                transform,
                Behavior::SpriteRenderer(SpriteRendererBehavior::default()),
            ],
            Category::Platform => vec![
                transform,
                Behavior::PlatformController(PlatformControllerBehavior {
                    collision_type: CollisionType::Solid,
                    move_direction: glam::Vec2::ZERO,
                    move_speed: 0.0,
                    move_distance: 0.0,
                    can_grab: false,
                    is_visible: true,
                }),
            ],
            Category::Background => vec![
                transform,
                Behavior::BackgroundController(Default::default()),
            ],
            Category::Text => vec![
                transform,
                Behavior::TextRenderer(TextRendererBehavior::default()),
            ],
            Category::Hitbox | Category::Empty => vec![transform],
        }
    }
}

fn default_true() -> bool {
    true
}

/// An object as authored in the editor.
///
/// Identity is immutable; simulation-time mutation happens on the runtime
/// projection ([`SimulatedGameObject`](crate::components::simobject::SimulatedGameObject))
/// and only ever through whole-object replacement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameObject {
    pub id: String,
    pub name: String,
    pub category: Category,
    #[serde(default)]
    pub layer: String,
    #[serde(default)]
    pub behaviors: Vec<Behavior>,
    #[serde(default)]
    pub animations: Vec<AnimationClip>,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub use_custom_hitboxes: bool,
}

impl GameObject {
    pub fn transform(&self) -> Option<&TransformBehavior> {
        self.behaviors.iter().find_map(|b| b.as_transform())
    }

    pub fn platform_controller(&self) -> Option<&PlatformControllerBehavior> {
        self.behaviors.iter().find_map(|b| b.as_platform())
    }

    /// Script behavior with the given script name, if attached.
    pub fn script(&self, name: &str) -> Option<&crate::components::behavior::ScriptBehavior> {
        self.behaviors
            .iter()
            .find_map(|b| b.as_script().filter(|s| s.script == name))
    }

    pub fn animation(&self, name: &str) -> Option<&AnimationClip> {
        self.animations.iter().find(|c| c.name == name)
    }
}
