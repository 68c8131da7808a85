//! Behavior components attached to game objects.
//!
//! A behavior is a tagged variant keyed by `type` in the scene JSON. The set
//! is closed: the core knows six kinds and ignores nothing — an unknown tag
//! is a scene-format error surfaced at load time rather than skipped.
//!
//! `script` behaviors are the one open-ended spot: their property record is
//! declared by an authored script asset the core never sees, so properties
//! stay raw JSON and are read through the lenient typed accessors on
//! [`ScriptBehavior`]. A property of the wrong shape is logged and treated
//! as absent, never fatal.

use glam::Vec2;
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// How a platform interacts with bodies landing on or moving through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CollisionType {
    /// Blocks from every side.
    Solid,
    /// Blocks only downward landings; never blocks rising or side contact.
    Jumpthrough,
}

fn one_vec2() -> Vec2 {
    Vec2::ONE
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformBehavior {
    #[serde(default, with = "crate::components::vec2xy")]
    pub position: Vec2,
    #[serde(default = "one_vec2", with = "crate::components::vec2xy")]
    pub scale: Vec2,
    #[serde(default)]
    pub rotation: f32,
}

impl Default for TransformBehavior {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            scale: Vec2::ONE,
            rotation: 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpriteRendererBehavior {
    #[serde(default)]
    pub sprite: String,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub flip_x: bool,
    #[serde(default)]
    pub flip_y: bool,
}

impl Default for SpriteRendererBehavior {
    fn default() -> Self {
        Self {
            sprite: String::new(),
            visible: true,
            flip_x: false,
            flip_y: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformControllerBehavior {
    pub collision_type: CollisionType,
    /// Patrol direction; zero means the platform holds still.
    #[serde(default, with = "crate::components::vec2xy")]
    pub move_direction: Vec2,
    #[serde(default)]
    pub move_speed: f32,
    #[serde(default)]
    pub move_distance: f32,
    #[serde(default)]
    pub can_grab: bool,
    #[serde(default = "default_true")]
    pub is_visible: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundControllerBehavior {
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub parallax_factor: f32,
    #[serde(default)]
    pub repeat_x: bool,
    #[serde(default)]
    pub repeat_y: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRendererBehavior {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub font_size: f32,
    #[serde(default)]
    pub color: String,
}

/// Free-form properties owned by an externally authored script asset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptBehavior {
    #[serde(default)]
    pub script: String,
    #[serde(default)]
    pub properties: Map<String, JsonValue>,
}

impl ScriptBehavior {
    /// Numeric property. Accepts JSON numbers and numeric strings; anything
    /// else is logged once and read as absent.
    pub fn number(&self, key: &str) -> Option<f32> {
        match self.properties.get(key)? {
            JsonValue::Number(n) => n.as_f64().map(|v| v as f32),
            JsonValue::String(s) => match s.parse::<f32>() {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!(
                        "script '{}': property '{}' is not numeric ({s:?}), skipping",
                        self.script, key
                    );
                    None
                }
            },
            other => {
                warn!(
                    "script '{}': property '{}' is not numeric ({other}), skipping",
                    self.script, key
                );
                None
            }
        }
    }

    pub fn boolean(&self, key: &str) -> Option<bool> {
        match self.properties.get(key)? {
            JsonValue::Bool(b) => Some(*b),
            other => {
                warn!(
                    "script '{}': property '{}' is not a boolean ({other}), skipping",
                    self.script, key
                );
                None
            }
        }
    }

    pub fn string(&self, key: &str) -> Option<&str> {
        match self.properties.get(key)? {
            JsonValue::String(s) => Some(s.as_str()),
            other => {
                warn!(
                    "script '{}': property '{}' is not a string ({other}), skipping",
                    self.script, key
                );
                None
            }
        }
    }

    /// Overwrite or insert a raw property value.
    pub fn set(&mut self, key: impl Into<String>, value: JsonValue) {
        self.properties.insert(key.into(), value);
    }
}

/// One behavior attached to a game object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Behavior {
    Transform(TransformBehavior),
    SpriteRenderer(SpriteRendererBehavior),
    PlatformController(PlatformControllerBehavior),
    BackgroundController(BackgroundControllerBehavior),
    TextRenderer(TextRendererBehavior),
    Script(ScriptBehavior),
}

impl Behavior {
    pub fn as_transform(&self) -> Option<&TransformBehavior> {
        match self {
            Behavior::Transform(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_platform(&self) -> Option<&PlatformControllerBehavior> {
        match self {
            Behavior::PlatformController(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_script(&self) -> Option<&ScriptBehavior> {
        match self {
            Behavior::Script(s) => Some(s),
            _ => None,
        }
    }
}
