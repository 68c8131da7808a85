//! Shared 2D camera state.
//!
//! Part of the per-tick output snapshot. Mutated only by camera nodes
//! (`cameraFollow`, `setCameraZoom`); reset to defaults on scene load.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Active camera parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraState {
    #[serde(with = "crate::components::vec2xy")]
    pub position: Vec2,
    pub zoom: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}
