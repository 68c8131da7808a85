//! Animation clip data: frames, playback parameters, and authored hitboxes.
//!
//! Clips are authored per object in the editor and carried verbatim into the
//! simulation. Playback state (current clip, time, frame index) lives on the
//! runtime object, not here; see
//! [`SimulatedGameObject`](crate::components::simobject::SimulatedGameObject)
//! and the clock in [`crate::systems::animation`].

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// An authored axis-aligned collision rectangle, in frame-local pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hitbox {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub width: f32,
    #[serde(default)]
    pub height: f32,
    /// When set, the hitbox always equals the full rendered sprite rectangle
    /// and the authored x/y/width/height are ignored.
    #[serde(default)]
    pub locked_to_sprite_bounds: bool,
}

/// One frame of a clip.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationFrame {
    pub sprite: String,
    /// Pixel size of the source sprite the hitboxes were authored against.
    /// Needed to scale authored hitboxes to the rendered size.
    #[serde(default)]
    pub source_width: Option<f32>,
    #[serde(default)]
    pub source_height: Option<f32>,
    #[serde(default)]
    pub hitboxes: SmallVec<[Hitbox; 4]>,
}

/// A named, ordered frame sequence with playback parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationClip {
    pub name: String,
    #[serde(default)]
    pub frames: Vec<AnimationFrame>,
    pub fps: f32,
    /// Whether playback restarts after the last frame.
    #[serde(rename = "loop", default)]
    pub looped: bool,
    /// All frames share frame 0's hitbox list.
    #[serde(default)]
    pub sync_hitboxes: bool,
}

impl AnimationClip {
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Authored duration in seconds. Zero-frame or zero-fps clips report 0.
    pub fn duration(&self) -> f32 {
        if self.fps <= 0.0 {
            return 0.0;
        }
        self.frames.len() as f32 / self.fps
    }

    /// The frame whose hitboxes apply while `frame_index` is displayed.
    ///
    /// Under `sync_hitboxes` every frame collides with frame 0's boxes.
    /// Out-of-range indexes clamp to the last frame.
    pub fn hitbox_frame(&self, frame_index: usize) -> Option<&AnimationFrame> {
        if self.frames.is_empty() {
            return None;
        }
        let index = if self.sync_hitboxes {
            0
        } else {
            frame_index.min(self.frames.len() - 1)
        };
        self.frames.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(sprite: &str) -> AnimationFrame {
        AnimationFrame {
            sprite: sprite.to_string(),
            source_width: None,
            source_height: None,
            hitboxes: SmallVec::new(),
        }
    }

    #[test]
    fn duration_guards_zero_fps() {
        let clip = AnimationClip {
            name: "idle".into(),
            frames: vec![frame("a"), frame("b")],
            fps: 0.0,
            looped: true,
            sync_hitboxes: false,
        };
        assert_eq!(clip.duration(), 0.0);
    }

    #[test]
    fn duration_is_frames_over_fps() {
        let clip = AnimationClip {
            name: "attack".into(),
            frames: vec![frame("a"), frame("b"), frame("c"), frame("d")],
            fps: 8.0,
            looped: false,
            sync_hitboxes: false,
        };
        assert_eq!(clip.duration(), 0.5);
    }

    #[test]
    fn sync_hitboxes_always_uses_frame_zero() {
        let mut f0 = frame("a");
        f0.hitboxes.push(Hitbox {
            x: 1.0,
            y: 2.0,
            width: 3.0,
            height: 4.0,
            locked_to_sprite_bounds: false,
        });
        let clip = AnimationClip {
            name: "run".into(),
            frames: vec![f0, frame("b")],
            fps: 10.0,
            looped: true,
            sync_hitboxes: true,
        };
        let hb = clip.hitbox_frame(1).unwrap();
        assert_eq!(hb.hitboxes.len(), 1);
        assert_eq!(hb.sprite, "a");
    }

    #[test]
    fn loop_field_uses_editor_name() {
        let json = r#"{"name":"walk","frames":[],"fps":12.0,"loop":true}"#;
        let clip: AnimationClip = serde_json::from_str(json).unwrap();
        assert!(clip.looped);
    }
}
