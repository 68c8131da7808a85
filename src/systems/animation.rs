//! Animation clock.
//!
//! - [`advance_animations`] accumulates frame time on every entity with an
//!   active clip and derives the visible frame index.
//! - [`set_animation`] switches an entity's active clip, resetting playback
//!   unless the same clip is already playing and the caller asked not to
//!   restart.
//!
//! # Playback
//!
//! `animation_time += deltaTime × animation_speed`; the frame index is
//! `floor(animation_time × fps)`, wrapped for looping clips and clamped to
//! the last frame otherwise. Zero-fps and empty clips never advance and
//! never divide.

use log::warn;

use crate::components::simobject::SimulatedGameObject;
use crate::resources::store::ObjectStore;

/// Advance every active clip by the tick delta.
///
/// Operates copy-on-write: takes the current list, advances each record,
/// and swaps the result back into the store.
pub fn advance_animations(store: &mut ObjectStore, dt: f32) {
    let mut objects = store.to_vec();
    for obj in &mut objects {
        advance_object(obj, dt);
    }
    store.replace_all(objects);
}

fn advance_object(obj: &mut SimulatedGameObject, dt: f32) {
    let Some(clip) = obj.current_clip() else {
        return;
    };
    let frame_count = clip.frame_count();
    if frame_count == 0 || clip.fps <= 0.0 {
        return;
    }
    let fps = clip.fps;
    let looped = clip.looped;

    obj.animation_time += dt * obj.animation_speed;
    let raw_frame = (obj.animation_time * fps).floor().max(0.0) as usize;
    obj.current_frame = if looped {
        raw_frame % frame_count
    } else {
        raw_frame.min(frame_count - 1)
    };
}

/// Switch the active clip on a runtime object.
///
/// With `restart == false`, re-selecting the clip that is already playing
/// keeps its current time and frame. Selecting a clip the object does not
/// own logs a warning and leaves playback untouched.
pub fn set_animation(obj: &mut SimulatedGameObject, name: &str, restart: bool) {
    if obj.object.animation(name).is_none() {
        warn!(
            "object '{}' has no animation '{}', keeping current clip",
            obj.name(),
            name
        );
        return;
    }
    if !restart && obj.current_animation.as_deref() == Some(name) {
        return;
    }
    obj.current_animation = Some(name.to_string());
    obj.animation_time = 0.0;
    obj.current_frame = 0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::animation::{AnimationClip, AnimationFrame};
    use crate::components::gameobject::{Category, GameObject};
    use smallvec::SmallVec;

    fn clip(name: &str, frames: usize, fps: f32, looped: bool) -> AnimationClip {
        AnimationClip {
            name: name.into(),
            frames: (0..frames)
                .map(|i| AnimationFrame {
                    sprite: format!("f{}", i),
                    source_width: None,
                    source_height: None,
                    hitboxes: SmallVec::new(),
                })
                .collect(),
            fps,
            looped,
            sync_hitboxes: false,
        }
    }

    fn object_with(clips: Vec<AnimationClip>) -> SimulatedGameObject {
        SimulatedGameObject::from_object(GameObject {
            id: "a".into(),
            name: "animated".into(),
            category: Category::Enemy,
            layer: String::new(),
            behaviors: vec![],
            animations: clips,
            active: true,
            locked: false,
            use_custom_hitboxes: false,
        })
    }

    #[test]
    fn looping_clip_wraps_frames() {
        let mut obj = object_with(vec![clip("run", 4, 10.0, true)]);
        set_animation(&mut obj, "run", true);
        // 0.55s at 10 fps = frame 5 -> wraps to 1.
        advance_object(&mut obj, 0.55);
        assert_eq!(obj.current_frame, 1);
    }

    #[test]
    fn oneshot_clip_clamps_to_last_frame() {
        let mut obj = object_with(vec![clip("die", 3, 10.0, false)]);
        set_animation(&mut obj, "die", true);
        advance_object(&mut obj, 5.0);
        assert_eq!(obj.current_frame, 2);
    }

    #[test]
    fn animation_speed_scales_time() {
        let mut obj = object_with(vec![clip("run", 10, 10.0, true)]);
        set_animation(&mut obj, "run", true);
        obj.animation_speed = 2.0;
        advance_object(&mut obj, 0.25);
        // 0.5s effective at 10 fps.
        assert_eq!(obj.current_frame, 5);
    }

    #[test]
    fn zero_fps_clip_never_advances() {
        let mut obj = object_with(vec![clip("frozen", 3, 0.0, true)]);
        set_animation(&mut obj, "frozen", true);
        advance_object(&mut obj, 10.0);
        assert_eq!(obj.current_frame, 0);
    }

    #[test]
    fn switching_clip_resets_playback() {
        let mut obj = object_with(vec![clip("run", 4, 10.0, true), clip("jump", 4, 10.0, true)]);
        set_animation(&mut obj, "run", true);
        advance_object(&mut obj, 0.3);
        assert_eq!(obj.current_frame, 3);
        set_animation(&mut obj, "jump", false);
        assert_eq!(obj.current_frame, 0);
        assert_eq!(obj.animation_time, 0.0);
    }

    #[test]
    fn same_clip_without_restart_keeps_time() {
        let mut obj = object_with(vec![clip("run", 4, 10.0, true)]);
        set_animation(&mut obj, "run", true);
        advance_object(&mut obj, 0.3);
        set_animation(&mut obj, "run", false);
        assert_eq!(obj.current_frame, 3);
        assert!(obj.animation_time > 0.0);
    }

    #[test]
    fn same_clip_with_restart_rewinds() {
        let mut obj = object_with(vec![clip("run", 4, 10.0, true)]);
        set_animation(&mut obj, "run", true);
        advance_object(&mut obj, 0.3);
        set_animation(&mut obj, "run", true);
        assert_eq!(obj.current_frame, 0);
    }

    #[test]
    fn unknown_clip_is_ignored() {
        let mut obj = object_with(vec![clip("run", 4, 10.0, true)]);
        set_animation(&mut obj, "run", true);
        set_animation(&mut obj, "missing", true);
        assert_eq!(obj.current_animation.as_deref(), Some("run"));
    }
}
