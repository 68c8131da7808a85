//! Stage-level handlers: camera, audio/video, scene flow, pausing.

use log::warn;

use crate::components::graph::GraphNode;
use crate::interpreter::context::ExecutionContext;

/// Pan the camera toward the target. `smoothing` of 0 (the default) snaps;
/// higher values ease in per tick.
pub fn camera_follow(node: &GraphNode, _entered: Option<&str>, ctx: &mut ExecutionContext) {
    if let Some(id) = ctx.resolve_target(node) {
        if let Some(obj) = ctx.state.store.get(&id) {
            let target = obj.position;
            let smoothing = node.prop_f32("smoothing").unwrap_or(0.0).max(0.0);
            let camera = &mut ctx.state.camera;
            if smoothing > 0.0 {
                let t = (ctx.delta * smoothing).clamp(0.0, 1.0);
                camera.position += (target - camera.position) * t;
            } else {
                camera.position = target;
            }
        }
    }
    ctx.trigger_output(node, "then");
}

pub fn set_camera_zoom(node: &GraphNode, _entered: Option<&str>, ctx: &mut ExecutionContext) {
    let zoom = ctx.number_input(node, "zoom", 1.0).max(0.01);
    ctx.state.camera.zoom = zoom;
    ctx.trigger_output(node, "then");
}

pub fn play_audio(node: &GraphNode, _entered: Option<&str>, ctx: &mut ExecutionContext) {
    match ctx.string_input(node, "sound") {
        Some(sound) if !sound.is_empty() => ctx.state.audio.play(&sound),
        _ => warn!("playAudio node '{}': no sound configured", node.id),
    }
    ctx.trigger_output(node, "then");
}

/// Stop one channel, or everything when no sound is configured.
pub fn stop_audio(node: &GraphNode, _entered: Option<&str>, ctx: &mut ExecutionContext) {
    match ctx.string_input(node, "sound") {
        Some(sound) if !sound.is_empty() => ctx.state.audio.stop(&sound),
        _ => ctx.state.audio.stop_all(),
    }
    ctx.trigger_output(node, "then");
}

pub fn play_video(node: &GraphNode, _entered: Option<&str>, ctx: &mut ExecutionContext) {
    match ctx.string_input(node, "video") {
        Some(video) if !video.is_empty() => ctx.state.video.play(&video),
        _ => warn!("playVideo node '{}': no video configured", node.id),
    }
    ctx.trigger_output(node, "then");
}

pub fn stop_video(node: &GraphNode, _entered: Option<&str>, ctx: &mut ExecutionContext) {
    ctx.state.video.stop();
    ctx.trigger_output(node, "then");
}

/// Request a scene change. With no scene configured nothing fires: there is
/// nothing to continue into.
pub fn change_scene(node: &GraphNode, _entered: Option<&str>, ctx: &mut ExecutionContext) {
    match ctx.string_input(node, "scene") {
        Some(scene) if !scene.is_empty() => {
            ctx.state.scene_request = Some(scene);
            ctx.trigger_output(node, "then");
        }
        _ => warn!("changeScene node '{}': no scene configured", node.id),
    }
}

pub fn pause_game(node: &GraphNode, _entered: Option<&str>, ctx: &mut ExecutionContext) {
    ctx.state.paused = true;
    ctx.trigger_output(node, "then");
}

pub fn resume_game(node: &GraphNode, _entered: Option<&str>, ctx: &mut ExecutionContext) {
    ctx.state.paused = false;
    ctx.trigger_output(node, "then");
}

pub fn toggle_pause(node: &GraphNode, _entered: Option<&str>, ctx: &mut ExecutionContext) {
    ctx.state.paused = !ctx.state.paused;
    ctx.trigger_output(node, "then");
}
