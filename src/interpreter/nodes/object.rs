//! Entity action handlers.
//!
//! All mutation goes through the store's copy-on-write operations; handlers
//! never hold a reference into the store across an edit. Per the engine's
//! degrade policy, an action whose target is missing logs and still fires
//! its exec-out so downstream logic is not starved.

use glam::Vec2;
use log::warn;
use serde_json::Value as JsonValue;

use crate::components::gameobject::Category;
use crate::components::graph::GraphNode;
use crate::interpreter::context::ExecutionContext;
use crate::interpreter::value::Value;
use crate::systems::animation;
use crate::systems::physics::{apply_gravity, gather_obstacles, step_kinematics};

pub fn set_position(node: &GraphNode, _entered: Option<&str>, ctx: &mut ExecutionContext) {
    if let Some(id) = ctx.resolve_target(node) {
        let current = ctx.state.store.get(&id).map(|o| o.position).unwrap_or(Vec2::ZERO);
        let position = ctx.vec2_input(node, current);
        ctx.state.store.update(&id, |o| o.position = position);
    }
    ctx.trigger_output(node, "then");
}

pub fn translate(node: &GraphNode, _entered: Option<&str>, ctx: &mut ExecutionContext) {
    if let Some(id) = ctx.resolve_target(node) {
        let offset = ctx.vec2_input(node, Vec2::ZERO);
        ctx.state.store.update(&id, |o| o.position += offset);
    }
    ctx.trigger_output(node, "then");
}

pub fn set_velocity(node: &GraphNode, _entered: Option<&str>, ctx: &mut ExecutionContext) {
    if let Some(id) = ctx.resolve_target(node) {
        let current = ctx.state.store.get(&id).map(|o| o.velocity).unwrap_or(Vec2::ZERO);
        let velocity = ctx.vec2_input(node, current);
        ctx.state.store.update(&id, |o| o.velocity = velocity);
    }
    ctx.trigger_output(node, "then");
}

pub fn set_animation(node: &GraphNode, _entered: Option<&str>, ctx: &mut ExecutionContext) {
    let clip = ctx.string_input(node, "animation");
    match (ctx.resolve_target(node), clip) {
        (Some(id), Some(clip)) => {
            let restart = node.prop_bool("restart").unwrap_or(false);
            ctx.state
                .store
                .update(&id, |o| animation::set_animation(o, &clip, restart));
        }
        (_, None) => warn!("setAnimation node '{}': no animation configured", node.id),
        _ => {}
    }
    ctx.trigger_output(node, "then");
}

pub fn set_text(node: &GraphNode, _entered: Option<&str>, ctx: &mut ExecutionContext) {
    let text = ctx
        .evaluate_input(node, "text")
        .map(|v| v.to_display())
        .or_else(|| node.prop_str("text").map(str::to_string))
        .unwrap_or_default();
    if let Some(id) = ctx.resolve_target(node) {
        let mut had_renderer = false;
        ctx.state.store.update(&id, |o| {
            if let Some(renderer) = o.text_renderer_mut() {
                renderer.text = text.clone();
                had_renderer = true;
            }
        });
        if !had_renderer {
            warn!("setText node '{}': object '{}' has no text renderer", node.id, id);
        }
    }
    ctx.trigger_output(node, "then");
}

/// Write a script-declared property on the target object.
pub fn set_property(node: &GraphNode, _entered: Option<&str>, ctx: &mut ExecutionContext) {
    let key = node.prop_str("property").map(str::to_string);
    let value = ctx.evaluate_input(node, "value");
    match (ctx.resolve_target(node), key, value) {
        (Some(id), Some(key), Some(value)) => {
            let raw = match &value {
                Value::Number(n) => JsonValue::from(*n as f64),
                Value::Bool(b) => JsonValue::from(*b),
                other => JsonValue::from(other.to_display()),
            };
            let script_name = node.prop_str("script").map(str::to_string);
            let mut wrote = false;
            ctx.state.store.update(&id, |o| {
                let script = o.object.behaviors.iter_mut().find_map(|b| match b {
                    crate::components::behavior::Behavior::Script(s)
                        if script_name.as_deref().is_none_or(|n| n == s.script) =>
                    {
                        Some(s)
                    }
                    _ => None,
                });
                if let Some(script) = script {
                    script.set(key.clone(), raw.clone());
                    wrote = true;
                }
            });
            if !wrote {
                warn!(
                    "setProperty node '{}': object '{}' has no matching script behavior",
                    node.id, id
                );
            }
        }
        (_, None, _) => warn!("setProperty node '{}': no property configured", node.id),
        (_, _, None) => warn!("setProperty node '{}': no value connected", node.id),
        _ => {}
    }
    ctx.trigger_output(node, "then");
}

/// Spawn a fresh object of the configured category and expose it on the
/// `object` output pin.
pub fn spawn_object(node: &GraphNode, _entered: Option<&str>, ctx: &mut ExecutionContext) {
    let position = ctx.vec2_input(node, Vec2::ZERO);
    match node.prop_str("category").and_then(Category::from_tag) {
        Some(category) => {
            let id = ctx.state.store.spawn(category, position);
            ctx.cache_out(node, "object", Value::Object(id));
        }
        None => warn!(
            "spawnObject node '{}': missing or unknown category '{}'",
            node.id,
            node.prop_str("category").unwrap_or("")
        ),
    }
    ctx.trigger_output(node, "then");
}

pub fn destroy_object(node: &GraphNode, _entered: Option<&str>, ctx: &mut ExecutionContext) {
    if let Some(id) = ctx.resolve_target(node) {
        ctx.state.store.destroy(&id);
    }
    ctx.trigger_output(node, "then");
}

/// Keyboard platformer control: horizontal speed from the bound keys, jump
/// impulse when grounded, gravity, then a full swept physics move. The same
/// resolution the AI pass uses, so player- and AI-driven bodies obey the
/// same platform rules.
pub fn character_move(node: &GraphNode, _entered: Option<&str>, ctx: &mut ExecutionContext) {
    if let Some(id) = ctx.resolve_target(node) {
        let speed = ctx.number_input(node, "speed", 200.0);
        let jump_force = ctx.number_input(node, "jumpForce", 400.0);
        let left = node.prop_str("leftKey").unwrap_or("ArrowLeft").to_string();
        let right = node.prop_str("rightKey").unwrap_or("ArrowRight").to_string();
        let jump = node.prop_str("jumpKey").unwrap_or(" ").to_string();
        let gravity = node.prop_bool("applyGravity").unwrap_or(true);

        let mut direction = 0.0;
        if ctx.state.keyboard.is_down(&left) {
            direction -= 1.0;
        }
        if ctx.state.keyboard.is_down(&right) {
            direction += 1.0;
        }
        let jumping = ctx.state.keyboard.is_down(&jump);

        let dt = ctx.delta;
        let mut objects = ctx.state.store.to_vec();
        if let Some(index) = objects.iter().position(|o| o.id() == id) {
            let mut subject = objects[index].clone();
            subject.velocity.x = direction * speed;
            if jumping && subject.is_grounded {
                subject.velocity.y = -jump_force;
            }
            if gravity {
                apply_gravity(&mut subject, dt);
            }
            let obstacles = gather_obstacles(&objects, &id);
            step_kinematics(&mut subject, dt, &obstacles);
            objects[index] = subject;
            ctx.state.store.replace_all(objects);
        }
    }
    ctx.trigger_output(node, "then");
}

/// Step the target straight toward a destination point, no collision.
pub fn move_towards(node: &GraphNode, _entered: Option<&str>, ctx: &mut ExecutionContext) {
    if let Some(id) = ctx.resolve_target(node) {
        let destination = ctx
            .evaluate_input(node, "destination")
            .and_then(|v| v.as_vec2());
        match destination {
            Some(destination) => {
                let speed = ctx.number_input(node, "speed", 100.0);
                let dt = ctx.delta;
                ctx.state.store.update(&id, |o| {
                    let to_target = destination - o.position;
                    let remaining = to_target.length();
                    if remaining > f32::EPSILON {
                        let step = (speed * dt).min(remaining);
                        o.position += to_target / remaining * step;
                    }
                });
            }
            None => warn!("moveTowards node '{}': no destination connected", node.id),
        }
    }
    ctx.trigger_output(node, "then");
}
