//! Pure data handlers: literals, arithmetic, queries.
//!
//! These run only through pull evaluation. Each caches every output it
//! produces, so a fan-out of readers costs one execution per wave.

use glam::Vec2;
use log::warn;

use crate::components::graph::GraphNode;
use crate::interpreter::context::ExecutionContext;
use crate::interpreter::value::Value;

pub fn number(node: &GraphNode, _entered: Option<&str>, ctx: &mut ExecutionContext) {
    let value = node.prop_f32("value").unwrap_or(0.0);
    ctx.cache_out(node, "value", Value::Number(value));
}

pub fn boolean(node: &GraphNode, _entered: Option<&str>, ctx: &mut ExecutionContext) {
    let value = node.prop_bool("value").unwrap_or(false);
    ctx.cache_out(node, "value", Value::Bool(value));
}

pub fn string(node: &GraphNode, _entered: Option<&str>, ctx: &mut ExecutionContext) {
    let value = node.prop_str("value").unwrap_or_default().to_string();
    ctx.cache_out(node, "value", Value::Str(value));
}

pub fn vector2(node: &GraphNode, _entered: Option<&str>, ctx: &mut ExecutionContext) {
    let v = ctx.vec2_input(node, Vec2::ZERO);
    ctx.cache_out(node, "vector", Value::Vec2(v));
}

/// Uniform random number in `[min, max)`. Cached like any other output, so
/// every reader within a wave observes the same draw.
pub fn random_range(node: &GraphNode, _entered: Option<&str>, ctx: &mut ExecutionContext) {
    let min = ctx.number_input(node, "min", 0.0);
    let max = ctx.number_input(node, "max", 1.0);
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    let value = lo + ctx.state.rng.f32() * (hi - lo);
    ctx.cache_out(node, "value", Value::Number(value));
}

pub fn math_op(node: &GraphNode, _entered: Option<&str>, ctx: &mut ExecutionContext) {
    let a = ctx.number_input(node, "a", 0.0);
    let b = ctx.number_input(node, "b", 0.0);
    let op = node.prop_str("op").unwrap_or("add").to_string();
    let value = match op.as_str() {
        "add" => a + b,
        "subtract" => a - b,
        "multiply" => a * b,
        "divide" => {
            if b == 0.0 {
                0.0
            } else {
                a / b
            }
        }
        "min" => a.min(b),
        "max" => a.max(b),
        other => {
            warn!("mathOp node '{}': unknown op '{}', producing 0", node.id, other);
            0.0
        }
    };
    ctx.cache_out(node, "result", Value::Number(value));
}

pub fn compare(node: &GraphNode, _entered: Option<&str>, ctx: &mut ExecutionContext) {
    let a = ctx.number_input(node, "a", 0.0);
    let b = ctx.number_input(node, "b", 0.0);
    let op = node.prop_str("op").unwrap_or("eq").to_string();
    let value = match op.as_str() {
        "lt" => a < b,
        "le" => a <= b,
        "gt" => a > b,
        "ge" => a >= b,
        "eq" => a == b,
        "ne" => a != b,
        other => {
            warn!("compare node '{}': unknown op '{}'", node.id, other);
            false
        }
    };
    ctx.cache_out(node, "result", Value::Bool(value));
}

pub fn logic_op(node: &GraphNode, _entered: Option<&str>, ctx: &mut ExecutionContext) {
    let a = ctx
        .evaluate_input(node, "a")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);
    let op = node.prop_str("op").unwrap_or("and").to_string();
    let value = match op.as_str() {
        "not" => !a,
        "and" => {
            a && ctx
                .evaluate_input(node, "b")
                .and_then(|v| v.as_bool())
                .unwrap_or(false)
        }
        "or" => {
            a || ctx
                .evaluate_input(node, "b")
                .and_then(|v| v.as_bool())
                .unwrap_or(false)
        }
        other => {
            warn!("logicOp node '{}': unknown op '{}'", node.id, other);
            false
        }
    };
    ctx.cache_out(node, "result", Value::Bool(value));
}

/// Whether the configured key is currently held.
pub fn key_down(node: &GraphNode, _entered: Option<&str>, ctx: &mut ExecutionContext) {
    let down = node
        .prop_str("key")
        .map(|key| ctx.state.keyboard.is_down(key))
        .unwrap_or(false);
    ctx.cache_out(node, "down", Value::Bool(down));
}

pub fn delta_time(node: &GraphNode, _entered: Option<&str>, ctx: &mut ExecutionContext) {
    ctx.cache_out(node, "value", Value::Number(ctx.delta));
}

/// Look up an object by authored name.
pub fn get_object(node: &GraphNode, _entered: Option<&str>, ctx: &mut ExecutionContext) {
    let Some(name) = ctx.string_input(node, "name") else {
        warn!("getObject node '{}': no name configured", node.id);
        return;
    };
    match ctx.state.store.find_by_name(&name) {
        Some(obj) => {
            let id = obj.id().to_string();
            ctx.cache_out(node, "object", Value::Object(id));
        }
        None => warn!("getObject node '{}': no object named '{}'", node.id, name),
    }
}

pub fn get_position(node: &GraphNode, _entered: Option<&str>, ctx: &mut ExecutionContext) {
    let Some(id) = ctx.resolve_target(node) else {
        return;
    };
    if let Some(obj) = ctx.state.store.get(&id) {
        let pos = obj.position;
        ctx.cache_out(node, "position", Value::Vec2(pos));
        ctx.cache_out(node, "x", Value::Number(pos.x));
        ctx.cache_out(node, "y", Value::Number(pos.y));
    }
}

pub fn get_velocity(node: &GraphNode, _entered: Option<&str>, ctx: &mut ExecutionContext) {
    let Some(id) = ctx.resolve_target(node) else {
        return;
    };
    if let Some(obj) = ctx.state.store.get(&id) {
        let vel = obj.velocity;
        ctx.cache_out(node, "velocity", Value::Vec2(vel));
        ctx.cache_out(node, "x", Value::Number(vel.x));
        ctx.cache_out(node, "y", Value::Number(vel.y));
    }
}

/// Distance between two object references.
pub fn distance(node: &GraphNode, _entered: Option<&str>, ctx: &mut ExecutionContext) {
    let a = ctx
        .evaluate_input(node, "a")
        .and_then(|v| v.as_object_id().map(str::to_string));
    let b = ctx
        .evaluate_input(node, "b")
        .and_then(|v| v.as_object_id().map(str::to_string));
    let (Some(a), Some(b)) = (a, b) else {
        warn!("distance node '{}': both inputs must be objects", node.id);
        return;
    };
    let (Some(oa), Some(ob)) = (ctx.state.store.get(&a), ctx.state.store.get(&b)) else {
        return;
    };
    let d = oa.position.distance(ob.position);
    ctx.cache_out(node, "distance", Value::Number(d));
}

/// Read a script-declared property off the target object.
pub fn get_property(node: &GraphNode, _entered: Option<&str>, ctx: &mut ExecutionContext) {
    let Some(key) = node.prop_str("property").map(str::to_string) else {
        warn!("getProperty node '{}': no property configured", node.id);
        return;
    };
    let Some(id) = ctx.resolve_target(node) else {
        return;
    };
    let Some(obj) = ctx.state.store.get(&id) else {
        return;
    };
    let value = obj.object.behaviors.iter().find_map(|b| {
        let script = b.as_script()?;
        let raw = script.properties.get(&key)?;
        match raw {
            serde_json::Value::Number(n) => n.as_f64().map(|v| Value::Number(v as f32)),
            serde_json::Value::Bool(b) => Some(Value::Bool(*b)),
            serde_json::Value::String(s) => Some(Value::Str(s.clone())),
            _ => None,
        }
    });
    match value {
        Some(value) => ctx.cache_out(node, "value", value),
        None => warn!(
            "getProperty node '{}': object '{}' has no usable property '{}'",
            node.id, id, key
        ),
    }
}
