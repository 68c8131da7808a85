//! Event root handlers.
//!
//! Roots are entered by the engine (never by another node): the engine
//! clears the wave cache, stashes the event payload in the context, and
//! invokes the root's handler, which publishes the payload on its output
//! pins and pushes its exec-out.

use crate::components::graph::GraphNode;
use crate::interpreter::context::{EventPayload, ExecutionContext};
use crate::interpreter::value::Value;

pub fn on_start(node: &GraphNode, _entered: Option<&str>, ctx: &mut ExecutionContext) {
    fire(node, ctx);
}

pub fn on_update(node: &GraphNode, _entered: Option<&str>, ctx: &mut ExecutionContext) {
    ctx.cache_out(node, "deltaTime", Value::Number(ctx.delta));
    fire(node, ctx);
}

/// Collision roots expose the colliding pair on their `objectA`/`objectB`
/// pins. The engine has already matched the pair against the root's name
/// filters and ordered it accordingly.
pub fn on_collision(node: &GraphNode, _entered: Option<&str>, ctx: &mut ExecutionContext) {
    if let EventPayload::Collision { a, b } = ctx.event.clone() {
        ctx.cache_out(node, "objectA", Value::Object(a));
        ctx.cache_out(node, "objectB", Value::Object(b));
    }
    fire(node, ctx);
}

/// Shared by `onKeyPress` and `onKeyRelease`; the engine only routes the
/// wave to roots whose configured key matches.
pub fn on_key(node: &GraphNode, _entered: Option<&str>, ctx: &mut ExecutionContext) {
    if let EventPayload::Key(key) = ctx.event.clone() {
        ctx.cache_out(node, "key", Value::Str(key));
    }
    fire(node, ctx);
}

fn fire(node: &GraphNode, ctx: &mut ExecutionContext) {
    if let Some(pin_id) = node.first_exec_out() {
        let pin_id = pin_id.to_string();
        ctx.trigger_output_pin(&node.id, &pin_id);
    }
}
