//! Control-flow handlers: branch, trigger-once, timers, countdowns, log.

use log::{info, warn};

use crate::components::graph::GraphNode;
use crate::interpreter::context::ExecutionContext;

/// Route execution to `true` or `false` depending on the condition input.
/// An unconnected condition reads as false.
pub fn branch(node: &GraphNode, _entered: Option<&str>, ctx: &mut ExecutionContext) {
    let condition = ctx
        .evaluate_input(node, "condition")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);
    if condition {
        ctx.trigger_output(node, "true");
    } else {
        ctx.trigger_output(node, "false");
    }
}

/// Fire exec-out on the first activation per simulation lifetime; inert on
/// every later activation until the scene reloads.
pub fn trigger_once(node: &GraphNode, _entered: Option<&str>, ctx: &mut ExecutionContext) {
    if !ctx.state.triggered_once.insert(node.id.clone()) {
        return;
    }
    ctx.trigger_output(node, "then");
}

/// Arm or disarm a timer, keyed by this node's id. The `finished` exec-out
/// is pushed by the timer pass when the duration elapses; looping timers
/// rearm themselves there.
pub fn timer(node: &GraphNode, entered: Option<&str>, ctx: &mut ExecutionContext) {
    match ctx.entered_name(node, entered) {
        Some("start") => {
            let duration = ctx.number_input(node, "duration", 1.0).max(0.0);
            let looping = node.prop_bool("loop").unwrap_or(false);
            let now = ctx.state.clock_ms;
            ctx.state.timers.start(&node.id, now, duration, looping);
        }
        Some("stop") => {
            ctx.state.timers.stop(&node.id);
        }
        entered => {
            warn!("timer node '{}' entered through unexpected pin {:?}", node.id, entered);
        }
    }
}

/// Arm or disarm a countdown clock. While armed, the countdown pass keeps
/// the target text object's display in `mm:ss` and fires `finished` exactly
/// once at zero; the entry stays tracked until an explicit stop.
pub fn countdown(node: &GraphNode, entered: Option<&str>, ctx: &mut ExecutionContext) {
    match ctx.entered_name(node, entered) {
        Some("start") => {
            let duration = ctx.number_input(node, "duration", 60.0).max(0.0);
            let target_id = match node.prop_str("targetName") {
                Some(name) => {
                    let found = ctx.state.store.find_by_name(name).map(|o| o.id().to_string());
                    if found.is_none() {
                        warn!(
                            "countdown node '{}': no text object named '{}', display disabled",
                            node.id, name
                        );
                    }
                    found
                }
                None => None,
            };
            let now = ctx.state.clock_ms;
            ctx.state.countdowns.start(&node.id, now, duration, target_id);
        }
        Some("stop") => {
            ctx.state.countdowns.stop(&node.id);
        }
        entered => {
            warn!(
                "countdown node '{}' entered through unexpected pin {:?}",
                node.id, entered
            );
        }
    }
}

/// Write a message to the host log, then continue.
pub fn log_message(node: &GraphNode, _entered: Option<&str>, ctx: &mut ExecutionContext) {
    let message = ctx
        .string_input(node, "message")
        .unwrap_or_default();
    info!("[graph] {}", message);
    ctx.trigger_output(node, "then");
}
