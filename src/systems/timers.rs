//! Per-tick timer and countdown pass.
//!
//! Runs first in the tick, before animation, AI, and the `onUpdate` wave.
//! Due timers push the owning node's `finished` exec pin through the
//! interpreter; each firing is its own wave with a fresh output cache.

use log::warn;

use crate::interpreter::context::{ExecutionContext, GraphIndex};
use crate::resources::simstate::SimState;
use crate::resources::timers::format_mmss;

/// Fire due timers and advance countdown displays.
pub fn update_timers(graph: &GraphIndex, state: &mut SimState, delta: f32) {
    let now = state.clock_ms;

    // Timers. Collect first; firing may arm or stop other timers.
    let mut due: Vec<String> = state
        .timers
        .timers
        .iter()
        .filter(|(_, t)| now >= t.started_at_ms + t.duration as f64 * 1000.0)
        .map(|(id, _)| id.clone())
        .collect();
    due.sort();
    for node_id in due {
        let Some(timer) = state.timers.timers.get(&node_id).copied() else {
            continue;
        };
        if timer.looping {
            state
                .timers
                .start(&node_id, now, timer.duration, true);
        } else {
            state.timers.stop(&node_id);
        }
        fire_finished(graph, state, delta, &node_id);
    }

    // Countdowns. A finished countdown stays tracked until explicit stop,
    // so completion can never fire twice.
    let mut ids: Vec<String> = state.countdowns.countdowns.keys().cloned().collect();
    ids.sort();
    for node_id in ids {
        let Some(countdown) = state.countdowns.countdowns.get(&node_id) else {
            continue;
        };
        if countdown.finished {
            continue;
        }
        let elapsed = (now - countdown.started_at_ms) / 1000.0;
        let remaining = countdown.duration - elapsed as f32;
        let display = format_mmss(remaining);
        let target_id = countdown.target_id.clone();

        if display != countdown.last_display {
            if let Some(target) = &target_id {
                let mut wrote = false;
                state.store.update(target, |o| {
                    if let Some(renderer) = o.text_renderer_mut() {
                        renderer.text = display.clone();
                        wrote = true;
                    }
                });
                if !wrote {
                    warn!(
                        "countdown '{}': target '{}' is gone or has no text renderer, display disabled",
                        node_id, target
                    );
                    if let Some(c) = state.countdowns.countdowns.get_mut(&node_id) {
                        c.target_id = None;
                    }
                }
            }
            if let Some(c) = state.countdowns.countdowns.get_mut(&node_id) {
                c.last_display = display;
            }
        }

        if remaining <= 0.0 {
            if let Some(c) = state.countdowns.countdowns.get_mut(&node_id) {
                c.finished = true;
            }
            fire_finished(graph, state, delta, &node_id);
        }
    }
}

fn fire_finished(graph: &GraphIndex, state: &mut SimState, delta: f32, node_id: &str) {
    let Some(node) = graph.node(node_id) else {
        warn!("armed timer references missing node '{}'", node_id);
        return;
    };
    state.clear_node_cache();
    let mut ctx = ExecutionContext::new(graph, state, delta);
    ctx.trigger_output(node, "finished");
}
