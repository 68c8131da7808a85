//! The node-graph interpreter.
//!
//! Execution is two-sided, mirroring the pin model:
//! - **push** for exec pins: an event root (or timer) enters the graph and
//!   [`ExecutionContext::trigger_output`] synchronously runs every handler
//!   wired downstream, in connection order, to completion;
//! - **pull** for data pins: handlers read their inputs on demand through
//!   [`ExecutionContext::evaluate_input`], which walks the dependency chain
//!   actually read and memoizes each node's outputs for the rest of the
//!   wave.
//!
//! There is no scheduler: evaluation order is caller-driven recursion, so
//! nothing runs outside the order implied by the graph's own connections.
//! Crossing a wave boundary always starts from a cleared cache.

pub mod context;
pub mod nodes;
pub mod value;

use log::warn;

use crate::components::graph::NodeKind;
use crate::events::collision::CollisionEvent;
use crate::interpreter::context::{EventPayload, ExecutionContext, GraphIndex};
use crate::interpreter::nodes::handler_for;
use crate::resources::simstate::SimState;

/// Which root kind a wave enters through, with its payload.
#[derive(Debug, Clone, Copy)]
pub enum RootEvent<'e> {
    Start,
    Update,
    Collision(&'e CollisionEvent),
    KeyPress(&'e str),
    KeyRelease(&'e str),
}

/// Run one root wave: clear the output cache, find the matching roots, and
/// trigger each root's exec-out in stable order.
pub fn run_event(graph: &GraphIndex, state: &mut SimState, delta: f32, event: RootEvent) {
    state.clear_node_cache();
    let kind = match event {
        RootEvent::Start => NodeKind::OnStart,
        RootEvent::Update => NodeKind::OnUpdate,
        RootEvent::Collision(_) => NodeKind::OnCollision,
        RootEvent::KeyPress(_) => NodeKind::OnKeyPress,
        RootEvent::KeyRelease(_) => NodeKind::OnKeyRelease,
    };

    let roots: Vec<String> = graph.roots(kind).iter().map(|n| n.id.clone()).collect();
    for root_id in roots {
        let Some(root) = graph.node(&root_id) else {
            continue;
        };
        let payload = match event {
            RootEvent::Start | RootEvent::Update => EventPayload::None,
            RootEvent::KeyPress(key) | RootEvent::KeyRelease(key) => {
                // A key root fires for its configured key, or any key when
                // left unconfigured.
                match root.prop_str("key") {
                    Some(wanted) if wanted != key => continue,
                    _ => EventPayload::Key(key.to_string()),
                }
            }
            RootEvent::Collision(collision) => {
                match match_collision_root(root, state, collision) {
                    Some(payload) => payload,
                    None => continue,
                }
            }
        };
        let Some(handler) = handler_for(kind) else {
            continue;
        };
        let mut ctx = ExecutionContext::new(graph, state, delta);
        ctx.event = payload;
        handler(root, None, &mut ctx);
    }
}

/// Match a collision pair against an `onCollision` root's optional
/// `objectA`/`objectB` name filters, reordering the pair to fit.
fn match_collision_root(
    root: &crate::components::graph::GraphNode,
    state: &SimState,
    collision: &CollisionEvent,
) -> Option<EventPayload> {
    let name_of = |id: &str| -> Option<String> {
        match state.store.get(id) {
            Some(obj) => Some(obj.name().to_string()),
            None => {
                warn!("collision event references missing object '{}'", id);
                None
            }
        }
    };
    let name_a = name_of(&collision.a)?;
    let name_b = name_of(&collision.b)?;
    let filter_a = root.prop_str("objectA").filter(|s| !s.is_empty());
    let filter_b = root.prop_str("objectB").filter(|s| !s.is_empty());

    let accepts = |fa: Option<&str>, na: &str, fb: Option<&str>, nb: &str| {
        fa.is_none_or(|f| f == na) && fb.is_none_or(|f| f == nb)
    };
    if accepts(filter_a, &name_a, filter_b, &name_b) {
        Some(EventPayload::Collision {
            a: collision.a.clone(),
            b: collision.b.clone(),
        })
    } else if accepts(filter_a, &name_b, filter_b, &name_a) {
        Some(EventPayload::Collision {
            a: collision.b.clone(),
            b: collision.a.clone(),
        })
    } else {
        None
    }
}
