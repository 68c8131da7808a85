//! Execution context handed to every node handler.
//!
//! The context bundles the indexed scene graph, the mutable simulation
//! state, and the tick delta. It is rebuilt per tick by the engine; the
//! node output cache inside [`SimState`] is cleared at the start of every
//! root wave, so pull evaluation runs each node at most once per wave.

use glam::Vec2;
use log::{error, warn};
use rustc_hash::FxHashMap;

use crate::components::graph::{Connection, GraphNode, NodeKind};
use crate::interpreter::nodes::handler_for;
use crate::interpreter::value::Value;
use crate::resources::simstate::SimState;

/// Exec propagation stops past this depth and reports the offending node.
/// The graph format cannot rule out cycles; this turns a stack overflow
/// into a diagnosable error.
pub const MAX_TRIGGER_DEPTH: u32 = 256;

/// Scene graph indexed for O(1) pin resolution.
#[derive(Debug, Default)]
pub struct GraphIndex {
    nodes: FxHashMap<String, GraphNode>,
    /// `(to_node, to_input)` → `(from_node, from_output)`; input pins hold
    /// at most one incoming connection.
    incoming: FxHashMap<(String, String), (String, String)>,
    /// `(from_node, from_output)` → fan-out targets, in connection order.
    outgoing: FxHashMap<(String, String), Vec<(String, String)>>,
}

impl GraphIndex {
    pub fn build(nodes: &[GraphNode], connections: &[Connection]) -> Self {
        let mut index = Self::default();
        for node in nodes {
            index.nodes.insert(node.id.clone(), node.clone());
        }
        for conn in connections {
            index.incoming.insert(
                (conn.to_node_id.clone(), conn.to_input_id.clone()),
                (conn.from_node_id.clone(), conn.from_output_id.clone()),
            );
            index
                .outgoing
                .entry((conn.from_node_id.clone(), conn.from_output_id.clone()))
                .or_default()
                .push((conn.to_node_id.clone(), conn.to_input_id.clone()));
        }
        index
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.get(id)
    }

    /// All nodes of an event-root kind, in stable id order so waves are
    /// deterministic regardless of hash-map iteration.
    pub fn roots(&self, kind: NodeKind) -> Vec<&GraphNode> {
        let mut roots: Vec<&GraphNode> =
            self.nodes.values().filter(|n| n.kind == kind).collect();
        roots.sort_by(|a, b| a.id.cmp(&b.id));
        roots
    }

    pub fn source_of(&self, node_id: &str, input_pin_id: &str) -> Option<&(String, String)> {
        self.incoming
            .get(&(node_id.to_string(), input_pin_id.to_string()))
    }

    pub fn targets_of(&self, node_id: &str, output_pin_id: &str) -> &[(String, String)] {
        self.outgoing
            .get(&(node_id.to_string(), output_pin_id.to_string()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Payload of the root wave currently running.
#[derive(Debug, Clone, Default)]
pub enum EventPayload {
    #[default]
    None,
    /// Colliding pair, already ordered to match the root's filters.
    Collision {
        a: String,
        b: String,
    },
    /// The key that was pressed or released.
    Key(String),
}

/// Per-wave evaluation environment.
pub struct ExecutionContext<'a> {
    pub graph: &'a GraphIndex,
    pub state: &'a mut SimState,
    pub delta: f32,
    pub event: EventPayload,
    depth: u32,
}

impl<'a> ExecutionContext<'a> {
    pub fn new(graph: &'a GraphIndex, state: &'a mut SimState, delta: f32) -> Self {
        Self {
            graph,
            state,
            delta,
            event: EventPayload::None,
            depth: 0,
        }
    }

    /// Pull-evaluate the value feeding one of `node`'s input pins, by pin
    /// name. Returns `None` when the pin is absent, unconnected, or the
    /// source produced nothing.
    ///
    /// Each `(source node, output pin)` is computed at most once per wave:
    /// the first read runs the source handler, which caches every output it
    /// produces; later reads hit the cache.
    pub fn evaluate_input(&mut self, node: &GraphNode, input_name: &str) -> Option<Value> {
        let pin = node.input_named(input_name)?;
        let (source_id, source_pin) = self.graph.source_of(&node.id, &pin.id)?.clone();
        if let Some(value) = self.state.cached(&source_id, &source_pin) {
            return Some(value.clone());
        }
        let source = self.graph.node(&source_id)?;
        let handler = handler_for(source.kind)?;
        if self.depth >= MAX_TRIGGER_DEPTH {
            error!(
                "node graph evaluation exceeded depth {} at node '{}'; check the graph for cycles",
                MAX_TRIGGER_DEPTH, source_id
            );
            return None;
        }
        self.depth += 1;
        handler(source, None, self);
        self.depth -= 1;
        self.state.cached(&source_id, &source_pin).cloned()
    }

    /// Push execution out of one of `node`'s exec pins, by pin name,
    /// synchronously running every connected handler.
    pub fn trigger_output(&mut self, node: &GraphNode, output_name: &str) {
        let Some(pin) = node.output_named(output_name) else {
            return;
        };
        self.trigger_output_pin(&node.id, &pin.id);
    }

    /// Push execution out of an output pin addressed by id.
    pub fn trigger_output_pin(&mut self, node_id: &str, output_pin_id: &str) {
        if self.depth >= MAX_TRIGGER_DEPTH {
            error!(
                "node graph execution exceeded depth {} at node '{}'; check the graph for cycles",
                MAX_TRIGGER_DEPTH, node_id
            );
            return;
        }
        let targets = self.graph.targets_of(node_id, output_pin_id).to_vec();
        for (target_id, target_pin) in targets {
            let Some(target) = self.graph.node(&target_id) else {
                continue;
            };
            let Some(handler) = handler_for(target.kind) else {
                // Unknown node kind: inert, nothing downstream fires.
                continue;
            };
            self.depth += 1;
            handler(target, Some(target_pin.as_str()), self);
            self.depth -= 1;
        }
    }

    /// Record an output value for the rest of the wave, by pin name.
    pub fn cache_out(&mut self, node: &GraphNode, output_name: &str, value: Value) {
        if let Some(pin) = node.output_named(output_name) {
            let pin_id = pin.id.clone();
            self.state.cache_output(&node.id, &pin_id, value);
        }
    }

    /// Name of the input pin execution entered through.
    pub fn entered_name<'n>(&self, node: &'n GraphNode, entered: Option<&str>) -> Option<&'n str> {
        let id = entered?;
        node.inputs
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.name.as_str())
    }

    /// Resolve an action node's target object: the `target` input pin first,
    /// then the `targetName` property. Logs when both fail.
    pub fn resolve_target(&mut self, node: &GraphNode) -> Option<String> {
        if let Some(value) = self.evaluate_input(node, "target") {
            if let Some(id) = value.as_object_id() {
                if self.state.store.get(id).is_some() {
                    return Some(id.to_string());
                }
                warn!("node '{}': target object '{}' no longer exists", node.id, id);
                return None;
            }
        }
        if let Some(name) = node.prop_str("targetName") {
            if let Some(obj) = self.state.store.find_by_name(name) {
                return Some(obj.id().to_string());
            }
            warn!("node '{}': no object named '{}'", node.id, name);
            return None;
        }
        warn!("node '{}': no target connected or configured", node.id);
        None
    }

    /// A 2D position from either a `position` vector pin or `x`/`y` number
    /// pins, with `fallback` filling unconnected components.
    pub fn vec2_input(&mut self, node: &GraphNode, fallback: Vec2) -> Vec2 {
        if let Some(v) = self
            .evaluate_input(node, "position")
            .and_then(|v| v.as_vec2())
        {
            return v;
        }
        let x = self
            .evaluate_input(node, "x")
            .and_then(|v| v.as_f32())
            .or_else(|| node.prop_f32("x"))
            .unwrap_or(fallback.x);
        let y = self
            .evaluate_input(node, "y")
            .and_then(|v| v.as_f32())
            .or_else(|| node.prop_f32("y"))
            .unwrap_or(fallback.y);
        Vec2::new(x, y)
    }

    /// Numeric input with a property of the same name as fallback, then a
    /// hard default.
    pub fn number_input(&mut self, node: &GraphNode, name: &str, default: f32) -> f32 {
        if let Some(v) = self.evaluate_input(node, name).and_then(|v| v.as_f32()) {
            return v;
        }
        node.prop_f32(name).unwrap_or(default)
    }

    /// String input with a property fallback.
    pub fn string_input(&mut self, node: &GraphNode, name: &str) -> Option<String> {
        if let Some(v) = self.evaluate_input(node, name) {
            return Some(v.to_display());
        }
        node.prop_str(name).map(str::to_string)
    }
}
