//! Visual-script graph data: nodes, pins, and connections.
//!
//! A scene carries a flat list of [`GraphNode`]s and [`Connection`]s authored
//! in the editor. The interpreter never walks this raw form directly; it is
//! indexed once per scene load (see
//! [`GraphIndex`](crate::interpreter::context::GraphIndex)).
//!
//! Node kinds form a closed set. Anything the editor emits that this build
//! does not know deserializes to [`NodeKind::Unknown`] and is inert: it never
//! produces a value and never propagates execution.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use glam::Vec2;

/// Data type carried by a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PinType {
    /// Control-flow pin, push-triggered.
    Exec,
    Number,
    Boolean,
    String,
    GameObject,
    Vector2,
    Vector3,
    /// Accepts or produces any data type.
    Any,
}

/// One input or output pin of a node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pin {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub pin_type: PinType,
}

/// Closed catalog of node kinds.
///
/// The serialized tags are the editor's node type strings. `Unknown` is the
/// catch-all for tags from a newer or foreign editor build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    // Event roots
    OnStart,
    OnUpdate,
    OnCollision,
    OnKeyPress,
    OnKeyRelease,
    // Flow
    Branch,
    TriggerOnce,
    Timer,
    Countdown,
    Log,
    // Pure data
    Number,
    Boolean,
    String,
    Vector2,
    RandomRange,
    MathOp,
    Compare,
    LogicOp,
    KeyDown,
    DeltaTime,
    GetObject,
    GetPosition,
    GetVelocity,
    Distance,
    GetProperty,
    // Actions
    SetPosition,
    Translate,
    SetVelocity,
    SetAnimation,
    SetText,
    SetProperty,
    SpawnObject,
    DestroyObject,
    CharacterMove,
    MoveTowards,
    CameraFollow,
    SetCameraZoom,
    PlayAudio,
    StopAudio,
    PlayVideo,
    StopVideo,
    ChangeScene,
    PauseGame,
    ResumeGame,
    TogglePause,
    #[serde(other)]
    Unknown,
}

impl NodeKind {
    /// Whether this kind is an event root the engine may push a wave from.
    pub fn is_event_root(self) -> bool {
        matches!(
            self,
            NodeKind::OnStart
                | NodeKind::OnUpdate
                | NodeKind::OnCollision
                | NodeKind::OnKeyPress
                | NodeKind::OnKeyRelease
        )
    }
}

/// A node instance placed in the graph.
///
/// `position` is editor layout only; the interpreter ignores it.
/// `properties` is the node-kind-specific record filled from the blueprint
/// the node was created from, kept as raw JSON and read through the typed
/// accessors below.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default, with = "crate::components::vec2xy")]
    pub position: Vec2,
    #[serde(default)]
    pub inputs: Vec<Pin>,
    #[serde(default)]
    pub outputs: Vec<Pin>,
    #[serde(default)]
    pub properties: Map<String, JsonValue>,
}

impl GraphNode {
    /// Numeric property, accepting both JSON numbers and numeric strings
    /// (the editor serializes some spinner widgets as strings).
    pub fn prop_f32(&self, key: &str) -> Option<f32> {
        match self.properties.get(key)? {
            JsonValue::Number(n) => n.as_f64().map(|v| v as f32),
            JsonValue::String(s) => s.parse::<f32>().ok(),
            _ => None,
        }
    }

    pub fn prop_bool(&self, key: &str) -> Option<bool> {
        match self.properties.get(key)? {
            JsonValue::Bool(b) => Some(*b),
            JsonValue::String(s) => match s.as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn prop_str(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(|v| v.as_str())
    }

    /// First input pin with the given name.
    pub fn input_named(&self, name: &str) -> Option<&Pin> {
        self.inputs.iter().find(|p| p.name == name)
    }

    /// First output pin with the given name.
    pub fn output_named(&self, name: &str) -> Option<&Pin> {
        self.outputs.iter().find(|p| p.name == name)
    }

    /// Id of the first exec output, if the node has one.
    ///
    /// Most action nodes have exactly one exec-out named "then"; this keeps
    /// handlers from caring about the authored pin id.
    pub fn first_exec_out(&self) -> Option<&str> {
        self.outputs
            .iter()
            .find(|p| p.pin_type == PinType::Exec)
            .map(|p| p.id.as_str())
    }
}

/// A wire between an output pin and an input pin.
///
/// Invariant (enforced by the editor, relied on here): an input pin has at
/// most one incoming connection; an output pin may fan out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub id: String,
    pub from_node_id: String,
    pub from_output_id: String,
    pub to_node_id: String,
    pub to_input_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_kind_deserializes_to_unknown() {
        let json = r#"{"id":"n1","type":"quantumFlux","inputs":[],"outputs":[],"properties":{}}"#;
        let node: GraphNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.kind, NodeKind::Unknown);
    }

    #[test]
    fn known_kind_roundtrips_camel_case() {
        let json = r#"{"id":"n1","type":"triggerOnce"}"#;
        let node: GraphNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.kind, NodeKind::TriggerOnce);
        let back = serde_json::to_value(&node).unwrap();
        assert_eq!(back["type"], "triggerOnce");
    }

    #[test]
    fn prop_f32_accepts_numeric_strings() {
        let json = r#"{"id":"n1","type":"timer","properties":{"duration":"2.5","loop":true}}"#;
        let node: GraphNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.prop_f32("duration"), Some(2.5));
        assert_eq!(node.prop_bool("loop"), Some(true));
        assert_eq!(node.prop_f32("missing"), None);
    }
}
