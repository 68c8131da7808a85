//! Scene record as produced by the editor and consumed by both hosts.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::components::gameobject::GameObject;
use crate::components::graph::{Connection, GraphNode};

/// A complete authored scene: the object population plus its node graph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    #[serde(default)]
    pub game_objects: Vec<GameObject>,
    #[serde(default)]
    pub layers: Vec<String>,
    #[serde(default)]
    pub active_layer_name: String,
    #[serde(default)]
    pub nodes: Vec<GraphNode>,
    #[serde(default)]
    pub connections: Vec<Connection>,
}

impl Scene {
    /// Parse a scene from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Failed to parse scene JSON: {}", e))
    }

    /// Load and parse a scene file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read scene file {:?}: {}", path, e))?;
        Self::from_json(&json)
    }
}
