// Documents kept in the map data directory

use crate::error::UnknownRole;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Purpose of a node as shown on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Node,
    Temp,
    Mobile,
    Offloader,
    Service,
    Test,
    Gate,
    Plan,
    Hidden,
}

impl Role {
    pub const ALL: [Role; 9] = [
        Role::Node,
        Role::Temp,
        Role::Mobile,
        Role::Offloader,
        Role::Service,
        Role::Test,
        Role::Gate,
        Role::Plan,
        Role::Hidden,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Node => "node",
            Role::Temp => "temp",
            Role::Mobile => "mobile",
            Role::Offloader => "offloader",
            Role::Service => "service",
            Role::Test => "test",
            Role::Gate => "gate",
            Role::Plan => "plan",
            Role::Hidden => "hidden",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    // Role names are matched exactly, the map frontend compares them case-sensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

// The documents below stay plain JSON objects so that rewriting a file keeps
// key order, explicit nulls and fields this tool knows nothing about.

/// `nodes.json`: node records keyed by node id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeDb(Map<String, Value>);

impl Default for NodeDb {
    fn default() -> Self {
        Self(object([("nodes", Value::Object(Map::new()))]))
    }
}

impl NodeDb {
    pub fn node(&self, node_id: &str) -> Option<&Value> {
        self.0.get("nodes")?.get(node_id)
    }

    pub fn node_ids(&self) -> Vec<&str> {
        self.0
            .get("nodes")
            .and_then(Value::as_object)
            .map(|nodes| nodes.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// `None` when the document has no `nodes` object.
    pub fn nodes_mut(&mut self) -> Option<&mut Map<String, Value>> {
        self.0.get_mut("nodes").and_then(Value::as_object_mut)
    }
}

/// `nodelist.json`: flat list consumed by list-style frontends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeList(Map<String, Value>);

impl Default for NodeList {
    fn default() -> Self {
        Self(object([("nodes", Value::Array(Vec::new()))]))
    }
}

impl NodeList {
    /// Entries with an `id` and optional `role` and `position`.
    pub fn entries(&self) -> &[Value] {
        array(&self.0, "nodes")
    }

    pub fn entries_mut(&mut self) -> Option<&mut Vec<Value>> {
        array_mut(&mut self.0, "nodes")
    }
}

/// `graph.json`: batman-adv topology.
///
/// Vertices seen only on the mesh carry no `node_id`. Links address vertices
/// by their position in `batadv.nodes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Graph(Map<String, Value>);

impl Default for Graph {
    fn default() -> Self {
        let batadv = object([
            ("nodes", Value::Array(Vec::new())),
            ("links", Value::Array(Vec::new())),
        ]);
        Self(object([("batadv", Value::Object(batadv))]))
    }
}

impl Graph {
    pub fn nodes(&self) -> &[Value] {
        self.batadv()
            .map(|batadv| array(batadv, "nodes"))
            .unwrap_or_default()
    }

    pub fn links(&self) -> &[Value] {
        self.batadv()
            .map(|batadv| array(batadv, "links"))
            .unwrap_or_default()
    }

    pub fn nodes_mut(&mut self) -> Option<&mut Vec<Value>> {
        array_mut(self.batadv_mut()?, "nodes")
    }

    pub fn links_mut(&mut self) -> Option<&mut Vec<Value>> {
        array_mut(self.batadv_mut()?, "links")
    }

    fn batadv(&self) -> Option<&Map<String, Value>> {
        self.0.get("batadv").and_then(Value::as_object)
    }

    fn batadv_mut(&mut self) -> Option<&mut Map<String, Value>> {
        self.0.get_mut("batadv").and_then(Value::as_object_mut)
    }
}

fn object<const N: usize>(fields: [(&str, Value); N]) -> Map<String, Value> {
    fields
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

fn array<'a>(map: &'a Map<String, Value>, key: &str) -> &'a [Value] {
    map.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn array_mut<'a>(map: &'a mut Map<String, Value>, key: &str) -> Option<&'a mut Vec<Value>> {
    map.get_mut(key).and_then(Value::as_array_mut)
}
