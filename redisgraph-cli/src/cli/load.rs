// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Bulk graph documents
//!
//! ```json
//! {
//!   "nodes": [{"alias": "a", "label": "Person", "properties": {"name": "Alice"}}],
//!   "edges": [{"source": "a", "relation": "KNOWS", "destination": "b"}]
//! }
//! ```

use redisgraph::{Edge, Node, Properties, RedisGraph, Value};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GraphDocument {
    pub nodes: Vec<NodeEntry>,
    pub edges: Vec<EdgeEntry>,
}

#[derive(Debug, Deserialize)]
pub struct NodeEntry {
    /// Random when omitted; such nodes cannot be referenced by edges
    pub alias: Option<String>,
    pub label: Option<String>,
    #[serde(default)]
    pub properties: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct EdgeEntry {
    pub source: String,
    pub relation: Option<String>,
    pub destination: String,
    #[serde(default)]
    pub properties: serde_json::Map<String, serde_json::Value>,
}

impl GraphDocument {
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Stage every node, then every edge, on `graph`
    ///
    /// Edges are resolved by alias against the pending nodes, so an edge naming
    /// an alias that is not in the document fails with the graph's error.
    pub fn stage(self, graph: &RedisGraph) -> redisgraph::Result<()> {
        for entry in self.nodes {
            let mut node = Node::new().with_properties(to_properties(entry.properties));
            if let Some(alias) = entry.alias {
                node = node.with_alias(alias);
            }
            if let Some(label) = entry.label {
                node = node.with_label(label);
            }
            graph.add_node(node);
        }

        for entry in self.edges {
            let source = endpoint(graph, &entry.source);
            let destination = endpoint(graph, &entry.destination);
            let edge = match entry.relation {
                Some(relation) => Edge::new(source, relation, destination),
                None => Edge::untyped(source, destination),
            };
            graph.add_edge(edge.with_properties(to_properties(entry.properties)))?;
        }

        Ok(())
    }
}

/// The pending node for `alias`, or a bare placeholder that `add_edge` will reject
fn endpoint(graph: &RedisGraph, alias: &str) -> std::sync::Arc<Node> {
    graph
        .node(alias)
        .unwrap_or_else(|| std::sync::Arc::new(Node::new().with_alias(alias)))
}

fn to_properties(map: serde_json::Map<String, serde_json::Value>) -> Properties {
    map.into_iter()
        .map(|(key, value)| (key, Value::from(value)))
        .collect()
}
