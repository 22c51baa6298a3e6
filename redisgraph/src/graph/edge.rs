// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Graph edge staged for creation

use crate::graph::node::Node;
use crate::graph::value::{property_clause, Properties, Value};
use std::fmt;
use std::sync::Arc;

/// Directed edge between two registered nodes
///
/// Endpoints are shared handles to the nodes returned by
/// [`RedisGraph::add_node`](crate::RedisGraph::add_node); the edge renders
/// them by alias only.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    source: Arc<Node>,
    relation: Option<String>,
    destination: Arc<Node>,
    properties: Properties,
}

impl Edge {
    /// Create an edge with a relationship type
    pub fn new(source: Arc<Node>, relation: impl Into<String>, destination: Arc<Node>) -> Self {
        Self {
            source,
            relation: Some(relation.into()),
            destination,
            properties: Properties::new(),
        }
    }

    /// Create an edge without a relationship type
    pub fn untyped(source: Arc<Node>, destination: Arc<Node>) -> Self {
        Self {
            source,
            relation: None,
            destination,
            properties: Properties::new(),
        }
    }

    /// Add a property
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key, value);
        self
    }

    /// Replace all properties
    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    pub fn source(&self) -> &Arc<Node> {
        &self.source
    }

    pub fn destination(&self) -> &Arc<Node> {
        &self.destination
    }

    pub fn relation(&self) -> Option<&str> {
        self.relation.as_deref()
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Render as a Cypher relationship pattern:
    /// `(src)-[[:relation][ {props}]]->(dst)`
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})-[", self.source.alias().unwrap_or(""))?;
        if let Some(relation) = &self.relation {
            write!(f, ":{}", relation)?;
        }
        write!(
            f,
            "{}]->({})",
            property_clause(&self.properties),
            self.destination.alias().unwrap_or("")
        )
    }
}
