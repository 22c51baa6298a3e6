// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Graph node staged for creation

use crate::graph::value::{property_clause, Properties, Value};
use std::fmt;

/// Graph node with an optional alias, label and properties
///
/// The alias names the node inside one `CREATE` statement so edges can refer
/// to it. Nodes registered without an alias get a random one from
/// [`RedisGraph::add_node`](crate::RedisGraph::add_node).
///
/// # Examples
///
/// ```
/// use redisgraph::Node;
///
/// let node = Node::new()
///     .with_alias("a")
///     .with_label("Person")
///     .with_property("name", "Alice")
///     .with_property("age", 30);
///
/// assert_eq!(node.to_string(), r#"(a:Person {name: "Alice", age: 30})"#);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    id: Option<u64>,
    alias: Option<String>,
    label: Option<String>,
    properties: Properties,
}

impl Node {
    /// Create a node with no alias, label or properties
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the server-assigned id
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the alias
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Set the label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
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

    /// Server-assigned id, if any
    pub fn id(&self) -> Option<u64> {
        self.id
    }

    /// Set the alias. Uniqueness is enforced by the graph, not the node.
    pub fn set_alias(&mut self, alias: impl Into<String>) {
        self.alias = Some(alias.into());
    }

    /// Current alias, if any
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Set a property value
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.properties.insert(key, value);
    }

    /// Get a property value
    pub fn get_property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Render as a Cypher node pattern: `(alias[:label][ {props}])`
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.alias.as_deref().unwrap_or(""))?;
        if let Some(label) = &self.label {
            write!(f, ":{}", label)?;
        }
        write!(f, "{})", property_clause(&self.properties))
    }
}
