// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! RedisGraph client - build graphs in memory and commit them to a RedisGraph server
//!
//! The client stages nodes and edges locally, renders them into a single Cypher
//! `CREATE` statement and dispatches it with `GRAPH.QUERY` over a Redis connection.
//!
//! # Quick Start
//!
//! ```no_run
//! use redisgraph::{ClientConfig, Edge, Node, RedisGraph};
//!
//! # async fn run() -> redisgraph::Result<()> {
//! let graph = RedisGraph::connect("social", &ClientConfig::default()).await?;
//!
//! let alice = graph.add_node(
//!     Node::new()
//!         .with_alias("a")
//!         .with_label("Person")
//!         .with_property("name", "Alice")
//!         .with_property("age", 30),
//! );
//! let bob = graph.add_node(Node::new().with_label("Person").with_property("name", "Bob"));
//! graph.add_edge(Edge::new(alice, "KNOWS", bob))?;
//!
//! // CREATE (a:Person {name: "Alice", age: 30}),(node...:Person {name: "Bob"}),(a)-[:KNOWS]->(node...)
//! let result = graph.commit().await?;
//! println!("nodes created: {}", result.statistics().nodes_created());
//!
//! let people = graph.query("MATCH (p:Person) RETURN p.name").await?;
//! for row in people.rows() {
//!     println!("{:?}", row.get_value("p.name"));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │   Application Code                      │
//! └─────────────────────────────────────────┘
//!                  │ Node / Edge
//!                  ▼
//! ┌─────────────────────────────────────────┐
//! │  RedisGraph (pending nodes + edges)     │
//! │  - add_node / add_edge / clear          │
//! │  - commit  -> CREATE ...                │
//! │  - query / delete_graph                 │
//! └─────────────────────────────────────────┘
//!                  │ GRAPH.QUERY / GRAPH.DELETE
//!                  ▼
//! ┌─────────────────────────────────────────┐
//! │  CommandChannel (TcpChannel or custom)  │
//! └─────────────────────────────────────────┘
//!                  │ RESP reply
//!                  ▼
//! ┌─────────────────────────────────────────┐
//! │  ResultSet (columns, rows, statistics)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Module Organization
//!
//! - [`graph`] - Nodes, edges, property values and query rendering
//! - [`client`] - The graph client, command channels and connection configuration
//! - [`result`] - Reply decoding and typed deserialization
//! - [`error`] - Error types

pub mod client;
pub mod error;
pub mod graph;
pub mod result;

pub use client::{
    ClientConfig, CommandChannel, RedisGraph, RespValue, TcpChannel, GRAPH_DELETE, GRAPH_QUERY,
};
pub use error::{Error, Result};
pub use graph::{random_alias, Edge, Node, Properties, Value};
pub use result::{ResultSet, Row, Statistics};

/// Client version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Client crate name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
