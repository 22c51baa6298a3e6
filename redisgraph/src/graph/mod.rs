// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! In-memory graph model
//!
//! Nodes, edges and property values, each rendering itself into the Cypher
//! pattern syntax used by `CREATE` statements.

pub mod alias;
pub mod edge;
pub mod node;
pub mod value;

pub use alias::{random_alias, ALIAS_PREFIX, DEFAULT_ALIAS_SUFFIX_LEN};
pub use edge::Edge;
pub use node::Node;
pub use value::{Properties, Value};
