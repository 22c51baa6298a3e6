// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Reply decoding
//!
//! Turns raw GRAPH.QUERY / GRAPH.DELETE replies into columns, rows and
//! execution statistics, with serde-based typed access to rows.

pub mod result_set;
pub mod statistics;

pub use result_set::{ResultSet, Row};
pub use statistics::Statistics;
