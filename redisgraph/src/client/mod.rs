// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Graph client and command transport
//!
//! [`RedisGraph`] owns the pending graph and talks to the server through a
//! [`CommandChannel`]. [`TcpChannel`] is the bundled RESP-over-TCP channel,
//! configured by [`ClientConfig`].

pub mod channel;
pub mod config;
pub mod redis_graph;
pub mod resp;
pub mod tcp;

pub use channel::CommandChannel;
pub use config::ClientConfig;
pub use redis_graph::{RedisGraph, GRAPH_DELETE, GRAPH_QUERY};
pub use resp::RespValue;
pub use tcp::TcpChannel;
