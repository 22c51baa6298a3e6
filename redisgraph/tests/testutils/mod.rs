//! Test utilities for RedisGraph client integration tests
//!
//! Two fixture types available:
//! - MockChannel: in-memory CommandChannel that records commands and replays scripted replies
//! - FakeServer: RESP server on a local TCP port for exercising TcpChannel end to end

#![allow(dead_code)]

pub mod fake_server;
pub mod mock_channel;

/// Unique graph key so tests never share state
pub fn unique_graph_name(prefix: &str) -> String {
    format!("{}_{}", prefix, fastrand::u64(..))
}
