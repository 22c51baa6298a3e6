// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Error types for the RedisGraph client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for RedisGraph client operations
#[derive(Error, Debug)]
pub enum Error {
    /// An edge endpoint is not registered in the pending node set
    #[error("Unregistered node: {0}")]
    UnregisteredNode(String),

    /// Error reply sent back by the server
    #[error("Server error: {0}")]
    Server(String),

    /// Reply that does not follow RESP or the GRAPH.* reply layout
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Connection errors
    #[error("Connection error: {0}")]
    Connection(String),

    /// A connect or response deadline elapsed
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Resource not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Error raised by a custom command channel, passed through untouched
    #[error("Channel error: {0}")]
    Channel(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the error was produced before anything was sent to the server
    pub fn is_precondition(&self) -> bool {
        matches!(self, Error::UnregisteredNode(_) | Error::Config(_))
    }
}
