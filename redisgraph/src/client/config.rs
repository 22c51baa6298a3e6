// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Connection configuration for the bundled TCP channel

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 6379;
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 5_000;

/// Where and how to connect to the Redis server hosting RedisGraph
///
/// These options only concern the transport; the graph client never reads them.
///
/// # Examples
///
/// ```
/// use redisgraph::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .with_host("graph.internal")
///     .with_port(6380)
///     .with_password("s3cret")
///     .with_response_timeout(Duration::from_secs(30));
///
/// assert_eq!(config.address(), "graph.internal:6380");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    /// ACL username; only sent when a password is set
    pub username: Option<String>,
    pub password: Option<String>,
    /// Logical database selected after connecting
    pub db: u32,
    pub connect_timeout_ms: u64,
    /// No deadline on replies when unset
    pub response_timeout_ms: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            username: None,
            password: None,
            db: 0,
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            response_timeout_ms: None,
        }
    }
}

impl ClientConfig {
    /// Build a configuration from `REDIS_HOST`, `REDIS_PORT`, `REDIS_USERNAME`,
    /// `REDIS_PASSWORD` and `REDIS_DB`, falling back to defaults for unset variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(host) = std::env::var("REDIS_HOST") {
            config.host = host;
        }
        if let Ok(port) = std::env::var("REDIS_PORT") {
            config.port = port
                .parse()
                .map_err(|_| Error::Config(format!("Invalid REDIS_PORT: {}", port)))?;
        }
        if let Ok(username) = std::env::var("REDIS_USERNAME") {
            config.username = Some(username);
        }
        if let Ok(password) = std::env::var("REDIS_PASSWORD") {
            config.password = Some(password);
        }
        if let Ok(db) = std::env::var("REDIS_DB") {
            config.db = db
                .parse()
                .map_err(|_| Error::Config(format!("Invalid REDIS_DB: {}", db)))?;
        }

        Ok(config)
    }

    /// Parse a JSON configuration document; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_db(mut self, db: u32) -> Self {
        self.db = db;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn with_response_timeout(mut self, timeout: Duration) -> Self {
        self.response_timeout_ms = Some(timeout.as_millis() as u64);
        self
    }

    /// `host:port`
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn response_timeout(&self) -> Option<Duration> {
        self.response_timeout_ms.map(Duration::from_millis)
    }

    /// Arguments for the AUTH command, if credentials are configured
    pub(crate) fn auth_args(&self) -> Option<Vec<String>> {
        let password = self.password.clone()?;
        Some(match &self.username {
            Some(username) => vec![username.clone(), password],
            None => vec![password],
        })
    }
}
