// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI command definitions for the RedisGraph client

use clap::{Args, Parser, Subcommand, ValueEnum};
use redisgraph::ClientConfig;
use std::path::PathBuf;
use std::time::Duration;

/// Log level options
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only errors
    Error,
    /// Warnings and errors
    Warn,
    /// Info, warnings, and errors
    Info,
    /// Debug messages and above (verbose)
    Debug,
    /// All messages including trace (very verbose)
    Trace,
    /// Disable all logging
    Off,
}

impl LogLevel {
    /// Convert to log::LevelFilter
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Off => log::LevelFilter::Off,
        }
    }
}

/// RedisGraph CLI - query and populate graphs on a Redis server
#[derive(Parser)]
#[command(name = "redisgraph")]
#[command(about = "RedisGraph - command-line client for graphs stored in Redis")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Set log level (error, warn, info, debug, trace, off)
    #[arg(short = 'l', long = "log-level", global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Verbose mode (equivalent to --log-level debug)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Connection flags, layered over `REDIS_*` environment variables
#[derive(Args, Debug, Default)]
pub struct ConnectionArgs {
    /// JSON file with a client configuration, used instead of the environment
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Server host
    #[arg(short = 'H', long = "host", global = true)]
    pub host: Option<String>,

    /// Server port
    #[arg(short = 'P', long = "port", global = true)]
    pub port: Option<u16>,

    /// ACL username
    #[arg(short = 'u', long = "user", global = true)]
    pub user: Option<String>,

    /// Password for authentication
    #[arg(short = 'p', long = "password", global = true)]
    pub password: Option<String>,

    /// Prompt for the password
    #[arg(long = "ask-pass", global = true, conflicts_with = "password")]
    pub ask_pass: bool,

    /// Logical database number
    #[arg(short = 'n', long = "db", global = true)]
    pub db: Option<u32>,

    /// Reply timeout in milliseconds
    #[arg(short = 't', long = "timeout", global = true)]
    pub timeout_ms: Option<u64>,
}

impl ConnectionArgs {
    /// Flags without a prompt; see [`resolve`](Self::resolve)
    pub fn apply(&self, base: ClientConfig) -> ClientConfig {
        let mut config = base;
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(user) = &self.user {
            config.username = Some(user.clone());
        }
        if let Some(password) = &self.password {
            config.password = Some(password.clone());
        }
        if let Some(db) = self.db {
            config.db = db;
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config = config.with_response_timeout(Duration::from_millis(timeout_ms));
        }
        config
    }

    /// Build the client configuration: config file or environment, then flags,
    /// then the password prompt when requested
    pub fn resolve(&self) -> Result<ClientConfig, Box<dyn std::error::Error>> {
        let base = match &self.config {
            Some(path) => ClientConfig::from_json(&std::fs::read_to_string(path)?)?,
            None => ClientConfig::from_env()?,
        };
        let mut config = self.apply(base);

        if self.ask_pass {
            config.password = Some(rpassword::prompt_password("Password: ")?);
        }

        Ok(config)
    }
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Show detailed version information
    Version,

    /// Execute a Cypher query against a graph
    Query {
        /// Graph key
        graph: String,

        /// The Cypher query to execute
        query: String,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Delete a graph and everything in it
    Delete {
        /// Graph key
        graph: String,
    },

    /// Interactive Cypher console (REPL)
    Console {
        /// Graph key
        graph: String,
    },

    /// Create nodes and edges described in a JSON file with a single commit
    Load {
        /// Graph key
        graph: String,

        /// JSON document with `nodes` and `edges` arrays
        file: PathBuf,

        /// Print the CREATE statement instead of sending it
        #[arg(long)]
        dry_run: bool,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
}

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("table".parse::<OutputFormat>(), Ok(OutputFormat::Table));
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_flags_override_base_config() {
        let args = ConnectionArgs {
            host: Some("graph.internal".to_string()),
            db: Some(3),
            timeout_ms: Some(250),
            ..Default::default()
        };
        let config = args.apply(ClientConfig::default().with_port(6380));

        assert_eq!(config.address(), "graph.internal:6380");
        assert_eq!(config.db, 3);
        assert_eq!(config.response_timeout(), Some(Duration::from_millis(250)));
        assert_eq!(config.password, None);
    }

    #[test]
    fn test_parse_query_command() {
        let cli = Cli::parse_from([
            "redisgraph",
            "query",
            "social",
            "MATCH (n) RETURN n",
            "--format",
            "csv",
            "--port",
            "7000",
        ]);
        assert_eq!(cli.connection.port, Some(7000));
        match cli.command {
            Commands::Query {
                graph,
                query,
                format,
            } => {
                assert_eq!(graph, "social");
                assert_eq!(query, "MATCH (n) RETURN n");
                assert_eq!(format, OutputFormat::Csv);
            }
            _ => panic!("Expected query command"),
        }
    }
}
