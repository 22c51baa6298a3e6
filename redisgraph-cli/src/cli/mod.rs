// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI module for the RedisGraph client
//!
//! Provides one-off queries, graph deletion, bulk loading from JSON and an
//! interactive Cypher console (REPL).

pub mod commands;
pub mod handlers;
pub mod load;
pub mod output;

pub use commands::{Cli, Commands};
pub use handlers::{handle_console, handle_delete, handle_load, handle_load_dry_run, handle_query};
