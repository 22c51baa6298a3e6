// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! RedisGraph CLI entry point

use clap::Parser;
use colored::Colorize;

mod cli;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments first to get log level
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        // -v/--verbose flag takes precedence
        log::LevelFilter::Debug
    } else if let Some(level) = cli.log_level {
        level.to_level_filter()
    } else {
        // Default to Warn (can still be overridden by RUST_LOG env var)
        log::LevelFilter::Warn
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    match &cli.command {
        Commands::Version => {
            println!("{} {}", "redisgraph".bold().green(), redisgraph::VERSION);
            println!("RedisGraph command-line client");
            Ok(())
        }

        Commands::Query {
            graph,
            query,
            format,
        } => {
            let config = cli.connection.resolve()?;
            cli::handle_query(&config, graph, query, *format).await
        }

        Commands::Delete { graph } => {
            let config = cli.connection.resolve()?;
            cli::handle_delete(&config, graph).await
        }

        Commands::Console { graph } => {
            let config = cli.connection.resolve()?;
            cli::handle_console(&config, graph).await
        }

        Commands::Load {
            graph,
            file,
            dry_run,
            format,
        } => {
            if *dry_run {
                cli::handle_load_dry_run(graph, file)
            } else {
                let config = cli.connection.resolve()?;
                cli::handle_load(&config, graph, file, *format).await
            }
        }
    }
}
