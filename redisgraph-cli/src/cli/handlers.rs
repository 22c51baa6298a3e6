// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI command handlers for the RedisGraph client

use colored::Colorize;
use rustyline::{error::ReadlineError, CompletionType, Config, EditMode, Editor};
use std::path::Path;
use std::sync::Arc;

use super::commands::OutputFormat;
use super::load::GraphDocument;
use super::output::ResultFormatter;
use redisgraph::{ClientConfig, CommandChannel, RedisGraph, TcpChannel};

const HISTORY_FILE: &str = ".redisgraph/.cypher_history.txt";

/// Open a channel and report where it went
async fn connect(
    config: &ClientConfig,
    graph: &str,
) -> Result<RedisGraph, Box<dyn std::error::Error>> {
    let channel = TcpChannel::connect(config)
        .await
        .map_err(|e| format!("Failed to connect to {}: {}", config.address(), e))?;
    log::info!("Connected to {} for graph '{}'", channel.address(), graph);
    Ok(RedisGraph::new(graph, Arc::new(channel) as Arc<dyn CommandChannel>))
}

/// Handle the query command (one-off query execution)
pub async fn handle_query(
    config: &ClientConfig,
    graph: &str,
    query: &str,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = connect(config, graph).await?;

    // Errors are reported once, by main
    let result = client.query(query).await?;
    println!("{}", ResultFormatter::format(&result, format));
    Ok(())
}

/// Handle the delete command
pub async fn handle_delete(
    config: &ClientConfig,
    graph: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = connect(config, graph).await?;

    let result = client.delete_graph().await?;
    println!("{}", format!("Graph '{}' deleted", graph).green());
    if let Some(ms) = result.statistics().query_internal_execution_time() {
        println!("Execution time: {} ms", ms);
    }
    Ok(())
}

/// Handle the load command
pub async fn handle_load(
    config: &ClientConfig,
    graph: &str,
    file: &Path,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let document = GraphDocument::from_file(file)?;
    let client = connect(config, graph).await?;

    document.stage(&client)?;
    println!(
        "Staged {} nodes and {} edges from {}",
        client.node_count(),
        client.edge_count(),
        file.display()
    );

    let result = client.commit().await?;
    println!("{}", ResultFormatter::format(&result, format));
    Ok(())
}

/// Handle `load --dry-run`: print the statement without connecting
pub fn handle_load_dry_run(graph: &str, file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let document = GraphDocument::from_file(file)?;
    let client = RedisGraph::new(graph, Arc::new(DryRun) as Arc<dyn CommandChannel>);

    document.stage(&client)?;
    match client.pending_query() {
        Some(query) => println!("{}", query),
        None => println!("{}", "Nothing to create".yellow()),
    }
    Ok(())
}

/// Channel for dry runs; staging never sends anything
struct DryRun;

#[async_trait::async_trait]
impl CommandChannel for DryRun {
    async fn send_command(
        &self,
        command: &str,
        _args: &[String],
    ) -> redisgraph::Result<redisgraph::RespValue> {
        Err(redisgraph::Error::Connection(format!(
            "{} not sent: dry run",
            command
        )))
    }
}

/// Handle the console (REPL) command
pub async fn handle_console(
    config: &ClientConfig,
    graph: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = connect(config, graph).await?;

    println!("{}", "RedisGraph".bold().green());
    println!("Type 'help' for commands, 'exit' or 'quit' to exit");
    println!("Multi-line queries supported - use ';' to terminate\n");
    println!("{}", format!("Connected to {} graph '{}'", config.address(), graph).cyan());

    let rl_config = Config::builder()
        .edit_mode(EditMode::Emacs)
        .history_ignore_space(true)
        .completion_type(CompletionType::List)
        .auto_add_history(false)
        .build();

    let mut rl = Editor::<(), _>::with_config(rl_config)?;

    if let Some(parent) = Path::new(HISTORY_FILE).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let _ = rl.load_history(HISTORY_FILE);

    let mut query_buffer = String::new();

    loop {
        let prompt = if query_buffer.is_empty() {
            format!("{}> ", graph.cyan())
        } else {
            format!("{}...> ", " ".repeat(graph.len()))
        };

        let line = match rl.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                if !query_buffer.is_empty() {
                    query_buffer.clear();
                    println!("{}", "\nQuery buffer cleared".yellow());
                }
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        };

        let trimmed = line.trim();

        if query_buffer.is_empty() {
            match trimmed.to_lowercase().as_str() {
                "exit" | "quit" => {
                    println!("{}", "Goodbye!".green());
                    break;
                }
                "help" => {
                    print_help();
                    continue;
                }
                "clear" => {
                    print!("\x1B[2J\x1B[1;1H");
                    std::io::Write::flush(&mut std::io::stdout())?;
                    continue;
                }
                "" => continue,
                _ => {}
            }
        }

        query_buffer.push_str(&line);
        query_buffer.push('\n');

        if is_terminated(&query_buffer) {
            rl.add_history_entry(query_buffer.trim())?;

            if let Some(query) = complete_statement(&query_buffer) {
                match client.query(&query).await {
                    Ok(result) => {
                        println!("{}", ResultFormatter::format(&result, OutputFormat::Table))
                    }
                    Err(e) => eprintln!("{}", format!("Error: {}", e).red()),
                }
            }

            query_buffer.clear();
        }
    }

    let _ = rl.save_history(HISTORY_FILE);

    Ok(())
}

/// Whether the buffered input ends with `;`
fn is_terminated(buffer: &str) -> bool {
    buffer.trim_end().ends_with(';')
}

/// The statement in `buffer` without its terminating `;`; `None` until the
/// input is terminated or when nothing but `;` was typed
fn complete_statement(buffer: &str) -> Option<String> {
    buffer
        .trim_end()
        .strip_suffix(';')
        .map(str::trim)
        .filter(|statement| !statement.is_empty())
        .map(str::to_string)
}

/// Print help message
fn print_help() {
    println!("{}", "Available commands:".bold().green());
    println!("  {}  - Show this help message", "help".cyan());
    println!("  {}  - Exit the console", "exit/quit".cyan());
    println!("  {}  - Clear the screen", "clear".cyan());
    println!("\n{}", "Query syntax:".bold().green());
    println!("  Multi-line queries are supported");
    println!("  Terminate queries with semicolon (;)");
    println!("\n{}", "Examples:".bold().green());
    println!("  {}", "MATCH (n:Person) RETURN n.name;".yellow());
    println!("  {}", "CREATE (:Person {{name: 'Alice'}});".yellow());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_statement() {
        assert_eq!(complete_statement("MATCH (n)\n"), None);
        assert_eq!(
            complete_statement("MATCH (n)\nRETURN n;\n").as_deref(),
            Some("MATCH (n)\nRETURN n")
        );
    }

    #[test]
    fn test_empty_statement_is_skipped() {
        assert!(is_terminated(";\n"));
        assert_eq!(complete_statement(";\n"), None);
        assert_eq!(complete_statement("  \n ;  \n"), None);
        assert!(!is_terminated("MATCH (n)\n"));
    }
}
