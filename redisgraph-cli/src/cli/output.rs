// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Result formatting for CLI output

use crate::cli::commands::OutputFormat;
use colored::*;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use redisgraph::{ResultSet, Statistics, Value};

/// Result formatter for different output formats
pub struct ResultFormatter;

impl ResultFormatter {
    /// Format query results in the specified format
    pub fn format(result: &ResultSet, format: OutputFormat) -> String {
        match format {
            OutputFormat::Table => Self::format_table(result),
            OutputFormat::Json => Self::format_json(result),
            OutputFormat::Csv => Self::format_csv(result),
        }
    }

    /// Format results as a table using comfy-table
    fn format_table(result: &ResultSet) -> String {
        let mut output = String::new();

        if result.columns().is_empty() {
            output.push_str(&format!("{}\n", "Query executed".green()));
        } else if result.is_empty() {
            output.push_str(&format!("{}\n", "No results found".yellow()));
        } else {
            output.push_str(&format!("{}\n", "Query Results".bold().green()));
            output.push_str(&format!("Rows returned: {}\n\n", result.row_count()));

            let mut table = Table::new();
            table.load_preset(UTF8_FULL);

            let header_cells: Vec<Cell> = result
                .columns()
                .iter()
                .map(|col| Cell::new(col).fg(Color::Green))
                .collect();
            table.set_header(header_cells);

            for row in result.rows() {
                let row_values: Vec<String> = result
                    .columns()
                    .iter()
                    .map(|col| {
                        row.get_value(col)
                            .map(Self::value_to_string)
                            .unwrap_or_else(|| "NULL".to_string())
                    })
                    .collect();
                table.add_row(row_values);
            }

            output.push_str(&table.to_string());
            output.push('\n');
        }

        output.push_str(&Self::format_statistics(result.statistics()));
        output
    }

    fn format_statistics(statistics: &Statistics) -> String {
        let mut output = String::new();
        for (label, value) in statistics.iter() {
            output.push_str(&format!("{}: {}\n", label.cyan(), value));
        }
        for message in statistics.messages() {
            output.push_str(&format!("{}\n", message.cyan()));
        }
        output
    }

    /// Format results as JSON
    fn format_json(result: &ResultSet) -> String {
        let statistics: serde_json::Map<String, serde_json::Value> = result
            .statistics()
            .iter()
            .map(|(label, value)| (label.to_string(), serde_json::json!(value)))
            .collect();

        let json_obj = serde_json::json!({
            "status": "success",
            "columns": result.columns(),
            "rows": result.rows().iter().map(|row| row.to_json()).collect::<Vec<_>>(),
            "statistics": statistics,
            "messages": result.statistics().messages(),
        });

        serde_json::to_string_pretty(&json_obj).unwrap_or_else(|_| {
            "{\"status\": \"error\", \"error\": \"Could not serialize results to JSON\"}".to_string()
        })
    }

    /// Format results as CSV
    fn format_csv(result: &ResultSet) -> String {
        let mut output = String::new();

        output.push_str(&result.columns().join(","));
        output.push('\n');

        for row in result.rows() {
            let row_values: Vec<String> = result
                .columns()
                .iter()
                .map(|col| {
                    row.get_value(col)
                        .map(Self::value_to_csv_string)
                        .unwrap_or_default()
                })
                .collect();
            output.push_str(&row_values.join(","));
            output.push('\n');
        }

        // Statistics as CSV comments
        let statistics = result.statistics();
        if !statistics.is_empty() {
            output.push('\n');
            for (label, value) in statistics.iter() {
                output.push_str(&format!("# {}: {}\n", label, value));
            }
            for message in statistics.messages() {
                output.push_str(&format!("# {}\n", message));
            }
        }

        output
    }

    /// Convert a Value to a display string; strings are shown unquoted
    fn value_to_string(value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            Value::Null => "NULL".to_string(),
            other => other.to_string(),
        }
    }

    /// Convert a Value to a CSV-safe string
    fn value_to_csv_string(value: &Value) -> String {
        let s = match value {
            Value::Null => String::new(),
            other => Self::value_to_string(other),
        };
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s
        }
    }
}
