// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Execution statistics reported by the server
//!
//! Every GRAPH.* reply ends with lines such as `Nodes created: 2` or
//! `Query internal execution time: 0.41 milliseconds`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

pub const LABELS_ADDED: &str = "Labels added";
pub const NODES_CREATED: &str = "Nodes created";
pub const NODES_DELETED: &str = "Nodes deleted";
pub const PROPERTIES_SET: &str = "Properties set";
pub const RELATIONSHIPS_CREATED: &str = "Relationships created";
pub const RELATIONSHIPS_DELETED: &str = "Relationships deleted";
pub const INDICES_CREATED: &str = "Indices created";
pub const INDICES_DELETED: &str = "Indices deleted";
pub const QUERY_EXECUTION_TIME: &str = "Query internal execution time";

/// `<label>: <number>[ unit]`
static STAT_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?P<label>[^:]+?)\s*:\s*(?P<value>[-+]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][-+]?[0-9]+)?)")
        .expect("statistics line pattern is valid")
});

/// Parsed statistics lines
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statistics {
    values: BTreeMap<String, f64>,
    /// Lines without a numeric value, e.g. a bare `OK`
    messages: Vec<String>,
}

impl Statistics {
    /// Parse statistics lines; lines that carry no number are kept as messages
    pub fn parse_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut statistics = Statistics::default();
        for line in lines {
            let line = line.as_ref();
            let parsed = STAT_LINE.captures(line).and_then(|caps| {
                let value = caps["value"].parse::<f64>().ok()?;
                Some((caps["label"].to_string(), value))
            });
            match parsed {
                Some((label, value)) => {
                    statistics.values.insert(label, value);
                }
                None => statistics.messages.push(line.to_string()),
            }
        }
        statistics
    }

    /// Raw value for a statistics label
    pub fn get(&self, label: &str) -> Option<f64> {
        self.values.get(label).copied()
    }

    fn count(&self, label: &str) -> u64 {
        self.get(label).map(|v| v as u64).unwrap_or(0)
    }

    pub fn labels_added(&self) -> u64 {
        self.count(LABELS_ADDED)
    }

    pub fn nodes_created(&self) -> u64 {
        self.count(NODES_CREATED)
    }

    pub fn nodes_deleted(&self) -> u64 {
        self.count(NODES_DELETED)
    }

    pub fn properties_set(&self) -> u64 {
        self.count(PROPERTIES_SET)
    }

    pub fn relationships_created(&self) -> u64 {
        self.count(RELATIONSHIPS_CREATED)
    }

    pub fn relationships_deleted(&self) -> u64 {
        self.count(RELATIONSHIPS_DELETED)
    }

    pub fn indices_created(&self) -> u64 {
        self.count(INDICES_CREATED)
    }

    pub fn indices_deleted(&self) -> u64 {
        self.count(INDICES_DELETED)
    }

    /// Server-side execution time in milliseconds
    ///
    /// `GRAPH.DELETE` reports it as `Graph removed, internal execution time: ...`,
    /// so any label ending in "execution time" is accepted.
    pub fn query_internal_execution_time(&self) -> Option<f64> {
        self.get(QUERY_EXECUTION_TIME).or_else(|| {
            self.values
                .iter()
                .find(|(label, _)| label.ends_with("execution time"))
                .map(|(_, value)| *value)
        })
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Iterate over `(label, value)` pairs sorted by label
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(label, value)| (label.as_str(), *value))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.messages.is_empty()
    }
}
