// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Decoded GRAPH.QUERY / GRAPH.DELETE replies
//!
//! Reply layouts:
//! - `[statistics]` for statements that return nothing
//! - `[header, rows, statistics]` for statements with a RETURN clause
//! - a simple string for GRAPH.DELETE on some server versions

use crate::client::resp::RespValue;
use crate::error::{Error, Result};
use crate::graph::Value;
use crate::result::statistics::Statistics;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// One result row, addressable by column name or position
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    /// Named column bindings (e.g., "p.name" -> "Alice")
    values: HashMap<String, Value>,
    /// Values in column order
    positional_values: Vec<Value>,
}

impl Row {
    fn from_cells(columns: &[String], cells: Vec<Value>) -> Self {
        let values = columns.iter().cloned().zip(cells.iter().cloned()).collect();
        Row {
            values,
            positional_values: cells,
        }
    }

    /// Value of a named column
    pub fn get_value(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }

    /// Value at a column position
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.positional_values.get(index)
    }

    /// Values in column order
    pub fn values(&self) -> &[Value] {
        &self.positional_values
    }

    pub fn len(&self) -> usize {
        self.positional_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positional_values.is_empty()
    }

    /// The row as a JSON object keyed by column name
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.values
                .iter()
                .map(|(column, value)| (column.clone(), value.to_json()))
                .collect(),
        )
    }
}

/// Columns, rows and statistics of one reply
///
/// # Examples
///
/// ```no_run
/// use serde::Deserialize;
/// # use redisgraph::{ClientConfig, RedisGraph};
///
/// #[derive(Deserialize, Debug)]
/// struct Person {
///     name: String,
///     age: u32,
/// }
///
/// # async fn run() -> redisgraph::Result<()> {
/// # let graph = RedisGraph::connect("social", &ClientConfig::default()).await?;
/// let result = graph
///     .query("MATCH (p:Person) RETURN p.name AS name, p.age AS age")
///     .await?;
///
/// for person in result.deserialize_rows::<Person>()? {
///     println!("Person: {:?}", person);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    columns: Vec<String>,
    rows: Vec<Row>,
    statistics: Statistics,
}

impl ResultSet {
    /// A result with no columns, rows or statistics
    pub fn empty() -> Self {
        Self::default()
    }

    /// Decode a raw reply
    pub fn parse(reply: RespValue) -> Result<Self> {
        match reply {
            RespValue::Array(Some(sections)) => Self::from_sections(sections),
            RespValue::SimpleString(line) => Ok(Self::from_statistics(Statistics::parse_lines([line]))),
            RespValue::BulkString(Some(bytes)) => Ok(Self::from_statistics(
                Statistics::parse_lines([String::from_utf8_lossy(&bytes)]),
            )),
            RespValue::Error(message) => Err(Error::Server(message)),
            other => Err(Error::Protocol(format!(
                "unexpected reply to graph command: {}",
                other
            ))),
        }
    }

    fn from_statistics(statistics: Statistics) -> Self {
        ResultSet {
            statistics,
            ..Self::default()
        }
    }

    fn from_sections(sections: Vec<RespValue>) -> Result<Self> {
        let mut sections = sections.into_iter();
        match (sections.next(), sections.next(), sections.next(), sections.next()) {
            (Some(stats), None, None, None) => Ok(Self::from_statistics(parse_statistics(stats)?)),
            (Some(header), Some(rows), stats, None) => {
                let columns = parse_header(header)?;
                let rows = parse_rows(&columns, rows)?;
                let statistics = match stats {
                    Some(stats) => parse_statistics(stats)?,
                    None => Statistics::default(),
                };
                Ok(ResultSet {
                    columns,
                    rows,
                    statistics,
                })
            }
            _ => Err(Error::Protocol(
                "graph reply must have one to three sections".to_string(),
            )),
        }
    }

    /// Column names from the RETURN clause
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn get_row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the result is empty (no rows)
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// Deserialize all rows into a vector of the given type
    ///
    /// Each row is converted to a JSON object keyed by column name and then
    /// deserialized with serde.
    pub fn deserialize_rows<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        self.rows.iter().map(|row| self.deserialize_row(row)).collect()
    }

    /// Deserialize a single row into the given type
    pub fn deserialize_row<T: DeserializeOwned>(&self, row: &Row) -> Result<T> {
        Ok(serde_json::from_value(row.to_json())?)
    }

    /// Get the first row as the given type
    pub fn first<T: DeserializeOwned>(&self) -> Result<T> {
        let row = self
            .get_row(0)
            .ok_or_else(|| Error::NotFound("No rows returned".to_string()))?;

        self.deserialize_row(row)
    }

    /// Get a single value from the first row and first column
    pub fn scalar<T: DeserializeOwned>(&self) -> Result<T> {
        let row = self
            .get_row(0)
            .ok_or_else(|| Error::NotFound("No rows returned".to_string()))?;

        let value = row
            .get(0)
            .ok_or_else(|| Error::NotFound("No columns returned".to_string()))?;

        Ok(serde_json::from_value(value.to_json())?)
    }
}

/// Column names, one bulk string per column
fn parse_header(header: RespValue) -> Result<Vec<String>> {
    expect_array(header, "header")?
        .into_iter()
        .map(|entry| {
            entry
                .into_string()
                .ok_or_else(|| Error::Protocol("header column name is not a string".to_string()))
        })
        .collect()
}

fn parse_rows(columns: &[String], rows: RespValue) -> Result<Vec<Row>> {
    expect_array(rows, "rows")?
        .into_iter()
        .map(|row| {
            let cells: Vec<Value> = expect_array(row, "row")?
                .into_iter()
                .map(value_from_reply)
                .collect();
            if cells.len() != columns.len() {
                return Err(Error::Protocol(format!(
                    "row has {} cells for {} columns",
                    cells.len(),
                    columns.len()
                )));
            }
            Ok(Row::from_cells(columns, cells))
        })
        .collect()
}

fn parse_statistics(stats: RespValue) -> Result<Statistics> {
    let lines = expect_array(stats, "statistics")?
        .into_iter()
        .map(|line| {
            line.into_string()
                .ok_or_else(|| Error::Protocol("statistics line is not a string".to_string()))
        })
        .collect::<Result<Vec<String>>>()?;
    Ok(Statistics::parse_lines(lines))
}

/// Array contents; a nil array counts as empty
fn expect_array(value: RespValue, section: &str) -> Result<Vec<RespValue>> {
    match value {
        RespValue::Array(Some(items)) => Ok(items),
        RespValue::Array(None) => Ok(Vec::new()),
        other => Err(Error::Protocol(format!(
            "expected array for {}, got {}",
            section, other
        ))),
    }
}

/// Cell value. Strings stay strings even when they look numeric.
fn value_from_reply(value: RespValue) -> Value {
    match value {
        RespValue::Integer(n) => Value::Integer(n),
        RespValue::SimpleString(s) => Value::String(s),
        RespValue::BulkString(Some(bytes)) => {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        }
        RespValue::BulkString(None) | RespValue::Array(None) => Value::Null,
        RespValue::Array(Some(items)) => {
            Value::List(items.into_iter().map(value_from_reply).collect())
        }
        RespValue::Error(message) => Value::String(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    fn bulk(s: &str) -> RespValue {
        RespValue::BulkString(Some(s.as_bytes().to_vec()))
    }

    fn array(items: Vec<RespValue>) -> RespValue {
        RespValue::Array(Some(items))
    }

    fn people_reply() -> RespValue {
        array(vec![
            array(vec![bulk("name"), bulk("age")]),
            array(vec![
                array(vec![bulk("Alice"), RespValue::Integer(30)]),
                array(vec![bulk("Bob"), RespValue::BulkString(None)]),
            ]),
            array(vec![bulk("Query internal execution time: 0.2 milliseconds")]),
        ])
    }

    #[test]
    fn test_parse_statistics_only() {
        let reply = array(vec![array(vec![
            bulk("Nodes created: 2"),
            bulk("Relationships created: 1"),
        ])]);
        let result = ResultSet::parse(reply).unwrap();
        assert!(result.is_empty());
        assert!(result.columns().is_empty());
        assert_eq!(result.statistics().nodes_created(), 2);
        assert_eq!(result.statistics().relationships_created(), 1);
    }

    #[test]
    fn test_parse_rows() {
        let result = ResultSet::parse(people_reply()).unwrap();
        assert_eq!(result.columns(), ["name".to_string(), "age".to_string()]);
        assert_eq!(result.row_count(), 2);

        let alice = result.get_row(0).unwrap();
        assert_eq!(alice.get_value("name"), Some(&Value::String("Alice".to_string())));
        assert_eq!(alice.get(1), Some(&Value::Integer(30)));

        let bob = result.get_row(1).unwrap();
        assert_eq!(bob.get_value("age"), Some(&Value::Null));
        assert_eq!(result.statistics().query_internal_execution_time(), Some(0.2));
    }

    #[test]
    fn test_non_string_header_is_protocol_error() {
        let reply = array(vec![
            array(vec![array(vec![RespValue::Integer(1), bulk("n")])]),
            array(vec![array(vec![RespValue::Integer(5)])]),
            array(vec![]),
        ]);
        assert!(matches!(ResultSet::parse(reply), Err(Error::Protocol(_))));
    }

    #[test]
    fn test_numeric_looking_strings_stay_strings() {
        let reply = array(vec![
            array(vec![bulk("v")]),
            array(vec![array(vec![bulk("3.14")])]),
            array(vec![]),
        ]);
        let result = ResultSet::parse(reply).unwrap();
        assert_eq!(result.scalar::<String>().unwrap(), "3.14");
    }

    #[test]
    fn test_parse_simple_string_delete_reply() {
        let reply = RespValue::SimpleString(
            "Graph removed, internal execution time: 0.1 milliseconds".to_string(),
        );
        let result = ResultSet::parse(reply).unwrap();
        assert_eq!(result.statistics().query_internal_execution_time(), Some(0.1));
    }

    #[test]
    fn test_parse_server_error() {
        let reply = RespValue::Error("ERR Invalid graph operation on empty key".to_string());
        assert!(matches!(ResultSet::parse(reply), Err(Error::Server(_))));
    }

    #[test]
    fn test_parse_malformed_replies() {
        assert!(matches!(
            ResultSet::parse(RespValue::Integer(1)),
            Err(Error::Protocol(_))
        ));
        assert!(matches!(
            ResultSet::parse(array(vec![])),
            Err(Error::Protocol(_))
        ));
        let ragged = array(vec![
            array(vec![bulk("a"), bulk("b")]),
            array(vec![array(vec![bulk("only one")])]),
            array(vec![]),
        ]);
        assert!(matches!(ResultSet::parse(ragged), Err(Error::Protocol(_))));
    }

    #[test]
    fn test_deserialize_rows() {
        #[derive(Deserialize, Debug, PartialEq)]
        struct Person {
            name: String,
            age: Option<u32>,
        }

        let result = ResultSet::parse(people_reply()).unwrap();
        let people: Vec<Person> = result.deserialize_rows().unwrap();
        assert_eq!(
            people,
            vec![
                Person {
                    name: "Alice".to_string(),
                    age: Some(30)
                },
                Person {
                    name: "Bob".to_string(),
                    age: None
                },
            ]
        );

        let first: Person = result.first().unwrap();
        assert_eq!(first.name, "Alice");
    }

    #[test]
    fn test_first_on_empty_result() {
        let result = ResultSet::empty();
        assert!(matches!(
            result.first::<serde_json::Value>(),
            Err(Error::NotFound(_))
        ));
        assert!(matches!(result.scalar::<i64>(), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_nested_list_cell() {
        let reply = array(vec![
            array(vec![bulk("xs")]),
            array(vec![array(vec![array(vec![
                RespValue::Integer(1),
                RespValue::Integer(2),
            ])])]),
            array(vec![]),
        ]);
        let result = ResultSet::parse(reply).unwrap();
        assert_eq!(result.scalar::<Vec<i64>>().unwrap(), vec![1, 2]);
    }
}
