// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Graph client: pending mutations, commit and command dispatch

use crate::client::channel::CommandChannel;
use crate::client::config::ClientConfig;
use crate::client::tcp::TcpChannel;
use crate::error::{Error, Result};
use crate::graph::alias::{random_alias, DEFAULT_ALIAS_SUFFIX_LEN};
use crate::graph::{Edge, Node};
use crate::result::ResultSet;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Command that runs a Cypher query against a graph key
pub const GRAPH_QUERY: &str = "GRAPH.QUERY";

/// Command that deletes a graph key
pub const GRAPH_DELETE: &str = "GRAPH.DELETE";

/// Nodes and edges staged but not yet sent
#[derive(Debug, Default)]
struct PendingGraph {
    /// Nodes in order of first registration of their alias
    nodes: Vec<Arc<Node>>,
    /// alias -> position in `nodes`
    index: HashMap<String, usize>,
    edges: Vec<Edge>,
}

impl PendingGraph {
    fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    fn contains(&self, node: &Node) -> bool {
        node.alias()
            .map(|alias| self.index.contains_key(alias))
            .unwrap_or(false)
    }

    /// `CREATE` statement for everything pending, or `None` when nothing is
    fn render_create(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }

        let patterns: Vec<String> = self
            .nodes
            .iter()
            .map(|node| node.render())
            .chain(self.edges.iter().map(Edge::render))
            .collect();

        Some(format!("CREATE {}", patterns.join(",")))
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.index.clear();
        self.edges.clear();
    }
}

/// Client for one named graph
///
/// Stages nodes and edges in memory and commits them as a single Cypher
/// `CREATE` statement. Pending state sits behind a mutex, so a `RedisGraph`
/// can be shared between tasks; a mutation made while a commit is awaiting
/// its reply goes into the next batch.
///
/// # Examples
///
/// ```no_run
/// use redisgraph::{ClientConfig, Edge, Node, RedisGraph};
///
/// # async fn run() -> redisgraph::Result<()> {
/// let graph = RedisGraph::connect("social", &ClientConfig::default()).await?;
///
/// let a = graph.add_node(Node::new().with_alias("a"));
/// let b = graph.add_node(Node::new().with_alias("b"));
/// graph.add_edge(Edge::new(a, "KNOWS", b))?;
///
/// assert_eq!(
///     graph.pending_query().as_deref(),
///     Some("CREATE (a),(b),(a)-[:KNOWS]->(b)")
/// );
/// graph.commit().await?;
/// assert!(!graph.is_pending());
/// # Ok(())
/// # }
/// ```
pub struct RedisGraph {
    graph_id: String,
    channel: Arc<dyn CommandChannel>,
    pending: Mutex<PendingGraph>,
}

impl RedisGraph {
    /// Create a client for `graph_id` over an existing channel
    pub fn new(graph_id: impl Into<String>, channel: Arc<dyn CommandChannel>) -> Self {
        Self {
            graph_id: graph_id.into(),
            channel,
            pending: Mutex::new(PendingGraph::default()),
        }
    }

    /// Open a [`TcpChannel`] with `config` and create a client for `graph_id`
    pub async fn connect(graph_id: impl Into<String>, config: &ClientConfig) -> Result<Self> {
        let channel = TcpChannel::connect(config).await?;
        Ok(Self::new(graph_id, Arc::new(channel)))
    }

    /// The graph key this client operates on
    pub fn graph_id(&self) -> &str {
        &self.graph_id
    }

    /// The channel commands are sent through
    pub fn channel(&self) -> &Arc<dyn CommandChannel> {
        &self.channel
    }

    /// Stage a node
    ///
    /// A node without an alias gets a random one. A node whose alias is already
    /// pending replaces the earlier node in place (last write wins). Returns
    /// the shared handle to pass to [`Edge::new`].
    pub fn add_node(&self, mut node: Node) -> Arc<Node> {
        let alias = match node.alias() {
            Some(alias) => alias.to_string(),
            None => {
                let alias = random_alias(DEFAULT_ALIAS_SUFFIX_LEN);
                node.set_alias(alias.clone());
                alias
            }
        };

        let node = Arc::new(node);
        let mut pending = self.pending.lock();
        match pending.index.get(&alias).copied() {
            Some(position) => {
                log::warn!(
                    "Node alias '{}' already pending on graph '{}', replacing it",
                    alias,
                    self.graph_id
                );
                pending.nodes[position] = node.clone();
            }
            None => {
                let position = pending.nodes.len();
                pending.nodes.push(node.clone());
                pending.index.insert(alias, position);
            }
        }

        node
    }

    /// Stage an edge
    ///
    /// Both endpoints must be pending under their aliases. Only the alias is
    /// checked; the endpoint may be a different object than the one registered.
    pub fn add_edge(&self, edge: Edge) -> Result<()> {
        let mut pending = self.pending.lock();

        for (role, node) in [("source", edge.source()), ("destination", edge.destination())] {
            if !pending.contains(node) {
                return Err(Error::UnregisteredNode(format!(
                    "{} node {} is not pending on graph '{}'",
                    role,
                    node.alias()
                        .map(|alias| format!("'{}'", alias))
                        .unwrap_or_else(|| "without alias".to_string()),
                    self.graph_id
                )));
            }
        }

        pending.edges.push(edge);
        Ok(())
    }

    /// Run a Cypher query with `GRAPH.QUERY`
    ///
    /// Errors from the channel are returned as they are.
    pub async fn query(&self, query: &str) -> Result<ResultSet> {
        log::debug!(
            "{} {} ({} bytes of query text)",
            GRAPH_QUERY,
            self.graph_id,
            query.len()
        );

        let args = [self.graph_id.clone(), query.to_string()];
        let reply = self.channel.send_command(GRAPH_QUERY, &args).await?;
        ResultSet::parse(reply)
    }

    /// Send everything pending as one `CREATE` statement
    ///
    /// Pending state is cleared before the command is sent, so it is empty
    /// afterwards whether or not the server accepts the statement. With nothing
    /// pending no command is sent and an empty result is returned.
    pub async fn commit(&self) -> Result<ResultSet> {
        let query = {
            let mut pending = self.pending.lock();
            let query = pending.render_create();
            if query.is_some() {
                log::debug!(
                    "Committing {} nodes and {} edges to graph '{}'",
                    pending.nodes.len(),
                    pending.edges.len(),
                    self.graph_id
                );
            }
            pending.clear();
            query
        };

        match query {
            Some(query) => self.query(&query).await,
            None => {
                log::debug!("Nothing pending on graph '{}', commit skipped", self.graph_id);
                Ok(ResultSet::empty())
            }
        }
    }

    /// Drop all pending nodes and edges
    pub fn clear(&self) {
        self.pending.lock().clear();
    }

    /// Delete the whole graph with `GRAPH.DELETE`
    ///
    /// Pending nodes and edges are left alone.
    pub async fn delete_graph(&self) -> Result<ResultSet> {
        log::debug!("{} {}", GRAPH_DELETE, self.graph_id);

        let reply = self
            .channel
            .send_command(GRAPH_DELETE, &[self.graph_id.clone()])
            .await?;
        ResultSet::parse(reply)
    }

    /// The statement [`commit`](Self::commit) would send right now
    pub fn pending_query(&self) -> Option<String> {
        self.pending.lock().render_create()
    }

    /// Pending node registered under `alias`
    pub fn node(&self, alias: &str) -> Option<Arc<Node>> {
        let pending = self.pending.lock();
        pending
            .index
            .get(alias)
            .map(|&position| pending.nodes[position].clone())
    }

    pub fn node_count(&self) -> usize {
        self.pending.lock().nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.pending.lock().edges.len()
    }

    /// Whether any node or edge is staged
    pub fn is_pending(&self) -> bool {
        !self.pending.lock().is_empty()
    }
}

impl std::fmt::Debug for RedisGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pending = self.pending.lock();
        f.debug_struct("RedisGraph")
            .field("graph_id", &self.graph_id)
            .field("pending_nodes", &pending.nodes.len())
            .field("pending_edges", &pending.edges.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(alias: &str) -> Node {
        Node::new().with_alias(alias)
    }

    #[test]
    fn test_render_create_empty() {
        assert_eq!(PendingGraph::default().render_create(), None);
    }

    #[test]
    fn test_render_create_nodes_then_edges() {
        let mut pending = PendingGraph::default();
        let a = Arc::new(node("a"));
        let b = Arc::new(node("b"));
        pending.nodes = vec![a.clone(), b.clone()];
        pending.index.insert("a".to_string(), 0);
        pending.index.insert("b".to_string(), 1);
        pending.edges.push(Edge::new(a, "KNOWS", b));

        assert_eq!(
            pending.render_create().as_deref(),
            Some("CREATE (a),(b),(a)-[:KNOWS]->(b)")
        );
    }

    #[test]
    fn test_render_create_edges_only_has_no_leading_comma() {
        let mut pending = PendingGraph::default();
        pending
            .edges
            .push(Edge::new(Arc::new(node("a")), "R", Arc::new(node("b"))));
        assert_eq!(
            pending.render_create().as_deref(),
            Some("CREATE (a)-[:R]->(b)")
        );
    }

    #[test]
    fn test_contains_requires_alias() {
        let mut pending = PendingGraph::default();
        pending.index.insert("a".to_string(), 0);
        assert!(pending.contains(&node("a")));
        assert!(!pending.contains(&node("b")));
        assert!(!pending.contains(&Node::new()));
    }
}
