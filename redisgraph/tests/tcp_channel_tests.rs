//! TcpChannel tests against a local RESP server

#[path = "testutils/mod.rs"]
mod testutils;

use redisgraph::{
    ClientConfig, CommandChannel, Edge, Error, Node, RedisGraph, RespValue, TcpChannel,
};
use std::time::Duration;
use testutils::fake_server::{
    bulk_reply, error_reply, simple_string, stats_reply, table_reply, FakeServer,
};
use testutils::unique_graph_name;

fn answer_graph_commands(args: &[String]) -> Option<Vec<u8>> {
    match args.first().map(String::as_str) {
        Some("AUTH") | Some("SELECT") => Some(simple_string("OK")),
        Some("GRAPH.QUERY") => Some(table_reply(
            &["n"],
            &[&["1"]],
            &["Query internal execution time: 0.2 milliseconds"],
        )),
        Some("GRAPH.DELETE") => Some(bulk_reply(
            "Graph removed, internal execution time: 0.031000 milliseconds",
        )),
        _ => Some(error_reply("ERR unknown command")),
    }
}

#[tokio::test]
async fn test_query_round_trip() {
    let server = FakeServer::start(answer_graph_commands).await;
    let channel = TcpChannel::connect(&server.config())
        .await
        .expect("Should connect to fake server");

    let reply = channel
        .send_command("GRAPH.QUERY", &["g".to_string(), "RETURN 1 AS n".to_string()])
        .await
        .expect("Query should succeed");

    assert!(matches!(reply, RespValue::Array(Some(ref sections)) if sections.len() == 3));
    assert_eq!(
        server.commands(),
        vec![vec![
            "GRAPH.QUERY".to_string(),
            "g".to_string(),
            "RETURN 1 AS n".to_string()
        ]]
    );
    assert!(!channel.is_broken());
}

#[tokio::test]
async fn test_auth_and_select_sent_in_order() {
    let server = FakeServer::start(answer_graph_commands).await;
    let config = server
        .config()
        .with_username("app")
        .with_password("secret")
        .with_db(2);

    TcpChannel::connect(&config)
        .await
        .expect("Should connect and authenticate");

    assert_eq!(
        server.commands(),
        vec![
            vec!["AUTH".to_string(), "app".to_string(), "secret".to_string()],
            vec!["SELECT".to_string(), "2".to_string()],
        ]
    );
}

#[tokio::test]
async fn test_no_handshake_without_credentials() {
    let server = FakeServer::start(answer_graph_commands).await;
    TcpChannel::connect(&server.config())
        .await
        .expect("Should connect");
    assert!(server.commands().is_empty());
}

#[tokio::test]
async fn test_rejected_auth_fails_connect() {
    let server = FakeServer::start(|args| match args.first().map(String::as_str) {
        Some("AUTH") => Some(error_reply("WRONGPASS invalid username-password pair")),
        _ => Some(simple_string("OK")),
    })
    .await;

    let result = TcpChannel::connect(&server.config().with_password("wrong")).await;
    assert!(matches!(result, Err(Error::Server(ref msg)) if msg.starts_with("WRONGPASS")));
}

#[tokio::test]
async fn test_server_error_keeps_channel_usable() {
    let server = FakeServer::start(answer_graph_commands).await;
    let channel = TcpChannel::connect(&server.config())
        .await
        .expect("Should connect");

    let err = channel
        .send_command("NOPE", &[])
        .await
        .expect_err("Unknown command is rejected");
    assert!(matches!(err, Error::Server(ref msg) if msg == "ERR unknown command"));
    assert!(!channel.is_broken());

    channel
        .send_command("GRAPH.QUERY", &["g".to_string(), "RETURN 1".to_string()])
        .await
        .expect("Channel is still in sync");
}

#[tokio::test]
async fn test_response_timeout_breaks_channel() {
    let server = FakeServer::start(|args| match args.first().map(String::as_str) {
        Some("GRAPH.QUERY") => None,
        _ => Some(simple_string("OK")),
    })
    .await;
    let config = server
        .config()
        .with_response_timeout(Duration::from_millis(100));
    let channel = TcpChannel::connect(&config).await.expect("Should connect");

    let err = channel
        .send_command("GRAPH.QUERY", &["g".to_string(), "RETURN 1".to_string()])
        .await
        .expect_err("Server never answers");
    assert!(matches!(err, Error::Timeout(_)));
    assert!(channel.is_broken());

    let err = channel
        .send_command("PING", &[])
        .await
        .expect_err("Broken channel refuses commands");
    assert!(matches!(err, Error::Connection(_)));
}

#[tokio::test]
async fn test_connection_refused() {
    // Bind and drop a listener to get a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let port = listener.local_addr().expect("local address").port();
    drop(listener);

    let config = ClientConfig::default()
        .with_host("127.0.0.1")
        .with_port(port)
        .with_connect_timeout(Duration::from_secs(2));
    let result = TcpChannel::connect(&config).await;
    assert!(matches!(result, Err(Error::Connection(_))));
}

#[tokio::test]
async fn test_redis_graph_end_to_end() {
    let server = FakeServer::start(|args| match args.first().map(String::as_str) {
        Some("GRAPH.QUERY") => Some(stats_reply(&[
            "Labels added: 1",
            "Nodes created: 2",
            "Relationships created: 1",
            "Query internal execution time: 0.4 milliseconds",
        ])),
        other => answer_graph_commands(&[other.unwrap_or_default().to_string()]),
    })
    .await;

    let name = unique_graph_name("e2e");
    let graph = RedisGraph::connect(name.clone(), &server.config())
        .await
        .expect("Should connect");

    let a = graph.add_node(Node::new().with_alias("a").with_label("Person"));
    let b = graph.add_node(Node::new().with_alias("b").with_label("Person"));
    graph
        .add_edge(Edge::new(a, "KNOWS", b))
        .expect("Both endpoints are pending");

    let result = graph.commit().await.expect("Commit should succeed");
    assert_eq!(result.statistics().nodes_created(), 2);
    assert_eq!(result.statistics().relationships_created(), 1);

    let deleted = graph.delete_graph().await.expect("Delete should succeed");
    assert_eq!(
        deleted.statistics().query_internal_execution_time(),
        Some(0.031)
    );

    assert_eq!(
        server.commands(),
        vec![
            vec![
                "GRAPH.QUERY".to_string(),
                name.clone(),
                "CREATE (a:Person),(b:Person),(a)-[:KNOWS]->(b)".to_string()
            ],
            vec!["GRAPH.DELETE".to_string(), name],
        ]
    );
}
