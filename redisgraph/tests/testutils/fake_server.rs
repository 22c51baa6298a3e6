//! Minimal RESP server for TcpChannel tests
//!
//! Accepts any number of connections on 127.0.0.1, records every command and
//! answers with whatever the handler returns. A handler returning `None`
//! leaves the command unanswered.

use parking_lot::Mutex;
use redisgraph::client::resp::read_value;
use redisgraph::{ClientConfig, RespValue};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

type Handler = dyn Fn(&[String]) -> Option<Vec<u8>> + Send + Sync;

pub struct FakeServer {
    address: SocketAddr,
    commands: Arc<Mutex<Vec<Vec<String>>>>,
}

impl FakeServer {
    pub async fn start<F>(handler: F) -> Self
    where
        F: Fn(&[String]) -> Option<Vec<u8>> + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake server");
        let address = listener.local_addr().expect("Failed to read local address");
        let commands = Arc::new(Mutex::new(Vec::new()));
        let handler: Arc<Handler> = Arc::new(handler);

        let recorded = commands.clone();
        tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                let handler = handler.clone();
                let recorded = recorded.clone();
                tokio::spawn(async move {
                    let mut stream = BufReader::new(socket);
                    while let Ok(RespValue::Array(Some(items))) = read_value(&mut stream).await {
                        let args: Vec<String> =
                            items.into_iter().filter_map(RespValue::into_string).collect();
                        recorded.lock().push(args.clone());
                        if let Some(reply) = handler(&args) {
                            if stream.get_mut().write_all(&reply).await.is_err() {
                                break;
                            }
                        }
                    }
                });
            }
        });

        FakeServer { address, commands }
    }

    /// Client configuration pointing at this server
    pub fn config(&self) -> ClientConfig {
        ClientConfig::default()
            .with_host(self.address.ip().to_string())
            .with_port(self.address.port())
    }

    /// Commands received so far, command name first
    pub fn commands(&self) -> Vec<Vec<String>> {
        self.commands.lock().clone()
    }
}

pub fn simple_string(s: &str) -> Vec<u8> {
    format!("+{}\r\n", s).into_bytes()
}

pub fn error_reply(s: &str) -> Vec<u8> {
    format!("-{}\r\n", s).into_bytes()
}

fn bulk(s: &str) -> String {
    format!("${}\r\n{}\r\n", s.len(), s)
}

pub fn bulk_reply(s: &str) -> Vec<u8> {
    bulk(s).into_bytes()
}

/// Encoded `[statistics]` reply
pub fn stats_reply(lines: &[&str]) -> Vec<u8> {
    let mut reply = format!("*1\r\n*{}\r\n", lines.len());
    for line in lines {
        reply.push_str(&bulk(line));
    }
    reply.into_bytes()
}

/// Encoded `[header, rows, statistics]` reply with string cells
pub fn table_reply(columns: &[&str], rows: &[&[&str]], stats: &[&str]) -> Vec<u8> {
    let mut reply = format!("*3\r\n*{}\r\n", columns.len());
    for column in columns {
        reply.push_str(&bulk(column));
    }
    reply.push_str(&format!("*{}\r\n", rows.len()));
    for row in rows {
        reply.push_str(&format!("*{}\r\n", row.len()));
        for cell in row.iter() {
            reply.push_str(&bulk(cell));
        }
    }
    reply.push_str(&format!("*{}\r\n", stats.len()));
    for line in stats {
        reply.push_str(&bulk(line));
    }
    reply.into_bytes()
}
