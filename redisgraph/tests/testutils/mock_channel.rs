//! Recording command channel
//!
//! Implements the public CommandChannel trait only - no access to client internals.

use async_trait::async_trait;
use parking_lot::Mutex;
use redisgraph::{CommandChannel, Error, RespValue, Result};
use std::collections::VecDeque;
use std::sync::Arc;

/// A command as the channel received it
#[derive(Debug, Clone, PartialEq)]
pub struct SentCommand {
    pub command: String,
    pub args: Vec<String>,
}

/// Channel that records every command and answers from a script
///
/// When the script is empty, replies with a statistics-only result.
#[derive(Default)]
pub struct MockChannel {
    sent: Mutex<Vec<SentCommand>>,
    replies: Mutex<VecDeque<Result<RespValue>>>,
}

impl MockChannel {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a reply for the next command
    pub fn push_reply(&self, reply: RespValue) {
        self.replies.lock().push_back(Ok(reply));
    }

    /// Queue an error for the next command
    pub fn push_error(&self, error: Error) {
        self.replies.lock().push_back(Err(error));
    }

    /// All commands sent so far
    pub fn sent(&self) -> Vec<SentCommand> {
        self.sent.lock().clone()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().len()
    }
}

#[async_trait]
impl CommandChannel for MockChannel {
    async fn send_command(&self, command: &str, args: &[String]) -> Result<RespValue> {
        self.sent.lock().push(SentCommand {
            command: command.to_string(),
            args: args.to_vec(),
        });
        self.replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(stats_reply(&["Query internal execution time: 0.1 milliseconds"])))
    }
}

pub fn bulk(s: &str) -> RespValue {
    RespValue::BulkString(Some(s.as_bytes().to_vec()))
}

pub fn array(items: Vec<RespValue>) -> RespValue {
    RespValue::Array(Some(items))
}

/// `[statistics]` reply
pub fn stats_reply(lines: &[&str]) -> RespValue {
    array(vec![array(lines.iter().map(|line| bulk(line)).collect())])
}
