// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! RESP2 framing
//!
//! Requests go out as arrays of bulk strings. Replies are read one frame at a
//! time from a buffered async reader.

use crate::error::{Error, Result};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

/// Longest bulk string accepted from a server (512 MB, the Redis limit)
const MAX_BULK_LEN: usize = 512 * 1024 * 1024;

/// Deepest array nesting accepted in one reply
pub const MAX_NESTING_DEPTH: usize = 512;

/// Longest type/length, simple string or error line accepted
const MAX_LINE_LEN: u64 = 64 * 1024;

/// A decoded RESP2 reply
#[derive(Debug, Clone, PartialEq)]
pub enum RespValue {
    SimpleString(String),
    Error(String),
    Integer(i64),
    /// `None` is the nil bulk string (`$-1`)
    BulkString(Option<Vec<u8>>),
    /// `None` is the nil array (`*-1`)
    Array(Option<Vec<RespValue>>),
}

impl RespValue {
    /// Text content of a simple or bulk string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RespValue::SimpleString(s) => Some(s),
            RespValue::BulkString(Some(bytes)) => std::str::from_utf8(bytes).ok(),
            _ => None,
        }
    }

    /// Consume into owned text, replacing invalid UTF-8
    pub fn into_string(self) -> Option<String> {
        match self {
            RespValue::SimpleString(s) => Some(s),
            RespValue::BulkString(Some(bytes)) => Some(String::from_utf8_lossy(&bytes).into_owned()),
            _ => None,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, RespValue::BulkString(None) | RespValue::Array(None))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, RespValue::Error(_))
    }
}

impl fmt::Display for RespValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RespValue::SimpleString(s) => write!(f, "{}", s),
            RespValue::Error(e) => write!(f, "(error) {}", e),
            RespValue::Integer(n) => write!(f, "(integer) {}", n),
            RespValue::BulkString(Some(bytes)) => {
                write!(f, "\"{}\"", String::from_utf8_lossy(bytes))
            }
            RespValue::BulkString(None) | RespValue::Array(None) => write!(f, "(nil)"),
            RespValue::Array(Some(items)) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// Encode a command and its arguments as a RESP array of bulk strings
pub fn encode_command(command: &str, args: &[String]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(
        16 + command.len() + args.iter().map(|a| a.len() + 16).sum::<usize>(),
    );
    frame.extend_from_slice(format!("*{}\r\n", args.len() + 1).as_bytes());
    push_bulk(&mut frame, command.as_bytes());
    for arg in args {
        push_bulk(&mut frame, arg.as_bytes());
    }
    frame
}

fn push_bulk(frame: &mut Vec<u8>, bytes: &[u8]) {
    frame.extend_from_slice(format!("${}\r\n", bytes.len()).as_bytes());
    frame.extend_from_slice(bytes);
    frame.extend_from_slice(b"\r\n");
}

/// Read one complete reply frame
pub async fn read_value<R>(reader: &mut R) -> Result<RespValue>
where
    R: AsyncBufRead + Unpin + Send,
{
    read_nested(reader, 0).await
}

/// Arrays nest, so the future is boxed to allow recursion. Depth is capped
/// because every level adds a poll frame.
fn read_nested<'a, R>(
    reader: &'a mut R,
    depth: usize,
) -> Pin<Box<dyn Future<Output = Result<RespValue>> + Send + 'a>>
where
    R: AsyncBufRead + Unpin + Send,
{
    Box::pin(async move {
        let line = read_line(reader).await?;
        let (kind, body) = match line.split_first() {
            Some((kind, body)) => (*kind, body),
            None => return Err(Error::Protocol("empty reply line".to_string())),
        };
        let text = std::str::from_utf8(body)
            .map_err(|_| Error::Protocol("reply header is not valid UTF-8".to_string()))?;

        match kind {
            b'+' => Ok(RespValue::SimpleString(text.to_string())),
            b'-' => Ok(RespValue::Error(text.to_string())),
            b':' => Ok(RespValue::Integer(parse_int(text)?)),
            b'$' => {
                let len = parse_int(text)?;
                if len < 0 {
                    return Ok(RespValue::BulkString(None));
                }
                let len = len as usize;
                if len > MAX_BULK_LEN {
                    return Err(Error::Protocol(format!("bulk string too large: {}", len)));
                }
                let mut data = vec![0u8; len + 2];
                reader.read_exact(&mut data).await?;
                if !data.ends_with(b"\r\n") {
                    return Err(Error::Protocol(
                        "bulk string not terminated by CRLF".to_string(),
                    ));
                }
                data.truncate(len);
                Ok(RespValue::BulkString(Some(data)))
            }
            b'*' => {
                let count = parse_int(text)?;
                if count < 0 {
                    return Ok(RespValue::Array(None));
                }
                if depth >= MAX_NESTING_DEPTH {
                    return Err(Error::Protocol(format!(
                        "reply nested deeper than {} arrays",
                        MAX_NESTING_DEPTH
                    )));
                }
                let mut items = Vec::with_capacity((count as usize).min(1024));
                for _ in 0..count {
                    items.push(read_nested(reader, depth + 1).await?);
                }
                Ok(RespValue::Array(Some(items)))
            }
            other => Err(Error::Protocol(format!(
                "unknown reply type byte: {:?}",
                other as char
            ))),
        }
    })
}

/// Read a CRLF-terminated line without its terminator
async fn read_line<R>(reader: &mut R) -> Result<Vec<u8>>
where
    R: AsyncBufRead + Unpin + Send,
{
    let mut line = Vec::new();
    let read = (&mut *reader)
        .take(MAX_LINE_LEN)
        .read_until(b'\n', &mut line)
        .await?;
    if read == 0 {
        return Err(Error::Connection("connection closed by server".to_string()));
    }
    if read as u64 == MAX_LINE_LEN && !line.ends_with(b"\n") {
        return Err(Error::Protocol(format!(
            "reply line longer than {} bytes",
            MAX_LINE_LEN
        )));
    }
    if !line.ends_with(b"\r\n") {
        return Err(Error::Protocol("reply line not terminated by CRLF".to_string()));
    }
    line.truncate(line.len() - 2);
    Ok(line)
}

fn parse_int(text: &str) -> Result<i64> {
    text.parse::<i64>()
        .map_err(|_| Error::Protocol(format!("invalid integer in reply: {:?}", text)))
}
