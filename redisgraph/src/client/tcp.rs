// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Single-connection RESP channel over TCP

use crate::client::channel::CommandChannel;
use crate::client::config::ClientConfig;
use crate::client::resp::{encode_command, read_value, RespValue};
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::io::{AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::Mutex;

/// Command channel over one TCP connection
///
/// Commands are strictly request/response: the connection is locked for the
/// whole round trip, so concurrent callers are served one at a time.
///
/// A command that times out or fails mid-frame leaves unread bytes on the
/// socket. The channel is then marked broken and every later command fails
/// with [`Error::Connection`]; open a new channel to recover.
pub struct TcpChannel {
    stream: Mutex<BufReader<TcpStream>>,
    address: String,
    response_timeout: Option<Duration>,
    broken: AtomicBool,
}

impl TcpChannel {
    /// Connect, authenticate and select the configured database
    pub async fn connect(config: &ClientConfig) -> Result<Self> {
        let address = config.address();
        log::debug!("Connecting to {}", address);

        let stream = tokio::time::timeout(config.connect_timeout(), TcpStream::connect(&address))
            .await
            .map_err(|_| {
                Error::Timeout(format!(
                    "connecting to {} took longer than {} ms",
                    address, config.connect_timeout_ms
                ))
            })?
            .map_err(|e| Error::Connection(format!("Failed to connect to {}: {}", address, e)))?;
        stream.set_nodelay(true)?;

        let channel = TcpChannel {
            stream: Mutex::new(BufReader::new(stream)),
            address,
            response_timeout: config.response_timeout(),
            broken: AtomicBool::new(false),
        };

        if let Some(args) = config.auth_args() {
            channel.send_command("AUTH", &args).await?;
        }
        if config.db != 0 {
            channel.send_command("SELECT", &[config.db.to_string()]).await?;
        }

        log::debug!("Connected to {}", channel.address);
        Ok(channel)
    }

    /// Remote address as `host:port`
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Whether an earlier failure left the connection unusable
    pub fn is_broken(&self) -> bool {
        self.broken.load(Ordering::Acquire)
    }

    async fn round_trip(&self, frame: &[u8]) -> Result<RespValue> {
        let mut stream = self.stream.lock().await;
        stream.get_mut().write_all(frame).await?;
        stream.get_mut().flush().await?;
        read_value(&mut *stream).await
    }
}

#[async_trait]
impl CommandChannel for TcpChannel {
    async fn send_command(&self, command: &str, args: &[String]) -> Result<RespValue> {
        if self.is_broken() {
            return Err(Error::Connection(format!(
                "connection to {} is out of sync after an earlier failure",
                self.address
            )));
        }

        let frame = encode_command(command, args);
        log::trace!("-> {} ({} args, {} bytes)", command, args.len(), frame.len());

        let outcome = match self.response_timeout {
            Some(limit) => match tokio::time::timeout(limit, self.round_trip(&frame)).await {
                Ok(result) => result,
                Err(_) => Err(Error::Timeout(format!(
                    "{} got no reply within {} ms",
                    command,
                    limit.as_millis()
                ))),
            },
            None => self.round_trip(&frame).await,
        };

        match outcome {
            Ok(RespValue::Error(message)) => Err(Error::Server(message)),
            Ok(reply) => {
                log::trace!("<- {}", reply);
                Ok(reply)
            }
            Err(e) => {
                self.broken.store(true, Ordering::Release);
                log::warn!("{} on {} failed: {}", command, self.address, e);
                Err(e)
            }
        }
    }
}
