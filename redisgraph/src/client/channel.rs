// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Command channel abstraction
//!
//! The graph client never touches sockets directly. It hands a command name and
//! positional arguments to a [`CommandChannel`] and gets the raw reply back.
//! The bundled implementation is [`TcpChannel`](crate::client::TcpChannel);
//! applications with their own Redis connection can implement the trait on it.

use crate::client::resp::RespValue;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Transport that sends one command and resolves to its reply
///
/// Implementations must:
/// - send exactly one command per call, with `command` as the first element
/// - report a RESP error reply as `Err(Error::Server(..))`
/// - surface transport failures as errors without retrying
#[async_trait]
pub trait CommandChannel: Send + Sync {
    /// Send `command` with `args` and wait for the reply
    async fn send_command(&self, command: &str, args: &[String]) -> Result<RespValue>;
}

#[async_trait]
impl<C: CommandChannel + ?Sized> CommandChannel for Arc<C> {
    async fn send_command(&self, command: &str, args: &[String]) -> Result<RespValue> {
        (**self).send_command(command, args).await
    }
}
