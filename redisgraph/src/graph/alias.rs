// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Random node aliases

use uuid::Uuid;

/// Prefix of generated aliases; keeps them valid identifiers
pub const ALIAS_PREFIX: &str = "node";

/// Hex digits after the prefix. One v4 UUID, 122 random bits.
pub const DEFAULT_ALIAS_SUFFIX_LEN: usize = 32;

/// Generate a fresh alias: [`ALIAS_PREFIX`] followed by `suffix_len` lowercase hex digits
///
/// Randomness comes from v4 UUIDs, so every 32 digits carry 122 random bits.
pub fn random_alias(suffix_len: usize) -> String {
    let mut alias = String::with_capacity(ALIAS_PREFIX.len() + suffix_len);
    alias.push_str(ALIAS_PREFIX);

    let mut remaining = suffix_len;
    while remaining > 0 {
        let mut buf = Uuid::encode_buffer();
        let chunk = Uuid::new_v4().simple().encode_lower(&mut buf);
        let take = remaining.min(chunk.len());
        alias.push_str(&chunk[..take]);
        remaining -= take;
    }

    alias
}
