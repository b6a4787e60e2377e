// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

/// A peer address with the time it was last seen.
#[derive(Debug, Clone, PartialEq, Eq, Hash, crate::Streamable)]
pub struct TimestampedPeerInfo {
    pub host: String,
    pub port: u16,
    pub timestamp: u64,
}
