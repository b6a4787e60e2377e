// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Introducer messages: a node asks for peers, the introducer answers.

use crate::types::TimestampedPeerInfo;

/// Carries no data; encodes to zero bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, crate::Streamable)]
pub struct RequestPeersIntroducer {}

#[derive(Debug, Clone, PartialEq, Eq, Default, crate::Streamable)]
pub struct RespondPeersIntroducer {
    pub peer_list: Vec<TimestampedPeerInfo>,
}
