// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Messages understood by the full node simulator.

use crate::types::Bytes32;

/// Farm one block paying to `puzzle_hash`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, crate::Streamable)]
pub struct FarmNewBlockProtocol {
    pub puzzle_hash: Bytes32,
}

/// Replace blocks `old_index..new_index` with blocks paying to `puzzle_hash`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, crate::Streamable)]
pub struct ReorgProtocol {
    pub old_index: u32,
    pub new_index: u32,
    pub puzzle_hash: Bytes32,
}
