// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Built-in leaves and consensus records.
//!
//! Byte strings, serialized programs and condition opcodes are the codec's
//! leaf types beyond integers, flags and text. The records here are ordinary
//! `#[derive(Streamable)]` declarations; [`crate::registry::builtin`] makes
//! them resolvable by name.

mod block;
mod coin;
mod condition;
mod peer_info;
mod program;
mod sized_bytes;
mod vdf;

pub use block::{BlockIdentifier, PoolTarget};
pub use coin::Coin;
pub use condition::{ConditionOpcode, ConditionWithArgs, CONDITION_OPCODE};
pub use peer_info::TimestampedPeerInfo;
pub use program::{serialized_length, SerializedProgram, SERIALIZED_PROGRAM};
pub use sized_bytes::{
    Bytes, Bytes100, Bytes32, Bytes4, Bytes48, Bytes480, Bytes8, Bytes96, BytesN,
};
pub use vdf::{ClassgroupElement, SignagePoint, VDFInfo, VDFProof};
