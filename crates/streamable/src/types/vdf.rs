// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Verifiable delay function outputs and proofs.

use crate::types::{Bytes, Bytes100, Bytes32};

/// Serialized class group element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, crate::Streamable)]
pub struct ClassgroupElement {
    pub data: Bytes100,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, crate::Streamable)]
pub struct VDFInfo {
    pub challenge: Bytes32,
    pub number_of_iterations: u64,
    pub output: ClassgroupElement,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, crate::Streamable)]
pub struct VDFProof {
    pub witness_type: u8,
    pub witness: Bytes,
    pub normalized_to_identity: bool,
}

/// Challenge and reward chain VDFs for one signage point; all parts are
/// absent at the start of a sub-slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, crate::Streamable)]
pub struct SignagePoint {
    pub cc_vdf: Option<VDFInfo>,
    pub cc_proof: Option<VDFProof>,
    pub rc_vdf: Option<VDFInfo>,
    pub rc_proof: Option<VDFProof>,
}
