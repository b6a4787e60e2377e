// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Peer protocol messages built from the consensus records.

pub mod introducer;
pub mod simulator;
