// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use crate::types::Bytes32;

/// Identifies a block by header hash and height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, crate::Streamable)]
pub struct BlockIdentifier {
    pub hash: Bytes32,
    pub height: u32,
}

/// Where a farmer's block reward goes, and until which height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, crate::Streamable)]
pub struct PoolTarget {
    pub puzzle_hash: Bytes32,
    pub max_height: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Streamable;
    use serde_json::json;

    #[test]
    fn test_block_identifier() {
        let id = BlockIdentifier {
            hash: Bytes32::new([0xab; 32]),
            height: 0x0102_0304,
        };
        let bytes = id.to_bytes().expect("encode");
        assert_eq!(bytes.len(), 36);
        assert_eq!(&bytes[32..], &[1, 2, 3, 4]);
        assert_eq!(
            id.to_json(),
            json!({"hash": "ab".repeat(32), "height": 0x0102_0304})
        );
    }

    #[test]
    fn test_pool_target_rejects_extra_key() {
        let json = json!({
            "puzzle_hash": "00".repeat(32),
            "max_height": 0,
            "min_height": 0,
        });
        let err = PoolTarget::from_json(&json).unwrap_err();
        assert_eq!(
            err.mismatch,
            crate::error::Mismatch::UnknownField("min_height".into())
        );
    }
}
