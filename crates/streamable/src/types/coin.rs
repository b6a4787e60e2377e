// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use crate::types::Bytes32;

/// An unspent output: 32 + 32 + 8 = 72 bytes on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, crate::Streamable)]
pub struct Coin {
    pub parent_coin_info: Bytes32,
    pub puzzle_hash: Bytes32,
    pub amount: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Streamable;
    use serde_json::json;

    fn sample() -> Coin {
        Coin {
            parent_coin_info: Bytes32::new([0x11; 32]),
            puzzle_hash: Bytes32::new([0x22; 32]),
            amount: 1_750_000_000_000,
        }
    }

    #[test]
    fn test_coin_layout() {
        let coin = sample();
        let bytes = coin.to_bytes().expect("encode");
        assert_eq!(bytes.len(), 72);
        assert_eq!(Coin::MIN_SIZE, 72);
        assert_eq!(&bytes[..32], &[0x11; 32]);
        assert_eq!(&bytes[32..64], &[0x22; 32]);
        assert_eq!(&bytes[64..], &1_750_000_000_000u64.to_be_bytes());
        assert_eq!(Coin::from_bytes(&bytes).expect("decode"), coin);
    }

    #[test]
    fn test_coin_json() {
        let json = sample().to_json();
        assert_eq!(json["amount"], json!(1_750_000_000_000u64));
        assert_eq!(json["puzzle_hash"], json!("22".repeat(32)));
        assert_eq!(Coin::from_json(&json).expect("from json"), sample());
    }

    #[test]
    fn test_coin_truncated_amount_trace() {
        let bytes = sample().to_bytes().expect("encode");
        let err = Coin::from_bytes(&bytes[..70]).unwrap_err();
        assert_eq!(err.trace.segments(), ["amount"]);
    }
}
