//! Canonical, transport-independent records.
//!
//! Field names are part of the wire contract: downstream consumers parse by
//! name, so every `serde` rename here is load-bearing.

use alloy_primitives::{Bytes, B256, U256};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─── TransactionRecord ───────────────────────────────────────────────────────

/// One transaction as observed in a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    /// Recovered sender, EIP-55 checksummed. Never empty.
    pub from: String,
    /// Recipient, EIP-55 checksummed; empty for contract creation.
    pub to: String,
    #[serde(rename = "type")]
    pub tx_type: u8,
    pub nonce: u64,
    #[serde(rename = "gas")]
    pub gas_limit: u64,
    #[serde(with = "decimal")]
    pub gas_price: U256,
    /// EIP-1559 fee cap (equals `gasPrice` for legacy transactions).
    #[serde(with = "decimal")]
    pub max_fee_per_gas: U256,
    /// EIP-1559 tip cap; `null` for transaction types without one.
    #[serde(with = "decimal_opt", default)]
    pub max_priority_fee_per_gas: Option<U256>,
    #[serde(with = "decimal")]
    pub value: U256,
    pub hash: String,
    pub input: Bytes,
    /// Encoded size in bytes.
    pub size: u64,
    #[serde(default)]
    pub chain_id: Option<u64>,
}

impl TransactionRecord {
    /// Returns `true` if this transaction deployed a contract.
    pub fn is_contract_creation(&self) -> bool {
        self.to.is_empty()
    }
}

// ─── BlockRecord ─────────────────────────────────────────────────────────────

/// One finalized block, ready to be encoded and published.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockRecord {
    /// `null` on chains without a fee market.
    #[serde(with = "decimal_opt")]
    pub base_fee: Option<U256>,
    pub bloom: String,
    pub coinbase: String,
    #[serde(with = "decimal")]
    pub difficulty: U256,
    pub extra: Bytes,
    pub gas_limit: u64,
    pub gas_used: u64,
    pub hash: String,
    /// Full header, passed through untouched.
    pub header: serde_json::Value,
    pub mix_digest: String,
    pub nonce: String,
    /// Decimal string; may exceed 2^53 for JavaScript consumers.
    pub number: String,
    pub parent_hash: String,
    pub receipt_hash: String,
    /// State root.
    pub root: String,
    pub size: u64,
    pub time: DateTime<Utc>,
    /// Block order. Empty when the block has no transactions.
    pub transactions: Vec<TransactionRecord>,
    /// One per transaction, same order.
    pub receipts: Vec<serde_json::Value>,
}

impl BlockRecord {
    pub fn tx_count(&self) -> usize {
        self.transactions.len()
    }
}

// ─── CodeRecord ──────────────────────────────────────────────────────────────

/// A contract code deployment observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeRecord {
    pub hash: String,
    /// Raw bytecode; empty is valid (account without code).
    #[serde(rename = "data")]
    pub code: Bytes,
}

impl CodeRecord {
    pub fn new(hash: B256, code: impl Into<Bytes>) -> Self {
        Self {
            hash: hex_string(hash.as_slice()),
            code: code.into(),
        }
    }
}

/// `0x`-prefixed lowercase hex.
pub(crate) fn hex_string(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

// ─── serde helpers ───────────────────────────────────────────────────────────

/// U256 as a base-10 string, so no consumer truncates it to a machine word.
mod decimal {
    use alloy_primitives::U256;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &U256, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<U256, D::Error> {
        let s = String::deserialize(d)?;
        U256::from_str_radix(&s, 10).map_err(de::Error::custom)
    }
}

mod decimal_opt {
    use alloy_primitives::U256;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<U256>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => s.serialize_some(&v.to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<U256>, D::Error> {
        Option::<String>::deserialize(d)?
            .map(|s| U256::from_str_radix(&s, 10).map_err(de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_record_hex_hash() {
        let rec = CodeRecord::new(B256::repeat_byte(0xab), Vec::<u8>::new());
        assert_eq!(rec.hash.len(), 66);
        assert!(rec.hash.starts_with("0xabab"));
        assert!(rec.code.is_empty());
    }

    #[test]
    fn contract_creation_detected_by_empty_recipient() {
        let tx = crate::fixtures::transfer_record();
        assert!(!tx.is_contract_creation());
        let create = TransactionRecord {
            to: String::new(),
            ..tx
        };
        assert!(create.is_contract_creation());
    }

    #[test]
    fn large_values_serialize_as_decimal_strings() {
        let mut tx = crate::fixtures::transfer_record();
        tx.value = U256::MAX;
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["value"], U256::MAX.to_string());
        assert!(json["maxPriorityFeePerGas"].is_null());
    }
}
