//! Chain-native input types supplied by the execution node.
//!
//! The node owns block production and transaction decoding; chainfeed only
//! reads what it needs through these types. Headers are concrete because
//! every EVM header carries the same fields; transactions are a trait so the
//! node can hand over its own envelope type without copying.

use alloy_primitives::{Address, Bloom, Bytes, B256, B64, U256};
use serde::{Deserialize, Serialize};

// ─── BlockHeader ─────────────────────────────────────────────────────────────

/// A sealed EVM block header.
///
/// Serialized as-is into the `header` field of the published record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockHeader {
    /// Hash of the sealed header.
    pub hash: B256,
    pub parent_hash: B256,
    pub ommers_hash: B256,
    /// Fee recipient (coinbase / miner).
    pub beneficiary: Address,
    pub state_root: B256,
    pub transactions_root: B256,
    pub receipts_root: B256,
    pub logs_bloom: Bloom,
    pub difficulty: U256,
    pub number: u64,
    pub gas_limit: u64,
    pub gas_used: u64,
    /// Unix timestamp (seconds).
    pub timestamp: u64,
    pub extra_data: Bytes,
    pub mix_hash: B256,
    /// Proof-of-work nonce.
    pub nonce: B64,
    /// `None` before the London fork.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub base_fee_per_gas: Option<U256>,
}

// ─── Block ───────────────────────────────────────────────────────────────────

/// A finalized block: header, transactions in block order, and its RLP size.
#[derive(Debug, Clone)]
pub struct Block<T> {
    pub header: BlockHeader,
    pub transactions: Vec<T>,
    /// Encoded size of the whole block in bytes.
    pub size: u64,
}

impl<T> Block<T> {
    pub fn new(header: BlockHeader, transactions: Vec<T>, size: u64) -> Self {
        Self {
            header,
            transactions,
            size,
        }
    }

    pub fn hash(&self) -> B256 {
        self.header.hash
    }

    pub fn number(&self) -> u64 {
        self.header.number
    }
}

// ─── Transactions ────────────────────────────────────────────────────────────

/// Read access to a chain transaction.
pub trait ChainTransaction {
    fn hash(&self) -> B256;

    /// EIP-2718 type byte (0 = legacy).
    fn tx_type(&self) -> u8;

    fn nonce(&self) -> u64;

    fn gas_limit(&self) -> u64;

    /// Gas price for legacy/2930 transactions; the fee cap for dynamic-fee ones.
    fn gas_price(&self) -> U256;

    /// EIP-1559 fee cap. Equals the gas price for transactions without one.
    fn max_fee_per_gas(&self) -> U256;

    /// EIP-1559 tip cap, if the transaction type carries one.
    fn max_priority_fee_per_gas(&self) -> Option<U256>;

    fn value(&self) -> U256;

    /// Recipient; `None` for contract creation.
    fn to(&self) -> Option<Address>;

    fn input(&self) -> &Bytes;

    /// Encoded size of the transaction in bytes.
    fn encoded_size(&self) -> u64;

    /// Chain id bound into the signature, if any.
    fn chain_id(&self) -> Option<u64>;
}

/// ECDSA signature components, with the recovery bit already normalized to
/// y-parity (EIP-155 `v` values must be reduced by the node).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxSignature {
    pub r: U256,
    pub s: U256,
    pub y_parity: bool,
}

/// A transaction that exposes what secp256k1 sender recovery needs.
pub trait SignedTransaction: ChainTransaction {
    /// The digest that was signed, computed under the chain's active signing rules.
    fn signature_hash(&self) -> B256;

    fn signature(&self) -> TxSignature;
}
