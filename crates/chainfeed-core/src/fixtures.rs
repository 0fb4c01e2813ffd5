//! Shared test fixtures: a plain transaction type, a signer that reads the
//! sender straight off it, and an in-memory transport.

use std::sync::Mutex;

use alloy_primitives::{address, Address, Bytes, B256, B64, U256};
use async_trait::async_trait;

use crate::chain::{Block, BlockHeader, ChainTransaction};
use crate::error::TransportError;
use crate::record::{CodeRecord, TransactionRecord};
use crate::signer::{RecoveryError, SenderRecovery};
use crate::transport::{BlockTransport, DeliveryId};

pub const SENDER: Address = address!("d8dA6BF26964aF9D7eEd9e03E53415D37aA96045");
pub const SENDER_CHECKSUM: &str = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045";
pub const RECIPIENT: Address = address!("abcdabcdabcdabcdabcdabcdabcdabcdabcdabcd");
pub const RECIPIENT_CHECKSUM: &str = "0xABCDabcdABcDabcDaBCDAbcdABcdAbCdABcDABCd";

pub const ONE_GWEI: u64 = 1_000_000_000;
pub const ONE_ETHER: u128 = 1_000_000_000_000_000_000;

// ─── TestTx ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct TestTx {
    pub hash: B256,
    pub tx_type: u8,
    pub nonce: u64,
    pub gas_limit: u64,
    pub gas_price: U256,
    pub max_fee_per_gas: U256,
    pub max_priority_fee_per_gas: Option<U256>,
    pub value: U256,
    pub to: Option<Address>,
    pub input: Bytes,
    pub size: u64,
    pub chain_id: Option<u64>,
    /// What [`EmbeddedSender`] returns; `None` simulates a bad signature.
    pub sender: Option<Address>,
}

impl ChainTransaction for TestTx {
    fn hash(&self) -> B256 {
        self.hash
    }
    fn tx_type(&self) -> u8 {
        self.tx_type
    }
    fn nonce(&self) -> u64 {
        self.nonce
    }
    fn gas_limit(&self) -> u64 {
        self.gas_limit
    }
    fn gas_price(&self) -> U256 {
        self.gas_price
    }
    fn max_fee_per_gas(&self) -> U256 {
        self.max_fee_per_gas
    }
    fn max_priority_fee_per_gas(&self) -> Option<U256> {
        self.max_priority_fee_per_gas
    }
    fn value(&self) -> U256 {
        self.value
    }
    fn to(&self) -> Option<Address> {
        self.to
    }
    fn input(&self) -> &Bytes {
        &self.input
    }
    fn encoded_size(&self) -> u64 {
        self.size
    }
    fn chain_id(&self) -> Option<u64> {
        self.chain_id
    }
}

/// Legacy value transfer: nonce 5, 21000 gas, 2 gwei, 1 ether.
pub fn transfer(seq: u8) -> TestTx {
    TestTx {
        hash: B256::repeat_byte(seq),
        tx_type: 0,
        nonce: 5,
        gas_limit: 21_000,
        gas_price: U256::from(2 * ONE_GWEI),
        max_fee_per_gas: U256::from(2 * ONE_GWEI),
        max_priority_fee_per_gas: None,
        value: U256::from(ONE_ETHER),
        to: Some(RECIPIENT),
        input: Bytes::new(),
        size: 110,
        chain_id: Some(1),
        sender: Some(SENDER),
    }
}

/// EIP-1559 contract deployment.
pub fn deployment(seq: u8) -> TestTx {
    TestTx {
        tx_type: 2,
        max_fee_per_gas: U256::from(30 * ONE_GWEI),
        max_priority_fee_per_gas: Some(U256::from(ONE_GWEI)),
        value: U256::ZERO,
        to: None,
        input: Bytes::from_static(&[0x60, 0x80, 0x60, 0x40, 0x52]),
        ..transfer(seq)
    }
}

pub fn transfer_record() -> TransactionRecord {
    TransactionRecord {
        from: SENDER_CHECKSUM.into(),
        to: RECIPIENT_CHECKSUM.into(),
        tx_type: 0,
        nonce: 5,
        gas_limit: 21_000,
        gas_price: U256::from(2 * ONE_GWEI),
        max_fee_per_gas: U256::from(2 * ONE_GWEI),
        max_priority_fee_per_gas: None,
        value: U256::from(ONE_ETHER),
        hash: format!("0x{}", "01".repeat(32)),
        input: Bytes::new(),
        size: 110,
        chain_id: Some(1),
    }
}

// ─── Signer ──────────────────────────────────────────────────────────────────

pub struct EmbeddedSender;

impl SenderRecovery<TestTx> for EmbeddedSender {
    fn recover_sender(&self, tx: &TestTx) -> Result<Address, RecoveryError> {
        tx.sender
            .ok_or_else(|| RecoveryError::InvalidSignature("signature does not verify".into()))
    }
}

// ─── Blocks ──────────────────────────────────────────────────────────────────

pub fn header(number: u64) -> BlockHeader {
    BlockHeader {
        hash: B256::repeat_byte(0xbb),
        parent_hash: B256::repeat_byte(0xaa),
        beneficiary: SENDER,
        state_root: B256::repeat_byte(0x01),
        receipts_root: B256::repeat_byte(0x02),
        difficulty: U256::ZERO,
        number,
        gas_limit: 30_000_000,
        gas_used: 21_000,
        timestamp: 1_700_000_000,
        extra_data: Bytes::from_static(b"chainfeed"),
        mix_hash: B256::repeat_byte(0x03),
        nonce: B64::ZERO,
        base_fee_per_gas: Some(U256::from(ONE_GWEI)),
        ..Default::default()
    }
}

pub fn block(txs: Vec<TestTx>) -> Block<TestTx> {
    Block::new(header(19_000_000), txs, 1_024)
}

pub fn receipts(n: usize) -> Vec<serde_json::Value> {
    (0..n)
        .map(|i| serde_json::json!({ "status": "0x1", "transactionIndex": i, "logs": [] }))
        .collect()
}

// ─── Transport ───────────────────────────────────────────────────────────────

/// In-memory transport; `down` makes every call fail like a dropped connection.
#[derive(Default)]
pub struct MemoryTransport {
    pub down: bool,
    pub blocks: Mutex<Vec<(String, Vec<u8>)>>,
    pub code: Mutex<Vec<CodeRecord>>,
}

impl MemoryTransport {
    pub fn down() -> Self {
        Self {
            down: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl BlockTransport for MemoryTransport {
    async fn append_code(&self, code: &CodeRecord) -> Result<DeliveryId, TransportError> {
        if self.down {
            return Err(TransportError::Connection("connection refused".into()));
        }
        let mut entries = self.code.lock().unwrap();
        entries.push(code.clone());
        Ok(DeliveryId(format!("code-{}", entries.len())))
    }

    async fn publish_block(
        &self,
        block_hash: &str,
        payload: &[u8],
    ) -> Result<DeliveryId, TransportError> {
        if self.down {
            return Err(TransportError::Connection("connection refused".into()));
        }
        let mut entries = self.blocks.lock().unwrap();
        entries.push((block_hash.to_string(), payload.to_vec()));
        Ok(DeliveryId(format!("block-{}", entries.len())))
    }

    fn name(&self) -> &str {
        "memory"
    }
}
