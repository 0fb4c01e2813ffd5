//! Sender recovery capability.
//!
//! The node decides which signing rules are active for a block (Frontier,
//! EIP-155, typed envelopes); chainfeed only asks for the resulting address.

use alloy_primitives::{keccak256, Address, B256};
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use thiserror::Error;

use crate::chain::{SignedTransaction, TxSignature};

/// Why a sender could not be recovered.
#[derive(Debug, Error)]
pub enum RecoveryError {
    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("unsupported transaction: {0}")]
    Unsupported(String),
}

/// Recovers the sending address of a transaction from its signature.
pub trait SenderRecovery<T: ?Sized>: Send + Sync {
    fn recover_sender(&self, tx: &T) -> Result<Address, RecoveryError>;
}

/// secp256k1 recovery over the node-supplied signing hash.
#[derive(Debug, Default, Clone, Copy)]
pub struct EcdsaRecovery;

impl<T: SignedTransaction> SenderRecovery<T> for EcdsaRecovery {
    fn recover_sender(&self, tx: &T) -> Result<Address, RecoveryError> {
        recover_address(&tx.signature_hash(), &tx.signature())
    }
}

/// Recover the address that produced `sig` over `prehash`.
///
/// High-s signatures (pre-Homestead) are normalized before recovery.
pub fn recover_address(prehash: &B256, sig: &TxSignature) -> Result<Address, RecoveryError> {
    let mut raw = [0u8; 64];
    raw[..32].copy_from_slice(&sig.r.to_be_bytes::<32>());
    raw[32..].copy_from_slice(&sig.s.to_be_bytes::<32>());

    let mut signature =
        Signature::from_slice(&raw).map_err(|e| RecoveryError::InvalidSignature(e.to_string()))?;
    let mut y_odd = sig.y_parity;
    if let Some(low_s) = signature.normalize_s() {
        signature = low_s;
        y_odd = !y_odd;
    }

    let recovery_id = RecoveryId::new(y_odd, false);
    let key = VerifyingKey::recover_from_prehash(prehash.as_slice(), &signature, recovery_id)
        .map_err(|e| RecoveryError::InvalidSignature(e.to_string()))?;
    Ok(public_key_address(&key))
}

/// Ethereum address of a public key: last 20 bytes of keccak256(x ‖ y).
pub fn public_key_address(key: &VerifyingKey) -> Address {
    let point = key.to_encoded_point(false);
    let hash = keccak256(&point.as_bytes()[1..]);
    Address::from_slice(&hash[12..])
}
