//! Channel names shared by every transport.

/// Append-only channel of contract code deployments.
pub const BLOCK_CODE: &str = "block-code";

/// Channel of canonically encoded finalized blocks.
pub const BLOCK_TRANSACTIONS: &str = "block-transactions";

/// Field carrying the code hash in a `block-code` entry.
pub const FIELD_HASH: &str = "hash";

/// Field carrying the payload (bytecode or encoded block).
pub const FIELD_DATA: &str = "data";
