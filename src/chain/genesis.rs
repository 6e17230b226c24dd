//! Genesis block assembly
//!
//! Each network variant starts from the same coinbase transaction and
//! re-derives its genesis hash after applying its own timestamp, difficulty
//! bits, and nonce.

use crate::crypto::{calculate_merkle_root, double_sha256_hex};
use serde::{Deserialize, Serialize};

/// Base unit denomination (like satoshis for Bitcoin)
pub const COIN: u64 = 100_000_000;

/// Value of the genesis coinbase output: 16 coins
pub const GENESIS_REWARD: u64 = 16 * COIN;

/// The sole transaction of the genesis block
///
/// Its script-sig carries the founding phrase, proving the block could not
/// have been created before the phrase was published.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenesisCoinbase {
    /// Input script carrying the founding phrase
    pub script_sig: String,
    /// Output value in base units
    pub value: u64,
    /// Hex-encoded output key script
    pub script_pubkey: String,
}

impl GenesisCoinbase {
    pub fn new(script_sig: &str, value: u64, script_pubkey: &str) -> Self {
        Self {
            script_sig: script_sig.to_string(),
            value,
            script_pubkey: script_pubkey.to_string(),
        }
    }

    /// Transaction ID: double SHA-256 over the serialized fields
    pub fn txid(&self) -> String {
        let data = format!("{}:{}:{}", self.script_sig, self.value, self.script_pubkey);
        double_sha256_hex(data.as_bytes())
    }
}

/// The first block of a chain
///
/// Has no predecessor; its hash identifies the network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenesisBlock {
    /// Block version
    pub version: u32,
    /// All-zero predecessor reference
    pub previous_hash: String,
    /// Merkle root over the coinbase transaction
    pub merkle_root: String,
    /// Block creation timestamp (Unix seconds)
    pub timestamp: i64,
    /// Difficulty bits in compact form
    pub bits: u32,
    /// Nonce satisfying the proof-of-work limit
    pub nonce: u64,
    /// The coinbase transaction
    pub coinbase: GenesisCoinbase,
}

impl GenesisBlock {
    /// Assemble a genesis block; the merkle root is derived from the
    /// coinbase transaction ID.
    pub fn new(coinbase: GenesisCoinbase, timestamp: i64, bits: u32, nonce: u64) -> Self {
        let leaf = hex::decode(coinbase.txid()).unwrap_or_default();
        let merkle_root = hex::encode(calculate_merkle_root(&[leaf]));

        Self {
            version: 1,
            previous_hash: "0".repeat(64),
            merkle_root,
            timestamp,
            bits,
            nonce,
            coinbase,
        }
    }

    /// Calculate the block hash over the header fields
    pub fn hash(&self) -> String {
        let data = format!(
            "{}{}{}{}{}{}",
            self.version,
            self.previous_hash,
            self.merkle_root,
            self.timestamp,
            self.bits,
            self.nonce
        );
        double_sha256_hex(data.as_bytes())
    }
}
