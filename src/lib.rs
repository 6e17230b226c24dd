//! Interzone chain core: network parameter profiles and checkpoint anchors
//!
//! This crate provides the consensus anchor layer of an Interzone full node:
//! - Immutable per-network parameter profiles (Main, Testnet, Regtest) with
//!   construction-time genesis self-validation
//! - Flag-based selection of the active profile
//! - Hard-coded checkpoint ledgers pinning historical heights to exact
//!   hashes, with an enforcement toggle
//! - Sync-progress estimation against the checkpoint ledger
//! - Last-checkpoint lookup for bulk-sync bootstrap
//! - Seed node bookkeeping with externally supplied fixed seeds
//!
//! # Example
//!
//! ```rust
//! use interzone_chain::chain::ChainContext;
//!
//! let context = ChainContext::new();
//! assert!(context.select_from_flags(false, true));
//!
//! let params = context.active_params();
//! println!("testnet magic: {}", hex::encode(params.message_magic));
//!
//! // Heights without a checkpoint carry no opinion
//! assert!(context.acceptable_block(7, "any block hash"));
//! ```

pub mod chain;
pub mod crypto;

// Re-export commonly used types
pub use chain::{
    load_fixed_seeds, BlockIndexEntry, ChainContext, ChainParams, CheckpointData, DnsSeed,
    GenesisBlock, Network, SeedAddress, SeedError, COIN, POW_LIMIT_BITS,
    SIGCHECK_VERIFICATION_FACTOR,
};
pub use crypto::{calculate_merkle_root, calculate_target, double_sha256, meets_difficulty, sha256};
