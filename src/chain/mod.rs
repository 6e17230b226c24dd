//! Chain core: network profiles and checkpoint anchors
//!
//! This module contains:
//! - Genesis block assembly and hash derivation
//! - Per-network consensus parameter profiles (Main, Testnet, Regtest)
//! - The active-profile selector and checkpoint-enforcement holder
//! - Hard-coded checkpoint ledgers with sync-progress estimation
//! - Seed node bookkeeping and fixed-seed configuration loading

pub mod checkpoints;
pub mod genesis;
pub mod params;
pub mod seeds;
pub mod selector;

pub use checkpoints::{
    BlockIndexEntry, CheckpointData, SIGCHECK_VERIFICATION_FACTOR,
};
pub use genesis::{GenesisBlock, GenesisCoinbase, COIN, GENESIS_REWARD};
pub use params::{ChainParams, Network, POW_LIMIT_BITS};
pub use seeds::{load_fixed_seeds, DnsSeed, SeedAddress, SeedError};
pub use selector::ChainContext;
