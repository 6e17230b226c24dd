//! Active-profile selection and checkpoint enforcement
//!
//! All three network profiles and checkpoint ledgers are built once during
//! single-threaded startup. Afterwards the only mutable shared state is the
//! active-network ID and the enforcement flag, both atomic, so a
//! [`ChainContext`] can be shared freely across worker threads.

use crate::chain::checkpoints::{BlockIndexEntry, CheckpointData};
use crate::chain::params::{ChainParams, Network};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

/// Holder for the per-network profiles, the active-network selection, and
/// the checkpoint-enforcement flag
#[derive(Debug)]
pub struct ChainContext {
    main: ChainParams,
    testnet: ChainParams,
    regtest: ChainParams,
    main_checkpoints: CheckpointData,
    testnet_checkpoints: CheckpointData,
    regtest_checkpoints: CheckpointData,
    active: AtomicU8,
    checkpoints_enforced: AtomicBool,
}

impl ChainContext {
    /// Build all profiles and ledgers. Main is active and checkpoints are
    /// enforced until told otherwise. Panics on an internally inconsistent
    /// profile (see [`ChainParams`]); that is a build defect, not a runtime
    /// condition.
    pub fn new() -> Self {
        Self {
            main: ChainParams::main(),
            testnet: ChainParams::testnet(),
            regtest: ChainParams::regtest(),
            main_checkpoints: CheckpointData::mainnet(),
            testnet_checkpoints: CheckpointData::testnet(),
            regtest_checkpoints: CheckpointData::regtest(),
            active: AtomicU8::new(Network::Main.id()),
            checkpoints_enforced: AtomicBool::new(true),
        }
    }

    // =========================================================================
    // Network Selection
    // =========================================================================

    /// The currently selected network
    pub fn network(&self) -> Network {
        Network::from_id(self.active.load(Ordering::Acquire))
    }

    /// Select the active network
    pub fn select_network(&self, network: Network) {
        self.active.store(network.id(), Ordering::Release);
        log::info!("Selected {} network parameters", network);
    }

    /// Select the active network from startup flags. Setting both flags is
    /// a configuration error: returns false and leaves the selection
    /// unchanged so the caller can report and exit cleanly.
    pub fn select_from_flags(&self, regtest: bool, testnet: bool) -> bool {
        if regtest && testnet {
            log::warn!("Conflicting network flags: regtest and testnet are mutually exclusive");
            return false;
        }

        if regtest {
            self.select_network(Network::Regtest);
        } else if testnet {
            self.select_network(Network::Testnet);
        } else {
            self.select_network(Network::Main);
        }
        true
    }

    /// Profile of the active network; never absent
    pub fn active_params(&self) -> &ChainParams {
        self.params_for(self.network())
    }

    /// Profile of a specific network
    pub fn params_for(&self, network: Network) -> &ChainParams {
        match network {
            Network::Main => &self.main,
            Network::Testnet => &self.testnet,
            Network::Regtest => &self.regtest,
        }
    }

    /// Install externally supplied fixed seeds into one network's profile.
    /// Part of single-threaded startup, hence `&mut self`.
    pub fn install_fixed_seeds(&mut self, network: Network, addrs: &[SocketAddr], now: i64) {
        let params = match network {
            Network::Main => &mut self.main,
            Network::Testnet => &mut self.testnet,
            Network::Regtest => &mut self.regtest,
        };
        params.install_fixed_seeds(addrs, now);
        log::info!("Installed {} fixed seeds for {}", addrs.len(), network);
    }

    // =========================================================================
    // Checkpoint Enforcement
    // =========================================================================

    /// Ledger of the active network
    pub fn checkpoints(&self) -> &CheckpointData {
        match self.network() {
            Network::Main => &self.main_checkpoints,
            Network::Testnet => &self.testnet_checkpoints,
            Network::Regtest => &self.regtest_checkpoints,
        }
    }

    pub fn checkpoints_enforced(&self) -> bool {
        self.checkpoints_enforced.load(Ordering::Acquire)
    }

    pub fn set_checkpoints_enforced(&self, enforced: bool) {
        self.checkpoints_enforced.store(enforced, Ordering::Release);
        if !enforced {
            log::warn!("Checkpoint enforcement disabled");
        }
    }

    /// Verdict for a candidate block at a given height. A rejection is
    /// permanent for that position: the caller must refuse to connect the
    /// candidate and must not retry it.
    pub fn acceptable_block(&self, height: u64, hash: &str) -> bool {
        if !self.checkpoints_enforced() {
            return true;
        }

        let acceptable = self.checkpoints().matches(height, hash);
        if !acceptable {
            log::warn!(
                "Rejecting block {} at height {}: conflicts with checkpoint",
                hash,
                height
            );
        }
        acceptable
    }

    /// Sync-progress estimate against the active ledger, in [0, 1]
    pub fn verification_progress(
        &self,
        tip: Option<&BlockIndexEntry>,
        now: i64,
        sigchecks: bool,
    ) -> f64 {
        self.checkpoints().verification_progress(tip, now, sigchecks)
    }

    /// Highest checkpoint present in the supplied block index, used by
    /// bulk-sync bootstrap to pick a safe resume point. None when nothing
    /// matches or enforcement is disabled.
    pub fn last_checkpoint<'a>(
        &self,
        block_index: &'a HashMap<String, BlockIndexEntry>,
    ) -> Option<&'a BlockIndexEntry> {
        if !self.checkpoints_enforced() {
            return None;
        }
        self.checkpoints().last_checkpoint(block_index)
    }

    /// Height of the highest checkpoint of the active ledger, or 0 when
    /// enforcement is disabled
    pub fn total_blocks_estimate(&self) -> u64 {
        if !self.checkpoints_enforced() {
            return 0;
        }
        self.checkpoints().highest_height()
    }
}

impl Default for ChainContext {
    fn default() -> Self {
        Self::new()
    }
}
