//! Hard-coded checkpoint ledgers
//!
//! Checkpoints pin historical block heights to exact hashes, encoding social
//! consensus on the canonical chain. They let a node skip full validation of
//! ancient history and reject any candidate chain that rewrites a block
//! before the last checkpoint. Each network carries its own ledger plus
//! aggregate stats used to estimate sync progress.

use crate::chain::params::{Network, REGTEST_GENESIS_HASH, TESTNET_GENESIS_HASH};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// How many times we expect transactions after the last checkpoint to be
/// slower to verify. A compromise: reindexing from a fast disk with a slow
/// CPU can reach 20, while downloading over a slow network with a fast CPU
/// stays near 1.
pub const SIGCHECK_VERIFICATION_FACTOR: f64 = 5.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

// =============================================================================
// Block Index Entry
// =============================================================================

/// Read-only view of one entry in the node's block index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockIndexEntry {
    /// Block hash
    pub hash: String,
    /// Block height
    pub height: u64,
    /// Cumulative transaction count from genesis through this block
    pub chain_tx_count: u64,
    /// Block timestamp (Unix seconds)
    pub timestamp: i64,
}

// =============================================================================
// Checkpoint Ledger
// =============================================================================

/// The checkpoint ledger of one network: an ordered height-to-hash table
/// plus aggregate stats, immutable after construction
#[derive(Debug, Clone)]
pub struct CheckpointData {
    /// Ordered height-to-hash table
    checkpoints: BTreeMap<u64, &'static str>,
    /// Unix timestamp of the last checkpoint block
    pub time_last_checkpoint: i64,
    /// Total transactions between genesis and the last checkpoint
    pub transactions_last_checkpoint: u64,
    /// Estimated transactions per day after the last checkpoint
    pub transactions_per_day: f64,
}

impl CheckpointData {
    /// Production chain ledger
    pub fn mainnet() -> Self {
        Self::from_table(
            &[
                (
                    1,
                    "00000b7ff05d5ef83c0b524732ab2c01b0505d3381d7505169d90f061fd47866",
                ),
                (
                    3,
                    "000000c5823bdc4409c6882b39a8be7c113af492fb297818d37ddcf2d4d1e0c8",
                ),
                (
                    10000,
                    "00000000003457e07d2b7de1c902203947c8d0ded423dcede6acbe62c04e7136",
                ),
                (
                    20000,
                    "0000000000088ba3704db742c03d181f5672f1e1a9e2aedcb6e0ed5f24410a09",
                ),
                (
                    30000,
                    "0000000000427730ce684c1a830dae58e3fc9a0bf62d4efd820974102d77fc94",
                ),
                (
                    40000,
                    "0000000000161db819c780310eef69380a23ed53b4b36eab615618ef2a7c5947",
                ),
                (
                    50000,
                    "000000000056c64bab4b08c81196775e8489627e265a93842c8c6690c214346b",
                ),
                (
                    60000,
                    "000000000193c0e5b615abb6084fa0e627172c5f17f697df6285d8428b82aa3c",
                ),
                (
                    70000,
                    "00000000013986ae19f691b10ca60e49b5221c10640c18414fe7bd3a0ddcb497",
                ),
                (
                    75000,
                    "0000000008ef2127de6b89fe3e608ee40d079f5629876aafb353e9bf5f87f556",
                ),
                (
                    80000,
                    "000000000142fac657230cb0ffd91e3dfa5693742ee4074f996b87f3cad7dbab",
                ),
                (
                    90000,
                    "0000000007c6124908398129355408c46bd01e0cacd43bb0862cdfeee136453b",
                ),
                (
                    100000,
                    "00000000007ce264c00521645adc9ccb627cae68f188c4f68a895d5982607386",
                ),
            ],
            1514584454,
            128_449,
            960.0,
        )
    }

    /// Public test chain ledger
    pub fn testnet() -> Self {
        Self::from_table(
            &[
                (0, TESTNET_GENESIS_HASH),
                (
                    5000,
                    "00000013fe8e170075b47b83447a73e7ecd0a3ae0c199aa6427a41437134e31a",
                ),
                (
                    10000,
                    "000000c541d1903e7b8441397d9bda5a1d4eedfe4c4a8aea38446814740752d4",
                ),
                (
                    12000,
                    "000000df243a71405ced83a1fe32a645d42e7497d5d06b9d57d12fb25d050389",
                ),
            ],
            1507140013,
            12_038,
            960.0,
        )
    }

    /// Regression-test ledger: only the genesis block
    pub fn regtest() -> Self {
        Self::from_table(&[(0, REGTEST_GENESIS_HASH)], 0, 0, 0.0)
    }

    /// Build the ledger for a given network kind
    pub fn for_network(network: Network) -> Self {
        match network {
            Network::Main => Self::mainnet(),
            Network::Testnet => Self::testnet(),
            Network::Regtest => Self::regtest(),
        }
    }

    fn from_table(
        table: &[(u64, &'static str)],
        time_last_checkpoint: i64,
        transactions_last_checkpoint: u64,
        transactions_per_day: f64,
    ) -> Self {
        let mut checkpoints = BTreeMap::new();
        for (height, hash) in table {
            let replaced = checkpoints.insert(*height, *hash);
            assert!(replaced.is_none(), "duplicate checkpoint height {}", height);
        }

        Self {
            checkpoints,
            time_last_checkpoint,
            transactions_last_checkpoint,
            transactions_per_day,
        }
    }

    /// Expected hash at a checkpointed height, if any
    pub fn hash_at(&self, height: u64) -> Option<&'static str> {
        self.checkpoints.get(&height).copied()
    }

    /// Verdict for a candidate (height, hash) pair: heights without a
    /// checkpoint carry no opinion; checkpointed heights must match exactly.
    pub fn matches(&self, height: u64, hash: &str) -> bool {
        match self.hash_at(height) {
            Some(expected) => expected == hash,
            None => true,
        }
    }

    /// Height of the highest checkpoint, 0 for an empty ledger
    pub fn highest_height(&self) -> u64 {
        self.checkpoints.keys().next_back().copied().unwrap_or(0)
    }

    /// Number of checkpoints in the ledger
    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }

    /// Find the highest checkpoint whose block is present in the supplied
    /// block index, scanning from the top of the ledger down.
    pub fn last_checkpoint<'a>(
        &self,
        block_index: &'a HashMap<String, BlockIndexEntry>,
    ) -> Option<&'a BlockIndexEntry> {
        self.checkpoints
            .iter()
            .rev()
            .find_map(|(_, hash)| block_index.get(*hash))
    }

    /// Estimate how far block verification has progressed at the given tip,
    /// as a fraction in [0, 1].
    ///
    /// Work is modeled as 1.0 per transaction up to the last checkpoint and
    /// `SIGCHECK_VERIFICATION_FACTOR` per transaction after it, where full
    /// signature verification kicks in. Transactions not yet seen are
    /// extrapolated from the per-day estimate. Heuristic only.
    pub fn verification_progress(
        &self,
        tip: Option<&BlockIndexEntry>,
        now: i64,
        sigchecks: bool,
    ) -> f64 {
        let tip = match tip {
            Some(tip) => tip,
            None => return 0.0,
        };

        let factor = if sigchecks {
            SIGCHECK_VERIFICATION_FACTOR
        } else {
            1.0
        };

        let work_before;
        let work_after;

        if tip.chain_tx_count <= self.transactions_last_checkpoint {
            let cheap_before = tip.chain_tx_count as f64;
            let cheap_after = (self.transactions_last_checkpoint - tip.chain_tx_count) as f64;
            let expensive_after = (now - self.time_last_checkpoint) as f64 / SECONDS_PER_DAY
                * self.transactions_per_day;
            work_before = cheap_before;
            work_after = cheap_after + expensive_after * factor;
        } else {
            let cheap_before = self.transactions_last_checkpoint as f64;
            let expensive_before =
                (tip.chain_tx_count - self.transactions_last_checkpoint) as f64;
            let expensive_after =
                (now - tip.timestamp) as f64 / SECONDS_PER_DAY * self.transactions_per_day;
            work_before = cheap_before + expensive_before * factor;
            work_after = expensive_after * factor;
        }

        let total_work = work_before + work_after;
        if total_work == 0.0 {
            // Nothing left to verify on either side of the tip
            return 1.0;
        }
        work_before / total_work
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAIN_CP_100000: &str = "00000000007ce264c00521645adc9ccb627cae68f188c4f68a895d5982607386";

    fn entry(height: u64, hash: &str, chain_tx_count: u64, timestamp: i64) -> BlockIndexEntry {
        BlockIndexEntry {
            hash: hash.to_string(),
            height,
            chain_tx_count,
            timestamp,
        }
    }

    #[test]
    fn test_absent_height_carries_no_opinion() {
        let data = CheckpointData::mainnet();
        assert!(data.matches(2, "anything"));
        assert!(data.matches(99_999, ""));
    }

    #[test]
    fn test_present_height_requires_exact_match() {
        let data = CheckpointData::mainnet();
        assert!(data.matches(100000, MAIN_CP_100000));
        assert!(!data.matches(100000, "00000000007ce264c00521645adc9ccb627cae68f188c4f68a895d5982607387"));
        assert!(!data.matches(1, MAIN_CP_100000));
    }

    #[test]
    fn test_highest_height() {
        assert_eq!(CheckpointData::mainnet().highest_height(), 100000);
        assert_eq!(CheckpointData::testnet().highest_height(), 12000);
        assert_eq!(CheckpointData::regtest().highest_height(), 0);
        assert_eq!(CheckpointData::from_table(&[], 0, 0, 0.0).highest_height(), 0);
    }

    #[test]
    fn test_ledger_sizes() {
        assert_eq!(CheckpointData::mainnet().len(), 13);
        assert_eq!(CheckpointData::testnet().len(), 4);
        assert_eq!(CheckpointData::regtest().len(), 1);
        assert!(!CheckpointData::mainnet().is_empty());
    }

    #[test]
    fn test_last_checkpoint_picks_highest_match() {
        let data = CheckpointData::mainnet();
        let mut index = HashMap::new();

        let cp_50000 = "000000000056c64bab4b08c81196775e8489627e265a93842c8c6690c214346b";
        index.insert(cp_50000.to_string(), entry(50000, cp_50000, 60_000, 1_500_000_000));
        let cp_80000 = "000000000142fac657230cb0ffd91e3dfa5693742ee4074f996b87f3cad7dbab";
        index.insert(cp_80000.to_string(), entry(80000, cp_80000, 100_000, 1_510_000_000));

        let found = data.last_checkpoint(&index).unwrap();
        assert_eq!(found.height, 80000);
    }

    #[test]
    fn test_last_checkpoint_none_without_match() {
        let data = CheckpointData::mainnet();
        let mut index = HashMap::new();
        index.insert(
            "ff".repeat(32),
            entry(5, &"ff".repeat(32), 10, 1_500_000_000),
        );

        assert!(data.last_checkpoint(&index).is_none());
        assert!(data.last_checkpoint(&HashMap::new()).is_none());
    }

    #[test]
    fn test_progress_without_tip_is_zero() {
        let data = CheckpointData::mainnet();
        assert_eq!(data.verification_progress(None, 1_600_000_000, true), 0.0);
    }

    #[test]
    fn test_progress_is_monotone_in_tx_count() {
        let data = CheckpointData::mainnet();
        let now = data.time_last_checkpoint + 10 * 86_400;

        // Tips with growing tx counts and well-formed timestamps, crossing
        // the last-checkpoint boundary at 128449 transactions
        let tips = [
            entry(0, "a", 0, data.time_last_checkpoint - 90 * 86_400),
            entry(1000, "b", 64_000, data.time_last_checkpoint - 30 * 86_400),
            entry(2000, "c", 128_449, data.time_last_checkpoint),
            entry(2100, "d", 130_000, now - 86_400),
            entry(2200, "e", 140_000, now),
        ];

        let mut last = -1.0;
        for tip in &tips {
            let progress = data.verification_progress(Some(tip), now, true);
            assert!(progress >= last, "progress regressed at tip {}", tip.height);
            assert!((0.0..=1.0).contains(&progress));
            last = progress;
        }
    }

    #[test]
    fn test_progress_is_one_when_no_work_remains() {
        let data = CheckpointData::mainnet();
        let now = data.time_last_checkpoint + 10 * 86_400;

        // Tip past the checkpoint, timestamped now: no estimated work after
        let tip = entry(2200, "e", 140_000, now);
        assert_eq!(data.verification_progress(Some(&tip), now, true), 1.0);
    }

    #[test]
    fn test_progress_zero_denominator_is_one() {
        // All-zero regtest stats with a zero-tx tip and no elapsed time:
        // both work terms vanish
        let data = CheckpointData::regtest();
        let tip = entry(0, "g", 0, 0);
        assert_eq!(data.verification_progress(Some(&tip), 0, true), 1.0);
    }

    #[test]
    fn test_progress_regtest_tip_is_complete() {
        let data = CheckpointData::regtest();
        let tip = entry(10, "h", 11, 500);
        assert_eq!(data.verification_progress(Some(&tip), 1_000, true), 1.0);
    }

    #[test]
    fn test_sigcheck_factor_lowers_early_progress() {
        let data = CheckpointData::mainnet();
        let now = data.time_last_checkpoint + 100 * 86_400;
        let tip = entry(1000, "b", 64_000, data.time_last_checkpoint - 30 * 86_400);

        let with_sigchecks = data.verification_progress(Some(&tip), now, true);
        let without = data.verification_progress(Some(&tip), now, false);
        assert!(with_sigchecks < without);
    }
}
