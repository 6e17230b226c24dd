//! Per-network consensus parameter profiles
//!
//! Every consensus-relevant constant of a network variant lives in one
//! immutable [`ChainParams`] value: message magic, ports, proof-of-work
//! limit, genesis block, seed lists, and address version bytes. Testnet is
//! derived from Main and Regtest from Testnet by copying the base profile
//! and applying an explicit override list, then re-deriving and re-checking
//! the genesis hash.

use crate::chain::genesis::{GenesisBlock, GenesisCoinbase, GENESIS_REWARD};
use crate::chain::seeds::{DnsSeed, SeedAddress};
use crate::crypto::{calculate_target, meets_difficulty};
use secp256k1::PublicKey;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;

// =============================================================================
// Network Kind
// =============================================================================

/// The network variant a node participates in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Network {
    /// Production chain
    Main,
    /// Public test chain
    Testnet,
    /// Private regression-test chain
    Regtest,
}

impl Network {
    /// Stable numeric ID used by the atomic active-network holder
    pub(crate) fn id(self) -> u8 {
        match self {
            Network::Main => 0,
            Network::Testnet => 1,
            Network::Regtest => 2,
        }
    }

    /// Decode a raw network ID; an unknown ID is a build defect and halts
    /// the process rather than falling back silently.
    pub(crate) fn from_id(id: u8) -> Network {
        match id {
            0 => Network::Main,
            1 => Network::Testnet,
            2 => Network::Regtest,
            other => panic!("unknown network id: {}", other),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Network::Main => "main",
            Network::Testnet => "testnet",
            Network::Regtest => "regtest",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Compiled-in Constants
// =============================================================================

/// Proof-of-work limit: easiest permitted difficulty, as leading zero bits
pub const POW_LIMIT_BITS: u32 = 20;

/// Founding phrase carried in the genesis coinbase script-sig
const GENESIS_PHRASE: &str =
    "The rulers of this most insecure of all worlds are rulers by accident.";

/// Output key script of the genesis coinbase
const GENESIS_OUTPUT_KEY: &str = "04becedf6ebadd4596964d890f677f8d2e74fdcc313c6416434384a66d6d8758d1c92de272dc6713e4a81d98841dfdfdc95e204ba915447d2fe9313435c78af3e8";

const MAIN_ALERT_KEY: &str = "04579f18934b3ef39094a9999e45506a1935662d0cd4e504d07beb53b8a1bfd78d81bee47e65119318397809420d5320e3c7b2aaae58580db48c38a4e6d4f0f919";
const TESTNET_ALERT_KEY: &str = "04c4d925d462a89054155314a7068bb8cf6d7c030d76491e6cc97fefcc4ab8c3665bfb34c3aba0e12b9fb4fab47502a00938dd93e0e675c4713ee47200046de2e3";

// Expected genesis constants, asserted against the derived values at
// profile construction. A mismatch means the build itself is inconsistent.
pub(crate) const MAIN_GENESIS_HASH: &str =
    "0000088376e63cb392ba4eb17cabcabb97ae3a754ad9d9ed7f9ff2d69b5f52eb";
pub(crate) const TESTNET_GENESIS_HASH: &str =
    "000009e316cdc83ceb9fe1a0a099cfc78a51415aa645372ad456e7273afebbb5";
pub(crate) const REGTEST_GENESIS_HASH: &str =
    "00000f23739521cfc29d6b9cfb3553e6d4bb7e676b17042f72212d228139f821";
pub(crate) const GENESIS_MERKLE_ROOT: &str =
    "106ff5d6a0fe0fb24d6f43c73583dc636a2b0ad89d1eaaaa09be0cf4006931d1";

// =============================================================================
// Chain Parameters
// =============================================================================

/// Immutable consensus profile of one network variant
#[derive(Debug, Clone)]
pub struct ChainParams {
    /// Which network this profile describes
    pub network: Network,
    /// 4-byte prefix distinguishing this network's wire messages
    pub message_magic: [u8; 4],
    /// Uncompressed secp256k1 key authorized to sign network alerts
    pub alert_key: Vec<u8>,
    /// P2P listen port
    pub default_port: u16,
    /// RPC listen port
    pub rpc_port: u16,
    /// 256-bit target ceiling: easiest permitted difficulty
    pub pow_limit: Vec<u8>,
    /// Blocks between successive reward halvings
    pub subsidy_halving_interval: u64,
    /// The first block of the chain
    pub genesis: GenesisBlock,
    /// Derived genesis hash, checked against the compiled-in constant
    pub genesis_hash: String,
    /// DNS seeds for peer discovery
    pub dns_seeds: Vec<DnsSeed>,
    /// Fixed seed addresses, externally supplied configuration
    pub fixed_seeds: Vec<SeedAddress>,
    /// Version byte for pubkey-hash addresses
    pub pubkey_address_version: u8,
    /// Version byte for script-hash addresses
    pub script_address_version: u8,
    /// Version byte for private-key exports
    pub secret_key_version: u8,
    /// Data directory suffix under the node's base directory
    pub data_dir: &'static str,
    /// Whether RPC access requires a configured password
    pub require_rpc_password: bool,
}

impl ChainParams {
    /// Production chain profile
    pub fn main() -> Self {
        let coinbase = GenesisCoinbase::new(GENESIS_PHRASE, GENESIS_REWARD, GENESIS_OUTPUT_KEY);
        let genesis = GenesisBlock::new(coinbase, 1503332100, 0x1e0fffff, 79_656);

        let mut params = Self {
            network: Network::Main,
            message_magic: [0x08, 0x02, 0x01, 0x17],
            alert_key: decode_alert_key(MAIN_ALERT_KEY),
            default_port: 55675,
            rpc_port: 55680,
            pow_limit: calculate_target(POW_LIMIT_BITS),
            subsidy_halving_interval: 500_000,
            genesis,
            genesis_hash: String::new(),
            dns_seeds: vec![
                DnsSeed::new("seed1", "seed1.interzone.space"),
                DnsSeed::new("seed2", "seed2.interzone.space"),
                DnsSeed::new("seed3", "seed3.interzone.space"),
                DnsSeed::new("seed4", "seed4.interzone.space"),
                DnsSeed::new("seed5", "seed5.interzone.space"),
            ],
            fixed_seeds: Vec::new(),
            pubkey_address_version: 0,
            script_address_version: 5,
            secret_key_version: 156,
            data_dir: "",
            require_rpc_password: true,
        };
        params.seal_genesis(MAIN_GENESIS_HASH);
        params
    }

    /// Public test chain profile: Main with overrides
    pub fn testnet() -> Self {
        let mut params = Self::main();
        params.network = Network::Testnet;
        params.message_magic = [0xfb, 0xc2, 0x11, 0x02];
        params.alert_key = decode_alert_key(TESTNET_ALERT_KEY);
        params.default_port = 21817;
        params.rpc_port = 21818;
        params.data_dir = "testnet";
        params.genesis.timestamp = 1503324223;
        params.genesis.nonce = 465_681;
        params.fixed_seeds.clear();
        params.dns_seeds = vec![DnsSeed::new("seed1", "seed1.interzone.space")];
        params.pubkey_address_version = 102;
        params.script_address_version = 44;
        params.secret_key_version = 216;
        params.seal_genesis(TESTNET_GENESIS_HASH);
        params
    }

    /// Private regression-test profile: Testnet with overrides
    pub fn regtest() -> Self {
        let mut params = Self::testnet();
        params.network = Network::Regtest;
        params.message_magic = [0xfc, 0x1f, 0xc3, 0x56];
        params.subsidy_halving_interval = 150;
        params.pow_limit = calculate_target(POW_LIMIT_BITS);
        params.genesis.timestamp = 1296688602;
        params.genesis.bits = 0x207fffff;
        params.genesis.nonce = 944_975;
        params.default_port = 18444;
        params.data_dir = "regtest";
        params.dns_seeds.clear();
        params.require_rpc_password = false;
        params.seal_genesis(REGTEST_GENESIS_HASH);
        params
    }

    /// Build the profile for a given network kind
    pub fn for_network(network: Network) -> Self {
        match network {
            Network::Main => Self::main(),
            Network::Testnet => Self::testnet(),
            Network::Regtest => Self::regtest(),
        }
    }

    /// Install externally supplied fixed seeds, recorded as one to two
    /// weeks stale. Called during single-threaded startup only.
    pub fn install_fixed_seeds(&mut self, addrs: &[SocketAddr], now: i64) {
        self.fixed_seeds = addrs
            .iter()
            .map(|addr| SeedAddress::stale(*addr, now))
            .collect();
    }

    /// Derive the genesis hash and check it, the merkle root, and the
    /// proof-of-work limit against the compiled-in expectations. A mismatch
    /// is a construction-time defect: the process must not come up serving
    /// an inconsistent profile.
    fn seal_genesis(&mut self, expected_hash: &str) {
        let hash = self.genesis.hash();
        assert_eq!(
            hash, expected_hash,
            "derived {} genesis hash does not match its recorded constant",
            self.network
        );
        assert_eq!(
            self.genesis.merkle_root, GENESIS_MERKLE_ROOT,
            "derived {} genesis merkle root does not match its recorded constant",
            self.network
        );

        let raw = hex::decode(&hash).unwrap_or_default();
        assert!(
            meets_difficulty(&raw, POW_LIMIT_BITS),
            "{} genesis hash does not satisfy the proof-of-work limit",
            self.network
        );

        self.genesis_hash = hash;
    }
}

/// Decode and curve-validate an alert public key. The keys are compiled in,
/// so a failure here is a build defect.
fn decode_alert_key(hex_key: &str) -> Vec<u8> {
    let bytes = hex::decode(hex_key).expect("alert key is not valid hex");
    PublicKey::from_slice(&bytes).expect("alert key is not a valid secp256k1 point");
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_genesis_matches_recorded_constants() {
        let params = ChainParams::main();
        assert_eq!(params.genesis_hash, MAIN_GENESIS_HASH);
        assert_eq!(params.genesis.hash(), MAIN_GENESIS_HASH);
        assert_eq!(params.genesis.merkle_root, GENESIS_MERKLE_ROOT);
    }

    #[test]
    fn test_testnet_genesis_matches_recorded_constants() {
        let params = ChainParams::testnet();
        assert_eq!(params.genesis_hash, TESTNET_GENESIS_HASH);
        assert_eq!(params.genesis.merkle_root, GENESIS_MERKLE_ROOT);
    }

    #[test]
    fn test_regtest_genesis_matches_recorded_constants() {
        let params = ChainParams::regtest();
        assert_eq!(params.genesis_hash, REGTEST_GENESIS_HASH);
        assert_eq!(params.genesis.merkle_root, GENESIS_MERKLE_ROOT);
    }

    #[test]
    fn test_genesis_hashes_meet_pow_limit() {
        for network in [Network::Main, Network::Testnet, Network::Regtest] {
            let params = ChainParams::for_network(network);
            let raw = hex::decode(&params.genesis_hash).unwrap();
            assert!(meets_difficulty(&raw, POW_LIMIT_BITS), "{}", network);
        }
    }

    #[test]
    fn test_profiles_are_distinct() {
        let main = ChainParams::main();
        let testnet = ChainParams::testnet();
        let regtest = ChainParams::regtest();

        assert_ne!(main.message_magic, testnet.message_magic);
        assert_ne!(testnet.message_magic, regtest.message_magic);
        assert_ne!(main.genesis_hash, testnet.genesis_hash);
        assert_ne!(testnet.genesis_hash, regtest.genesis_hash);
        assert_ne!(main.default_port, testnet.default_port);
    }

    #[test]
    fn test_testnet_overrides_and_inheritance() {
        let main = ChainParams::main();
        let testnet = ChainParams::testnet();

        // Overridden
        assert_eq!(testnet.default_port, 21817);
        assert_eq!(testnet.rpc_port, 21818);
        assert_eq!(testnet.data_dir, "testnet");
        assert_eq!(testnet.pubkey_address_version, 102);
        assert_eq!(testnet.script_address_version, 44);
        assert_eq!(testnet.secret_key_version, 216);
        assert_eq!(testnet.dns_seeds.len(), 1);
        assert_ne!(testnet.alert_key, main.alert_key);

        // Inherited from Main
        assert_eq!(testnet.pow_limit, main.pow_limit);
        assert_eq!(
            testnet.subsidy_halving_interval,
            main.subsidy_halving_interval
        );
        assert_eq!(testnet.genesis.bits, main.genesis.bits);
        assert!(testnet.require_rpc_password);
    }

    #[test]
    fn test_regtest_overrides_and_inheritance() {
        let testnet = ChainParams::testnet();
        let regtest = ChainParams::regtest();

        // Overridden
        assert_eq!(regtest.subsidy_halving_interval, 150);
        assert_eq!(regtest.default_port, 18444);
        assert_eq!(regtest.data_dir, "regtest");
        assert_eq!(regtest.genesis.bits, 0x207fffff);
        assert!(regtest.dns_seeds.is_empty());
        assert!(regtest.fixed_seeds.is_empty());
        assert!(!regtest.require_rpc_password);

        // Inherited from Testnet
        assert_eq!(regtest.rpc_port, testnet.rpc_port);
        assert_eq!(
            regtest.pubkey_address_version,
            testnet.pubkey_address_version
        );
        assert_eq!(regtest.alert_key, testnet.alert_key);
    }

    #[test]
    fn test_alert_keys_are_valid_points() {
        // decode_alert_key panics on an invalid key, so construction
        // succeeding is the assertion
        let main = ChainParams::main();
        assert_eq!(main.alert_key.len(), 65);
        assert_eq!(main.alert_key[0], 0x04);
    }

    #[test]
    fn test_install_fixed_seeds() {
        let mut params = ChainParams::main();
        let addrs: Vec<SocketAddr> = vec!["10.0.0.1:55675".parse().unwrap()];
        let now = 1_700_000_000;

        params.install_fixed_seeds(&addrs, now);

        assert_eq!(params.fixed_seeds.len(), 1);
        assert!(params.fixed_seeds[0].last_seen < now);
    }

    #[test]
    fn test_network_ids_round_trip() {
        for network in [Network::Main, Network::Testnet, Network::Regtest] {
            assert_eq!(Network::from_id(network.id()), network);
        }
    }

    #[test]
    #[should_panic(expected = "unknown network id")]
    fn test_unknown_network_id_panics() {
        Network::from_id(7);
    }
}
