//! Interzone node startup
//!
//! Selects the network profile from command-line flags, applies checkpoint
//! and seed configuration, and prints the active profile summary.

use chrono::Utc;
use clap::Parser;
use interzone_chain::chain::{load_fixed_seeds, ChainContext};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "interzoned")]
#[command(version = "0.1.0")]
#[command(about = "Interzone full node", long_about = None)]
struct Cli {
    /// Use the public test chain
    #[arg(long)]
    testnet: bool,

    /// Use the private regression-test chain
    #[arg(long)]
    regtest: bool,

    /// Disable checkpoint enforcement (accepts any historical chain)
    #[arg(long)]
    no_checkpoints: bool,

    /// JSON file with fixed seed addresses ("ip:port" strings)
    #[arg(long)]
    seeds: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let mut context = ChainContext::new();

    if !context.select_from_flags(cli.regtest, cli.testnet) {
        eprintln!("Error: --testnet and --regtest are mutually exclusive");
        std::process::exit(1);
    }

    if cli.no_checkpoints {
        context.set_checkpoints_enforced(false);
    }

    if let Some(path) = &cli.seeds {
        match load_fixed_seeds(path) {
            Ok(addrs) => {
                let network = context.network();
                context.install_fixed_seeds(network, &addrs, Utc::now().timestamp());
            }
            Err(err) => {
                eprintln!("Error loading seed file {}: {}", path.display(), err);
                std::process::exit(1);
            }
        }
    }

    let params = context.active_params();
    println!("Network:          {}", params.network);
    println!("Message magic:    {}", hex::encode(params.message_magic));
    println!("P2P port:         {}", params.default_port);
    println!("RPC port:         {}", params.rpc_port);
    println!("Halving interval: {}", params.subsidy_halving_interval);
    println!("Genesis hash:     {}", params.genesis_hash);
    println!("DNS seeds:        {}", params.dns_seeds.len());
    println!("Fixed seeds:      {}", params.fixed_seeds.len());
    println!("Checkpoints:      {}", context.checkpoints().len());
    println!("Blocks estimate:  {}", context.total_blocks_estimate());
}
