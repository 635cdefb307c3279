use clap::Parser;
use ethers::providers::{Http, Provider};
use std::{io, path::PathBuf, time::Duration};

use crate::{
    network::BASE_MAINNET,
    pipeline::{Diagnostics, FailurePolicy},
    report::Report,
    targets::{load_targets, DEFAULT_TARGETS_PATH},
    wallet::{DiscoveryMode, WalletOptions, WalletSession},
};

pub const VERSION_STRING: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "base-probe", author, version = VERSION_STRING, about, long_about = None)]
pub struct BaseProbe {
    /// JSON document with a `targets` list of addresses to check for bytecode.
    #[clap(long, default_value = DEFAULT_TARGETS_PATH, value_name = "PATH")]
    pub targets: PathBuf,
    /// Ask the wallet for its accounts. Leave unset for headless runs.
    #[clap(long)]
    pub interactive: bool,
    /// JSON-RPC endpoint of the wallet bridge. Defaults to the network RPC.
    #[clap(long, value_name = "URL")]
    pub wallet_url: Option<String>,
    /// Report failed balance, block and gas reads instead of aborting.
    #[clap(long)]
    pub keep_going: bool,
    /// Seconds to wait for the `eth_chainId` liveness check.
    #[clap(long, default_value = "10", value_name = "SECONDS")]
    pub health_timeout: u64,
}

impl BaseProbe {
    fn discovery_mode(&self) -> DiscoveryMode {
        if self.interactive {
            DiscoveryMode::Interactive
        } else {
            DiscoveryMode::Headless
        }
    }

    fn failure_policy(&self) -> FailurePolicy {
        if self.keep_going {
            FailurePolicy::Lenient
        } else {
            FailurePolicy::Strict
        }
    }
}

pub async fn start() -> anyhow::Result<()> {
    let args = BaseProbe::parse();
    let network = &BASE_MAINNET;

    let targets = load_targets(&args.targets);
    let wallet = WalletSession::create(network, args.wallet_url.as_deref(), WalletOptions::default())?;
    let reader = Provider::<Http>::try_from(network.rpc_url)?;

    let diagnostics = Diagnostics::new(network, reader, wallet, targets)
        .mode(args.discovery_mode())
        .policy(args.failure_policy())
        .health_timeout(Duration::from_secs(args.health_timeout));

    let stdout = io::stdout();
    let mut report = Report::new(network, stdout.lock());
    diagnostics.run(&mut report).await?;
    Ok(())
}
