use chrono::{DateTime, SecondsFormat, Utc};
use std::io::Write;

use crate::{
    chain_reader::types::{AddressRecord, BlockSnapshot, BytecodeCheck},
    errors::DiagnosticError,
    health::parse_chain_id,
    network::NetworkDescriptor,
    units::{checksummed, format_ether_exact, format_gwei_approx, short_address},
    wallet::Discovery,
};

const BANNER: &str = "Built for Base";
const NULL: &str = "null";

/// Human-readable report writer. Output errors are dropped so that
/// reporting can never stop the diagnostics.
pub struct Report<'net, W: Write> {
    network: &'net NetworkDescriptor,
    out: W,
}

pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn timestamp_from_seconds(seconds: u64) -> String {
    i64::try_from(seconds)
        .ok()
        .and_then(|s| DateTime::from_timestamp(s, 0))
        .map(iso_timestamp)
        .unwrap_or_else(|| NULL.to_owned())
}

impl<'net, W: Write> Report<'net, W> {
    pub fn new(network: &'net NetworkDescriptor, out: W) -> Self {
        Self { network, out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: impl AsRef<str>) {
        let _ = writeln!(self.out, "{}", text.as_ref());
    }

    fn blank(&mut self) {
        self.line("");
    }

    pub fn banner(&mut self) {
        let network = self.network;
        self.line(BANNER);
        self.line(format!("Network: {}", network.name));
        self.line(format!("chainId (decimal): {}", network.chain_id));
        self.line(format!("Explorer: {}", network.explorer_url));
        self.line(format!("RPC: {}", network.rpc_url));
        self.blank();
    }

    pub fn health(&mut self, result: &Result<Option<String>, DiagnosticError>) {
        self.line("RPC quick check:");
        match result {
            Ok(reported) => {
                self.line(format!("- eth_chainId: {}", reported.as_deref().unwrap_or(NULL)));
                let expected = self.network.chain_id;
                if let Some(actual) = reported.as_deref().and_then(parse_chain_id) {
                    if actual != expected {
                        self.line(format!(
                            "  warning: endpoint reports chain {actual}, expected {expected}"
                        ));
                    }
                }
            }
            Err(e) => self.line(format!("- rpc check failed: {e}")),
        }
        self.blank();
    }

    pub fn targets_loaded(&mut self, count: usize) {
        self.line(format!("Targets loaded: {count}"));
        self.blank();
    }

    pub fn discovery(&mut self, discovery: &Discovery) {
        match discovery {
            Discovery::Found(addresses) => {
                self.line(format!("Wallet addresses discovered: {}", addresses.len()));
            }
            Discovery::Skipped => {
                self.line("Wallet discovery note: wallet connection requires an interactive session.");
                self.line("Continuing with RPC-only reads.");
            }
            Discovery::Failed(_) => {
                self.line("Wallet discovery failed, continuing with RPC-only reads.");
            }
        }
        self.blank();
    }

    pub fn balances_header(&mut self) {
        self.line("Balances:");
    }

    pub fn balance(&mut self, record: &AddressRecord) {
        let address = checksummed(&record.address);
        self.line(format!(
            "- {}: {} ETH",
            short_address(&address),
            format_ether_exact(record.balance_wei)
        ));
        self.line(format!("  {}", self.network.address_link(&address)));
    }

    pub fn balance_failed(&mut self, address: &str, error: &DiagnosticError) {
        self.line(format!("- {}: balance unavailable ({error})", short_address(address)));
    }

    pub fn section_end(&mut self) {
        self.blank();
    }

    pub fn block_and_gas(&mut self, snapshot: &BlockSnapshot) {
        self.line("Block and gas:");
        self.line(format!("- Latest block: {}", snapshot.number));
        self.line(format!("  {}", self.network.block_link(snapshot.number)));
        self.line(format!(
            "- Timestamp: {}",
            timestamp_from_seconds(snapshot.timestamp_seconds)
        ));
        self.line(format!(
            "- Gas price (gwei approx): {}",
            format_gwei_approx(snapshot.gas_price_wei)
        ));
        self.blank();
    }

    pub fn block_and_gas_failed(&mut self, error: &DiagnosticError) {
        self.line("Block and gas:");
        self.line(format!("- block and gas unavailable: {error}"));
        self.blank();
    }

    pub fn bytecode_header(&mut self) {
        self.line("Bytecode checks:");
    }

    pub fn bytecode(&mut self, check: &BytecodeCheck) {
        match check {
            BytecodeCheck::InvalidAddress(target) => {
                self.line(format!("- invalid address skipped: {target}"));
            }
            BytecodeCheck::Checked { address, has_code } => {
                let verdict = if *has_code {
                    "bytecode found"
                } else {
                    "no bytecode"
                };
                self.line(format!("- {}: {verdict}", short_address(address)));
                self.line(format!("  {}", self.network.code_link(address)));
            }
            BytecodeCheck::Failed { address, reason } => {
                self.line(format!(
                    "- {}: bytecode check failed: {reason}",
                    short_address(address)
                ));
            }
        }
    }

    pub fn completed(&mut self, at: DateTime<Utc>) {
        self.line(format!("Run complete: {}", iso_timestamp(at)));
    }
}
