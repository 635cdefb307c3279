use chrono::Utc;
use std::{io::Write, time::Duration};

use crate::{
    chain_reader::{address_record, block_snapshot, check_bytecode, ChainReader},
    errors::DiagnosticError,
    health::{check_health, HEALTH_CHECK_TIMEOUT},
    network::NetworkDescriptor,
    report::Report,
    targets::TargetLoad,
    units::checksummed,
    wallet::{AddressDiscovery, DiscoveryMode, WalletSession},
};

/// What to do when a balance, block or gas price read fails.
/// Health and wallet problems are always reported inline, and bytecode
/// checks are contained per target, whatever the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Abort the run with the error.
    #[default]
    Strict,
    /// Print the failure and move on to the next stage.
    Lenient,
}

pub struct Diagnostics<'net, R, D> {
    pub network: &'net NetworkDescriptor,
    pub reader: R,
    pub wallet: WalletSession<D>,
    pub targets: TargetLoad,
    pub mode: DiscoveryMode,
    pub policy: FailurePolicy,
    pub health_timeout: Duration,
}

impl<'net, R, D> Diagnostics<'net, R, D>
where
    R: ChainReader,
    D: AddressDiscovery,
{
    pub fn new(
        network: &'net NetworkDescriptor,
        reader: R,
        wallet: WalletSession<D>,
        targets: TargetLoad,
    ) -> Self {
        Self {
            network,
            reader,
            wallet,
            targets,
            mode: DiscoveryMode::Headless,
            policy: FailurePolicy::default(),
            health_timeout: HEALTH_CHECK_TIMEOUT,
        }
    }

    pub fn mode(mut self, mode: DiscoveryMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = timeout;
        self
    }

    /// Runs every stage in order, one request in flight at a time.
    pub async fn run<W: Write>(&self, report: &mut Report<'_, W>) -> Result<(), DiagnosticError> {
        log::debug!("running diagnostics against {}", self.network.name);
        report.banner();

        let health = check_health(&self.reader, self.health_timeout).await;
        report.health(&health);

        report.targets_loaded(self.targets.targets().len());

        let discovery = self.wallet.discover_addresses(self.mode).await;
        report.discovery(&discovery);

        if !discovery.addresses().is_empty() {
            report.balances_header();
            for address in discovery.addresses() {
                match address_record(&self.reader, *address).await {
                    Ok(record) => report.balance(&record),
                    Err(e) if self.policy == FailurePolicy::Strict => return Err(e),
                    Err(e) => {
                        log::warn!("continuing after failed balance read: {e}");
                        report.balance_failed(&checksummed(address), &e);
                    }
                }
            }
            report.section_end();
        }

        match block_snapshot(&self.reader).await {
            Ok(snapshot) => report.block_and_gas(&snapshot),
            Err(e) if self.policy == FailurePolicy::Strict => return Err(e),
            Err(e) => {
                log::warn!("continuing after failed block and gas read: {e}");
                report.block_and_gas_failed(&e);
            }
        }

        report.bytecode_header();
        for target in self.targets.targets() {
            let check = check_bytecode(&self.reader, target).await;
            report.bytecode(&check);
        }
        report.section_end();

        report.completed(Utc::now());
        Ok(())
    }
}
