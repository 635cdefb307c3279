use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;
use base_probe::{
    network::BASE_MAINNET,
    report::Report,
    targets::TargetLoad,
    wallet::{AddressDiscovery, WalletOptions, WalletSession},
    ChainReader, DiagnosticError, Diagnostics,
};
use ethers::{
    providers::ProviderError,
    types::{Address, Bytes, U256, U64},
};

pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";
pub const WETH: &str = "0x4200000000000000000000000000000000000006";
pub const SHORT_ADDRESS: &str = "0xAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

fn failure(method: &str) -> ProviderError {
    ProviderError::CustomError(format!("{method} unavailable"))
}

/// Canned JSON-RPC answers. Every call is recorded as `method` or `method:address`.
pub struct StubChain {
    pub chain_id: Result<Option<String>, String>,
    pub chain_id_delay: Option<Duration>,
    pub balances: HashMap<Address, U256>,
    pub block_number: U64,
    pub timestamp: Option<U256>,
    pub gas_price: Option<U256>,
    pub code: HashMap<Address, Bytes>,
    pub failing_code: Vec<Address>,
    pub(crate) calls: Mutex<Vec<String>>,
}

impl Default for StubChain {
    fn default() -> Self {
        Self {
            chain_id: Ok(Some("0x2105".to_owned())),
            chain_id_delay: None,
            balances: HashMap::new(),
            block_number: U64::from(100_u64),
            timestamp: Some(U256::from(1_700_000_000_u64)),
            gas_price: Some(U256::from(2_000_000_000_u64)),
            code: HashMap::new(),
            failing_code: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl StubChain {
    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChainReader for StubChain {
    async fn raw_chain_id(&self) -> Result<Option<String>, ProviderError> {
        self.record("eth_chainId".to_owned());
        if let Some(delay) = self.chain_id_delay {
            tokio::time::sleep(delay).await;
        }
        self.chain_id.clone().map_err(ProviderError::CustomError)
    }

    async fn balance(&self, address: Address) -> Result<U256, ProviderError> {
        self.record(format!("eth_getBalance:{address:?}"));
        self.balances
            .get(&address)
            .copied()
            .ok_or_else(|| failure("eth_getBalance"))
    }

    async fn latest_block_number(&self) -> Result<U64, ProviderError> {
        self.record("eth_blockNumber".to_owned());
        Ok(self.block_number)
    }

    async fn block_timestamp(&self, number: U64) -> Result<Option<U256>, ProviderError> {
        self.record(format!("eth_getBlockByNumber:{number}"));
        Ok(self.timestamp)
    }

    async fn gas_price(&self) -> Result<U256, ProviderError> {
        self.record("eth_gasPrice".to_owned());
        self.gas_price.ok_or_else(|| failure("eth_gasPrice"))
    }

    async fn code_at(&self, address: Address) -> Result<Bytes, ProviderError> {
        self.record(format!("eth_getCode:{address:?}"));
        if self.failing_code.contains(&address) {
            return Err(failure("eth_getCode"));
        }
        Ok(self.code.get(&address).cloned().unwrap_or_default())
    }
}

/// Wallet that either hands out fixed accounts or refuses the connection.
pub struct StubWallet {
    pub accounts: Result<Vec<Address>, String>,
    asked: AtomicBool,
}

impl StubWallet {
    pub fn with_accounts(accounts: Vec<Address>) -> Self {
        Self {
            accounts: Ok(accounts),
            asked: AtomicBool::new(false),
        }
    }

    pub fn refusing() -> Self {
        Self {
            accounts: Err("user rejected the request".to_owned()),
            asked: AtomicBool::new(false),
        }
    }

    pub fn was_asked(&self) -> bool {
        self.asked.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AddressDiscovery for StubWallet {
    async fn request_addresses(&self) -> Result<Vec<Address>, ProviderError> {
        self.asked.store(true, Ordering::SeqCst);
        self.accounts.clone().map_err(ProviderError::CustomError)
    }
}

pub fn targets(list: &[&str]) -> TargetLoad {
    TargetLoad::Configured(list.iter().map(|t| (*t).to_owned()).collect())
}

pub fn diagnostics(
    chain: StubChain,
    wallet: StubWallet,
    targets: TargetLoad,
) -> Diagnostics<'static, StubChain, StubWallet> {
    let session = WalletSession::with_wallet(&BASE_MAINNET, wallet, WalletOptions::default());
    Diagnostics::new(&BASE_MAINNET, chain, session, targets)
}

pub async fn run(
    diagnostics: &Diagnostics<'static, StubChain, StubWallet>,
) -> (Result<(), DiagnosticError>, String) {
    let mut report = Report::new(&BASE_MAINNET, Vec::new());
    let result = diagnostics.run(&mut report).await;
    let output = String::from_utf8(report.into_inner()).unwrap();
    (result, output)
}
