use async_trait::async_trait;
use ethers::{
    providers::{Http, JsonRpcClient, Provider, ProviderError},
    types::Address,
};

use crate::{errors::DiagnosticError, network::NetworkDescriptor};

/// Identity the session presents to the wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletOptions {
    pub app_name: String,
    pub dark_mode: bool,
    pub override_is_metamask: bool,
    pub override_is_coinbase_wallet: bool,
}

impl Default for WalletOptions {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_owned(),
            dark_mode: false,
            override_is_metamask: false,
            override_is_coinbase_wallet: true,
        }
    }
}

/// Whether the process can drive an interactive wallet connection.
/// Decided once by the caller; discovery never probes the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryMode {
    Interactive,
    Headless,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discovery {
    Found(Vec<Address>),
    Skipped,
    Failed(String),
}

impl Discovery {
    pub fn addresses(&self) -> &[Address] {
        match self {
            Discovery::Found(addresses) => addresses,
            Discovery::Skipped | Discovery::Failed(_) => &[],
        }
    }
}

/// Account discovery exposed by a wallet endpoint.
#[async_trait]
pub trait AddressDiscovery: Sync {
    async fn request_addresses(&self) -> Result<Vec<Address>, ProviderError>;
}

#[async_trait]
impl<P: JsonRpcClient> AddressDiscovery for Provider<P> {
    async fn request_addresses(&self) -> Result<Vec<Address>, ProviderError> {
        self.request("eth_requestAccounts", ()).await
    }
}

/// Wallet-backed client, independent from the read-only chain reader.
pub struct WalletSession<D> {
    pub chain_id: u64,
    pub options: WalletOptions,
    wallet: D,
}

impl WalletSession<Provider<Http>> {
    /// Binds a provider to `wallet_url`, or to the network RPC when no wallet
    /// bridge is given. Nothing is sent over the wire here.
    pub fn create(
        network: &NetworkDescriptor,
        wallet_url: Option<&str>,
        options: WalletOptions,
    ) -> Result<Self, DiagnosticError> {
        let url = wallet_url.unwrap_or(network.rpc_url);
        let provider = Provider::<Http>::try_from(url)
            .map_err(|e| DiagnosticError::CustomError(format!("invalid wallet url {url}: {e}")))?;
        log::debug!(
            "wallet session for {app} on chain {chain_id} via {url} (dark mode: {dark}, metamask: {mm}, coinbase wallet: {cb})",
            app = options.app_name,
            chain_id = network.chain_id,
            dark = options.dark_mode,
            mm = options.override_is_metamask,
            cb = options.override_is_coinbase_wallet,
        );
        Ok(Self::with_wallet(network, provider, options))
    }
}

impl<D: AddressDiscovery> WalletSession<D> {
    pub fn with_wallet(network: &NetworkDescriptor, wallet: D, options: WalletOptions) -> Self {
        Self {
            chain_id: network.chain_id,
            options,
            wallet,
        }
    }

    pub fn wallet(&self) -> &D {
        &self.wallet
    }

    /// Never fails: headless runs skip discovery, and wallet errors become
    /// [`Discovery::Failed`].
    pub async fn discover_addresses(&self, mode: DiscoveryMode) -> Discovery {
        if mode == DiscoveryMode::Headless {
            return Discovery::Skipped;
        }
        match self.wallet.request_addresses().await {
            Ok(addresses) => Discovery::Found(addresses),
            Err(e) => {
                log::warn!("wallet discovery failed: {e}");
                Discovery::Failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::BASE_MAINNET;

    #[test]
    fn test_create_session_does_not_touch_the_network() {
        let session =
            WalletSession::create(&BASE_MAINNET, None, WalletOptions::default()).unwrap();

        assert_eq!(session.chain_id, 8453);
        assert!(session.options.override_is_coinbase_wallet);
        assert!(!session.options.override_is_metamask);
    }

    #[test]
    fn test_create_session_rejects_bad_wallet_url() {
        let result = WalletSession::create(
            &BASE_MAINNET,
            Some("not a url"),
            WalletOptions::default(),
        );
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_headless_discovery_never_asks_the_wallet() {
        let (provider, mock) = Provider::mocked();
        let session = WalletSession::with_wallet(&BASE_MAINNET, provider, WalletOptions::default());

        let discovery = session.discover_addresses(DiscoveryMode::Headless).await;

        assert_eq!(discovery, Discovery::Skipped);
        assert!(discovery.addresses().is_empty());
        assert!(mock.assert_request("eth_requestAccounts", ()).is_err());
    }

    #[tokio::test]
    async fn test_interactive_discovery_returns_accounts() {
        let (provider, mock) = Provider::mocked();
        let account: Address = "0x4200000000000000000000000000000000000006"
            .parse()
            .unwrap();
        mock.push::<Vec<Address>, _>(vec![account]).unwrap();
        let session = WalletSession::with_wallet(&BASE_MAINNET, provider, WalletOptions::default());

        let discovery = session.discover_addresses(DiscoveryMode::Interactive).await;

        assert_eq!(discovery.addresses(), [account]);
    }

    #[tokio::test]
    async fn test_interactive_discovery_failure_is_contained() {
        let (provider, _mock) = Provider::mocked();
        let session = WalletSession::with_wallet(&BASE_MAINNET, provider, WalletOptions::default());

        let discovery = session.discover_addresses(DiscoveryMode::Interactive).await;

        assert!(matches!(discovery, Discovery::Failed(_)));
        assert!(discovery.addresses().is_empty());
    }
}
