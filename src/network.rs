/// Static description of the chain this tool talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkDescriptor {
    pub name: &'static str,
    pub chain_id: u64,
    pub rpc_url: &'static str,
    pub explorer_url: &'static str,
}

pub const BASE_MAINNET: NetworkDescriptor = NetworkDescriptor {
    name: "Base Mainnet",
    chain_id: 8453,
    rpc_url: "https://mainnet.base.org",
    explorer_url: "https://basescan.org",
};

impl NetworkDescriptor {
    pub fn address_link(&self, address: &str) -> String {
        format!("{base}/address/{address}", base = self.explorer_url)
    }

    pub fn code_link(&self, address: &str) -> String {
        format!("{base}/address/{address}#code", base = self.explorer_url)
    }

    pub fn block_link(&self, number: impl std::fmt::Display) -> String {
        format!("{base}/block/{number}", base = self.explorer_url)
    }
}
