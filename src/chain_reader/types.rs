use ethers::types::{Address, U256, U64};

/// Balance of an address discovered through the wallet session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressRecord {
    pub address: Address,
    pub balance_wei: U256,
}

/// Chain state at one instant: the latest block and the gas price read right after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSnapshot {
    pub number: U64,
    pub timestamp_seconds: u64,
    pub gas_price_wei: U256,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BytecodeCheck {
    /// The target is not a well-formed address; nothing was queried.
    InvalidAddress(String),
    Checked { address: String, has_code: bool },
    /// The query for this target failed; the remaining targets are still checked.
    Failed { address: String, reason: String },
}
