use async_trait::async_trait;
use ethers::{
    providers::{JsonRpcClient, Middleware, Provider, ProviderError},
    types::{Address, BlockId, BlockNumber, Bytes, U256, U64},
};

use crate::{errors::DiagnosticError, units::parse_address};

pub mod types;
use types::{AddressRecord, BlockSnapshot, BytecodeCheck};

/// Read-only JSON-RPC calls the diagnostics need from an Ethereum node.
#[async_trait]
pub trait ChainReader: Sync {
    /// Returns the `eth_chainId` result exactly as the node reported it.
    async fn raw_chain_id(&self) -> Result<Option<String>, ProviderError>;

    async fn balance(&self, address: Address) -> Result<U256, ProviderError>;

    async fn latest_block_number(&self) -> Result<U64, ProviderError>;

    /// Returns the timestamp of the block with the given number, if the node knows it.
    async fn block_timestamp(&self, number: U64) -> Result<Option<U256>, ProviderError>;

    async fn gas_price(&self) -> Result<U256, ProviderError>;

    async fn code_at(&self, address: Address) -> Result<Bytes, ProviderError>;
}

#[async_trait]
impl<P: JsonRpcClient> ChainReader for Provider<P> {
    async fn raw_chain_id(&self) -> Result<Option<String>, ProviderError> {
        self.request("eth_chainId", ()).await
    }

    async fn balance(&self, address: Address) -> Result<U256, ProviderError> {
        self.get_balance(address, None).await
    }

    async fn latest_block_number(&self) -> Result<U64, ProviderError> {
        self.get_block_number().await
    }

    async fn block_timestamp(&self, number: U64) -> Result<Option<U256>, ProviderError> {
        let block = self
            .get_block(BlockId::Number(BlockNumber::Number(number)))
            .await?;
        Ok(block.map(|b| b.timestamp))
    }

    async fn gas_price(&self) -> Result<U256, ProviderError> {
        self.get_gas_price().await
    }

    async fn code_at(&self, address: Address) -> Result<Bytes, ProviderError> {
        self.get_code(address, None).await
    }
}

/// `eth_getCode` answers `0x` for plain accounts.
pub fn has_bytecode(code: &Bytes) -> bool {
    !code.is_empty()
}

pub async fn address_record<R>(reader: &R, address: Address) -> Result<AddressRecord, DiagnosticError>
where
    R: ChainReader + ?Sized,
{
    let balance_wei = reader.balance(address).await?;
    Ok(AddressRecord {
        address,
        balance_wei,
    })
}

/// Reads the latest block number, then that same block, then the gas price.
/// The chain may have moved on by the time the block arrives; only the
/// requested number is guaranteed to match.
pub async fn block_snapshot<R>(reader: &R) -> Result<BlockSnapshot, DiagnosticError>
where
    R: ChainReader + ?Sized,
{
    let number = reader.latest_block_number().await?;
    let timestamp = reader
        .block_timestamp(number)
        .await?
        .ok_or(DiagnosticError::MissingBlock(number))?;
    if timestamp > U256::from(u64::MAX) {
        return Err(DiagnosticError::OutOfRange {
            field: "block timestamp",
        });
    }
    let gas_price_wei = reader.gas_price().await?;

    Ok(BlockSnapshot {
        number,
        timestamp_seconds: timestamp.low_u64(),
        gas_price_wei,
    })
}

/// Checks one target. Malformed targets never reach the node, and a failed
/// query is reported for this target only.
pub async fn check_bytecode<R>(reader: &R, target: &str) -> BytecodeCheck
where
    R: ChainReader + ?Sized,
{
    let Some(address) = parse_address(target) else {
        return BytecodeCheck::InvalidAddress(target.to_owned());
    };

    match reader.code_at(address).await {
        Ok(code) => BytecodeCheck::Checked {
            address: target.to_owned(),
            has_code: has_bytecode(&code),
        },
        Err(e) => {
            log::warn!("eth_getCode failed for {target}: {e}");
            BytecodeCheck::Failed {
                address: target.to_owned(),
                reason: e.to_string(),
            }
        }
    }
}
