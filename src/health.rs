use std::time::Duration;

use crate::{chain_reader::ChainReader, errors::DiagnosticError};

pub const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(10);

/// One `eth_chainId` round-trip bounded by `timeout`. The raw value is
/// returned untouched; `None` means the node answered with `null`.
pub async fn check_health<R>(reader: &R, timeout: Duration) -> Result<Option<String>, DiagnosticError>
where
    R: ChainReader + ?Sized,
{
    match tokio::time::timeout(timeout, reader.raw_chain_id()).await {
        Ok(reported) => Ok(reported?),
        Err(_elapsed) => Err(DiagnosticError::Timeout(timeout)),
    }
}

/// Decodes a hex chain id such as `0x2105`.
pub fn parse_chain_id(raw: &str) -> Option<u64> {
    let digits = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X"))?;
    u64::from_str_radix(digits, 16).ok()
}
