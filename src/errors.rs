use ethers::{providers::ProviderError, types::U64};
use std::time::Duration;

#[derive(thiserror::Error, Debug)]
pub enum DiagnosticError {
    #[error("Provider error: {0}")]
    ProviderError(#[from] ProviderError),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("block {0} was not returned by the endpoint")]
    MissingBlock(U64),
    #[error("{field} does not fit in 64 bits")]
    OutOfRange { field: &'static str },
    #[error("{0}")]
    CustomError(String),
}
