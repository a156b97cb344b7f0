//! Errors raised by the mining core

/// Errors that can occur while mining itemsets or deriving rules.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MiningError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Item universe contains no items")]
    EmptyUniverse,
}

impl MiningError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        MiningError::InvalidInput(message.into())
    }
}
