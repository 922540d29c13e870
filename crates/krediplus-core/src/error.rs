use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KrediError {
    #[error("Invalid argument: {field} — {reason}")]
    InvalidArgument { field: String, reason: String },

    #[error("Invalid simulator configuration: {field} — {reason}")]
    InvalidConfig { field: String, reason: String },

    #[error("Amount {amount} is outside the allowed range [{min}, {max}]")]
    AmountOutOfRange {
        amount: Decimal,
        min: Decimal,
        max: Decimal,
    },

    #[error("Term of {term} months is not offered (available: {available:?})")]
    TermNotAvailable { term: u32, available: Vec<u32> },

    #[error("Simulator configuration {0} not found")]
    ConfigNotFound(u64),

    #[error("No active simulator configuration; activate one first")]
    NoActiveConfig,

    #[error("Simulator configuration {0} is active and cannot be deleted; activate another one first")]
    ActiveConfigDeletion(u64),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for KrediError {
    fn from(e: serde_json::Error) -> Self {
        KrediError::SerializationError(e.to_string())
    }
}
