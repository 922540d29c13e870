pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "simulator")]
pub mod simulator;

pub use error::KrediError;
pub use types::*;

/// Standard result type for all KrediPlus operations
pub type KrediResult<T> = Result<T, KrediError>;
