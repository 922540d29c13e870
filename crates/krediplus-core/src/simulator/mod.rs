//! Credit simulator: the annuity calculation, the policy that bounds it and
//! the official quote built from both.

pub mod amortization;
pub mod config;
pub mod quote;

#[cfg(feature = "registry")]
pub mod registry;

pub use amortization::{simulate, SimulationInput, SimulationResult};
pub use config::{ConfigPatch, SimulatorConfig};
pub use quote::{quote, validate_parameters, SimulationQuote, SimulationRequest, ValidationReport};

#[cfg(feature = "registry")]
pub use registry::ConfigRegistry;
