use clap::{Args, Subcommand};
use rust_decimal::Decimal;
use serde_json::Value;

use krediplus_core::simulator::{ConfigPatch, ConfigRegistry, SimulatorConfig};

use crate::store;

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// List every saved configuration
    List,
    /// Show the active configuration
    Show,
    /// Create a new configuration
    Create(CreateArgs),
    /// Update fields of an existing configuration
    Update(UpdateArgs),
    /// Make a configuration the only active one
    Activate {
        /// Configuration id
        id: u64,
    },
    /// Delete an inactive configuration
    Delete {
        /// Configuration id
        id: u64,
    },
}

/// Arguments for creating a configuration
#[derive(Args)]
pub struct CreateArgs {
    /// Monthly interest rate as a percentage (1.3 = 1.3%)
    #[arg(long)]
    pub rate: Decimal,

    /// Minimum loan amount
    #[arg(long)]
    pub min: Decimal,

    /// Maximum loan amount
    #[arg(long)]
    pub max: Decimal,

    /// Offered terms in months, comma separated (e.g. 6,12,24)
    #[arg(long, value_delimiter = ',', required = true)]
    pub terms: Vec<u32>,

    /// Activate the new configuration immediately
    #[arg(long)]
    pub activate: bool,
}

/// Arguments for updating a configuration
#[derive(Args)]
pub struct UpdateArgs {
    /// Configuration id
    pub id: u64,

    /// Monthly interest rate as a percentage
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Minimum loan amount
    #[arg(long)]
    pub min: Option<Decimal>,

    /// Maximum loan amount
    #[arg(long)]
    pub max: Option<Decimal>,

    /// Offered terms in months, comma separated
    #[arg(long, value_delimiter = ',')]
    pub terms: Option<Vec<u32>>,
}

pub fn run_config(cmd: ConfigCommand, store_path: Option<&str>) -> Result<Value, Box<dyn std::error::Error>> {
    let mut registry = store::load_registry(store_path)?;
    let (value, changed) = apply(&mut registry, cmd)?;
    if changed {
        store::save_registry(store_path, &registry)?;
    }
    Ok(value)
}

/// Run one command against the registry; reports whether it was mutated.
fn apply(registry: &mut ConfigRegistry, cmd: ConfigCommand) -> Result<(Value, bool), Box<dyn std::error::Error>> {
    let outcome = match cmd {
        ConfigCommand::List => (serde_json::to_value(registry.list())?, false),
        ConfigCommand::Show => (serde_json::to_value(registry.active()?)?, false),
        ConfigCommand::Create(args) => {
            let mut config = SimulatorConfig::new(args.rate, args.min, args.max, args.terms);
            config.is_active = args.activate;
            (serde_json::to_value(registry.create(config)?)?, true)
        }
        ConfigCommand::Update(args) => {
            let patch = ConfigPatch {
                monthly_rate_pct: args.rate,
                min_amount: args.min,
                max_amount: args.max,
                available_terms: args.terms,
            };
            (serde_json::to_value(registry.modify(args.id, &patch)?)?, true)
        }
        ConfigCommand::Activate { id } => (serde_json::to_value(registry.activate(id)?)?, true),
        ConfigCommand::Delete { id } => (serde_json::to_value(registry.delete(id)?)?, true),
    };
    Ok(outcome)
}
