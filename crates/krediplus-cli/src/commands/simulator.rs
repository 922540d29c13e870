use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use krediplus_core::simulator::{self, SimulationInput};

use crate::input;
use crate::store;

/// Arguments for a raw simulation
#[derive(Args)]
pub struct SimulateArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Requested loan amount
    #[arg(long, alias = "principal")]
    pub amount: Option<Decimal>,

    /// Monthly interest rate as a percentage (1.2 = 1.2%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Number of monthly installments
    #[arg(long, alias = "months")]
    pub term: Option<u32>,

    /// Round figures to this many decimal places for display
    #[arg(long)]
    pub round: Option<u32>,
}

/// Arguments for an official quote
#[derive(Args)]
pub struct QuoteArgs {
    /// Requested loan amount
    #[arg(long)]
    pub amount: Decimal,

    /// Number of monthly installments
    #[arg(long, alias = "months")]
    pub term: u32,
}

/// Arguments for request validation
#[derive(Args)]
pub struct ValidateArgs {
    /// Requested loan amount
    #[arg(long)]
    pub amount: Decimal,

    /// Number of monthly installments
    #[arg(long, alias = "months")]
    pub term: u32,
}

pub fn run_simulate(args: SimulateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let from_flags = args.amount.is_some() || args.rate.is_some() || args.term.is_some();
    let sim_input: SimulationInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if from_flags {
        SimulationInput {
            principal: args.amount
                .ok_or("--amount is required (or provide --input)")?,
            monthly_rate_pct: args.rate
                .ok_or("--rate is required (or provide --input)")?,
            term_months: args.term
                .ok_or("--term is required (or provide --input)")?,
        }
    } else if let Some(data) = input::stdin::read_stdin()? {
        data
    } else {
        return Err("--amount, --rate and --term, --input <file.json> or stdin required".into());
    };

    let mut result = sim_input.simulate()?;
    if let Some(dp) = args.round {
        result = result.rounded(dp);
    }

    Ok(json!({
        "input": sim_input,
        "result": result,
        "methodology": "Fixed-rate annuity estimate",
    }))
}

pub fn run_quote(args: QuoteArgs, store_path: Option<&str>) -> Result<Value, Box<dyn std::error::Error>> {
    let registry = store::load_registry(store_path)?;
    let config = registry.active()?;
    let result = simulator::quote(config, args.amount, args.term)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_validate(args: ValidateArgs, store_path: Option<&str>) -> Result<Value, Box<dyn std::error::Error>> {
    let registry = store::load_registry(store_path)?;
    let config = registry.active()?;
    let report = simulator::validate_parameters(config, args.amount, args.term);
    Ok(serde_json::to_value(report)?)
}
