mod commands;
mod input;
mod output;
mod store;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::config::ConfigCommand;
use commands::simulator::{QuoteArgs, SimulateArgs, ValidateArgs};

/// Credit simulations and simulator policy for KrediPlus
#[derive(Parser)]
#[command(
    name = "kredi",
    version,
    about = "Credit simulations and simulator policy for KrediPlus",
    long_about = "A CLI for KrediPlus loan simulations with decimal precision. \
                  Computes fixed-rate annuity installments, issues official quotes \
                  against the active simulator configuration, and manages the \
                  configuration store."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Simulator configuration store (.yaml/.yml or .json); the stock policy is used when absent
    #[arg(long, global = true)]
    store: Option<String>,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate installment and totals for any amount, rate and term
    Simulate(SimulateArgs),
    /// Official quote against the active simulator configuration
    Quote(QuoteArgs),
    /// Check an amount and term against the active simulator configuration
    Validate(ValidateArgs),
    /// Manage simulator configurations
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let store = cli.store.as_deref();
    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Simulate(args) => commands::simulator::run_simulate(args),
        Commands::Quote(args) => commands::simulator::run_quote(args, store),
        Commands::Validate(args) => commands::simulator::run_validate(args, store),
        Commands::Config(cmd) => commands::config::run_config(cmd, store),
        Commands::Version => {
            println!("kredi {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
