mod commands;
mod input;
mod output;
mod store;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::comparison::SectorAverageArgs;
use commands::deals::{DealDeleteArgs, DealListArgs, DealSaveArgs};
use commands::simulate::{ProgramImpactArgs, SimulateArgs};
use commands::strategy::KpisArgs;
use commands::valuation::EvArgs;

/// Investment-strategy simulation and enterprise-value analysis
#[derive(Parser)]
#[command(
    name = "vct",
    version,
    about = "Investment-strategy simulation and enterprise-value analysis",
    long_about = "Overlays multi-year investment strategies on a company's baseline \
                  financials over a 10-year horizon and derives enterprise-value \
                  estimates under DCF, relative-multiple, and market approaches. \
                  Inputs are JSON or YAML documents; all figures are decimal-precise."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Recompute the derived KPIs of a strategy record
    Kpis(KpisArgs),
    /// Run the 10-year combined projection for a company and strategy set
    Simulate(SimulateArgs),
    /// Collapse a strategy set's effect over a 5- or 10-year horizon
    ProgramImpact(ProgramImpactArgs),
    /// Build the synthetic sector-average peer from a company catalog
    SectorAverage(SectorAverageArgs),
    /// Enterprise-value analysis (DCF / relative / market) for a saved deal
    Ev(EvArgs),
    /// Save or update a deal in the deal store
    DealSave(DealSaveArgs),
    /// List the deals in the deal store
    DealList(DealListArgs),
    /// Delete a deal from the deal store
    DealDelete(DealDeleteArgs),
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

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Kpis(args) => commands::strategy::run_kpis(args),
        Commands::Simulate(args) => commands::simulate::run_simulate(args),
        Commands::ProgramImpact(args) => commands::simulate::run_program_impact(args),
        Commands::SectorAverage(args) => commands::comparison::run_sector_average(args),
        Commands::Ev(args) => commands::valuation::run_ev(args),
        Commands::DealSave(args) => commands::deals::run_deal_save(args),
        Commands::DealList(args) => commands::deals::run_deal_list(args),
        Commands::DealDelete(args) => commands::deals::run_deal_delete(args),
        Commands::Version => {
            println!("vct {}", env!("CARGO_PKG_VERSION"));
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
