mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::grid::GridArgs;
use commands::payment::PaymentArgs;

/// Mortgage monthly payment and sensitivity grid calculations
#[derive(Parser)]
#[command(
    name = "mgrid",
    version,
    about = "Mortgage payment and price/rate sensitivity grid calculations",
    long_about = "A CLI for estimating monthly mortgage payments with decimal precision. \
                  Computes single-scenario breakdowns (P&I, taxes, insurance, PMI, HOA, \
                  flood) and full purchase-price x interest-rate sensitivity grids, \
                  rendered as JSON, tables, CSV, or a colored terminal heatmap."
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
    /// Calculate a single monthly payment breakdown
    Payment(PaymentArgs),
    /// Build a purchase-price x interest-rate payment grid
    Grid(GridArgs),
    /// Print the default control panel configuration
    Controls,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
    Heatmap,
}

fn main() {
    let cli = Cli::parse();

    let mut options = output::RenderOptions::default();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Payment(args) => commands::payment::run_payment(args),
        Commands::Grid(args) => {
            options.heatmap_scale = args.heatmap_scale();
            commands::grid::run_grid(args)
        }
        Commands::Controls => commands::controls::run_controls(),
        Commands::Version => {
            println!("mgrid {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value, &options);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
