use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use mortgage_grid_core::config::{fraction_from_percent, HeatmapScale};
use mortgage_grid_core::grid::{build_grid, GridAssumptions, GridInput};
use mortgage_grid_core::types::SweepRange;

use crate::input;

/// Arguments for a full sensitivity grid.
///
/// Rate flags take percentage-scale values (`--rate-min 4.0` means 4.0%);
/// file and stdin input take the core-native structure with fractional
/// rates. Flag defaults mirror the default control panel.
#[derive(Args)]
pub struct GridArgs {
    /// Path to a JSON file with a full grid input (fractional rates)
    #[arg(long)]
    pub input: Option<String>,

    /// Down payment in dollars
    #[arg(long, default_value = "25000")]
    pub down_payment: Decimal,

    /// Mortgage term in years
    #[arg(long, default_value = "30")]
    pub term_years: u32,

    /// Effective property tax rate in percent of purchase price
    #[arg(long, default_value = "0.91")]
    pub tax_rate: Decimal,

    /// Annual homeowners insurance premium in dollars
    #[arg(long, default_value = "3120")]
    pub insurance: Decimal,

    /// Annual PMI rate in percent of loan amount
    #[arg(long, default_value = "0.50")]
    pub pmi_rate: Decimal,

    /// Monthly HOA fee in dollars
    #[arg(long, default_value = "0")]
    pub hoa: Decimal,

    /// Annual flood insurance premium in dollars
    #[arg(long, default_value = "400")]
    pub flood: Decimal,

    /// Lowest purchase price on the grid
    #[arg(long, default_value = "250000")]
    pub price_min: Decimal,

    /// Highest purchase price on the grid
    #[arg(long, default_value = "305000")]
    pub price_max: Decimal,

    /// Purchase price increment in dollars
    #[arg(long, default_value = "5000")]
    pub price_step: Decimal,

    /// Lowest note rate in percent
    #[arg(long, default_value = "4.0")]
    pub rate_min: Decimal,

    /// Highest note rate in percent
    #[arg(long, default_value = "6.5")]
    pub rate_max: Decimal,

    /// Note rate increment in percent
    #[arg(long, default_value = "0.25")]
    pub rate_step: Decimal,

    /// Override the heatmap color floor (payment shown fully green)
    #[arg(long)]
    pub zmin: Option<Decimal>,

    /// Override the heatmap color ceiling (payment shown fully red)
    #[arg(long)]
    pub zmax: Option<Decimal>,
}

impl GridArgs {
    /// Assemble the core input, converting percent-scale flags to fractions.
    fn to_input(&self) -> GridInput {
        GridInput {
            assumptions: GridAssumptions {
                down_payment: self.down_payment,
                term_years: self.term_years,
                effective_tax_rate: fraction_from_percent(self.tax_rate),
                annual_premium: self.insurance,
                pmi_annual_rate: fraction_from_percent(self.pmi_rate),
                hoa_monthly: self.hoa,
                flood_annual_premium: self.flood,
            },
            price_range: SweepRange {
                min: self.price_min,
                max: self.price_max,
                step: self.price_step,
            },
            rate_range: SweepRange {
                min: fraction_from_percent(self.rate_min),
                max: fraction_from_percent(self.rate_max),
                step: fraction_from_percent(self.rate_step),
            },
        }
    }

    /// Heatmap color anchors with any CLI overrides applied.
    pub fn heatmap_scale(&self) -> HeatmapScale {
        let defaults = HeatmapScale::default();
        HeatmapScale {
            floor: self.zmin.unwrap_or(defaults.floor),
            ceiling: self.zmax.unwrap_or(defaults.ceiling),
        }
    }
}

fn resolve_input(args: &GridArgs) -> Result<GridInput, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::file::read_json(path);
    }
    if let Some(piped) = input::stdin::read_stdin()? {
        return Ok(piped);
    }
    Ok(args.to_input())
}

pub fn run_grid(args: GridArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let input = resolve_input(&args)?;
    let result = build_grid(&input)?;
    Ok(serde_json::to_value(result)?)
}
