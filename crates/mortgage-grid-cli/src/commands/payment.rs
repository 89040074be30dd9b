use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use mortgage_grid_core::config::fraction_from_percent;
use mortgage_grid_core::payment::{calculate_payment, PaymentInput};

use crate::input;

/// Arguments for a single payment calculation.
///
/// Rate flags take percentage-scale values as a user would type them
/// (`--rate 6.5` means 6.5%); file and stdin input take the core-native
/// structure with fractional rates.
#[derive(Args)]
pub struct PaymentArgs {
    /// Path to a JSON file with a full payment input (fractional rates)
    #[arg(long)]
    pub input: Option<String>,

    /// Purchase price in dollars
    #[arg(long, default_value = "250000")]
    pub price: Decimal,

    /// Down payment in dollars
    #[arg(long, default_value = "25000")]
    pub down_payment: Decimal,

    /// Annual note rate in percent (6.5 = 6.5%)
    #[arg(long, default_value = "6.5")]
    pub rate: Decimal,

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
}

impl PaymentArgs {
    /// Assemble the core input, converting percent-scale flags to fractions.
    fn to_input(&self) -> PaymentInput {
        PaymentInput {
            purchase_price: self.price,
            down_payment: self.down_payment,
            note_rate: fraction_from_percent(self.rate),
            term_years: self.term_years,
            effective_tax_rate: fraction_from_percent(self.tax_rate),
            annual_premium: self.insurance,
            pmi_annual_rate: fraction_from_percent(self.pmi_rate),
            hoa_monthly: self.hoa,
            flood_annual_premium: self.flood,
        }
    }
}

fn resolve_input(args: &PaymentArgs) -> Result<PaymentInput, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::file::read_json(path);
    }
    if let Some(piped) = input::stdin::read_stdin()? {
        return Ok(piped);
    }
    Ok(args.to_input())
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let input = resolve_input(&args)?;
    let result = calculate_payment(&input)?;
    Ok(serde_json::to_value(result)?)
}
