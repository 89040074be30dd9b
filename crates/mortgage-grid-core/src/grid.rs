//! Price × rate sensitivity grid: expand the two sweep axes, compute one
//! full payment per (rate, price) pair, and assemble the row/column matrix
//! the rendering layers consume. Axis expansion uses integer step counts so
//! the grid shape is exact, with no accumulation drift and no epsilon
//! tolerance.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::MortgageGridError;
use crate::payment::{payment_breakdown, PaymentInput, MAX_TERM_YEARS};
use crate::types::{with_metadata, ComputationOutput, Money, Rate, SweepRange};
use crate::MortgageGridResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Rate axis keys are quantised to this many decimal places (fractional
/// units, so 4 places resolves steps down to a basis point).
const RATE_AXIS_PRECISION: u32 = 4;

/// Hard cap on the number of values a single axis may expand to.
const MAX_AXIS_VALUES: usize = 10_000;

/// Grids larger than this draw a warning rather than an error.
const LARGE_GRID_WARNING_CELLS: usize = 10_000;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Scenario parameters shared by every cell of the grid.
///
/// This is the payment scenario minus the two swept dimensions
/// (purchase price and note rate).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridAssumptions {
    /// Cash down payment, constant across all prices
    pub down_payment: Money,
    /// Mortgage term in years
    pub term_years: u32,
    /// Annual property tax rate as a fraction of purchase price
    pub effective_tax_rate: Rate,
    /// Annual homeowners insurance premium
    pub annual_premium: Money,
    /// Annual PMI rate as a fraction of the loan amount
    pub pmi_annual_rate: Rate,
    /// Monthly HOA fee
    pub hoa_monthly: Money,
    /// Annual flood insurance premium
    pub flood_annual_premium: Money,
}

/// Input for a full sensitivity grid build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridInput {
    /// Shared scenario parameters
    pub assumptions: GridAssumptions,
    /// Purchase price axis (columns)
    pub price_range: SweepRange,
    /// Note rate axis (rows), in fractional units (0.04 = 4%)
    pub rate_range: SweepRange,
}

/// One grid cell as a flat record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridCell {
    pub interest_rate: Rate,
    pub purchase_price: Money,
    pub monthly_payment: Money,
}

/// The assembled sensitivity grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridOutput {
    /// Row axis: note rates ascending, quantised to 4 decimal places
    pub rates: Vec<Rate>,
    /// Column axis: purchase prices ascending
    pub prices: Vec<Money>,
    /// `matrix[i][j]` = total monthly payment at (rates[i], prices[j])
    pub matrix: Vec<Vec<Money>>,
    /// Smallest payment in the grid
    pub min_payment: Money,
    /// Largest payment in the grid
    pub max_payment: Money,
    /// Total number of cells (rates × prices)
    pub cell_count: usize,
}

impl GridOutput {
    /// Look up the payment at an exact (rate, price) key pair.
    pub fn get(&self, rate: Rate, price: Money) -> Option<Money> {
        let i = self.rates.iter().position(|r| *r == rate)?;
        let j = self.prices.iter().position(|p| *p == price)?;
        Some(self.matrix[i][j])
    }

    /// Flatten the matrix into cell records, row-major (rate-major) order.
    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        self.rates.iter().enumerate().flat_map(move |(i, rate)| {
            self.prices
                .iter()
                .enumerate()
                .map(move |(j, price)| GridCell {
                    interest_rate: *rate,
                    purchase_price: *price,
                    monthly_payment: self.matrix[i][j],
                })
        })
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build the full monthly-payment sensitivity grid.
///
/// Expands both axes, computes one payment breakdown per (rate, price)
/// pair by merging the pair into the shared assumptions, and assembles the
/// matrix together with its min/max payment bounds. Any cell failure aborts
/// the build; no sentinel values are substituted.
pub fn build_grid(input: &GridInput) -> MortgageGridResult<ComputationOutput<GridOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input)?;

    // --- Axis expansion ---
    let prices = generate_axis(&input.price_range, "price_range")?;
    let mut rates: Vec<Rate> = generate_axis(&input.rate_range, "rate_range")?
        .into_iter()
        .map(|r| r.round_dp(RATE_AXIS_PRECISION))
        .collect();

    // Quantisation can collapse neighbouring rates when the step is finer
    // than the axis precision; keys must stay unique
    let raw_count = rates.len();
    rates.dedup();
    if rates.len() < raw_count {
        warnings.push(format!(
            "Rate step finer than {RATE_AXIS_PRECISION} decimal places; {} duplicate rate keys collapsed after quantisation",
            raw_count - rates.len()
        ));
    }

    let cell_count = rates.len() * prices.len();
    if cell_count > LARGE_GRID_WARNING_CELLS {
        warnings.push(format!(
            "Grid has {cell_count} cells; downstream rendering may be slow"
        ));
    }

    // --- Cell computation ---
    let mut matrix = Vec::with_capacity(rates.len());
    let mut min_payment = Decimal::MAX;
    let mut max_payment = Decimal::MIN;

    for rate in &rates {
        let mut row = Vec::with_capacity(prices.len());
        for price in &prices {
            let cell = merge_cell(&input.assumptions, *price, *rate);
            let payment = payment_breakdown(&cell)?.total_monthly;

            if payment < min_payment {
                min_payment = payment;
            }
            if payment > max_payment {
                max_payment = payment;
            }
            row.push(payment);
        }
        matrix.push(row);
    }

    let output = GridOutput {
        rates,
        prices,
        matrix,
        min_payment,
        max_payment,
        cell_count,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Monthly Payment Sensitivity Grid (Price x Rate)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Axis expansion
// ---------------------------------------------------------------------------

/// Expand a sweep range into its axis values.
///
/// The value count is fixed up front: `floor((max - min) / step) + 1`, each
/// value `min + step * k`. The nominal maximum lands on the axis exactly
/// when it is a whole number of steps above the minimum; otherwise the axis
/// stops short of it.
fn generate_axis(range: &SweepRange, field: &str) -> MortgageGridResult<Vec<Decimal>> {
    if range.step <= Decimal::ZERO {
        return Err(MortgageGridError::InvalidInput {
            field: field.into(),
            reason: "Step must be positive".into(),
        });
    }
    if range.min > range.max {
        return Err(MortgageGridError::InvalidInput {
            field: field.into(),
            reason: "Min must be <= max".into(),
        });
    }

    // The cap is enforced while the step count is still a Decimal; a count
    // beyond integer range would collapse to zero in the usize conversion
    let steps = ((range.max - range.min) / range.step).floor();
    if steps >= Decimal::from(MAX_AXIS_VALUES) {
        return Err(MortgageGridError::InvalidInput {
            field: field.into(),
            reason: format!(
                "Axis would expand to {} values; the maximum is {MAX_AXIS_VALUES}",
                steps + Decimal::ONE
            ),
        });
    }

    let count = decimal_to_usize(steps) + 1;
    let mut values = Vec::with_capacity(count);
    for k in 0..count {
        values.push(range.min + range.step * Decimal::from(k as u64));
    }
    Ok(values)
}

/// Expand one (price, rate) pair plus the shared assumptions into a full
/// payment scenario.
fn merge_cell(assumptions: &GridAssumptions, price: Money, rate: Rate) -> PaymentInput {
    PaymentInput {
        purchase_price: price,
        down_payment: assumptions.down_payment,
        note_rate: rate,
        term_years: assumptions.term_years,
        effective_tax_rate: assumptions.effective_tax_rate,
        annual_premium: assumptions.annual_premium,
        pmi_annual_rate: assumptions.pmi_annual_rate,
        hoa_monthly: assumptions.hoa_monthly,
        flood_annual_premium: assumptions.flood_annual_premium,
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &GridInput) -> MortgageGridResult<()> {
    let a = &input.assumptions;

    if a.down_payment < Decimal::ZERO {
        return Err(MortgageGridError::InvalidInput {
            field: "down_payment".into(),
            reason: "Down payment cannot be negative".into(),
        });
    }

    if a.term_years < 1 || a.term_years > MAX_TERM_YEARS {
        return Err(MortgageGridError::InvalidInput {
            field: "term_years".into(),
            reason: format!("Mortgage term must be between 1 and {MAX_TERM_YEARS} years"),
        });
    }

    for (field, value) in [
        ("effective_tax_rate", a.effective_tax_rate),
        ("annual_premium", a.annual_premium),
        ("pmi_annual_rate", a.pmi_annual_rate),
        ("hoa_monthly", a.hoa_monthly),
        ("flood_annual_premium", a.flood_annual_premium),
    ] {
        if value < Decimal::ZERO {
            return Err(MortgageGridError::InvalidInput {
                field: field.into(),
                reason: "Escrow and fee inputs cannot be negative".into(),
            });
        }
    }

    if input.price_range.min <= Decimal::ZERO {
        return Err(MortgageGridError::InvalidInput {
            field: "price_range".into(),
            reason: "Purchase prices must be positive".into(),
        });
    }

    if input.rate_range.min < Decimal::ZERO || input.rate_range.max >= Decimal::ONE {
        return Err(MortgageGridError::InvalidInput {
            field: "rate_range".into(),
            reason: "Note rates must be fractions in [0, 1); 6.5% is 0.065".into(),
        });
    }

    // The down payment must stay below every price on the axis, so the
    // binding constraint is the axis minimum
    if a.down_payment >= input.price_range.min {
        return Err(MortgageGridError::FinancialImpossibility(format!(
            "Down payment {} must be below the lowest grid price {}",
            a.down_payment, input.price_range.min
        )));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Math helpers
// ---------------------------------------------------------------------------

/// Convert a non-negative whole Decimal to usize.
fn decimal_to_usize(d: Decimal) -> usize {
    let s = d.to_string();
    if let Some(dot_pos) = s.find('.') {
        s[..dot_pos].parse::<usize>().unwrap_or(0)
    } else {
        s.parse::<usize>().unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
