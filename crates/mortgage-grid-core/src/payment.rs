//! Monthly mortgage payment calculation: the amortizing principal & interest
//! payment plus flat monthly escrow add-ons (taxes, homeowners insurance,
//! PMI, HOA, flood insurance). All math in `rust_decimal::Decimal`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::MortgageGridError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::MortgageGridResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Longest mortgage term the validators accept, in years.
pub(crate) const MAX_TERM_YEARS: u32 = 100;

/// PMI is waived once the down payment reaches this fraction of the price.
const PMI_EQUITY_THRESHOLD: Decimal = dec!(0.20);

/// LTV above this level draws a warning.
const HIGH_LTV_WARNING: Decimal = dec!(0.95);

/// Note rates above this level draw a warning.
const HIGH_RATE_WARNING: Decimal = dec!(0.15);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for a single monthly payment calculation.
///
/// All rate fields are fractions (0.065 = 6.5%), never percentages. Callers
/// collecting percentage-scale values convert before building this struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentInput {
    /// Total purchase price of the home
    pub purchase_price: Money,
    /// Cash down payment, strictly below the purchase price
    pub down_payment: Money,
    /// Annual nominal interest rate on the note (e.g. 0.065 = 6.5%)
    pub note_rate: Rate,
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

/// Full monthly payment breakdown.
///
/// `total_monthly` is the exact sum of the six payment components; no
/// rounding is applied anywhere in the calculator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentOutput {
    /// Financed amount: purchase price minus down payment
    pub loan_amount: Money,
    /// Amortizing principal & interest payment
    pub principal_and_interest: Money,
    /// Property tax escrow (annual taxes / 12)
    pub taxes_monthly: Money,
    /// Homeowners insurance escrow (annual premium / 12)
    pub insurance_monthly: Money,
    /// PMI charge; zero when the down payment reaches 20%
    pub pmi_monthly: Money,
    /// HOA fee, passed through unchanged
    pub hoa_monthly: Money,
    /// Flood insurance escrow (annual premium / 12)
    pub flood_monthly: Money,
    /// Total estimated monthly payment
    pub total_monthly: Money,
    /// Loan-to-value ratio at purchase
    pub ltv: Decimal,
    /// Down payment as a fraction of purchase price
    pub down_payment_pct: Decimal,
    /// Whether PMI applies to this scenario
    pub pmi_applied: bool,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Calculate the estimated total monthly payment for one scenario.
///
/// Validates the input, computes the breakdown, and wraps it in a
/// `ComputationOutput` with warnings for unusual-but-legal inputs.
pub fn calculate_payment(
    input: &PaymentInput,
) -> MortgageGridResult<ComputationOutput<PaymentOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input, &mut warnings)?;

    let output = payment_breakdown(input)?;

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-Rate Mortgage Monthly Payment (P&I + Escrows)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

/// Compute the raw payment breakdown without the output envelope.
///
/// This is the per-cell computation used by the grid builder, which performs
/// its own grid-level validation. Residual division guards remain in place.
pub fn payment_breakdown(input: &PaymentInput) -> MortgageGridResult<PaymentOutput> {
    if input.purchase_price.is_zero() {
        return Err(MortgageGridError::DivisionByZero {
            context: "LTV (loan amount / purchase price)".into(),
        });
    }

    let loan_amount = input.purchase_price - input.down_payment;
    let monthly_rate = input.note_rate / MONTHS_PER_YEAR;
    let total_months = input.term_years * 12;

    let principal_and_interest =
        monthly_principal_and_interest(loan_amount, monthly_rate, total_months)?;

    // Escrows: flat monthly conversions, independent of rate and term
    let taxes_monthly = input.purchase_price * input.effective_tax_rate / MONTHS_PER_YEAR;
    let insurance_monthly = input.annual_premium / MONTHS_PER_YEAR;
    let flood_monthly = input.flood_annual_premium / MONTHS_PER_YEAR;

    // PMI applies strictly below 20% down; exactly 20% waives it
    let pmi_applied = input.down_payment < PMI_EQUITY_THRESHOLD * input.purchase_price;
    let pmi_monthly = if pmi_applied {
        loan_amount * input.pmi_annual_rate / MONTHS_PER_YEAR
    } else {
        Decimal::ZERO
    };

    let total_monthly = principal_and_interest
        + taxes_monthly
        + insurance_monthly
        + pmi_monthly
        + input.hoa_monthly
        + flood_monthly;

    Ok(PaymentOutput {
        loan_amount,
        principal_and_interest,
        taxes_monthly,
        insurance_monthly,
        pmi_monthly,
        hoa_monthly: input.hoa_monthly,
        flood_monthly,
        total_monthly,
        ltv: loan_amount / input.purchase_price,
        down_payment_pct: input.down_payment / input.purchase_price,
        pmi_applied,
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &PaymentInput, warnings: &mut Vec<String>) -> MortgageGridResult<()> {
    if input.purchase_price <= Decimal::ZERO {
        return Err(MortgageGridError::InvalidInput {
            field: "purchase_price".into(),
            reason: "Purchase price must be positive".into(),
        });
    }

    if input.down_payment < Decimal::ZERO {
        return Err(MortgageGridError::InvalidInput {
            field: "down_payment".into(),
            reason: "Down payment cannot be negative".into(),
        });
    }

    if input.down_payment >= input.purchase_price {
        return Err(MortgageGridError::FinancialImpossibility(format!(
            "Down payment {} must be below the purchase price {}",
            input.down_payment, input.purchase_price
        )));
    }

    if input.note_rate < Decimal::ZERO || input.note_rate >= Decimal::ONE {
        return Err(MortgageGridError::InvalidInput {
            field: "note_rate".into(),
            reason: "Note rate must be a fraction in [0, 1); 6.5% is 0.065".into(),
        });
    }

    if input.term_years < 1 || input.term_years > MAX_TERM_YEARS {
        return Err(MortgageGridError::InvalidInput {
            field: "term_years".into(),
            reason: format!("Mortgage term must be between 1 and {MAX_TERM_YEARS} years"),
        });
    }

    for (field, value) in [
        ("effective_tax_rate", input.effective_tax_rate),
        ("annual_premium", input.annual_premium),
        ("pmi_annual_rate", input.pmi_annual_rate),
        ("hoa_monthly", input.hoa_monthly),
        ("flood_annual_premium", input.flood_annual_premium),
    ] {
        if value < Decimal::ZERO {
            return Err(MortgageGridError::InvalidInput {
                field: field.into(),
                reason: "Escrow and fee inputs cannot be negative".into(),
            });
        }
    }

    // --- Warnings for unusual metrics ---
    let ltv = (input.purchase_price - input.down_payment) / input.purchase_price;
    if ltv > HIGH_LTV_WARNING {
        warnings.push(format!(
            "LTV of {:.1}% exceeds 95% — verify a lender will finance at this leverage",
            ltv * dec!(100)
        ));
    }

    if input.note_rate > HIGH_RATE_WARNING {
        warnings.push(format!(
            "Note rate {:.2}% exceeds 15% — unusually high for a residential mortgage",
            input.note_rate * dec!(100)
        ));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

/// Standard fixed-rate amortization payment: L * i(1+i)^n / ((1+i)^n - 1).
///
/// The annuity formula is undefined at zero interest; the payment then takes
/// the straight-line limit `principal / total_months`. Compounding runs in
/// checked arithmetic, so rate/term combinations that push `(1+i)^n` past
/// `Decimal` range surface as `NumericOverflow`.
fn monthly_principal_and_interest(
    principal: Money,
    monthly_rate: Rate,
    total_months: u32,
) -> MortgageGridResult<Money> {
    if total_months == 0 {
        return Err(MortgageGridError::DivisionByZero {
            context: "amortization over zero months".into(),
        });
    }

    if monthly_rate.is_zero() {
        // Interest-free: straight-line amortization
        return Ok(principal / Decimal::from(total_months));
    }

    // (1 + i)^n via iterative multiplication
    let growth = Decimal::ONE + monthly_rate;
    let mut compound = Decimal::ONE;
    for _ in 0..total_months {
        compound = match compound.checked_mul(growth) {
            Some(c) => c,
            None => {
                return Err(MortgageGridError::NumericOverflow {
                    context: "amortization factor ((1+i)^n)".into(),
                })
            }
        };
    }

    let denominator = compound - Decimal::ONE;
    if denominator.is_zero() {
        return Err(MortgageGridError::DivisionByZero {
            context: "amortization denominator ((1+i)^n - 1)".into(),
        });
    }

    let numerator = match principal
        .checked_mul(monthly_rate)
        .and_then(|v| v.checked_mul(compound))
    {
        Some(n) => n,
        None => {
            return Err(MortgageGridError::NumericOverflow {
                context: "payment numerator (L * i * (1+i)^n)".into(),
            })
        }
    };

    Ok(numerator / denominator)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
