use mortgage_grid_core::config::default_grid_input;
use mortgage_grid_core::grid::{build_grid, GridAssumptions, GridInput};
use mortgage_grid_core::payment::{payment_breakdown, PaymentInput};
use mortgage_grid_core::types::SweepRange;
use mortgage_grid_core::MortgageGridError;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn small_grid_input() -> GridInput {
    GridInput {
        assumptions: GridAssumptions {
            down_payment: dec!(25000),
            term_years: 30,
            effective_tax_rate: dec!(0.0091),
            annual_premium: dec!(3120),
            pmi_annual_rate: dec!(0.005),
            hoa_monthly: dec!(0),
            flood_annual_premium: dec!(400),
        },
        price_range: SweepRange {
            min: dec!(250000),
            max: dec!(260000),
            step: dec!(5000),
        },
        rate_range: SweepRange {
            min: dec!(0.04),
            max: dec!(0.05),
            step: dec!(0.01),
        },
    }
}

// ===========================================================================
// Completeness
// ===========================================================================

#[test]
fn test_small_grid_has_every_key_pair() {
    let result = build_grid(&small_grid_input()).unwrap();
    let out = &result.result;

    // 2 rates x 3 prices = 6 cells
    assert_eq!(out.cell_count, 6);

    let expected_rates = [dec!(0.04), dec!(0.05)];
    let expected_prices = [dec!(250000), dec!(255000), dec!(260000)];

    for rate in expected_rates {
        for price in expected_prices {
            assert!(
                out.get(rate, price).is_some(),
                "Missing cell at ({rate}, {price})"
            );
        }
    }

    // And nothing else
    assert_eq!(out.cells().count(), 6);
}

#[test]
fn test_default_grid_shape() {
    let result = build_grid(&default_grid_input()).unwrap();
    let out = &result.result;

    // Rates 4.0%..6.5% step 0.25% => 11 rows
    assert_eq!(out.rates.len(), 11);
    assert_eq!(out.rates[0], dec!(0.04));
    assert_eq!(*out.rates.last().unwrap(), dec!(0.065));

    // Prices $250k..$305k step $5k => 12 columns
    assert_eq!(out.prices.len(), 12);
    assert_eq!(out.prices[0], dec!(250000));
    assert_eq!(*out.prices.last().unwrap(), dec!(305000));

    assert_eq!(out.cell_count, 132);
    assert!(result.warnings.is_empty());
}

// ===========================================================================
// Consistency with the single-payment API
// ===========================================================================

#[test]
fn test_grid_cells_agree_with_standalone_payments() {
    let input = small_grid_input();
    let result = build_grid(&input).unwrap();

    for cell in result.result.cells() {
        let standalone = payment_breakdown(&PaymentInput {
            purchase_price: cell.purchase_price,
            down_payment: input.assumptions.down_payment,
            note_rate: cell.interest_rate,
            term_years: input.assumptions.term_years,
            effective_tax_rate: input.assumptions.effective_tax_rate,
            annual_premium: input.assumptions.annual_premium,
            pmi_annual_rate: input.assumptions.pmi_annual_rate,
            hoa_monthly: input.assumptions.hoa_monthly,
            flood_annual_premium: input.assumptions.flood_annual_premium,
        })
        .unwrap();
        assert_eq!(cell.monthly_payment, standalone.total_monthly);
    }
}

#[test]
fn test_grid_deterministic_across_builds() {
    let a = build_grid(&small_grid_input()).unwrap();
    let b = build_grid(&small_grid_input()).unwrap();
    assert_eq!(a.result.matrix, b.result.matrix);
    assert_eq!(a.result.rates, b.result.rates);
    assert_eq!(a.result.prices, b.result.prices);
}

// ===========================================================================
// Ordering and bounds
// ===========================================================================

#[test]
fn test_matrix_monotonic_both_axes() {
    let result = build_grid(&default_grid_input()).unwrap();
    let out = &result.result;

    for row in &out.matrix {
        for j in 0..row.len() - 1 {
            assert!(row[j] < row[j + 1], "Payments must rise with price");
        }
    }
    for j in 0..out.prices.len() {
        for i in 0..out.matrix.len() - 1 {
            assert!(
                out.matrix[i][j] < out.matrix[i + 1][j],
                "Payments must rise with rate"
            );
        }
    }
}

#[test]
fn test_min_max_at_matrix_corners() {
    let result = build_grid(&default_grid_input()).unwrap();
    let out = &result.result;

    let last_row = out.matrix.len() - 1;
    let last_col = out.prices.len() - 1;
    assert_eq!(out.min_payment, out.matrix[0][0]);
    assert_eq!(out.max_payment, out.matrix[last_row][last_col]);
}

// ===========================================================================
// Axis edge cases
// ===========================================================================

#[test]
fn test_max_excluded_when_not_step_multiple() {
    let mut input = small_grid_input();
    input.price_range.step = dec!(4000);
    let result = build_grid(&input).unwrap();
    // (260000 - 250000) / 4000 = 2.5 => the 260000 endpoint is off-axis
    assert_eq!(
        result.result.prices,
        vec![dec!(250000), dec!(254000), dec!(258000)]
    );
}

#[test]
fn test_single_cell_grid() {
    let mut input = small_grid_input();
    input.price_range = SweepRange {
        min: dec!(250000),
        max: dec!(250000),
        step: dec!(1000),
    };
    input.rate_range = SweepRange {
        min: dec!(0.04),
        max: dec!(0.04),
        step: dec!(0.01),
    };
    let result = build_grid(&input).unwrap();
    let out = &result.result;

    assert_eq!(out.cell_count, 1);
    assert_eq!(out.min_payment, out.max_payment);
    assert_eq!(out.min_payment, out.matrix[0][0]);
}

#[test]
fn test_inverted_range_rejected() {
    let mut input = small_grid_input();
    input.rate_range = SweepRange {
        min: dec!(0.05),
        max: dec!(0.04),
        step: dec!(0.01),
    };
    let result = build_grid(&input);
    assert!(matches!(
        result,
        Err(MortgageGridError::InvalidInput { .. })
    ));
}

#[test]
fn test_negative_step_rejected() {
    let mut input = small_grid_input();
    input.price_range.step = dec!(-5000);
    assert!(build_grid(&input).is_err());
}

#[test]
fn test_oversized_axis_rejected() {
    let mut input = small_grid_input();
    // 230000..310000 by 1 would be 80,001 price values
    input.price_range = SweepRange {
        min: dec!(230000),
        max: dec!(310000),
        step: dec!(1),
    };
    let result = build_grid(&input);
    assert!(matches!(
        result,
        Err(MortgageGridError::InvalidInput { .. })
    ));
}

#[test]
fn test_vanishing_step_rejected() {
    let mut input = small_grid_input();
    // 0..0.9 by 1e-22 asks for ~9e21 rate values; must reject, not truncate
    input.rate_range = SweepRange {
        min: dec!(0),
        max: dec!(0.9),
        step: dec!(0.0000000000000000000001),
    };
    let result = build_grid(&input);
    assert!(matches!(
        result,
        Err(MortgageGridError::InvalidInput { .. })
    ));
}

#[test]
fn test_large_grid_draws_warning() {
    let mut input = small_grid_input();
    // 101 prices x 101 rates = 10,201 cells, above the warning threshold
    input.price_range = SweepRange {
        min: dec!(200000),
        max: dec!(300000),
        step: dec!(1000),
    };
    input.rate_range = SweepRange {
        min: dec!(0.01),
        max: dec!(0.06),
        step: dec!(0.0005),
    };
    let result = build_grid(&input).unwrap();
    assert_eq!(result.result.cell_count, 10201);
    assert!(result.warnings.iter().any(|w| w.contains("cells")));
}

// ===========================================================================
// Impossible scenarios
// ===========================================================================

#[test]
fn test_down_payment_reaching_cheapest_price_rejected() {
    let mut input = small_grid_input();
    input.assumptions.down_payment = dec!(250000);
    let result = build_grid(&input);
    assert!(matches!(
        result,
        Err(MortgageGridError::FinancialImpossibility(_))
    ));
}

#[test]
fn test_down_payment_below_cheapest_price_accepted() {
    let mut input = small_grid_input();
    input.assumptions.down_payment = dec!(249999);
    // Legal, though LTV is tiny; every cell still computes
    let result = build_grid(&input).unwrap();
    assert_eq!(result.result.cell_count, 6);
}
