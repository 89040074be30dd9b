//! Default control-panel configuration: per-scalar slider bounds, steps,
//! defaults and display formats, plus the fixed heatmap color anchors.
//! Front ends (CLI flags, host UIs) read these instead of hard-coding their
//! own copies. Percent-formatted controls carry percentage-scale values
//! (0.91 means 0.91%) exactly as presented to the user; conversion to the
//! fractional scale the core computes with happens at the boundary via
//! [`fraction_from_percent`].

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::grid::{GridAssumptions, GridInput};
use crate::types::SweepRange;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// How a control's values are presented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayFormat {
    Currency,
    Percent,
    Years,
}

/// One adjustable scalar: bounds, step, default and display format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlSpec {
    /// Stable machine-readable key
    pub name: String,
    /// Human-facing label
    pub label: String,
    pub min: Decimal,
    pub max: Decimal,
    /// Uniform increment between min and max; absent for enumerated controls
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<Decimal>,
    /// Explicit value list; present only for enumerated controls
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<Decimal>>,
    pub default: Decimal,
    pub format: DisplayFormat,
}

impl ControlSpec {
    /// Control with a uniform step between min and max.
    fn uniform(
        name: &str,
        label: &str,
        min: Decimal,
        max: Decimal,
        step: Decimal,
        default: Decimal,
        format: DisplayFormat,
    ) -> Self {
        ControlSpec {
            name: name.into(),
            label: label.into(),
            min,
            max,
            step: Some(step),
            options: None,
            default,
            format,
        }
    }

    /// Control restricted to an explicit ascending list of values.
    fn enumerated(
        name: &str,
        label: &str,
        options: Vec<Decimal>,
        default: Decimal,
        format: DisplayFormat,
    ) -> Self {
        let min = options.first().copied().unwrap_or_default();
        let max = options.last().copied().unwrap_or_default();
        ControlSpec {
            name: name.into(),
            label: label.into(),
            min,
            max,
            step: None,
            options: Some(options),
            default,
            format,
        }
    }
}

/// Fixed color anchors for heatmap rendering.
///
/// Payments at or below `floor` saturate the low end of the ramp, at or
/// above `ceiling` the high end. The anchors are fixed rather than derived
/// from the grid so color carries meaning across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatmapScale {
    pub floor: Decimal,
    pub ceiling: Decimal,
}

impl Default for HeatmapScale {
    fn default() -> Self {
        HeatmapScale {
            floor: dec!(1700),
            ceiling: dec!(2025),
        }
    }
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

/// Convert a percentage-scale value to the fractional scale the core
/// computes with (6.5 -> 0.065).
pub fn fraction_from_percent(percent: Decimal) -> Decimal {
    percent / dec!(100)
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// The full default control panel, one entry per adjustable scalar.
pub fn default_controls() -> Vec<ControlSpec> {
    vec![
        ControlSpec::uniform(
            "down_payment",
            "Down Payment ($)",
            dec!(0),
            dec!(40000),
            dec!(1000),
            dec!(25000),
            DisplayFormat::Currency,
        ),
        ControlSpec::uniform(
            "term_years",
            "Mortgage Term (Years)",
            dec!(10),
            dec!(30),
            dec!(5),
            dec!(30),
            DisplayFormat::Years,
        ),
        ControlSpec::uniform(
            "effective_tax_rate",
            "Effective Tax Rate (%)",
            dec!(0.50),
            dec!(1.50),
            dec!(0.01),
            dec!(0.91),
            DisplayFormat::Percent,
        ),
        ControlSpec::uniform(
            "annual_premium",
            "Annual Homeowners Insurance ($)",
            dec!(2000),
            dec!(5000),
            dec!(20),
            dec!(3120),
            DisplayFormat::Currency,
        ),
        ControlSpec::uniform(
            "pmi_annual_rate",
            "PMI Rate (%)",
            dec!(0.30),
            dec!(1.50),
            dec!(0.01),
            dec!(0.50),
            DisplayFormat::Percent,
        ),
        ControlSpec::uniform(
            "hoa_monthly",
            "Monthly HOA Fees ($)",
            dec!(0),
            dec!(500),
            dec!(25),
            dec!(0),
            DisplayFormat::Currency,
        ),
        ControlSpec::uniform(
            "flood_annual_premium",
            "Annual Flood Insurance ($)",
            dec!(300),
            dec!(1200),
            dec!(25),
            dec!(400),
            DisplayFormat::Currency,
        ),
        ControlSpec::uniform(
            "price_min",
            "Purchase Price min",
            dec!(230000),
            dec!(310000),
            dec!(1000),
            dec!(250000),
            DisplayFormat::Currency,
        ),
        ControlSpec::uniform(
            "price_max",
            "Purchase Price max",
            dec!(230000),
            dec!(310000),
            dec!(1000),
            dec!(305000),
            DisplayFormat::Currency,
        ),
        ControlSpec::uniform(
            "price_step",
            "Purchase Price step",
            dec!(1000),
            dec!(25000),
            dec!(1000),
            dec!(5000),
            DisplayFormat::Currency,
        ),
        ControlSpec::uniform(
            "rate_min",
            "Interest Rate min (%)",
            dec!(3.0),
            dec!(8.0),
            dec!(0.1),
            dec!(4.0),
            DisplayFormat::Percent,
        ),
        ControlSpec::uniform(
            "rate_max",
            "Interest Rate max (%)",
            dec!(3.0),
            dec!(8.0),
            dec!(0.1),
            dec!(6.5),
            DisplayFormat::Percent,
        ),
        ControlSpec::enumerated(
            "rate_step",
            "Interest Rate step (%)",
            vec![dec!(0.1), dec!(0.25), dec!(0.5), dec!(1.0)],
            dec!(0.25),
            DisplayFormat::Percent,
        ),
    ]
}

/// A ready grid input assembled from the control defaults, with rate
/// controls already converted from percent to fractions.
pub fn default_grid_input() -> GridInput {
    GridInput {
        assumptions: GridAssumptions {
            down_payment: dec!(25000),
            term_years: 30,
            effective_tax_rate: fraction_from_percent(dec!(0.91)),
            annual_premium: dec!(3120),
            pmi_annual_rate: fraction_from_percent(dec!(0.50)),
            hoa_monthly: dec!(0),
            flood_annual_premium: dec!(400),
        },
        price_range: SweepRange {
            min: dec!(250000),
            max: dec!(305000),
            step: dec!(5000),
        },
        rate_range: SweepRange {
            min: fraction_from_percent(dec!(4.0)),
            max: fraction_from_percent(dec!(6.5)),
            step: fraction_from_percent(dec!(0.25)),
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_count() {
        assert_eq!(default_controls().len(), 13);
    }

    #[test]
    fn test_control_names_unique() {
        let controls = default_controls();
        let mut names: Vec<&str> = controls.iter().map(|c| c.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), controls.len());
    }

    #[test]
    fn test_down_payment_control() {
        let controls = default_controls();
        let dp = controls.iter().find(|c| c.name == "down_payment").unwrap();
        assert_eq!(dp.min, dec!(0));
        assert_eq!(dp.max, dec!(40000));
        assert_eq!(dp.step, Some(dec!(1000)));
        assert_eq!(dp.default, dec!(25000));
        assert_eq!(dp.format, DisplayFormat::Currency);
    }

    #[test]
    fn test_rate_step_is_enumerated() {
        let controls = default_controls();
        let rs = controls.iter().find(|c| c.name == "rate_step").unwrap();
        assert_eq!(rs.step, None);
        assert_eq!(
            rs.options,
            Some(vec![dec!(0.1), dec!(0.25), dec!(0.5), dec!(1.0)])
        );
        assert_eq!(rs.min, dec!(0.1));
        assert_eq!(rs.max, dec!(1.0));
        assert_eq!(rs.default, dec!(0.25));
    }

    #[test]
    fn test_defaults_within_bounds() {
        for control in default_controls() {
            assert!(
                control.default >= control.min && control.default <= control.max,
                "Default for {} outside its bounds",
                control.name
            );
        }
    }

    #[test]
    fn test_fraction_from_percent() {
        assert_eq!(fraction_from_percent(dec!(6.5)), dec!(0.065));
        assert_eq!(fraction_from_percent(dec!(0.91)), dec!(0.0091));
        assert_eq!(fraction_from_percent(dec!(100)), dec!(1));
    }

    #[test]
    fn test_heatmap_scale_defaults() {
        let scale = HeatmapScale::default();
        assert_eq!(scale.floor, dec!(1700));
        assert_eq!(scale.ceiling, dec!(2025));
    }

    #[test]
    fn test_default_grid_input_matches_controls() {
        let input = default_grid_input();
        assert_eq!(input.assumptions.down_payment, dec!(25000));
        assert_eq!(input.assumptions.term_years, 30);
        assert_eq!(input.assumptions.effective_tax_rate, dec!(0.0091));
        assert_eq!(input.price_range.min, dec!(250000));
        assert_eq!(input.price_range.max, dec!(305000));
        assert_eq!(input.rate_range.min, dec!(0.04));
        assert_eq!(input.rate_range.max, dec!(0.065));
        assert_eq!(input.rate_range.step, dec!(0.0025));
    }

    #[test]
    fn test_enumerated_options_skipped_for_uniform() {
        let controls = default_controls();
        let dp = controls.iter().find(|c| c.name == "down_payment").unwrap();
        let json = serde_json::to_value(dp).unwrap();
        assert!(json.get("options").is_none());
        assert!(json.get("step").is_some());
    }
}
