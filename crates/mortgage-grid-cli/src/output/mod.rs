pub mod csv_out;
pub mod heatmap;
pub mod json;
pub mod minimal;
pub mod table;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use serde_json::Value;

use mortgage_grid_core::config::HeatmapScale;

use crate::OutputFormat;

/// Renderer settings that travel alongside the value itself.
pub struct RenderOptions {
    /// Color anchors for heatmap output
    pub heatmap_scale: HeatmapScale,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            heatmap_scale: HeatmapScale::default(),
        }
    }
}

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value, options: &RenderOptions) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
        OutputFormat::Heatmap => heatmap::print_heatmap(value, &options.heatmap_scale),
    }
}

// ---------------------------------------------------------------------------
// Grid detection
// ---------------------------------------------------------------------------

/// A grid result re-read from the JSON envelope, for renderers that need
/// the matrix shape rather than a flat field list.
#[derive(Debug, Deserialize)]
pub struct GridView {
    pub rates: Vec<Decimal>,
    pub prices: Vec<Decimal>,
    pub matrix: Vec<Vec<Decimal>>,
}

impl GridView {
    /// Extract the grid from a computation envelope, when its result is one.
    pub fn from_envelope(value: &Value) -> Option<GridView> {
        let result = value.get("result")?;
        serde_json::from_value(result.clone()).ok()
    }
}

// ---------------------------------------------------------------------------
// Shared label formatting
// ---------------------------------------------------------------------------

/// Whole-dollar currency: 1650.85 -> "$1,651".
pub fn format_currency(value: Decimal) -> String {
    format!("${}", group_thousands(&value.round().to_string()))
}

/// Currency with cents: 1650.85 -> "$1,650.85".
pub fn format_currency_cents(value: Decimal) -> String {
    let rounded = value.round_dp(2).to_string();
    match rounded.split_once('.') {
        Some((whole, frac)) => format!("${}.{:0<2}", group_thousands(whole), frac),
        None => format!("${}.00", group_thousands(&rounded)),
    }
}

/// Fractional rate to a one-decimal percent label: 0.0425 -> "4.2%".
pub fn format_rate_label(rate: Decimal) -> String {
    let pct = (rate * dec!(100)).round_dp(1);
    format!("{:.1}%", pct)
}

/// Insert thousands separators into a plain integer string.
fn group_thousands(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{sign}{grouped}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
