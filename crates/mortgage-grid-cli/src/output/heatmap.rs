use colored::Colorize;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use mortgage_grid_core::config::HeatmapScale;

use super::{format_currency, format_rate_label, GridView};

// Three-stop approximation of the reversed RdYlGn diverging scale:
// low payments green, midpoint pale yellow, high payments red.
const LOW_STOP: (u8, u8, u8) = (26, 152, 80);
const MID_STOP: (u8, u8, u8) = (255, 255, 191);
const HIGH_STOP: (u8, u8, u8) = (215, 48, 39);

/// Render a grid result as a colored terminal heatmap.
///
/// Rows are interest rates with the lowest rate on the bottom row; columns
/// are purchase prices ascending left to right. Cell color is anchored to
/// the fixed floor/ceiling scale rather than the grid's own extremes, so
/// color stays comparable across runs.
pub fn print_heatmap(value: &Value, scale: &HeatmapScale) {
    let grid = match GridView::from_envelope(value) {
        Some(grid) => grid,
        None => {
            eprintln!("Heatmap output requires a grid result; printing JSON instead");
            super::json::print_json(value);
            return;
        }
    };

    let labels: Vec<String> = grid.rates.iter().map(|r| format_rate_label(*r)).collect();
    let headers: Vec<String> = grid.prices.iter().map(|p| format_currency(*p)).collect();

    let label_width = labels.iter().map(String::len).max().unwrap_or(0);
    let mut cell_width = headers.iter().map(String::len).max().unwrap_or(0);
    for row in &grid.matrix {
        for payment in row {
            cell_width = cell_width.max(format_currency(*payment).len());
        }
    }

    // Price headers, aligned over the cell number area
    print!("{:>label_width$}", "");
    for header in &headers {
        print!("  {:>cell_width$} ", header);
    }
    println!();

    // Lowest rate belongs on the bottom row, so walk rates top-down
    for (i, rate_label) in labels.iter().enumerate().rev() {
        print!("{:>label_width$}", rate_label);
        for payment in &grid.matrix[i] {
            let (r, g, b) = ramp_color(*payment, scale);
            let text = format!(" {:>cell_width$} ", format_currency(*payment));
            print!(" {}", text.black().on_truecolor(r, g, b));
        }
        println!();
    }

    println!();
    println!(
        "Scale: {} (green) to {} (red)",
        format_currency(scale.floor),
        format_currency(scale.ceiling)
    );
}

/// Map a payment onto the color ramp between the scale anchors.
fn ramp_color(payment: Decimal, scale: &HeatmapScale) -> (u8, u8, u8) {
    let span = scale.ceiling - scale.floor;
    if span <= Decimal::ZERO {
        return MID_STOP;
    }

    let t = ((payment - scale.floor) / span).clamp(Decimal::ZERO, Decimal::ONE);

    let half = dec!(0.5);
    if t <= half {
        lerp(LOW_STOP, MID_STOP, t / half)
    } else {
        lerp(MID_STOP, HIGH_STOP, (t - half) / half)
    }
}

/// Linear interpolation between two color stops, t in [0, 1].
fn lerp(from: (u8, u8, u8), to: (u8, u8, u8), t: Decimal) -> (u8, u8, u8) {
    let channel = |a: u8, b: u8| -> u8 {
        let blended = Decimal::from(a) + (Decimal::from(b) - Decimal::from(a)) * t;
        decimal_to_u8(blended.round())
    };
    (
        channel(from.0, to.0),
        channel(from.1, to.1),
        channel(from.2, to.2),
    )
}

/// Convert a whole Decimal in [0, 255] to u8.
fn decimal_to_u8(d: Decimal) -> u8 {
    d.to_string().parse::<u8>().unwrap_or(0)
}
