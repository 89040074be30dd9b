use serde_json::Value;

use mortgage_grid_core::config::{default_controls, HeatmapScale};

/// Emit the default control panel: every adjustable scalar with its bounds,
/// step, default and display format, plus the heatmap color anchors.
pub fn run_controls() -> Result<Value, Box<dyn std::error::Error>> {
    Ok(serde_json::json!({
        "controls": default_controls(),
        "heatmap_scale": HeatmapScale::default(),
    }))
}
