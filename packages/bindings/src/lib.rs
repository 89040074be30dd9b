use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Payment
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_payment(input_json: String) -> NapiResult<String> {
    let input: mortgage_grid_core::payment::PaymentInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        mortgage_grid_core::payment::calculate_payment(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

#[napi]
pub fn build_grid(input_json: String) -> NapiResult<String> {
    let input: mortgage_grid_core::grid::GridInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = mortgage_grid_core::grid::build_grid(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(serde::Serialize)]
struct ControlsDocument {
    controls: Vec<mortgage_grid_core::config::ControlSpec>,
    heatmap_scale: mortgage_grid_core::config::HeatmapScale,
}

#[napi]
pub fn default_controls() -> NapiResult<String> {
    let document = ControlsDocument {
        controls: mortgage_grid_core::config::default_controls(),
        heatmap_scale: mortgage_grid_core::config::HeatmapScale::default(),
    };
    serde_json::to_string(&document).map_err(to_napi_error)
}
