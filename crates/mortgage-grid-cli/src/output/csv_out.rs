use serde_json::Value;
use std::io;

use super::GridView;

/// Write output as CSV to stdout.
///
/// Grid results emit one flat record per cell (rate-major order); scalar
/// results emit two-column field/value rows.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    if let Some(grid) = GridView::from_envelope(value) {
        let _ = wtr.write_record(["interest_rate", "purchase_price", "monthly_payment"]);
        for (i, rate) in grid.rates.iter().enumerate() {
            for (j, price) in grid.prices.iter().enumerate() {
                let _ = wtr.write_record([
                    rate.to_string(),
                    price.to_string(),
                    grid.matrix[i][j].to_string(),
                ]);
            }
        }
        let _ = wtr.flush();
        return;
    }

    match value {
        Value::Object(map) => {
            if let Some(Value::Object(result)) = map.get("result") {
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in result {
                    let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
                }
            } else {
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in map {
                    let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
                }
            }
        }
        _ => {
            let _ = wtr.write_record([&format_csv_value(value)]);
        }
    }

    let _ = wtr.flush();
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
