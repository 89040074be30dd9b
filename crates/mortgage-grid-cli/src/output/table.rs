use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{format_currency, format_currency_cents, format_rate_label, GridView};

/// Format output as a table using the tabled crate.
///
/// Grid results render as a pivoted matrix with interest rates down the
/// side and purchase prices across the top; everything else renders as a
/// field/value listing.
pub fn print_table(value: &Value) {
    if let Some(grid) = GridView::from_envelope(value) {
        print_grid_table(&grid, value);
        return;
    }

    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else {
                print_flat_object(value);
            }
        }
        _ => {
            println!("{}", value);
        }
    }
}

/// Pivoted matrix: one row per rate, one column per price, ascending both
/// ways, payments with cents.
fn print_grid_table(grid: &GridView, envelope: &Value) {
    let mut builder = Builder::default();

    let mut header: Vec<String> = Vec::with_capacity(grid.prices.len() + 1);
    header.push("Interest Rate".to_string());
    header.extend(grid.prices.iter().map(|p| format_currency(*p)));
    builder.push_record(header);

    for (i, rate) in grid.rates.iter().enumerate() {
        let mut row: Vec<String> = Vec::with_capacity(grid.prices.len() + 1);
        row.push(format_rate_label(*rate));
        row.extend(grid.matrix[i].iter().map(|m| format_currency_cents(*m)));
        builder.push_record(row);
    }

    let table = Table::from(builder);
    println!("{}", table);

    print_footers(envelope);
}

fn print_result_table(result: &Value, envelope: &serde_json::Map<String, Value>) {
    if let Value::Object(res_map) = result {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in res_map {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
        let table = Table::from(builder);
        println!("{}", table);
    } else {
        print_flat_object(&Value::Object(envelope.clone()));
    }

    print_footers(&Value::Object(envelope.clone()));
}

fn print_flat_object(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
        let table = Table::from(builder);
        println!("{}", table);
    }
}

/// Warnings and methodology, printed below the table body.
fn print_footers(envelope: &Value) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
