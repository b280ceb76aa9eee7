use serde_json::Value;

use super::{scalar, unwrap_result};

/// Print just the key answer value from the output.
///
/// Looks for the well-known headline fields of each command's result in
/// priority order, then falls back to the first field.
pub fn print_minimal(value: &Value) {
    let payload = unwrap_result(value);

    let priority_keys = [
        "roi",
        "fcf",
        "ev_ebitda_multiple",
        "revenue_impact",
        "market_cap",
        "id",
    ];

    match payload {
        Value::Object(map) => {
            for key in &priority_keys {
                if let Some(val) = map.get(*key) {
                    if !val.is_null() {
                        println!("{}", scalar(val));
                        return;
                    }
                }
            }
            if let Some((key, val)) = map.iter().next() {
                println!("{}: {}", key, scalar(val));
            }
        }
        Value::Array(rows) => {
            // A projection: the last year's combined FCF is the headline.
            if let Some(Value::Object(last)) = rows.last() {
                if let Some(val) = last.get("total_fcf") {
                    println!("{}", scalar(val));
                    return;
                }
            }
            println!("{} rows", rows.len());
        }
        other => println!("{}", scalar(other)),
    }
}
