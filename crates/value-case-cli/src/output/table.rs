use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{scalar, unwrap_result};

/// Render the output as a table.
///
/// Arrays of records (projection rows, deal summaries) become one row per
/// record; nested objects (the EV checkpoint grid) are flattened into
/// dotted field names. Envelope warnings and methodology print as a footer.
pub fn print_table(value: &Value) {
    let payload = unwrap_result(value);

    match payload {
        Value::Array(rows) => print_records(rows),
        Value::Object(_) => print_fields(payload),
        other => println!("{other}"),
    }

    print_envelope_footer(value);
}

fn print_records(rows: &[Value]) {
    if rows.is_empty() {
        println!("(no rows)");
        return;
    }

    let Some(Value::Object(first)) = rows.first() else {
        for row in rows {
            println!("{row}");
        }
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(headers.clone());
    for row in rows {
        if let Value::Object(map) = row {
            let record: Vec<String> = headers
                .iter()
                .map(|h| map.get(h).map(scalar).unwrap_or_default())
                .collect();
            builder.push_record(record);
        }
    }
    println!("{}", Table::from(builder));
}

fn print_fields(value: &Value) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in flatten(value) {
        builder.push_record([key, scalar(&val)]);
    }
    println!("{}", Table::from(builder));
}

/// Flatten one nesting level into dotted keys (e.g. `dcf.y5`). Arrays stay
/// inline as JSON.
fn flatten(value: &Value) -> Vec<(String, Value)> {
    let mut fields = Vec::new();
    if let Value::Object(map) = value {
        for (key, val) in map {
            match val {
                Value::Object(inner) => {
                    for (inner_key, inner_val) in inner {
                        fields.push((format!("{key}.{inner_key}"), inner_val.clone()));
                    }
                }
                other => fields.push((key.clone(), other.clone())),
            }
        }
    }
    fields
}

fn print_envelope_footer(value: &Value) {
    let Some(map) = value.as_object() else {
        return;
    };

    if let Some(Value::Array(warnings)) = map.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {s}");
                }
            }
        }
    }

    if let Some(Value::String(methodology)) = map.get("methodology") {
        println!("\nMethodology: {methodology}");
    }
}
