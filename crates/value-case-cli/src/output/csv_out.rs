use serde_json::Value;
use std::io;

use super::{scalar, unwrap_result};

/// Write the result payload as CSV to stdout. Arrays of records become one
/// line per record with a header row; objects become field,value lines.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match unwrap_result(value) {
        Value::Array(rows) => write_records(&mut wtr, rows),
        Value::Object(map) => {
            let _ = wtr.write_record(["field", "value"]);
            for (key, val) in map {
                let _ = wtr.write_record([key.as_str(), &scalar(val)]);
            }
        }
        other => {
            let _ = wtr.write_record([&scalar(other)]);
        }
    }

    let _ = wtr.flush();
}

fn write_records(wtr: &mut csv::Writer<io::StdoutLock<'_>>, rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        for row in rows {
            let _ = wtr.write_record([&scalar(row)]);
        }
        return;
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    let _ = wtr.write_record(&headers);

    for row in rows {
        if let Value::Object(map) = row {
            let record: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(scalar).unwrap_or_default())
                .collect();
            let _ = wtr.write_record(&record);
        }
    }
}
