use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::cell;

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) if map.contains_key("result") => print_envelope(map),
        Value::Object(map) => println!("{}", field_table(map)),
        Value::Array(rows) => println!("{}", rows_table(rows)),
        other => println!("{}", cell(other)),
    }
}

/// Simulations and quotes: the request, the figures, then notes.
fn print_envelope(envelope: &Map<String, Value>) {
    if let Some(Value::Object(request)) = envelope.get("input") {
        println!("Request\n{}\n", field_table(request));
    }

    match envelope.get("result") {
        Some(Value::Object(result)) => println!("{}", field_table(result)),
        Some(other) => println!("{}", cell(other)),
        None => {}
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                println!("  - {}", cell(w));
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn field_table(map: &Map<String, Value>) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &cell(val)]);
    }
    builder.build()
}

/// Configuration lists: one row per configuration, columns from the first.
fn rows_table(rows: &[Value]) -> String {
    let Some(Value::Object(first)) = rows.first() else {
        return if rows.is_empty() {
            "(empty)".to_string()
        } else {
            rows.iter().map(cell).collect::<Vec<_>>().join("\n")
        };
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(headers.iter().map(String::as_str));
    for row in rows {
        if let Value::Object(map) = row {
            builder.push_record(
                headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(cell).unwrap_or_default()),
            );
        }
    }
    builder.build().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rows_table_has_header_and_rows() {
        let rows = json!([
            {"id": 1, "available_terms": [6, 12], "is_active": true},
            {"id": 2, "available_terms": [24], "is_active": false}
        ]);
        let rendered = rows_table(rows.as_array().unwrap());
        assert!(rendered.contains("available_terms"));
        assert!(rendered.contains("6, 12"));
        assert!(rendered.contains("false"));
    }

    #[test]
    fn test_rows_table_empty() {
        assert_eq!(rows_table(&[]), "(empty)");
    }
}
