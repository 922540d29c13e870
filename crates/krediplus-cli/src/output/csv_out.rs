use serde_json::{Map, Value};
use std::io::{self, Write};

use super::cell;

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    if let Err(e) = write_csv(stdout.lock(), value) {
        eprintln!("CSV output error: {}", e);
    }
}

/// Objects become `field,value` pairs (request fields prefixed `input.`);
/// configuration lists become one row per configuration.
fn write_csv<W: Write>(out: W, value: &Value) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);

    match value {
        Value::Object(map) => {
            wtr.write_record(["field", "value"])?;
            match map.get("result") {
                Some(Value::Object(result)) => {
                    if let Some(Value::Object(request)) = map.get("input") {
                        write_fields(&mut wtr, request, "input.")?;
                    }
                    write_fields(&mut wtr, result, "")?;
                }
                _ => write_fields(&mut wtr, map, "")?,
            }
        }
        Value::Array(rows) => write_rows(&mut wtr, rows)?,
        other => wtr.write_record([cell(other)])?,
    }

    wtr.flush()?;
    Ok(())
}

fn write_fields<W: Write>(wtr: &mut csv::Writer<W>, map: &Map<String, Value>, prefix: &str) -> csv::Result<()> {
    for (key, val) in map {
        wtr.write_record([format!("{prefix}{key}"), cell(val)])?;
    }
    Ok(())
}

fn write_rows<W: Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) -> csv::Result<()> {
    let Some(Value::Object(first)) = rows.first() else {
        for row in rows {
            wtr.write_record([cell(row)])?;
        }
        return Ok(());
    };

    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    wtr.write_record(&headers)?;
    for row in rows {
        if let Value::Object(map) = row {
            wtr.write_record(headers.iter().map(|h| map.get(*h).map(cell).unwrap_or_default()))?;
        }
    }
    Ok(())
}
