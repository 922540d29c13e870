use serde_json::Value;

use super::cell;

/// Fields answered first, in order: the installment for simulations and
/// quotes, the verdict for validations, the id for configurations.
const PRIORITY_KEYS: [&str; 4] = ["monthly_payment", "valid", "id", "monthly_rate_pct"];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_answer(value));
}

fn minimal_answer(value: &Value) -> String {
    let target = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match target {
        Value::Object(map) => {
            for key in PRIORITY_KEYS {
                if let Some(val) = map.get(key).filter(|v| !v.is_null()) {
                    return cell(val);
                }
            }
            match map.iter().next() {
                Some((key, val)) => format!("{}: {}", key, cell(val)),
                None => String::new(),
            }
        }
        // Configuration lists answer with their ids
        Value::Array(items) => items
            .iter()
            .map(minimal_answer)
            .collect::<Vec<_>>()
            .join("\n"),
        other => cell(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_quote_answers_installment() {
        let value = json!({"result": {"requested_amount": "1000000", "monthly_payment": "90541.68"}});
        assert_eq!(minimal_answer(&value), "90541.68");
    }

    #[test]
    fn test_validation_answers_verdict() {
        let value = json!({"valid": false, "errors": ["The minimum amount is 100000"]});
        assert_eq!(minimal_answer(&value), "false");
    }

    #[test]
    fn test_config_list_answers_ids() {
        let value = json!([{"id": 1, "monthly_rate_pct": "1.3"}, {"id": 2, "monthly_rate_pct": "1.8"}]);
        assert_eq!(minimal_answer(&value), "1\n2");
    }
}
