//! Result extraction from a decoded envelope.

use serde_json::Value;

use crate::catalog::types::{Envelope, ResultSet, ShapeError, RESULTS_FIELD};

/// Take the result list out of `envelope`.
///
/// `results` must be an array of objects. The first non-object element
/// fails the whole call, and on any failure the envelope is left as it was.
/// On success the `results` slot holds an empty array until
/// [`assemble`](crate::catalog::assemble::assemble) puts records back.
pub fn normalize(envelope: &mut Envelope) -> Result<ResultSet, ShapeError> {
    let items = match envelope.get_mut(RESULTS_FIELD) {
        Some(Value::Array(items)) => items,
        _ => return Err(ShapeError::MissingResults),
    };

    if let Some(index) = items.iter().position(|item| !item.is_object()) {
        return Err(ShapeError::InvalidItem { index });
    }

    let records = std::mem::take(items)
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(record) => Some(record),
            _ => None,
        })
        .collect();

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(value: Value) -> Envelope {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_extracts_records() {
        let mut env = envelope(json!({
            "count": 2,
            "results": [{"name": "Luke"}, {"name": "Leia", "height": "150"}]
        }));

        let records = normalize(&mut env).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].get("height"), Some(&json!("150")));
        assert_eq!(env.get("count"), Some(&json!(2)));
    }

    #[test]
    fn test_empty_results() {
        let mut env = envelope(json!({"count": 0, "results": []}));
        assert!(normalize(&mut env).unwrap().is_empty());
    }

    #[test]
    fn test_missing_results() {
        let mut env = envelope(json!({"count": 0}));
        assert_eq!(normalize(&mut env), Err(ShapeError::MissingResults));
    }

    #[test]
    fn test_results_not_an_array() {
        for results in [json!({"name": "Luke"}), json!("Luke"), json!(null), json!(3)] {
            let mut env = envelope(json!({ "results": results }));
            assert_eq!(normalize(&mut env), Err(ShapeError::MissingResults));
        }
    }

    #[test]
    fn test_first_invalid_item_is_reported() {
        let mut env = envelope(json!({
            "results": [{"name": "Luke"}, "Leia", 7, {"name": "Han"}]
        }));
        assert_eq!(normalize(&mut env), Err(ShapeError::InvalidItem { index: 1 }));

        // Nothing was taken out on failure.
        assert_eq!(
            env.get("results"),
            Some(&json!([{"name": "Luke"}, "Leia", 7, {"name": "Han"}]))
        );
    }
}
