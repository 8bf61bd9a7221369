//! Response envelope reassembly.

use serde_json::Value;

use crate::catalog::types::{Envelope, ResultSet, RESULTS_FIELD};

/// Put `results` back into `envelope`, leaving every other field untouched.
pub fn assemble(mut envelope: Envelope, results: ResultSet) -> Envelope {
    let items = results.into_iter().map(Value::Object).collect();
    envelope.insert(RESULTS_FIELD, Value::Array(items));
    envelope
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::normalize::normalize;
    use crate::catalog::sort::sort;
    use crate::catalog::types::{SortDirection, SortSpec};
    use serde_json::json;

    #[test]
    fn test_metadata_passes_through() {
        let original = json!({
            "count": 3,
            "next": "https://swapi.dev/api/people/?page=2",
            "previous": null,
            "results": [{"name": "b"}, {"name": "c"}, {"name": "a"}]
        });
        let mut envelope: Envelope = serde_json::from_value(original.clone()).unwrap();

        let records = normalize(&mut envelope).unwrap();
        let sorted = sort(records, &SortSpec::new("name", SortDirection::Ascending));
        let out = serde_json::to_value(assemble(envelope, sorted)).unwrap();

        for field in ["count", "next", "previous"] {
            assert_eq!(out[field], original[field]);
        }
        assert_eq!(out["results"], json!([{"name": "a"}, {"name": "b"}, {"name": "c"}]));
    }

    #[test]
    fn test_field_order_preserved() {
        let mut envelope: Envelope =
            serde_json::from_str(r#"{"count":1,"results":[{"z":1,"a":2}],"next":null}"#).unwrap();
        let records = normalize(&mut envelope).unwrap();
        let out = serde_json::to_string(&assemble(envelope, records)).unwrap();
        assert_eq!(out, r#"{"count":1,"results":[{"z":1,"a":2}],"next":null}"#);
    }
}
