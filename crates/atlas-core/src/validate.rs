// ── Payload validation ──
//
// All-or-nothing gate between the raw JSON document and the domain model.
// The first failing record rejects the whole payload.

use std::collections::HashSet;

use serde_json::Value;
use tracing::debug;

use atlas_api::RawCountry;

use crate::error::CoreError;
use crate::model::Country;

/// JSON pointers that must resolve to non-empty strings on every record.
const REQUIRED_STRINGS: &[(&str, &str)] = &[
    ("/name/common", "name.common"),
    ("/cca3", "cca3"),
    ("/region", "region"),
    ("/flags/png", "flags.png"),
];

/// Short description of a JSON value's type for diagnostics.
fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn check_required(index: usize, record: &Value) -> Result<(), CoreError> {
    for (pointer, field) in REQUIRED_STRINGS {
        match record.pointer(pointer) {
            Some(Value::String(s)) if !s.is_empty() => {}
            Some(Value::String(_)) => {
                return Err(CoreError::MalformedRecordContent {
                    index,
                    reason: format!("`{field}` is empty"),
                });
            }
            Some(other) => {
                return Err(CoreError::MalformedRecordContent {
                    index,
                    reason: format!("`{field}` is {}, expected string", kind(other)),
                });
            }
            None => {
                return Err(CoreError::MalformedRecordContent {
                    index,
                    reason: format!("`{field}` is missing"),
                });
            }
        }
    }
    Ok(())
}

/// Validate a fetched document and convert it into countries, in source order.
///
/// Fails with `MalformedResponseShape` unless the document is an array, and
/// with `MalformedRecordContent` if any element lacks a required field, has
/// an ill-typed field, or repeats an earlier `cca3`.
pub fn validate_records(document: Value) -> Result<Vec<Country>, CoreError> {
    let Value::Array(items) = document else {
        return Err(CoreError::MalformedResponseShape {
            found: kind(&document).into(),
        });
    };

    let mut seen = HashSet::with_capacity(items.len());
    let mut countries = Vec::with_capacity(items.len());

    for (index, item) in items.into_iter().enumerate() {
        check_required(index, &item)?;

        let raw: RawCountry =
            serde_json::from_value(item).map_err(|e| CoreError::MalformedRecordContent {
                index,
                reason: e.to_string(),
            })?;

        if !seen.insert(raw.cca3.clone()) {
            return Err(CoreError::MalformedRecordContent {
                index,
                reason: format!("duplicate cca3 `{}`", raw.cca3),
            });
        }

        countries.push(Country::from(raw));
    }

    debug!(count = countries.len(), "payload validated");
    Ok(countries)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record(common: &str, code: &str, region: &str) -> Value {
        json!({
            "name": { "common": common, "official": common },
            "cca3": code,
            "region": region,
            "flags": { "png": format!("{code}.png"), "svg": "" }
        })
    }

    #[test]
    fn accepts_array_in_order() {
        let countries = validate_records(json!([
            record("France", "FRA", "Europe"),
            record("Japan", "JPN", "Asia"),
        ]))
        .unwrap();
        let names: Vec<_> = countries.iter().map(|c| c.name.common.as_str()).collect();
        assert_eq!(names, vec!["France", "Japan"]);
    }

    #[test]
    fn empty_array_is_valid() {
        assert!(validate_records(json!([])).unwrap().is_empty());
    }

    #[test]
    fn object_is_wrong_shape() {
        let err = validate_records(json!({ "status": 404 })).unwrap_err();
        assert_eq!(
            err,
            CoreError::MalformedResponseShape {
                found: "object".into()
            }
        );
    }

    #[test]
    fn missing_common_name_rejects_everything() {
        let mut bad = record("x", "XXX", "Europe");
        bad["name"].as_object_mut().unwrap().remove("common");
        let err = validate_records(json!([record("France", "FRA", "Europe"), bad])).unwrap_err();
        match err {
            CoreError::MalformedRecordContent { index, reason } => {
                assert_eq!(index, 1);
                assert!(reason.contains("name.common"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn empty_required_string_is_rejected() {
        let err = validate_records(json!([record("France", "FRA", "")])).unwrap_err();
        assert!(matches!(err, CoreError::MalformedRecordContent { index: 0, .. }));
    }

    #[test]
    fn non_string_code_is_rejected() {
        let mut bad = record("France", "FRA", "Europe");
        bad["cca3"] = json!(250);
        let err = validate_records(json!([bad])).unwrap_err();
        assert!(err.diagnostic().contains("number"));
    }

    #[test]
    fn missing_flag_is_rejected() {
        let mut bad = record("France", "FRA", "Europe");
        bad.as_object_mut().unwrap().remove("flags");
        assert!(validate_records(json!([bad])).is_err());
    }

    #[test]
    fn ill_typed_optional_field_is_rejected() {
        let mut bad = record("France", "FRA", "Europe");
        bad["population"] = json!("lots");
        let err = validate_records(json!([bad])).unwrap_err();
        assert!(matches!(err, CoreError::MalformedRecordContent { .. }));
    }

    #[test]
    fn duplicate_code_is_rejected() {
        let err = validate_records(json!([
            record("France", "FRA", "Europe"),
            record("Also France", "FRA", "Europe"),
        ]))
        .unwrap_err();
        assert!(err.diagnostic().contains("duplicate"));
    }
}
