//! Singleton-or-list coercion for term document fields.
use log::warn;
use serde_json::Value;

/// Turns an optional field that may hold one record or a list of records into
/// a list of records.
///
/// `context` names the field in data-quality warnings. Anything that is neither
/// an object nor an array is treated as absent, as are array members that are
/// not objects.
pub fn records<'a>(value: Option<&'a Value>, context: &str) -> Vec<&'a Value> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(record @ Value::Object(_)) => vec![record],
        Some(Value::Array(items)) => {
            let mut out = Vec::with_capacity(items.len());
            for (idx, item) in items.iter().enumerate() {
                match item {
                    Value::Object(_) => out.push(item),
                    Value::Null => {}
                    other => warn!(
                        target: "data_quality",
                        "Skipping entry {} of '{}': expected an object, found {}",
                        idx,
                        context,
                        kind_of(other)
                    ),
                }
            }
            out
        }
        Some(other) => {
            warn!(
                target: "data_quality",
                "Ignoring '{}': expected an object or a list of objects, found {}",
                context,
                kind_of(other)
            );
            Vec::new()
        }
    }
}

/// Short JSON type name, used in log messages and errors.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_and_null_become_empty() {
        assert!(records(None, "x").is_empty());
        assert!(records(Some(&Value::Null), "x").is_empty());
    }

    #[test]
    fn singleton_becomes_one_element_list() {
        let single = json!({"name": "A"});
        assert_eq!(records(Some(&single), "culture medium"), vec![&single]);
    }

    #[test]
    fn list_passes_through_in_order() {
        let list = json!([{"name": "A"}, {"name": "B"}]);
        let out = records(Some(&list), "culture medium");
        assert_eq!(out.len(), 2);
        assert_eq!(out[1], &json!({"name": "B"}));
    }

    #[test]
    fn singleton_and_one_element_list_agree() {
        let single = json!({"name": "A"});
        let list = json!([{"name": "A"}]);
        assert_eq!(records(Some(&single), "x"), records(Some(&list), "x"));
    }

    #[test]
    fn scalars_are_treated_as_absent() {
        assert!(records(Some(&json!("soil")), "isolation").is_empty());
        assert!(records(Some(&json!(3)), "isolation").is_empty());
    }

    #[test]
    fn non_object_members_are_dropped() {
        let mixed = json!([{"a": 1}, "stray", null, 4, {"b": 2}]);
        let out = records(Some(&mixed), "enzymes");
        assert_eq!(out, vec![&json!({"a": 1}), &json!({"b": 2})]);
    }
}
