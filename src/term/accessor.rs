//! Safe reads into term documents of unknown shape.
use log::warn;
use serde_json::Value;

/// One step of a lookup path: an object key or an array index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'p> {
    Key(&'p str),
    Index(usize),
}

impl<'p> From<&'p str> for Segment<'p> {
    fn from(key: &'p str) -> Self {
        Segment::Key(key)
    }
}

impl From<usize> for Segment<'_> {
    fn from(index: usize) -> Self {
        Segment::Index(index)
    }
}

/// Follows `path` from `doc`, returning `None` as soon as a step is missing,
/// null, or lands on a value of the wrong kind. A trailing `null` is absent too.
pub fn lookup<'a>(doc: &'a Value, path: &[Segment<'_>]) -> Option<&'a Value> {
    let mut current = doc;
    for segment in path {
        current = match (segment, current) {
            (Segment::Key(key), Value::Object(map)) => map.get(*key)?,
            (Segment::Index(idx), Value::Array(items)) => items.get(*idx)?,
            _ => return None,
        };
    }
    if current.is_null() { None } else { Some(current) }
}

/// Shorthand for a single-key lookup.
pub fn field<'a>(doc: &'a Value, key: &str) -> Option<&'a Value> {
    lookup(doc, &[Segment::Key(key)])
}

/// Display text for a scalar value.
///
/// Strings are trimmed and blank strings count as absent. Numbers and booleans
/// keep their JSON spelling, arrays of scalars are joined with ", ". Objects are
/// not text: they are reported as a data-quality problem and treated as absent.
pub fn text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => {
            if items.iter().any(|item| item.is_object() || item.is_array()) {
                warn!(
                    target: "data_quality",
                    "Expected a scalar list but found nested values; field skipped"
                );
                return None;
            }
            let parts: Vec<String> = items.iter().filter_map(text).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(", "))
            }
        }
        Value::Object(_) => {
            warn!(
                target: "data_quality",
                "Expected a scalar but found an object; field skipped"
            );
            None
        }
    }
}

/// Text at `key` of `doc`, or `None` when missing, null, blank, or not a scalar.
pub fn text_field(doc: &Value, key: &str) -> Option<String> {
    field(doc, key).and_then(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lookup_walks_keys_and_indices() {
        let doc = json!({"LineageEx": {"Taxon": [{"ScientificName": "root"}, {"ScientificName": "Bacteria"}]}});
        let found = lookup(&doc, &["LineageEx".into(), "Taxon".into(), 1.into(), "ScientificName".into()]);
        assert_eq!(found, Some(&json!("Bacteria")));
    }

    #[test]
    fn lookup_never_fails_on_wrong_shapes() {
        let doc = json!({"a": {"b": [1, 2]}, "n": null});
        assert!(lookup(&doc, &["missing".into(), "b".into()]).is_none());
        assert!(lookup(&doc, &["a".into(), 0.into()]).is_none());
        assert!(lookup(&doc, &["a".into(), "b".into(), 9.into()]).is_none());
        assert!(lookup(&doc, &["a".into(), "b".into(), 0.into(), "deeper".into()]).is_none());
        assert!(lookup(&doc, &["n".into()]).is_none());
        assert!(lookup(&json!("scalar"), &["a".into()]).is_none());
    }

    #[test]
    fn empty_path_returns_document() {
        let doc = json!({"a": 1});
        assert_eq!(lookup(&doc, &[]), Some(&doc));
        assert!(lookup(&Value::Null, &[]).is_none());
    }

    #[test]
    fn text_renders_scalars() {
        assert_eq!(text(&json!("  rod ")), Some("rod".to_string()));
        assert_eq!(text(&json!("   ")), None);
        assert_eq!(text(&json!(1498)), Some("1498".to_string()));
        assert_eq!(text(&json!(true)), Some("true".to_string()));
        assert_eq!(text(&json!(["+", "-"])), Some("+, -".to_string()));
        assert_eq!(text(&json!([])), None);
        assert_eq!(text(&json!({"nested": 1})), None);
        assert_eq!(text(&json!([{"nested": 1}])), None);
    }

    #[test]
    fn text_field_reads_one_key() {
        let doc = json!({"name": "R2A", "growth": ""});
        assert_eq!(text_field(&doc, "name"), Some("R2A".to_string()));
        assert_eq!(text_field(&doc, "growth"), None);
        assert_eq!(text_field(&doc, "link"), None);
    }
}
