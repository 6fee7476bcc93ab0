// src/domain/audit/diff.rs
use serde_json::{Map, Value};

/// Dotted paths whose values differ between two snapshots.
///
/// Objects are compared key by key; any other value (arrays included) is
/// compared as a whole. A missing snapshot counts as an empty object, so a
/// create lists every top-level key of the new state.
pub fn changed_fields(before: Option<&Value>, after: Option<&Value>) -> Vec<String> {
    let empty = Value::Object(Map::new());
    let mut changed = Vec::new();
    walk(
        "",
        before.unwrap_or(&empty),
        after.unwrap_or(&empty),
        &mut changed,
    );
    changed.sort();
    changed
}

fn walk(prefix: &str, before: &Value, after: &Value, out: &mut Vec<String>) {
    match (before, after) {
        (Value::Object(old), Value::Object(new)) => {
            for (key, old_value) in old {
                let path = join(prefix, key);
                match new.get(key) {
                    Some(new_value) => walk(&path, old_value, new_value, out),
                    None => out.push(path),
                }
            }
            for key in new.keys().filter(|key| !old.contains_key(*key)) {
                out.push(join(prefix, key));
            }
        }
        (old, new) if old != new => out.push(prefix.to_string()),
        _ => {}
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_changes_use_dotted_paths() {
        let before = json!({
            "version": 1,
            "status": "draft",
            "translations": {"en": {"title": "Old", "slug": "x"}}
        });
        let after = json!({
            "version": 2,
            "status": "draft",
            "translations": {
                "en": {"title": "New", "slug": "x"},
                "de": {"title": "Neu", "slug": "x"}
            }
        });
        assert_eq!(
            changed_fields(Some(&before), Some(&after)),
            vec!["translations.de", "translations.en.title", "version"]
        );
    }

    #[test]
    fn create_lists_top_level_keys() {
        let after = json!({"slug": "x", "version": 1});
        assert_eq!(changed_fields(None, Some(&after)), vec!["slug", "version"]);
        assert!(changed_fields(Some(&after), Some(&after)).is_empty());
    }
}
