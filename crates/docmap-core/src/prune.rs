//! None-pruning for emitted JSON.
//!
//! A recursive walk that strips mapping entries whose value is the
//! semantic none (JSON null; NaN cannot be represented by
//! `serde_json` and arrives as null already). Empty strings, `false`,
//! zeros, empty arrays, and empty objects are preserved. The walk does
//! not mutate its input; array elements are never removed, only
//! descended into.

use serde_json::Value;

/// Return a copy of `value` with every null mapping entry removed,
/// recursively.
pub fn prune_nones(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(_, entry)| !entry.is_null())
                .map(|(key, entry)| (key.clone(), prune_nones(entry)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(prune_nones).collect()),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strips_null_entries_recursively() {
        let input = json!({
            "keep": "x",
            "drop": null,
            "nested": {"also_drop": null, "keep": 1},
            "list": [{"drop": null, "keep": 2}],
        });
        assert_eq!(
            prune_nones(&input),
            json!({
                "keep": "x",
                "nested": {"keep": 1},
                "list": [{"keep": 2}],
            })
        );
    }

    #[test]
    fn preserves_empty_and_falsy_values() {
        let input = json!({
            "empty_string": "",
            "boolean": false,
            "zero": 0,
            "empty_list": [],
            "empty_map": {},
        });
        assert_eq!(prune_nones(&input), input);
    }

    #[test]
    fn does_not_remove_null_array_elements() {
        let input = json!({"list": [null, 1]});
        assert_eq!(prune_nones(&input), json!({"list": [null, 1]}));
    }

    #[test]
    fn does_not_mutate_input() {
        let input = json!({"drop": null, "keep": 1});
        let _ = prune_nones(&input);
        assert_eq!(input, json!({"drop": null, "keep": 1}));
    }
}
