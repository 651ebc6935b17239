//! Purpose: Report where two JSON values differ, for round-trip diagnostics.
//! Exports: `Difference`, `value_differences`.
//! Role: Pure structural comparison used by the `roundtrip` command.
//! Invariants: Object key order is ignored; array order is significant.
//! Invariants: Paths are JSON Pointers (RFC 6901) relative to the compared roots.
use serde_json::Value;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Difference {
    /// Present on the left only.
    Removed(String),
    /// Present on the right only.
    Added(String),
    Changed(String),
}

impl Difference {
    pub fn path(&self) -> &str {
        match self {
            Difference::Removed(path) | Difference::Added(path) | Difference::Changed(path) => path,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difference::Removed(_) => "removed",
            Difference::Added(_) => "added",
            Difference::Changed(_) => "changed",
        }
    }
}

pub fn value_differences(left: &Value, right: &Value) -> Vec<Difference> {
    let mut out = Vec::new();
    walk(left, right, &mut String::new(), &mut out);
    out
}

fn walk(left: &Value, right: &Value, path: &mut String, out: &mut Vec<Difference>) {
    match (left, right) {
        (Value::Object(a), Value::Object(b)) => {
            for (key, lval) in a {
                let len = path.len();
                push_segment(path, key);
                match b.get(key) {
                    Some(rval) => walk(lval, rval, path, out),
                    None => out.push(Difference::Removed(path.clone())),
                }
                path.truncate(len);
            }
            for key in b.keys().filter(|key| !a.contains_key(*key)) {
                let len = path.len();
                push_segment(path, key);
                out.push(Difference::Added(path.clone()));
                path.truncate(len);
            }
        }
        (Value::Array(a), Value::Array(b)) => {
            for idx in 0..a.len().max(b.len()) {
                let len = path.len();
                push_segment(path, &idx.to_string());
                match (a.get(idx), b.get(idx)) {
                    (Some(lval), Some(rval)) => walk(lval, rval, path, out),
                    (Some(_), None) => out.push(Difference::Removed(path.clone())),
                    (None, Some(_)) => out.push(Difference::Added(path.clone())),
                    (None, None) => {}
                }
                path.truncate(len);
            }
        }
        _ if left == right => {}
        _ => out.push(Difference::Changed(path.clone())),
    }
}

fn push_segment(path: &mut String, segment: &str) {
    path.push('/');
    for ch in segment.chars() {
        match ch {
            '~' => path.push_str("~0"),
            '/' => path.push_str("~1"),
            _ => path.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Difference, value_differences};
    use serde_json::json;

    #[test]
    fn equal_values_ignore_key_order() {
        let a = json!({"name": "x", "data": [{"static": {"key": "k"}}]});
        let b = json!({"data": [{"static": {"key": "k"}}], "name": "x"});
        assert!(value_differences(&a, &b).is_empty());
    }

    #[test]
    fn reports_removed_added_and_changed_paths() {
        let a = json!({"name": "x", "extra": 1, "data": [{"static": {"key": "a/b"}}]});
        let b = json!({"name": "y", "data": [{"static": {"key": "a/b"}}, {"selector": {"selector": "s"}}]});
        let diffs = value_differences(&a, &b);
        assert!(diffs.contains(&Difference::Removed("/extra".to_string())));
        assert!(diffs.contains(&Difference::Changed("/name".to_string())));
        assert!(diffs.contains(&Difference::Added("/data/1".to_string())));
        assert_eq!(diffs.len(), 3);
    }

    #[test]
    fn escapes_pointer_segments() {
        let diffs = value_differences(&json!({"a/b~c": 1}), &json!({}));
        assert_eq!(diffs[0].path(), "/a~1b~0c");
        assert_eq!(diffs[0].label(), "removed");
    }
}
