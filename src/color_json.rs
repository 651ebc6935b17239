//! Purpose: Render pretty JSON with optional ANSI colorization for CLI output.
//! Exports: `Highlighter`.
//! Role: Small, pure formatter used by CLI emission paths.
//! Invariants: When color is disabled, output equals serde_json::to_string_pretty.
//! Invariants: Only the sole key of an array-element object that names a registered shape
//! gets the discriminator color; payload fields of the same name do not.
use serde_json::{Map, Value};

const INDENT: &str = "  ";

// 8/16-color palette; bright variants lose contrast on some themes.
const COLOR_KEY: &str = "36";
const COLOR_DISCRIMINATOR: &str = "1;34";
const COLOR_STRING: &str = "32";
const COLOR_NUMBER: &str = "33";
const COLOR_BOOL: &str = "35";
const COLOR_NULL: &str = "39";
const COLOR_PUNCT: &str = "39";

pub struct Highlighter<'a> {
    use_color: bool,
    discriminators: &'a [&'static str],
}

impl<'a> Highlighter<'a> {
    pub fn new(use_color: bool, discriminators: &'a [&'static str]) -> Self {
        Self {
            use_color,
            discriminators,
        }
    }

    pub fn render(&self, value: &Value) -> String {
        let mut out = String::new();
        self.value(value, 0, false, &mut out);
        out
    }

    fn value(&self, value: &Value, depth: usize, in_array: bool, out: &mut String) {
        match value {
            Value::Null => self.paint("null", COLOR_NULL, out),
            Value::Bool(flag) => self.paint(if *flag { "true" } else { "false" }, COLOR_BOOL, out),
            Value::Number(num) => self.paint(&num.to_string(), COLOR_NUMBER, out),
            Value::String(text) => self.paint(&quote(text), COLOR_STRING, out),
            Value::Array(items) => self.array(items, depth, out),
            Value::Object(map) => self.object(map, depth, in_array, out),
        }
    }

    fn array(&self, items: &[Value], depth: usize, out: &mut String) {
        if items.is_empty() {
            self.paint("[]", COLOR_PUNCT, out);
            return;
        }
        self.paint("[", COLOR_PUNCT, out);
        out.push('\n');
        for (idx, item) in items.iter().enumerate() {
            indent(depth + 1, out);
            self.value(item, depth + 1, true, out);
            if idx + 1 < items.len() {
                self.paint(",", COLOR_PUNCT, out);
            }
            out.push('\n');
        }
        indent(depth, out);
        self.paint("]", COLOR_PUNCT, out);
    }

    fn object(&self, map: &Map<String, Value>, depth: usize, in_array: bool, out: &mut String) {
        if map.is_empty() {
            self.paint("{}", COLOR_PUNCT, out);
            return;
        }
        // An entry is a single-keyed object sitting directly in `data`.
        let entry = in_array && map.len() == 1;
        self.paint("{", COLOR_PUNCT, out);
        out.push('\n');
        for (idx, (key, value)) in map.iter().enumerate() {
            indent(depth + 1, out);
            let color = if entry && self.discriminators.contains(&key.as_str()) {
                COLOR_DISCRIMINATOR
            } else {
                COLOR_KEY
            };
            self.paint(&quote(key), color, out);
            self.paint(":", COLOR_PUNCT, out);
            out.push(' ');
            self.value(value, depth + 1, false, out);
            if idx + 1 < map.len() {
                self.paint(",", COLOR_PUNCT, out);
            }
            out.push('\n');
        }
        indent(depth, out);
        self.paint("}", COLOR_PUNCT, out);
    }

    fn paint(&self, text: &str, color: &str, out: &mut String) {
        if self.use_color {
            out.push_str(&format!("\u{1b}[{color}m{text}\u{1b}[0m"));
        } else {
            out.push_str(text);
        }
    }
}

fn quote(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string())
}

fn indent(level: usize, out: &mut String) {
    out.push_str(&INDENT.repeat(level));
}

#[cfg(test)]
mod tests {
    use super::Highlighter;
    use serde_json::json;

    #[test]
    fn plain_output_matches_serde_pretty() {
        let value = json!({
            "name": "x",
            "data": [{"static": {"key": "keyA"}}, {"selector": {"selector": "selA"}}],
            "flags": [1, true, null, {}]
        });
        let plain = Highlighter::new(false, &["static", "selector"]).render(&value);
        let pretty = serde_json::to_string_pretty(&value).expect("pretty");
        assert_eq!(plain, pretty);
    }

    #[test]
    fn entry_discriminators_get_their_own_color() {
        let value = json!({"data": [{"static": {"key": "keyA"}}]});
        let colored = Highlighter::new(true, &["static"]).render(&value);
        assert!(colored.contains("\u{1b}[1;34m\"static\"\u{1b}[0m"));
        assert!(colored.contains("\u{1b}[36m\"key\"\u{1b}[0m"));
        assert!(colored.contains("\u{1b}[32m\"keyA\"\u{1b}[0m"));
    }

    #[test]
    fn payload_field_named_like_a_shape_keeps_key_color() {
        let value = json!({"data": [{"selector": {"selector": "selA"}}]});
        let colored = Highlighter::new(true, &["static", "selector"]).render(&value);
        assert_eq!(colored.matches("\u{1b}[1;34m\"selector\"\u{1b}[0m").count(), 1);
        assert_eq!(colored.matches("\u{1b}[36m\"selector\"\u{1b}[0m").count(), 1);
    }

    #[test]
    fn top_level_and_multi_key_objects_are_not_entries() {
        let colored = Highlighter::new(true, &["static"]).render(&json!({"static": 1}));
        assert!(!colored.contains("1;34m"));

        let mixed = json!([{"static": {"key": "k"}, "selector": {"selector": "s"}}]);
        let colored = Highlighter::new(true, &["static", "selector"]).render(&mixed);
        assert!(!colored.contains("1;34m"));
    }
}
