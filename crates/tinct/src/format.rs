//! Grouped JSON formatting for hand-maintained theme files.
//!
//! Object keys are grouped by the segment before their first dot (keys
//! without a dot form one leading group). Groups and the keys inside them are
//! sorted, and a blank line separates consecutive groups:
//!
//! ```text
//! {
//!   "background": "#1A1B26",
//!   "text": "#C0CAF5",
//!
//!   "editor.background": "#1A1B26",
//!   "editor.foreground": "#C0CAF5"
//! }
//! ```

use serde_json::{Map, Value};

/// Renders `value` in grouped form, ending with a newline.
pub fn to_grouped_string(value: &Value) -> String {
    let mut formatter = Formatter::default();
    formatter.value(value, 0);
    let mut out = formatter.out;
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

/// The group a key sorts into.
pub fn key_prefix(key: &str) -> &str {
    key.split_once('.').map_or("", |(prefix, _)| prefix)
}

/// Keys of `map` in group order.
pub fn grouped_keys(map: &Map<String, Value>) -> Vec<&str> {
    let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
    keys.sort_by(|a, b| (key_prefix(a), *a).cmp(&(key_prefix(b), *b)));
    keys
}

#[derive(Default)]
struct Formatter {
    out: String,
}

impl Formatter {
    fn indent(&mut self, width: usize) {
        self.out.extend(std::iter::repeat(' ').take(width));
    }

    fn line(&mut self, text: &str) {
        self.out.push_str(text);
        self.out.push('\n');
    }

    /// Turns the last line into a comma-terminated one.
    fn separate(&mut self) {
        if self.out.ends_with('\n') {
            self.out.pop();
        }
        self.out.push_str(",\n");
    }

    fn value(&mut self, value: &Value, indent: usize) {
        self.indent(indent);
        self.nested(value, indent);
    }

    /// Writes `value` starting at the current column.
    fn nested(&mut self, value: &Value, indent: usize) {
        match value {
            Value::Object(map) => {
                self.line("{");
                self.object_body(map, indent);
                self.indent(indent);
                self.line("}");
            }
            Value::Array(items) => {
                self.line("[");
                self.array_body(items, indent);
                self.indent(indent);
                self.line("]");
            }
            scalar => self.line(&scalar.to_string()),
        }
    }

    fn object_body(&mut self, map: &Map<String, Value>, indent: usize) {
        let keys = grouped_keys(map);
        for (i, key) in keys.iter().enumerate() {
            self.indent(indent + 2);
            self.out.push_str(&Value::from(*key).to_string());
            self.out.push_str(": ");
            if let Some(value) = map.get(*key) {
                self.nested(value, indent + 2);
            }

            if let Some(next) = keys.get(i + 1) {
                self.separate();
                if key_prefix(key) != key_prefix(next) {
                    self.out.push('\n');
                }
            }
        }
    }

    fn array_body(&mut self, items: &[Value], indent: usize) {
        for (i, item) in items.iter().enumerate() {
            self.value(item, indent + 2);
            if i + 1 < items.len() {
                self.separate();
            }
        }
    }
}
