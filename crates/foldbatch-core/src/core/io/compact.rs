//! Diff-friendly JSON rendering.
//!
//! Objects are always expanded one member per line. Lists that hold at least one object
//! are expanded one element per line; all other lists are written on a single line when
//! [`CompactLayout::inline_scalar_lists`] is set. This keeps long seed lists and residue
//! index arrays readable while job files stay stable under `diff`.

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompactLayout {
    pub indent: usize,
    pub inline_scalar_lists: bool,
}

impl Default for CompactLayout {
    fn default() -> Self {
        Self {
            indent: 2,
            inline_scalar_lists: true,
        }
    }
}

/// Renders any serializable value with `layout`.
pub fn to_string<T: Serialize + ?Sized>(
    value: &T,
    layout: CompactLayout,
) -> Result<String, serde_json::Error> {
    let value = serde_json::to_value(value)?;
    let mut out = String::new();
    render(&value, 0, layout, &mut out)?;
    Ok(out)
}

fn render(
    value: &Value,
    level: usize,
    layout: CompactLayout,
    out: &mut String,
) -> Result<(), serde_json::Error> {
    match value {
        Value::Object(map) if map.is_empty() => out.push_str("{}"),
        Value::Object(map) => {
            out.push_str("{\n");
            for (i, (key, member)) in map.iter().enumerate() {
                if i > 0 {
                    out.push_str(",\n");
                }
                pad(out, (level + 1) * layout.indent);
                out.push_str(&serde_json::to_string(key)?);
                out.push_str(": ");
                render(member, level + 1, layout, out)?;
            }
            out.push('\n');
            pad(out, level * layout.indent);
            out.push('}');
        }
        Value::Array(items) if items.is_empty() => out.push_str("[]"),
        Value::Array(items) if layout.inline_scalar_lists && !items.iter().any(Value::is_object) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                render(item, level, layout, out)?;
            }
            out.push(']');
        }
        Value::Array(items) => {
            out.push_str("[\n");
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(",\n");
                }
                pad(out, (level + 1) * layout.indent);
                render(item, level + 1, layout, out)?;
            }
            out.push('\n');
            pad(out, level * layout.indent);
            out.push(']');
        }
        scalar => out.push_str(&serde_json::to_string(scalar)?),
    }
    Ok(())
}

fn pad(out: &mut String, width: usize) {
    out.extend(std::iter::repeat_n(' ', width));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalar_lists_are_inlined_and_object_lists_expanded() {
        let value = json!({
            "name": "A_B",
            "sequences": [{"protein": {"id": "A"}}],
            "modelSeeds": [1, 2, 3],
            "userCCD": null
        });
        let expected = "{\n  \"name\": \"A_B\",\n  \"sequences\": [\n    {\n      \"protein\": {\n        \"id\": \"A\"\n      }\n    }\n  ],\n  \"modelSeeds\": [1,2,3],\n  \"userCCD\": null\n}";
        assert_eq!(to_string(&value, CompactLayout::default()).unwrap(), expected);
    }

    #[test]
    fn expanded_layout_puts_every_list_element_on_its_own_line() {
        let layout = CompactLayout {
            indent: 4,
            inline_scalar_lists: false,
        };
        let rendered = to_string(&json!({"seeds": [1, 2]}), layout).unwrap();
        assert_eq!(rendered, "{\n    \"seeds\": [\n        1,\n        2\n    ]\n}");
    }

    #[test]
    fn empty_containers_stay_on_one_line() {
        let rendered = to_string(&json!({"a": [], "b": {}}), CompactLayout::default()).unwrap();
        assert_eq!(rendered, "{\n  \"a\": [],\n  \"b\": {}\n}");
    }

    #[test]
    fn output_round_trips_through_a_json_parser() {
        let value = json!({"x": [[1, 2], {"y": "z\n"}], "w": 1.5});
        let rendered = to_string(&value, CompactLayout::default()).unwrap();
        let parsed: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, value);
    }
}
