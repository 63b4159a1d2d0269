use super::{LoadError, read_json};
use crate::core::models::compound::ScreenEntry;
use serde_json::Value;
use std::path::Path;
use tracing::warn;

/// An element of the screen file that could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub index: usize,
    pub reason: &'static str,
}

/// Parsed compound screen: usable entries in file order plus the skipped ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenFile {
    pub entries: Vec<ScreenEntry>,
    pub skipped: Vec<SkippedEntry>,
}

/// Reads a JSON array of `{"ID": ..., "SMILES": ...}` records.
pub fn read_screen(path: &Path) -> Result<ScreenFile, LoadError> {
    let values: Vec<Value> = read_json(path)?;
    Ok(parse_screen(values))
}

/// Sorts raw screen elements into usable entries and skipped ones.
///
/// Elements that are not objects or lack an `ID` are skipped with a warning; entries
/// with an empty notation are skipped silently.
pub fn parse_screen(values: Vec<Value>) -> ScreenFile {
    let mut screen = ScreenFile::default();
    for (index, value) in values.into_iter().enumerate() {
        let Value::Object(mut object) = value else {
            warn!("Screen item {} is not an object. Skipping.", index);
            screen.skipped.push(SkippedEntry {
                index,
                reason: "not an object",
            });
            continue;
        };
        let id = match object.remove("ID") {
            Some(Value::String(s)) => s,
            Some(Value::Number(n)) => n.to_string(),
            _ => {
                warn!("Screen item {} is missing an 'ID'. Skipping.", index);
                screen.skipped.push(SkippedEntry {
                    index,
                    reason: "missing ID",
                });
                continue;
            }
        };
        let smiles = match object.remove("SMILES") {
            Some(Value::String(s)) if !s.trim().is_empty() => s,
            _ => {
                screen.skipped.push(SkippedEntry {
                    index,
                    reason: "empty notation",
                });
                continue;
            }
        };
        screen.entries.push(ScreenEntry { id, smiles });
    }
    screen
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_screen_keeps_valid_entries_in_order() {
        let screen = parse_screen(vec![
            json!({"ID": "cpd1", "SMILES": "CCO"}),
            json!({"ID": 7, "SMILES": "c1ccccc1", "extra": true}),
        ]);
        assert_eq!(screen.entries.len(), 2);
        assert_eq!(screen.entries[0].id, "cpd1");
        assert_eq!(screen.entries[1].id, "7");
        assert!(screen.skipped.is_empty());
    }

    #[test]
    fn parse_screen_skips_unusable_items() {
        let screen = parse_screen(vec![
            json!("CCO"),
            json!({"SMILES": "CCO"}),
            json!({"ID": "blank", "SMILES": ""}),
            json!({"ID": "none"}),
            json!({"ID": "ok", "SMILES": "C"}),
        ]);
        assert_eq!(screen.entries.len(), 1);
        let reasons: Vec<_> = screen.skipped.iter().map(|s| (s.index, s.reason)).collect();
        assert_eq!(
            reasons,
            vec![
                (0, "not an object"),
                (1, "missing ID"),
                (2, "empty notation"),
                (3, "empty notation")
            ]
        );
    }
}
