use super::{LoadError, read_json};
use crate::core::models::dimension::RawDimension;
use std::path::Path;
use tracing::debug;

/// Reads the top-level JSON array of dimensions.
///
/// Elements are returned unvalidated; shape problems inside an element are left to the
/// engine's validator so they can be reported per dimension.
pub fn read_dimensions(path: &Path) -> Result<Vec<RawDimension>, LoadError> {
    debug!("Loading dimensions from {:?}", path);
    read_json(path)
}

/// Parses dimensions from an in-memory JSON document.
pub fn parse_dimensions(content: &str) -> Result<Vec<RawDimension>, serde_json::Error> {
    serde_json::from_str(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn read_dimensions_parses_array_of_objects() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dims.json");
        fs::write(&path, r#"[{"A": "SEQ"}, {"B": "SEQ", "C": "SEQ"}]"#).unwrap();

        let dims = read_dimensions(&path).unwrap();
        assert_eq!(dims.len(), 2);
        assert_eq!(dims[0], RawDimension::from_pairs([("A", "SEQ")]));
    }

    #[test]
    fn read_dimensions_rejects_non_array_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dims.json");
        fs::write(&path, r#"{"A": "SEQ"}"#).unwrap();

        assert!(matches!(read_dimensions(&path), Err(LoadError::Json { .. })));
    }

    #[test]
    fn read_dimensions_reports_missing_file() {
        let dir = tempdir().unwrap();
        let result = read_dimensions(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }

    #[test]
    fn parse_dimensions_accepts_empty_list() {
        assert!(parse_dimensions("[]").unwrap().is_empty());
    }
}
