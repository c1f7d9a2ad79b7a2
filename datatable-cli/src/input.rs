//! Record input.

use std::fs;
use std::path::Path;

use datatable_lib::model::Record;
use log::info;

use crate::error::CliError;

/// Reads a JSON array of records.
pub fn load_records(path: &Path) -> Result<Vec<Record>, CliError> {
    let raw = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records: Vec<Record> = serde_json::from_str(&raw).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    info!("loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leads.json");
        fs::write(&path, r#"[{"name": "Alice"}, {"name": "Bob"}]"#).unwrap();

        let records = load_records(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].get_string("name").unwrap(), Some("Bob"));
    }

    #[test]
    fn test_load_rejects_non_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lead.json");
        fs::write(&path, r#"{"name": "Alice"}"#).unwrap();

        let err = load_records(&path).unwrap_err();
        assert!(matches!(err, CliError::Json { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_records(Path::new("/nonexistent/leads.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
