//! JSON loading for race drafts and assembly configuration

use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::core::assembler::AssemblyConfig;
use crate::models::RaceDraft;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

fn load_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T, LoadError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| LoadError::Json {
        path: path.display().to_string(),
        source,
    })
}

/// Load race drafts from a JSON file holding either one draft or an array
pub fn load_race_drafts<P: AsRef<Path>>(path: P) -> Result<Vec<RaceDraft>, LoadError> {
    let value: serde_json::Value = load_json(&path)?;
    let drafts = if value.is_array() {
        serde_json::from_value(value)
    } else {
        serde_json::from_value(value).map(|draft| vec![draft])
    };
    drafts.map_err(|source| LoadError::Json {
        path: path.as_ref().display().to_string(),
        source,
    })
}

/// Load assembly configuration; absent fields take their defaults
pub fn load_assembly_config<P: AsRef<Path>>(path: P) -> Result<AssemblyConfig, LoadError> {
    load_json(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const DRAFT: &str = r#"{
        "track": {"code": "PRX"},
        "race_date": "2016-05-07",
        "race_number": 8,
        "breed": "TB",
        "distance": {"feet": 5940, "course": "Dirt"},
        "starters": [
            {"program": "1", "horse": {"name": "Alpha"}, "finish_position": 1},
            {"program": "2", "horse": {"name": "Bravo"}, "finish_position": 2}
        ]
    }"#;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_single_draft() {
        let file = write_temp(DRAFT);
        let drafts = load_race_drafts(file.path()).unwrap();

        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].track.code, "PRX");
        assert_eq!(drafts[0].starters.len(), 2);
        assert!(drafts[0].fractionals.is_empty());
        assert!(drafts[0].conditions.summary.is_none());
    }

    #[test]
    fn test_load_draft_array() {
        let file = write_temp(&format!("[{}, {}]", DRAFT, DRAFT));
        let drafts = load_race_drafts(file.path()).unwrap();
        assert_eq!(drafts.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_race_drafts("/nonexistent/draft.json");
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }

    #[test]
    fn test_load_invalid_json() {
        let file = write_temp("{ not json");
        assert!(matches!(
            load_race_drafts(file.path()),
            Err(LoadError::Json { .. })
        ));
    }

    #[test]
    fn test_load_partial_config() {
        let file = write_temp(r#"{"honor_dead_heat_exceptions": false}"#);
        let config = load_assembly_config(file.path()).unwrap();

        assert!(!config.honor_dead_heat_exceptions);
        assert!((config.feet_per_length - 8.75).abs() < 1e-9);
    }
}
