//! Static capability configuration (model name to capability vector).

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use crate::core::{CapabilityIndex, CapabilityVector};

use super::paths::capability_path;

fn load_at(path: &Path) -> CapabilityIndex {
    let Ok(file) = File::open(path) else {
        return CapabilityIndex::default();
    };
    let models: HashMap<String, CapabilityVector> =
        serde_json::from_reader(file).unwrap_or_default();
    CapabilityIndex::new(models)
}

/// Load the capability mapping. A missing or malformed file is an
/// empty index: every model becomes "capability unknown" and the
/// finder degrades to category matching.
pub(crate) fn load_capability_index() -> CapabilityIndex {
    match capability_path() {
        Some(path) => load_at(&path),
        None => CapabilityIndex::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_model_vectors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model_capabilities.json");
        std::fs::write(
            &path,
            r#"{
                "claude-sonnet-4": {"context_length": 200000, "reasoning_score": 8, "speed_score": 6},
                "gpt-4o": {"context_length": 128000}
            }"#,
        )
        .unwrap();
        let index = load_at(&path);
        assert!(!index.is_empty());
        let sonnet = index.get("claude-sonnet-4").unwrap();
        assert_eq!(sonnet.reasoning_score, Some(8.0));
        // partial vectors load but stay partial
        assert!(index.get("gpt-4o").unwrap().speed_score.is_none());
    }

    #[test]
    fn missing_file_is_empty_index() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_at(&dir.path().join("nope.json")).is_empty());
    }

    #[test]
    fn malformed_file_is_empty_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model_capabilities.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();
        assert!(load_at(&path).is_empty());
    }
}
