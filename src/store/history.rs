//! Append-only pricing snapshot history, capped FIFO.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_HISTORY_RECORDS;

use super::paths::history_path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct HistoryEntry {
    /// ISO-8601 local timestamp of the fetch.
    pub(crate) timestamp: String,
    /// Raw pricing payload, persisted verbatim.
    pub(crate) data: serde_json::Value,
}

/// A corrupt or missing history file reads as empty, never an error.
fn load_all_at(path: &Path) -> Vec<HistoryEntry> {
    let Ok(file) = File::open(path) else {
        return Vec::new();
    };
    serde_json::from_reader(file).unwrap_or_default()
}

fn append_at(path: &Path, data: serde_json::Value) -> Option<usize> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok()?;
    }
    let mut history = load_all_at(path);
    history.push(HistoryEntry {
        timestamp: chrono::Local::now().to_rfc3339(),
        data,
    });
    if history.len() > MAX_HISTORY_RECORDS {
        let excess = history.len() - MAX_HISTORY_RECORDS;
        history.drain(..excess);
    }
    let file = File::create(path).ok()?;
    serde_json::to_writer_pretty(file, &history).ok()?;
    Some(history.len())
}

/// Latest snapshot, or None when no history has been written yet.
pub(crate) fn load_latest() -> Option<HistoryEntry> {
    load_all_at(&history_path()?).pop()
}

/// Append a raw pricing payload, evicting the oldest entries beyond
/// the cap. Best-effort: returns the new length, None when the write
/// failed.
pub(crate) fn append(data: serde_json::Value) -> Option<usize> {
    append_at(&history_path()?, data)
}
