//! "Last used source" convenience record, kept outside the core pipeline.

use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::TileResult;

/// File name of the JSON record inside the data directory.
pub const HISTORY_FILE: &str = "history.json";

/// Storage for the most recently used source locator.
pub trait HistoryStore {
    /// Last saved locator, if any.
    fn load(&self) -> TileResult<Option<String>>;
    /// Remember `locator` for the next run.
    fn save(&mut self, locator: &str) -> TileResult<()>;
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct HistoryRecord {
    emoji: String,
}

/// [`HistoryStore`] persisted as `{ "emoji": "<locator>" }` under a data directory.
#[derive(Clone, Debug)]
pub struct JsonHistoryStore {
    path: PathBuf,
}

impl JsonHistoryStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(HISTORY_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStore for JsonHistoryStore {
    fn load(&self) -> TileResult<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let f = std::fs::File::open(&self.path)
            .with_context(|| format!("open history '{}'", self.path.display()))?;
        let record: HistoryRecord = serde_json::from_reader(std::io::BufReader::new(f))
            .with_context(|| format!("parse history '{}'", self.path.display()))?;
        Ok(Some(record.emoji).filter(|s| !s.is_empty()))
    }

    fn save(&mut self, locator: &str) -> TileResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create data dir '{}'", parent.display()))?;
        }
        let record = HistoryRecord {
            emoji: locator.to_string(),
        };
        let json = serde_json::to_vec_pretty(&record).context("serialize history")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("write history '{}'", self.path.display()))?;
        Ok(())
    }
}

/// In-memory [`HistoryStore`] for tests and one-off runs.
#[derive(Clone, Debug, Default)]
pub struct InMemoryHistory {
    last: Option<String>,
}

impl HistoryStore for InMemoryHistory {
    fn load(&self) -> TileResult<Option<String>> {
        Ok(self.last.clone())
    }

    fn save(&mut self, locator: &str) -> TileResult<()> {
        self.last = Some(locator.to_string());
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/history.rs"]
mod tests;
