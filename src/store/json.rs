use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

use crate::core::model::{Idea, Subscription};
use crate::store::RecordStore;

const SUBSCRIPTIONS_FILE: &str = "subscriptions.json";
const IDEAS_FILE: &str = "ideas.json";

/// Record source backed by JSON array files in a data directory, the format
/// the original app wrote. A missing file reads as an empty collection.
pub struct JsonStore {
    data_dir: PathBuf,
}

impl JsonStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        JsonStore {
            data_dir: data_dir.into(),
        }
    }

    fn read_records<T: DeserializeOwned>(&self, file_name: &str) -> Result<Vec<T>> {
        let path = self.data_dir.join(file_name);
        if !path.exists() {
            debug!("Record file {} does not exist, treating as empty", path.display());
            return Ok(Vec::new());
        }

        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read record file: {}", path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse record file: {}", path.display()))
    }
}

impl RecordStore for JsonStore {
    fn subscriptions(&self, user_id: &str) -> Result<Vec<Subscription>> {
        let mut records: Vec<Subscription> = self.read_records(SUBSCRIPTIONS_FILE)?;
        records.retain(|s| s.user_id == user_id);
        Ok(records)
    }

    fn ideas(&self, user_id: &str) -> Result<Vec<Idea>> {
        let mut records: Vec<Idea> = self.read_records(IDEAS_FILE)?;
        records.retain(|i| i.user_id == user_id);
        Ok(records)
    }

    fn subscription(&self, id: &str, user_id: &str) -> Result<Option<Subscription>> {
        let records: Vec<Subscription> = self.read_records(SUBSCRIPTIONS_FILE)?;
        Ok(records
            .into_iter()
            .find(|s| s.id == id && s.user_id == user_id))
    }

    fn idea(&self, id: &str, user_id: &str) -> Result<Option<Idea>> {
        let records: Vec<Idea> = self.read_records(IDEAS_FILE)?;
        Ok(records
            .into_iter()
            .find(|i| i.id == id && i.user_id == user_id))
    }
}
