//! In-memory AQI observation store
//!
//! Records live only in process memory and are lost on restart. A single
//! `RwLock` guards the id map so concurrent handlers never observe a
//! half-applied update.

use aqi_common::{Error, PollutantPatch, Pollutants, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

/// Stored AQI observation
///
/// Serializes flat: `{"id": "...", "pm25": 12.5, ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(flatten)]
    pub pollutants: Pollutants,
}

#[derive(Default)]
struct Inner {
    records: HashMap<String, (u64, Record)>,
    next_seq: u64,
}

/// Owner of all AQI records
#[derive(Default)]
pub struct RecordStore {
    inner: RwLock<Inner>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records in insertion order
    pub async fn list(&self) -> Vec<Record> {
        let inner = self.inner.read().await;
        let mut entries: Vec<&(u64, Record)> = inner.records.values().collect();
        entries.sort_by_key(|(seq, _)| *seq);
        entries.into_iter().map(|(_, record)| record.clone()).collect()
    }

    /// Validate `fields` and store them under a fresh id
    pub async fn create(&self, fields: &Map<String, Value>) -> Result<Record> {
        let pollutants = Pollutants::from_json(fields)?;

        let mut inner = self.inner.write().await;
        let id = loop {
            let candidate = Uuid::new_v4().to_string();
            if !inner.records.contains_key(&candidate) {
                break candidate;
            }
        };

        let record = Record {
            id: id.clone(),
            pollutants,
        };
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.records.insert(id.clone(), (seq, record.clone()));

        info!(record_id = %id, "Created AQI record");
        Ok(record)
    }

    pub async fn get(&self, id: &str) -> Result<Record> {
        let inner = self.inner.read().await;
        inner
            .records
            .get(id)
            .map(|(_, record)| record.clone())
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// Merge the supplied fields into an existing record
    ///
    /// An unknown id is reported before the body is validated.
    pub async fn update(&self, id: &str, fields: &Map<String, Value>) -> Result<Record> {
        let mut inner = self.inner.write().await;
        let (_, record) = inner
            .records
            .get_mut(id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;

        let patch = PollutantPatch::from_json(fields)?;
        record.pollutants.apply(&patch);

        info!(record_id = %id, "Updated AQI record");
        Ok(record.clone())
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner
            .records
            .remove(id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;

        info!(record_id = %id, "Deleted AQI record");
        Ok(())
    }

    /// Remove every record
    pub async fn reset(&self) {
        let mut inner = self.inner.write().await;
        let cleared = inner.records.len();
        inner.records.clear();
        info!(cleared, "Reset AQI record store");
    }
}
