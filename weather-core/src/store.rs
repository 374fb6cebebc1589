use parking_lot::RwLock;
use std::{collections::HashMap, fmt::Debug};

use crate::model::WeatherRecord;

/// Keyed collection of weather records.
///
/// Records are immutable once inserted; there is no update or delete.
pub trait RecordStore: Send + Sync + Debug {
    /// Store `record` under its own id and return that id.
    ///
    /// An existing record with the same id is replaced.
    fn insert(&self, record: WeatherRecord) -> String;

    fn get(&self, id: &str) -> Option<WeatherRecord>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-local store; everything is lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, WeatherRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn insert(&self, record: WeatherRecord) -> String {
        let id = record.id.clone();
        self.records.write().insert(id.clone(), record);
        id
    }

    fn get(&self, id: &str) -> Option<WeatherRecord> {
        self.records.read().get(id).cloned()
    }

    fn len(&self) -> usize {
        self.records.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;
    use std::sync::Arc;

    fn record(id: &str, location: &str) -> WeatherRecord {
        WeatherRecord {
            id: id.to_string(),
            request_date: "2024-01-01".into(),
            location: location.to_string(),
            notes: String::new(),
            weather_data: json!({"current": {"temperature": 10}}),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn insert_then_get() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        let id = store.insert(record("a", "Paris"));
        assert_eq!(id, "a");
        assert_eq!(store.len(), 1);

        let got = store.get("a").expect("record must exist");
        assert_eq!(got.location, "Paris");
    }

    #[test]
    fn get_unknown_id_is_none() {
        let store = MemoryStore::new();
        store.insert(record("a", "Paris"));

        assert!(store.get("b").is_none());
    }

    #[test]
    fn same_id_is_last_write_wins() {
        let store = MemoryStore::new();
        store.insert(record("a", "Paris"));
        store.insert(record("a", "Rome"));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("a").unwrap().location, "Rome");
    }

    #[test]
    fn concurrent_inserts_under_distinct_ids() {
        let store = Arc::new(MemoryStore::new());

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for i in 0..50 {
                        store.insert(record(&format!("{t}-{i}"), "Paris"));
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(store.len(), 400);
        assert!(store.get("7-49").is_some());
    }
}
