//! In-memory record store.
//!
//! One shard per brand, so sessions touching different brands never contend.
//! Ids come from a per-brand counter at insert time, like a database
//! sequence: an uncommitted insert still consumes its id.

use std::collections::BTreeMap;
use std::sync::Arc;

use dashmap::DashMap;

use super::error::RecordError;
use super::store::{RecordSession, RecordStore};
use super::types::{BrandRecord, RecordFilter};
use crate::brand::Brand;

#[derive(Debug, Default)]
struct Collection {
    last_id: i32,
    rows: BTreeMap<i32, BrandRecord>,
}

/// Brand collections held in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    collections: Arc<DashMap<Brand, Collection>>,
}

impl MemoryRecordStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed records of a brand, ordered by id.
    #[must_use]
    pub fn snapshot(&self, brand: Brand) -> Vec<BrandRecord> {
        self.collections
            .get(&brand)
            .map(|c| c.rows.values().cloned().collect())
            .unwrap_or_default()
    }
}

impl RecordStore for MemoryRecordStore {
    type Session = MemorySession;

    async fn begin(&self) -> Result<MemorySession, RecordError> {
        Ok(MemorySession {
            collections: Arc::clone(&self.collections),
            staged: Vec::new(),
        })
    }
}

/// Session over a [`MemoryRecordStore`]; writes are staged until commit.
#[derive(Debug)]
pub struct MemorySession {
    collections: Arc<DashMap<Brand, Collection>>,
    staged: Vec<(Brand, BrandRecord)>,
}

impl MemorySession {
    fn staged_row(&self, brand: Brand, id: i32) -> Option<&BrandRecord> {
        self.staged
            .iter()
            .rev()
            .find(|(b, r)| *b == brand && r.id == id)
            .map(|(_, r)| r)
    }

    fn committed_row(&self, brand: Brand, id: i32) -> Option<BrandRecord> {
        self.collections
            .get(&brand)
            .and_then(|c| c.rows.get(&id).cloned())
    }
}

impl RecordSession for MemorySession {
    async fn find_by_id(
        &mut self,
        brand: Brand,
        id: i32,
    ) -> Result<Option<BrandRecord>, RecordError> {
        Ok(self
            .staged_row(brand, id)
            .cloned()
            .or_else(|| self.committed_row(brand, id)))
    }

    async fn query(
        &mut self,
        brand: Brand,
        filter: &RecordFilter,
    ) -> Result<Vec<BrandRecord>, RecordError> {
        let mut rows = self
            .collections
            .get(&brand)
            .map(|c| c.rows.clone())
            .unwrap_or_default();

        for (_, record) in self.staged.iter().filter(|(b, _)| *b == brand) {
            rows.insert(record.id, record.clone());
        }

        Ok(rows.into_values().filter(|r| filter.matches(r)).collect())
    }

    async fn add(
        &mut self,
        brand: Brand,
        mut record: BrandRecord,
    ) -> Result<BrandRecord, RecordError> {
        record.id = {
            let mut collection = self.collections.entry(brand).or_default();
            collection.last_id += 1;
            collection.last_id
        };

        self.staged.push((brand, record.clone()));
        Ok(record)
    }

    async fn update_in_place(
        &mut self,
        brand: Brand,
        record: BrandRecord,
    ) -> Result<BrandRecord, RecordError> {
        let exists = self.staged_row(brand, record.id).is_some()
            || self.committed_row(brand, record.id).is_some();
        if !exists {
            return Err(RecordError::NotFound {
                brand,
                id: record.id,
            });
        }

        self.staged.push((brand, record.clone()));
        Ok(record)
    }

    async fn commit(self) -> Result<(), RecordError> {
        for (brand, record) in self.staged {
            self.collections
                .entry(brand)
                .or_default()
                .rows
                .insert(record.id, record);
        }
        Ok(())
    }
}
