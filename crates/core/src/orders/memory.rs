//! In-memory order store.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};

use dashmap::DashMap;

use super::error::OrderError;
use super::store::{OrderSession, OrderStore};
use super::types::{KmartDailyRecord, MonthSpan, OrderSlot};

/// The order table held in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryOrderStore {
    rows: Arc<DashMap<i32, KmartDailyRecord>>,
    last_id: Arc<AtomicI32>,
}

impl MemoryOrderStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed rows, ordered by id.
    #[must_use]
    pub fn snapshot(&self) -> Vec<KmartDailyRecord> {
        let mut rows: Vec<_> = self.rows.iter().map(|r| r.value().clone()).collect();
        rows.sort_by_key(|r| r.id);
        rows
    }
}

impl OrderStore for MemoryOrderStore {
    type Session = MemoryOrderSession;

    async fn begin(&self) -> Result<MemoryOrderSession, OrderError> {
        Ok(MemoryOrderSession {
            store: self.clone(),
            staged: BTreeMap::new(),
        })
    }
}

/// Session over a [`MemoryOrderStore`]; writes are staged until commit.
#[derive(Debug)]
pub struct MemoryOrderSession {
    store: MemoryOrderStore,
    staged: BTreeMap<i32, KmartDailyRecord>,
}

impl MemoryOrderSession {
    fn visible(&self) -> BTreeMap<i32, KmartDailyRecord> {
        let mut rows: BTreeMap<_, _> = self
            .store
            .rows
            .iter()
            .map(|r| (*r.key(), r.value().clone()))
            .collect();
        rows.extend(self.staged.iter().map(|(id, r)| (*id, r.clone())));
        rows
    }
}

impl OrderSession for MemoryOrderSession {
    async fn list(&mut self, span: MonthSpan) -> Result<Vec<KmartDailyRecord>, OrderError> {
        let mut rows: Vec<_> = self
            .visible()
            .into_values()
            .filter(|r| span.contains(r.date))
            .collect();
        rows.sort_by_key(|r| (r.date, r.id));
        Ok(rows)
    }

    async fn find_slot(
        &mut self,
        slot: &OrderSlot,
    ) -> Result<Option<KmartDailyRecord>, OrderError> {
        Ok(self.visible().into_values().find(|r| r.slot() == *slot))
    }

    async fn insert(
        &mut self,
        mut record: KmartDailyRecord,
    ) -> Result<KmartDailyRecord, OrderError> {
        record.id = self.store.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.staged.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update(&mut self, record: KmartDailyRecord) -> Result<KmartDailyRecord, OrderError> {
        if !self.staged.contains_key(&record.id) && !self.store.rows.contains_key(&record.id) {
            return Err(OrderError::repository(format!("order row {} not found", record.id)));
        }
        self.staged.insert(record.id, record.clone());
        Ok(record)
    }

    async fn commit(self) -> Result<(), OrderError> {
        for (id, record) in self.staged {
            self.store.rows.insert(id, record);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn row(category: &str, day: u32, month: u32) -> KmartDailyRecord {
        KmartDailyRecord {
            id: 0,
            location: "Vietnam".to_string(),
            category: category.to_string(),
            sub_category: None,
            date: NaiveDate::from_ymd_opt(2025, month, day).unwrap(),
            quantity: 10,
            modified_by: None,
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_list_orders_by_date_then_id() {
        let store = MemoryOrderStore::new();
        let mut session = store.begin().await.unwrap();
        session.insert(row("RF", 20, 3)).await.unwrap();
        session.insert(row("RFID", 5, 3)).await.unwrap();
        session.insert(row("RF", 5, 3)).await.unwrap();
        session.insert(row("RF", 1, 4)).await.unwrap();
        session.commit().await.unwrap();

        let mut session = store.begin().await.unwrap();
        let span = MonthSpan {
            year: 2025,
            first: 3,
            last: 3,
        };
        let ids: Vec<i32> = session.list(span).await.unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[tokio::test]
    async fn test_uncommitted_rows_are_discarded() {
        let store = MemoryOrderStore::new();
        {
            let mut session = store.begin().await.unwrap();
            session.insert(row("RF", 1, 1)).await.unwrap();
        }
        assert!(store.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_update_unknown_row_fails() {
        let store = MemoryOrderStore::new();
        let mut session = store.begin().await.unwrap();
        let mut ghost = row("RF", 1, 1);
        ghost.id = 7;
        assert!(matches!(
            session.update(ghost).await,
            Err(OrderError::Repository(_))
        ));
    }
}
