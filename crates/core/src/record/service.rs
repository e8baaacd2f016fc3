//! Record service: list, get, save and batch save across brand collections.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, info};

use super::conflict::{self, ConflictQuery};
use super::derive::{derive, ensure_finite};
use super::error::RecordError;
use super::payload::RecordEnvelope;
use super::store::{RecordSession, RecordStore};
use super::types::{BrandRecord, ConflictResult, RecordFilter};
use crate::brand::{Brand, BrandHandle};

/// Orchestrates brand resolution, derivation and upserts.
///
/// Concurrent saves against the same id are not coordinated here: the last
/// commit wins.
pub struct RecordService<S: RecordStore> {
    store: Arc<S>,
}

impl<S: RecordStore> Clone for RecordService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: RecordStore> RecordService<S> {
    /// Create a new record service.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Names of all brands, in fixed order.
    #[must_use]
    pub fn list_brands() -> Vec<&'static str> {
        Brand::names()
    }

    /// Lists one brand's records, or every brand's when `brand` is `None`.
    pub async fn list(
        &self,
        brand: Option<&str>,
        filter: &RecordFilter,
    ) -> Result<Vec<BrandRecord>, RecordError> {
        let brands = match brand {
            Some(name) => vec![resolve(name)?],
            None => Brand::ALL.to_vec(),
        };

        let mut session = self.store.begin().await?;
        let mut records = Vec::new();
        for brand in brands {
            records.extend(BrandHandle::new(brand, &mut session).query(filter).await?);
        }
        session.commit().await?;

        Ok(records)
    }

    /// Fetches a single record by id.
    pub async fn get(&self, brand: &str, id: i32) -> Result<BrandRecord, RecordError> {
        let mut session = self.store.begin().await?;
        let mut handle = BrandHandle::resolve(brand, &mut session)?;
        let brand = handle.brand();
        let found = handle.find_by_id(id).await?;
        session.commit().await?;

        found.ok_or(RecordError::NotFound { brand, id })
    }

    /// Saves a loosely typed payload into `brand`'s collection.
    ///
    /// Derived fields are recomputed before persistence. A positive `id` that
    /// exists is updated in place; a positive `id` that does not exist is
    /// inserted as a new record with a fresh id.
    pub async fn save(
        &self,
        brand: &str,
        payload: &Value,
        actor: Option<&str>,
    ) -> Result<BrandRecord, RecordError> {
        let brand = resolve(brand)?;
        let record = BrandRecord::from_payload(payload)?;
        self.save_record(brand, record, actor).await
    }

    /// Saves an already parsed record.
    pub async fn save_record(
        &self,
        brand: Brand,
        record: BrandRecord,
        actor: Option<&str>,
    ) -> Result<BrandRecord, RecordError> {
        let record = prepare(record)?;
        let mut session = self.store.begin().await?;
        let saved = upsert(&mut session, brand, record, actor, Utc::now()).await?;
        session.commit().await?;

        info!(brand = %brand, record_id = saved.id, year = saved.year, "Brand record saved");
        Ok(saved)
    }

    /// Saves many payloads in input order with a single commit.
    ///
    /// Each payload names its brand through its `brand` key, falling back to
    /// `default_brand`. Every payload is resolved and parsed before anything is
    /// written, so one bad payload rejects the whole batch.
    pub async fn batch_save(
        &self,
        default_brand: Option<&str>,
        payloads: &[Value],
        actor: Option<&str>,
    ) -> Result<usize, RecordError> {
        let envelopes = payloads
            .iter()
            .map(|p| RecordEnvelope::from_value(p, default_brand))
            .collect::<Result<Vec<_>, _>>()?;
        let prepared = envelopes
            .into_iter()
            .map(|e| prepare(e.record).map(|record| (e.brand, record)))
            .collect::<Result<Vec<_>, _>>()?;

        let count = prepared.len();
        let now = Utc::now();
        let mut session = self.store.begin().await?;
        for (brand, record) in prepared {
            upsert(&mut session, brand, record, actor, now).await?;
        }
        session.commit().await?;

        info!(count, "Brand record batch saved");
        Ok(count)
    }

    /// Reports whether non-zero data already exists for a month.
    ///
    /// Inspects only the first record (lowest id) matching
    /// `(year, item, location)`. Never writes.
    pub async fn check_conflict(
        &self,
        query: &ConflictQuery,
    ) -> Result<ConflictResult, RecordError> {
        let filter = RecordFilter::slot(query.year, &query.item, &query.location);

        let mut session = self.store.begin().await?;
        let first = BrandHandle::resolve(&query.brand, &mut session)?
            .first(&filter)
            .await?;
        session.commit().await?;

        Ok(conflict::evaluate(first.as_ref(), &query.month))
    }
}

fn resolve(name: &str) -> Result<Brand, RecordError> {
    Brand::resolve(name).ok_or_else(|| RecordError::InvalidBrand(name.to_string()))
}

/// Recomputes derived fields and rejects figures that overflowed.
fn prepare(mut record: BrandRecord) -> Result<BrandRecord, RecordError> {
    derive(&mut record);
    ensure_finite(&record)?;
    Ok(record)
}

/// Stamps and writes one prepared record inside an open session.
async fn upsert<T: RecordSession>(
    session: &mut T,
    brand: Brand,
    mut record: BrandRecord,
    actor: Option<&str>,
    now: DateTime<Utc>,
) -> Result<BrandRecord, RecordError> {
    record.updated_at = Some(now);
    if let Some(actor) = actor {
        record.updated_by = Some(actor.to_string());
    }

    let mut handle = BrandHandle::new(brand, session);

    if record.is_persisted() {
        if handle.find_by_id(record.id).await?.is_some() {
            return handle.update_in_place(record).await;
        }
        debug!(
            brand = %brand,
            requested_id = record.id,
            "No record with requested id, inserting as new"
        );
        record.id = 0;
    }

    handle.add(record).await
}
