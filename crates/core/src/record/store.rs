//! Persistence seam for brand records.
//!
//! These traits are implemented by the db crate (PostgreSQL) and by
//! [`super::memory::MemoryRecordStore`]. Work happens inside a session; writes
//! become visible to other sessions on [`RecordSession::commit`].

use std::future::Future;

use super::error::RecordError;
use super::types::{BrandRecord, RecordFilter};
use crate::brand::Brand;

/// A store holding one keyed collection per brand.
pub trait RecordStore: Send + Sync {
    /// Session type produced by [`RecordStore::begin`].
    type Session: RecordSession + 'static;

    /// Opens a session (transaction) spanning all brand collections.
    fn begin(&self) -> impl Future<Output = Result<Self::Session, RecordError>> + Send;
}

/// A unit of work against the brand collections.
///
/// Dropping a session without committing discards its writes.
pub trait RecordSession: Send {
    /// Find a record by id in a brand's collection.
    fn find_by_id(
        &mut self,
        brand: Brand,
        id: i32,
    ) -> impl Future<Output = Result<Option<BrandRecord>, RecordError>> + Send;

    /// List a brand's records matching the filter, ordered by id.
    fn query(
        &mut self,
        brand: Brand,
        filter: &RecordFilter,
    ) -> impl Future<Output = Result<Vec<BrandRecord>, RecordError>> + Send;

    /// Insert a record; the store assigns and returns its new id.
    fn add(
        &mut self,
        brand: Brand,
        record: BrandRecord,
    ) -> impl Future<Output = Result<BrandRecord, RecordError>> + Send;

    /// Replace every column of the stored record with `record.id`.
    fn update_in_place(
        &mut self,
        brand: Brand,
        record: BrandRecord,
    ) -> impl Future<Output = Result<BrandRecord, RecordError>> + Send;

    /// Commit all writes made in this session.
    fn commit(self) -> impl Future<Output = Result<(), RecordError>> + Send;
}
