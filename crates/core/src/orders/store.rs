//! Persistence seam for the order ledger.

use std::future::Future;

use super::error::OrderError;
use super::types::{KmartDailyRecord, MonthSpan, OrderSlot};

/// A store holding the Kmart daily order table.
pub trait OrderStore: Send + Sync {
    /// Session type produced by [`OrderStore::begin`].
    type Session: OrderSession + 'static;

    /// Opens a session (transaction).
    fn begin(&self) -> impl Future<Output = Result<Self::Session, OrderError>> + Send;
}

/// A unit of work against the order table.
///
/// Dropping a session without committing discards its writes.
pub trait OrderSession: Send {
    /// Rows dated within `span`, ordered by date then id.
    fn list(
        &mut self,
        span: MonthSpan,
    ) -> impl Future<Output = Result<Vec<KmartDailyRecord>, OrderError>> + Send;

    /// The first row (lowest id) occupying `slot`.
    fn find_slot(
        &mut self,
        slot: &OrderSlot,
    ) -> impl Future<Output = Result<Option<KmartDailyRecord>, OrderError>> + Send;

    /// Insert a row; the store assigns its id.
    fn insert(
        &mut self,
        record: KmartDailyRecord,
    ) -> impl Future<Output = Result<KmartDailyRecord, OrderError>> + Send;

    /// Overwrite the row with `record.id`.
    fn update(
        &mut self,
        record: KmartDailyRecord,
    ) -> impl Future<Output = Result<KmartDailyRecord, OrderError>> + Send;

    /// Commit all writes made in this session.
    fn commit(self) -> impl Future<Output = Result<(), OrderError>> + Send;
}
