//! Order service: query and upsert daily Kmart order quantities.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::error::OrderError;
use super::store::{OrderSession, OrderStore};
use super::types::{KmartDailyRecord, KmartOrderInput, OrderQuery};

/// Name stamped on rows saved without a known caller.
pub const UNKNOWN_ACTOR: &str = "Unknown";

/// Orchestrates the Kmart daily order ledger.
pub struct OrderService<S: OrderStore> {
    store: Arc<S>,
}

impl<S: OrderStore> Clone for OrderService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: OrderStore> OrderService<S> {
    /// Create a new order service.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Rows of the queried year, narrowed to a month or a year-to-date range.
    pub async fn list(&self, query: &OrderQuery) -> Result<Vec<KmartDailyRecord>, OrderError> {
        let span = query.span()?;

        let mut session = self.store.begin().await?;
        let rows = session.list(span).await?;
        session.commit().await?;

        Ok(rows)
    }

    /// Upserts each input by slot and commits once.
    ///
    /// Existing slots get the new quantity; the rest are inserted. Every
    /// written row is stamped with `actor` (or [`UNKNOWN_ACTOR`]) and the
    /// current time.
    pub async fn save_batch(
        &self,
        inputs: Vec<KmartOrderInput>,
        actor: Option<&str>,
    ) -> Result<usize, OrderError> {
        if inputs.is_empty() {
            return Err(OrderError::EmptyBatch);
        }

        let actor = actor.unwrap_or(UNKNOWN_ACTOR);
        let now = Utc::now();
        let count = inputs.len();
        let mut session = self.store.begin().await?;

        for input in inputs {
            match session.find_slot(&input.slot()).await? {
                Some(mut existing) => {
                    existing.quantity = input.quantity;
                    existing.modified_by = Some(actor.to_string());
                    existing.updated_at = now;
                    session.update(existing).await?;
                }
                None => {
                    session
                        .insert(KmartDailyRecord {
                            id: 0,
                            location: input.location,
                            category: input.category,
                            sub_category: input.sub_category,
                            date: input.date,
                            quantity: input.quantity,
                            modified_by: Some(actor.to_string()),
                            updated_at: now,
                        })
                        .await?;
                }
            }
        }

        session.commit().await?;

        info!(count, actor, "Kmart order batch saved");
        Ok(count)
    }
}
