//! Kmart daily order repository.

use brandtrack_core::orders::{
    KmartDailyRecord, MonthSpan, OrderError, OrderSession, OrderSlot, OrderStore,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityTrait, NotSet, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::entities::kmart_daily_records;

fn db_err(err: DbErr) -> OrderError {
    OrderError::repository(err.to_string())
}

impl From<kmart_daily_records::Model> for KmartDailyRecord {
    fn from(model: kmart_daily_records::Model) -> Self {
        Self {
            id: model.id,
            location: model.location,
            category: model.category,
            sub_category: model.sub_category,
            date: model.date,
            quantity: model.quantity,
            modified_by: model.modified_by,
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

/// Rows whose sub-category equals `sub_category`, treating NULL as `""`.
fn sub_category_condition(sub_category: &str) -> Condition {
    if sub_category.is_empty() {
        Condition::any()
            .add(kmart_daily_records::Column::SubCategory.is_null())
            .add(kmart_daily_records::Column::SubCategory.eq(""))
    } else {
        Condition::all().add(kmart_daily_records::Column::SubCategory.eq(sub_category))
    }
}

/// PostgreSQL-backed [`OrderStore`].
#[derive(Debug, Clone)]
pub struct KmartOrderRepository {
    db: DatabaseConnection,
}

impl KmartOrderRepository {
    /// Creates a new order repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl OrderStore for KmartOrderRepository {
    type Session = PgOrderSession;

    async fn begin(&self) -> Result<PgOrderSession, OrderError> {
        let txn = self.db.begin().await.map_err(db_err)?;
        Ok(PgOrderSession { txn })
    }
}

/// An order session wrapping one database transaction.
pub struct PgOrderSession {
    txn: DatabaseTransaction,
}

impl OrderSession for PgOrderSession {
    async fn list(&mut self, span: MonthSpan) -> Result<Vec<KmartDailyRecord>, OrderError> {
        let (Some(start), Some(end)) = (span.start(), span.end_exclusive()) else {
            return Ok(Vec::new());
        };

        let rows = kmart_daily_records::Entity::find()
            .filter(kmart_daily_records::Column::Date.gte(start))
            .filter(kmart_daily_records::Column::Date.lt(end))
            .order_by_asc(kmart_daily_records::Column::Date)
            .order_by_asc(kmart_daily_records::Column::Id)
            .all(&self.txn)
            .await
            .map_err(db_err)?;

        Ok(rows.into_iter().map(KmartDailyRecord::from).collect())
    }

    async fn find_slot(
        &mut self,
        slot: &OrderSlot,
    ) -> Result<Option<KmartDailyRecord>, OrderError> {
        let row = kmart_daily_records::Entity::find()
            .filter(kmart_daily_records::Column::Location.eq(slot.location.as_str()))
            .filter(kmart_daily_records::Column::Category.eq(slot.category.as_str()))
            .filter(sub_category_condition(&slot.sub_category))
            .filter(kmart_daily_records::Column::Date.eq(slot.date))
            .order_by_asc(kmart_daily_records::Column::Id)
            .one(&self.txn)
            .await
            .map_err(db_err)?;

        Ok(row.map(KmartDailyRecord::from))
    }

    async fn insert(&mut self, record: KmartDailyRecord) -> Result<KmartDailyRecord, OrderError> {
        let model = kmart_daily_records::ActiveModel {
            id: NotSet,
            location: Set(record.location),
            category: Set(record.category),
            sub_category: Set(record.sub_category),
            date: Set(record.date),
            quantity: Set(record.quantity),
            modified_by: Set(record.modified_by),
            updated_at: Set(record.updated_at.into()),
        }
        .insert(&self.txn)
        .await
        .map_err(db_err)?;

        Ok(model.into())
    }

    async fn update(&mut self, record: KmartDailyRecord) -> Result<KmartDailyRecord, OrderError> {
        let model = kmart_daily_records::ActiveModel {
            id: Set(record.id),
            location: Set(record.location),
            category: Set(record.category),
            sub_category: Set(record.sub_category),
            date: Set(record.date),
            quantity: Set(record.quantity),
            modified_by: Set(record.modified_by),
            updated_at: Set(record.updated_at.into()),
        }
        .update(&self.txn)
        .await
        .map_err(db_err)?;

        Ok(model.into())
    }

    async fn commit(self) -> Result<(), OrderError> {
        self.txn.commit().await.map_err(db_err)
    }
}
