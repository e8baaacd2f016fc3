//! Brand record repository for the per-brand PostgreSQL tables.
//!
//! Every brand has its own table with the same column layout, so statements
//! are built with `sea_query` against the brand's table name and rows are
//! mapped by column name.

use brandtrack_core::Brand;
use brandtrack_core::record::period::{FigureKind, Period, field_name};
use brandtrack_core::record::{BrandRecord, RecordError, RecordFilter, RecordSession, RecordStore};
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{
    Alias, Expr, InsertStatement, Order, Query, SelectStatement, SimpleExpr, UpdateStatement,
};
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr, QueryResult, TransactionTrait,
};
use tracing::debug;

/// Figure column names in storage order: months then quarters, each
/// `ac`, `fc`, `diff`.
pub fn figure_columns() -> Vec<String> {
    Period::all()
        .flat_map(|period| FigureKind::ALL.map(|kind| field_name(period, kind)))
        .collect()
}

/// Every writable column, in the order [`column_values`] emits values.
fn writable_columns() -> Vec<String> {
    let mut columns = vec!["location".to_string(), "item".to_string(), "year".to_string()];
    columns.extend(figure_columns());
    columns.extend(["updated_by".to_string(), "updated_at".to_string()]);
    columns
}

fn column_values(record: &BrandRecord) -> Vec<SimpleExpr> {
    let mut values = vec![
        Expr::value(record.location.clone()),
        Expr::value(record.item.clone()),
        Expr::value(record.year),
    ];
    for period in Period::all() {
        let figures = record.period(period);
        values.extend(FigureKind::ALL.map(|kind| Expr::value(figures.get(kind))));
    }
    values.push(Expr::value(record.updated_by.clone()));
    values.push(Expr::value(record.updated_at));
    values
}

fn select_statement(brand: Brand, filter: &RecordFilter) -> SelectStatement {
    let mut select = Query::select();
    select
        .column(Alias::new("id"))
        .columns(writable_columns().into_iter().map(Alias::new))
        .from(Alias::new(brand.collection()));

    if let Some(year) = filter.year {
        select.and_where(Expr::col(Alias::new("year")).eq(year));
    }
    if let Some(item) = &filter.item {
        select.and_where(Expr::col(Alias::new("item")).eq(item.as_str()));
    }
    if let Some(location) = &filter.location {
        select.and_where(Expr::col(Alias::new("location")).eq(location.as_str()));
    }

    select.order_by(Alias::new("id"), Order::Asc);
    select
}

fn insert_statement(brand: Brand, record: &BrandRecord) -> Result<InsertStatement, RecordError> {
    let mut insert = Query::insert();
    insert
        .into_table(Alias::new(brand.collection()))
        .columns(writable_columns().into_iter().map(Alias::new))
        .values(column_values(record))
        .map_err(|e| RecordError::repository(e.to_string()))?
        .returning_col(Alias::new("id"));
    Ok(insert)
}

fn update_statement(brand: Brand, record: &BrandRecord) -> UpdateStatement {
    let assignments = writable_columns()
        .into_iter()
        .map(Alias::new)
        .zip(column_values(record));

    let mut update = Query::update();
    update
        .table(Alias::new(brand.collection()))
        .values(assignments)
        .and_where(Expr::col(Alias::new("id")).eq(record.id));
    update
}

fn record_from_row(row: &QueryResult) -> Result<BrandRecord, DbErr> {
    let mut record = BrandRecord {
        id: row.try_get("", "id")?,
        location: row.try_get("", "location")?,
        item: row.try_get("", "item")?,
        year: row.try_get("", "year")?,
        updated_by: row.try_get("", "updated_by")?,
        updated_at: row.try_get::<Option<DateTime<Utc>>>("", "updated_at")?,
        ..BrandRecord::default()
    };

    for period in Period::all() {
        for kind in FigureKind::ALL {
            let value: Option<f64> = row.try_get("", &field_name(period, kind))?;
            *record.period_mut(period).get_mut(kind) = value;
        }
    }

    Ok(record)
}

fn db_err(err: DbErr) -> RecordError {
    RecordError::repository(err.to_string())
}

/// PostgreSQL-backed [`RecordStore`].
#[derive(Debug, Clone)]
pub struct BrandRecordRepository {
    db: DatabaseConnection,
}

impl BrandRecordRepository {
    /// Creates a new brand record repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl RecordStore for BrandRecordRepository {
    type Session = PgRecordSession;

    async fn begin(&self) -> Result<PgRecordSession, RecordError> {
        let txn = self.db.begin().await.map_err(db_err)?;
        Ok(PgRecordSession { txn })
    }
}

/// A record session wrapping one database transaction.
pub struct PgRecordSession {
    txn: DatabaseTransaction,
}

impl RecordSession for PgRecordSession {
    async fn find_by_id(
        &mut self,
        brand: Brand,
        id: i32,
    ) -> Result<Option<BrandRecord>, RecordError> {
        let mut select = select_statement(brand, &RecordFilter::default());
        select.and_where(Expr::col(Alias::new("id")).eq(id));

        let backend = self.txn.get_database_backend();
        let row = self.txn.query_one(backend.build(&select)).await.map_err(db_err)?;
        row.as_ref().map(record_from_row).transpose().map_err(db_err)
    }

    async fn query(
        &mut self,
        brand: Brand,
        filter: &RecordFilter,
    ) -> Result<Vec<BrandRecord>, RecordError> {
        let select = select_statement(brand, filter);

        let backend = self.txn.get_database_backend();
        let rows = self.txn.query_all(backend.build(&select)).await.map_err(db_err)?;
        rows.iter()
            .map(record_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(db_err)
    }

    async fn add(
        &mut self,
        brand: Brand,
        mut record: BrandRecord,
    ) -> Result<BrandRecord, RecordError> {
        let insert = insert_statement(brand, &record)?;

        let backend = self.txn.get_database_backend();
        let row = self
            .txn
            .query_one(backend.build(&insert))
            .await
            .map_err(db_err)?
            .ok_or_else(|| RecordError::repository("insert returned no id"))?;
        record.id = row.try_get("", "id").map_err(db_err)?;

        debug!(brand = %brand, record_id = record.id, "Inserted brand record");
        Ok(record)
    }

    async fn update_in_place(
        &mut self,
        brand: Brand,
        record: BrandRecord,
    ) -> Result<BrandRecord, RecordError> {
        let update = update_statement(brand, &record);

        let backend = self.txn.get_database_backend();
        let result = self.txn.execute(backend.build(&update)).await.map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(RecordError::NotFound {
                brand,
                id: record.id,
            });
        }

        Ok(record)
    }

    async fn commit(self) -> Result<(), RecordError> {
        self.txn.commit().await.map_err(db_err)
    }
}
