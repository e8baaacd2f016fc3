//! Kmart daily order ledger migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(KMART_DAILY_RECORDS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS kmart_daily_records CASCADE;")
            .await?;
        Ok(())
    }
}

const KMART_DAILY_RECORDS_SQL: &str = r"
CREATE TABLE kmart_daily_records (
    id SERIAL PRIMARY KEY,
    location TEXT NOT NULL,
    category TEXT NOT NULL,
    sub_category TEXT,
    date DATE NOT NULL,
    quantity INTEGER NOT NULL,
    modified_by TEXT,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- Slot lookup on upsert
CREATE INDEX idx_kmart_daily_records_slot
    ON kmart_daily_records(location, category, COALESCE(sub_category, ''), date);

-- Range queries by month
CREATE INDEX idx_kmart_daily_records_date ON kmart_daily_records(date, id);
";
