//! Brand records migration.
//!
//! Creates one table per brand. Every table has the same layout: identity,
//! labels, the 48 period figures and the last-write stamps.

use brandtrack_core::Brand;
use sea_orm_migration::prelude::*;

use crate::repositories::brand_record::figure_columns;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        for brand in Brand::ALL {
            db.execute_unprepared(&create_table_sql(brand)).await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        for brand in Brand::ALL {
            db.execute_unprepared(&format!(
                "DROP TABLE IF EXISTS {} CASCADE;",
                brand.collection()
            ))
            .await?;
        }
        Ok(())
    }
}

fn create_table_sql(brand: Brand) -> String {
    let table = brand.collection();
    let figures: String = figure_columns()
        .iter()
        .map(|column| format!("    {column} DOUBLE PRECISION,\n"))
        .collect();

    format!(
        r"
CREATE TABLE {table} (
    id SERIAL PRIMARY KEY,
    location TEXT,
    item TEXT,
    year INTEGER NOT NULL,
{figures}    updated_by TEXT,
    updated_at TIMESTAMPTZ
);

-- Slot lookups for listing and conflict checks
CREATE INDEX idx_{table}_slot ON {table}(year, item, location);
"
    )
}
