//! Database migrations.
//!
//! Migrations are managed using sea-orm-migration.

pub use sea_orm_migration::prelude::*;

mod m20250101_000001_brand_records;
mod m20250101_000002_kmart_daily_records;

/// Migrator for running database migrations.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_brand_records::Migration),
            Box::new(m20250101_000002_kmart_daily_records::Migration),
        ]
    }
}
