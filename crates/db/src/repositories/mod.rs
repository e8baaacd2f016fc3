//! Repository abstractions for data access.
//!
//! Repositories implement the core store traits on top of `SeaORM`, hiding
//! the database details from the rest of the application.

pub mod brand_record;
pub mod kmart_order;

pub use brand_record::{BrandRecordRepository, PgRecordSession};
pub use kmart_order::{KmartOrderRepository, PgOrderSession};
