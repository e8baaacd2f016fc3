//! `SeaORM` entity definitions.
//!
//! Brand record tables share one column layout and are addressed by name at
//! runtime (see [`crate::repositories::brand_record`]), so only the order
//! ledger has a static entity.

pub mod kmart_daily_records;
