//! Core business logic for Brandtrack.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, derivation rules, and persistence seams live here.
//!
//! # Modules
//!
//! - `brand` - The fixed brand registry and per-brand collection handles
//! - `record` - Monthly AC/FC records, derived fields, conflict checks, upserts
//! - `orders` - Kmart daily order ledger

pub mod brand;
pub mod orders;
pub mod record;

pub use brand::{Brand, BrandHandle};
pub use orders::{OrderError, OrderService};
pub use record::{BrandRecord, RecordError, RecordService};
