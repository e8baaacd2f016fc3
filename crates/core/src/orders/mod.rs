//! Kmart daily order ledger.
//!
//! One row per `(location, category, sub_category, date)` slot holding the
//! ordered quantity for that day. Saving a batch overwrites the quantity of
//! slots that already exist and inserts the rest.

pub mod error;
pub mod memory;
pub mod service;
pub mod store;
pub mod types;

pub use error::OrderError;
pub use memory::{MemoryOrderSession, MemoryOrderStore};
pub use service::{OrderService, UNKNOWN_ACTOR};
pub use store::{OrderSession, OrderStore};
pub use types::{KmartDailyRecord, KmartOrderInput, MonthSpan, OrderQuery, OrderSlot};
