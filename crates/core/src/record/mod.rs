//! Monthly actual-vs-forecast brand records.

pub mod conflict;
pub mod derive;
pub mod error;
pub mod fields;
pub mod memory;
pub mod payload;
pub mod period;
pub mod service;
pub mod store;
pub mod types;

#[cfg(test)]
mod tests;

pub use conflict::ConflictQuery;
pub use derive::{derive, percentage};
pub use error::RecordError;
pub use memory::{MemoryRecordStore, MemorySession};
pub use payload::RecordEnvelope;
pub use period::{FigureKind, Month, Period, Quarter};
pub use service::RecordService;
pub use store::{RecordSession, RecordStore};
pub use types::{BrandRecord, ConflictResult, ExistingFigures, PeriodFigures, RecordFilter};
