//! Pre-submission duplicate detection.

use serde::Deserialize;

use super::types::{BrandRecord, ConflictResult};

/// Parameters of a conflict check.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConflictQuery {
    /// Brand whose collection is searched.
    pub brand: String,
    /// Calendar year.
    pub year: i32,
    /// Month name as a field prefix, e.g. `"Jan"`.
    pub month: String,
    /// Item label, matched exactly.
    pub item: String,
    /// Location label, matched exactly.
    pub location: String,
}

/// Decides whether `record` already carries data for `month`.
///
/// Figures are read by field name, so an unrecognised month reads as zero.
/// A row whose figures for the month are both zero or null counts as not yet
/// entered.
#[must_use]
pub fn evaluate(record: Option<&BrandRecord>, month: &str) -> ConflictResult {
    let Some(record) = record else {
        return ConflictResult::none();
    };

    let month = month.to_lowercase();
    let ac = record.numeric_field(&format!("{month}_ac"));
    let fc = record.numeric_field(&format!("{month}_fc"));

    if ac > 0.0 || fc > 0.0 {
        ConflictResult::existing(ac, fc)
    } else {
        ConflictResult::none()
    }
}
