//! Derived-field computation.
//!
//! Every write recomputes month diffs, quarter sums and quarter diffs from the
//! raw monthly actual and forecast figures. Caller-supplied derived values are
//! never kept.

use super::error::RecordError;
use super::period::{FigureKind, Month, Period, Quarter, field_name};
use super::types::BrandRecord;

/// Achievement percentage of actual against forecast.
///
/// A missing or zero forecast yields `0.0` instead of a division error.
/// A missing actual counts as zero. No rounding is applied.
#[must_use]
pub fn percentage(ac: Option<f64>, fc: Option<f64>) -> f64 {
    match fc {
        None => 0.0,
        Some(fc) if fc == 0.0 => 0.0,
        Some(fc) => ac.unwrap_or(0.0) / fc * 100.0,
    }
}

/// Sums the figures of a quarter's months, treating nulls as zero.
fn quarter_sum(
    record: &BrandRecord,
    quarter: Quarter,
    pick: fn(&BrandRecord, Month) -> Option<f64>,
) -> f64 {
    quarter
        .months()
        .into_iter()
        .map(|m| pick(record, m).unwrap_or(0.0))
        .sum()
}

/// Recomputes every derived field of the record in place.
///
/// Months first, then quarters; quarters consume the monthly `ac`/`fc`
/// inputs, not the monthly diffs.
pub fn derive(record: &mut BrandRecord) {
    for month in Month::ALL {
        let figures = record.month_mut(month);
        figures.diff = Some(percentage(figures.ac, figures.fc));
    }

    for quarter in Quarter::ALL {
        let ac = quarter_sum(record, quarter, |r, m| r.month(m).ac);
        let fc = quarter_sum(record, quarter, |r, m| r.month(m).fc);

        let figures = record.quarter_mut(quarter);
        figures.ac = Some(ac);
        figures.fc = Some(fc);
        figures.diff = Some(percentage(Some(ac), Some(fc)));
    }
}

/// Rejects a record holding an infinite or NaN figure.
///
/// Quarter sums and percentages of very large inputs overflow to infinity,
/// which has no JSON or column representation.
pub fn ensure_finite(record: &BrandRecord) -> Result<(), RecordError> {
    for period in Period::all() {
        let figures = record.period(period);
        for kind in FigureKind::ALL {
            if figures.get(kind).is_some_and(|v| !v.is_finite()) {
                return Err(RecordError::invalid_payload(format!(
                    "{} is out of range",
                    field_name(period, kind)
                )));
            }
        }
    }
    Ok(())
}

impl BrandRecord {
    /// Returns a copy with all derived fields recomputed.
    #[must_use]
    pub fn derived(mut self) -> Self {
        derive(&mut self);
        self
    }
}
