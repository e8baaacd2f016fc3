//! Brand record data types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::period::{FigureKind, Month, Period, Quarter};

/// The three figures tracked for a month or a quarter.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PeriodFigures {
    /// Actual.
    pub ac: Option<f64>,
    /// Forecast.
    pub fc: Option<f64>,
    /// Achievement percentage (`ac / fc * 100`).
    pub diff: Option<f64>,
}

impl PeriodFigures {
    /// Creates raw figures with no derived value yet.
    #[must_use]
    pub const fn raw(ac: Option<f64>, fc: Option<f64>) -> Self {
        Self { ac, fc, diff: None }
    }

    /// Returns the figure of the given kind.
    #[must_use]
    pub const fn get(&self, kind: FigureKind) -> Option<f64> {
        match kind {
            FigureKind::Ac => self.ac,
            FigureKind::Fc => self.fc,
            FigureKind::Diff => self.diff,
        }
    }

    /// Mutable access to the figure of the given kind.
    pub fn get_mut(&mut self, kind: FigureKind) -> &mut Option<f64> {
        match kind {
            FigureKind::Ac => &mut self.ac,
            FigureKind::Fc => &mut self.fc,
            FigureKind::Diff => &mut self.diff,
        }
    }
}

/// Monthly actual-vs-forecast figures for one brand, item, location and year.
///
/// Every brand collection stores this same shape. On the wire the periods are
/// flattened into `jan_ac`, `jan_fc`, `jan_diff`, ..., `q4_diff` keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrandRecord {
    /// Store-assigned identifier; `0` until the record is first inserted.
    pub id: i32,
    /// Location label.
    pub location: Option<String>,
    /// Item (brand or SKU) label.
    pub item: Option<String>,
    /// Calendar year.
    pub year: i32,
    /// Monthly figures, indexed by [`Month::index`].
    pub months: [PeriodFigures; 12],
    /// Quarterly figures, indexed by [`Quarter::index`]. Always derived.
    pub quarters: [PeriodFigures; 4],
    /// Identity of the last writer.
    pub updated_by: Option<String>,
    /// Time of the last write.
    pub updated_at: Option<DateTime<Utc>>,
}

impl BrandRecord {
    /// Creates a transient record for the given year.
    #[must_use]
    pub fn new(year: i32) -> Self {
        Self {
            year,
            ..Self::default()
        }
    }

    /// Whether the record has been inserted into a store.
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.id > 0
    }

    /// Figures for a month.
    #[must_use]
    pub const fn month(&self, month: Month) -> &PeriodFigures {
        &self.months[month.index()]
    }

    /// Mutable figures for a month.
    pub fn month_mut(&mut self, month: Month) -> &mut PeriodFigures {
        &mut self.months[month.index()]
    }

    /// Figures for a quarter.
    #[must_use]
    pub const fn quarter(&self, quarter: Quarter) -> &PeriodFigures {
        &self.quarters[quarter.index()]
    }

    /// Mutable figures for a quarter.
    pub fn quarter_mut(&mut self, quarter: Quarter) -> &mut PeriodFigures {
        &mut self.quarters[quarter.index()]
    }

    /// Figures for any period.
    #[must_use]
    pub const fn period(&self, period: Period) -> &PeriodFigures {
        match period {
            Period::Month(m) => self.month(m),
            Period::Quarter(q) => self.quarter(q),
        }
    }

    /// Mutable figures for any period.
    pub fn period_mut(&mut self, period: Period) -> &mut PeriodFigures {
        match period {
            Period::Month(m) => self.month_mut(m),
            Period::Quarter(q) => self.quarter_mut(q),
        }
    }

    /// Sets the raw actual and forecast of a month.
    #[must_use]
    pub fn with_month(mut self, month: Month, ac: Option<f64>, fc: Option<f64>) -> Self {
        *self.month_mut(month) = PeriodFigures::raw(ac, fc);
        self
    }
}

/// Optional equality filters for listing records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RecordFilter {
    /// Only records of this year.
    pub year: Option<i32>,
    /// Only records with this item.
    pub item: Option<String>,
    /// Only records at this location.
    pub location: Option<String>,
}

impl RecordFilter {
    /// Filter matching the conflict identity tuple exactly.
    #[must_use]
    pub fn slot(year: i32, item: &str, location: &str) -> Self {
        Self {
            year: Some(year),
            item: Some(item.to_string()),
            location: Some(location.to_string()),
        }
    }

    /// Whether a record passes every set filter.
    #[must_use]
    pub fn matches(&self, record: &BrandRecord) -> bool {
        self.year.is_none_or(|y| record.year == y)
            && self
                .item
                .as_deref()
                .is_none_or(|i| record.item.as_deref() == Some(i))
            && self
                .location
                .as_deref()
                .is_none_or(|l| record.location.as_deref() == Some(l))
    }
}

/// Figures already stored for the checked month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExistingFigures {
    /// Stored actual.
    pub ac: f64,
    /// Stored forecast.
    pub fc: f64,
}

/// Outcome of a pre-submission conflict check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConflictResult {
    /// Whether non-zero data already exists for the month.
    pub exists: bool,
    /// The stored figures when `exists` is true.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<ExistingFigures>,
}

impl ConflictResult {
    /// No conflicting data.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            exists: false,
            record: None,
        }
    }

    /// Existing data with the given figures.
    #[must_use]
    pub const fn existing(ac: f64, fc: f64) -> Self {
        Self {
            exists: true,
            record: Some(ExistingFigures { ac, fc }),
        }
    }
}
