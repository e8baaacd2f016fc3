//! Kmart order types.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::error::OrderError;

/// A stored daily order quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KmartDailyRecord {
    /// Store-assigned identifier.
    pub id: i32,
    /// Origin, e.g. `China`.
    pub location: String,
    /// Product category, e.g. `RFID`.
    pub category: String,
    /// Product size or variant, e.g. `44x19MM`.
    pub sub_category: Option<String>,
    /// Order day.
    pub date: NaiveDate,
    /// Pieces ordered.
    pub quantity: i32,
    /// Who last wrote the row.
    pub modified_by: Option<String>,
    /// When the row was last written.
    pub updated_at: DateTime<Utc>,
}

impl KmartDailyRecord {
    /// The slot this row occupies.
    #[must_use]
    pub fn slot(&self) -> OrderSlot {
        OrderSlot::new(&self.location, &self.category, self.sub_category.as_deref(), self.date)
    }
}

/// An order quantity as submitted by a client.
///
/// `date` accepts a plain date or a date-time; the time of day is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KmartOrderInput {
    /// Origin.
    pub location: String,
    /// Product category.
    pub category: String,
    /// Product size or variant.
    #[serde(default)]
    pub sub_category: Option<String>,
    /// Order day.
    #[serde(deserialize_with = "day")]
    pub date: NaiveDate,
    /// Pieces ordered.
    pub quantity: i32,
}

impl KmartOrderInput {
    /// The slot this input targets.
    #[must_use]
    pub fn slot(&self) -> OrderSlot {
        OrderSlot::new(&self.location, &self.category, self.sub_category.as_deref(), self.date)
    }
}

/// Identity of a daily order row.
///
/// A missing sub-category and an empty one are the same slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderSlot {
    /// Origin.
    pub location: String,
    /// Product category.
    pub category: String,
    /// Sub-category, `""` when absent.
    pub sub_category: String,
    /// Order day.
    pub date: NaiveDate,
}

impl OrderSlot {
    /// Builds a slot, folding a missing sub-category into `""`.
    #[must_use]
    pub fn new(
        location: &str,
        category: &str,
        sub_category: Option<&str>,
        date: NaiveDate,
    ) -> Self {
        Self {
            location: location.to_string(),
            category: category.to_string(),
            sub_category: sub_category.unwrap_or_default().to_string(),
            date,
        }
    }
}

/// Query parameters for listing orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderQuery {
    /// Calendar year.
    pub year: i32,
    /// A single month.
    pub month: Option<u32>,
    /// Last month of a year-to-date range; takes precedence over `month`.
    pub end_month: Option<u32>,
}

impl OrderQuery {
    /// The months covered by this query.
    pub fn span(&self) -> Result<MonthSpan, OrderError> {
        let (first, last) = match (self.end_month, self.month) {
            (Some(end), _) => (1, end),
            (None, Some(month)) => (month, month),
            (None, None) => (1, 12),
        };
        for month in [first, last] {
            if !(1..=12).contains(&month) {
                return Err(OrderError::InvalidMonth(month));
            }
        }
        Ok(MonthSpan {
            year: self.year,
            first,
            last,
        })
    }
}

/// An inclusive range of months within one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthSpan {
    /// Calendar year.
    pub year: i32,
    /// First month, `1..=12`.
    pub first: u32,
    /// Last month, `1..=12`.
    pub last: u32,
}

impl MonthSpan {
    /// Whether `date` falls inside the span.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && (self.first..=self.last).contains(&date.month())
    }

    /// First day of the span.
    #[must_use]
    pub fn start(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.first, 1)
    }

    /// First day after the span.
    #[must_use]
    pub fn end_exclusive(&self) -> Option<NaiveDate> {
        if self.last == 12 {
            self.year
                .checked_add(1)
                .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
        } else {
            NaiveDate::from_ymd_opt(self.year, self.last + 1, 1)
        }
    }
}

fn day<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_day(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid date: {raw}")))
}

/// Parses a date or date-time string down to its day.
#[must_use]
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .ok()
}
