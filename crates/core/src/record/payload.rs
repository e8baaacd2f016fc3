//! Wire format of brand records.
//!
//! Request bodies are loosely typed: they are read as a JSON object first,
//! the `brand` discriminator is taken from it, and only then is the record
//! shape parsed. Keys match case-insensitively, unknown keys are ignored and
//! mismatched optional values fall back to null.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::error::RecordError;
use super::period::{FigureKind, Period, field_name};
use super::types::BrandRecord;
use crate::brand::Brand;

/// Lower-cased view over a JSON object's keys.
struct Fields<'a> {
    map: HashMap<String, &'a Value>,
}

impl<'a> Fields<'a> {
    fn new(value: &'a Value) -> Result<Self, RecordError> {
        let Value::Object(object) = value else {
            return Err(RecordError::invalid_payload("expected a JSON object"));
        };

        let map = object
            .iter()
            .map(|(k, v)| (k.to_ascii_lowercase(), v))
            .collect();

        Ok(Self { map })
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).copied().filter(|v| !v.is_null())
    }

    fn text(&self, key: &str) -> Option<String> {
        self.get(key).and_then(Value::as_str).map(str::to_string)
    }

    fn number(&self, key: &str) -> Option<f64> {
        match self.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    fn integer(&self, key: &str) -> Option<Result<i32, ()>> {
        let parsed = match self.get(key)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        Some(parsed.and_then(|n| i32::try_from(n).ok()).ok_or(()))
    }

    fn timestamp(&self, key: &str) -> Option<DateTime<Utc>> {
        self.get(key)
            .and_then(Value::as_str)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }
}

impl BrandRecord {
    /// Parses a record from a loosely typed JSON object.
    ///
    /// `year` is required and must be an integer. A malformed `id` is treated
    /// as absent, which makes the record transient.
    pub fn from_payload(value: &Value) -> Result<Self, RecordError> {
        let fields = Fields::new(value)?;

        let year = match fields.integer("year") {
            Some(Ok(year)) => year,
            Some(Err(())) => return Err(RecordError::invalid_payload("year must be an integer")),
            None => return Err(RecordError::invalid_payload("year is required")),
        };

        let mut record = Self {
            id: fields.integer("id").and_then(Result::ok).unwrap_or(0),
            location: fields.text("location"),
            item: fields.text("item"),
            year,
            updated_by: fields.text("updated_by"),
            updated_at: fields.timestamp("updated_at"),
            ..Self::default()
        };

        for period in Period::all() {
            for kind in FigureKind::ALL {
                *record.period_mut(period).get_mut(kind) =
                    fields.number(&field_name(period, kind));
            }
        }

        Ok(record)
    }
}

impl Serialize for BrandRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(6 + 48))?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry("location", &self.location)?;
        map.serialize_entry("item", &self.item)?;
        map.serialize_entry("year", &self.year)?;
        for period in Period::all() {
            let figures = self.period(period);
            for kind in FigureKind::ALL {
                map.serialize_entry(&field_name(period, kind), &figures.get(kind))?;
            }
        }
        map.serialize_entry("updated_by", &self.updated_by)?;
        map.serialize_entry("updated_at", &self.updated_at)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for BrandRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_payload(&value).map_err(D::Error::custom)
    }
}

/// A record body together with the brand it is addressed to.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordEnvelope {
    /// Target brand collection.
    pub brand: Brand,
    /// Parsed record (derived fields not yet computed).
    pub record: BrandRecord,
}

impl RecordEnvelope {
    /// Reads the `brand` discriminator, then parses the record for that brand.
    ///
    /// `default_brand` is used when the body carries no `brand` key.
    pub fn from_value(value: &Value, default_brand: Option<&str>) -> Result<Self, RecordError> {
        let fields = Fields::new(value)?;

        let name = fields
            .get("brand")
            .map(|v| {
                v.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| RecordError::invalid_payload("brand must be a string"))
            })
            .transpose()?
            .or_else(|| default_brand.map(str::to_string))
            .ok_or_else(|| RecordError::invalid_payload("brand is required"))?;

        let brand = Brand::resolve(&name).ok_or(RecordError::InvalidBrand(name))?;
        let record = BrandRecord::from_payload(value)?;

        Ok(Self { brand, record })
    }
}
