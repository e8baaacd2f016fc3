//! Numeric field access by runtime name.
//!
//! Record shapes are fixed, so lookups go through the period/kind table in
//! [`super::period`] rather than any kind of introspection.

use super::period::parse_field_name;
use super::types::BrandRecord;

impl BrandRecord {
    /// Reads a numeric field by name, ignoring case.
    ///
    /// Recognises `id`, `year` and every `{period}_{ac|fc|diff}` column.
    /// Unknown names, text fields and null values all read as `0.0`.
    #[must_use]
    pub fn numeric_field(&self, name: &str) -> f64 {
        if name.eq_ignore_ascii_case("id") {
            return f64::from(self.id);
        }
        if name.eq_ignore_ascii_case("year") {
            return f64::from(self.year);
        }

        parse_field_name(name)
            .and_then(|(period, kind)| self.period(period).get(kind))
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::period::Month;
    use rstest::rstest;

    fn sample() -> BrandRecord {
        let mut record = BrandRecord::new(2025).with_month(Month::Mar, Some(42.5), Some(50.0));
        record.id = 7;
        record.item = Some("Nike".into());
        record
    }

    #[rstest]
    #[case("mar_ac", 42.5)]
    #[case("MAR_AC", 42.5)]
    #[case("Mar_Fc", 50.0)]
    #[case("id", 7.0)]
    #[case("Year", 2025.0)]
    fn test_reads_known_fields(#[case] name: &str, #[case] expected: f64) {
        assert!((sample().numeric_field(name) - expected).abs() < f64::EPSILON);
    }

    #[rstest]
    #[case("mar_diff")]
    #[case("apr_ac")]
    #[case("item")]
    #[case("location")]
    #[case("march_ac")]
    #[case("")]
    fn test_absent_or_non_numeric_reads_zero(#[case] name: &str) {
        assert!(sample().numeric_field(name).abs() < f64::EPSILON);
    }
}
