//! Property-based and service-level tests for brand records.

use std::sync::Arc;

use proptest::prelude::*;
use serde_json::json;

use super::derive::{derive, percentage};
use super::period::{Month, Quarter};
use super::types::BrandRecord;

fn figure() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![Just(None), (0.0f64..1_000_000.0).prop_map(Some)]
}

fn raw_record() -> impl Strategy<Value = BrandRecord> {
    proptest::collection::vec((figure(), figure()), 12).prop_map(|figures| {
        let mut record = BrandRecord::new(2025);
        for (month, (ac, fc)) in Month::ALL.into_iter().zip(figures) {
            record = record.with_month(month, ac, fc);
        }
        record
    })
}

proptest! {
    /// For ac >= 0 and fc > 0 the diff is ac / fc * 100.
    #[test]
    fn test_percentage_with_positive_forecast(
        ac in 0.0f64..1_000_000.0,
        fc in 0.001f64..1_000_000.0,
    ) {
        prop_assert_eq!(percentage(Some(ac), Some(fc)), ac / fc * 100.0);
    }

    /// A zero or missing forecast always yields zero.
    #[test]
    fn test_percentage_without_forecast(ac in proptest::option::of(-1e9f64..1e9)) {
        prop_assert_eq!(percentage(ac, Some(0.0)), 0.0);
        prop_assert_eq!(percentage(ac, None), 0.0);
    }

    /// Quarter figures are the sum of their months with nulls as zero.
    #[test]
    fn test_quarters_sum_their_months(record in raw_record()) {
        let record = record.derived();

        for quarter in Quarter::ALL {
            let [m1, m2, m3] = quarter.months();
            let ac = record.month(m1).ac.unwrap_or(0.0)
                + record.month(m2).ac.unwrap_or(0.0)
                + record.month(m3).ac.unwrap_or(0.0);
            let fc = record.month(m1).fc.unwrap_or(0.0)
                + record.month(m2).fc.unwrap_or(0.0)
                + record.month(m3).fc.unwrap_or(0.0);

            prop_assert_eq!(record.quarter(quarter).ac, Some(ac));
            prop_assert_eq!(record.quarter(quarter).fc, Some(fc));
            prop_assert_eq!(record.quarter(quarter).diff, Some(percentage(Some(ac), Some(fc))));
        }
    }

    /// Deriving twice gives the same result as deriving once.
    #[test]
    fn test_derive_is_idempotent(record in raw_record()) {
        let once = record.derived();
        let mut twice = once.clone();
        derive(&mut twice);
        prop_assert_eq!(once, twice);
    }
}

mod service_tests {
    use super::*;
    use crate::brand::Brand;
    use crate::record::conflict::ConflictQuery;
    use crate::record::error::RecordError;
    use crate::record::memory::MemoryRecordStore;
    use crate::record::service::RecordService;
    use crate::record::types::{ConflictResult, RecordFilter};

    fn service() -> (Arc<MemoryRecordStore>, RecordService<MemoryRecordStore>) {
        let store = Arc::new(MemoryRecordStore::new());
        (Arc::clone(&store), RecordService::new(store))
    }

    fn conflict_query(brand: &str, month: &str) -> ConflictQuery {
        ConflictQuery {
            brand: brand.to_string(),
            year: 2025,
            month: month.to_string(),
            item: "X".to_string(),
            location: "Y".to_string(),
        }
    }

    #[tokio::test]
    async fn test_save_then_get_returns_derived_record() {
        let (_, service) = service();
        let payload = json!({
            "id": 0,
            "year": 2025,
            "item": "Tees",
            "location": "Dhaka",
            "jan_ac": 80,
            "jan_fc": 100,
            "jan_diff": 5,
            "q1_ac": 1
        });

        let saved = service.save("Nike", &payload, Some("alice")).await.unwrap();
        assert!(saved.id > 0);
        assert_eq!(saved.updated_by.as_deref(), Some("alice"));
        assert!(saved.updated_at.is_some());

        let fetched = service.get("Nike", saved.id).await.unwrap();
        let expected = BrandRecord::from_payload(&payload).unwrap().derived();

        assert_eq!(fetched.months, expected.months);
        assert_eq!(fetched.quarters, expected.quarters);
        assert_eq!(fetched.month(Month::Jan).diff, Some(80.0));
        assert_eq!(fetched.quarter(Quarter::Q1).ac, Some(80.0));
    }

    #[tokio::test]
    async fn test_save_with_existing_id_updates_in_place() {
        let (store, service) = service();
        let first = service
            .save("TJX", &json!({ "year": 2025, "item": "Old" }), None)
            .await
            .unwrap();

        let updated = service
            .save(
                "TJX",
                &json!({ "id": first.id, "year": 2025, "item": "New", "feb_ac": 3, "feb_fc": 4 }),
                None,
            )
            .await
            .unwrap();

        assert_eq!(updated.id, first.id);
        assert_eq!(updated.item.as_deref(), Some("New"));

        let rows = store.snapshot(Brand::Tjx);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].item.as_deref(), Some("New"));
        assert_eq!(rows[0].month(Month::Feb).diff, Some(75.0));
    }

    #[tokio::test]
    async fn test_update_replaces_whole_record() {
        let (_, service) = service();
        let first = service
            .save(
                "Padini",
                &json!({ "year": 2025, "location": "KL", "mar_ac": 10, "mar_fc": 10 }),
                None,
            )
            .await
            .unwrap();

        let replaced = service
            .save("Padini", &json!({ "id": first.id, "year": 2026 }), None)
            .await
            .unwrap();

        assert_eq!(replaced.location, None);
        assert_eq!(replaced.year, 2026);
        assert_eq!(replaced.month(Month::Mar).ac, None);
        assert_eq!(replaced.quarter(Quarter::Q1).ac, Some(0.0));
    }

    #[tokio::test]
    async fn test_unknown_id_is_inserted_as_new() {
        let (store, service) = service();

        let saved = service
            .save("Walmart", &json!({ "id": 42, "year": 2025 }), None)
            .await
            .unwrap();

        assert_eq!(saved.id, 1);
        assert_eq!(store.snapshot(Brand::Walmart).len(), 1);
    }

    #[tokio::test]
    async fn test_payload_updated_by_kept_without_actor() {
        let (_, service) = service();
        let saved = service
            .save("Nilron", &json!({ "year": 2025, "updated_by": "import" }), None)
            .await
            .unwrap();
        assert_eq!(saved.updated_by.as_deref(), Some("import"));
    }

    #[tokio::test]
    async fn test_unknown_brand_mutates_nothing() {
        let (store, service) = service();

        let err = service
            .save("NotABrand", &json!({ "year": 2025 }), None)
            .await
            .unwrap_err();

        assert!(matches!(err, RecordError::InvalidBrand(ref b) if b == "NotABrand"));
        for brand in Brand::ALL {
            assert!(store.snapshot(brand).is_empty());
        }
    }

    #[tokio::test]
    async fn test_missing_year_is_invalid_payload() {
        let (_, service) = service();
        let err = service
            .save("Nike", &json!({ "item": "X" }), None)
            .await
            .unwrap_err();
        assert!(matches!(err, RecordError::InvalidPayload(_)));
    }

    #[tokio::test]
    async fn test_overflowing_figures_are_rejected_before_write() {
        let (store, service) = service();
        let payload = json!({ "year": 2025, "jan_ac": 1e308, "feb_ac": 1e308, "jan_fc": 1 });

        let err = service.save("Nike", &payload, None).await.unwrap_err();
        assert!(matches!(err, RecordError::InvalidPayload(_)));

        let payloads = vec![json!({ "year": 2025, "jan_ac": 5 }), payload];
        let err = service
            .batch_save(Some("Nike"), &payloads, None)
            .await
            .unwrap_err();
        assert!(matches!(err, RecordError::InvalidPayload(_)));
        assert!(store.snapshot(Brand::Nike).is_empty());
    }

    #[tokio::test]
    async fn test_get_missing_record_is_not_found() {
        let (_, service) = service();
        let err = service.get("DCL", 5).await.unwrap_err();
        assert!(matches!(err, RecordError::NotFound { brand: Brand::Dcl, id: 5 }));

        let err = service.get("Dcl", 5).await.unwrap_err();
        assert!(matches!(err, RecordError::InvalidBrand(_)));
    }

    #[tokio::test]
    async fn test_batch_save_routes_each_payload_to_its_brand() {
        let (store, service) = service();
        let payloads = vec![
            json!({ "brand": "Inditex", "year": 2025, "apr_ac": 1, "apr_fc": 2 }),
            json!({ "brand": "KMART", "year": 2025 }),
            json!({ "year": 2024 }),
        ];

        let count = service
            .batch_save(Some("Inditex"), &payloads, Some("bob"))
            .await
            .unwrap();

        assert_eq!(count, 3);
        let inditex = store.snapshot(Brand::Inditex);
        assert_eq!(inditex.len(), 2);
        assert_eq!(inditex[0].month(Month::Apr).diff, Some(50.0));
        assert_eq!(inditex[1].year, 2024);
        assert_eq!(store.snapshot(Brand::Kmart).len(), 1);
        assert!(inditex.iter().all(|r| r.updated_by.as_deref() == Some("bob")));
    }

    #[tokio::test]
    async fn test_batch_with_invalid_entry_writes_nothing() {
        let (store, service) = service();
        let payloads = vec![
            json!({ "brand": "Nike", "year": 2025 }),
            json!({ "brand": "Adidas", "year": 2025 }),
        ];

        let err = service.batch_save(None, &payloads, None).await.unwrap_err();

        assert!(matches!(err, RecordError::InvalidBrand(_)));
        assert!(store.snapshot(Brand::Nike).is_empty());
    }

    #[tokio::test]
    async fn test_batch_updates_and_inserts_in_order() {
        let (store, service) = service();
        let existing = service
            .save("TATA", &json!({ "year": 2025, "item": "A" }), None)
            .await
            .unwrap();

        let payloads = vec![
            json!({ "brand": "TATA", "id": existing.id, "year": 2025, "item": "A2" }),
            json!({ "brand": "TATA", "year": 2025, "item": "B" }),
        ];
        service.batch_save(None, &payloads, None).await.unwrap();

        let items: Vec<Option<String>> = store
            .snapshot(Brand::Tata)
            .into_iter()
            .map(|r| r.item)
            .collect();
        assert_eq!(items, vec![Some("A2".to_string()), Some("B".to_string())]);
    }

    #[tokio::test]
    async fn test_list_single_brand_and_union() {
        let (_, service) = service();
        service.save("Nike", &json!({ "year": 2025 }), None).await.unwrap();
        service.save("Nike", &json!({ "year": 2024 }), None).await.unwrap();
        service.save("H&M", &json!({ "year": 2025 }), None).await.unwrap();

        let nike = service.list(Some("Nike"), &RecordFilter::default()).await.unwrap();
        assert_eq!(nike.len(), 2);

        let all = service.list(None, &RecordFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);

        let filter = RecordFilter {
            year: Some(2025),
            ..RecordFilter::default()
        };
        let all_2025 = service.list(None, &filter).await.unwrap();
        assert_eq!(all_2025.len(), 2);

        let err = service.list(Some("nike"), &RecordFilter::default()).await.unwrap_err();
        assert!(matches!(err, RecordError::InvalidBrand(_)));
    }

    #[test]
    fn test_list_brands_is_fixed() {
        let brands = RecordService::<MemoryRecordStore>::list_brands();
        assert_eq!(brands.len(), 15);
        assert_eq!(brands[8], "H&M");
    }

    #[tokio::test]
    async fn test_conflict_check_reports_existing_month() {
        let (_, service) = service();
        service
            .save(
                "Sterilite",
                &json!({ "year": 2025, "item": "X", "location": "Y", "jan_ac": 100, "jan_fc": 0 }),
                None,
            )
            .await
            .unwrap();

        let jan = service
            .check_conflict(&conflict_query("Sterilite", "Jan"))
            .await
            .unwrap();
        assert_eq!(jan, ConflictResult::existing(100.0, 0.0));

        let feb = service
            .check_conflict(&conflict_query("Sterilite", "Feb"))
            .await
            .unwrap();
        assert_eq!(feb, ConflictResult::none());
    }

    #[tokio::test]
    async fn test_conflict_check_inspects_first_match_only() {
        let (_, service) = service();
        service
            .save("Nike", &json!({ "year": 2025, "item": "X", "location": "Y" }), None)
            .await
            .unwrap();
        service
            .save(
                "Nike",
                &json!({ "year": 2025, "item": "X", "location": "Y", "may_ac": 5 }),
                None,
            )
            .await
            .unwrap();

        let result = service
            .check_conflict(&conflict_query("Nike", "May"))
            .await
            .unwrap();
        assert!(!result.exists);
    }

    #[tokio::test]
    async fn test_conflict_check_is_scoped_to_brand_and_slot() {
        let (_, service) = service();
        service
            .save(
                "Nike",
                &json!({ "year": 2025, "item": "X", "location": "Z", "jan_ac": 1 }),
                None,
            )
            .await
            .unwrap();

        let other_location = service
            .check_conflict(&conflict_query("Nike", "Jan"))
            .await
            .unwrap();
        assert!(!other_location.exists);

        let other_brand = service
            .check_conflict(&conflict_query("TTI", "Jan"))
            .await
            .unwrap();
        assert!(!other_brand.exists);

        let err = service
            .check_conflict(&conflict_query("Bogus", "Jan"))
            .await
            .unwrap_err();
        assert!(matches!(err, RecordError::InvalidBrand(_)));
    }
}
