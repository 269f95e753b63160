use edgeai_inventory::{
    query, DeviceCategory, FilterState, NormalizedDevice, Normalizer, RawRecord, SortState,
};
use serde_json::json;

fn fleet() -> Vec<NormalizedDevice> {
    let records: Vec<RawRecord> = vec![
        json!({
            "id": "device-ncox", "deviceName": "NCOX", "Super Mode": "Enable",
            "AI Performance": "16 TOPS", "Memory": "16GB/8GB LPDDR5"
        }),
        json!({
            "id": "device-ncon", "deviceName": "NCON", "Super Mode": "enabled",
            "AI Performance": "8 TOPS", "Memory": "8GB/4GB LPDDR5"
        }),
        json!({
            "id": "device-pson", "deviceName": "PSON", "Super Mode": "Disable",
            "AI Performance": "8 TOPS", "Memory": "8GB/4GB LPDDR5"
        }),
        json!({
            "id": "device-psox", "deviceName": "PSOX",
            "AI Performance": "16 TOPS", "Memory": "16GB/8GB LPDDR5"
        }),
        json!({
            "id": "device-gmd", "deviceName": "GMD Server", "Super Mode": "Enable",
            "AI Performance": "Up to 200 TOPS", "Memory": "32GB DDR5"
        }),
    ]
    .into_iter()
    .map(RawRecord::new)
    .collect();
    Normalizer::new().normalize(&records)
}

fn ids(devices: &[NormalizedDevice]) -> Vec<&str> {
    devices.iter().map(|d| d.id.as_str()).collect()
}

#[test]
fn test_query_idempotence() {
    let devices = fleet();
    let filter = FilterState {
        performance_range: Some((8.0, 16.0)),
        ..FilterState::default()
    };
    for sort in [
        SortState::None,
        SortState::ByName,
        SortState::ByModel,
        SortState::ByPerformanceDesc,
        SortState::ByStatus,
    ] {
        let first = query(&devices, &filter, sort);
        let second = query(&devices, &filter, sort);
        assert_eq!(ids(&first), ids(&second), "{sort:?} should be deterministic");
    }
}

#[test]
fn test_sort_none_equals_ingestion_order_filtered() {
    let devices = fleet();
    let filter = FilterState {
        search_term: Some("o".to_string()),
        ..FilterState::default()
    };

    // The reference order: ingestion order restricted to passing devices.
    let expected: Vec<&str> = devices
        .iter()
        .filter(|d| filter.matches(d))
        .map(|d| d.id.as_str())
        .collect();

    let result = query(&devices, &filter, SortState::None);
    assert_eq!(ids(&result), expected);
}

#[test]
fn test_sort_none_is_not_a_noop_after_other_sorts() {
    // Easily-regressed behavior: switching the sort back to none must
    // restore ingestion order, not keep the previous comparator order.
    let devices = fleet();
    let filter = FilterState::default();

    let by_perf = query(&devices, &filter, SortState::ByPerformanceDesc);
    assert_eq!(ids(&by_perf)[0], "device-gmd");

    let restored = query(&devices, &filter, SortState::None);
    assert_eq!(
        ids(&restored),
        vec!["device-ncox", "device-ncon", "device-pson", "device-psox", "device-gmd"]
    );
}

#[test]
fn test_status_enabled_scenario() {
    // statusRaw values ["Enable","enabled","Disable",null] with
    // statusEnabled: true return exactly the first two.
    let records: Vec<RawRecord> = vec![
        json!({"id": "device-1", "deviceName": "A", "Super Mode": "Enable"}),
        json!({"id": "device-2", "deviceName": "B", "Super Mode": "enabled"}),
        json!({"id": "device-3", "deviceName": "C", "Super Mode": "Disable"}),
        json!({"id": "device-4", "deviceName": "D", "Super Mode": null}),
    ]
    .into_iter()
    .map(RawRecord::new)
    .collect();
    let devices = Normalizer::new().normalize(&records);

    let filter = FilterState {
        status_enabled: Some(true),
        ..FilterState::default()
    };
    let result = query(&devices, &filter, SortState::None);
    assert_eq!(ids(&result), vec!["device-1", "device-2"]);
}

#[test]
fn test_search_is_case_insensitive_substring() {
    let devices = fleet();
    let filter = FilterState {
        search_term: Some("ncO".to_string()),
        ..FilterState::default()
    };
    let result = query(&devices, &filter, SortState::None);
    assert_eq!(ids(&result), vec!["device-ncox", "device-ncon"]);
}

#[test]
fn test_search_matches_display_name_prefix() {
    // The category prefix is part of the display name and searchable.
    let devices = fleet();
    let filter = FilterState {
        search_term: Some("ai edge server".to_string()),
        ..FilterState::default()
    };
    let result = query(&devices, &filter, SortState::None);
    assert_eq!(ids(&result), vec!["device-gmd"]);
}

#[test]
fn test_category_and_model_filters_are_exact() {
    let devices = fleet();

    let filter = FilterState {
        category: Some(DeviceCategory::Edge),
        ..FilterState::default()
    };
    assert_eq!(query(&devices, &filter, SortState::None).len(), 4);

    let filter = FilterState {
        model: Some("NCOX".to_string()),
        ..FilterState::default()
    };
    assert_eq!(ids(&query(&devices, &filter, SortState::None)), vec!["device-ncox"]);

    // Substring of a model is not an exact match.
    let filter = FilterState {
        model: Some("NCO".to_string()),
        ..FilterState::default()
    };
    assert!(query(&devices, &filter, SortState::None).is_empty());
}

#[test]
fn test_memory_floor_excludes_unparseable_memory() {
    let records: Vec<RawRecord> = vec![
        json!({"id": "device-1", "deviceName": "A", "Memory": "16GB/8GB LPDDR5"}),
        json!({"id": "device-2", "deviceName": "B", "Memory": "shared with host"}),
        json!({"id": "device-3", "deviceName": "C"}),
        json!({"id": "device-4", "deviceName": "D", "Memory": "8GB LPDDR4"}),
    ]
    .into_iter()
    .map(RawRecord::new)
    .collect();
    let devices = Normalizer::new().normalize(&records);

    let filter = FilterState {
        memory_min_gb: Some(16),
        ..FilterState::default()
    };
    assert_eq!(ids(&query(&devices, &filter, SortState::None)), vec!["device-1"]);

    let filter = FilterState {
        memory_min_gb: Some(8),
        ..FilterState::default()
    };
    assert_eq!(
        ids(&query(&devices, &filter, SortState::None)),
        vec!["device-1", "device-4"]
    );
}

#[test]
fn test_sorts_are_stable_on_ties() {
    let devices = fleet();

    let by_perf = query(&devices, &FilterState::default(), SortState::ByPerformanceDesc);
    // 16-TOPS tie keeps ingestion order: ncox before psox.
    assert_eq!(
        ids(&by_perf),
        vec!["device-gmd", "device-ncox", "device-psox", "device-ncon", "device-pson"]
    );

    let by_status = query(&devices, &FilterState::default(), SortState::ByStatus);
    // Enabled group and disabled group each keep ingestion order.
    assert_eq!(
        ids(&by_status),
        vec!["device-ncox", "device-ncon", "device-gmd", "device-pson", "device-psox"]
    );
}

#[test]
fn test_sort_by_name_is_locale_free_lexicographic() {
    let devices = fleet();
    let result = query(&devices, &FilterState::default(), SortState::ByName);
    // "AI Edge Server GMD Server" sorts before the "Edge AI ..." names.
    assert_eq!(
        ids(&result),
        vec!["device-gmd", "device-ncon", "device-ncox", "device-pson", "device-psox"]
    );
}

#[test]
fn test_filters_are_and_combined() {
    let devices = fleet();
    let filter = FilterState {
        status_enabled: Some(true),
        performance_range: Some((10.0, 300.0)),
        ..FilterState::default()
    };
    let result = query(&devices, &filter, SortState::None);
    assert_eq!(ids(&result), vec!["device-ncox", "device-gmd"]);
}

#[test]
fn test_empty_collection_queries_cleanly() {
    let result = query(&[], &FilterState::default(), SortState::ByName);
    assert!(result.is_empty());
}
