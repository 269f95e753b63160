use edgeai_inventory::{
    comparison_rows, FilterChange, NormalizedDevice, Normalizer, RawRecord, SessionState,
    SortState,
};
use serde_json::json;

fn fleet() -> Vec<NormalizedDevice> {
    let records: Vec<RawRecord> = vec![
        json!({
            "id": "device-ncox", "deviceName": "NCOX", "Super Mode": "Enable",
            "AI Performance": "16 TOPS", "Memory": "16GB/8GB LPDDR5",
            "GPU": "1024-core NVIDIA Ampere", "OS": "Linux 5.10/ Ubuntu 20.04"
        }),
        json!({
            "id": "device-ncon", "deviceName": "NCON", "Super Mode": "Enable",
            "AI Performance": "16 TOPS", "Memory": "16GB/8GB LPDDR5",
            "GPU": "512-core NVIDIA Ampere", "OS": "Linux 5.10/ Ubuntu 20.04"
        }),
        json!({
            "id": "device-pson", "deviceName": "PSON", "Super Mode": "Disable",
            "AI Performance": "8 TOPS", "Memory": "8GB/4GB LPDDR5"
        }),
    ]
    .into_iter()
    .map(RawRecord::new)
    .collect();
    Normalizer::new().normalize(&records)
}

#[test]
fn test_gpu_only_difference_flags_only_gpu_row() {
    // Two devices identical except for gpu: only the GPU row is flagged.
    let devices = fleet();
    let selected: Vec<&NormalizedDevice> = devices[..2].iter().collect();
    let rows = comparison_rows(&selected);

    let flagged: Vec<&str> = rows
        .iter()
        .filter(|row| row.differing)
        .map(|row| row.label)
        .collect();
    assert_eq!(flagged, vec!["GPU"]);
}

#[test]
fn test_all_rows_carry_one_value_per_device() {
    let devices = fleet();
    let selected: Vec<&NormalizedDevice> = devices.iter().collect();
    for row in comparison_rows(&selected) {
        assert_eq!(row.values.len(), 3, "{} row arity", row.label);
    }
}

#[test]
fn test_missing_specs_compare_as_placeholder() {
    let devices = fleet();
    let selected: Vec<&NormalizedDevice> = devices.iter().collect();
    let rows = comparison_rows(&selected);
    let gpu_row = rows.iter().find(|row| row.label == "GPU").unwrap();
    assert_eq!(gpu_row.values[2], "Not Available");
    assert!(gpu_row.differing);
}

#[test]
fn test_selection_survives_filtering_out() {
    let devices = fleet();
    let mut session = SessionState::new();
    session.toggle_comparison("device-pson");

    // Filter that excludes the selected device from the view.
    session.apply_filter_change(FilterChange::Status(Some(true)));
    let visible = session.run_query(&devices);
    assert!(visible.iter().all(|d| d.id != "device-pson"));

    // The selection still resolves against the canonical collection.
    let compared = session.compared_devices(&devices);
    assert_eq!(compared.len(), 1);
    assert_eq!(compared[0].id, "device-pson");
}

#[test]
fn test_selection_survives_sort_and_view_changes() {
    let devices = fleet();
    let mut session = SessionState::new();
    session.toggle_comparison("device-ncox");
    session.toggle_comparison("device-ncon");

    session.set_sort(SortState::ByPerformanceDesc);
    session.set_view_mode(edgeai_inventory::ViewMode::List);

    let compared = session.compared_devices(&devices);
    assert_eq!(compared.len(), 2);
}

#[test]
fn test_stale_ids_dropped_after_collection_replacement() {
    let devices = fleet();
    let mut session = SessionState::new();
    session.toggle_comparison("device-ncox");
    session.toggle_comparison("device-gone-forever");

    let compared = session.compared_devices(&devices);
    assert_eq!(compared.len(), 1);
    assert_eq!(compared[0].id, "device-ncox");
}

#[test]
fn test_explicit_clear_only() {
    let devices = fleet();
    let mut session = SessionState::new();
    session.toggle_comparison("device-ncox");

    session.apply_filter_change(FilterChange::Reset);
    assert_eq!(session.compared_devices(&devices).len(), 1);

    session.clear_comparison();
    assert!(session.compared_devices(&devices).is_empty());
}
