//! Integration tests for fleetbom
//!
//! These tests verify end-to-end functionality of build report import,
//! tree diffing, swap reconciliation and life-limit evaluation against
//! the built-in stores.

use fleetbom::alerts::LifeLimitEvaluator;
use fleetbom::diff::TreeDiffer;
use fleetbom::import::{import_build_report, ImportMode};
use fleetbom::model::{ActivityRecord, Component, InventoryItem, ProductTree, SwapType};
use fleetbom::store::{FleetStore, JsonFileStore, MemoryStore};
use fleetbom::swap::{SwapReconciler, SwapRequest};
use std::path::Path;

// ============================================================================
// Test Fixtures
// ============================================================================

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> std::path::PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

fn spare_blade(id: u64, serial: &str) -> InventoryItem {
    InventoryItem {
        id,
        description: "Fan Blade (overhauled)".into(),
        part_number: "FB-21".into(),
        serial_number: serial.into(),
        location: "Shelf A3".into(),
        current_hours: 0.0,
        life_limit: 5000.0,
    }
}

// ============================================================================
// Import Tests
// ============================================================================

mod import_tests {
    use super::*;

    #[test]
    fn test_import_minimal_report() {
        let path = fixture_path("build_reports/minimal.csv");
        let outcome = import_build_report(&path, ImportMode::SkipAndReport)
            .expect("failed to import minimal build report");

        assert!(outcome.warnings.is_empty());
        assert_eq!(outcome.rows_used, 1);
        assert_eq!(outcome.tree.roots.len(), 1);

        let fan = &outcome.tree.roots[0];
        assert_eq!(fan.serial_number, "SN-A");
        assert_eq!(fan.children.len(), 1);

        let blade = &fan.children[0];
        assert_eq!(blade.serial_number, "SN-B");
        assert_eq!(blade.current_hours, 10.0);
        assert_eq!(blade.life_limit, 100.0);
    }

    #[test]
    fn test_import_full_engine_report() {
        let path = fixture_path("build_reports/full_engine.csv");
        let outcome = import_build_report(&path, ImportMode::SkipAndReport)
            .expect("failed to import full engine report");

        // Row 8 reuses SN-003, row 9 is missing its part serial.
        assert_eq!(outcome.rows_read, 8);
        assert_eq!(outcome.rows_used, 6);
        assert_eq!(outcome.warnings.len(), 2);
        assert_eq!(outcome.warnings[0].sheet_row, 8);
        assert_eq!(outcome.warnings[1].sheet_row, 9);

        // Two assemblies plus two standalone parts at the root.
        assert_eq!(outcome.tree.roots.len(), 4);
        let fan = outcome.tree.find_by_serial("SN-FAN").expect("fan module");
        assert_eq!(fan.children.len(), 2);
        assert_eq!(fan.life_limit, 0.0);
        assert_eq!(fan.current_hours, 1250.0);

        // One flattened entry per used row, plus the two assembly nodes.
        assert_eq!(outcome.tree.node_count(), 8);
    }

    #[test]
    fn test_import_header_only_fails() {
        let path = fixture_path("build_reports/header_only.csv");
        let err = import_build_report(&path, ImportMode::SkipAndReport).unwrap_err();
        assert!(err.to_string().contains("import"));
    }

    #[test]
    fn test_strict_mode_rejects_full_engine_report() {
        let path = fixture_path("build_reports/full_engine.csv");
        let err = import_build_report(&path, ImportMode::Strict).unwrap_err();
        let source = std::error::Error::source(&err).expect("kind").to_string();
        assert!(source.contains("2 row(s) rejected"));
        assert!(source.contains("sheet row 8"));
    }
}

// ============================================================================
// Diff Tests
// ============================================================================

mod diff_tests {
    use super::*;

    #[test]
    fn test_reimport_diff_classifies_changes() {
        let outcome = import_build_report(
            &fixture_path("build_reports/full_engine.csv"),
            ImportMode::SkipAndReport,
        )
        .unwrap();

        // Simulate the next revision of the sheet: hours advanced on one
        // part, one part gone, one new part.
        let mut next = outcome.tree.clone();
        {
            let pump = next
                .roots
                .iter_mut()
                .find(|c| c.serial_number == "SN-005")
                .unwrap();
            pump.current_hours = 1500.0;
        }
        next.roots.retain(|c| c.serial_number != "SN-006");
        next.roots
            .push(Component::leaf(99, "Igniter", "IG-06", "SN-007", 0.0, 0.0));

        let diff = TreeDiffer::new().diff(&outcome.tree, &next);
        assert_eq!(diff.summary.added, 1);
        assert_eq!(diff.summary.updated, 1);
        assert_eq!(diff.summary.removed, 1);
        assert_eq!(
            diff.summary.unchanged,
            outcome.tree.node_count() - 2 // minus the removed and the updated
        );

        let updated = &diff.updated[0];
        assert_eq!(updated.serial_number, "SN-005");
        assert_eq!(updated.fields[0].field, "current_hours");
    }

    #[test]
    fn test_self_diff_has_no_changes() {
        let outcome = import_build_report(
            &fixture_path("build_reports/full_engine.csv"),
            ImportMode::SkipAndReport,
        )
        .unwrap();
        let diff = TreeDiffer::new().diff(&outcome.tree, &outcome.tree.clone());
        assert!(!diff.has_changes());
    }
}

// ============================================================================
// Swap Tests
// ============================================================================

mod swap_tests {
    use super::*;

    fn seeded_store() -> MemoryStore {
        let store = MemoryStore::new();
        let mut engine = store.create_engine("ESN-0001").unwrap();
        engine.total_hours = 1250.0;
        engine.components = import_build_report(
            &fixture_path("build_reports/full_engine.csv"),
            ImportMode::SkipAndReport,
        )
        .unwrap()
        .tree;
        store.save_engine(engine).unwrap();
        store.add_inventory_item(spare_blade(1, "SN-SPARE")).unwrap();
        store
    }

    #[test]
    fn test_swap_conserves_the_fleet() {
        let store = seeded_store();
        let engine = store.load_engine(1).unwrap();
        let blade = engine.components.find_by_serial("SN-001").unwrap();
        let nodes_before = engine.components.node_count();
        let ledger_before = store.load_ledger().unwrap().len();

        let outcome = SwapReconciler::new(&store)
            .swap(&SwapRequest {
                engine_id: 1,
                remove_id: blade.id,
                install_id: 1,
                swap_type: SwapType::Component,
                assembly_group: None,
                performed_by: "jdoe".into(),
            })
            .unwrap();

        let engine = store.load_engine(1).unwrap();
        let ledger = store.load_ledger().unwrap();

        assert_eq!(engine.components.node_count(), nodes_before);
        assert_eq!(ledger.len(), ledger_before);
        assert!(engine.components.find_by_serial("SN-SPARE").is_some());
        assert!(ledger.get_by_serial("SN-001").is_some());
        assert_eq!(outcome.installed_serial, "SN-SPARE");
        assert_eq!(outcome.removed_serial, "SN-001");

        // Installed part inherits the engine's running total.
        let installed = engine.components.find_by_serial("SN-SPARE").unwrap();
        assert_eq!(installed.current_hours, 1250.0);

        // Audit trail records the exchange.
        assert!(matches!(
            engine.activity_log.last(),
            Some(ActivityRecord::Swap(swap))
                if swap.installed_serial == "SN-SPARE" && swap.removed_serial == "SN-001"
        ));
    }

    #[test]
    fn test_installed_item_cannot_be_installed_twice() {
        let store = seeded_store();
        let engine = store.load_engine(1).unwrap();
        let first = engine.components.find_by_serial("SN-001").unwrap().id;
        let reconciler = SwapReconciler::new(&store);

        reconciler
            .swap(&SwapRequest {
                engine_id: 1,
                remove_id: first,
                install_id: 1,
                swap_type: SwapType::Component,
                assembly_group: None,
                performed_by: "jdoe".into(),
            })
            .unwrap();

        // The item left the ledger with the first swap.
        let engine = store.load_engine(1).unwrap();
        let second = engine.components.find_by_serial("SN-002").unwrap().id;
        let err = reconciler
            .swap(&SwapRequest {
                engine_id: 1,
                remove_id: second,
                install_id: 1,
                swap_type: SwapType::Component,
                assembly_group: None,
                performed_by: "jdoe".into(),
            })
            .unwrap_err();
        assert!(err.to_string().contains("Not found"));
    }
}

// ============================================================================
// Life-Limit Tests
// ============================================================================

mod alert_tests {
    use super::*;

    #[test]
    fn test_worked_example_crosses_threshold_at_sixty_hours() {
        let store = MemoryStore::new();
        let mut engine = store.create_engine("ESN-0001").unwrap();
        let mut fan = Component::leaf(1, "Fan", "FN-1", "SN-A", 10.0, 0.0);
        fan.children = vec![Component::leaf(2, "Blade", "BL-1", "SN-B", 10.0, 100.0)];
        engine.components = ProductTree::new(vec![fan]);
        let engine = store.save_engine(engine).unwrap();

        // remaining = 90: outside the threshold.
        let evaluator = LifeLimitEvaluator::new(50.0);
        assert!(evaluator.evaluate_engine(&engine).unwrap().is_empty());

        // Raise hours to 60: remaining = 40, one alert.
        let mut engine = store.load_engine(1).unwrap();
        engine.components.roots[0].children[0].current_hours = 60.0;
        let engine = store.save_engine(engine).unwrap();

        let alerts = evaluator.evaluate_engine(&engine).unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].remaining, 40.0);
        assert_eq!(alerts[0].serial_number, "SN-B");
    }

    #[test]
    fn test_fleet_ranking_is_deterministic() {
        let store = MemoryStore::new();
        for (name, hours) in [("ESN-0001", 4990.0), ("ESN-0002", 5100.0)] {
            let mut engine = store.create_engine(name).unwrap();
            engine.components = ProductTree::new(vec![Component::leaf(
                1, "Blade", "FB-21", format!("SN-{name}"), hours, 5000.0,
            )]);
            store.save_engine(engine).unwrap();
        }

        let engines = store.list_engines().unwrap();
        let alerts = LifeLimitEvaluator::default().evaluate_fleet(&engines).unwrap();
        assert_eq!(alerts.len(), 2);
        // Overdue part first.
        assert_eq!(alerts[0].remaining, -100.0);
        assert_eq!(alerts[1].remaining, 10.0);
    }
}

// ============================================================================
// Store Tests
// ============================================================================

mod store_tests {
    use super::*;

    #[test]
    fn test_json_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fleet.json");

        {
            let store = JsonFileStore::open(&path).unwrap();
            let mut engine = store.create_engine("ESN-0001").unwrap();
            engine.components = import_build_report(
                &fixture_path("build_reports/minimal.csv"),
                ImportMode::SkipAndReport,
            )
            .unwrap()
            .tree;
            store.save_engine(engine).unwrap();
            store.add_inventory_item(spare_blade(1, "SN-SPARE")).unwrap();
        }

        let store = JsonFileStore::open(&path).unwrap();
        let engine = store.load_engine(1).unwrap();
        assert_eq!(engine.name, "ESN-0001");
        assert!(engine.components.find_by_serial("SN-B").is_some());
        assert_eq!(store.load_ledger().unwrap().len(), 1);
    }

    #[test]
    fn test_json_store_swap_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fleet.json");
        let store = JsonFileStore::open(&path).unwrap();

        let mut engine = store.create_engine("ESN-0001").unwrap();
        engine.total_hours = 42.0;
        engine.components = import_build_report(
            &fixture_path("build_reports/minimal.csv"),
            ImportMode::SkipAndReport,
        )
        .unwrap()
        .tree;
        store.save_engine(engine).unwrap();
        store.add_inventory_item(spare_blade(1, "SN-SPARE")).unwrap();

        let engine = store.load_engine(1).unwrap();
        let blade = engine.components.find_by_serial("SN-B").unwrap();
        SwapReconciler::new(&store)
            .swap(&SwapRequest {
                engine_id: 1,
                remove_id: blade.id,
                install_id: 1,
                swap_type: SwapType::Component,
                assembly_group: None,
                performed_by: "jdoe".into(),
            })
            .unwrap();

        // Reopen from disk and verify the exchange persisted atomically.
        drop(store);
        let store = JsonFileStore::open(&path).unwrap();
        let engine = store.load_engine(1).unwrap();
        let ledger = store.load_ledger().unwrap();
        assert!(engine.components.find_by_serial("SN-SPARE").is_some());
        assert!(ledger.get_by_serial("SN-B").is_some());
        assert!(ledger.get_by_serial("SN-SPARE").is_none());
        assert_eq!(engine.version, 2);
    }

    #[test]
    fn test_corrupt_snapshot_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fleet.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonFileStore::open(&path).unwrap_err();
        assert!(err.to_string().contains("Store operation failed"));
    }
}
