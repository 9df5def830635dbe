//! Integration tests for the overview engine.
//!
//! Drives `OverviewAggregator` through the public API only: lifecycle
//! scenarios, count invariants under arbitrary sequences, and concurrent
//! mutation of a single fabric.
#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::thread;

use fabricsim_core::{
    AttributeChange, Category, CoreError, EngineConfig, FixedBucket, HealthStatus,
    InventorySwitch, KeyTranslator, OverviewAggregator, OverviewEvent, OverviewSnapshot,
    OverviewState, SwitchAttributes, SwitchRole, SyncStatus,
};
use pretty_assertions::assert_eq;

// ── Helpers ─────────────────────────────────────────────────────────

fn aggregator() -> OverviewAggregator {
    OverviewAggregator::new(Arc::new(OverviewState::new()))
}

fn switch(sync: &str, health: &str, model: &str, version: &str, role: &str) -> SwitchAttributes {
    SwitchAttributes::new()
        .with_sync(sync)
        .with_health(health)
        .with_hw_model(model)
        .with_sw_version(version)
        .with_role(role)
}

fn leaf() -> SwitchAttributes {
    switch("in_sync", "Healthy", "N9K-C93180YC-EX", "10.2(5)", "leaf")
}

fn zeroed() -> OverviewSnapshot {
    let agg = aggregator();
    agg.initialize("zero");
    agg.snapshot("zero").unwrap()
}

// ── Scenarios ───────────────────────────────────────────────────────

#[test]
fn test_add_then_snapshot() {
    let agg = aggregator();
    agg.initialize("F1");
    agg.on_switch_added("F1", &leaf()).unwrap();

    let snap = agg.snapshot("F1").unwrap();
    assert_eq!(snap.sync.in_sync, 1);
    assert_eq!(snap.sync.out_of_sync, 0);
    assert_eq!(snap.health.healthy, 1);
    assert_eq!(snap.health.major, 0);
    assert_eq!(snap.health.minor, 0);
    assert_eq!(snap.hw_model.len(), 1);
    assert_eq!(snap.hw_model_count("N9K-C93180YC-EX"), 1);
    assert_eq!(snap.sw_version.len(), 1);
    assert_eq!(snap.sw_version_count("10.2(5)"), 1);
    for role in SwitchRole::all() {
        let expected = u64::from(*role == SwitchRole::Leaf);
        assert_eq!(snap.role_count(*role), expected, "role {role}");
    }
}

#[test]
fn test_role_change_leaf_to_spine() {
    let agg = aggregator();
    agg.initialize("F1");
    agg.on_switch_added("F1", &leaf()).unwrap();
    assert!(agg.on_role_changed("F1", "leaf", "spine").unwrap());

    let snap = agg.snapshot("F1").unwrap();
    assert_eq!(snap.role["leaf"], 0);
    assert_eq!(snap.role["spine"], 1);
}

#[test]
fn test_role_change_with_wrong_case_changes_nothing() {
    let agg = aggregator();
    agg.on_switch_added("F1", &leaf()).unwrap();
    let before = agg.snapshot("F1").unwrap();

    let err = agg.on_role_changed("F1", "Leaf", "spine").unwrap_err();
    assert!(matches!(err, CoreError::InvalidRole { ref value } if value == "Leaf"));
    let err = agg.on_role_changed("F1", "leaf", "Spine").unwrap_err();
    assert!(matches!(err, CoreError::InvalidRole { .. }));

    assert_eq!(agg.snapshot("F1").unwrap(), before);
}

#[test]
fn test_unknown_fabric_is_not_found() {
    let agg = aggregator();
    let err = agg.snapshot("unknown-fabric").unwrap_err();
    assert!(matches!(err, CoreError::NotFound { ref fabric, .. } if fabric == "unknown-fabric"));
    assert!(matches!(
        agg.on_role_changed("unknown-fabric", "leaf", "spine"),
        Err(CoreError::NotFound { .. })
    ));
    // rejected calls must not initialize the fabric as a side effect
    assert!(agg.fabrics().is_empty());
}

#[test]
fn test_unassigned_role_gets_assigned() {
    let agg = aggregator();
    let unroled = switch("in_sync", "Healthy", "N9K-C9508", "9.3(8)", "");
    agg.on_switch_added("F1", &unroled).unwrap();
    assert_eq!(agg.snapshot("F1").unwrap().roled_switches(), 0);

    agg.on_role_changed("F1", "", "border gateway").unwrap();
    let snap = agg.snapshot("F1").unwrap();
    assert_eq!(snap.role["border gateway"], 1);
    assert_eq!(snap.roled_switches(), 1);
}

#[test]
fn test_model_upgrade_prunes_old_bucket() {
    let agg = aggregator();
    agg.on_switch_added("F1", &leaf()).unwrap();
    agg.on_attribute_changed(
        "F1",
        &AttributeChange::new(Category::SwVersion, "10.2(5)", "10.3(1)"),
    )
    .unwrap();

    let snap = agg.snapshot("F1").unwrap();
    assert!(!snap.sw_version.contains_key("10.2(5)"));
    assert_eq!(snap.sw_version_count("10.3(1)"), 1);
}

#[test]
fn test_inventory_records_feed_the_engine() {
    let agg = aggregator();
    let records: Vec<InventorySwitch> = serde_json::from_str(
        r#"[
            {"serialNumber": "FOX1", "fabricName": "F1", "ccStatus": "In-Sync",
             "operStatus": "Healthy", "model": "N9K-C93180YC-EX", "release": "10.2(5)",
             "switchRole": "leaf"},
            {"serialNumber": "FOX2", "fabricName": "F1", "ccStatus": "Out-Of-Sync",
             "operStatus": "Major", "model": "N9K-C9336C-FX2", "release": "10.2(5)",
             "switchRole": "spine"}
        ]"#,
    )
    .unwrap();
    for record in &records {
        agg.on_switch_added(&record.fabric_name, &record.into()).unwrap();
    }

    let snap = agg.snapshot("F1").unwrap();
    assert_eq!(snap.sync.get(SyncStatus::InSync), 1);
    assert_eq!(snap.sync.get(SyncStatus::OutOfSync), 1);
    assert_eq!(snap.health.get(HealthStatus::Major), 1);
    assert_eq!(snap.sw_version_count("10.2(5)"), 2);
}

// ── Invariants ──────────────────────────────────────────────────────

#[test]
fn test_translation_round_trips_for_every_role() {
    for role in SwitchRole::all() {
        let internal = KeyTranslator::external_to_internal(role.external()).unwrap();
        assert_eq!(KeyTranslator::internal_to_external(internal).unwrap(), role.external());
        let external = KeyTranslator::internal_to_external(role.internal()).unwrap();
        assert_eq!(KeyTranslator::external_to_internal(external).unwrap(), role.internal());
    }
}

#[test]
fn test_initialize_twice_matches_once() {
    let agg = aggregator();
    agg.initialize("F1");
    agg.initialize("F1");
    assert_eq!(agg.snapshot("F1").unwrap(), zeroed());
}

#[test]
fn test_add_remove_conserves_counts() {
    let agg = aggregator();
    agg.on_switch_added("F1", &switch("out_of_sync", "Minor", "N9K-C9508", "9.3(8)", "spine"))
        .unwrap();
    let baseline = agg.snapshot("F1").unwrap();

    let fleet = [
        leaf(),
        switch("out_of_sync", "Major", "N9K-C9336C-FX2", "10.3(1)", "border gateway"),
        switch("in_sync", "", "N9K-C9508", "", "super spine"),
        switch("", "Minor", "", "10.2(5)", ""),
    ];
    for sw in &fleet {
        agg.on_switch_added("F1", sw).unwrap();
    }
    for sw in fleet.iter().rev() {
        agg.on_switch_removed("F1", sw).unwrap();
    }

    assert_eq!(agg.snapshot("F1").unwrap(), baseline);
}

#[test]
fn test_redundant_removes_never_go_negative() {
    let agg = aggregator();
    agg.on_switch_added("F1", &leaf()).unwrap();
    for _ in 0..3 {
        agg.on_switch_removed("F1", &leaf()).unwrap();
    }
    agg.on_role_changed("F1", "spine", "leaf").unwrap();
    agg.on_switch_removed("F1", &switch("out_of_sync", "Major", "X", "Y", "tor"))
        .unwrap();

    let snap = agg.snapshot("F1").unwrap();
    assert_eq!(snap.sync.in_sync, 0);
    assert_eq!(snap.health.healthy, 0);
    assert!(snap.hw_model.is_empty());
    assert!(snap.sw_version.is_empty());
    assert_eq!(snap.role_count(SwitchRole::Spine), 0);
    assert_eq!(snap.role_count(SwitchRole::Leaf), 1);
}

#[test]
fn test_fabrics_do_not_share_counts() {
    let agg = aggregator();
    agg.on_switch_added("F1", &leaf()).unwrap();
    agg.initialize("F2");
    assert_eq!(agg.snapshot("F2").unwrap(), zeroed());
    agg.destroy("F1");
    assert_eq!(agg.snapshot("F2").unwrap(), zeroed());
}

#[test]
fn test_batch_with_one_bad_event_applies_nothing() {
    let agg = aggregator();
    agg.initialize("F1");
    let events = vec![
        OverviewEvent::SwitchAdded(leaf()),
        OverviewEvent::SwitchAdded(leaf()),
        OverviewEvent::SwitchAdded(leaf().with_health("Critical")),
    ];
    let err = agg.apply_batch("F1", &events).unwrap_err();
    assert!(matches!(err, CoreError::UnknownBucket { category: Category::Health, .. }));
    assert_eq!(agg.snapshot("F1").unwrap(), zeroed());
}

// ── Concurrency ─────────────────────────────────────────────────────

#[test]
fn test_concurrent_mutations_on_one_fabric_stay_consistent() {
    const THREADS: usize = 8;
    const ROUNDS: usize = 200;

    let agg = aggregator();
    agg.initialize("F1");

    thread::scope(|scope| {
        for t in 0..THREADS {
            let agg = agg.clone();
            scope.spawn(move || {
                let model = format!("N9K-T{t}");
                let sw = switch("in_sync", "Healthy", &model, "10.2(5)", "leaf");
                for _ in 0..ROUNDS {
                    agg.on_switch_added("F1", &sw).unwrap();
                    agg.on_role_changed("F1", "leaf", "spine").unwrap();
                    agg.on_role_changed("F1", "spine", "leaf").unwrap();
                    agg.on_switch_removed("F1", &sw).unwrap();
                }
                // leave one switch per thread behind
                agg.on_switch_added("F1", &sw).unwrap();
            });
        }
    });

    let threads = u64::try_from(THREADS).unwrap();
    let snap = agg.snapshot("F1").unwrap();
    assert_eq!(snap.sync.in_sync, threads);
    assert_eq!(snap.health.healthy, threads);
    assert_eq!(snap.sw_version_count("10.2(5)"), threads);
    assert_eq!(snap.hw_model.len(), THREADS);
    assert!(snap.hw_model.values().all(|c| *c == 1));
    assert_eq!(snap.role_count(SwitchRole::Leaf), threads);
    assert_eq!(snap.role_count(SwitchRole::Spine), 0);
}

#[test]
fn test_readers_never_see_half_applied_switch() {
    let agg = aggregator();
    agg.initialize("F1");
    let sw = leaf();

    thread::scope(|scope| {
        let writer = agg.clone();
        let sw = &sw;
        scope.spawn(move || {
            for _ in 0..500 {
                writer.on_switch_added("F1", sw).unwrap();
                writer.on_switch_removed("F1", sw).unwrap();
            }
        });
        for _ in 0..500 {
            let snap = agg.snapshot("F1").unwrap();
            let n = snap.sync.in_sync;
            assert_eq!(snap.health.healthy, n);
            assert_eq!(snap.hw_model_count("N9K-C93180YC-EX"), n);
            assert_eq!(snap.sw_version_count("10.2(5)"), n);
            assert_eq!(snap.role_count(SwitchRole::Leaf), n);
        }
    });
}

// ── Persistence ─────────────────────────────────────────────────────

#[test]
fn test_state_file_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("overview.json");
    let config = EngineConfig::in_memory()
        .with_state_file(&path)
        .with_preload(["F2"]);

    let first = OverviewAggregator::from_config(&config).unwrap();
    first.on_switch_added("F1", &leaf()).unwrap();
    assert!(first.persist().unwrap());
    let expected = first.snapshot("F1").unwrap();

    let second = OverviewAggregator::from_config(&config).unwrap();
    assert_eq!(second.snapshot("F1").unwrap(), expected);
    assert_eq!(second.snapshot("F2").unwrap(), zeroed());
}
