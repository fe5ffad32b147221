// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_test_config, create_test_mission, create_test_worker, date, run, seed_worker};
use crate::{InMemoryRepository, StaffingRepository};
use staffing_domain::{MissionId, MissionStatus, Rank, Role, SlotKey, TimeBand, WorkerId};

fn key() -> SlotKey {
    SlotKey::new(MissionId::new(1), date(5), TimeBand::WholeDay, Role::Inspector)
}

fn create_store() -> InMemoryRepository {
    let store = InMemoryRepository::new();
    store.insert_mission(create_test_mission(1, &[date(5)], 2));
    for id in 1..=4 {
        seed_worker(&store, create_test_worker(id, Rank::A2, "KANTO"), &[date(5)]);
    }
    store
}

#[test]
fn test_rerun_without_changes_writes_nothing() {
    let mut store = create_store();
    let config = create_test_config();

    run(&store, &config);
    let staged_before = store.staged_selections(&key()).unwrap();
    let assigned_before = store
        .provisional_assignments(MissionId::new(1), None, None, None)
        .unwrap();

    let report = run(&store, &config);
    let slot = &report.missions[0].slots()[0];

    assert_eq!(slot.staged_deleted, 0);
    assert_eq!(slot.staged_inserted, 0);
    assert_eq!(slot.promoted, 0);
    assert_eq!(slot.already_assigned, 2);
    assert_eq!(store.staged_selections(&key()).unwrap(), staged_before);
    assert_eq!(
        store
            .provisional_assignments(MissionId::new(1), None, None, None)
            .unwrap(),
        assigned_before
    );
}

#[test]
fn test_revoked_availability_drops_unbacked_row_only() {
    let mut store = create_store();
    let config = create_test_config();
    run(&store, &config);

    // Worker 1 holds the slot; worker 4 is only staged.
    store.remove_availability(WorkerId::new(1), date(5));
    store.remove_availability(WorkerId::new(4), date(5));
    run(&store, &config);

    let staged: Vec<i64> = store
        .staged_selections(&key())
        .unwrap()
        .iter()
        .map(|r| r.worker_id.value())
        .collect();
    assert_eq!(staged, vec![1, 2, 3]);
}

#[test]
fn test_staged_rows_keep_condition_snapshot() {
    let mut store = create_store();
    run(&store, &create_test_config());

    let rows = store.staged_selections(&key()).unwrap();
    let assignments = store
        .provisional_assignments(MissionId::new(1), Some(date(5)), None, None)
        .unwrap();

    assert_eq!(rows.len(), 4);
    assert_eq!(assignments.len(), 2);
    for assignment in assignments {
        let row = rows
            .iter()
            .find(|r| r.worker_id == assignment.worker_id)
            .unwrap();
        assert!(row.is_quota_filled());
        assert_eq!(row.conditions, assignment.conditions);
        assert_eq!(row.condition_score, assignment.condition_score);
        assert!(row.conditions.len() <= 5);
    }
}

#[test]
fn test_confirmed_mission_is_not_restaged() {
    let mut store = create_store();
    let config = create_test_config();
    run(&store, &config);
    let staged_before = store.staged_selections(&key()).unwrap();

    let mut mission = store.mission(MissionId::new(1)).unwrap().unwrap();
    mission.transition_to(MissionStatus::Confirmed).unwrap();
    store.insert_mission(mission);
    store.remove_availability(WorkerId::new(4), date(5));

    let report = run(&store, &config);

    assert!(report.missions.is_empty());
    assert_eq!(store.staged_selections(&key()).unwrap(), staged_before);
}
