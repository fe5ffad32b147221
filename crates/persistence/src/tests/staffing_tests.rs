// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Staged rows, provisional assignments and status summaries.

use super::{
    create_seeded_persistence, create_test_mission, create_test_selection, date, inspector_key,
};
use staffing::StaffingRepository;
use staffing_domain::{
    ExecutionType, MissionId, MissionStatus, Role, RoleCount, StagingPlan, StatusSummary,
    TimeBand, WorkerId,
};

#[test]
fn test_selections_round_trip_with_conditions() {
    let mut persistence = create_seeded_persistence();
    let key = inspector_key(1, date(10));

    let mut second = create_test_selection(key, 2, 2);
    second.quota_bucket = None;
    second.strong_candidate = false;
    let rows = vec![create_test_selection(key, 1, 1), second];
    persistence.insert_selections(&rows).unwrap();

    assert_eq!(persistence.staged_selections(&key).unwrap(), rows);
    assert!(
        persistence
            .staged_selections(&inspector_key(1, date(11)))
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_delete_selections_only_touches_named_workers() {
    let mut persistence = create_seeded_persistence();
    let key = inspector_key(1, date(10));
    persistence
        .insert_selections(&[
            create_test_selection(key, 1, 1),
            create_test_selection(key, 2, 2),
            create_test_selection(key, 3, 3),
        ])
        .unwrap();

    persistence
        .delete_selections(&key, &[WorkerId::new(1), WorkerId::new(3)])
        .unwrap();
    persistence.delete_selections(&key, &[]).unwrap();

    let remaining: Vec<i64> = persistence
        .staged_selections(&key)
        .unwrap()
        .iter()
        .map(|r| r.worker_id.value())
        .collect();
    assert_eq!(remaining, vec![2]);
}

#[test]
fn test_apply_staging_replaces_rows() {
    let mut persistence = create_seeded_persistence();
    let key = inspector_key(1, date(10));
    persistence
        .insert_selections(&[
            create_test_selection(key, 1, 1),
            create_test_selection(key, 2, 2),
        ])
        .unwrap();

    let plan = StagingPlan {
        delete: vec![WorkerId::new(2)],
        insert: vec![create_test_selection(key, 3, 2)],
        preserved: vec![WorkerId::new(1)],
    };
    persistence.apply_staging(&key, &plan).unwrap();

    let staged: Vec<(i64, u32)> = persistence
        .staged_selections(&key)
        .unwrap()
        .iter()
        .map(|r| (r.worker_id.value(), r.rank_position))
        .collect();
    assert_eq!(staged, vec![(1, 1), (3, 2)]);
}

#[test]
fn test_failed_staging_leaves_previous_rows() {
    let mut persistence = create_seeded_persistence();
    let key = inspector_key(1, date(10));
    persistence
        .insert_selections(&[create_test_selection(key, 1, 1)])
        .unwrap();

    // Worker 99 does not exist, so the insert half violates a foreign key.
    let plan = StagingPlan {
        delete: vec![WorkerId::new(1)],
        insert: vec![create_test_selection(key, 99, 1)],
        preserved: Vec::new(),
    };
    assert!(persistence.apply_staging(&key, &plan).is_err());

    let staged = persistence.staged_selections(&key).unwrap();
    assert_eq!(staged.len(), 1);
    assert_eq!(staged[0].worker_id, WorkerId::new(1));
}

#[test]
fn test_duplicate_promotion_returns_false() {
    let mut persistence = create_seeded_persistence();
    let key = inspector_key(1, date(10));
    let assignment = create_test_selection(key, 1, 1).to_provisional();

    assert!(persistence.promote(&assignment).unwrap());
    assert!(!persistence.promote(&assignment).unwrap());

    let stored = persistence
        .provisional_assignments(MissionId::new(1), None, None, None)
        .unwrap();
    assert_eq!(stored, vec![assignment]);
}

#[test]
fn test_provisional_filters() {
    let mut persistence = create_seeded_persistence();
    let mut mission = create_test_mission(1, &[date(10), date(11)], 2);
    mission.days[0]
        .requirements
        .push(staffing_domain::SlotRequirement {
            role: Role::LeadInspector,
            band: TimeBand::Morning,
            required: 1,
        });
    persistence.insert_mission(&mission).unwrap();

    let inspector_day_one = inspector_key(1, date(10));
    let inspector_day_two = inspector_key(1, date(11));
    let lead = staffing_domain::SlotKey::new(
        MissionId::new(1),
        date(10),
        TimeBand::Morning,
        Role::LeadInspector,
    );
    for (key, worker) in [
        (inspector_day_two, 2),
        (inspector_day_one, 2),
        (lead, 1),
        (inspector_day_one, 3),
    ] {
        let row = create_test_selection(key, worker, 1).to_provisional();
        assert!(persistence.promote(&row).unwrap());
    }

    let all = persistence
        .provisional_assignments(MissionId::new(1), None, None, None)
        .unwrap();
    assert_eq!(all.len(), 4);

    let day_one: Vec<i64> = persistence
        .provisional_assignments(MissionId::new(1), Some(date(10)), None, Some(Role::Inspector))
        .unwrap()
        .iter()
        .map(|a| a.worker_id.value())
        .collect();
    assert_eq!(day_one, vec![2, 3]);

    let morning = persistence
        .provisional_assignments(MissionId::new(1), None, Some(TimeBand::Morning), None)
        .unwrap();
    assert_eq!(morning.len(), 1);
    assert_eq!(morning[0].key, lead);

    assert!(
        persistence
            .provisional_assignments(MissionId::new(2), None, None, None)
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_worker_bookings_carry_execution_type() {
    let mut persistence = create_seeded_persistence();
    let mut other = create_test_mission(2, &[date(11)], 1);
    other.execution = ExecutionType::DocumentReview;
    other.status = MissionStatus::Confirmed;
    persistence.insert_mission(&other).unwrap();

    for key in [inspector_key(1, date(10)), inspector_key(2, date(11))] {
        persistence
            .promote(&create_test_selection(key, 1, 1).to_provisional())
            .unwrap();
    }

    let booked = persistence
        .worker_provisional_assignments(WorkerId::new(1), date(9), date(11))
        .unwrap();
    assert_eq!(booked.len(), 2);
    assert_eq!(booked[0].mission_id, MissionId::new(1));
    assert_eq!(booked[0].execution, ExecutionType::InCompetition);
    assert_eq!(booked[1].execution, ExecutionType::DocumentReview);
    assert_eq!(booked[1].band, TimeBand::WholeDay);

    let narrowed = persistence
        .worker_provisional_assignments(WorkerId::new(1), date(11), date(12))
        .unwrap();
    assert_eq!(narrowed.len(), 1);
}

#[test]
fn test_status_summary_is_overwritten() {
    let mut persistence = create_seeded_persistence();
    let first = StatusSummary {
        mission_id: MissionId::new(1),
        date: date(10),
        roles: vec![
            RoleCount {
                role: Role::LeadInspector,
                required: 1,
                assigned: 0,
            },
            RoleCount {
                role: Role::Inspector,
                required: 2,
                assigned: 1,
            },
        ],
    };
    persistence.write_status_summary(&first).unwrap();

    let second = StatusSummary {
        roles: vec![RoleCount {
            role: Role::Inspector,
            required: 2,
            assigned: 2,
        }],
        ..first.clone()
    };
    persistence.write_status_summary(&second).unwrap();

    let stored = persistence.status_summaries(MissionId::new(1)).unwrap();
    assert_eq!(stored, vec![second]);
    assert!(stored[0].is_fully_staffed());
}
