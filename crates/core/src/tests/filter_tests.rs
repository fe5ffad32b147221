// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    create_test_config, create_test_mission, create_test_worker, date, history, run, seed_worker,
};
use crate::{InMemoryRepository, StaffingRepository};
use time::Date;
use staffing_domain::{
    AvailabilityRecord, BandSet, ConditionKind, ConditionSet, ExecutionType, MissionId,
    MissionStatus, ProvisionalAssignment, Rank, Role, RoleEligibility, SlotKey, SlotRequirement,
    SportCode, TimeBand, WorkerId,
};

fn promoted_workers(store: &InMemoryRepository, mission: i64) -> Vec<i64> {
    store
        .clone()
        .provisional_assignments(MissionId::new(mission), None, None, None)
        .unwrap()
        .iter()
        .map(|a| a.worker_id.value())
        .collect()
}

/// Books `worker` on a confirmed mission that the pass will not touch.
fn book_elsewhere(store: &InMemoryRepository, worker: i64, on: u8, execution: ExecutionType) {
    let mut other = create_test_mission(2, &[date(on)], 1);
    other.execution = execution;
    other.status = MissionStatus::Confirmed;
    store.insert_mission(other);
    store
        .clone()
        .promote(&ProvisionalAssignment {
            key: SlotKey::new(MissionId::new(2), date(on), TimeBand::WholeDay, Role::Inspector),
            worker_id: WorkerId::new(worker),
            strong_candidate: true,
            condition_score: 5,
            conditions: ConditionSet::new(),
        })
        .unwrap();
}

#[test]
fn test_continuous_duty_rejects_long_run() {
    let store = InMemoryRepository::new();
    store.insert_mission(create_test_mission(1, &[date(6)], 1));
    seed_worker(&store, create_test_worker(1, Rank::A1, "KANTO"), &[date(6)]);
    seed_worker(&store, create_test_worker(2, Rank::A1, "KANTO"), &[date(6)]);
    for day in 1..=5 {
        store.insert_history(history(1, 50 + i64::from(day), date(day)));
    }

    let report = run(&store, &create_test_config());
    let slot = &report.missions[0].slots()[0];

    assert_eq!(slot.rejected.continuous_duty, 1);
    assert_eq!(slot.staged, 1);
    assert_eq!(promoted_workers(&store, 1), vec![2]);
}

#[test]
fn test_run_at_limit_is_accepted() {
    let store = InMemoryRepository::new();
    store.insert_mission(create_test_mission(1, &[date(6)], 1));
    seed_worker(&store, create_test_worker(1, Rank::A1, "KANTO"), &[date(6)]);
    for day in 2..=5 {
        store.insert_history(history(1, 50 + i64::from(day), date(day)));
    }

    let report = run(&store, &create_test_config());

    assert_eq!(report.missions[0].slots()[0].rejected.total(), 0);
    assert_eq!(promoted_workers(&store, 1), vec![1]);
}

#[test]
fn test_adjacent_booking_rejects_candidate() {
    let store = InMemoryRepository::new();
    store.insert_mission(create_test_mission(1, &[date(6)], 1));
    seed_worker(&store, create_test_worker(1, Rank::A1, "KANTO"), &[date(6)]);
    seed_worker(&store, create_test_worker(2, Rank::A1, "KANTO"), &[date(6)]);
    book_elsewhere(&store, 1, 5, ExecutionType::InCompetition);

    let report = run(&store, &create_test_config());
    let slot = &report.missions[0].slots()[0];

    assert_eq!(slot.rejected.adjacent_mission, 1);
    assert_eq!(promoted_workers(&store, 1), vec![2]);
}

#[test]
fn test_document_review_booking_does_not_block() {
    let store = InMemoryRepository::new();
    store.insert_mission(create_test_mission(1, &[date(6)], 1));
    seed_worker(&store, create_test_worker(1, Rank::A1, "KANTO"), &[date(6)]);
    book_elsewhere(&store, 1, 5, ExecutionType::DocumentReview);

    run(&store, &create_test_config());

    assert_eq!(promoted_workers(&store, 1), vec![1]);
}

#[test]
fn test_conflict_of_interest_excludes_worker() {
    let store = InMemoryRepository::new();
    store.insert_mission(create_test_mission(1, &[date(6)], 2));
    let mut conflicted = create_test_worker(1, Rank::A1, "KANTO");
    conflicted.conflicts.insert(SportCode::new("SWIM").unwrap());
    seed_worker(&store, conflicted, &[date(6)]);
    seed_worker(&store, create_test_worker(2, Rank::A1, "KANTO"), &[date(6)]);

    let report = run(&store, &create_test_config());
    let slot = &report.missions[0].slots()[0];

    assert_eq!(slot.excluded.conflict_of_interest, 1);
    assert_eq!(slot.pool_size, 1);
    assert_eq!(slot.shortfall, 1);
}

#[test]
fn test_opt_out_is_honoured_per_role() {
    let store = InMemoryRepository::new();
    let mut mission = create_test_mission(1, &[date(6)], 1);
    mission.days[0].requirements.push(SlotRequirement {
        role: Role::AreaCoordinator,
        band: TimeBand::WholeDay,
        required: 1,
    });
    store.insert_mission(mission);

    let mut worker = create_test_worker(1, Rank::S1, "KANTO");
    worker.eligibility = RoleEligibility::for_roles(&[Role::AreaCoordinator, Role::Inspector]);
    store.insert_worker(worker);
    store.insert_availability(AvailabilityRecord {
        worker_id: WorkerId::new(1),
        date: date(6),
        bands: BandSet::whole_day(),
        opted_out: true,
    });

    let report = run(&store, &create_test_config());
    let slots = report.missions[0].slots();

    // Coordinators ignore opt-out remarks; inspectors do not.
    assert_eq!(slots[0].key.role, Role::AreaCoordinator);
    assert_eq!(slots[0].promoted, 1);
    assert_eq!(slots[1].key.role, Role::Inspector);
    assert_eq!(slots[1].excluded.unavailable, 1);
}

#[test]
fn test_same_mission_double_booking_is_excluded() {
    let store = InMemoryRepository::new();
    let mut mission = create_test_mission(1, &[date(6)], 1);
    mission.days[0].requirements.push(SlotRequirement {
        role: Role::LeadInspector,
        band: TimeBand::WholeDay,
        required: 1,
    });
    store.insert_mission(mission);

    let mut lead = create_test_worker(1, Rank::S1, "KANTO");
    lead.eligibility = RoleEligibility::for_roles(&[Role::LeadInspector, Role::Inspector]);
    seed_worker(&store, lead, &[date(6)]);
    seed_worker(&store, create_test_worker(2, Rank::A1, "KANTO"), &[date(6)]);

    let report = run(&store, &create_test_config());
    let slots = report.missions[0].slots();

    assert_eq!(slots[0].key.role, Role::LeadInspector);
    assert_eq!(slots[1].excluded.double_booked, 1);
    let lead_slot = store
        .clone()
        .provisional_assignments(MissionId::new(1), None, None, Some(Role::LeadInspector))
        .unwrap();
    assert_eq!(lead_slot[0].worker_id, WorkerId::new(1));
    let inspectors = store
        .clone()
        .provisional_assignments(MissionId::new(1), None, None, Some(Role::Inspector))
        .unwrap();
    assert_eq!(inspectors[0].worker_id, WorkerId::new(2));
}

#[test]
fn test_participation_ratio_rejects_on_multi_day_mission() {
    let store = InMemoryRepository::new();
    store.insert_mission(create_test_mission(1, &[date(10), date(11), date(12)], 1));
    seed_worker(
        &store,
        create_test_worker(1, Rank::A1, "KANTO"),
        &[date(10), date(11)],
    );
    seed_worker(
        &store,
        create_test_worker(2, Rank::A1, "KANTO"),
        &[date(10), date(11), date(12)],
    );

    let mut config = create_test_config();
    config
        .roles
        .get_mut(&Role::Inspector)
        .unwrap()
        .participation_percent = Some(100);

    let report = run(&store, &config);
    let first_day = &report.missions[0].slots()[0];

    assert_eq!(first_day.rejected.participation_ratio, 1);
    let key = SlotKey::new(MissionId::new(1), date(10), TimeBand::WholeDay, Role::Inspector);
    let staged = store.clone().staged_selections(&key).unwrap();
    assert_eq!(staged.len(), 1);
    assert_eq!(staged[0].worker_id, WorkerId::new(2));
    assert_eq!(
        staged[0].conditions.get(ConditionKind::ParticipationRatio),
        Some(true)
    );
}

#[test]
fn test_opted_out_day_fails_lead_participation() {
    let store = InMemoryRepository::new();
    let mut mission = create_test_mission(1, &[date(10), date(11)], 1);
    for day in &mut mission.days {
        day.requirements[0].role = Role::LeadInspector;
    }
    store.insert_mission(mission);

    let mut partial = create_test_worker(1, Rank::S1, "KANTO");
    partial.eligibility = RoleEligibility::for_roles(&[Role::LeadInspector]);
    seed_worker(&store, partial, &[date(10)]);
    store.insert_availability(AvailabilityRecord {
        worker_id: WorkerId::new(1),
        date: date(11),
        bands: BandSet::whole_day(),
        opted_out: true,
    });
    let mut full = create_test_worker(2, Rank::S2, "KANTO");
    full.eligibility = RoleEligibility::for_roles(&[Role::LeadInspector]);
    seed_worker(&store, full, &[date(10), date(11)]);

    let report = run(&store, &create_test_config());
    let slots = report.missions[0].slots();
    let first_day = slots.iter().find(|s| s.key.date == date(10)).unwrap();
    let second_day = slots.iter().find(|s| s.key.date == date(11)).unwrap();

    // Leads honour opt-out, so day 11 neither pools nor counts for worker 1.
    assert_eq!(first_day.rejected.participation_ratio, 1);
    assert_eq!(second_day.excluded.unavailable, 1);

    let leads: Vec<(i64, Date)> = store
        .clone()
        .provisional_assignments(MissionId::new(1), None, None, Some(Role::LeadInspector))
        .unwrap()
        .iter()
        .map(|a| (a.worker_id.value(), a.key.date))
        .collect();
    assert_eq!(leads, vec![(2, date(10)), (2, date(11))]);
}

#[test]
fn test_participation_is_recorded_only_on_single_day_mission() {
    let store = InMemoryRepository::new();
    let mut mission = create_test_mission(1, &[date(10)], 1);
    mission.days[0].requirements[0].band = TimeBand::Morning;
    store.insert_mission(mission);

    store.insert_worker(create_test_worker(1, Rank::A1, "KANTO"));
    store.insert_availability(AvailabilityRecord {
        worker_id: WorkerId::new(1),
        date: date(10),
        bands: BandSet::from_bands(&[TimeBand::Morning]),
        opted_out: false,
    });

    let report = run(&store, &create_test_config());
    let slot = &report.missions[0].slots()[0];

    assert_eq!(slot.rejected.total(), 0);
    assert_eq!(slot.promoted, 1);

    let key = SlotKey::new(MissionId::new(1), date(10), TimeBand::Morning, Role::Inspector);
    let staged = store.clone().staged_selections(&key).unwrap();
    assert_eq!(staged.len(), 1);
    assert_eq!(
        staged[0].conditions.get(ConditionKind::ParticipationRatio),
        Some(false)
    );
    assert!(!staged[0].strong_candidate);
    assert_eq!(promoted_workers(&store, 1), vec![1]);
}
