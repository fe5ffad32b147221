// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod initialization_tests;
mod staffing_tests;

use crate::Persistence;
use staffing_domain::{
    AvailabilityRecord, BandSet, ConditionKind, ConditionSet, DisciplineCode, ExecutionType,
    Gender, HistoryEntry, Mission, MissionDay, MissionId, MissionStatus, Rank, RegionCode, Role,
    RoleEligibility, SelectionRecord, SlotKey, SlotRequirement, SpecimenCounts, SportCode,
    TimeBand, Worker, WorkerId,
};
use std::collections::BTreeSet;
use time::{Date, Month};

pub const PROCESS: &str = "test-selection";

pub fn date(day: u8) -> Date {
    Date::from_calendar_date(2026, Month::August, day).unwrap()
}

pub fn region(code: &str) -> RegionCode {
    RegionCode::new(code).unwrap()
}

/// A ready in-competition mission in KANTO needing `required` inspectors each day.
pub fn create_test_mission(id: i64, dates: &[Date], required: u32) -> Mission {
    Mission {
        mission_id: MissionId::new(id),
        status: MissionStatus::Ready,
        execution: ExecutionType::InCompetition,
        venue_region: region("KANTO"),
        sport: SportCode::new("SWIM").unwrap(),
        discipline: DisciplineCode::new("AQUATICS").unwrap(),
        discipline_type_code: 1,
        language_priority: 1,
        accepts_trainees: false,
        specimens: SpecimenCounts {
            urine: 4,
            blood: 0,
            dried_blood_spot: 0,
        },
        days: dates
            .iter()
            .map(|d| MissionDay {
                date: *d,
                requirements: vec![SlotRequirement {
                    role: Role::Inspector,
                    band: TimeBand::WholeDay,
                    required,
                }],
            })
            .collect(),
    }
}

pub fn create_test_worker(id: i64, rank: Rank, home: &str) -> Worker {
    Worker {
        worker_id: WorkerId::new(id),
        rank,
        gender: Gender::Female,
        eligibility: RoleEligibility::for_roles(&[Role::Inspector]),
        home_region: region(home),
        certification_number: 1000 + id.unsigned_abs(),
        conflicts: BTreeSet::new(),
    }
}

/// Adds a worker who is available all day on every given date.
pub fn seed_worker(persistence: &mut Persistence, worker: &Worker, dates: &[Date]) {
    persistence.insert_worker(worker).unwrap();
    for d in dates {
        persistence
            .insert_availability(&AvailabilityRecord {
                worker_id: worker.worker_id,
                date: *d,
                bands: BandSet::whole_day(),
                opted_out: false,
            })
            .unwrap();
    }
}

pub fn history(worker: i64, mission: i64, on: Date) -> HistoryEntry {
    HistoryEntry {
        worker_id: WorkerId::new(worker),
        mission_id: MissionId::new(mission),
        date: on,
        sport: SportCode::new("SWIM").unwrap(),
        discipline: DisciplineCode::new("AQUATICS").unwrap(),
    }
}

pub fn inspector_key(mission: i64, on: Date) -> SlotKey {
    SlotKey::new(
        MissionId::new(mission),
        on,
        TimeBand::WholeDay,
        Role::Inspector,
    )
}

pub fn create_test_selection(key: SlotKey, worker: i64, position: u32) -> SelectionRecord {
    let mut conditions = ConditionSet::new();
    conditions
        .record(ConditionKind::ContinuousDuty, true)
        .unwrap();
    conditions
        .record(ConditionKind::RegionPriority, true)
        .unwrap();
    SelectionRecord {
        key,
        worker_id: WorkerId::new(worker),
        strong_candidate: true,
        condition_score: conditions.score(),
        conditions,
        rank_position: position,
        quota_bucket: Some(String::from("inspector")),
    }
}

/// An in-memory database holding mission 1 on August 10 and workers 1-3.
pub fn create_seeded_persistence() -> Persistence {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let days = [date(10)];
    persistence
        .insert_mission(&create_test_mission(1, &days, 2))
        .unwrap();
    for id in 1..=3 {
        seed_worker(
            &mut persistence,
            &create_test_worker(id, Rank::A1, "KANTO"),
            &days,
        );
    }
    persistence
}
