// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{EngineConfig, InMemoryRepository, PassReport, run_pass};
use staffing_domain::{
    AvailabilityRecord, BandSet, DisciplineCode, ExecutionType, Gender, HistoryEntry, Mission,
    MissionDay, MissionId, MissionStatus, Rank, RegionCode, Role, RoleEligibility,
    SlotRequirement, SpecimenCounts, SportCode, TimeBand, Worker, WorkerId,
};
use time::{Date, Month};

pub const PROCESS: &str = "test-selection";

pub fn date(day: u8) -> Date {
    Date::from_calendar_date(2026, Month::August, day).unwrap()
}

pub fn region(code: &str) -> RegionCode {
    RegionCode::new(code).unwrap()
}

/// Default configuration with open inspector buckets.
pub fn create_test_config() -> EngineConfig {
    let mut config = EngineConfig::default();
    config
        .roles
        .get_mut(&Role::Inspector)
        .unwrap()
        .composition
        .clear();
    config
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
        conflicts: std::collections::BTreeSet::new(),
    }
}

/// Adds a worker who is available all day on every given date.
pub fn seed_worker(store: &InMemoryRepository, worker: Worker, dates: &[Date]) {
    for d in dates {
        store.insert_availability(AvailabilityRecord {
            worker_id: worker.worker_id,
            date: *d,
            bands: BandSet::whole_day(),
            opted_out: false,
        });
    }
    store.insert_worker(worker);
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

/// Runs a pass using the store as its own lease.
pub fn run(store: &InMemoryRepository, config: &EngineConfig) -> PassReport {
    let mut data = store.clone();
    let mut lease = store.clone();
    run_pass(&mut data, &mut lease, config, PROCESS).unwrap()
}
