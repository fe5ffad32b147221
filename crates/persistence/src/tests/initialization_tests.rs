// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend initialization tests.

use super::{create_test_mission, create_test_worker, date};
use crate::{Persistence, PersistenceError};
use staffing::StaffingRepository;
use staffing_domain::{AvailabilityRecord, BandSet, MissionId, Rank, WorkerId};

#[test]
fn test_persistence_initialization() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    persistence.verify_foreign_key_enforcement().unwrap();
}

#[test]
fn test_migrations_applied_on_initialization() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    // Every table the engine reads must exist.
    assert!(persistence.staffing_candidates().unwrap().is_empty());
    assert!(persistence.run_log("anything").unwrap().is_empty());
    assert!(
        persistence
            .status_summaries(MissionId::new(1))
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1 = Persistence::new_in_memory().unwrap();
    let mut db2 = Persistence::new_in_memory().unwrap();

    db1.insert_mission(&create_test_mission(1, &[date(10)], 1))
        .unwrap();

    assert_eq!(db1.staffing_candidates().unwrap().len(), 1);
    assert!(db2.staffing_candidates().unwrap().is_empty());
}

#[test]
fn test_reconnect_shares_the_database() {
    let mut first = Persistence::new_in_memory().unwrap();
    let mut second = first.reconnect().unwrap();

    second
        .insert_mission(&create_test_mission(4, &[date(10)], 1))
        .unwrap();

    let mission = first.mission(MissionId::new(4)).unwrap();
    assert!(mission.is_some(), "first connection should see the insert");
}

#[test]
fn test_foreign_keys_reject_orphan_availability() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let result = persistence.insert_availability(&AvailabilityRecord {
        worker_id: WorkerId::new(99),
        date: date(10),
        bands: BandSet::whole_day(),
        opted_out: false,
    });

    assert!(matches!(
        result,
        Err(PersistenceError::DatabaseError(_) | PersistenceError::QueryFailed(_))
    ));
}

#[test]
fn test_file_backed_database_persists_across_connections() {
    let path = std::env::temp_dir().join(format!(
        "staffing_persistence_test_{}.db",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    {
        let mut persistence = Persistence::new_with_file(&path).unwrap();
        persistence
            .insert_worker(&create_test_worker(1, Rank::S1, "KANTO"))
            .unwrap();
        persistence
            .insert_mission(&create_test_mission(2, &[date(10)], 1))
            .unwrap();
    }

    let mut reopened = Persistence::new_with_file(&path).unwrap();
    assert!(reopened.mission(MissionId::new(2)).unwrap().is_some());

    drop(reopened);
    for suffix in ["", "-wal", "-shm"] {
        let mut file = path.clone().into_os_string();
        file.push(suffix);
        let _ = std::fs::remove_file(file);
    }
}
