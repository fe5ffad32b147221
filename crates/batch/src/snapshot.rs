// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Master data snapshots.
//!
//! A snapshot is one JSON document carrying the missions, workers,
//! availability, region priorities and assignment history the engine reads.
//! Every section is optional. Records are upserted, except history which is
//! appended.

use serde::Deserialize;
use staffing_domain::{AvailabilityRecord, HistoryEntry, Mission, RegionCode, Worker};
use staffing_persistence::{Persistence, PersistenceError};
use tracing::info;

/// Ranking of a worker's home region for missions held in a venue region.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegionPriority {
    pub venue: RegionCode,
    pub home: RegionCode,
    pub rank: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub missions: Vec<Mission>,
    pub workers: Vec<Worker>,
    pub availability: Vec<AvailabilityRecord>,
    pub region_priorities: Vec<RegionPriority>,
    pub history: Vec<HistoryEntry>,
}

/// Record counts written by one import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportCounts {
    pub missions: usize,
    pub workers: usize,
    pub availability: usize,
    pub region_priorities: usize,
    pub history: usize,
}

impl Snapshot {
    /// # Errors
    ///
    /// Returns an error if the document is not a valid snapshot.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Writes the snapshot into the store.
    ///
    /// Workers go in before their availability and history so foreign keys
    /// hold.
    ///
    /// # Errors
    ///
    /// Returns an error on the first record the store refuses.
    pub fn apply(&self, persistence: &mut Persistence) -> Result<ImportCounts, PersistenceError> {
        for mission in &self.missions {
            persistence.insert_mission(mission)?;
        }
        for worker in &self.workers {
            persistence.insert_worker(worker)?;
        }
        for record in &self.availability {
            persistence.insert_availability(record)?;
        }
        for priority in &self.region_priorities {
            persistence.insert_region_priority(&priority.venue, &priority.home, priority.rank)?;
        }
        for entry in &self.history {
            persistence.insert_history(entry)?;
        }

        let counts = ImportCounts {
            missions: self.missions.len(),
            workers: self.workers.len(),
            availability: self.availability.len(),
            region_priorities: self.region_priorities.len(),
            history: self.history.len(),
        };
        info!(
            missions = counts.missions,
            workers = counts.workers,
            availability = counts.availability,
            region_priorities = counts.region_priorities,
            history = counts.history,
            "Snapshot imported"
        );
        Ok(counts)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use staffing::StaffingRepository;
    use staffing_domain::{MissionId, Role, TimeBand, WorkerId};

    const SNAPSHOT: &str = r#"{
        "missions": [{
            "mission_id": 1,
            "status": "Ready",
            "execution": "InCompetition",
            "venue_region": "KANTO",
            "sport": "SWIM",
            "discipline": "AQUATICS",
            "discipline_type_code": 1,
            "language_priority": 1,
            "accepts_trainees": false,
            "specimens": { "urine": 4, "blood": 0, "dried_blood_spot": 0 },
            "days": [{
                "date": "2026-08-10",
                "requirements": [{ "role": "Inspector", "band": "WholeDay", "required": 2 }]
            }]
        }],
        "workers": [{
            "worker_id": 7,
            "rank": "A1",
            "gender": "Female",
            "eligibility": {
                "lead_inspector": false,
                "area_coordinator": false,
                "inspector": true,
                "blood_collector": false,
                "trainee": false
            },
            "home_region": "KANTO",
            "certification_number": 1007
        }],
        "availability": [{
            "worker_id": 7,
            "date": "2026-08-10",
            "bands": {
                "whole_day": true,
                "early": false,
                "morning": false,
                "afternoon": false,
                "evening": false
            }
        }],
        "region_priorities": [{ "venue": "KANTO", "home": "KANTO", "rank": 1 }],
        "history": [{
            "worker_id": 7,
            "mission_id": 90,
            "date": "2026-05-01",
            "sport": "SWIM",
            "discipline": "AQUATICS"
        }]
    }"#;

    #[test]
    fn test_snapshot_import_populates_the_store() {
        let snapshot = Snapshot::from_json(SNAPSHOT).unwrap();
        let mut persistence = Persistence::new_in_memory().unwrap();

        let counts = snapshot.apply(&mut persistence).unwrap();
        assert_eq!(
            counts,
            ImportCounts {
                missions: 1,
                workers: 1,
                availability: 1,
                region_priorities: 1,
                history: 1,
            }
        );

        let mission = persistence.mission(MissionId::new(1)).unwrap().unwrap();
        assert_eq!(mission.days[0].requirements[0].band, TimeBand::WholeDay);

        let workers = persistence
            .eligible_workers(MissionId::new(1), Role::Inspector)
            .unwrap();
        assert_eq!(workers.len(), 1);
        assert!(workers[0].conflicts.is_empty());

        let availability = persistence
            .availability(WorkerId::new(7), mission.days[0].date)
            .unwrap()
            .unwrap();
        assert!(!availability.opted_out);

        assert_eq!(
            persistence
                .region_priority(&snapshot.region_priorities[0].venue, &workers[0].home_region)
                .unwrap(),
            Some(1)
        );
    }

    #[test]
    fn test_sections_are_optional() {
        let snapshot = Snapshot::from_json(r#"{ "workers": [] }"#).unwrap();
        assert_eq!(snapshot, Snapshot::default());
    }

    #[test]
    fn test_bad_dates_are_rejected() {
        let json = SNAPSHOT.replace("2026-05-01", "2026-13-01");
        assert!(Snapshot::from_json(&json).is_err());
    }
}
