// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Candidate pool construction for a single slot.
//!
//! A worker enters the pool for `(mission, date, band, role)` only if:
//!
//! 1. Their availability record for the date covers the band
//! 2. They hold the role's eligibility flag
//! 3. They declared no conflict of interest with the mission's sport
//! 4. They do not already hold a provisional assignment for the exact slot
//! 5. They are not booked on the same mission and date, in another role,
//!    in an overlapping band
//!
//! An empty pool is a valid outcome.

use crate::mission::Mission;
use crate::records::ProvisionalAssignment;
use crate::types::{SlotKey, WorkerId};
use crate::worker::{AvailabilityRecord, Worker};
use serde::Serialize;
use std::collections::BTreeMap;

/// Counts of workers dropped at each pool rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PoolExclusions {
    pub unavailable: u32,
    pub ineligible: u32,
    pub conflict_of_interest: u32,
    pub already_assigned: u32,
    pub double_booked: u32,
}

/// The eligible workers for one slot, sorted by worker id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CandidatePool {
    pub members: Vec<WorkerId>,
    pub excluded: PoolExclusions,
}

impl CandidatePool {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }
}

/// Builds the candidate pool for `key`.
///
/// # Arguments
///
/// * `mission` - The mission owning the slot
/// * `key` - The slot being staffed
/// * `respect_opt_out` - Whether opted-out availability records are ignored
/// * `workers` - Candidate workers (usually pre-filtered by role)
/// * `availability` - Availability records for `key.date`
/// * `mission_assignments` - Every provisional assignment of the mission
#[must_use]
pub fn build_candidate_pool(
    mission: &Mission,
    key: &SlotKey,
    respect_opt_out: bool,
    workers: &[Worker],
    availability: &[AvailabilityRecord],
    mission_assignments: &[ProvisionalAssignment],
) -> CandidatePool {
    let by_worker: BTreeMap<WorkerId, &AvailabilityRecord> = availability
        .iter()
        .filter(|a| a.date == key.date)
        .map(|a| (a.worker_id, a))
        .collect();

    let mut pool = CandidatePool::default();

    for worker in workers {
        if !worker.eligibility.allows(key.role) {
            pool.excluded.ineligible += 1;
            continue;
        }

        let available = by_worker
            .get(&worker.worker_id)
            .is_some_and(|record| record.permits(key.band, respect_opt_out));
        if !available {
            pool.excluded.unavailable += 1;
            continue;
        }

        if worker.has_conflict_with(&mission.sport) {
            pool.excluded.conflict_of_interest += 1;
            continue;
        }

        let mut holds_slot = false;
        let mut double_booked = false;
        for assignment in mission_assignments
            .iter()
            .filter(|a| a.worker_id == worker.worker_id)
        {
            if assignment.key == *key {
                holds_slot = true;
            } else if assignment.key.mission_id == key.mission_id
                && assignment.key.date == key.date
                && assignment.key.band.overlaps(key.band)
            {
                double_booked = true;
            }
        }
        if holds_slot {
            pool.excluded.already_assigned += 1;
            continue;
        }
        if double_booked {
            pool.excluded.double_booked += 1;
            continue;
        }

        pool.members.push(worker.worker_id);
    }

    pool.members.sort_unstable();
    pool.members.dedup();
    pool
}
