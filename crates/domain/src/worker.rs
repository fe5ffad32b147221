// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{
    BandSet, DisciplineCode, Gender, MissionId, Rank, RegionCode, Role, SportCode, WorkerId,
    iso_date,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use time::Date;

/// Role-eligibility flags, one per role family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RoleEligibility {
    pub lead_inspector: bool,
    pub area_coordinator: bool,
    pub inspector: bool,
    pub blood_collector: bool,
    pub trainee: bool,
}

impl RoleEligibility {
    /// Flags granting exactly the given roles.
    #[must_use]
    pub fn for_roles(roles: &[Role]) -> Self {
        let mut flags = Self::default();
        for role in roles {
            match role {
                Role::LeadInspector => flags.lead_inspector = true,
                Role::AreaCoordinator => flags.area_coordinator = true,
                Role::Inspector => flags.inspector = true,
                Role::BloodCollector => flags.blood_collector = true,
                Role::Trainee => flags.trainee = true,
            }
        }
        flags
    }

    #[must_use]
    pub const fn allows(&self, role: Role) -> bool {
        match role {
            Role::LeadInspector => self.lead_inspector,
            Role::AreaCoordinator => self.area_coordinator,
            Role::Inspector => self.inspector,
            Role::BloodCollector => self.blood_collector,
            Role::Trainee => self.trainee,
        }
    }
}

/// A certified person who can be assigned to missions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    pub worker_id: WorkerId,
    pub rank: Rank,
    pub gender: Gender,
    pub eligibility: RoleEligibility,
    pub home_region: RegionCode,
    /// Unique and monotonic; the final ranking tie-break.
    pub certification_number: u64,
    /// Sports the worker must not inspect.
    #[serde(default)]
    pub conflicts: BTreeSet<SportCode>,
}

impl Worker {
    #[must_use]
    pub fn has_conflict_with(&self, sport: &SportCode) -> bool {
        self.conflicts.contains(sport)
    }
}

/// Declared availability of a worker on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityRecord {
    pub worker_id: WorkerId,
    #[serde(with = "iso_date")]
    pub date: Date,
    pub bands: BandSet,
    /// Set when the worker attached an opt-out remark to the date.
    #[serde(default)]
    pub opted_out: bool,
}

impl AvailabilityRecord {
    /// Whether this record makes the worker usable for `band`.
    ///
    /// Roles that respect opt-outs ignore opted-out records entirely.
    #[must_use]
    pub const fn permits(&self, band: crate::types::TimeBand, respect_opt_out: bool) -> bool {
        if respect_opt_out && self.opted_out {
            return false;
        }
        self.bands.covers(band)
    }
}

/// One previously worked assignment in a worker's ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub worker_id: WorkerId,
    pub mission_id: MissionId,
    #[serde(with = "iso_date")]
    pub date: Date,
    pub sport: SportCode,
    pub discipline: DisciplineCode,
}
