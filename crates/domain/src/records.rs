// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Staged selections, provisional assignments and status summaries.

use crate::error::DomainError;
use crate::types::{MissionId, Role, SlotKey, WorkerId, iso_date};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// Maximum number of condition/result pairs kept per candidate.
pub const MAX_CONDITIONS: usize = 5;

/// The named checks whose outcome is recorded with each candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConditionKind {
    ContinuousDuty,
    AdjacentMission,
    PriorExperience,
    ParticipationRatio,
    RegionPriority,
}

impl ConditionKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ContinuousDuty => "ContinuousDuty",
            Self::AdjacentMission => "AdjacentMission",
            Self::PriorExperience => "PriorExperience",
            Self::ParticipationRatio => "ParticipationRatio",
            Self::RegionPriority => "RegionPriority",
        }
    }

    /// Filters decide whether a candidate is strong. Region priority is
    /// recorded for audit only.
    #[must_use]
    pub const fn is_filter(&self) -> bool {
        !matches!(self, Self::RegionPriority)
    }
}

impl FromStr for ConditionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ContinuousDuty" => Ok(Self::ContinuousDuty),
            "AdjacentMission" => Ok(Self::AdjacentMission),
            "PriorExperience" => Ok(Self::PriorExperience),
            "ParticipationRatio" => Ok(Self::ParticipationRatio),
            "RegionPriority" => Ok(Self::RegionPriority),
            _ => Err(DomainError::InvalidCondition(s.to_string())),
        }
    }
}

impl std::fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One recorded condition and whether the candidate passed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConditionResult {
    pub condition: ConditionKind,
    pub passed: bool,
}

/// Up to five condition/result pairs, in evaluation order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<ConditionResult>", into = "Vec<ConditionResult>")]
pub struct ConditionSet {
    results: Vec<ConditionResult>,
}

impl ConditionSet {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            results: Vec::new(),
        }
    }

    /// Records the outcome of a condition.
    ///
    /// # Errors
    ///
    /// Returns an error if the condition is already recorded or the set is full.
    pub fn record(&mut self, condition: ConditionKind, passed: bool) -> Result<(), DomainError> {
        if self.results.iter().any(|r| r.condition == condition) {
            return Err(DomainError::DuplicateCondition(condition.to_string()));
        }
        if self.results.len() >= MAX_CONDITIONS {
            return Err(DomainError::TooManyConditions {
                count: self.results.len() + 1,
            });
        }
        self.results.push(ConditionResult { condition, passed });
        Ok(())
    }

    #[must_use]
    pub fn results(&self) -> &[ConditionResult] {
        &self.results
    }

    #[must_use]
    pub fn get(&self, condition: ConditionKind) -> Option<bool> {
        self.results
            .iter()
            .find(|r| r.condition == condition)
            .map(|r| r.passed)
    }

    /// Number of passed conditions.
    #[must_use]
    pub fn score(&self) -> u32 {
        let passed = self.results.iter().filter(|r| r.passed).count();
        u32::try_from(passed).unwrap_or(u32::MAX)
    }

    /// True when every recorded filter condition passed.
    #[must_use]
    pub fn all_filters_passed(&self) -> bool {
        self.results
            .iter()
            .filter(|r| r.condition.is_filter())
            .all(|r| r.passed)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl TryFrom<Vec<ConditionResult>> for ConditionSet {
    type Error = DomainError;

    fn try_from(results: Vec<ConditionResult>) -> Result<Self, Self::Error> {
        let mut set = Self::new();
        for result in results {
            set.record(result.condition, result.passed)?;
        }
        Ok(set)
    }
}

impl From<ConditionSet> for Vec<ConditionResult> {
    fn from(set: ConditionSet) -> Self {
        set.results
    }
}

/// A staged candidate for one slot.
///
/// Recomputed on every pass; rows backed by a provisional assignment are
/// kept, everything else is replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRecord {
    pub key: SlotKey,
    pub worker_id: WorkerId,
    pub strong_candidate: bool,
    pub condition_score: u32,
    pub conditions: ConditionSet,
    /// 1-based position in the ranked list.
    pub rank_position: u32,
    /// The composition bucket that claimed this candidate, if any.
    pub quota_bucket: Option<String>,
}

impl SelectionRecord {
    #[must_use]
    pub const fn is_quota_filled(&self) -> bool {
        self.quota_bucket.is_some()
    }

    /// The provisional assignment this row becomes when promoted.
    #[must_use]
    pub fn to_provisional(&self) -> ProvisionalAssignment {
        ProvisionalAssignment {
            key: self.key,
            worker_id: self.worker_id,
            strong_candidate: self.strong_candidate,
            condition_score: self.condition_score,
            conditions: self.conditions.clone(),
        }
    }
}

/// The committed-for-now staffing outcome for a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionalAssignment {
    pub key: SlotKey,
    pub worker_id: WorkerId,
    pub strong_candidate: bool,
    pub condition_score: u32,
    pub conditions: ConditionSet,
}

impl ProvisionalAssignment {
    /// Uniqueness key: `(worker, mission, date, band, role)`.
    #[must_use]
    pub const fn unique_key(&self) -> (WorkerId, SlotKey) {
        (self.worker_id, self.key)
    }
}

/// Required versus assigned headcount for one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCount {
    pub role: Role,
    pub required: u32,
    pub assigned: u32,
}

impl RoleCount {
    #[must_use]
    pub const fn shortfall(&self) -> u32 {
        self.required.saturating_sub(self.assigned)
    }
}

/// Assignment status for one mission day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSummary {
    pub mission_id: MissionId,
    #[serde(with = "iso_date")]
    pub date: Date,
    pub roles: Vec<RoleCount>,
}

impl StatusSummary {
    #[must_use]
    pub fn is_fully_staffed(&self) -> bool {
        self.roles.iter().all(|r| r.shortfall() == 0)
    }

    #[must_use]
    pub fn role(&self, role: Role) -> Option<&RoleCount> {
        self.roles.iter().find(|r| r.role == role)
    }
}
