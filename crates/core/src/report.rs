// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Outcome records produced by a staffing pass.

use serde::Serialize;
use staffing_domain::{ConditionKind, MissionId, PoolExclusions, SlotKey, StatusSummary};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counts promotions that hit an existing provisional assignment.
///
/// Clones share the same count.
#[derive(Debug, Clone, Default)]
pub struct PromotionCounter {
    duplicates: Arc<AtomicU64>,
}

impl PromotionCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_duplicate(&self) {
        self.duplicates.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn duplicates(&self) -> u64 {
        self.duplicates.load(Ordering::Relaxed)
    }
}

/// Candidates rejected by each filter for one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RejectionCounts {
    pub continuous_duty: u32,
    pub adjacent_mission: u32,
    pub participation_ratio: u32,
}

impl RejectionCounts {
    pub const fn record(&mut self, condition: ConditionKind) {
        match condition {
            ConditionKind::ContinuousDuty => self.continuous_duty += 1,
            ConditionKind::AdjacentMission => self.adjacent_mission += 1,
            ConditionKind::ParticipationRatio => self.participation_ratio += 1,
            ConditionKind::PriorExperience | ConditionKind::RegionPriority => {}
        }
    }

    #[must_use]
    pub const fn total(&self) -> u32 {
        self.continuous_duty + self.adjacent_mission + self.participation_ratio
    }
}

/// What happened to one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotReport {
    pub key: SlotKey,
    pub required: u32,
    /// Provisional assignments held before this pass touched the slot.
    pub already_assigned: u32,
    pub pool_size: u32,
    pub excluded: PoolExclusions,
    pub rejected: RejectionCounts,
    pub staged: u32,
    pub staged_deleted: u32,
    pub staged_inserted: u32,
    pub promoted: u32,
    pub duplicate_promotions: u32,
    /// Headcount still missing after promotion.
    pub shortfall: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome")]
pub enum MissionOutcome {
    Staffed {
        slots: Vec<SlotReport>,
        summaries: Vec<StatusSummary>,
    },
    Failed {
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissionReport {
    pub mission_id: MissionId,
    #[serde(flatten)]
    pub outcome: MissionOutcome,
}

impl MissionReport {
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self.outcome, MissionOutcome::Failed { .. })
    }

    /// Slot reports, empty for a failed mission.
    #[must_use]
    pub fn slots(&self) -> &[SlotReport] {
        match &self.outcome {
            MissionOutcome::Staffed { slots, .. } => slots,
            MissionOutcome::Failed { .. } => &[],
        }
    }
}

/// The outcome of a whole pass, one entry per queued mission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassReport {
    pub process: String,
    pub missions: Vec<MissionReport>,
    pub duplicate_promotions: u64,
}

impl PassReport {
    #[must_use]
    pub fn failed_missions(&self) -> Vec<MissionId> {
        self.missions
            .iter()
            .filter(|m| m.is_failed())
            .map(|m| m.mission_id)
            .collect()
    }

    #[must_use]
    pub fn promoted(&self) -> u32 {
        self.missions
            .iter()
            .flat_map(MissionReport::slots)
            .map(|s| s.promoted)
            .sum()
    }

    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.missions.iter().all(|m| !m.is_failed())
    }
}
