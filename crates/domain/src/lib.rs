// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod candidate_pool;
mod composition;
mod error;
mod filters;
mod mission;
mod mission_queue;
mod ranking;
mod records;
mod rollup;
mod staging;
mod types;
mod worker;

#[cfg(test)]
mod tests;

pub use candidate_pool::{CandidatePool, PoolExclusions, build_candidate_pool};
pub use composition::{
    BucketMatch, CompositionSubject, CompositionTable, QuotaAllocation, QuotaBucket,
    QuotaRounding, allocate_quotas,
};
pub use filters::{
    BookedSlot, CandidateFacts, ContinuousDutyLimit, ExperienceScope, FilterPolicy,
    FilterVerdict, check_adjacent_missions, check_continuous_duty, check_participation_ratio,
    duty_window, evaluate_filters, has_prior_experience, longest_consecutive_run,
    required_participation_days,
};
pub use mission_queue::{is_queue_eligible, order_missions};
pub use ranking::{
    CandidateScore, RankedCandidate, SortDirection, is_continuity_pinned, operating_year_bounds,
    rank_candidates, rotation_count,
};
pub use rollup::{summarize_day, summarize_mission};
pub use staging::{PromotionPolicy, StagingPlan, plan_staging, rows_to_promote};

// Re-export public types
pub use error::DomainError;
pub use mission::{Mission, MissionDay, SlotRequirement};
pub use records::{
    ConditionKind, ConditionResult, ConditionSet, MAX_CONDITIONS, ProvisionalAssignment,
    RoleCount, SelectionRecord, StatusSummary,
};
pub use types::{
    BandSet, DisciplineCode, ExecutionType, Gender, MissionId, MissionStatus, Rank, RegionCode,
    Role, RunState, SlotKey, SpecimenCounts, SportCode, TimeBand, WorkerId, format_date, iso_date,
    parse_date, run_may_start,
};
pub use worker::{AvailabilityRecord, HistoryEntry, RoleEligibility, Worker};
