// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Staffing of a single `(mission, date, band, role)` slot.
//!
//! Pool → filters → ranking → composition → staging → promotion.

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::report::{PromotionCounter, RejectionCounts, SlotReport};
use crate::repository::StaffingRepository;
use staffing_domain::{
    AvailabilityRecord, CandidateFacts, CandidateScore, CompositionSubject, Mission,
    ProvisionalAssignment, SelectionRecord, SlotKey, Worker, WorkerId, allocate_quotas,
    build_candidate_pool, duty_window, evaluate_filters, is_continuity_pinned,
    operating_year_bounds, plan_staging, rank_candidates, rotation_count, rows_to_promote,
};
use std::collections::{BTreeMap, BTreeSet};
use time::Date;
use tracing::{debug, warn};

/// Ranks, balances, stages and promotes candidates for one slot.
///
/// # Errors
///
/// Returns an error if the configuration is inconsistent for the slot's role
/// or the store fails.
#[allow(clippy::too_many_lines)]
pub fn staff_slot<R: StaffingRepository>(
    store: &mut R,
    config: &EngineConfig,
    mission: &Mission,
    key: SlotKey,
    required: u32,
    counter: &PromotionCounter,
) -> Result<SlotReport, EngineError> {
    let policy = config.role_policy(key.role)?;
    let filter_policy = config.filter_policy(key.role)?;
    let table = config.composition_for(key.role, mission.execution)?;
    let start_month = config.start_month()?;

    let mission_assignments = store
        .provisional_assignments(mission.mission_id, None, None, None)
        .map_err(EngineError::repository)?;
    let backed: BTreeSet<WorkerId> = mission_assignments
        .iter()
        .filter(|a| a.key == key)
        .map(|a| a.worker_id)
        .collect();
    let already_assigned = u32::try_from(backed.len()).unwrap_or(u32::MAX);

    let workers = store
        .eligible_workers(mission.mission_id, key.role)
        .map_err(EngineError::repository)?;
    let availability = store
        .availability_on(key.date)
        .map_err(EngineError::repository)?;

    let pool = build_candidate_pool(
        mission,
        &key,
        policy.respect_opt_out,
        &workers,
        &availability,
        &mission_assignments,
    );
    debug!(
        slot = %key,
        pool = pool.len(),
        already_assigned,
        "Built candidate pool"
    );

    let by_id: BTreeMap<WorkerId, &Worker> = workers.iter().map(|w| (w.worker_id, w)).collect();

    let (window_from, window_to) = duty_window(key.date, config.duty.window_days)?;
    let (reach_from, reach_to) = duty_window(key.date, config.duty.window_days.max(1))?;
    let (year_from, year_to) = operating_year_bounds(key.date, start_month)?;
    let history_from = if filter_policy.experience.is_some() {
        Date::MIN
    } else {
        year_from.min(window_from)
    };
    let history_to = year_to.max(window_to);

    let mut rejected = RejectionCounts::default();
    let mut scores: Vec<CandidateScore> = Vec::with_capacity(pool.len());

    for worker_id in &pool.members {
        let Some(worker) = by_id.get(worker_id) else {
            continue;
        };

        let history = store
            .assignment_history(*worker_id, history_from, history_to)
            .map_err(EngineError::repository)?;
        let booked = store
            .worker_provisional_assignments(*worker_id, reach_from, reach_to)
            .map_err(EngineError::repository)?;

        let mut worked: BTreeSet<Date> = history
            .iter()
            .map(|h| h.date)
            .filter(|d| *d >= window_from && *d <= window_to)
            .collect();
        worked.extend(
            booked
                .iter()
                .map(|b| b.date)
                .filter(|d| *d >= window_from && *d <= window_to),
        );
        let worked: Vec<Date> = worked.into_iter().collect();

        let mission_availability = if filter_policy.participation_percent.is_some() {
            mission_availability(store, *worker_id, mission)?
        } else {
            Vec::new()
        };

        let region_rank = store
            .region_priority(&mission.venue_region, &worker.home_region)
            .map_err(EngineError::repository)?;

        let facts = CandidateFacts {
            worked_dates: &worked,
            booked: &booked,
            history: &history,
            availability: &mission_availability,
            region_rank,
        };
        let verdict = evaluate_filters(mission, &key, &facts, &filter_policy)?;

        if let Some(condition) = verdict.rejected_by {
            rejected.record(condition);
            continue;
        }

        let strong = verdict.is_strong();
        scores.push(CandidateScore {
            worker_id: *worker_id,
            pinned: is_continuity_pinned(&key, *worker_id, &mission_assignments),
            region_rank,
            rotation_count: rotation_count(&history, key.date, start_month)?,
            certification_number: worker.certification_number,
            strong,
            conditions: verdict.conditions,
        });
    }

    let ranked = rank_candidates(scores, policy.sort);

    let existing: Vec<CompositionSubject> = backed
        .iter()
        .filter_map(|id| by_id.get(id))
        .map(|w| CompositionSubject {
            rank: w.rank,
            gender: w.gender,
            claimable: false,
        })
        .collect();
    let subjects: Vec<CompositionSubject> = ranked
        .iter()
        .filter_map(|r| {
            by_id.get(&r.score.worker_id).map(|w| CompositionSubject {
                rank: w.rank,
                gender: w.gender,
                claimable: policy.promotion.may_claim(r.score.strong),
            })
        })
        .collect();
    let allocation = allocate_quotas(&table, required, &existing, &subjects)?;

    // Backed workers hold the leading positions and their seats, even when
    // their rank is no longer known.
    let mut open_seats = required.saturating_sub(already_assigned);
    let rows: Vec<SelectionRecord> = ranked
        .into_iter()
        .zip(allocation.claims)
        .map(|(candidate, claim)| {
            let quota_bucket = claim.filter(|_| {
                if open_seats == 0 {
                    return false;
                }
                open_seats -= 1;
                true
            });
            SelectionRecord {
                key,
                worker_id: candidate.score.worker_id,
                strong_candidate: candidate.score.strong,
                condition_score: candidate.score.conditions.score(),
                conditions: candidate.score.conditions,
                rank_position: already_assigned + candidate.position,
                quota_bucket,
            }
        })
        .collect();

    let staged_rows = store
        .staged_selections(&key)
        .map_err(EngineError::repository)?;
    let plan = plan_staging(&staged_rows, &backed, rows.clone());
    if !plan.is_noop() {
        store
            .apply_staging(&key, &plan)
            .map_err(EngineError::repository)?;
    }

    let mut promoted: u32 = 0;
    let mut duplicates: u32 = 0;
    for row in rows_to_promote(&rows, policy.promotion) {
        let assignment: ProvisionalAssignment = row.to_provisional();
        if store.promote(&assignment).map_err(EngineError::repository)? {
            promoted += 1;
        } else {
            duplicates += 1;
            counter.record_duplicate();
            warn!(
                slot = %key,
                worker_id = %row.worker_id,
                "Provisional assignment already exists; promotion skipped"
            );
        }
    }

    let filled = already_assigned + promoted + duplicates;
    let report = SlotReport {
        key,
        required,
        already_assigned,
        pool_size: u32::try_from(pool.len()).unwrap_or(u32::MAX),
        excluded: pool.excluded,
        rejected,
        staged: u32::try_from(rows.len()).unwrap_or(u32::MAX),
        staged_deleted: u32::try_from(plan.delete.len()).unwrap_or(u32::MAX),
        staged_inserted: u32::try_from(plan.insert.len()).unwrap_or(u32::MAX),
        promoted,
        duplicate_promotions: duplicates,
        shortfall: required.saturating_sub(filled),
    };

    debug!(
        slot = %key,
        staged = report.staged,
        promoted,
        rejected = rejected.total(),
        shortfall = report.shortfall,
        "Staffed slot"
    );

    Ok(report)
}

fn mission_availability<R: StaffingRepository>(
    store: &mut R,
    worker_id: WorkerId,
    mission: &Mission,
) -> Result<Vec<AvailabilityRecord>, EngineError> {
    let mut records = Vec::new();
    for date in mission.dates() {
        if let Some(record) = store
            .availability(worker_id, date)
            .map_err(EngineError::repository)?
        {
            records.push(record);
        }
    }
    Ok(records)
}
