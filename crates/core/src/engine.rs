// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pass orchestration.
//!
//! A pass acquires the run lease, orders the queue, and staffs each mission
//! in isolation. A mission that fails is reported and skipped; its status
//! summaries are left as they were. The lease is always released.

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::report::{MissionOutcome, MissionReport, PassReport, PromotionCounter, SlotReport};
use crate::repository::{RunLease, StaffingRepository};
use crate::slot::staff_slot;
use staffing_domain::{MissionId, StatusSummary, is_queue_eligible, order_missions, summarize_mission};
use tracing::{error, info, warn};

/// Runs one full staffing pass.
///
/// # Arguments
///
/// * `store` - The staffing data store
/// * `lease` - The run guard
/// * `config` - Engine configuration
/// * `process` - The process name recorded in the run log
///
/// # Errors
///
/// Returns an error if another run is active, the configuration is invalid,
/// the queue cannot be loaded, or the lease cannot be written after a failed
/// pass. Failures of individual missions are reported in the returned
/// `PassReport`. A completed pass whose lease release fails is logged and
/// still returns its report.
pub fn run_pass<R, L>(
    store: &mut R,
    lease: &mut L,
    config: &EngineConfig,
    process: &str,
) -> Result<PassReport, EngineError>
where
    R: StaffingRepository,
    L: RunLease,
{
    config.validate()?;

    if !lease.try_acquire(process).map_err(EngineError::repository)? {
        warn!(process, "Refusing to start: a run is already active");
        return Err(EngineError::RunAlreadyActive {
            process: process.to_string(),
        });
    }
    info!(process, "Staffing pass started");

    let counter = PromotionCounter::new();
    let result = staff_queue(store, config, &counter);

    match result {
        Ok(missions) => {
            if let Err(err) = lease.release(process, true) {
                error!(process, error = %err, "Failed to record the end of the staffing pass");
            }
            let report = PassReport {
                process: process.to_string(),
                missions,
                duplicate_promotions: counter.duplicates(),
            };
            info!(
                process,
                missions = report.missions.len(),
                failed = report.failed_missions().len(),
                promoted = report.promoted(),
                duplicate_promotions = report.duplicate_promotions,
                "Staffing pass finished"
            );
            Ok(report)
        }
        Err(err) => {
            warn!(process, error = %err, "Staffing pass failed");
            lease
                .release(process, false)
                .map_err(EngineError::repository)?;
            Err(err)
        }
    }
}

fn staff_queue<R: StaffingRepository>(
    store: &mut R,
    config: &EngineConfig,
    counter: &PromotionCounter,
) -> Result<Vec<MissionReport>, EngineError> {
    let candidates = store
        .staffing_candidates()
        .map_err(EngineError::repository)?;
    let queue = order_missions(&candidates);
    info!(queued = queue.len(), "Mission queue ordered");

    let mut reports = Vec::with_capacity(queue.len());
    for mission_id in queue {
        let outcome = match staff_mission(store, config, mission_id, counter) {
            Ok((slots, summaries)) => MissionOutcome::Staffed { slots, summaries },
            Err(err) => {
                warn!(mission_id = %mission_id, error = %err, "Mission skipped");
                MissionOutcome::Failed {
                    reason: err.to_string(),
                }
            }
        };
        reports.push(MissionReport {
            mission_id,
            outcome,
        });
    }
    Ok(reports)
}

/// Staffs every slot of one mission, then rewrites its status summaries.
///
/// Configuration for every needed role is checked before anything is written.
///
/// # Errors
///
/// Returns an error if the mission is missing or no longer staffable, the
/// configuration does not cover its roles, or the store fails.
pub fn staff_mission<R: StaffingRepository>(
    store: &mut R,
    config: &EngineConfig,
    mission_id: MissionId,
    counter: &PromotionCounter,
) -> Result<(Vec<SlotReport>, Vec<StatusSummary>), EngineError> {
    let mission = store
        .mission(mission_id)
        .map_err(EngineError::repository)?
        .ok_or(EngineError::MissionNotFound {
            mission_id: mission_id.value(),
        })?;

    if !is_queue_eligible(&mission) {
        return Err(EngineError::MissionNotStaffable {
            mission_id: mission_id.value(),
            status: mission.status,
        });
    }

    let slots = mission.slots();
    for (key, _) in &slots {
        config
            .composition_for(key.role, mission.execution)?
            .validate()?;
    }

    let mut reports = Vec::with_capacity(slots.len());
    for (key, required) in slots {
        reports.push(staff_slot(store, config, &mission, key, required, counter)?);
    }

    let assignments = store
        .provisional_assignments(mission_id, None, None, None)
        .map_err(EngineError::repository)?;
    let summaries = summarize_mission(&mission, &assignments);
    for summary in &summaries {
        store
            .write_status_summary(summary)
            .map_err(EngineError::repository)?;
    }

    info!(
        mission_id = %mission_id,
        slots = reports.len(),
        staffed_days = summaries.iter().filter(|s| s.is_fully_staffed()).count(),
        "Mission staffed"
    );

    Ok((reports, summaries))
}
