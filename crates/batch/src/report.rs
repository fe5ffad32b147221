// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV rendering of a pass report: one row per slot, one row per failed mission.

use serde::Serialize;
use staffing::{MissionOutcome, PassReport, SlotReport};
use staffing_domain::format_date;
use std::io::Write;

#[derive(Debug, Default, Serialize)]
struct ReportRow {
    mission_id: i64,
    outcome: &'static str,
    date: Option<String>,
    band: Option<&'static str>,
    role: Option<&'static str>,
    required: Option<u32>,
    already_assigned: Option<u32>,
    pool_size: Option<u32>,
    excluded_unavailable: Option<u32>,
    excluded_ineligible: Option<u32>,
    excluded_conflict_of_interest: Option<u32>,
    excluded_already_assigned: Option<u32>,
    excluded_double_booked: Option<u32>,
    rejected_continuous_duty: Option<u32>,
    rejected_adjacent_mission: Option<u32>,
    rejected_participation_ratio: Option<u32>,
    staged: Option<u32>,
    promoted: Option<u32>,
    duplicate_promotions: Option<u32>,
    shortfall: Option<u32>,
    reason: Option<String>,
}

impl ReportRow {
    fn for_slot(mission_id: i64, slot: &SlotReport) -> Result<Self, csv::Error> {
        let date = format_date(slot.key.date)
            .map_err(|e| csv::Error::from(std::io::Error::other(e.to_string())))?;
        Ok(Self {
            mission_id,
            outcome: "staffed",
            date: Some(date),
            band: Some(slot.key.band.as_str()),
            role: Some(slot.key.role.as_str()),
            required: Some(slot.required),
            already_assigned: Some(slot.already_assigned),
            pool_size: Some(slot.pool_size),
            excluded_unavailable: Some(slot.excluded.unavailable),
            excluded_ineligible: Some(slot.excluded.ineligible),
            excluded_conflict_of_interest: Some(slot.excluded.conflict_of_interest),
            excluded_already_assigned: Some(slot.excluded.already_assigned),
            excluded_double_booked: Some(slot.excluded.double_booked),
            rejected_continuous_duty: Some(slot.rejected.continuous_duty),
            rejected_adjacent_mission: Some(slot.rejected.adjacent_mission),
            rejected_participation_ratio: Some(slot.rejected.participation_ratio),
            staged: Some(slot.staged),
            promoted: Some(slot.promoted),
            duplicate_promotions: Some(slot.duplicate_promotions),
            shortfall: Some(slot.shortfall),
            reason: None,
        })
    }
}

/// Writes the report as CSV with a header row.
///
/// # Errors
///
/// Returns an error if the writer fails.
pub fn write_csv<W: Write>(report: &PassReport, writer: W) -> Result<(), csv::Error> {
    let mut out = csv::Writer::from_writer(writer);
    for mission in &report.missions {
        let mission_id = mission.mission_id.value();
        match &mission.outcome {
            MissionOutcome::Staffed { slots, .. } => {
                for slot in slots {
                    out.serialize(ReportRow::for_slot(mission_id, slot)?)?;
                }
            }
            MissionOutcome::Failed { reason } => out.serialize(ReportRow {
                mission_id,
                outcome: "failed",
                reason: Some(reason.clone()),
                ..ReportRow::default()
            })?,
        }
    }
    out.flush()?;
    Ok(())
}
