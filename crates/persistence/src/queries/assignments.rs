// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Staffing output queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use staffing_domain::{
    BookedSlot, ExecutionType, MissionId, ProvisionalAssignment, Role, RoleCount,
    SelectionRecord, SlotKey, StatusSummary, TimeBand, WorkerId, parse_date,
};
use time::Date;

use crate::data_models::{ProvisionalRow, SelectionRow, StatusRow, date_text};
use crate::diesel_schema::{assignment_status, missions, provisional_assignments, selection_records};
use crate::error::PersistenceError;

/// Lists the staged rows of one slot, ordered by worker id.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be parsed.
pub fn list_selections(
    conn: &mut SqliteConnection,
    key: &SlotKey,
) -> Result<Vec<SelectionRecord>, PersistenceError> {
    selection_records::table
        .filter(selection_records::mission_id.eq(key.mission_id.value()))
        .filter(selection_records::slot_date.eq(date_text(key.date)?))
        .filter(selection_records::band.eq(key.band.as_str()))
        .filter(selection_records::role.eq(key.role.as_str()))
        .order(selection_records::worker_id.asc())
        .select(SelectionRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_selections: {e}")))?
        .into_iter()
        .map(SelectionRecord::try_from)
        .collect()
}

/// Lists a mission's provisional assignments, optionally narrowed by date,
/// band and role. Ordered by slot, then worker.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be parsed.
pub fn list_provisional(
    conn: &mut SqliteConnection,
    mission_id: MissionId,
    date: Option<Date>,
    band: Option<TimeBand>,
    role: Option<Role>,
) -> Result<Vec<ProvisionalAssignment>, PersistenceError> {
    let mut query = provisional_assignments::table
        .select(ProvisionalRow::as_select())
        .filter(provisional_assignments::mission_id.eq(mission_id.value()))
        .into_boxed();

    if let Some(date) = date {
        query = query.filter(provisional_assignments::slot_date.eq(date_text(date)?));
    }
    if let Some(band) = band {
        query = query.filter(provisional_assignments::band.eq(band.as_str()));
    }
    if let Some(role) = role {
        query = query.filter(provisional_assignments::role.eq(role.as_str()));
    }

    let mut assignments: Vec<ProvisionalAssignment> = query
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_provisional: {e}")))?
        .into_iter()
        .map(ProvisionalAssignment::try_from)
        .collect::<Result<_, _>>()?;

    // Text columns do not sort like the enums they hold.
    assignments.sort_by_key(|a| (a.key, a.worker_id));
    Ok(assignments)
}

/// Lists a worker's provisional assignments within `[from, to]` on any
/// mission, together with the execution type of each mission.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be parsed.
pub fn list_worker_bookings(
    conn: &mut SqliteConnection,
    worker_id: WorkerId,
    from: Date,
    to: Date,
) -> Result<Vec<BookedSlot>, PersistenceError> {
    let rows: Vec<(i64, String, String, String)> = provisional_assignments::table
        .inner_join(missions::table)
        .filter(provisional_assignments::worker_id.eq(worker_id.value()))
        .filter(provisional_assignments::slot_date.ge(date_text(from)?))
        .filter(provisional_assignments::slot_date.le(date_text(to)?))
        .order(provisional_assignments::slot_date.asc())
        .select((
            provisional_assignments::mission_id,
            provisional_assignments::slot_date,
            provisional_assignments::band,
            missions::execution_type,
        ))
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_worker_bookings: {e}")))?;

    rows.into_iter()
        .map(|(mission_id, date, band, execution)| {
            let invalid = |e| PersistenceError::invalid("provisional_assignments", e);
            Ok(BookedSlot {
                mission_id: MissionId::new(mission_id),
                date: parse_date(&date).map_err(invalid)?,
                band: band.parse::<TimeBand>().map_err(invalid)?,
                execution: execution.parse::<ExecutionType>().map_err(invalid)?,
            })
        })
        .collect()
}

/// Reads back the stored status summaries of a mission, in date order.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be parsed.
pub fn list_status_summaries(
    conn: &mut SqliteConnection,
    mission_id: MissionId,
) -> Result<Vec<StatusSummary>, PersistenceError> {
    let rows: Vec<StatusRow> = assignment_status::table
        .filter(assignment_status::mission_id.eq(mission_id.value()))
        .order(assignment_status::status_date.asc())
        .select(StatusRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_status_summaries: {e}")))?;

    let mut summaries: Vec<StatusSummary> = Vec::new();
    for row in &rows {
        let (date, role, required, assigned) = row.parse()?;
        let count = RoleCount {
            role,
            required,
            assigned,
        };
        match summaries.last_mut() {
            Some(summary) if summary.date == date => summary.roles.push(count),
            _ => summaries.push(StatusSummary {
                mission_id,
                date,
                roles: vec![count],
            }),
        }
    }
    for summary in &mut summaries {
        summary.roles.sort_by_key(|r| r.role);
    }
    Ok(summaries)
}
