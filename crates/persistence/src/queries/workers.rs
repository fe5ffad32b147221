// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Worker master data queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use staffing_domain::{
    AvailabilityRecord, HistoryEntry, RegionCode, Role, SportCode, Worker, WorkerId,
};
use std::collections::{BTreeMap, BTreeSet};
use time::Date;

use crate::data_models::{AvailabilityRow, HistoryRow, WorkerRow, date_text, from_column};
use crate::diesel_schema::{
    assignment_history, availability, region_priorities, worker_conflicts, workers,
};
use crate::error::PersistenceError;

/// Lists workers holding the eligibility flag for `role`, ordered by id.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be parsed.
pub fn list_workers_for_role(
    conn: &mut SqliteConnection,
    role: Role,
) -> Result<Vec<Worker>, PersistenceError> {
    let query = workers::table
        .select(WorkerRow::as_select())
        .into_boxed();
    let query = match role {
        Role::LeadInspector => query.filter(workers::lead_inspector.ne(0)),
        Role::AreaCoordinator => query.filter(workers::area_coordinator.ne(0)),
        Role::Inspector => query.filter(workers::inspector.ne(0)),
        Role::BloodCollector => query.filter(workers::blood_collector.ne(0)),
        Role::Trainee => query.filter(workers::trainee.ne(0)),
    };
    let rows: Vec<WorkerRow> = query
        .order(workers::worker_id.asc())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_workers_for_role: {e}")))?;

    let ids: Vec<i64> = rows.iter().map(|r| r.worker_id).collect();
    let conflict_rows: Vec<(i64, String)> = worker_conflicts::table
        .filter(worker_conflicts::worker_id.eq_any(&ids))
        .select((worker_conflicts::worker_id, worker_conflicts::sport_code))
        .load(conn)?;

    let mut conflicts: BTreeMap<i64, BTreeSet<SportCode>> = BTreeMap::new();
    for (worker_id, sport) in conflict_rows {
        conflicts
            .entry(worker_id)
            .or_default()
            .insert(SportCode::new(&sport)?);
    }

    rows.into_iter()
        .map(|row| {
            let declared = conflicts.remove(&row.worker_id).unwrap_or_default();
            row.into_worker(declared)
        })
        .collect()
}

/// Retrieves a worker's availability record for one date.
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be parsed.
pub fn get_availability(
    conn: &mut SqliteConnection,
    worker_id: WorkerId,
    date: Date,
) -> Result<Option<AvailabilityRecord>, PersistenceError> {
    availability::table
        .filter(availability::worker_id.eq(worker_id.value()))
        .filter(availability::available_date.eq(date_text(date)?))
        .select(AvailabilityRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_availability: {e}")))?
        .map(AvailabilityRecord::try_from)
        .transpose()
}

/// Lists every availability record for one date.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be parsed.
pub fn list_availability_on(
    conn: &mut SqliteConnection,
    date: Date,
) -> Result<Vec<AvailabilityRecord>, PersistenceError> {
    availability::table
        .filter(availability::available_date.eq(date_text(date)?))
        .order(availability::worker_id.asc())
        .select(AvailabilityRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_availability_on: {e}")))?
        .into_iter()
        .map(AvailabilityRecord::try_from)
        .collect()
}

/// Retrieves the priority rank of `home` for missions held in `venue`.
///
/// # Errors
///
/// Returns an error if the query fails.
/// Returns `Ok(None)` if the regions are not related.
pub fn get_region_priority(
    conn: &mut SqliteConnection,
    venue: &RegionCode,
    home: &RegionCode,
) -> Result<Option<u32>, PersistenceError> {
    region_priorities::table
        .filter(region_priorities::venue_region.eq(venue.as_str()))
        .filter(region_priorities::home_region.eq(home.as_str()))
        .select(region_priorities::priority_rank)
        .first::<i32>(conn)
        .optional()?
        .map(|rank| from_column(rank, "region_priorities"))
        .transpose()
}

/// Lists a worker's history entries within `[from, to]`, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be parsed.
pub fn list_history(
    conn: &mut SqliteConnection,
    worker_id: WorkerId,
    from: Date,
    to: Date,
) -> Result<Vec<HistoryEntry>, PersistenceError> {
    assignment_history::table
        .filter(assignment_history::worker_id.eq(worker_id.value()))
        .filter(assignment_history::worked_date.ge(date_text(from)?))
        .filter(assignment_history::worked_date.le(date_text(to)?))
        .order((
            assignment_history::worked_date.asc(),
            assignment_history::mission_id.asc(),
        ))
        .select(HistoryRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_history: {e}")))?
        .into_iter()
        .map(HistoryEntry::try_from)
        .collect()
}
