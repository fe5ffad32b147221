// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Staffing output writes.

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use staffing_domain::{
    ProvisionalAssignment, SelectionRecord, SlotKey, StagingPlan, StatusSummary, WorkerId,
};
use tracing::debug;

use crate::data_models::{NewProvisionalRow, SelectionRow, StatusRow, date_text, to_column};
use crate::diesel_schema::{assignment_status, provisional_assignments, selection_records};
use crate::error::PersistenceError;

/// Deletes the staged rows of the given workers for one slot.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_selections(
    conn: &mut SqliteConnection,
    key: &SlotKey,
    workers: &[WorkerId],
) -> Result<usize, PersistenceError> {
    if workers.is_empty() {
        return Ok(0);
    }
    let ids: Vec<i64> = workers.iter().map(|w| w.value()).collect();
    let deleted = diesel::delete(
        selection_records::table
            .filter(selection_records::mission_id.eq(key.mission_id.value()))
            .filter(selection_records::slot_date.eq(date_text(key.date)?))
            .filter(selection_records::band.eq(key.band.as_str()))
            .filter(selection_records::role.eq(key.role.as_str()))
            .filter(selection_records::worker_id.eq_any(ids)),
    )
    .execute(conn)?;
    Ok(deleted)
}

/// Inserts staged rows.
///
/// # Errors
///
/// Returns an error if a row cannot be encoded or the insert fails.
pub fn insert_selections(
    conn: &mut SqliteConnection,
    rows: &[SelectionRecord],
) -> Result<usize, PersistenceError> {
    if rows.is_empty() {
        return Ok(0);
    }
    let encoded: Vec<SelectionRow> = rows
        .iter()
        .map(SelectionRow::try_from)
        .collect::<Result<_, _>>()?;
    Ok(diesel::insert_into(selection_records::table)
        .values(&encoded)
        .execute(conn)?)
}

/// Writes a staging plan as one transaction: deletions first, then inserts.
///
/// # Errors
///
/// Returns an error if any statement fails; nothing is written in that case.
pub fn apply_staging_plan(
    conn: &mut SqliteConnection,
    key: &SlotKey,
    plan: &StagingPlan,
) -> Result<(), PersistenceError> {
    let (deleted, inserted) = conn.transaction::<_, PersistenceError, _>(|conn| {
        let deleted = delete_selections(conn, key, &plan.delete)?;
        let inserted = insert_selections(conn, &plan.insert)?;
        Ok((deleted, inserted))
    })?;
    debug!(slot = %key, deleted, inserted, "Applied staging plan");
    Ok(())
}

/// Inserts a provisional assignment.
///
/// Returns `false` when the `(worker, mission, date, band, role)` key
/// already exists.
///
/// # Errors
///
/// Returns an error for any failure other than a duplicate key.
pub fn insert_provisional(
    conn: &mut SqliteConnection,
    assignment: &ProvisionalAssignment,
) -> Result<bool, PersistenceError> {
    let row = NewProvisionalRow::try_from(assignment)?;
    match diesel::insert_into(provisional_assignments::table)
        .values(&row)
        .execute(conn)
    {
        Ok(_) => Ok(true),
        Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => Ok(false),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Replaces the stored status rows for one mission day.
///
/// # Errors
///
/// Returns an error if any statement fails; the previous rows are kept in
/// that case.
pub fn replace_status_summary(
    conn: &mut SqliteConnection,
    summary: &StatusSummary,
) -> Result<(), PersistenceError> {
    let mission_id = summary.mission_id.value();
    let date = date_text(summary.date)?;
    let rows: Vec<StatusRow> = summary
        .roles
        .iter()
        .map(|count| {
            Ok(StatusRow {
                mission_id,
                status_date: date.clone(),
                role: count.role.as_str().to_string(),
                required: to_column(count.required, "required")?,
                assigned: to_column(count.assigned, "assigned")?,
            })
        })
        .collect::<Result<_, PersistenceError>>()?;

    conn.transaction::<_, PersistenceError, _>(|conn| {
        diesel::delete(
            assignment_status::table
                .filter(assignment_status::mission_id.eq(mission_id))
                .filter(assignment_status::status_date.eq(&date)),
        )
        .execute(conn)?;
        if !rows.is_empty() {
            diesel::insert_into(assignment_status::table)
                .values(&rows)
                .execute(conn)?;
        }
        Ok(())
    })
}
