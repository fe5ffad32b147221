// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mission queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use staffing_domain::{Mission, MissionId, MissionStatus};
use tracing::debug;

use crate::data_models::{MissionRow, RequirementRow};
use crate::diesel_schema::{mission_days, mission_requirements, missions};
use crate::error::PersistenceError;

fn assemble(conn: &mut SqliteConnection, row: MissionRow) -> Result<Mission, PersistenceError> {
    let dates: Vec<String> = mission_days::table
        .filter(mission_days::mission_id.eq(row.mission_id))
        .order(mission_days::mission_date.asc())
        .select(mission_days::mission_date)
        .load(conn)?;

    let requirements: Vec<RequirementRow> = mission_requirements::table
        .filter(mission_requirements::mission_id.eq(row.mission_id))
        .order(mission_requirements::requirement_id.asc())
        .select(RequirementRow::as_select())
        .load(conn)?;

    row.into_mission(&dates, &requirements)
}

/// Loads every mission in the given status, ordered by id.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be parsed.
pub fn list_missions_by_status(
    conn: &mut SqliteConnection,
    status: MissionStatus,
) -> Result<Vec<Mission>, PersistenceError> {
    let rows: Vec<MissionRow> = missions::table
        .filter(missions::status.eq(status.as_str()))
        .order(missions::mission_id.asc())
        .select(MissionRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_missions_by_status: {e}")))?;

    debug!(status = %status, count = rows.len(), "Loaded missions");

    rows.into_iter().map(|row| assemble(conn, row)).collect()
}

/// Retrieves one mission with its days and requirements.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be parsed.
/// Returns `Ok(None)` if the mission is not found.
pub fn get_mission(
    conn: &mut SqliteConnection,
    mission_id: MissionId,
) -> Result<Option<Mission>, PersistenceError> {
    let row: Option<MissionRow> = missions::table
        .filter(missions::mission_id.eq(mission_id.value()))
        .select(MissionRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_mission: {e}")))?;

    row.map(|row| assemble(conn, row)).transpose()
}
