// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Batch run log queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use staffing_domain::RunState;

use crate::diesel_schema::batch_run_status;
use crate::error::PersistenceError;

fn parse_state(text: &str) -> Result<RunState, PersistenceError> {
    text.parse::<RunState>()
        .map_err(|e| PersistenceError::invalid("batch_run_status", e))
}

/// The most recent recorded state of a process.
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be parsed.
/// Returns `Ok(None)` if the process has never run.
pub fn latest_run_state(
    conn: &mut SqliteConnection,
    process: &str,
) -> Result<Option<RunState>, PersistenceError> {
    batch_run_status::table
        .filter(batch_run_status::process_name.eq(process))
        .order(batch_run_status::run_id.desc())
        .select(batch_run_status::run_state)
        .first::<String>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("latest_run_state: {e}")))?
        .as_deref()
        .map(parse_state)
        .transpose()
}

/// Every recorded state of a process, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be parsed.
pub fn list_run_states(
    conn: &mut SqliteConnection,
    process: &str,
) -> Result<Vec<RunState>, PersistenceError> {
    batch_run_status::table
        .filter(batch_run_status::process_name.eq(process))
        .order(batch_run_status::run_id.asc())
        .select(batch_run_status::run_state)
        .load::<String>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_run_states: {e}")))?
        .iter()
        .map(|s| parse_state(s))
        .collect()
}
