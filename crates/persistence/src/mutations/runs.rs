// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Batch run log writes.

use diesel::SqliteConnection;
use diesel::prelude::*;
use staffing_domain::{RunState, run_may_start};
use tracing::info;

use crate::diesel_schema::batch_run_status;
use crate::error::PersistenceError;
use crate::queries::runs::latest_run_state;

/// Appends a state to the run log of a process.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn append_run_state(
    conn: &mut SqliteConnection,
    process: &str,
    state: RunState,
) -> Result<(), PersistenceError> {
    diesel::insert_into(batch_run_status::table)
        .values((
            batch_run_status::process_name.eq(process),
            batch_run_status::run_state.eq(state.as_str()),
        ))
        .execute(conn)?;
    Ok(())
}

/// Starts a run unless the latest state of the process is active.
///
/// The check and the two inserts share an immediate transaction, so two
/// connections cannot both start a run.
///
/// # Errors
///
/// Returns an error if the run log cannot be read or written.
pub fn start_run(conn: &mut SqliteConnection, process: &str) -> Result<bool, PersistenceError> {
    let started = conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        if !run_may_start(latest_run_state(conn, process)?) {
            return Ok(false);
        }
        append_run_state(conn, process, RunState::Requested)?;
        append_run_state(conn, process, RunState::Started)?;
        Ok(true)
    })?;

    if started {
        info!(process, "Run started");
    }
    Ok(started)
}
