// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite` persistence for the staffing engine.
//!
//! Built on Diesel with embedded migrations. The `Persistence` adapter
//! implements the engine's `StaffingRepository` and `RunLease` boundaries
//! and exposes the master data inserts used by fixtures and the snapshot
//! importer.
//!
//! ## Storage conventions
//!
//! - Dates are ISO `YYYY-MM-DD` text
//! - Enums are stored by name
//! - Flags are 0/1 integers
//! - Condition sets are JSON text
//!
//! ## Atomicity
//!
//! Each repository call is one atomic unit. The staging delete+insert, the
//! status summary overwrite and the run lease check-and-start each run in a
//! single transaction.
//!
//! ## Testing
//!
//! Tests use a shared in-memory database per `Persistence::new_in_memory`
//! call. `reconnect` opens a second connection to the same database, which
//! is how a pass gets separate store and lease handles.

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
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use staffing_domain::{
    AvailabilityRecord, HistoryEntry, Mission, MissionId, MissionStatus, RegionCode, RunState,
    Worker, WorkerId,
};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::Date;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod store;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

/// Persistence adapter for the staffing store.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
    database_url: String,
    file_backed: bool,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique shared-cache database, so connections
    /// opened with `reconnect` see the same data while tests stay isolated.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");
        Self::open(shared_memory_url, false)
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;
        Self::open(path_str.to_string(), true)
    }

    fn open(database_url: String, file_backed: bool) -> Result<Self, PersistenceError> {
        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&database_url)?;

        if file_backed {
            backend::sqlite::enable_wal_mode(&mut conn)?;
        }

        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn,
            database_url,
            file_backed,
        })
    }

    /// Opens another connection to the same database.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub fn reconnect(&self) -> Result<Self, PersistenceError> {
        Self::open(self.database_url.clone(), self.file_backed)
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Master data
    // ========================================================================

    /// Inserts or replaces a mission with its days and requirements.
    ///
    /// # Errors
    ///
    /// Returns an error if the mission cannot be written.
    pub fn insert_mission(&mut self, mission: &Mission) -> Result<(), PersistenceError> {
        mutations::master_data::upsert_mission(&mut self.conn, mission)
    }

    /// Overwrites a mission's status. Returns `false` if the mission does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn set_mission_status(
        &mut self,
        mission_id: MissionId,
        status: MissionStatus,
    ) -> Result<bool, PersistenceError> {
        mutations::master_data::update_mission_status(&mut self.conn, mission_id, status)
    }

    /// Inserts or replaces a worker and their declared conflicts.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker cannot be written.
    pub fn insert_worker(&mut self, worker: &Worker) -> Result<(), PersistenceError> {
        mutations::master_data::upsert_worker(&mut self.conn, worker)
    }

    /// Inserts or replaces the availability record for `(worker, date)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written.
    pub fn insert_availability(
        &mut self,
        record: &AvailabilityRecord,
    ) -> Result<(), PersistenceError> {
        mutations::master_data::upsert_availability(&mut self.conn, record)
    }

    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn remove_availability(
        &mut self,
        worker_id: WorkerId,
        date: Date,
    ) -> Result<(), PersistenceError> {
        mutations::master_data::delete_availability(&mut self.conn, worker_id, date)
    }

    /// # Errors
    ///
    /// Returns an error if the priority cannot be written.
    pub fn insert_region_priority(
        &mut self,
        venue: &RegionCode,
        home: &RegionCode,
        rank: u32,
    ) -> Result<(), PersistenceError> {
        mutations::master_data::upsert_region_priority(&mut self.conn, venue, home, rank)
    }

    /// # Errors
    ///
    /// Returns an error if the entry cannot be written.
    pub fn insert_history(&mut self, entry: &HistoryEntry) -> Result<(), PersistenceError> {
        mutations::master_data::insert_history(&mut self.conn, entry)
    }

    // ========================================================================
    // Run log
    // ========================================================================

    /// The recorded run states for a process, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the run log cannot be read.
    pub fn run_log(&mut self, process: &str) -> Result<Vec<RunState>, PersistenceError> {
        queries::runs::list_run_states(&mut self.conn, process)
    }
}
