// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Store boundaries consumed by the engine.
//!
//! Reads are point-in-time snapshots. Each write is its own atomic unit.
//! Empty results are values, never errors.

use staffing_domain::{
    AvailabilityRecord, BookedSlot, HistoryEntry, Mission, MissionId, ProvisionalAssignment,
    RegionCode, Role, SelectionRecord, SlotKey, StagingPlan, StatusSummary, TimeBand, Worker,
    WorkerId,
};
use time::Date;

/// Read and write access to staffing data.
pub trait StaffingRepository {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Every mission that might be queued. The engine applies eligibility and ordering.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn staffing_candidates(&mut self) -> Result<Vec<Mission>, Self::Error>;

    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn mission(&mut self, mission_id: MissionId) -> Result<Option<Mission>, Self::Error>;

    /// Workers holding the eligibility flag for `role`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn eligible_workers(
        &mut self,
        mission_id: MissionId,
        role: Role,
    ) -> Result<Vec<Worker>, Self::Error>;

    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn availability(
        &mut self,
        worker_id: WorkerId,
        date: Date,
    ) -> Result<Option<AvailabilityRecord>, Self::Error>;

    /// Every availability record for `date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn availability_on(&mut self, date: Date) -> Result<Vec<AvailabilityRecord>, Self::Error>;

    /// The priority rank of `home` for missions in `venue`, if related.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn region_priority(
        &mut self,
        venue: &RegionCode,
        home: &RegionCode,
    ) -> Result<Option<u32>, Self::Error>;

    /// History entries for a worker within `[from, to]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn assignment_history(
        &mut self,
        worker_id: WorkerId,
        from: Date,
        to: Date,
    ) -> Result<Vec<HistoryEntry>, Self::Error>;

    /// Provisional assignments of a mission, optionally narrowed by date, band, and role.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn provisional_assignments(
        &mut self,
        mission_id: MissionId,
        date: Option<Date>,
        band: Option<TimeBand>,
        role: Option<Role>,
    ) -> Result<Vec<ProvisionalAssignment>, Self::Error>;

    /// A worker's provisional assignments within `[from, to]` on any mission.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn worker_provisional_assignments(
        &mut self,
        worker_id: WorkerId,
        from: Date,
        to: Date,
    ) -> Result<Vec<BookedSlot>, Self::Error>;

    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn staged_selections(&mut self, key: &SlotKey) -> Result<Vec<SelectionRecord>, Self::Error>;

    /// # Errors
    ///
    /// Returns an error if the rows cannot be deleted.
    fn delete_selections(&mut self, key: &SlotKey, workers: &[WorkerId])
    -> Result<(), Self::Error>;

    /// # Errors
    ///
    /// Returns an error if the rows cannot be inserted.
    fn insert_selections(&mut self, rows: &[SelectionRecord]) -> Result<(), Self::Error>;

    /// Writes a staging plan. Stores that support transactions override this
    /// to make the delete and insert one unit.
    ///
    /// # Errors
    ///
    /// Returns an error if the plan cannot be written.
    fn apply_staging(&mut self, key: &SlotKey, plan: &StagingPlan) -> Result<(), Self::Error> {
        if !plan.delete.is_empty() {
            self.delete_selections(key, &plan.delete)?;
        }
        if !plan.insert.is_empty() {
            self.insert_selections(&plan.insert)?;
        }
        Ok(())
    }

    /// Inserts a provisional assignment.
    ///
    /// Returns `false` when the unique key already exists.
    ///
    /// # Errors
    ///
    /// Returns an error for any failure other than a duplicate key.
    fn promote(&mut self, assignment: &ProvisionalAssignment) -> Result<bool, Self::Error>;

    /// Overwrites the summary for `(mission, date)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the summary cannot be written.
    fn write_status_summary(&mut self, summary: &StatusSummary) -> Result<(), Self::Error>;

    /// Stored summaries of a mission, in date order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn status_summaries(&mut self, mission_id: MissionId)
    -> Result<Vec<StatusSummary>, Self::Error>;
}

/// Single-writer guard for a named batch process.
pub trait RunLease {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Starts a run unless one is active. Returns `false` on refusal.
    ///
    /// # Errors
    ///
    /// Returns an error if the run log cannot be read or written.
    fn try_acquire(&mut self, process: &str) -> Result<bool, Self::Error>;

    /// Records the end of the current run.
    ///
    /// # Errors
    ///
    /// Returns an error if the run log cannot be written.
    fn release(&mut self, process: &str, succeeded: bool) -> Result<(), Self::Error>;

    /// # Errors
    ///
    /// Returns an error if the run log cannot be read.
    fn active_run(&mut self, process: &str) -> Result<bool, Self::Error>;
}
