// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Engine boundary implementations.

use crate::error::PersistenceError;
use crate::{Persistence, mutations, queries};
use staffing::{RunLease, StaffingRepository};
use staffing_domain::{
    AvailabilityRecord, BookedSlot, HistoryEntry, Mission, MissionId, MissionStatus,
    ProvisionalAssignment, RegionCode, Role, RunState, SelectionRecord, SlotKey, StagingPlan,
    StatusSummary, TimeBand, Worker, WorkerId, run_may_start,
};
use time::Date;

impl StaffingRepository for Persistence {
    type Error = PersistenceError;

    /// Ready missions only; other statuses are never queued.
    fn staffing_candidates(&mut self) -> Result<Vec<Mission>, PersistenceError> {
        queries::missions::list_missions_by_status(&mut self.conn, MissionStatus::Ready)
    }

    fn mission(&mut self, mission_id: MissionId) -> Result<Option<Mission>, PersistenceError> {
        queries::missions::get_mission(&mut self.conn, mission_id)
    }

    fn eligible_workers(
        &mut self,
        _mission_id: MissionId,
        role: Role,
    ) -> Result<Vec<Worker>, PersistenceError> {
        queries::workers::list_workers_for_role(&mut self.conn, role)
    }

    fn availability(
        &mut self,
        worker_id: WorkerId,
        date: Date,
    ) -> Result<Option<AvailabilityRecord>, PersistenceError> {
        queries::workers::get_availability(&mut self.conn, worker_id, date)
    }

    fn availability_on(&mut self, date: Date) -> Result<Vec<AvailabilityRecord>, PersistenceError> {
        queries::workers::list_availability_on(&mut self.conn, date)
    }

    fn region_priority(
        &mut self,
        venue: &RegionCode,
        home: &RegionCode,
    ) -> Result<Option<u32>, PersistenceError> {
        queries::workers::get_region_priority(&mut self.conn, venue, home)
    }

    fn assignment_history(
        &mut self,
        worker_id: WorkerId,
        from: Date,
        to: Date,
    ) -> Result<Vec<HistoryEntry>, PersistenceError> {
        queries::workers::list_history(&mut self.conn, worker_id, from, to)
    }

    fn provisional_assignments(
        &mut self,
        mission_id: MissionId,
        date: Option<Date>,
        band: Option<TimeBand>,
        role: Option<Role>,
    ) -> Result<Vec<ProvisionalAssignment>, PersistenceError> {
        queries::assignments::list_provisional(&mut self.conn, mission_id, date, band, role)
    }

    fn worker_provisional_assignments(
        &mut self,
        worker_id: WorkerId,
        from: Date,
        to: Date,
    ) -> Result<Vec<BookedSlot>, PersistenceError> {
        queries::assignments::list_worker_bookings(&mut self.conn, worker_id, from, to)
    }

    fn staged_selections(
        &mut self,
        key: &SlotKey,
    ) -> Result<Vec<SelectionRecord>, PersistenceError> {
        queries::assignments::list_selections(&mut self.conn, key)
    }

    fn delete_selections(
        &mut self,
        key: &SlotKey,
        workers: &[WorkerId],
    ) -> Result<(), PersistenceError> {
        mutations::staffing::delete_selections(&mut self.conn, key, workers).map(|_| ())
    }

    fn insert_selections(&mut self, rows: &[SelectionRecord]) -> Result<(), PersistenceError> {
        mutations::staffing::insert_selections(&mut self.conn, rows).map(|_| ())
    }

    fn apply_staging(&mut self, key: &SlotKey, plan: &StagingPlan) -> Result<(), PersistenceError> {
        mutations::staffing::apply_staging_plan(&mut self.conn, key, plan)
    }

    fn promote(&mut self, assignment: &ProvisionalAssignment) -> Result<bool, PersistenceError> {
        mutations::staffing::insert_provisional(&mut self.conn, assignment)
    }

    fn write_status_summary(&mut self, summary: &StatusSummary) -> Result<(), PersistenceError> {
        mutations::staffing::replace_status_summary(&mut self.conn, summary)
    }

    fn status_summaries(
        &mut self,
        mission_id: MissionId,
    ) -> Result<Vec<StatusSummary>, PersistenceError> {
        queries::assignments::list_status_summaries(&mut self.conn, mission_id)
    }
}

impl RunLease for Persistence {
    type Error = PersistenceError;

    fn try_acquire(&mut self, process: &str) -> Result<bool, PersistenceError> {
        mutations::runs::start_run(&mut self.conn, process)
    }

    fn release(&mut self, process: &str, succeeded: bool) -> Result<(), PersistenceError> {
        let state = if succeeded {
            RunState::Finished
        } else {
            RunState::Failed
        };
        mutations::runs::append_run_state(&mut self.conn, process, state)
    }

    fn active_run(&mut self, process: &str) -> Result<bool, PersistenceError> {
        Ok(!run_may_start(queries::runs::latest_run_state(
            &mut self.conn,
            process,
        )?))
    }
}
