// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! An in-process store.
//!
//! Clones share state, so several threads can drive the same store. Every
//! operation takes the lock once, which makes each call atomic.

use crate::repository::{RunLease, StaffingRepository};
use staffing_domain::{
    AvailabilityRecord, BookedSlot, HistoryEntry, Mission, MissionId, ProvisionalAssignment,
    RegionCode, Role, RunState, SelectionRecord, SlotKey, StagingPlan, StatusSummary, TimeBand,
    Worker, WorkerId, run_may_start,
};
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use time::Date;

#[derive(Debug, Default)]
struct MemoryState {
    missions: BTreeMap<MissionId, Mission>,
    workers: BTreeMap<WorkerId, Worker>,
    availability: BTreeMap<(WorkerId, Date), AvailabilityRecord>,
    region_priorities: BTreeMap<(RegionCode, RegionCode), u32>,
    history: Vec<HistoryEntry>,
    selections: BTreeMap<(SlotKey, WorkerId), SelectionRecord>,
    provisional: BTreeMap<(WorkerId, SlotKey), ProvisionalAssignment>,
    summaries: BTreeMap<(MissionId, Date), StatusSummary>,
    runs: Vec<(String, RunState)>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Inserts or replaces a mission.
    pub fn insert_mission(&self, mission: Mission) {
        self.lock().missions.insert(mission.mission_id, mission);
    }

    pub fn insert_worker(&self, worker: Worker) {
        self.lock().workers.insert(worker.worker_id, worker);
    }

    /// Inserts or replaces the record for `(worker, date)`.
    pub fn insert_availability(&self, record: AvailabilityRecord) {
        self.lock()
            .availability
            .insert((record.worker_id, record.date), record);
    }

    pub fn remove_availability(&self, worker_id: WorkerId, date: Date) {
        self.lock().availability.remove(&(worker_id, date));
    }

    pub fn insert_region_priority(&self, venue: RegionCode, home: RegionCode, rank: u32) {
        self.lock().region_priorities.insert((venue, home), rank);
    }

    pub fn insert_history(&self, entry: HistoryEntry) {
        self.lock().history.push(entry);
    }

    /// The recorded run states for a process, oldest first.
    #[must_use]
    pub fn run_log(&self, process: &str) -> Vec<RunState> {
        self.lock()
            .runs
            .iter()
            .filter(|(name, _)| name == process)
            .map(|(_, state)| *state)
            .collect()
    }

    fn latest_run(state: &MemoryState, process: &str) -> Option<RunState> {
        state
            .runs
            .iter()
            .rev()
            .find(|(name, _)| name == process)
            .map(|(_, s)| *s)
    }
}

impl StaffingRepository for InMemoryRepository {
    type Error = Infallible;

    fn staffing_candidates(&mut self) -> Result<Vec<Mission>, Infallible> {
        Ok(self.lock().missions.values().cloned().collect())
    }

    fn mission(&mut self, mission_id: MissionId) -> Result<Option<Mission>, Infallible> {
        Ok(self.lock().missions.get(&mission_id).cloned())
    }

    fn eligible_workers(
        &mut self,
        _mission_id: MissionId,
        role: Role,
    ) -> Result<Vec<Worker>, Infallible> {
        Ok(self
            .lock()
            .workers
            .values()
            .filter(|w| w.eligibility.allows(role))
            .cloned()
            .collect())
    }

    fn availability(
        &mut self,
        worker_id: WorkerId,
        date: Date,
    ) -> Result<Option<AvailabilityRecord>, Infallible> {
        Ok(self.lock().availability.get(&(worker_id, date)).copied())
    }

    fn availability_on(&mut self, date: Date) -> Result<Vec<AvailabilityRecord>, Infallible> {
        Ok(self
            .lock()
            .availability
            .values()
            .filter(|a| a.date == date)
            .copied()
            .collect())
    }

    fn region_priority(
        &mut self,
        venue: &RegionCode,
        home: &RegionCode,
    ) -> Result<Option<u32>, Infallible> {
        Ok(self
            .lock()
            .region_priorities
            .get(&(venue.clone(), home.clone()))
            .copied())
    }

    fn assignment_history(
        &mut self,
        worker_id: WorkerId,
        from: Date,
        to: Date,
    ) -> Result<Vec<HistoryEntry>, Infallible> {
        let mut entries: Vec<HistoryEntry> = self
            .lock()
            .history
            .iter()
            .filter(|h| h.worker_id == worker_id && h.date >= from && h.date <= to)
            .cloned()
            .collect();
        entries.sort_by_key(|h| (h.date, h.mission_id));
        Ok(entries)
    }

    fn provisional_assignments(
        &mut self,
        mission_id: MissionId,
        date: Option<Date>,
        band: Option<TimeBand>,
        role: Option<Role>,
    ) -> Result<Vec<ProvisionalAssignment>, Infallible> {
        let mut rows: Vec<ProvisionalAssignment> = self
            .lock()
            .provisional
            .values()
            .filter(|a| {
                a.key.mission_id == mission_id
                    && date.is_none_or(|d| a.key.date == d)
                    && band.is_none_or(|b| a.key.band == b)
                    && role.is_none_or(|r| a.key.role == r)
            })
            .cloned()
            .collect();
        rows.sort_by_key(|a| (a.key, a.worker_id));
        Ok(rows)
    }

    fn worker_provisional_assignments(
        &mut self,
        worker_id: WorkerId,
        from: Date,
        to: Date,
    ) -> Result<Vec<BookedSlot>, Infallible> {
        let state = self.lock();
        Ok(state
            .provisional
            .values()
            .filter(|a| a.worker_id == worker_id && a.key.date >= from && a.key.date <= to)
            .filter_map(|a| {
                state.missions.get(&a.key.mission_id).map(|m| BookedSlot {
                    mission_id: a.key.mission_id,
                    date: a.key.date,
                    band: a.key.band,
                    execution: m.execution,
                })
            })
            .collect())
    }

    fn staged_selections(&mut self, key: &SlotKey) -> Result<Vec<SelectionRecord>, Infallible> {
        Ok(self
            .lock()
            .selections
            .iter()
            .filter(|((k, _), _)| k == key)
            .map(|(_, row)| row.clone())
            .collect())
    }

    fn delete_selections(
        &mut self,
        key: &SlotKey,
        workers: &[WorkerId],
    ) -> Result<(), Infallible> {
        let mut state = self.lock();
        for worker_id in workers {
            state.selections.remove(&(*key, *worker_id));
        }
        Ok(())
    }

    fn insert_selections(&mut self, rows: &[SelectionRecord]) -> Result<(), Infallible> {
        let mut state = self.lock();
        for row in rows {
            state.selections.insert((row.key, row.worker_id), row.clone());
        }
        Ok(())
    }

    fn apply_staging(&mut self, key: &SlotKey, plan: &StagingPlan) -> Result<(), Infallible> {
        let mut state = self.lock();
        for worker_id in &plan.delete {
            state.selections.remove(&(*key, *worker_id));
        }
        for row in &plan.insert {
            state.selections.insert((row.key, row.worker_id), row.clone());
        }
        Ok(())
    }

    fn promote(&mut self, assignment: &ProvisionalAssignment) -> Result<bool, Infallible> {
        let mut state = self.lock();
        let unique_key = assignment.unique_key();
        if state.provisional.contains_key(&unique_key) {
            return Ok(false);
        }
        state.provisional.insert(unique_key, assignment.clone());
        Ok(true)
    }

    fn write_status_summary(&mut self, summary: &StatusSummary) -> Result<(), Infallible> {
        self.lock()
            .summaries
            .insert((summary.mission_id, summary.date), summary.clone());
        Ok(())
    }

    fn status_summaries(
        &mut self,
        mission_id: MissionId,
    ) -> Result<Vec<StatusSummary>, Infallible> {
        Ok(self
            .lock()
            .summaries
            .values()
            .filter(|s| s.mission_id == mission_id)
            .cloned()
            .collect())
    }
}

impl RunLease for InMemoryRepository {
    type Error = Infallible;

    fn try_acquire(&mut self, process: &str) -> Result<bool, Infallible> {
        let mut state = self.lock();
        if !run_may_start(Self::latest_run(&state, process)) {
            return Ok(false);
        }
        state.runs.push((process.to_string(), RunState::Requested));
        state.runs.push((process.to_string(), RunState::Started));
        Ok(true)
    }

    fn release(&mut self, process: &str, succeeded: bool) -> Result<(), Infallible> {
        let state = if succeeded {
            RunState::Finished
        } else {
            RunState::Failed
        };
        self.lock().runs.push((process.to_string(), state));
        Ok(())
    }

    fn active_run(&mut self, process: &str) -> Result<bool, Infallible> {
        Ok(!run_may_start(Self::latest_run(&self.lock(), process)))
    }
}
