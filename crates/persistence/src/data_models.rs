// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row models and their conversions to and from domain values.
//!
//! Dates are ISO `YYYY-MM-DD` text, enums are their text names and flags
//! are 0/1 integers. Condition sets are stored as JSON.

use crate::diesel_schema::{
    assignment_history, assignment_status, availability, mission_requirements, missions,
    provisional_assignments, selection_records, workers,
};
use crate::error::PersistenceError;
use diesel::prelude::*;
use num_traits::ToPrimitive;
use staffing_domain::{
    AvailabilityRecord, BandSet, ConditionSet, DisciplineCode, ExecutionType, Gender,
    HistoryEntry, Mission, MissionDay, MissionId, MissionStatus, ProvisionalAssignment, Rank,
    RegionCode, Role, RoleEligibility, SelectionRecord, SlotKey, SlotRequirement,
    SpecimenCounts, SportCode, TimeBand, Worker, WorkerId, format_date, parse_date,
};
use std::collections::BTreeSet;

pub(crate) fn flag(value: bool) -> i32 {
    i32::from(value)
}

pub(crate) const fn is_set(value: i32) -> bool {
    value != 0
}

pub(crate) fn to_column(value: u32, field: &'static str) -> Result<i32, PersistenceError> {
    value
        .to_i32()
        .ok_or(PersistenceError::ValueOutOfRange { field })
}

pub(crate) fn from_column(value: i32, table: &'static str) -> Result<u32, PersistenceError> {
    value
        .to_u32()
        .ok_or_else(|| PersistenceError::invalid(table, format!("negative count {value}")))
}

pub(crate) fn date_text(date: time::Date) -> Result<String, PersistenceError> {
    Ok(format_date(date)?)
}

fn read_date(text: &str, table: &'static str) -> Result<time::Date, PersistenceError> {
    parse_date(text).map_err(|e| PersistenceError::invalid(table, e))
}

fn read<T>(text: &str, table: &'static str) -> Result<T, PersistenceError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    text.parse::<T>()
        .map_err(|e| PersistenceError::invalid(table, e))
}

fn read_conditions(json: &str, table: &'static str) -> Result<ConditionSet, PersistenceError> {
    serde_json::from_str(json).map_err(|e| PersistenceError::invalid(table, e))
}

fn slot_key(
    mission_id: i64,
    date: &str,
    band: &str,
    role: &str,
    table: &'static str,
) -> Result<SlotKey, PersistenceError> {
    Ok(SlotKey::new(
        MissionId::new(mission_id),
        read_date(date, table)?,
        read::<TimeBand>(band, table)?,
        read::<Role>(role, table)?,
    ))
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = missions)]
pub struct MissionRow {
    pub mission_id: i64,
    pub status: String,
    pub execution_type: String,
    pub venue_region: String,
    pub sport_code: String,
    pub discipline_code: String,
    pub discipline_type_code: i32,
    pub language_priority: i32,
    pub accepts_trainees: i32,
    pub urine_count: i32,
    pub blood_count: i32,
    pub dried_blood_spot_count: i32,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = mission_requirements)]
pub struct RequirementRow {
    pub mission_date: String,
    pub role: String,
    pub band: String,
    pub required: i32,
}

impl MissionRow {
    /// Assembles the mission from its row, its dates and its requirements.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored value is not a valid domain value.
    pub fn into_mission(
        self,
        dates: &[String],
        requirements: &[RequirementRow],
    ) -> Result<Mission, PersistenceError> {
        const TABLE: &str = "missions";

        let mut days: Vec<MissionDay> = Vec::with_capacity(dates.len());
        for date in dates {
            let mut day = MissionDay {
                date: read_date(date, TABLE)?,
                requirements: Vec::new(),
            };
            for requirement in requirements.iter().filter(|r| r.mission_date == *date) {
                day.requirements.push(SlotRequirement {
                    role: read(&requirement.role, "mission_requirements")?,
                    band: read(&requirement.band, "mission_requirements")?,
                    required: from_column(requirement.required, "mission_requirements")?,
                });
            }
            days.push(day);
        }
        days.sort_by_key(|d| d.date);

        Ok(Mission {
            mission_id: MissionId::new(self.mission_id),
            status: read::<MissionStatus>(&self.status, TABLE)?,
            execution: read::<ExecutionType>(&self.execution_type, TABLE)?,
            venue_region: RegionCode::new(&self.venue_region)?,
            sport: SportCode::new(&self.sport_code)?,
            discipline: DisciplineCode::new(&self.discipline_code)?,
            discipline_type_code: from_column(self.discipline_type_code, TABLE)?,
            language_priority: from_column(self.language_priority, TABLE)?,
            accepts_trainees: is_set(self.accepts_trainees),
            specimens: SpecimenCounts {
                urine: from_column(self.urine_count, TABLE)?,
                blood: from_column(self.blood_count, TABLE)?,
                dried_blood_spot: from_column(self.dried_blood_spot_count, TABLE)?,
            },
            days,
        })
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = workers)]
pub struct WorkerRow {
    pub worker_id: i64,
    pub rank: String,
    pub gender: String,
    pub home_region: String,
    pub certification_number: i64,
    pub lead_inspector: i32,
    pub area_coordinator: i32,
    pub inspector: i32,
    pub blood_collector: i32,
    pub trainee: i32,
}

impl WorkerRow {
    /// # Errors
    ///
    /// Returns an error if a stored value is not a valid domain value.
    pub fn into_worker(self, conflicts: BTreeSet<SportCode>) -> Result<Worker, PersistenceError> {
        const TABLE: &str = "workers";
        Ok(Worker {
            worker_id: WorkerId::new(self.worker_id),
            rank: read::<Rank>(&self.rank, TABLE)?,
            gender: read::<Gender>(&self.gender, TABLE)?,
            eligibility: RoleEligibility {
                lead_inspector: is_set(self.lead_inspector),
                area_coordinator: is_set(self.area_coordinator),
                inspector: is_set(self.inspector),
                blood_collector: is_set(self.blood_collector),
                trainee: is_set(self.trainee),
            },
            home_region: RegionCode::new(&self.home_region)?,
            certification_number: self.certification_number.to_u64().ok_or_else(|| {
                PersistenceError::invalid(TABLE, "negative certification number")
            })?,
            conflicts,
        })
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = availability)]
pub struct AvailabilityRow {
    pub worker_id: i64,
    pub available_date: String,
    pub whole_day: i32,
    pub early: i32,
    pub morning: i32,
    pub afternoon: i32,
    pub evening: i32,
    pub opted_out: i32,
}

impl TryFrom<AvailabilityRow> for AvailabilityRecord {
    type Error = PersistenceError;

    fn try_from(row: AvailabilityRow) -> Result<Self, Self::Error> {
        Ok(Self {
            worker_id: WorkerId::new(row.worker_id),
            date: read_date(&row.available_date, "availability")?,
            bands: BandSet {
                whole_day: is_set(row.whole_day),
                early: is_set(row.early),
                morning: is_set(row.morning),
                afternoon: is_set(row.afternoon),
                evening: is_set(row.evening),
            },
            opted_out: is_set(row.opted_out),
        })
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = assignment_history)]
pub struct HistoryRow {
    pub worker_id: i64,
    pub mission_id: i64,
    pub worked_date: String,
    pub sport_code: String,
    pub discipline_code: String,
}

impl TryFrom<HistoryRow> for HistoryEntry {
    type Error = PersistenceError;

    fn try_from(row: HistoryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            worker_id: WorkerId::new(row.worker_id),
            mission_id: MissionId::new(row.mission_id),
            date: read_date(&row.worked_date, "assignment_history")?,
            sport: SportCode::new(&row.sport_code)?,
            discipline: DisciplineCode::new(&row.discipline_code)?,
        })
    }
}

#[derive(Debug, Queryable, Selectable, Insertable)]
#[diesel(table_name = selection_records)]
pub struct SelectionRow {
    pub mission_id: i64,
    pub slot_date: String,
    pub band: String,
    pub role: String,
    pub worker_id: i64,
    pub strong_candidate: i32,
    pub condition_score: i32,
    pub conditions_json: String,
    pub rank_position: i32,
    pub quota_bucket: Option<String>,
}

impl TryFrom<&SelectionRecord> for SelectionRow {
    type Error = PersistenceError;

    fn try_from(record: &SelectionRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            mission_id: record.key.mission_id.value(),
            slot_date: date_text(record.key.date)?,
            band: record.key.band.as_str().to_string(),
            role: record.key.role.as_str().to_string(),
            worker_id: record.worker_id.value(),
            strong_candidate: flag(record.strong_candidate),
            condition_score: to_column(record.condition_score, "condition_score")?,
            conditions_json: serde_json::to_string(&record.conditions)?,
            rank_position: to_column(record.rank_position, "rank_position")?,
            quota_bucket: record.quota_bucket.clone(),
        })
    }
}

impl TryFrom<SelectionRow> for SelectionRecord {
    type Error = PersistenceError;

    fn try_from(row: SelectionRow) -> Result<Self, Self::Error> {
        const TABLE: &str = "selection_records";
        Ok(Self {
            key: slot_key(row.mission_id, &row.slot_date, &row.band, &row.role, TABLE)?,
            worker_id: WorkerId::new(row.worker_id),
            strong_candidate: is_set(row.strong_candidate),
            condition_score: from_column(row.condition_score, TABLE)?,
            conditions: read_conditions(&row.conditions_json, TABLE)?,
            rank_position: from_column(row.rank_position, TABLE)?,
            quota_bucket: row.quota_bucket,
        })
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = provisional_assignments)]
pub struct ProvisionalRow {
    pub mission_id: i64,
    pub slot_date: String,
    pub band: String,
    pub role: String,
    pub worker_id: i64,
    pub strong_candidate: i32,
    pub condition_score: i32,
    pub conditions_json: String,
}

impl TryFrom<ProvisionalRow> for ProvisionalAssignment {
    type Error = PersistenceError;

    fn try_from(row: ProvisionalRow) -> Result<Self, Self::Error> {
        const TABLE: &str = "provisional_assignments";
        Ok(Self {
            key: slot_key(row.mission_id, &row.slot_date, &row.band, &row.role, TABLE)?,
            worker_id: WorkerId::new(row.worker_id),
            strong_candidate: is_set(row.strong_candidate),
            condition_score: from_column(row.condition_score, TABLE)?,
            conditions: read_conditions(&row.conditions_json, TABLE)?,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = provisional_assignments)]
pub struct NewProvisionalRow {
    pub mission_id: i64,
    pub slot_date: String,
    pub band: String,
    pub role: String,
    pub worker_id: i64,
    pub strong_candidate: i32,
    pub condition_score: i32,
    pub conditions_json: String,
}

impl TryFrom<&ProvisionalAssignment> for NewProvisionalRow {
    type Error = PersistenceError;

    fn try_from(assignment: &ProvisionalAssignment) -> Result<Self, Self::Error> {
        Ok(Self {
            mission_id: assignment.key.mission_id.value(),
            slot_date: date_text(assignment.key.date)?,
            band: assignment.key.band.as_str().to_string(),
            role: assignment.key.role.as_str().to_string(),
            worker_id: assignment.worker_id.value(),
            strong_candidate: flag(assignment.strong_candidate),
            condition_score: to_column(assignment.condition_score, "condition_score")?,
            conditions_json: serde_json::to_string(&assignment.conditions)?,
        })
    }
}

#[derive(Debug, Queryable, Selectable, Insertable)]
#[diesel(table_name = assignment_status)]
pub struct StatusRow {
    pub mission_id: i64,
    pub status_date: String,
    pub role: String,
    pub required: i32,
    pub assigned: i32,
}

/// A parsed assignment-status row: `(date, role, required, assigned)`.
pub type StatusEntry = (time::Date, Role, u32, u32);

impl StatusRow {
    /// # Errors
    ///
    /// Returns an error if a stored value is not a valid domain value.
    pub fn parse(&self) -> Result<StatusEntry, PersistenceError> {
        const TABLE: &str = "assignment_status";
        Ok((
            read_date(&self.status_date, TABLE)?,
            read::<Role>(&self.role, TABLE)?,
            from_column(self.required, TABLE)?,
            from_column(self.assigned, TABLE)?,
        ))
    }
}
