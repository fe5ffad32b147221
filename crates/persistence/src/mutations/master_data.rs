// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Master data writes used by fixtures and the snapshot importer.
//!
//! Missions, workers, availability and region priorities replace any row
//! with the same key. History entries are appended.

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::upsert::excluded;
use staffing_domain::{
    AvailabilityRecord, HistoryEntry, Mission, MissionId, MissionStatus, RegionCode, Worker,
    WorkerId,
};
use time::Date;
use tracing::debug;

use crate::data_models::{date_text, flag, to_column};
use crate::diesel_schema::{
    assignment_history, availability, mission_days, mission_requirements, missions,
    region_priorities, worker_conflicts, workers,
};
use crate::error::PersistenceError;

/// Inserts or replaces a mission with its days and requirements.
///
/// Staged selections and provisional assignments of the mission are kept.
///
/// # Errors
///
/// Returns an error if a value does not fit its column or a write fails.
pub fn upsert_mission(
    conn: &mut SqliteConnection,
    mission: &Mission,
) -> Result<(), PersistenceError> {
    let id = mission.mission_id.value();

    conn.transaction::<_, PersistenceError, _>(|conn| {
        diesel::insert_into(missions::table)
            .values((
                missions::mission_id.eq(id),
                missions::status.eq(mission.status.as_str()),
                missions::execution_type.eq(mission.execution.as_str()),
                missions::venue_region.eq(mission.venue_region.as_str()),
                missions::sport_code.eq(mission.sport.as_str()),
                missions::discipline_code.eq(mission.discipline.as_str()),
                missions::discipline_type_code.eq(to_column(
                    mission.discipline_type_code,
                    "discipline_type_code",
                )?),
                missions::language_priority
                    .eq(to_column(mission.language_priority, "language_priority")?),
                missions::accepts_trainees.eq(flag(mission.accepts_trainees)),
                missions::urine_count.eq(to_column(mission.specimens.urine, "urine_count")?),
                missions::blood_count.eq(to_column(mission.specimens.blood, "blood_count")?),
                missions::dried_blood_spot_count.eq(to_column(
                    mission.specimens.dried_blood_spot,
                    "dried_blood_spot_count",
                )?),
            ))
            .on_conflict(missions::mission_id)
            .do_update()
            .set((
                missions::status.eq(excluded(missions::status)),
                missions::execution_type.eq(excluded(missions::execution_type)),
                missions::venue_region.eq(excluded(missions::venue_region)),
                missions::sport_code.eq(excluded(missions::sport_code)),
                missions::discipline_code.eq(excluded(missions::discipline_code)),
                missions::discipline_type_code.eq(excluded(missions::discipline_type_code)),
                missions::language_priority.eq(excluded(missions::language_priority)),
                missions::accepts_trainees.eq(excluded(missions::accepts_trainees)),
                missions::urine_count.eq(excluded(missions::urine_count)),
                missions::blood_count.eq(excluded(missions::blood_count)),
                missions::dried_blood_spot_count.eq(excluded(missions::dried_blood_spot_count)),
            ))
            .execute(conn)?;

        diesel::delete(mission_requirements::table.filter(mission_requirements::mission_id.eq(id)))
            .execute(conn)?;
        diesel::delete(mission_days::table.filter(mission_days::mission_id.eq(id)))
            .execute(conn)?;

        for day in &mission.days {
            let date = date_text(day.date)?;
            diesel::insert_into(mission_days::table)
                .values((
                    mission_days::mission_id.eq(id),
                    mission_days::mission_date.eq(&date),
                ))
                .execute(conn)?;

            for requirement in &day.requirements {
                diesel::insert_into(mission_requirements::table)
                    .values((
                        mission_requirements::mission_id.eq(id),
                        mission_requirements::mission_date.eq(&date),
                        mission_requirements::role.eq(requirement.role.as_str()),
                        mission_requirements::band.eq(requirement.band.as_str()),
                        mission_requirements::required
                            .eq(to_column(requirement.required, "required")?),
                    ))
                    .execute(conn)?;
            }
        }
        Ok(())
    })?;

    debug!(mission_id = %mission.mission_id, days = mission.days.len(), "Stored mission");
    Ok(())
}

/// Overwrites the status of a mission.
///
/// Returns `false` if the mission does not exist. Transition rules are the
/// caller's concern.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_mission_status(
    conn: &mut SqliteConnection,
    mission_id: MissionId,
    status: MissionStatus,
) -> Result<bool, PersistenceError> {
    let updated = diesel::update(missions::table.filter(missions::mission_id.eq(mission_id.value())))
        .set(missions::status.eq(status.as_str()))
        .execute(conn)?;
    Ok(updated > 0)
}

/// Inserts or replaces a worker and their declared conflicts.
///
/// # Errors
///
/// Returns an error if a value does not fit its column or a write fails.
pub fn upsert_worker(conn: &mut SqliteConnection, worker: &Worker) -> Result<(), PersistenceError> {
    let id = worker.worker_id.value();
    let certification = i64::try_from(worker.certification_number).map_err(|_| {
        PersistenceError::ValueOutOfRange {
            field: "certification_number",
        }
    })?;
    let eligibility = worker.eligibility;

    conn.transaction::<_, PersistenceError, _>(|conn| {
        diesel::insert_into(workers::table)
            .values((
                workers::worker_id.eq(id),
                workers::rank.eq(worker.rank.as_str()),
                workers::gender.eq(worker.gender.as_str()),
                workers::home_region.eq(worker.home_region.as_str()),
                workers::certification_number.eq(certification),
                workers::lead_inspector.eq(flag(eligibility.lead_inspector)),
                workers::area_coordinator.eq(flag(eligibility.area_coordinator)),
                workers::inspector.eq(flag(eligibility.inspector)),
                workers::blood_collector.eq(flag(eligibility.blood_collector)),
                workers::trainee.eq(flag(eligibility.trainee)),
            ))
            .on_conflict(workers::worker_id)
            .do_update()
            .set((
                workers::rank.eq(excluded(workers::rank)),
                workers::gender.eq(excluded(workers::gender)),
                workers::home_region.eq(excluded(workers::home_region)),
                workers::certification_number.eq(excluded(workers::certification_number)),
                workers::lead_inspector.eq(excluded(workers::lead_inspector)),
                workers::area_coordinator.eq(excluded(workers::area_coordinator)),
                workers::inspector.eq(excluded(workers::inspector)),
                workers::blood_collector.eq(excluded(workers::blood_collector)),
                workers::trainee.eq(excluded(workers::trainee)),
            ))
            .execute(conn)?;

        diesel::delete(worker_conflicts::table.filter(worker_conflicts::worker_id.eq(id)))
            .execute(conn)?;
        for sport in &worker.conflicts {
            diesel::insert_into(worker_conflicts::table)
                .values((
                    worker_conflicts::worker_id.eq(id),
                    worker_conflicts::sport_code.eq(sport.as_str()),
                ))
                .execute(conn)?;
        }
        Ok(())
    })
}

/// Inserts or replaces the availability record for `(worker, date)`.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn upsert_availability(
    conn: &mut SqliteConnection,
    record: &AvailabilityRecord,
) -> Result<(), PersistenceError> {
    diesel::replace_into(availability::table)
        .values((
            availability::worker_id.eq(record.worker_id.value()),
            availability::available_date.eq(date_text(record.date)?),
            availability::whole_day.eq(flag(record.bands.whole_day)),
            availability::early.eq(flag(record.bands.early)),
            availability::morning.eq(flag(record.bands.morning)),
            availability::afternoon.eq(flag(record.bands.afternoon)),
            availability::evening.eq(flag(record.bands.evening)),
            availability::opted_out.eq(flag(record.opted_out)),
        ))
        .execute(conn)?;
    Ok(())
}

/// Removes the availability record for `(worker, date)`, if any.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_availability(
    conn: &mut SqliteConnection,
    worker_id: WorkerId,
    date: Date,
) -> Result<(), PersistenceError> {
    diesel::delete(
        availability::table
            .filter(availability::worker_id.eq(worker_id.value()))
            .filter(availability::available_date.eq(date_text(date)?)),
    )
    .execute(conn)?;
    Ok(())
}

/// # Errors
///
/// Returns an error if the rank does not fit its column or the write fails.
pub fn upsert_region_priority(
    conn: &mut SqliteConnection,
    venue: &RegionCode,
    home: &RegionCode,
    rank: u32,
) -> Result<(), PersistenceError> {
    diesel::replace_into(region_priorities::table)
        .values((
            region_priorities::venue_region.eq(venue.as_str()),
            region_priorities::home_region.eq(home.as_str()),
            region_priorities::priority_rank.eq(to_column(rank, "priority_rank")?),
        ))
        .execute(conn)?;
    Ok(())
}

/// Appends one entry to a worker's history.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn insert_history(
    conn: &mut SqliteConnection,
    entry: &HistoryEntry,
) -> Result<(), PersistenceError> {
    diesel::insert_into(assignment_history::table)
        .values((
            assignment_history::worker_id.eq(entry.worker_id.value()),
            assignment_history::mission_id.eq(entry.mission_id.value()),
            assignment_history::worked_date.eq(date_text(entry.date)?),
            assignment_history::sport_code.eq(entry.sport.as_str()),
            assignment_history::discipline_code.eq(entry.discipline.as_str()),
        ))
        .execute(conn)?;
    Ok(())
}
