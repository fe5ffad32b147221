// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Conflict and fairness filters applied to each pool member.
//!
//! ## Filters
//!
//! - **Continuous duty**: the longest run of consecutive worked days in the
//!   window, counting the candidate date, must not exceed the configured
//!   limit. Rejects.
//! - **Adjacent mission**: no provisional assignment on a different,
//!   conflict-relevant mission in the neighbouring day (whole-day slots) or
//!   neighbouring band (banded slots, wrapping across midnight). Rejects.
//! - **Prior experience**: at least one earlier assignment sharing the sport
//!   or discipline family. Recorded only; never rejects.
//! - **Participation ratio**: enough fully-available days within the
//!   mission's dates. Opted-out days do not count for roles that honour
//!   opt-out. Rejects on multi-day missions, recorded otherwise.
//!
//! Region priority is appended as a fifth, non-filter condition so the
//! audit trail shows whether the geographic bonus applied.

use crate::error::DomainError;
use crate::mission::Mission;
use crate::records::{ConditionKind, ConditionSet};
use crate::types::{ExecutionType, MissionId, SlotKey, TimeBand, iso_date};
use crate::worker::{AvailabilityRecord, HistoryEntry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use time::{Date, Duration};

/// Limit on consecutive working days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContinuousDutyLimit {
    /// Longest allowed run of consecutive working days.
    pub max_consecutive_days: u32,
    /// Days on either side of the candidate date that are considered.
    pub window_days: u32,
}

impl Default for ContinuousDutyLimit {
    fn default() -> Self {
        Self {
            max_consecutive_days: 5,
            window_days: 7,
        }
    }
}

/// Which earlier assignments count as relevant experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceScope {
    /// Same sport as the mission (lead inspectors).
    SameSport,
    /// Same discipline family (other senior roles).
    SameDiscipline,
}

/// A provisional assignment a worker already holds, with the type of its mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedSlot {
    pub mission_id: MissionId,
    #[serde(with = "iso_date")]
    pub date: Date,
    pub band: TimeBand,
    pub execution: ExecutionType,
}

/// Computes the inclusive date window around `date`.
///
/// # Errors
///
/// Returns an error if the window leaves the supported date range.
pub fn duty_window(date: Date, window_days: u32) -> Result<(Date, Date), DomainError> {
    let span = Duration::days(i64::from(window_days));
    let from = date
        .checked_sub(span)
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("subtracting {window_days} days from {date}"),
        })?;
    let to = date
        .checked_add(span)
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("adding {window_days} days to {date}"),
        })?;
    Ok((from, to))
}

/// Length of the longest run of consecutive dates in `dates`.
///
/// A gap of anything other than one day starts a new run.
#[must_use]
pub fn longest_consecutive_run(dates: &BTreeSet<Date>) -> u32 {
    let mut longest: u32 = 0;
    let mut run: u32 = 0;
    let mut previous: Option<Date> = None;

    for date in dates {
        run = match previous {
            Some(p) if p.next_day() == Some(*date) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(*date);
    }

    longest
}

/// Whether adding `date` keeps the worker within the continuous-duty limit.
///
/// Only worked dates inside the limit's window are considered. Any run in
/// the window longer than the limit rejects, whether or not it touches
/// `date`.
///
/// # Errors
///
/// Returns an error if the window cannot be computed.
pub fn check_continuous_duty(
    date: Date,
    worked_dates: &[Date],
    limit: &ContinuousDutyLimit,
) -> Result<bool, DomainError> {
    let (from, to) = duty_window(date, limit.window_days)?;
    let mut dates: BTreeSet<Date> = worked_dates
        .iter()
        .copied()
        .filter(|d| *d >= from && *d <= to)
        .collect();
    dates.insert(date);

    Ok(longest_consecutive_run(&dates) <= limit.max_consecutive_days)
}

fn shift(date: Date, next_day: bool, forward: bool) -> Option<Date> {
    match (next_day, forward) {
        (false, _) => Some(date),
        (true, true) => date.next_day(),
        (true, false) => date.previous_day(),
    }
}

fn conflicts_with(key: &SlotKey, other: &BookedSlot) -> bool {
    let day_before = key.date.previous_day();
    let day_after = key.date.next_day();

    if other.date == key.date && other.band.overlaps(key.band) {
        return true;
    }

    match (key.band, other.band) {
        (TimeBand::WholeDay, _) => Some(other.date) == day_before || Some(other.date) == day_after,
        (band, TimeBand::WholeDay) => {
            (band == TimeBand::Early && Some(other.date) == day_before)
                || (band == TimeBand::Evening && Some(other.date) == day_after)
        }
        (band, other_band) => {
            let before = band
                .preceding()
                .and_then(|(b, wraps)| shift(key.date, wraps, false).map(|d| (d, b)));
            let after = band
                .following()
                .and_then(|(b, wraps)| shift(key.date, wraps, true).map(|d| (d, b)));
            Some((other.date, other_band)) == before || Some((other.date, other_band)) == after
        }
    }
}

/// Whether the worker is free of adjacent or overlapping work on other missions.
#[must_use]
pub fn check_adjacent_missions(key: &SlotKey, booked: &[BookedSlot]) -> bool {
    !booked
        .iter()
        .filter(|b| b.mission_id != key.mission_id && b.execution.is_conflict_relevant())
        .any(|b| conflicts_with(key, b))
}

/// Whether the worker has relevant experience before `date`.
#[must_use]
pub fn has_prior_experience(
    scope: ExperienceScope,
    mission: &Mission,
    history: &[HistoryEntry],
    date: Date,
) -> bool {
    history.iter().filter(|h| h.date < date).any(|h| match scope {
        ExperienceScope::SameSport => h.sport == mission.sport,
        ExperienceScope::SameDiscipline => h.discipline == mission.discipline,
    })
}

/// Minimum number of fully-available days: `ceil(days × percent / 100)`.
#[must_use]
pub fn required_participation_days(mission_days: u32, percent: u8) -> u32 {
    let scaled = u64::from(mission_days) * u64::from(percent);
    u32::try_from(scaled.div_ceil(100)).unwrap_or(u32::MAX)
}

/// Whether the worker is fully available on enough of the mission's days.
///
/// With `respect_opt_out`, a day whose record carries an opt-out remark
/// does not count.
#[must_use]
pub fn check_participation_ratio(
    mission: &Mission,
    availability: &[AvailabilityRecord],
    percent: u8,
    respect_opt_out: bool,
) -> bool {
    let dates = mission.dates();
    let fully_available = dates
        .iter()
        .filter(|date| {
            availability.iter().any(|a| {
                a.date == **date && !(respect_opt_out && a.opted_out) && a.bands.is_full_day()
            })
        })
        .count();
    let fully_available = u32::try_from(fully_available).unwrap_or(u32::MAX);
    fully_available >= required_participation_days(mission.duration_days(), percent)
}

/// Which filters apply to a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterPolicy {
    pub duty: ContinuousDutyLimit,
    pub experience: Option<ExperienceScope>,
    pub participation_percent: Option<u8>,
    /// Opted-out days do not count towards participation.
    pub respect_opt_out: bool,
}

/// Everything known about one candidate that the filters need.
#[derive(Debug, Clone, Copy)]
pub struct CandidateFacts<'a> {
    /// Dates already worked or booked, from history and provisional assignments.
    pub worked_dates: &'a [Date],
    /// Provisional assignments on other missions.
    pub booked: &'a [BookedSlot],
    pub history: &'a [HistoryEntry],
    /// Availability records covering the mission's dates.
    pub availability: &'a [AvailabilityRecord],
    pub region_rank: Option<u32>,
}

/// The recorded conditions and, if rejected, the first rejecting condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterVerdict {
    pub conditions: ConditionSet,
    pub rejected_by: Option<ConditionKind>,
}

impl FilterVerdict {
    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        self.rejected_by.is_some()
    }

    /// True when every applicable filter passed.
    #[must_use]
    pub fn is_strong(&self) -> bool {
        self.rejected_by.is_none() && self.conditions.all_filters_passed()
    }
}

/// Runs every applicable filter for one candidate and records the outcomes.
///
/// # Errors
///
/// Returns an error if a date window overflows.
pub fn evaluate_filters(
    mission: &Mission,
    key: &SlotKey,
    facts: &CandidateFacts<'_>,
    policy: &FilterPolicy,
) -> Result<FilterVerdict, DomainError> {
    let mut conditions = ConditionSet::new();
    let mut rejected_by: Option<ConditionKind> = None;

    let duty_ok = check_continuous_duty(key.date, facts.worked_dates, &policy.duty)?;
    conditions.record(ConditionKind::ContinuousDuty, duty_ok)?;
    if !duty_ok {
        rejected_by = rejected_by.or(Some(ConditionKind::ContinuousDuty));
    }

    let adjacent_ok = check_adjacent_missions(key, facts.booked);
    conditions.record(ConditionKind::AdjacentMission, adjacent_ok)?;
    if !adjacent_ok {
        rejected_by = rejected_by.or(Some(ConditionKind::AdjacentMission));
    }

    if let Some(scope) = policy.experience {
        let experienced = has_prior_experience(scope, mission, facts.history, key.date);
        conditions.record(ConditionKind::PriorExperience, experienced)?;
    }

    if let Some(percent) = policy.participation_percent {
        let participates = check_participation_ratio(
            mission,
            facts.availability,
            percent,
            policy.respect_opt_out,
        );
        conditions.record(ConditionKind::ParticipationRatio, participates)?;
        if !participates && mission.is_multi_day() {
            rejected_by = rejected_by.or(Some(ConditionKind::ParticipationRatio));
        }
    }

    conditions.record(ConditionKind::RegionPriority, facts.region_rank.is_some())?;

    Ok(FilterVerdict {
        conditions,
        rejected_by,
    })
}
