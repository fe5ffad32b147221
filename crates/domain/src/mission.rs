// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{
    DisciplineCode, ExecutionType, MissionId, MissionStatus, RegionCode, Role, SlotKey,
    SpecimenCounts, SportCode, TimeBand, iso_date,
};
use serde::{Deserialize, Serialize};
use time::Date;

/// Required headcount for one role in one band of a mission day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRequirement {
    pub role: Role,
    pub band: TimeBand,
    pub required: u32,
}

/// One testing date of a mission and its slot requirements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionDay {
    #[serde(with = "iso_date")]
    pub date: Date,
    pub requirements: Vec<SlotRequirement>,
}

impl MissionDay {
    /// Total required headcount for a role across all bands of the day.
    #[must_use]
    pub fn required_for(&self, role: Role) -> u32 {
        self.requirements
            .iter()
            .filter(|r| r.role == role)
            .map(|r| r.required)
            .sum()
    }

    /// Required headcount for one exact slot.
    #[must_use]
    pub fn required_for_slot(&self, role: Role, band: TimeBand) -> u32 {
        self.requirements
            .iter()
            .filter(|r| r.role == role && r.band == band)
            .map(|r| r.required)
            .sum()
    }
}

/// A scheduled inspection event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mission {
    pub mission_id: MissionId,
    pub status: MissionStatus,
    pub execution: ExecutionType,
    pub venue_region: RegionCode,
    pub sport: SportCode,
    pub discipline: DisciplineCode,
    /// Discipline-type code used as the last mission queue key.
    pub discipline_type_code: u32,
    /// Lower values are staffed earlier when other keys tie.
    pub language_priority: u32,
    pub accepts_trainees: bool,
    pub specimens: SpecimenCounts,
    pub days: Vec<MissionDay>,
}

impl Mission {
    /// The earliest testing date, if the mission has any days.
    #[must_use]
    pub fn start_date(&self) -> Option<Date> {
        self.days.iter().map(|d| d.date).min()
    }

    /// The latest testing date, if the mission has any days.
    #[must_use]
    pub fn end_date(&self) -> Option<Date> {
        self.days.iter().map(|d| d.date).max()
    }

    /// Number of distinct testing dates.
    #[must_use]
    pub fn duration_days(&self) -> u32 {
        let mut dates: Vec<Date> = self.days.iter().map(|d| d.date).collect();
        dates.sort_unstable();
        dates.dedup();
        u32::try_from(dates.len()).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn is_multi_day(&self) -> bool {
        self.duration_days() > 1
    }

    /// Testing dates in ascending order.
    #[must_use]
    pub fn dates(&self) -> Vec<Date> {
        let mut dates: Vec<Date> = self.days.iter().map(|d| d.date).collect();
        dates.sort_unstable();
        dates.dedup();
        dates
    }

    #[must_use]
    pub fn day(&self, date: Date) -> Option<&MissionDay> {
        self.days.iter().find(|d| d.date == date)
    }

    /// Whether the mission's sample plan and trainee flag call for this role at all.
    #[must_use]
    pub const fn requires_role(&self, role: Role) -> bool {
        match role {
            Role::Trainee => self.accepts_trainees,
            Role::BloodCollector => self.specimens.needs_blood_collection(),
            Role::LeadInspector | Role::AreaCoordinator | Role::Inspector => true,
        }
    }

    /// Every slot that needs staffing, in processing order: by date, then
    /// role, then band. Slots with zero headcount or unneeded roles are omitted.
    #[must_use]
    pub fn slots(&self) -> Vec<(SlotKey, u32)> {
        let mut slots: Vec<(SlotKey, u32)> = Vec::new();
        for day in &self.days {
            for requirement in &day.requirements {
                if requirement.required == 0 || !self.requires_role(requirement.role) {
                    continue;
                }
                let key = SlotKey::new(self.mission_id, day.date, requirement.band, requirement.role);
                match slots.iter_mut().find(|(k, _)| *k == key) {
                    Some((_, required)) => *required += requirement.required,
                    None => slots.push((key, requirement.required)),
                }
            }
        }
        slots.sort_by(|(a, _), (b, _)| {
            a.date
                .cmp(&b.date)
                .then(a.role.cmp(&b.role))
                .then(a.band.cmp(&b.band))
        });
        slots
    }

    /// Moves the mission to a new status.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is not allowed.
    pub fn transition_to(&mut self, target: MissionStatus) -> Result<(), DomainError> {
        if !self.status.can_transition_to(target) {
            return Err(DomainError::InvalidStatusTransition {
                mission_id: self.mission_id,
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        Ok(())
    }
}
