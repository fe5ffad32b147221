// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use crate::{
    DisciplineCode, ExecutionType, Mission, MissionDay, MissionId, MissionStatus, RegionCode, Role,
    SlotRequirement, SpecimenCounts, SportCode, TimeBand,
};
use time::Date;

/// A ready in-competition SWIM / AQUATICS mission needing two inspectors a day.
pub fn create_test_mission(id: i64, dates: &[Date]) -> Mission {
    Mission {
        mission_id: MissionId::new(id),
        status: MissionStatus::Ready,
        execution: ExecutionType::InCompetition,
        venue_region: RegionCode::new("KANTO").unwrap(),
        sport: SportCode::new("SWIM").unwrap(),
        discipline: DisciplineCode::new("AQUATICS").unwrap(),
        discipline_type_code: 1,
        language_priority: 1,
        accepts_trainees: false,
        specimens: SpecimenCounts {
            urine: 4,
            blood: 0,
            dried_blood_spot: 0,
        },
        days: dates
            .iter()
            .map(|date| MissionDay {
                date: *date,
                requirements: vec![SlotRequirement {
                    role: Role::Inspector,
                    band: TimeBand::WholeDay,
                    required: 2,
                }],
            })
            .collect(),
    }
}
