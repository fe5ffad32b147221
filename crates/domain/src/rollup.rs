// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Required versus assigned headcount per mission day.

use crate::mission::{Mission, MissionDay};
use crate::records::{ProvisionalAssignment, RoleCount, StatusSummary};
use crate::types::Role;

/// Builds the status summary for one mission day.
///
/// Required counts sum every band of the day. Roles the mission does not
/// need report zero required. A role appears when it is required or when
/// someone is assigned to it.
#[must_use]
pub fn summarize_day(
    mission: &Mission,
    day: &MissionDay,
    provisional: &[ProvisionalAssignment],
) -> StatusSummary {
    let roles = Role::ALL
        .iter()
        .filter_map(|role| {
            let required = if mission.requires_role(*role) {
                day.required_for(*role)
            } else {
                0
            };
            let assigned = provisional
                .iter()
                .filter(|a| {
                    a.key.mission_id == mission.mission_id
                        && a.key.date == day.date
                        && a.key.role == *role
                })
                .count();
            let assigned = u32::try_from(assigned).unwrap_or(u32::MAX);

            (required > 0 || assigned > 0).then_some(RoleCount {
                role: *role,
                required,
                assigned,
            })
        })
        .collect();

    StatusSummary {
        mission_id: mission.mission_id,
        date: day.date,
        roles,
    }
}

/// Summaries for every day of the mission, in date order.
#[must_use]
pub fn summarize_mission(
    mission: &Mission,
    provisional: &[ProvisionalAssignment],
) -> Vec<StatusSummary> {
    let mut days: Vec<&MissionDay> = mission.days.iter().collect();
    days.sort_by_key(|d| d.date);
    days.dedup_by_key(|d| d.date);
    days.into_iter()
        .map(|day| summarize_day(mission, day, provisional))
        .collect()
}
