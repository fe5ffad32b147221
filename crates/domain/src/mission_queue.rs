// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mission queue ordering.
//!
//! Missions are staffed hardest-first so scarce candidates are not used up
//! by easy missions. The order is a strict total order and is recomputed
//! from scratch on every pass.
//!
//! ## Eligibility
//!
//! - Status is `Ready`
//! - The execution type requires live staffing
//! - At least one specimen quantity is non-zero
//! - The mission has at least one testing date
//!
//! ## Ordering (ascending)
//!
//! 1. Earliest start date
//! 2. Longest duration first
//! 3. Language priority
//! 4. Discipline-type code
//! 5. Mission id

use crate::mission::Mission;
use crate::types::{MissionId, MissionStatus};
use std::cmp::Ordering;

/// Whether a mission may be (re)staffed in this pass.
#[must_use]
pub fn is_queue_eligible(mission: &Mission) -> bool {
    mission.status == MissionStatus::Ready
        && mission.execution.requires_live_staffing()
        && mission.specimens.has_any()
        && !mission.days.is_empty()
}

/// Returns the ids of eligible missions in staffing order.
#[must_use]
pub fn order_missions(missions: &[Mission]) -> Vec<MissionId> {
    let mut eligible: Vec<&Mission> = missions.iter().filter(|m| is_queue_eligible(m)).collect();
    eligible.sort_by(|a, b| compare_missions(a, b));
    eligible.iter().map(|m| m.mission_id).collect()
}

fn compare_missions(a: &Mission, b: &Mission) -> Ordering {
    a.start_date()
        .cmp(&b.start_date())
        .then_with(|| b.duration_days().cmp(&a.duration_days()))
        .then_with(|| a.language_priority.cmp(&b.language_priority))
        .then_with(|| a.discipline_type_code.cmp(&b.discipline_type_code))
        .then_with(|| a.mission_id.cmp(&b.mission_id))
}
