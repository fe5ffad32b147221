// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Candidate ranking for a single slot.
//!
//! Candidates are ordered by an explicit comparator chain over a
//! materialized list.
//!
//! ## Ordering Rules (ascending)
//!
//! 1. Continuity pin: workers already provisionally assigned to an earlier
//!    day of the same mission, role and band come first
//! 2. Region priority rank (lowest wins; no relation sorts last)
//! 3. Rotation count within the operating year (fewest wins)
//! 4. Certification number (lowest wins)
//!
//! The certification number is unique, so the order is total.
//!
//! In `Descending` order rules 2-4 are mirrored. Pinned candidates still lead.

use crate::error::DomainError;
use crate::records::{ConditionSet, ProvisionalAssignment};
use crate::types::{SlotKey, WorkerId};
use crate::worker::HistoryEntry;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use time::{Date, Month};

/// Direction of the non-pinned part of the ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Ranking inputs and filter outcome for one pool member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateScore {
    pub worker_id: WorkerId,
    pub pinned: bool,
    pub region_rank: Option<u32>,
    pub rotation_count: u32,
    pub certification_number: u64,
    pub strong: bool,
    pub conditions: ConditionSet,
}

/// A candidate with its 1-based position in the ranked list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedCandidate {
    pub position: u32,
    pub score: CandidateScore,
}

/// Sorts candidates and assigns positions.
#[must_use]
pub fn rank_candidates(
    mut candidates: Vec<CandidateScore>,
    direction: SortDirection,
) -> Vec<RankedCandidate> {
    candidates.sort_by(|a, b| compare_candidates(a, b, direction));
    candidates
        .into_iter()
        .zip(1_u32..)
        .map(|(score, position)| RankedCandidate { position, score })
        .collect()
}

/// Compares two candidates.
///
/// Returns `Ordering::Less` if `a` should be offered the slot before `b`.
fn compare_candidates(a: &CandidateScore, b: &CandidateScore, direction: SortDirection) -> Ordering {
    // 1. Continuity pin (pinned first, regardless of direction)
    match b.pinned.cmp(&a.pinned) {
        Ordering::Equal => {}
        decided => return decided,
    }

    // 2-4. Region rank, rotation count, certification number
    let fit = region_key(a.region_rank)
        .cmp(&region_key(b.region_rank))
        .then_with(|| a.rotation_count.cmp(&b.rotation_count))
        .then_with(|| a.certification_number.cmp(&b.certification_number));

    match direction {
        SortDirection::Ascending => fit,
        SortDirection::Descending => fit.reverse(),
    }
}

/// Absent region relations sort after every present rank.
const fn region_key(rank: Option<u32>) -> (bool, u32) {
    match rank {
        Some(value) => (false, value),
        None => (true, 0),
    }
}

/// Whether the worker already holds an earlier day of the same mission, role and band.
#[must_use]
pub fn is_continuity_pinned(
    key: &SlotKey,
    worker_id: WorkerId,
    mission_assignments: &[ProvisionalAssignment],
) -> bool {
    mission_assignments.iter().any(|a| {
        a.worker_id == worker_id
            && a.key.mission_id == key.mission_id
            && a.key.role == key.role
            && a.key.band == key.band
            && a.key.date < key.date
    })
}

/// The inclusive bounds of the operating year containing `date`.
///
/// # Errors
///
/// Returns an error if the bounds fall outside the supported date range.
pub fn operating_year_bounds(date: Date, start_month: Month) -> Result<(Date, Date), DomainError> {
    let start_year = if date.month() as u8 >= start_month as u8 {
        date.year()
    } else {
        date.year() - 1
    };

    let start = Date::from_calendar_date(start_year, start_month, 1).map_err(|e| {
        DomainError::DateArithmeticOverflow {
            operation: format!("computing operating year start for {date}: {e}"),
        }
    })?;
    let next_start = Date::from_calendar_date(start_year + 1, start_month, 1).map_err(|e| {
        DomainError::DateArithmeticOverflow {
            operation: format!("computing operating year end for {date}: {e}"),
        }
    })?;
    let end = next_start
        .previous_day()
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("computing operating year end for {date}"),
        })?;

    Ok((start, end))
}

/// Number of history entries within the operating year containing `date`.
///
/// # Errors
///
/// Returns an error if the operating year cannot be computed.
pub fn rotation_count(
    history: &[HistoryEntry],
    date: Date,
    start_month: Month,
) -> Result<u32, DomainError> {
    let (start, end) = operating_year_bounds(date, start_month)?;
    let count = history
        .iter()
        .filter(|h| h.date >= start && h.date <= end)
        .count();
    Ok(u32::try_from(count).unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MissionId, Role, TimeBand};

    fn score(id: i64, pinned: bool, region: Option<u32>, rotation: u32) -> CandidateScore {
        CandidateScore {
            worker_id: WorkerId::new(id),
            pinned,
            region_rank: region,
            rotation_count: rotation,
            certification_number: 5000 + id.unsigned_abs(),
            strong: true,
            conditions: ConditionSet::new(),
        }
    }

    fn order(ranked: &[RankedCandidate]) -> Vec<i64> {
        ranked.iter().map(|r| r.score.worker_id.value()).collect()
    }

    #[test]
    fn test_region_rank_then_rotation_then_certification() {
        let ranked = rank_candidates(
            vec![
                score(3, false, Some(2), 0),
                score(2, false, Some(1), 3),
                score(1, false, Some(1), 0),
                score(4, false, Some(1), 3),
            ],
            SortDirection::Ascending,
        );
        assert_eq!(order(&ranked), vec![1, 2, 4, 3]);
        assert_eq!(ranked[0].position, 1);
        assert_eq!(ranked[3].position, 4);
    }

    #[test]
    fn test_missing_region_sorts_last() {
        let ranked = rank_candidates(
            vec![score(1, false, None, 0), score(2, false, Some(9), 7)],
            SortDirection::Ascending,
        );
        assert_eq!(order(&ranked), vec![2, 1]);
    }

    #[test]
    fn test_pinned_candidates_lead_in_both_directions() {
        let candidates = vec![
            score(1, false, Some(1), 0),
            score(2, true, Some(5), 9),
            score(3, false, Some(2), 0),
        ];

        let ascending = rank_candidates(candidates.clone(), SortDirection::Ascending);
        assert_eq!(order(&ascending), vec![2, 1, 3]);

        let descending = rank_candidates(candidates, SortDirection::Descending);
        assert_eq!(order(&descending), vec![2, 3, 1]);
    }

    #[test]
    fn test_ranking_is_deterministic() {
        let candidates = vec![
            score(7, false, Some(1), 2),
            score(3, false, None, 0),
            score(5, true, Some(3), 1),
            score(1, false, Some(1), 2),
        ];
        let mut reversed = candidates.clone();
        reversed.reverse();

        assert_eq!(
            rank_candidates(candidates, SortDirection::Ascending),
            rank_candidates(reversed, SortDirection::Ascending)
        );
    }

    #[test]
    fn test_continuity_pin_requires_earlier_date_same_role_and_band() {
        let day = |d: u8| Date::from_calendar_date(2026, Month::August, d).unwrap();
        let key = SlotKey::new(MissionId::new(1), day(2), TimeBand::WholeDay, Role::Inspector);
        let assigned = |date: Date, role: Role| ProvisionalAssignment {
            key: SlotKey::new(MissionId::new(1), date, TimeBand::WholeDay, role),
            worker_id: WorkerId::new(1),
            strong_candidate: true,
            condition_score: 0,
            conditions: ConditionSet::new(),
        };

        assert!(is_continuity_pinned(
            &key,
            WorkerId::new(1),
            &[assigned(day(1), Role::Inspector)]
        ));
        assert!(!is_continuity_pinned(
            &key,
            WorkerId::new(1),
            &[assigned(day(3), Role::Inspector)]
        ));
        assert!(!is_continuity_pinned(
            &key,
            WorkerId::new(1),
            &[assigned(day(1), Role::Trainee)]
        ));
        assert!(!is_continuity_pinned(
            &key,
            WorkerId::new(2),
            &[assigned(day(1), Role::Inspector)]
        ));
    }

    #[test]
    fn test_operating_year_starts_in_april() {
        let date = Date::from_calendar_date(2026, Month::February, 10).unwrap();
        let (start, end) = operating_year_bounds(date, Month::April).unwrap();
        assert_eq!(start, Date::from_calendar_date(2025, Month::April, 1).unwrap());
        assert_eq!(end, Date::from_calendar_date(2026, Month::March, 31).unwrap());

        let date = Date::from_calendar_date(2026, Month::April, 1).unwrap();
        let (start, _) = operating_year_bounds(date, Month::April).unwrap();
        assert_eq!(start, date);
    }
}
