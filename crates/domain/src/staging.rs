// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Staging reconciliation and promotion selection.
//!
//! Staging is split into a pure diff (this module) and a write performed by
//! the store. The diff keeps rows backed by a provisional assignment, keeps
//! rows that are identical to a freshly computed row, and replaces the rest.
//! Running it twice against unchanged inputs yields an empty plan.

use crate::records::SelectionRecord;
use crate::types::WorkerId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Which staged rows a role promotes to provisional assignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PromotionPolicy {
    /// Promote every quota-filled row.
    #[default]
    QuotaFilled,
    /// Only strong candidates may claim quota; quota-filled rows are promoted.
    QuotaFilledStrong,
    /// Stage candidates but promote nothing.
    StageOnly,
}

impl PromotionPolicy {
    /// Whether a candidate with the given strength may claim a quota bucket.
    #[must_use]
    pub const fn may_claim(&self, strong: bool) -> bool {
        match self {
            Self::QuotaFilled | Self::StageOnly => true,
            Self::QuotaFilledStrong => strong,
        }
    }

    #[must_use]
    pub const fn promotes(&self) -> bool {
        !matches!(self, Self::StageOnly)
    }
}

/// The writes needed to bring one slot's staged rows up to date.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StagingPlan {
    /// Workers whose existing staged rows are removed.
    pub delete: Vec<WorkerId>,
    /// New rows to insert.
    pub insert: Vec<SelectionRecord>,
    /// Workers whose rows are kept because a provisional assignment backs them.
    pub preserved: Vec<WorkerId>,
}

impl StagingPlan {
    /// True when the store needs no writes.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.delete.is_empty() && self.insert.is_empty()
    }
}

/// Diffs existing staged rows for a slot against freshly computed rows.
///
/// # Arguments
///
/// * `existing` - Rows currently staged for the slot
/// * `backed` - Workers holding a provisional assignment for the slot
/// * `fresh` - Rows computed by this pass
#[must_use]
pub fn plan_staging(
    existing: &[SelectionRecord],
    backed: &BTreeSet<WorkerId>,
    fresh: Vec<SelectionRecord>,
) -> StagingPlan {
    let current: BTreeMap<WorkerId, &SelectionRecord> =
        existing.iter().map(|row| (row.worker_id, row)).collect();
    let computed: BTreeMap<WorkerId, &SelectionRecord> =
        fresh.iter().map(|row| (row.worker_id, row)).collect();

    let mut plan = StagingPlan::default();

    for (worker_id, row) in &current {
        if backed.contains(worker_id) {
            plan.preserved.push(*worker_id);
        } else if computed.get(worker_id) != Some(row) {
            plan.delete.push(*worker_id);
        }
    }

    for row in &fresh {
        if backed.contains(&row.worker_id) {
            continue;
        }
        if current.get(&row.worker_id) == Some(&row) {
            continue;
        }
        plan.insert.push(row.clone());
    }

    plan
}

/// Rows the policy promotes, in ranked order.
#[must_use]
pub fn rows_to_promote(rows: &[SelectionRecord], policy: PromotionPolicy) -> Vec<&SelectionRecord> {
    if !policy.promotes() {
        return Vec::new();
    }
    let mut selected: Vec<&SelectionRecord> = rows.iter().filter(|r| r.is_quota_filled()).collect();
    selected.sort_by_key(|r| r.rank_position);
    selected
}
