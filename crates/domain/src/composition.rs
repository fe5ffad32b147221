// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Composition quotas.
//!
//! A composition table splits a slot's required headcount across ordered
//! buckets by percentage weight. Intermediate buckets are rounded with the
//! table's rounding policy and clamped so they never exceed what is left;
//! the last bucket takes the remainder. Quotas therefore always sum to the
//! required total.
//!
//! The balancer walks the ranked candidate list once. Each candidate claims
//! the first bucket whose matcher accepts it and which still has room.
//! Candidates that claim nothing stay staged; they are just not quota-filled.

use crate::error::DomainError;
use crate::types::{Gender, Rank};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Rounding applied to intermediate buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QuotaRounding {
    /// Round half up (`2.5 -> 3`, `2.4 -> 2`).
    #[default]
    HalfUp,
    /// Round any fraction up.
    Ceiling,
}

/// Which workers a bucket accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketMatch {
    Ranks(BTreeSet<Rank>),
    Gender(Gender),
    Any,
}

impl BucketMatch {
    #[must_use]
    pub fn accepts(&self, rank: Rank, gender: Gender) -> bool {
        match self {
            Self::Ranks(ranks) => ranks.contains(&rank),
            Self::Gender(g) => *g == gender,
            Self::Any => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaBucket {
    pub name: String,
    pub matcher: BucketMatch,
    pub weight_percent: u32,
}

/// An ordered set of weighted buckets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositionTable {
    pub name: String,
    #[serde(default)]
    pub rounding: QuotaRounding,
    pub buckets: Vec<QuotaBucket>,
}

impl CompositionTable {
    /// A single bucket accepting everyone. Used for roles without a table.
    #[must_use]
    pub fn any(name: &str) -> Self {
        Self {
            name: name.to_string(),
            rounding: QuotaRounding::HalfUp,
            buckets: vec![QuotaBucket {
                name: String::from("any"),
                matcher: BucketMatch::Any,
                weight_percent: 100,
            }],
        }
    }

    /// Checks that the table has buckets and the weights total 100.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is empty or the weights are wrong.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.buckets.is_empty() {
            return Err(DomainError::EmptyCompositionTable(self.name.clone()));
        }
        let total: u32 = self.buckets.iter().map(|b| b.weight_percent).sum();
        if total != 100 {
            return Err(DomainError::InvalidCompositionWeights {
                table: self.name.clone(),
                total,
            });
        }
        Ok(())
    }

    /// Splits `total` into one quota per bucket.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is invalid.
    pub fn compute_quotas(&self, total: u32) -> Result<Vec<u32>, DomainError> {
        self.validate()?;

        let last = self.buckets.len() - 1;
        let mut remaining = total;
        let mut quotas = Vec::with_capacity(self.buckets.len());

        for (index, bucket) in self.buckets.iter().enumerate() {
            let quota = if index == last {
                remaining
            } else {
                round_share(total, bucket.weight_percent, self.rounding).min(remaining)
            };
            remaining -= quota;
            quotas.push(quota);
        }

        Ok(quotas)
    }

    /// Index of the first bucket accepting the worker, ignoring quotas.
    #[must_use]
    pub fn bucket_for(&self, rank: Rank, gender: Gender) -> Option<usize> {
        self.buckets.iter().position(|b| b.matcher.accepts(rank, gender))
    }
}

fn round_share(total: u32, weight_percent: u32, rounding: QuotaRounding) -> u32 {
    let scaled = u64::from(total) * u64::from(weight_percent);
    let rounded = match rounding {
        QuotaRounding::HalfUp => (scaled + 50) / 100,
        QuotaRounding::Ceiling => scaled.div_ceil(100),
    };
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

/// A worker as seen by the balancer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositionSubject {
    pub rank: Rank,
    pub gender: Gender,
    /// Whether the worker may claim a bucket at all.
    pub claimable: bool,
}

/// The result of one balancer walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaAllocation {
    /// Bucket name claimed by each candidate, in input order.
    pub claims: Vec<Option<String>>,
    /// Quota left unfilled per bucket after the walk.
    pub unfilled: Vec<u32>,
}

impl QuotaAllocation {
    #[must_use]
    pub fn claimed(&self) -> usize {
        self.claims.iter().filter(|c| c.is_some()).count()
    }

    #[must_use]
    pub fn unfilled_total(&self) -> u32 {
        self.unfilled.iter().sum()
    }
}

/// Walks ranked candidates against the table's quotas.
///
/// # Arguments
///
/// * `table` - The composition table for the role
/// * `required` - The slot's full required headcount
/// * `existing` - Workers already provisionally assigned to the slot
/// * `ranked` - Candidates in ranked order
///
/// # Errors
///
/// Returns an error if the table is invalid.
pub fn allocate_quotas(
    table: &CompositionTable,
    required: u32,
    existing: &[CompositionSubject],
    ranked: &[CompositionSubject],
) -> Result<QuotaAllocation, DomainError> {
    let mut remaining = table.compute_quotas(required)?;

    for worker in existing {
        if let Some(index) = first_open_bucket(table, &remaining, worker) {
            remaining[index] -= 1;
        }
    }

    let claims = ranked
        .iter()
        .map(|candidate| {
            if !candidate.claimable {
                return None;
            }
            let index = first_open_bucket(table, &remaining, candidate)?;
            remaining[index] -= 1;
            Some(table.buckets[index].name.clone())
        })
        .collect();

    Ok(QuotaAllocation {
        claims,
        unfilled: remaining,
    })
}

fn first_open_bucket(
    table: &CompositionTable,
    remaining: &[u32],
    subject: &CompositionSubject,
) -> Option<usize> {
    table
        .buckets
        .iter()
        .zip(remaining)
        .position(|(bucket, left)| *left > 0 && bucket.matcher.accepts(subject.rank, subject.gender))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier_table(rounding: QuotaRounding, weights: &[u32]) -> CompositionTable {
        let matchers = [
            BucketMatch::Ranks([Rank::S1, Rank::S2, Rank::S3].into_iter().collect()),
            BucketMatch::Ranks([Rank::A1, Rank::A2, Rank::A3].into_iter().collect()),
            BucketMatch::Any,
        ];
        CompositionTable {
            name: String::from("tiers"),
            rounding,
            buckets: weights
                .iter()
                .zip(matchers)
                .enumerate()
                .map(|(i, (w, matcher))| QuotaBucket {
                    name: format!("bucket{i}"),
                    matcher,
                    weight_percent: *w,
                })
                .collect(),
        }
    }

    fn subject(rank: Rank) -> CompositionSubject {
        CompositionSubject {
            rank,
            gender: Gender::Female,
            claimable: true,
        }
    }

    #[test]
    fn test_quotas_sum_to_total_for_every_table_and_total() {
        let weight_tables: [&[u32]; 6] = [
            &[100],
            &[50, 50],
            &[30, 70],
            &[33, 33, 34],
            &[10, 45, 45],
            &[1, 98, 1],
        ];
        for weights in weight_tables {
            for rounding in [QuotaRounding::HalfUp, QuotaRounding::Ceiling] {
                let table = tier_table(rounding, weights);
                for total in 0..=40 {
                    let quotas = table.compute_quotas(total).unwrap();
                    assert_eq!(quotas.iter().sum::<u32>(), total, "{weights:?} {rounding:?} {total}");
                }
            }
        }
    }

    #[test]
    fn test_half_up_and_ceiling_differ() {
        // 3 * 30% = 0.9 for both; 5 * 30% = 1.5; 4 * 30% = 1.2
        let half_up = tier_table(QuotaRounding::HalfUp, &[30, 70]);
        let ceiling = tier_table(QuotaRounding::Ceiling, &[30, 70]);

        assert_eq!(half_up.compute_quotas(5).unwrap(), vec![2, 3]);
        assert_eq!(half_up.compute_quotas(4).unwrap(), vec![1, 3]);
        assert_eq!(ceiling.compute_quotas(4).unwrap(), vec![2, 2]);
        assert_eq!(ceiling.compute_quotas(3).unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_intermediate_buckets_are_clamped() {
        let table = tier_table(QuotaRounding::Ceiling, &[60, 39, 1]);
        // ceil(0.6) = 1 leaves 0 for the rest.
        assert_eq!(table.compute_quotas(1).unwrap(), vec![1, 0, 0]);
    }

    #[test]
    fn test_weights_must_total_one_hundred() {
        let table = tier_table(QuotaRounding::HalfUp, &[40, 40]);
        assert_eq!(
            table.compute_quotas(3),
            Err(DomainError::InvalidCompositionWeights {
                table: String::from("tiers"),
                total: 80,
            })
        );

        let empty = CompositionTable {
            name: String::from("empty"),
            rounding: QuotaRounding::HalfUp,
            buckets: Vec::new(),
        };
        assert!(matches!(
            empty.validate(),
            Err(DomainError::EmptyCompositionTable(_))
        ));
    }

    #[test]
    fn test_walk_claims_first_open_matching_bucket() {
        let table = tier_table(QuotaRounding::HalfUp, &[50, 50]);
        let ranked = [
            subject(Rank::A1),
            subject(Rank::A2),
            subject(Rank::S2),
            subject(Rank::A3),
        ];

        let allocation = allocate_quotas(&table, 2, &[], &ranked).unwrap();

        assert_eq!(
            allocation.claims,
            vec![
                Some(String::from("bucket1")),
                None,
                Some(String::from("bucket0")),
                None
            ]
        );
        assert_eq!(allocation.unfilled_total(), 0);
    }

    #[test]
    fn test_existing_assignments_consume_quota() {
        let table = tier_table(QuotaRounding::HalfUp, &[50, 50]);
        let existing = [subject(Rank::S1)];
        let ranked = [subject(Rank::S3), subject(Rank::A1)];

        let allocation = allocate_quotas(&table, 2, &existing, &ranked).unwrap();

        assert_eq!(allocation.claims, vec![None, Some(String::from("bucket1"))]);
        assert_eq!(allocation.claimed(), 1);
    }

    #[test]
    fn test_unclaimable_candidates_are_skipped() {
        let table = CompositionTable::any("inspector");
        let mut weak = subject(Rank::S1);
        weak.claimable = false;

        let allocation = allocate_quotas(&table, 1, &[], &[weak, subject(Rank::A1)]).unwrap();

        assert_eq!(allocation.claims, vec![None, Some(String::from("any"))]);
    }

    #[test]
    fn test_gender_matcher() {
        let table = CompositionTable {
            name: String::from("collectors"),
            rounding: QuotaRounding::Ceiling,
            buckets: vec![
                QuotaBucket {
                    name: String::from("female"),
                    matcher: BucketMatch::Gender(Gender::Female),
                    weight_percent: 50,
                },
                QuotaBucket {
                    name: String::from("male"),
                    matcher: BucketMatch::Gender(Gender::Male),
                    weight_percent: 50,
                },
            ],
        };
        let male = CompositionSubject {
            rank: Rank::A1,
            gender: Gender::Male,
            claimable: true,
        };

        let allocation = allocate_quotas(&table, 2, &[], &[male, male, subject(Rank::A1)]).unwrap();

        assert_eq!(
            allocation.claims,
            vec![
                Some(String::from("male")),
                None,
                Some(String::from("female"))
            ]
        );
    }
}
