// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{MissionId, MissionStatus};

/// Errors that can occur while validating or evaluating staffing rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Role name is not recognised.
    InvalidRole(String),
    /// Time band name is not recognised.
    InvalidTimeBand(String),
    /// Rank name is not recognised.
    InvalidRank(String),
    /// Gender value is not recognised.
    InvalidGender(String),
    /// Mission status name is not recognised.
    InvalidMissionStatus(String),
    /// Execution type name is not recognised.
    InvalidExecutionType(String),
    /// Run state name is not recognised.
    InvalidRunState(String),
    /// Condition name is not recognised.
    InvalidCondition(String),
    /// A region, sport, or discipline code is empty.
    InvalidCode {
        /// Which kind of code was rejected.
        kind: &'static str,
        /// The rejected value.
        value: String,
    },
    /// A mission cannot move between the two statuses.
    InvalidStatusTransition {
        /// The mission being transitioned.
        mission_id: MissionId,
        /// The current status.
        from: MissionStatus,
        /// The requested status.
        to: MissionStatus,
    },
    /// A composition table has no buckets.
    EmptyCompositionTable(String),
    /// Composition bucket weights do not add up to 100.
    InvalidCompositionWeights {
        /// The table name.
        table: String,
        /// The actual weight total.
        total: u32,
    },
    /// A role references a composition table that does not exist.
    CompositionTableMissing {
        /// The missing table name.
        table: String,
    },
    /// More than five conditions were recorded for one candidate.
    TooManyConditions {
        /// The number of conditions attempted.
        count: usize,
    },
    /// The same condition was recorded twice for one candidate.
    DuplicateCondition(String),
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// Failed to parse a date from a string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRole(value) => write!(f, "Invalid role: {value}"),
            Self::InvalidTimeBand(value) => write!(f, "Invalid time band: {value}"),
            Self::InvalidRank(value) => write!(f, "Invalid rank: {value}"),
            Self::InvalidGender(value) => write!(f, "Invalid gender: {value}"),
            Self::InvalidMissionStatus(value) => write!(f, "Invalid mission status: {value}"),
            Self::InvalidExecutionType(value) => write!(f, "Invalid execution type: {value}"),
            Self::InvalidRunState(value) => write!(f, "Invalid run state: {value}"),
            Self::InvalidCondition(value) => write!(f, "Invalid condition: {value}"),
            Self::InvalidCode { kind, value } => {
                write!(f, "Invalid {kind} code: '{value}'")
            }
            Self::InvalidStatusTransition {
                mission_id,
                from,
                to,
            } => {
                write!(
                    f,
                    "Mission {mission_id} cannot move from {from} to {to}"
                )
            }
            Self::EmptyCompositionTable(table) => {
                write!(f, "Composition table '{table}' has no buckets")
            }
            Self::InvalidCompositionWeights { table, total } => {
                write!(
                    f,
                    "Composition table '{table}' weights sum to {total}. Must be exactly 100"
                )
            }
            Self::CompositionTableMissing { table } => {
                write!(f, "Composition table '{table}' is not defined")
            }
            Self::TooManyConditions { count } => {
                write!(
                    f,
                    "Cannot record {count} conditions for one candidate. At most 5 are allowed"
                )
            }
            Self::DuplicateCondition(name) => {
                write!(f, "Condition '{name}' was recorded more than once")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
