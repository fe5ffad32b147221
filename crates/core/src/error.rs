// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use staffing_domain::{DomainError, MissionStatus, Role};
use thiserror::Error;

/// Errors raised while running a staffing pass.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Another pass for the same process is requested or started.
    #[error("A run of '{process}' is already active")]
    RunAlreadyActive { process: String },

    /// A domain rule was violated.
    #[error("Domain violation: {0}")]
    Domain(#[from] DomainError),

    /// The configuration has no policy for a role the mission needs.
    #[error("No staffing policy is configured for role {role}")]
    MissingRolePolicy { role: Role },

    /// A role policy names a composition table that is not configured.
    #[error("Role {role} references composition table '{table}', which is not configured")]
    MissingCompositionTable { role: Role, table: String },

    /// The configuration itself is malformed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A mission disappeared between queueing and staffing.
    #[error("Mission {mission_id} not found")]
    MissionNotFound { mission_id: i64 },

    /// A queued mission can no longer be staffed.
    #[error("Mission {mission_id} is {status} and cannot be staffed")]
    MissionNotStaffable {
        mission_id: i64,
        status: MissionStatus,
    },

    /// The backing store failed.
    #[error("Repository error: {0}")]
    Repository(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl EngineError {
    /// Wraps a store error.
    pub fn repository<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Repository(Box::new(err))
    }
}
