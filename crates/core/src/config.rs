// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Engine configuration.
//!
//! Every field has a default so a partial JSON document is enough to
//! override a single setting.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use staffing_domain::{
    BucketMatch, CompositionTable, ContinuousDutyLimit, ExecutionType, ExperienceScope,
    FilterPolicy, PromotionPolicy, QuotaBucket, QuotaRounding, Rank, Role, SortDirection,
};
use std::collections::BTreeMap;
use time::Month;

/// The default process name recorded in the run log.
pub const DEFAULT_PROCESS_NAME: &str = "candidate-selection";

/// How one role is staffed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RolePolicy {
    pub promotion: PromotionPolicy,
    pub sort: SortDirection,
    /// Ignore availability records carrying an opt-out remark.
    pub respect_opt_out: bool,
    pub experience: Option<ExperienceScope>,
    pub participation_percent: Option<u8>,
    /// Composition table name per execution type. Missing entries use a single open bucket.
    pub composition: BTreeMap<ExecutionType, String>,
}

impl Default for RolePolicy {
    fn default() -> Self {
        Self {
            promotion: PromotionPolicy::QuotaFilled,
            sort: SortDirection::Ascending,
            respect_opt_out: true,
            experience: None,
            participation_percent: None,
            composition: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub process_name: String,
    pub duty: ContinuousDutyLimit,
    /// Month (1-12) on which the operating year starts.
    pub operating_year_start_month: u8,
    pub roles: BTreeMap<Role, RolePolicy>,
    pub composition_tables: BTreeMap<String, CompositionTable>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let mut roles = BTreeMap::new();

        roles.insert(
            Role::LeadInspector,
            RolePolicy {
                experience: Some(ExperienceScope::SameSport),
                participation_percent: Some(100),
                ..RolePolicy::default()
            },
        );
        roles.insert(
            Role::AreaCoordinator,
            RolePolicy {
                respect_opt_out: false,
                experience: Some(ExperienceScope::SameDiscipline),
                ..RolePolicy::default()
            },
        );
        roles.insert(
            Role::Inspector,
            RolePolicy {
                participation_percent: Some(50),
                composition: BTreeMap::from([
                    (ExecutionType::InCompetition, String::from("inspector_tiers")),
                    (ExecutionType::OutOfCompetition, String::from("inspector_split")),
                ]),
                ..RolePolicy::default()
            },
        );
        roles.insert(Role::BloodCollector, RolePolicy::default());
        roles.insert(
            Role::Trainee,
            RolePolicy {
                promotion: PromotionPolicy::QuotaFilledStrong,
                ..RolePolicy::default()
            },
        );

        let top = [Rank::S1, Rank::S2, Rank::S3].into_iter().collect();
        let entry = [Rank::A1, Rank::A2, Rank::A3].into_iter().collect();
        let upper = [Rank::S1, Rank::S2, Rank::S3, Rank::A1].into_iter().collect();

        let composition_tables = BTreeMap::from([
            (
                String::from("inspector_tiers"),
                CompositionTable {
                    name: String::from("inspector_tiers"),
                    rounding: QuotaRounding::HalfUp,
                    buckets: vec![
                        QuotaBucket {
                            name: String::from("top_tier"),
                            matcher: BucketMatch::Ranks(top),
                            weight_percent: 30,
                        },
                        QuotaBucket {
                            name: String::from("entry_tier"),
                            matcher: BucketMatch::Ranks(entry),
                            weight_percent: 70,
                        },
                    ],
                },
            ),
            (
                String::from("inspector_split"),
                CompositionTable {
                    name: String::from("inspector_split"),
                    rounding: QuotaRounding::Ceiling,
                    buckets: vec![
                        QuotaBucket {
                            name: String::from("upper"),
                            matcher: BucketMatch::Ranks(upper),
                            weight_percent: 50,
                        },
                        QuotaBucket {
                            name: String::from("lower"),
                            matcher: BucketMatch::Any,
                            weight_percent: 50,
                        },
                    ],
                },
            ),
        ]);

        Self {
            process_name: String::from(DEFAULT_PROCESS_NAME),
            duty: ContinuousDutyLimit::default(),
            operating_year_start_month: 4,
            roles,
            composition_tables,
        }
    }
}

impl EngineConfig {
    /// Parses a JSON configuration and validates it.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the configuration is inconsistent.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the start month and every referenced composition table.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first inconsistency found.
    pub fn validate(&self) -> Result<(), EngineError> {
        self.start_month()?;
        for table in self.composition_tables.values() {
            table.validate()?;
        }
        for (role, policy) in &self.roles {
            if let Some(percent) = policy.participation_percent
                && percent > 100
            {
                return Err(EngineError::InvalidConfig(format!(
                    "participation percentage {percent} for {role} exceeds 100"
                )));
            }
            for table in policy.composition.values() {
                if !self.composition_tables.contains_key(table) {
                    return Err(EngineError::MissingCompositionTable {
                        role: *role,
                        table: table.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the configured month is not 1-12.
    pub fn start_month(&self) -> Result<Month, EngineError> {
        Month::try_from(self.operating_year_start_month).map_err(|_| {
            EngineError::InvalidConfig(format!(
                "operating year start month {} is not 1-12",
                self.operating_year_start_month
            ))
        })
    }

    /// # Errors
    ///
    /// Returns an error if the role has no policy.
    pub fn role_policy(&self, role: Role) -> Result<&RolePolicy, EngineError> {
        self.roles
            .get(&role)
            .ok_or(EngineError::MissingRolePolicy { role })
    }

    /// The composition table for a role on a mission of the given type.
    ///
    /// # Errors
    ///
    /// Returns an error if the policy names a table that does not exist.
    pub fn composition_for(
        &self,
        role: Role,
        execution: ExecutionType,
    ) -> Result<CompositionTable, EngineError> {
        let policy = self.role_policy(role)?;
        match policy.composition.get(&execution) {
            Some(name) => self.composition_tables.get(name).cloned().ok_or_else(|| {
                EngineError::MissingCompositionTable {
                    role,
                    table: name.clone(),
                }
            }),
            None => Ok(CompositionTable::any(role.as_str())),
        }
    }

    /// The filter settings for a role.
    ///
    /// # Errors
    ///
    /// Returns an error if the role has no policy.
    pub fn filter_policy(&self, role: Role) -> Result<FilterPolicy, EngineError> {
        let policy = self.role_policy(role)?;
        Ok(FilterPolicy {
            duty: self.duty,
            experience: policy.experience,
            participation_percent: policy.participation_percent,
            respect_opt_out: policy.respect_opt_out,
        })
    }
}
