// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod config;
mod engine;
mod error;
mod memory;
mod report;
mod repository;
mod slot;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use config::{DEFAULT_PROCESS_NAME, EngineConfig, RolePolicy};
pub use engine::{run_pass, staff_mission};
pub use error::EngineError;
pub use memory::InMemoryRepository;
pub use report::{
    MissionOutcome, MissionReport, PassReport, PromotionCounter, RejectionCounts, SlotReport,
};
pub use repository::{RunLease, StaffingRepository};
pub use slot::staff_slot;
