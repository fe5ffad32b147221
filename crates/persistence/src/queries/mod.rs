// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Query modules for persistence layer.
//!
//! This module contains all read-only queries for the persistence layer.
//!
//! ## Module Organization
//!
//! - `missions`: Missions with their days and requirements
//! - `workers`: Workers, availability, region priorities and history
//! - `assignments`: Staged selections, provisional assignments and status rows
//! - `runs`: The batch run log

pub mod assignments;
pub mod missions;
pub mod runs;
pub mod workers;
