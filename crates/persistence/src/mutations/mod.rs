// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutation modules for persistence layer.
//!
//! - `master_data`: Missions, workers, availability, region priorities, history
//! - `staffing`: Staged selections, provisional assignments and status rows
//! - `runs`: The batch run log
//!
//! Multi-statement writes run inside a single transaction.

pub mod master_data;
pub mod runs;
pub mod staffing;
