// Copyright (c) 2025 Solace Health Labs
// SPDX-License-Identifier: BUSL-1.1
pub mod logger;
pub mod sink;
pub mod taxonomy;

pub use logger::{AuditExport, HazardLogEntry, HazardLogger, LogHandle};
pub use sink::{HazardError, HazardSink, JsonlHazardSink, MemoryHazardSink};
pub use taxonomy::{hazard_taxonomy, HazardCategory};
