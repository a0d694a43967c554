// Copyright (c) 2025 Solace Health Labs
// SPDX-License-Identifier: BUSL-1.1
// src/monitoring/mod.rs - Operational alerting

pub mod alerts;

pub use alerts::{AlertLevel, OpsAlert, OpsAlertChannel};
