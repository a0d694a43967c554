// Copyright (c) 2025 Solace Health Labs
// SPDX-License-Identifier: BUSL-1.1
pub mod redactor;

pub use redactor::{PiiCategory, RedactionConfig, RedactionOutcome, Redactor};
