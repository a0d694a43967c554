// Copyright (c) 2025 Solace Health Labs
// SPDX-License-Identifier: BUSL-1.1
pub mod banned;
pub mod generator;

pub use banned::{BannedPhraseScreen, RewriteOutcome};
pub use generator::{CardGenerator, CardTone, ClinicalSafetyCard};
