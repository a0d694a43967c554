// Copyright (c) 2025 Solace Health Labs
// SPDX-License-Identifier: BUSL-1.1
pub mod settings;

pub use settings::Settings;
