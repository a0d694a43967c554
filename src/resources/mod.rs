// Copyright (c) 2025 Solace Health Labs
// SPDX-License-Identifier: BUSL-1.1
pub mod registry;

pub use registry::{ContactChannel, ResourceRef, ResourceRegistry};
