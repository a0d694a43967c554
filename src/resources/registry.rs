// Copyright (c) 2025 Solace Health Labs
// SPDX-License-Identifier: BUSL-1.1
//! Static registry of regional crisis-support contacts.
//!
//! The registry is configuration data, not code: it ships with a built-in
//! UK default set and can be replaced wholesale from a JSON file so a
//! jurisdiction change does not require a redeploy. Read-only after
//! construction.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContactChannel {
    Call,
    Text,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResourceRef {
    pub id: String,
    pub display_name: String,
    pub contact_value: String,
    pub purpose: String,
    pub channel: ContactChannel,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct RegistryFile {
    version: String,
    region: String,
    resources: Vec<ResourceRef>,
}

pub struct ResourceRegistry {
    version: String,
    region: String,
    resources: Vec<ResourceRef>,
    by_id: HashMap<String, usize>,
}

impl ResourceRegistry {
    /// Built-in UK register. Ordering is the ranking used when a verdict
    /// asks for more than one resource.
    pub fn new() -> Self {
        Self::from_parts(
            "2025.1".to_string(),
            "UK".to_string(),
            vec![
                ResourceRef {
                    id: "samaritans".to_string(),
                    display_name: "Samaritans".to_string(),
                    contact_value: "116 123".to_string(),
                    purpose: "24/7 listening support for anyone in distress".to_string(),
                    channel: ContactChannel::Call,
                },
                ResourceRef {
                    id: "shout".to_string(),
                    display_name: "Shout".to_string(),
                    contact_value: "Text SHOUT to 85258".to_string(),
                    purpose: "24/7 crisis support by text message".to_string(),
                    channel: ContactChannel::Text,
                },
                ResourceRef {
                    id: "nhs-111".to_string(),
                    display_name: "NHS 111 (option 2)".to_string(),
                    contact_value: "111".to_string(),
                    purpose: "Urgent mental health support and advice".to_string(),
                    channel: ContactChannel::Call,
                },
                ResourceRef {
                    id: "nhs-gp".to_string(),
                    display_name: "Your GP surgery".to_string(),
                    contact_value: "111".to_string(),
                    purpose: "Medical questions and non-urgent health concerns".to_string(),
                    channel: ContactChannel::Call,
                },
            ],
        )
    }

    /// Load a regional register from a JSON file. The file replaces the
    /// built-in set entirely so partial overrides cannot leave a stale
    /// contact behind.
    pub fn from_file(path: &Path) -> Result<Self, RegistryError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| RegistryError::Io(path.display().to_string(), e))?;
        let file: RegistryFile = serde_json::from_str(&raw)?;
        if file.resources.is_empty() {
            return Err(RegistryError::Empty);
        }
        Ok(Self::from_parts(file.version, file.region, file.resources))
    }

    fn from_parts(version: String, region: String, resources: Vec<ResourceRef>) -> Self {
        let by_id = resources
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id.clone(), i))
            .collect();
        ResourceRegistry {
            version,
            region,
            resources,
            by_id,
        }
    }

    pub fn get(&self, id: &str) -> Option<&ResourceRef> {
        self.by_id.get(id).map(|&i| &self.resources[i])
    }

    /// The first-ranked crisis contact. The registry is validated non-empty
    /// at construction, so this always exists.
    pub fn default_crisis_resource(&self) -> &ResourceRef {
        &self.resources[0]
    }

    /// The contact to attach for medical-advice redirection. Falls back to
    /// the default crisis resource when no registry entry mentions medical
    /// or health support.
    pub fn medical_resource(&self) -> &ResourceRef {
        self.resources
            .iter()
            .find(|r| {
                let p = r.purpose.to_lowercase();
                p.contains("medical") || p.contains("health")
            })
            .unwrap_or_else(|| self.default_crisis_resource())
    }

    /// Ranked contacts, strongest first. `count` is a cap, not a promise.
    pub fn top(&self, count: usize) -> Vec<ResourceRef> {
        self.resources.iter().take(count).cloned().collect()
    }

    pub fn all(&self) -> &[ResourceRef] {
        &self.resources
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn region(&self) -> &str {
        &self.region
    }
}

impl Default for ResourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("failed to read registry file {0}: {1}")]
    Io(String, #[source] std::io::Error),
    #[error("invalid registry JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("registry file contains no resources")]
    Empty,
}
