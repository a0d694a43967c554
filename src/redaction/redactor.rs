// Copyright (c) 2025 Solace Health Labs
// SPDX-License-Identifier: BUSL-1.1
//! PII redaction applied before any text crosses the process boundary to
//! the hosted classifier. This is a mandatory precondition for the intent
//! gate, not an optimization.
//!
//! Pattern order matters: national high-risk identifiers run before the
//! generic numeric patterns so a phone-shaped substring inside a longer
//! identifier is not double-matched. Placeholder tokens are chosen so no
//! pattern can re-match them, which makes `redact` idempotent.

use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PiiCategory {
    HealthIdentifier,
    NationalInsurance,
    PaymentCard,
    Phone,
    Postcode,
    Email,
    Url,
    SocialHandle,
    NumericIdentifier,
    Date,
    PersonName,
}

impl PiiCategory {
    /// Categories whose presence marks the whole message as high risk.
    pub fn is_high_risk(&self) -> bool {
        matches!(
            self,
            PiiCategory::HealthIdentifier
                | PiiCategory::NationalInsurance
                | PiiCategory::PaymentCard
        )
    }

    fn placeholder(&self) -> &'static str {
        match self {
            PiiCategory::HealthIdentifier => "[health-id]",
            PiiCategory::NationalInsurance => "[ni-number]",
            PiiCategory::PaymentCard => "[card-number]",
            PiiCategory::Phone => "[phone]",
            PiiCategory::Postcode => "[postcode]",
            PiiCategory::Email => "[email]",
            PiiCategory::Url => "[link]",
            PiiCategory::SocialHandle => "[handle]",
            PiiCategory::NumericIdentifier => "[number]",
            PiiCategory::Date => "[date]",
            PiiCategory::PersonName => "[name]",
        }
    }
}

#[derive(Clone, Debug)]
pub struct RedactionConfig {
    /// Also redact date-shaped substrings. Off by default: dates are common
    /// in journal text and rarely identifying on their own.
    pub redact_dates: bool,
    /// Capitalized-name heuristic. Off by default for the same reason.
    pub redact_names: bool,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        RedactionConfig {
            redact_dates: false,
            redact_names: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RedactionOutcome {
    pub redacted_text: String,
    pub pii_count: usize,
    pub high_risk: bool,
    pub categories: Vec<PiiCategory>,
}

struct PatternEntry {
    category: PiiCategory,
    regex: Regex,
}

pub struct Redactor {
    patterns: Vec<PatternEntry>,
}

impl Redactor {
    pub fn new(config: RedactionConfig) -> Self {
        // Patterns compile from fixed strings; a failure here is a build
        // defect, not a runtime condition.
        let mut table = vec![
            // NHS-style ten-digit health identifier, separator required so
            // plain phone numbers do not land here.
            (
                PiiCategory::HealthIdentifier,
                r"\b\d{3}[ -]\d{3}[ -]\d{4}\b",
            ),
            // National insurance shape: two letters, six digits, one letter.
            (
                PiiCategory::NationalInsurance,
                r"\b[A-Za-z]{2}[ -]?\d{6}[ -]?[A-Za-z]\b",
            ),
            (
                PiiCategory::PaymentCard,
                r"\b\d{4}[ -]?\d{4}[ -]?\d{4}[ -]?\d{1,4}\b",
            ),
            (
                PiiCategory::Phone,
                r"(?:\+44[ -]?\d{2,4}|\b0\d{2,4})[ -]?\d{3}[ -]?\d{3,4}\b",
            ),
            (
                PiiCategory::Postcode,
                r"\b[A-Za-z]{1,2}\d[A-Za-z\d]?[ -]?\d[A-Za-z]{2}\b",
            ),
            (PiiCategory::Email, r"\b[\w.+-]+@[\w-]+\.[\w.-]+\b"),
            (PiiCategory::Url, r"(?:https?://|www\.)[^\s]+"),
            (PiiCategory::SocialHandle, r"@\w{2,}"),
            (PiiCategory::NumericIdentifier, r"\b\d{6,}\b"),
        ];
        if config.redact_dates {
            table.push((PiiCategory::Date, r"\b\d{1,2}[/-]\d{1,2}[/-]\d{2,4}\b"));
        }
        if config.redact_names {
            table.push((PiiCategory::PersonName, r"\b[A-Z][a-z]+ [A-Z][a-z]+\b"));
        }

        let patterns = table
            .into_iter()
            .map(|(category, pattern)| PatternEntry {
                category,
                regex: Regex::new(pattern).expect("built-in redaction pattern must compile"),
            })
            .collect();

        Redactor { patterns }
    }

    /// Replace every PII match with its category placeholder. Pure function
    /// over the input text and the static pattern table.
    pub fn redact(&self, text: &str) -> RedactionOutcome {
        let mut redacted = text.to_string();
        let mut pii_count = 0;
        let mut high_risk = false;
        let mut categories = Vec::new();

        for entry in &self.patterns {
            let matches = entry.regex.find_iter(&redacted).count();
            if matches == 0 {
                continue;
            }
            pii_count += matches;
            high_risk |= entry.category.is_high_risk();
            categories.push(entry.category);
            redacted = entry
                .regex
                .replace_all(&redacted, entry.category.placeholder())
                .into_owned();
        }

        RedactionOutcome {
            redacted_text: redacted,
            pii_count,
            high_risk,
            categories,
        }
    }
}

impl Default for Redactor {
    fn default() -> Self {
        Self::new(RedactionConfig::default())
    }
}
