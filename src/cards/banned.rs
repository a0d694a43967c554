// Copyright (c) 2025 Solace Health Labs
// SPDX-License-Identifier: BUSL-1.1
//! Banned-phrase screen over downstream AI-generated replies.
//!
//! Minimizing, diagnostic, prescriptive, and crisis-dismissive language
//! must never reach the user. Offending sentences are replaced with a
//! neutral supportive line before delivery, and every rewrite is itself a
//! hazard-loggable event.

use regex::Regex;

const REPLACEMENT_LINE: &str =
    "I hear how difficult this is. Would you like to talk through what is on your mind?";

/// Banned phrase patterns, case-insensitive. Grouped by the policy class
/// they violate.
const BANNED_PATTERNS: &[(&str, &str)] = &[
    // Minimizing
    ("minimizing", r"(?i)\bit'?s not that bad\b"),
    ("minimizing", r"(?i)\bjust (cheer|snap) (up|out of it)\b"),
    ("minimizing", r"(?i)\bother people have it worse\b"),
    ("minimizing", r"(?i)\byou'?re overreacting\b"),
    // Diagnostic
    ("diagnostic", r"(?i)\byou (have|are suffering from) (depression|anxiety|bipolar|ptsd)\b"),
    ("diagnostic", r"(?i)\byou sound (depressed|bipolar|manic)\b"),
    ("diagnostic", r"(?i)\bi diagnose\b"),
    // Prescriptive
    ("prescriptive", r"(?i)\byou should (stop|start) taking\b"),
    ("prescriptive", r"(?i)\bincrease your dosage?\b"),
    ("prescriptive", r"(?i)\byou don'?t need (your )?medication\b"),
    // Crisis-dismissive
    ("crisis_dismissive", r"(?i)\byou'?re not really suicidal\b"),
    ("crisis_dismissive", r"(?i)\bsleep it off\b"),
    ("crisis_dismissive", r"(?i)\bit'?s just a phase\b"),
];

#[derive(Clone, Debug, PartialEq)]
pub struct RewriteOutcome {
    pub text: String,
    pub rewritten: bool,
    /// Policy classes of the phrases that were removed.
    pub violations: Vec<String>,
}

pub struct BannedPhraseScreen {
    patterns: Vec<(&'static str, Regex)>,
}

impl BannedPhraseScreen {
    pub fn new() -> Self {
        let patterns = BANNED_PATTERNS
            .iter()
            .map(|(class, pattern)| {
                (
                    *class,
                    Regex::new(pattern).expect("built-in banned-phrase pattern must compile"),
                )
            })
            .collect();
        BannedPhraseScreen { patterns }
    }

    /// Screen a generated reply. Sentences containing a banned phrase are
    /// replaced whole; surrounding sentences are kept.
    pub fn screen(&self, generated: &str) -> RewriteOutcome {
        let mut violations = Vec::new();
        let sentences = split_sentences(generated);
        let mut kept = Vec::with_capacity(sentences.len());
        let mut replaced = false;

        for sentence in sentences {
            let mut offending = false;
            for (class, regex) in &self.patterns {
                if regex.is_match(sentence) {
                    offending = true;
                    if !violations.iter().any(|v| v == class) {
                        violations.push(class.to_string());
                    }
                }
            }
            if offending {
                if !replaced {
                    kept.push(REPLACEMENT_LINE.to_string());
                    replaced = true;
                }
            } else {
                kept.push(sentence.trim().to_string());
            }
        }

        RewriteOutcome {
            text: kept.join(" "),
            rewritten: replaced,
            violations,
        }
    }
}

impl Default for BannedPhraseScreen {
    fn default() -> Self {
        Self::new()
    }
}

fn split_sentences(text: &str) -> Vec<&str> {
    text.split_inclusive(['.', '?', '\n'])
        .filter(|s| !s.trim().is_empty())
        .collect()
}
