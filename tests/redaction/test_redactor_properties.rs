// Copyright (c) 2025 Solace Health Labs
// SPDX-License-Identifier: BUSL-1.1

//! Redaction behaviour over realistic journal-style text. The key property
//! is idempotence: redacted output fed back in must come out unchanged.

use solace_safety_node::redaction::{PiiCategory, RedactionConfig, Redactor};

const SAMPLES: &[&str] = &[
    "call me on 07911 123456 or +44 7911 654321",
    "my NHS number is 943 476 5919 and my NI is QQ123456C",
    "I live at SW1A 1AA, email sam.lee@example.co.uk",
    "paid with 4111 1111 1111 1111 yesterday",
    "see https://example.com/help or find @quiet_mind",
    "reference 12345678 on the letter",
    "nothing sensitive here at all",
];

#[test]
fn test_redaction_is_idempotent_across_samples() {
    let redactor = Redactor::default();
    for sample in SAMPLES {
        let first = redactor.redact(sample);
        let second = redactor.redact(&first.redacted_text);
        assert_eq!(
            second.redacted_text, first.redacted_text,
            "second pass changed output for {:?}",
            sample
        );
        assert_eq!(second.pii_count, 0, "second pass found PII in {:?}", sample);
    }
}

#[test]
fn test_health_identifier_marks_message_high_risk() {
    let redactor = Redactor::default();
    let outcome = redactor.redact("my NHS number is 943 476 5919");
    assert!(outcome.high_risk);
    assert!(outcome.categories.contains(&PiiCategory::HealthIdentifier));
    assert_eq!(outcome.redacted_text, "my NHS number is [health-id]");
}

#[test]
fn test_phone_alone_is_not_high_risk() {
    let redactor = Redactor::default();
    let outcome = redactor.redact("ring me on 07911 123456");
    assert!(!outcome.high_risk);
    assert_eq!(outcome.redacted_text, "ring me on [phone]");
}

#[test]
fn test_mixed_message_counts_every_match() {
    let redactor = Redactor::default();
    let outcome = redactor.redact("email a@b.com or b@c.org, handle @someone");
    assert_eq!(outcome.pii_count, 3);
    assert!(outcome.categories.contains(&PiiCategory::Email));
    assert!(outcome.categories.contains(&PiiCategory::SocialHandle));
}

#[test]
fn test_clean_text_passes_through_untouched() {
    let redactor = Redactor::default();
    let text = "I had a rough day but the walk helped";
    let outcome = redactor.redact(text);
    assert_eq!(outcome.redacted_text, text);
    assert_eq!(outcome.pii_count, 0);
    assert!(!outcome.high_risk);
    assert!(outcome.categories.is_empty());
}

#[test]
fn test_dates_and_names_only_redacted_when_enabled() {
    let default = Redactor::default();
    let strict = Redactor::new(RedactionConfig {
        redact_dates: true,
        redact_names: true,
    });

    let text = "saw Jane Smith on 12/03/2025";
    assert_eq!(default.redact(text).redacted_text, text);

    let outcome = strict.redact(text);
    assert_eq!(outcome.redacted_text, "saw [name] on [date]");
    assert!(outcome.categories.contains(&PiiCategory::Date));
    assert!(outcome.categories.contains(&PiiCategory::PersonName));
}
