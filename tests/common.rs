#![allow(dead_code)]

use rental_agreement::form::FormRecord;
use rental_agreement::FormConfig;

pub const PDF_BYTES: &[u8] = b"%PDF-1.4\n% test agreement\n";

/// A record that passes every form constraint.
pub fn complete_record() -> FormRecord {
    [
        ("agreement_number", "AG-2024-017"),
        ("agreement_date", "2024-03-05"),
        ("name", "Ali Hassan"),
        ("nationality", "Egyptian"),
        ("phone", "050-123-4567"),
        ("citizen", "Resident"),
        ("passport", "A1234567"),
        ("v1", "2024-06-01"),
        ("v2", "2024-06-10"),
        ("v3", "Monthly rent, furnished"),
        ("v4", "1000"),
        ("v5", "300"),
        ("v6", "700"),
        ("remaining_date", ""),
        ("v7", "200"),
        ("v8", "A-12"),
    ]
    .into_iter()
    .collect()
}

pub fn config_for(generator_url: String) -> FormConfig {
    FormConfig {
        generator_url,
        ..FormConfig::default()
    }
}

/// An endpoint nothing listens on.
pub fn unreachable_url() -> String {
    "http://127.0.0.1:9/generate-pdf".to_string()
}
