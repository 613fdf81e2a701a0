//! Input validation for the agreement form.
//!
//! Two layers: `validate_field` carries the domain rules of a single field and
//! backs the reactive blur/input validation; `check_form_validity` is the full
//! pass run before submission (required fields first, then the field rules).

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use utoipa::ToSchema;

use super::date::parse_calendar_date;
use super::fields::{self, display_label};
use super::record::FormRecord;

lazy_static! {
    static ref PHONE_PATTERN: Regex = Regex::new(r"^[\d\s\-+()]+$").unwrap();
}

pub const INVALID_PHONE_MESSAGE: &str = "Please enter a valid phone number";
pub const INVALID_AMOUNT_MESSAGE: &str = "Please enter a valid positive number";
pub const INVALID_DATE_MESSAGE: &str = "Please enter a valid date";

/// Validation error with a user-facing message.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ValidationError {
    /// The field that failed validation
    pub field: String,
    /// Human-readable error message
    pub message: String,
    /// Suggestion for how to fix the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn required(field: &str) -> Self {
        Self::new(field, format!("{} is required", display_label(field)))
            .with_suggestion("Please fill out this field")
    }

    pub fn invalid_phone(field: &str) -> Self {
        Self::new(field, INVALID_PHONE_MESSAGE)
            .with_suggestion("Use digits, spaces, +, -, ( and ) only")
    }

    pub fn invalid_amount(field: &str) -> Self {
        Self::new(field, INVALID_AMOUNT_MESSAGE)
    }

    pub fn invalid_date(field: &str) -> Self {
        Self::new(field, INVALID_DATE_MESSAGE).with_suggestion("Use the format YYYY-MM-DD")
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", display_label(&self.field), self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Collection of validation errors, in field order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// The error surfaced to the user.
    pub fn first(&self) -> Option<&ValidationError> {
        self.errors.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }

    pub fn has_error_for(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Multi-line summary of every error.
    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .enumerate()
            .map(|(i, error)| format!("{}. {}", i + 1, error))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.first() {
            Some(error) => write!(f, "{}", error.message),
            None => f.write_str("no validation errors"),
        }
    }
}

impl std::error::Error for ValidationErrors {}

// ============================================================================
// Field rules
// ============================================================================

/// Parse a whole string as a number, the way a numeric input does.
pub fn parse_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    match trimmed {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }
    // Rust accepts "inf" and "nan" spellings that a numeric input does not.
    if trimmed.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

fn validate_phone(field: &str, value: &str) -> Result<(), ValidationError> {
    if !value.is_empty() && !PHONE_PATTERN.is_match(value) {
        return Err(ValidationError::invalid_phone(field));
    }
    Ok(())
}

fn validate_amount(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }
    match parse_number(value) {
        Some(amount) if amount >= 0.0 => Ok(()),
        _ => Err(ValidationError::invalid_amount(field)),
    }
}

fn validate_date(field: &str, value: &str) -> Result<(), ValidationError> {
    if !value.is_empty() && parse_calendar_date(value).is_none() {
        return Err(ValidationError::invalid_date(field));
    }
    Ok(())
}

/// Validate one field's current value against the rule keyed by its name.
pub fn validate_field(field: &str, value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    match field {
        fields::PHONE => validate_phone(field, value),
        fields::TOTAL_RENT | fields::RECEIVED_RENT | fields::DEPOSIT => {
            validate_amount(field, value)
        }
        fields::CHECK_IN | fields::CHECK_OUT => validate_date(field, value),
        _ => Ok(()),
    }
}

/// Full-form validation run before submission.
///
/// Fields are visited in form order, then any unknown keys in record order.
/// Each field reports at most one error: the required check, else its rule.
/// The first error is the one shown to the user.
pub fn check_form_validity(record: &FormRecord) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let mut order: Vec<&str> = fields::FORM_FIELDS.to_vec();
    order.extend(
        record
            .keys()
            .filter(|key| !fields::FORM_FIELDS.iter().any(|known| known == key)),
    );

    for field in order {
        let value = record.value(field);
        if fields::is_required(field) && value.trim().is_empty() {
            errors.add(ValidationError::required(field));
        } else if let Err(error) = validate_field(field, value) {
            errors.add(error);
        }
    }

    errors.into_result()
}

// ============================================================================
// Reactive tracking
// ============================================================================

/// Validity of a single field as last computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ValidationState {
    pub valid: bool,
    pub message: Option<String>,
}

impl ValidationState {
    fn from_result(result: &Result<(), ValidationError>) -> Self {
        match result {
            Ok(()) => Self {
                valid: true,
                message: None,
            },
            Err(error) => Self {
                valid: false,
                message: Some(error.message.clone()),
            },
        }
    }
}

/// Per-field validation state driven by blur and input events.
///
/// A field is validated the first time it loses focus; from then on every
/// edit re-validates it while it stays errored. Fields never blurred carry no
/// state.
#[derive(Debug, Default)]
pub struct ValidationTracker {
    states: HashMap<String, ValidationState>,
}

impl ValidationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_blur(&mut self, field: &str, value: &str) -> &ValidationState {
        self.revalidate(field, value)
    }

    /// Re-validate on edit, only when the field is currently errored.
    pub fn on_input(&mut self, field: &str, value: &str) -> Option<&ValidationState> {
        if self.is_errored(field) {
            Some(self.revalidate(field, value))
        } else {
            None
        }
    }

    pub fn state(&self, field: &str) -> Option<&ValidationState> {
        self.states.get(field)
    }

    pub fn is_errored(&self, field: &str) -> bool {
        self.states.get(field).is_some_and(|s| !s.valid)
    }

    /// The message currently attached to the field, empty when valid.
    pub fn custom_validity(&self, field: &str) -> &str {
        self.states
            .get(field)
            .and_then(|s| s.message.as_deref())
            .unwrap_or("")
    }

    pub fn errored_fields(&self) -> impl Iterator<Item = &str> {
        self.states
            .iter()
            .filter(|(_, s)| !s.valid)
            .map(|(k, _)| k.as_str())
    }

    fn revalidate(&mut self, field: &str, value: &str) -> &ValidationState {
        let result = validate_field(field, value);
        if let Err(ref error) = result {
            log::debug!("field {} failed validation: {}", field, error.message);
        }
        let state = ValidationState::from_result(&result);
        self.states.insert(field.to_string(), state);
        &self.states[field]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_character_class() {
        assert!(validate_field("phone", "+1 (555) 123-4567").is_ok());
        assert!(validate_field("phone", "").is_ok());
        let err = validate_field("phone", "555-CALL").unwrap_err();
        assert_eq!(err.message, INVALID_PHONE_MESSAGE);
    }

    #[test]
    fn test_monetary_fields() {
        for field in ["v4", "v5", "v7"] {
            assert!(validate_field(field, "1000").is_ok());
            assert!(validate_field(field, " 12.5 ").is_ok());
            assert!(validate_field(field, "0").is_ok());
            assert!(validate_field(field, "").is_ok());
            assert!(validate_field(field, "-1").is_err());
            assert!(validate_field(field, "abc").is_err());
            assert!(validate_field(field, "NaN").is_err());
        }
    }

    #[test]
    fn test_date_fields() {
        assert!(validate_field("v1", "2024-03-05").is_ok());
        assert!(validate_field("v2", "").is_ok());
        let err = validate_field("v2", "2024-13-01").unwrap_err();
        assert_eq!(err.message, INVALID_DATE_MESSAGE);
    }

    #[test]
    fn test_unruled_fields_accept_anything() {
        assert!(validate_field("name", "").is_ok());
        assert!(validate_field("v6", "-500").is_ok());
        assert!(validate_field("agreement_date", "garbage").is_ok());
    }

    #[test]
    fn test_parse_number_rejects_rust_only_spellings() {
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number("Infinity"), Some(f64::INFINITY));
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("12abc"), None);
    }

    #[test]
    fn test_tracker_ignores_input_until_blurred() {
        let mut tracker = ValidationTracker::new();
        assert!(tracker.on_input("phone", "abc").is_none());
        assert!(tracker.state("phone").is_none());
    }

    #[test]
    fn test_tracker_revalidates_errored_field_on_input() {
        let mut tracker = ValidationTracker::new();
        assert!(!tracker.on_blur("v4", "-5").valid);
        assert_eq!(tracker.custom_validity("v4"), INVALID_AMOUNT_MESSAGE);

        let state = tracker.on_input("v4", "50").unwrap();
        assert!(state.valid);
        assert_eq!(tracker.custom_validity("v4"), "");

        // Valid again, so further edits are not validated until the next blur.
        assert!(tracker.on_input("v4", "-7").is_none());
        assert!(!tracker.is_errored("v4"));
    }

    #[test]
    fn test_form_validity_reports_errors_in_form_order() {
        let record: FormRecord = [
            ("v8", ""),
            ("name", "Ali"),
            ("phone", "call me"),
            ("v1", "2024-06-01"),
            ("v2", "2024-06-02"),
            ("v4", "1000"),
        ]
        .into_iter()
        .collect();
        let errors = check_form_validity(&record).unwrap_err();
        let first = errors.first().unwrap();
        assert_eq!(first.field, "phone");
        assert_eq!(errors.len(), 2);
        assert!(errors.has_error_for("v8"));
    }

    #[test]
    fn test_form_validity_one_error_per_field() {
        let record: FormRecord = [("name", ""), ("phone", "abc"), ("v4", "-1")]
            .into_iter()
            .collect();
        let errors = check_form_validity(&record).unwrap_err();
        let first = errors.first().unwrap();
        assert_eq!(first.field, "name");
        assert_eq!(first.message, "Full Name is required");
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "phone", "v1", "v2", "v4", "v8"]);
    }

    #[test]
    fn test_form_validity_passes_complete_record() {
        let record: FormRecord = [
            ("name", "Ali"),
            ("phone", "050-123-4567"),
            ("v1", "2024-06-01"),
            ("v2", "2024-06-02"),
            ("v4", "1000"),
            ("v8", "101"),
        ]
        .into_iter()
        .collect();
        assert!(check_form_validity(&record).is_ok());
    }
}
