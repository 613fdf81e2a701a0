//! Builds the payload sent to the document generation endpoint.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use utoipa::openapi::schema::{ObjectBuilder, Schema, Type};
use utoipa::openapi::RefOr;
use utoipa::{PartialSchema, ToSchema};

use super::date::{normalize_date, NormalizedDate};
use super::fields;
use super::record::FormRecord;

/// Suffix of every generated download.
pub const DOWNLOAD_SUFFIX: &str = "-agreement.pdf";

/// A payload value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadValue {
    Text(String),
    /// A date field whose raw value did not parse. Serializes as `null`.
    UnparsedDate(String),
}

impl PayloadValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::UnparsedDate(_) => None,
        }
    }
}

impl From<NormalizedDate> for PayloadValue {
    fn from(date: NormalizedDate) -> Self {
        match date {
            NormalizedDate::Formatted(value) => Self::Text(value),
            NormalizedDate::Unparsed(raw) => Self::UnparsedDate(raw),
        }
    }
}

impl Serialize for PayloadValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(value) => serializer.serialize_str(value),
            Self::UnparsedDate(_) => serializer.serialize_none(),
        }
    }
}

/// Immutable, server-bound snapshot of a `FormRecord`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionPayload {
    entries: Vec<(String, PayloadValue)>,
}

impl SubmissionPayload {
    pub fn get(&self, key: &str) -> Option<&PayloadValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Text of a key, if present and not an unparsed date.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(PayloadValue::as_text)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PayloadValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `<v8>-agreement.pdf`. Any filename the server proposes is ignored.
    pub fn download_filename(&self) -> String {
        format!("{}{}", self.text(fields::ROOM).unwrap_or(""), DOWNLOAD_SUFFIX)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl Serialize for SubmissionPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl PartialSchema for SubmissionPayload {
    fn schema() -> RefOr<Schema> {
        ObjectBuilder::new()
            .description(Some(
                "Flat map of field key to value; unparsable dates are null",
            ))
            .additional_properties(Some(
                ObjectBuilder::new().schema_type(Type::String),
            ))
            .into()
    }
}

impl ToSchema for SubmissionPayload {}

/// Build the submission payload from the current record.
///
/// `remaining_date` never appears under its own name. Its presence annotates
/// `v6` with the raw `v6` text and the normalized promised date. Date fields
/// are normalized; every other key passes through. No validation happens here.
pub fn build_payload(record: &FormRecord) -> SubmissionPayload {
    let remaining_date = record.value(fields::REMAINING_DATE);

    let entries = record
        .iter()
        .filter(|(key, _)| *key != fields::REMAINING_DATE)
        .map(|(key, raw)| {
            let value = if fields::PAYLOAD_DATE_FIELDS.contains(&key) {
                PayloadValue::from(normalize_date(raw))
            } else if key == fields::REMAINING_RENT && !remaining_date.is_empty() {
                PayloadValue::Text(format!(
                    "{} - WILL PAY {}",
                    raw,
                    normalize_date(remaining_date)
                ))
            } else {
                PayloadValue::Text(raw.to_string())
            };
            (key.to_string(), value)
        })
        .collect();

    SubmissionPayload { entries }
}
