//! Human-readable snapshot of the raw form values.
//!
//! Reads the record directly: no date normalization, no balance logic and no
//! `v6` annotation, so it can differ from what gets submitted.

use serde::Serialize;
use utoipa::ToSchema;

use super::fields::display_label;
use super::record::FormRecord;

pub const EMPTY_PREVIEW_MESSAGE: &str = "Please fill in the form first to see a preview.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PreviewEntry {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Preview {
    Entries { entries: Vec<PreviewEntry> },
    Empty { message: String },
}

impl Preview {
    pub fn entries(&self) -> &[PreviewEntry] {
        match self {
            Self::Entries { entries } => entries,
            Self::Empty { .. } => &[],
        }
    }

    /// Plain-text rendering, one `label: value` per line.
    pub fn to_text(&self) -> String {
        match self {
            Self::Entries { entries } => entries
                .iter()
                .map(|e| format!("{}: {}", e.label, e.value))
                .collect::<Vec<_>>()
                .join("\n"),
            Self::Empty { message } => message.clone(),
        }
    }
}

pub fn render_preview(record: &FormRecord) -> Preview {
    let entries: Vec<PreviewEntry> = record
        .iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(key, value)| PreviewEntry {
            label: display_label(key).to_string(),
            value: value.to_string(),
        })
        .collect();

    if entries.is_empty() {
        Preview::Empty {
            message: EMPTY_PREVIEW_MESSAGE.to_string(),
        }
    } else {
        Preview::Entries { entries }
    }
}
