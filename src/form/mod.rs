//! Form module - normalization, validation and payload construction for the
//! rental agreement form.
//!
//! Submodules, leaf-first:
//! - `date` - date parsing and `DD-MM-YY` normalization
//! - `fields` - field keys and the display label catalog
//! - `record` - the ordered raw `FormRecord`
//! - `validation` - per-field rules, form constraints, reactive tracker
//! - `derived` - remaining balance, phone formatting, stay dates
//! - `payload` - the server-bound `SubmissionPayload`
//! - `preview` - the raw, unvalidated review snapshot

pub mod date;
pub mod derived;
pub mod fields;
pub mod payload;
pub mod preview;
pub mod record;
pub mod validation;

pub use date::{normalize_date, NormalizedDate};
pub use payload::{build_payload, PayloadValue, SubmissionPayload};
pub use preview::{render_preview, Preview, PreviewEntry};
pub use record::FormRecord;
pub use validation::{ValidationError, ValidationErrors, ValidationTracker};
