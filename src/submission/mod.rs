//! Submission module - sends the payload to the generation endpoint and
//! delivers the returned file.
//!
//! - `client` - the HTTP request/response protocol
//! - `busy` - scoped "request in flight" flag
//! - `sink` - where a delivered file ends up
//! - `toast` - the single transient user message

pub mod busy;
pub mod client;
pub mod sink;
pub mod toast;

pub use busy::{BusyFlag, BusyGuard};
pub use client::{GeneratedFile, SubmissionClient, SubmissionError, GENERIC_FAILURE_MESSAGE};
pub use sink::{DeliveryError, DirectorySink, DownloadSink, MemorySink};
pub use toast::{Toast, ToastKind, ToastSlot};
