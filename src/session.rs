//! The form context: current values, validation state, busy flag and the
//! user-facing message, plus the submit lifecycle.
//!
//! Everything here runs synchronously between events except the request in
//! `submit`. The record is snapshotted into a payload before the request, so
//! edits made while it is in flight do not affect what was sent.

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::config::FormConfig;
use crate::form::derived::{
    advance_check_out, apply_default_dates, format_phone_input, recalculate_remaining_balance,
};
use crate::form::validation::{check_form_validity, ValidationState};
use crate::form::{
    build_payload, fields, render_preview, FormRecord, Preview, SubmissionPayload,
    ValidationErrors, ValidationTracker,
};
use crate::submission::{
    BusyFlag, BusyGuard, DownloadSink, SubmissionClient, SubmissionError, ToastKind, ToastSlot,
};

pub const SUCCESS_MESSAGE: &str = "PDF generated successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitState {
    Idle,
    Validating,
    Submitting,
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// The form failed validation; nothing was sent.
    Invalid(ValidationErrors),
    /// A previous submission is still in flight and the guard is on.
    Busy,
    Delivered { filename: String, location: String },
    Failed(SubmissionError),
}

impl SubmitOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered { .. })
    }
}

pub struct FormSession {
    record: FormRecord,
    tracker: ValidationTracker,
    busy: BusyFlag,
    toast: ToastSlot,
    state: SubmitState,
    submit_guard: bool,
}

impl FormSession {
    /// A blank form with default stay dates starting today.
    pub fn new(config: &FormConfig) -> Self {
        Self::new_on(config, Local::now().date_naive())
    }

    pub fn new_on(config: &FormConfig, today: NaiveDate) -> Self {
        let mut record = FormRecord::blank();
        apply_default_dates(&mut record, today);
        Self::with_record(config, record)
    }

    /// Wrap values collected elsewhere, taken as-is.
    pub fn with_record(config: &FormConfig, record: FormRecord) -> Self {
        Self {
            record,
            tracker: ValidationTracker::new(),
            busy: BusyFlag::new(),
            toast: ToastSlot::new(config.toast_lifetime()),
            state: SubmitState::Idle,
            submit_guard: config.submit_guard,
        }
    }

    /// Share the busy flag with other sessions, so the submit guard spans
    /// all of them.
    pub fn with_busy_flag(mut self, busy: BusyFlag) -> Self {
        self.busy = busy;
        self
    }

    pub fn record(&self) -> &FormRecord {
        &self.record
    }

    pub fn value(&self, key: &str) -> &str {
        self.record.value(key)
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    pub fn busy(&self) -> &BusyFlag {
        &self.busy
    }

    pub fn toast(&self) -> &ToastSlot {
        &self.toast
    }

    pub fn validation(&self, key: &str) -> Option<&ValidationState> {
        self.tracker.state(key)
    }

    /// An edit to a field.
    pub fn on_input(&mut self, key: &str, value: &str) {
        let value = if key == fields::PHONE {
            format_phone_input(value)
        } else {
            value.to_string()
        };
        self.record.set(key, value);
        self.tracker.on_input(key, self.record.value(key));

        if key == fields::TOTAL_RENT || key == fields::RECEIVED_RENT {
            recalculate_remaining_balance(&mut self.record);
        }
    }

    /// A field lost focus.
    pub fn on_blur(&mut self, key: &str) -> &ValidationState {
        self.tracker.on_blur(key, self.record.value(key))
    }

    /// A committed change (date pickers, selects).
    pub fn on_change(&mut self, key: &str, value: &str) {
        self.record.set(key, value);
        if key == fields::CHECK_IN && advance_check_out(&mut self.record) {
            log::debug!("check-out moved to {}", self.record.value(fields::CHECK_OUT));
        }
    }

    pub fn preview(&self) -> Preview {
        render_preview(&self.record)
    }

    pub fn payload(&self) -> SubmissionPayload {
        build_payload(&self.record)
    }

    fn enter_submitting(&mut self) -> Option<BusyGuard> {
        if self.submit_guard {
            self.busy.try_acquire()
        } else {
            Some(self.busy.acquire())
        }
    }

    /// Validate, send and deliver.
    pub async fn submit<S>(&mut self, client: &SubmissionClient, sink: &S) -> SubmitOutcome
    where
        S: DownloadSink + ?Sized,
    {
        self.state = SubmitState::Validating;
        if let Err(errors) = check_form_validity(&self.record) {
            self.state = SubmitState::Idle;
            if let Some(first) = errors.first() {
                log::warn!("submission blocked: {}", first);
                self.toast.show(ToastKind::Error, first.message.clone());
            }
            return SubmitOutcome::Invalid(errors);
        }

        let payload = build_payload(&self.record);

        let Some(_guard) = self.enter_submitting() else {
            self.state = SubmitState::Idle;
            log::warn!("submission ignored, a request is already in flight");
            return SubmitOutcome::Busy;
        };
        self.state = SubmitState::Submitting;

        let outcome = match client.send(&payload).await {
            Ok(file) => match sink.deliver(&file).await {
                Ok(location) => {
                    self.toast.show(ToastKind::Success, SUCCESS_MESSAGE);
                    SubmitOutcome::Delivered {
                        filename: file.filename,
                        location,
                    }
                }
                Err(e) => {
                    log::error!("failed to deliver {}: {}", file.filename, e);
                    let error = SubmissionError::Delivery(e);
                    self.toast.show(ToastKind::Error, error.user_message());
                    SubmitOutcome::Failed(error)
                }
            },
            Err(e) => {
                self.toast.show(ToastKind::Error, e.user_message());
                SubmitOutcome::Failed(e)
            }
        };

        self.state = SubmitState::Idle;
        outcome
    }
}
