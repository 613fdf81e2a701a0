//! Transient user messages. One at a time; a new one replaces the old.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use utoipa::ToSchema;

pub const DEFAULT_TOAST_SECONDS: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub shown_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Toast {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug)]
pub struct ToastSlot {
    lifetime: Duration,
    current: Option<Toast>,
}

impl Default for ToastSlot {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_TOAST_SECONDS))
    }
}

impl ToastSlot {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            lifetime,
            current: None,
        }
    }

    pub fn show(&mut self, kind: ToastKind, message: impl Into<String>) -> &Toast {
        self.show_at(kind, message, Utc::now())
    }

    pub fn show_at(
        &mut self,
        kind: ToastKind,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) -> &Toast {
        let toast = Toast {
            kind,
            message: message.into(),
            shown_at: now,
            expires_at: now
                .checked_add_signed(self.lifetime)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        };
        match kind {
            ToastKind::Success => log::info!("{}", toast.message),
            ToastKind::Error => log::warn!("{}", toast.message),
        }
        self.current.insert(toast)
    }

    /// The message still visible at `now`.
    pub fn visible_at(&self, now: DateTime<Utc>) -> Option<&Toast> {
        self.current.as_ref().filter(|t| !t.is_expired_at(now))
    }

    pub fn current(&self) -> Option<&Toast> {
        self.visible_at(Utc::now())
    }

    pub fn dismiss(&mut self) -> Option<Toast> {
        self.current.take()
    }
}
