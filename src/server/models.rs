use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::form::ValidationErrors;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Serialize, ToSchema)]
pub struct ValidationReport {
    pub valid: bool,
    /// Message of the first invalid field, as shown to the user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ValidationErrors>,
}

impl ValidationReport {
    pub fn valid() -> Self {
        Self {
            valid: true,
            message: None,
            errors: None,
        }
    }

    pub fn invalid(errors: ValidationErrors) -> Self {
        Self {
            valid: false,
            message: errors.first().map(|e| e.message.clone()),
            errors: Some(errors),
        }
    }
}
