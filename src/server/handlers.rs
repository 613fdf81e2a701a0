use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse, Responder};

use super::models::{HealthResponse, ValidationReport};
use super::AppState;
use crate::form::validation::check_form_validity;
use crate::form::{build_payload, fields, render_preview, FormRecord, Preview, SubmissionPayload};
use crate::session::{FormSession, SubmitOutcome};
use crate::submission::{MemorySink, SubmissionError};
use crate::ErrorResponse;

#[utoipa::path(
    get,
    path = "/health",
    tag = "Form Service",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
    })
}

#[utoipa::path(
    post,
    path = "/api/form/validate",
    tag = "Form Service",
    request_body = FormRecord,
    responses(
        (status = 200, description = "Form passes every constraint", body = ValidationReport),
        (status = 422, description = "Form has invalid fields", body = ValidationReport)
    )
)]
pub async fn validate_form(item: web::Json<FormRecord>) -> impl Responder {
    match check_form_validity(&item) {
        Ok(()) => HttpResponse::Ok().json(ValidationReport::valid()),
        Err(errors) => {
            log::debug!("form validation failed with {} errors", errors.len());
            HttpResponse::UnprocessableEntity().json(ValidationReport::invalid(errors))
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/form/preview",
    tag = "Form Service",
    request_body = FormRecord,
    responses(
        (status = 200, description = "Raw values with display labels", body = Preview)
    )
)]
pub async fn preview_form(item: web::Json<FormRecord>) -> impl Responder {
    HttpResponse::Ok().json(render_preview(&item))
}

#[utoipa::path(
    post,
    path = "/api/form/payload",
    tag = "Form Service",
    request_body = FormRecord,
    responses(
        (status = 200, description = "Payload that would be submitted", body = SubmissionPayload)
    )
)]
pub async fn build_form_payload(item: web::Json<FormRecord>) -> impl Responder {
    HttpResponse::Ok().json(build_payload(&item))
}

#[utoipa::path(
    post,
    path = "/api/form/derive",
    tag = "Form Service",
    request_body = FormRecord,
    responses(
        (status = 200, description = "Record with phone formatting, remaining balance and check-out date applied", body = FormRecord)
    )
)]
pub async fn derive_fields(state: web::Data<AppState>, item: web::Json<FormRecord>) -> impl Responder {
    let record = item.into_inner();
    let mut session = FormSession::with_record(&state.config, record.clone());

    if let Some(phone) = record.get(fields::PHONE) {
        session.on_input(fields::PHONE, phone);
    }
    for key in [fields::TOTAL_RENT, fields::RECEIVED_RENT] {
        if let Some(amount) = record.get(key) {
            session.on_input(key, amount);
        }
    }
    if let Some(check_in) = record.get(fields::CHECK_IN) {
        session.on_change(fields::CHECK_IN, check_in);
    }

    HttpResponse::Ok().json(session.record())
}

#[utoipa::path(
    post,
    path = "/api/form/submit",
    tag = "Form Service",
    request_body = FormRecord,
    responses(
        (status = 200, description = "Generated agreement", body = Vec<u8>, content_type = "application/pdf"),
        (status = 409, description = "Another submission is in flight", body = ErrorResponse),
        (status = 422, description = "Form has invalid fields", body = ErrorResponse),
        (status = 502, description = "Generation endpoint failed", body = ErrorResponse)
    )
)]
pub async fn submit_form(state: web::Data<AppState>, item: web::Json<FormRecord>) -> impl Responder {
    let mut session = FormSession::with_record(&state.config, item.into_inner())
        .with_busy_flag(state.busy.clone());
    let sink = MemorySink::new();

    match session.submit(&state.client, &sink).await {
        SubmitOutcome::Delivered { filename, .. } => match sink.take_last() {
            Some(file) => HttpResponse::Ok()
                .content_type("application/pdf")
                .insert_header(ContentDisposition {
                    disposition: DispositionType::Attachment,
                    parameters: vec![DispositionParam::Filename(filename)],
                })
                .body(file.bytes),
            None => HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Generated file was not captured")),
        },
        SubmitOutcome::Invalid(errors) => {
            let message = errors.to_string();
            HttpResponse::UnprocessableEntity().json(ErrorResponse::validation(&message))
        }
        SubmitOutcome::Busy => HttpResponse::Conflict().json(ErrorResponse::conflict(
            "A submission is already in progress",
        )),
        SubmitOutcome::Failed(SubmissionError::Delivery(e)) => {
            HttpResponse::InternalServerError().json(ErrorResponse::internal_error(&e.to_string()))
        }
        SubmitOutcome::Failed(e) => {
            HttpResponse::BadGateway().json(ErrorResponse::bad_gateway(&e.to_string()))
        }
    }
}
