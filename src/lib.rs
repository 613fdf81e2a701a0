use actix_cors::Cors;
use actix_web::middleware::Compress;
use actix_web::{http::header, web, App, HttpServer};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod form;
pub mod server;
pub mod session;
pub mod submission;

pub use crate::config::FormConfig;
pub use crate::server::AppState;
pub use crate::session::{FormSession, SubmitOutcome};

/// Error body returned by the form backend.
///
/// `error` carries the human-readable message, the same contract the
/// generation endpoint follows, so clients can read either the same way.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: String,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(kind: &str, message: &str) -> Self {
        Self {
            error: message.to_string(),
            kind: kind.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn validation(message: &str) -> Self {
        Self::new("ValidationFailed", message)
    }

    pub fn conflict(message: &str) -> Self {
        Self::new("Conflict", message)
    }

    pub fn bad_gateway(message: &str) -> Self {
        Self::new("GenerationFailed", message)
    }

    pub fn internal_error(message: &str) -> Self {
        Self::new("InternalServerError", message)
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::server::handlers::health,
        crate::server::handlers::validate_form,
        crate::server::handlers::preview_form,
        crate::server::handlers::build_form_payload,
        crate::server::handlers::derive_fields,
        crate::server::handlers::submit_form
    ),
    components(
        schemas(
            form::FormRecord,
            form::SubmissionPayload,
            form::Preview,
            form::PreviewEntry,
            form::ValidationError,
            form::ValidationErrors,
            server::models::HealthResponse,
            server::models::ValidationReport,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Form Service", description = "Rental agreement form normalization and submission.")
    )
)]
pub struct ApiDoc;

pub async fn run() -> std::io::Result<()> {
    dotenvy::dotenv().ok(); // Load .env file
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let form_config = match FormConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let app_state = match AppState::new(form_config.clone()) {
        Ok(state) => web::Data::new(state),
        Err(e) => {
            log::error!("Failed to create HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    log::info!(
        "Starting server at http://{}:{}, generating through {}",
        form_config.host,
        form_config.port,
        form_config.generator_url
    );

    let allowed_origins = form_config.allowed_origins.clone();

    HttpServer::new(move || {
        let app_state = app_state.clone();
        let cors = allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
            .expose_headers(vec![header::CONTENT_DISPOSITION])
            .max_age(3600);

        App::new()
            .wrap(Compress::default())
            .wrap(cors)
            .app_data(app_state)
            .configure(server::config)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind((form_config.host.as_str(), form_config.port))?
    .run()
    .await
}
