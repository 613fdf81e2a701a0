//! HTTP form backend.
//!
//! Exposes the form pipeline over HTTP: validation, preview, payload building,
//! derived fields and submission to the generation endpoint. Each request gets
//! its own `FormSession`; only the config, the HTTP client and the shared busy
//! flag live in `AppState`.

pub mod handlers;
pub mod models;

use actix_web::web;

use crate::config::FormConfig;
use crate::submission::{BusyFlag, SubmissionClient};

#[derive(Clone)]
pub struct AppState {
    pub config: FormConfig,
    pub client: SubmissionClient,
    pub busy: BusyFlag,
}

impl AppState {
    pub fn new(config: FormConfig) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .pool_idle_timeout(std::time::Duration::from_secs(900))
            .user_agent(concat!("rental-agreement/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(config, http_client))
    }

    pub fn with_client(config: FormConfig, http_client: reqwest::Client) -> Self {
        let client = SubmissionClient::new(config.generator_url.clone(), http_client);
        Self {
            config,
            client,
            busy: BusyFlag::new(),
        }
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/health").route(web::get().to(handlers::health)))
        .service(
            web::scope("/api/form")
                .service(web::resource("/validate").route(web::post().to(handlers::validate_form)))
                .service(web::resource("/preview").route(web::post().to(handlers::preview_form)))
                .service(web::resource("/payload").route(web::post().to(handlers::build_form_payload)))
                .service(web::resource("/derive").route(web::post().to(handlers::derive_fields)))
                .service(web::resource("/submit").route(web::post().to(handlers::submit_form))),
        );
}
