mod common;

use common::{complete_record, config_for, unreachable_url, PDF_BYTES};
use rental_agreement::session::{SubmitState, SUCCESS_MESSAGE};
use rental_agreement::submission::{
    BusyFlag, DirectorySink, MemorySink, SubmissionClient, SubmissionError, ToastKind,
};
use rental_agreement::{FormConfig, FormSession, SubmitOutcome};
use serde_json::json;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(config: &FormConfig) -> SubmissionClient {
    SubmissionClient::new(config.generator_url.clone(), reqwest::Client::new())
}

async fn endpoint(response: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(response)
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_successful_submit_delivers_and_clears_busy_once() {
    let server = endpoint(ResponseTemplate::new(200).set_body_bytes(PDF_BYTES.to_vec())).await;
    let config = config_for(format!("{}/generate-pdf", server.uri()));
    let mut session = FormSession::with_record(&config, complete_record());
    let sink = MemorySink::new();

    let outcome = session.submit(&client(&config), &sink).await;

    match outcome {
        SubmitOutcome::Delivered { filename, location } => {
            assert_eq!(filename, "A-12-agreement.pdf");
            assert_eq!(location, "memory:A-12-agreement.pdf");
        }
        other => panic!("expected delivery, got {:?}", other),
    }
    assert_eq!(sink.files()[0].bytes, PDF_BYTES);
    assert_eq!(session.busy().release_count(), 1);
    assert!(!session.busy().is_busy());
    assert_eq!(session.state(), SubmitState::Idle);

    let toast = session.toast().current().unwrap();
    assert_eq!(toast.kind, ToastKind::Success);
    assert_eq!(toast.message, SUCCESS_MESSAGE);
}

#[tokio::test]
async fn test_server_error_shows_message_and_keeps_form() {
    let server =
        endpoint(ResponseTemplate::new(422).set_body_json(json!({"error": "bad request"}))).await;
    let config = config_for(format!("{}/generate-pdf", server.uri()));
    let record = complete_record();
    let mut session = FormSession::with_record(&config, record.clone());

    let outcome = session.submit(&client(&config), &MemorySink::new()).await;

    assert!(matches!(outcome, SubmitOutcome::Failed(SubmissionError::Server(ref m)) if m == "bad request"));
    assert_eq!(session.busy().release_count(), 1);
    assert_eq!(session.record(), &record);

    let toast = session.toast().current().unwrap();
    assert_eq!(toast.kind, ToastKind::Error);
    assert_eq!(toast.message, "Error generating PDF: bad request");
}

#[tokio::test]
async fn test_network_failure_clears_busy_once() {
    let config = config_for(unreachable_url());
    let mut session = FormSession::with_record(&config, complete_record());

    let outcome = session.submit(&client(&config), &MemorySink::new()).await;

    assert!(matches!(outcome, SubmitOutcome::Failed(SubmissionError::Transport(_))));
    assert_eq!(session.busy().release_count(), 1);
    assert_eq!(
        session.toast().current().unwrap().message,
        "Error generating PDF: Failed to generate PDF"
    );
}

#[tokio::test]
async fn test_invalid_form_never_reaches_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let config = config_for(format!("{}/generate-pdf", server.uri()));
    let mut record = complete_record();
    record.set("v5", "-300");
    record.set("phone", "call me");
    let mut session = FormSession::with_record(&config, record);

    let outcome = session.submit(&client(&config), &MemorySink::new()).await;

    match outcome {
        SubmitOutcome::Invalid(errors) => {
            assert_eq!(errors.len(), 2);
            assert_eq!(errors.first().unwrap().field, "phone");
        }
        other => panic!("expected invalid, got {:?}", other),
    }
    assert_eq!(session.busy().release_count(), 0);
    assert_eq!(
        session.toast().current().unwrap().message,
        "Please enter a valid phone number"
    );
}

#[tokio::test]
async fn test_resubmission_guard_refuses_while_busy() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(PDF_BYTES.to_vec()))
        .expect(0)
        .mount(&server)
        .await;
    let config = FormConfig {
        submit_guard: true,
        ..config_for(format!("{}/generate-pdf", server.uri()))
    };
    let shared = BusyFlag::new();
    let in_flight = shared.acquire();
    let mut session =
        FormSession::with_record(&config, complete_record()).with_busy_flag(shared.clone());

    let outcome = session.submit(&client(&config), &MemorySink::new()).await;

    assert!(matches!(outcome, SubmitOutcome::Busy));
    assert!(shared.is_busy());
    assert_eq!(session.state(), SubmitState::Idle);
    drop(in_flight);
    assert_eq!(shared.release_count(), 1);
}

#[tokio::test]
async fn test_without_guard_a_second_submission_is_dispatched() {
    let server = endpoint(ResponseTemplate::new(200).set_body_bytes(PDF_BYTES.to_vec())).await;
    let config = config_for(format!("{}/generate-pdf", server.uri()));
    let shared = BusyFlag::new();
    let in_flight = shared.acquire();
    let mut session =
        FormSession::with_record(&config, complete_record()).with_busy_flag(shared.clone());

    let outcome = session.submit(&client(&config), &MemorySink::new()).await;
    assert!(outcome.is_delivered());
    assert!(shared.is_busy());
    assert_eq!(shared.release_count(), 1);

    drop(in_flight);
    assert!(!shared.is_busy());
}

#[tokio::test]
async fn test_directory_sink_saves_agreement() {
    let server = endpoint(ResponseTemplate::new(200).set_body_bytes(PDF_BYTES.to_vec())).await;
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(format!("{}/generate-pdf", server.uri()));
    let mut session = FormSession::with_record(&config, complete_record());

    let outcome = session
        .submit(&client(&config), &DirectorySink::new(dir.path()))
        .await;

    assert!(outcome.is_delivered());
    let saved = std::fs::read(dir.path().join("A-12-agreement.pdf")).unwrap();
    assert_eq!(saved, PDF_BYTES);
}
