//! Job polling against a scripted transport.
//!
//! The clock is paused, so each fixed poll delay completes instantly while
//! `tokio::time::Instant` still observes the full interval.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use modelhub_cli::application::services::job_poller::{POLL_INTERVAL, StatusClient, poll_job};
use modelhub_cli::application::services::render::TemplateRenderer;
use modelhub_cli::domain::{ClientError, Credentials};
use modelhub_common::JobId;

use crate::mocks::{
    InMemoryTemplates, RecordingReporter, SERVICE_URL, ScriptedTransport, completed, failed, fault,
    running,
};

fn credentials() -> Credentials {
    Credentials::ApiKey {
        username: "ann".to_string(),
        api_key: "secret-key".to_string(),
    }
}

fn client<'a>(
    transport: &'a ScriptedTransport,
    renderer: &'a TemplateRenderer<InMemoryTemplates>,
    credentials: &'a Credentials,
) -> StatusClient<'a, ScriptedTransport, InMemoryTemplates> {
    StatusClient {
        transport,
        renderer,
        base_url: SERVICE_URL,
        credentials,
        context: "Failed to create new app",
    }
}

#[tokio::test(start_paused = true)]
async fn polls_until_completed_and_returns_result() {
    let transport = ScriptedTransport::new([
        running("J1"),
        running("J1"),
        completed("J1", "app-42"),
    ]);
    let renderer = TemplateRenderer::new(InMemoryTemplates::standard());
    let creds = credentials();
    let reporter = RecordingReporter::default();

    let started = tokio::time::Instant::now();
    let result = poll_job(
        &client(&transport, &renderer, &creds),
        &reporter,
        &JobId::from("J1"),
        None,
    )
    .await
    .unwrap();

    assert_eq!(result, "app-42");
    assert_eq!(transport.calls(), 3);
    assert!(started.elapsed() >= POLL_INTERVAL * 3);
    assert!(reporter.contains("Job J1 is running"));
}

#[tokio::test(start_paused = true)]
async fn every_status_request_names_the_job_and_user() {
    let transport = ScriptedTransport::new([running("J7"), completed("J7", "ok")]);
    let renderer = TemplateRenderer::new(InMemoryTemplates::standard());
    let creds = credentials();

    poll_job(
        &client(&transport, &renderer, &creds),
        &RecordingReporter::default(),
        &JobId::from("J7"),
        None,
    )
    .await
    .unwrap();

    for n in 0..transport.calls() {
        assert_eq!(transport.url(n), format!("{SERVICE_URL}/ws/JobService/v1"));
        let body = transport.body(n);
        assert!(body.contains("<JobId>J7</JobId>"), "{body}");
        assert!(body.contains("<User>ann</User>"), "{body}");
        assert!(body.contains("<ApiKey>secret-key</ApiKey>"), "{body}");
    }
    // The template is parsed once for the whole loop.
    assert_eq!(renderer_loads(&renderer), 1);
}

fn renderer_loads(renderer: &TemplateRenderer<InMemoryTemplates>) -> usize {
    renderer.source().loads()
}

#[tokio::test(start_paused = true)]
async fn failed_job_surfaces_its_message_verbatim() {
    let transport = ScriptedTransport::new([running("J2"), failed("J2", "No such revision")]);
    let renderer = TemplateRenderer::new(InMemoryTemplates::standard());
    let creds = credentials();

    let err = poll_job(
        &client(&transport, &renderer, &creds),
        &RecordingReporter::default(),
        &JobId::from("J2"),
        None,
    )
    .await
    .unwrap_err();

    assert_eq!(err, ClientError::JobFailed("No such revision".to_string()));
    assert_eq!(err.to_string(), "No such revision");
    assert_eq!(transport.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn completed_without_result_is_empty_result() {
    let transport = ScriptedTransport::new([completed("J3", "")]);
    let renderer = TemplateRenderer::new(InMemoryTemplates::standard());
    let creds = credentials();

    let err = poll_job(
        &client(&transport, &renderer, &creds),
        &RecordingReporter::default(),
        &JobId::from("J3"),
        None,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ClientError::EmptyResult(_)), "{err:?}");
}

#[tokio::test(start_paused = true)]
async fn fault_while_polling_ends_the_loop_with_context() {
    let transport = ScriptedTransport::new([running("J4"), fault("Job store offline"), running("J4")]);
    let renderer = TemplateRenderer::new(InMemoryTemplates::standard());
    let creds = credentials();

    let err = poll_job(
        &client(&transport, &renderer, &creds),
        &RecordingReporter::default(),
        &JobId::from("J4"),
        None,
    )
    .await
    .unwrap_err();

    assert_eq!(err.to_string(), "Failed to create new app: Job store offline");
    assert_eq!(transport.calls(), 2);
    assert_eq!(transport.remaining(), 1);
}

#[tokio::test(start_paused = true)]
async fn transport_error_ends_the_loop() {
    let transport = ScriptedTransport::scripted(
        [
            Ok(running("J5")),
            Err(ClientError::Connection("connection reset".to_string())),
        ],
        crate::mocks::event_log(),
    );
    let renderer = TemplateRenderer::new(InMemoryTemplates::standard());
    let creds = credentials();

    let err = poll_job(
        &client(&transport, &renderer, &creds),
        &RecordingReporter::default(),
        &JobId::from("J5"),
        None,
    )
    .await
    .unwrap_err();

    assert_eq!(err.to_string(), "Connection error: connection reset");
}

#[tokio::test(start_paused = true)]
async fn max_attempts_bounds_the_loop() {
    let transport = ScriptedTransport::new([running("J6"), running("J6"), running("J6")]);
    let renderer = TemplateRenderer::new(InMemoryTemplates::standard());
    let creds = credentials();

    let err = poll_job(
        &client(&transport, &renderer, &creds),
        &RecordingReporter::default(),
        &JobId::from("J6"),
        Some(2),
    )
    .await
    .unwrap_err();

    assert_eq!(
        err,
        ClientError::PollLimitExceeded {
            job_id: "J6".to_string(),
            attempts: 2,
        }
    );
    assert_eq!(transport.calls(), 2);
}
