//! Shared port doubles for unit tests.
//!
//! Every double records what it was asked to do so tests can assert on call
//! counts, request bodies and ordering.

#![allow(clippy::expect_used)]

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use modelhub_cli::application::ports::{
    HttpResponse, HttpTransport, ModelConnection, ModelServer, ProgressReporter, TemplateSource,
};
use modelhub_cli::application::services::platform::ClientSettings;
use modelhub_cli::domain::{ClientError, Credentials, RequestDescriptor, TemplateId};

pub const SERVICE_URL: &str = "https://jobs.example.invalid";

/// Ordered record of side effects shared between doubles.
pub type EventLog = Rc<RefCell<Vec<String>>>;

pub fn event_log() -> EventLog {
    Rc::new(RefCell::new(Vec::new()))
}

pub fn api_key_settings() -> ClientSettings {
    ClientSettings {
        service_url: SERVICE_URL.to_string(),
        credentials: Credentials::ApiKey {
            username: "ann".to_string(),
            api_key: "secret-key".to_string(),
        },
        max_poll_attempts: None,
    }
}

// ── Response bodies ───────────────────────────────────────────────────────────

fn envelope(inner: &str) -> String {
    format!(
        r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/"><soap:Body>{inner}</soap:Body></soap:Envelope>"#
    )
}

/// 200 response accepting a submission as job `job_id`.
pub fn accepted(job_id: &str) -> HttpResponse {
    HttpResponse::new(
        200,
        "OK",
        &envelope(&format!(
            "<SubmitJobResponse><Result>{job_id}</Result></SubmitJobResponse>"
        )),
    )
}

/// 200 status response with a job still running.
pub fn running(job_id: &str) -> HttpResponse {
    status(job_id, "Running", "")
}

/// 200 status response for a completed job.
pub fn completed(job_id: &str, result: &str) -> HttpResponse {
    status(job_id, "Completed", &format!("<Result>{result}</Result>"))
}

/// 200 status response for a failed job.
pub fn failed(job_id: &str, message: &str) -> HttpResponse {
    status(
        job_id,
        "Failed",
        &format!("<ErrorMessage>{message}</ErrorMessage>"),
    )
}

fn status(job_id: &str, state: &str, extra: &str) -> HttpResponse {
    HttpResponse::new(
        200,
        "OK",
        &envelope(&format!(
            "<RetrieveJobStatusResult><JobId>{job_id}</JobId>\
             <StartTime>2026-01-05T10:00:00Z</StartTime>\
             <State>{state}</State>{extra}</RetrieveJobStatusResult>"
        )),
    )
}

/// 500 response carrying a SOAP fault.
pub fn fault(message: &str) -> HttpResponse {
    HttpResponse::new(
        500,
        "Internal Server Error",
        &envelope(&format!(
            "<soap:Fault><faultcode>soap:Server</faultcode><faultstring>{message}</faultstring></soap:Fault>"
        )),
    )
}

// ── Transport ─────────────────────────────────────────────────────────────────

/// Replays scripted outcomes in order and records every request.
pub struct ScriptedTransport {
    script: RefCell<VecDeque<Result<HttpResponse, ClientError>>>,
    requests: RefCell<Vec<(String, RequestDescriptor)>>,
    log: EventLog,
}

impl ScriptedTransport {
    pub fn new(responses: impl IntoIterator<Item = HttpResponse>) -> Self {
        Self::with_log(responses, event_log())
    }

    pub fn with_log(responses: impl IntoIterator<Item = HttpResponse>, log: EventLog) -> Self {
        Self::scripted(responses.into_iter().map(Ok), log)
    }

    pub fn scripted(
        outcomes: impl IntoIterator<Item = Result<HttpResponse, ClientError>>,
        log: EventLog,
    ) -> Self {
        Self {
            script: RefCell::new(outcomes.into_iter().collect()),
            requests: RefCell::new(Vec::new()),
            log,
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn url(&self, n: usize) -> String {
        self.requests.borrow()[n].0.clone()
    }

    pub fn body(&self, n: usize) -> String {
        self.requests.borrow()[n].1.body().to_string()
    }

    pub fn remaining(&self) -> usize {
        self.script.borrow().len()
    }
}

impl HttpTransport for ScriptedTransport {
    async fn send(
        &self,
        url: &str,
        request: &RequestDescriptor,
    ) -> Result<HttpResponse, ClientError> {
        self.requests
            .borrow_mut()
            .push((url.to_string(), request.clone()));
        self.log.borrow_mut().push("send".to_string());
        self.script
            .borrow_mut()
            .pop_front()
            .expect("transport called more often than scripted")
    }
}

// ── Templates ─────────────────────────────────────────────────────────────────

/// Minimal templates held in memory; counts loads per id.
pub struct InMemoryTemplates {
    texts: HashMap<TemplateId, String>,
    loads: Cell<usize>,
}

impl InMemoryTemplates {
    pub fn standard() -> Self {
        let credentials =
            "<User>{{User}}</User><ApiKey>{{ApiKey}}</ApiKey><Password>{{Password}}</Password>";
        let texts = [
            (
                TemplateId::CreateNewApp,
                "<ProjectName>{{ProjectName}}</ProjectName><ProjectSummary>{{ProjectSummary}}</ProjectSummary>",
            ),
            (
                TemplateId::CreateOnlineWorkingCopy,
                "<ProjectId>{{ProjectId}}</ProjectId><Branch>{{Branch}}</Branch><Revision>{{Revision}}</Revision>",
            ),
            (
                TemplateId::CommitWorkingCopyChanges,
                "<ProjectId>{{ProjectId}}</ProjectId><WorkingCopyId>{{WorkingCopyId}}</WorkingCopyId><Branch>{{Branch}}</Branch><Revision>{{Revision}}</Revision>",
            ),
            (TemplateId::RetrieveJobStatus, "<JobId>{{JobId}}</JobId>"),
        ]
        .into_iter()
        .map(|(id, body)| (id, format!("<{id}>{credentials}{body}</{id}>")))
        .collect();
        Self {
            texts,
            loads: Cell::new(0),
        }
    }

    pub fn without(mut self, id: TemplateId) -> Self {
        self.texts.remove(&id);
        self
    }

    pub fn loads(&self) -> usize {
        self.loads.get()
    }
}

impl TemplateSource for InMemoryTemplates {
    fn load(&self, id: TemplateId) -> Result<String, ClientError> {
        self.loads.set(self.loads.get() + 1);
        self.texts
            .get(&id)
            .cloned()
            .ok_or_else(|| ClientError::TemplateLoad {
                template: id.file_name(),
                detail: "not found".to_string(),
            })
    }
}

// ── Reporter ──────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingReporter {
    pub messages: RefCell<Vec<String>>,
}

impl RecordingReporter {
    pub fn contains(&self, needle: &str) -> bool {
        self.messages.borrow().iter().any(|m| m.contains(needle))
    }
}

impl ProgressReporter for RecordingReporter {
    fn step(&self, message: &str) {
        self.messages.borrow_mut().push(format!("step: {message}"));
    }
    fn success(&self, message: &str) {
        self.messages.borrow_mut().push(format!("success: {message}"));
    }
    fn warn(&self, message: &str) {
        self.messages.borrow_mut().push(format!("warn: {message}"));
    }
}

// ── Model collaborator ────────────────────────────────────────────────────────

pub struct RecordingModelServer {
    log: EventLog,
    fail_close: bool,
}

impl RecordingModelServer {
    pub fn new(log: EventLog) -> Self {
        Self {
            log,
            fail_close: false,
        }
    }

    pub fn failing_close(log: EventLog) -> Self {
        Self {
            log,
            fail_close: true,
        }
    }
}

#[derive(Debug)]
pub struct RecordingModel {
    pub working_copy_id: String,
    log: EventLog,
    fail_close: bool,
}

impl ModelServer for RecordingModelServer {
    type Model = RecordingModel;

    async fn open_working_copy(&self, working_copy_id: &str) -> Result<RecordingModel, ClientError> {
        self.log.borrow_mut().push(format!("open {working_copy_id}"));
        Ok(RecordingModel {
            working_copy_id: working_copy_id.to_string(),
            log: Rc::clone(&self.log),
            fail_close: self.fail_close,
        })
    }
}

impl ModelConnection for RecordingModel {
    async fn close_connection(&self) -> Result<(), ClientError> {
        self.log
            .borrow_mut()
            .push(format!("close {}", self.working_copy_id));
        if self.fail_close {
            return Err(ClientError::ModelServer("connection already lost".to_string()));
        }
        Ok(())
    }
}
