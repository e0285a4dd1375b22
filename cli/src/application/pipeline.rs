//! HTTP pipeline: endpoint prefixing, dispatch and response stages.
//!
//! A [`Pipeline`] is an ordered list of [`ResponseStage`]s. Dispatch always
//! prefixes the request path with the base URL and hands the request to the
//! [`HttpTransport`]; the response then flows through each stage in order,
//! and the first stage to fail ends the call.

use modelhub_common::JobResult;

use crate::application::ports::{HttpResponse, HttpTransport};
use crate::domain::request::join_url;
use crate::domain::{ClientError, RequestDescriptor, XmlPath, XmlTree, extract_job_result};

/// Element holding the value of a successful call.
pub const RESULT_PATH: &str = "..Result[0]";

/// Element holding the message of a SOAP fault.
pub const FAULT_PATH: &str = "faultstring";

/// Value flowing between stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The raw response, as returned by the transport.
    Response(HttpResponse),
    /// A single value extracted from the body.
    Value(String),
    /// A job status snapshot extracted from the body.
    Job(JobResult),
}

impl Outcome {
    fn name(&self) -> &'static str {
        match self {
            Self::Response(_) => "raw response",
            Self::Value(_) => "extracted value",
            Self::Job(_) => "job status",
        }
    }

    /// # Errors
    ///
    /// Returns [`ClientError::InvalidResponse`] unless this is a `Value`.
    pub fn into_value(self) -> Result<String, ClientError> {
        match self {
            Self::Value(v) => Ok(v),
            other => Err(mismatch("value", &other)),
        }
    }

    /// # Errors
    ///
    /// Returns [`ClientError::InvalidResponse`] unless this is a `Job`.
    pub fn into_job(self) -> Result<JobResult, ClientError> {
        match self {
            Self::Job(j) => Ok(j),
            other => Err(mismatch("job status", &other)),
        }
    }

    fn into_response(self, stage: &str) -> Result<HttpResponse, ClientError> {
        match self {
            Self::Response(r) => Ok(r),
            other => Err(mismatch(stage, &other)),
        }
    }
}

fn mismatch(expected: &str, got: &Outcome) -> ClientError {
    ClientError::InvalidResponse(format!("expected {expected}, pipeline produced {}", got.name()))
}

// ── Stages ────────────────────────────────────────────────────────────────────

/// One response-side pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseStage {
    /// Split success, service faults and unexpected statuses.
    /// `context` prefixes the fault text of a 500 response.
    ClassifyStatus { context: String },
    /// Replace the body with the text of its first `Result` element.
    ExtractResult,
    /// Replace the body with the job status it describes.
    ExtractJobResult,
}

impl ResponseStage {
    /// Apply this stage to the upstream outcome.
    ///
    /// # Errors
    ///
    /// Returns the classification or extraction error of this stage.
    pub fn apply(&self, upstream: Outcome) -> Result<Outcome, ClientError> {
        match self {
            Self::ClassifyStatus { context } => {
                let response = upstream.into_response("raw response")?;
                classify_status(response, context).map(Outcome::Response)
            }
            Self::ExtractResult => {
                let response = upstream.into_response("raw response")?;
                extract_result(&response.body).map(Outcome::Value)
            }
            Self::ExtractJobResult => {
                let response = upstream.into_response("raw response")?;
                let tree = XmlTree::parse(&response.body)?;
                extract_job_result(&tree).map(Outcome::Job)
            }
        }
    }
}

/// Classify a raw response by status code.
///
/// # Errors
///
/// - [`ClientError::InvalidResponse`] when the status or body is missing
/// - [`ClientError::ServiceFault`] for a 500 carrying a `faultstring`
/// - [`ClientError::Parse`] / [`ClientError::EmptyResult`] when a 500 body
///   is not XML or has no `faultstring`
/// - [`ClientError::UnexpectedStatus`] for every other non-200 status
pub fn classify_status(response: HttpResponse, context: &str) -> Result<HttpResponse, ClientError> {
    let status = match response.status {
        Some(code) if code != 0 => code,
        _ => return Err(ClientError::InvalidResponse("no status code".to_string())),
    };
    if response.body.is_empty() {
        return Err(ClientError::InvalidResponse(format!(
            "empty body with status {status}"
        )));
    }

    match status {
        200 => Ok(response),
        500 => {
            let tree = XmlTree::parse(&response.body)?;
            let fault = tree
                .query(&XmlPath::new(FAULT_PATH, 0))
                .ok_or_else(|| ClientError::EmptyResult("service fault without faultstring".to_string()))?;
            Err(ClientError::ServiceFault {
                context: context.to_string(),
                fault,
            })
        }
        code => Err(ClientError::UnexpectedStatus {
            code,
            message: response.status_text,
        }),
    }
}

/// Text of the first `Result` element of `body`.
///
/// # Errors
///
/// Returns [`ClientError::Parse`] if `body` is not well-formed XML and
/// [`ClientError::EmptyResult`] if it has no `Result` element.
pub fn extract_result(body: &str) -> Result<String, ClientError> {
    let tree = XmlTree::parse(body)?;
    tree.query_expr(RESULT_PATH)
        .ok_or_else(|| ClientError::EmptyResult("response has no Result".to_string()))
}

// ── Pipeline ──────────────────────────────────────────────────────────────────

/// An ordered list of response stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    stages: Vec<ResponseStage>,
}

impl Pipeline {
    #[must_use]
    pub fn new(stages: Vec<ResponseStage>) -> Self {
        Self { stages }
    }

    /// Classification followed by single-value extraction, for job
    /// submissions.
    #[must_use]
    pub fn submission(context: &str) -> Self {
        Self::new(vec![
            ResponseStage::ClassifyStatus {
                context: context.to_string(),
            },
            ResponseStage::ExtractResult,
        ])
    }

    /// Classification followed by job status extraction, for polling.
    #[must_use]
    pub fn job_status(context: &str) -> Self {
        Self::new(vec![
            ResponseStage::ClassifyStatus {
                context: context.to_string(),
            },
            ResponseStage::ExtractJobResult,
        ])
    }

    #[must_use]
    pub fn stages(&self) -> &[ResponseStage] {
        &self.stages
    }

    /// Send `request` to `base_url` and run the response through every stage.
    ///
    /// # Errors
    ///
    /// Returns the transport error, or the error of the first failing stage.
    pub async fn dispatch(
        &self,
        transport: &impl HttpTransport,
        base_url: &str,
        request: &RequestDescriptor,
    ) -> Result<Outcome, ClientError> {
        let url = join_url(base_url, request.path());
        let response = transport.send(&url, request).await?;
        self.stages
            .iter()
            .try_fold(Outcome::Response(response), |outcome, stage| stage.apply(outcome))
    }
}
