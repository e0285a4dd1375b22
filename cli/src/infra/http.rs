//! Infrastructure implementation of the `HttpTransport` port.
//!
//! `ReqwestTransport` performs the network exchange with `reqwest`. Any
//! status line counts as a successful exchange; only failures before a
//! status is received become `ClientError::Connection`.

use crate::application::ports::{HttpResponse, HttpTransport};
use crate::domain::{ClientError, Method, RequestDescriptor};

/// Production `HttpTransport`. No timeout is set beyond reqwest's defaults.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// # Errors
    ///
    /// Returns [`ClientError::Connection`] if the TLS backend cannot be
    /// initialised.
    pub fn new() -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("modelhub/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(connection_error)?;
        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    async fn send(
        &self,
        url: &str,
        request: &RequestDescriptor,
    ) -> Result<HttpResponse, ClientError> {
        let mut builder = match request.method() {
            Method::Post => self.client.post(url),
        };
        for (name, value) in request.headers() {
            builder = builder.header(name, value);
        }

        tracing::debug!(url, method = request.method().as_str(), "sending request");
        let response = builder
            .body(request.body().to_string())
            .send()
            .await
            .map_err(connection_error)?;

        let status = response.status();
        let body = response.text().await.map_err(connection_error)?;
        tracing::debug!(url, status = status.as_u16(), bytes = body.len(), "received response");

        Ok(HttpResponse {
            status: Some(status.as_u16()),
            // reqwest drops the server's reason phrase; use the standard one.
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}

fn connection_error(err: reqwest::Error) -> ClientError {
    let detail = match std::error::Error::source(&err) {
        Some(source) => format!("{err}: {source}"),
        None => err.to_string(),
    };
    ClientError::Connection(detail)
}
