//! Transport-agnostic request descriptors.
//!
//! Pure functions only: no I/O.

use std::collections::BTreeMap;

/// Path shared by every job service call; only the XML body differs.
pub const SERVICE_PATH: &str = "/ws/JobService/v1";

pub const CONTENT_TYPE: &str = "text/xml;charset=UTF-8";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Post,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Post => "POST",
        }
    }
}

/// A fully built request. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    path: String,
    method: Method,
    headers: BTreeMap<String, String>,
    body: String,
}

impl RequestDescriptor {
    /// A POST of `body` to [`SERVICE_PATH`] with the XML content type.
    #[must_use]
    pub fn soap(body: String) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), CONTENT_TYPE.to_string());
        Self {
            path: SERVICE_PATH.to_string(),
            method: Method::Post,
            headers,
            body,
        }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn method(&self) -> Method {
        self.method
    }

    #[must_use]
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Join a base endpoint and a request path with exactly one `/` between.
#[must_use]
pub fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
