//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `reqwest`, `std::fs`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod credentials;
pub mod error;
pub mod handles;
pub mod request;
pub mod template;
pub mod xml;

pub use config::{ModelhubConfig, validate_config_key, validate_config_value};
pub use credentials::Credentials;
pub use error::{ClientError, ConfigError, ErrorKind};
pub use handles::{Branch, OnlineWorkingCopy, Project, Revision};
pub use request::{Method, RequestDescriptor};
pub use template::{Binding, Bindings, Template, TemplateId};
pub use xml::{XmlPath, XmlTree, extract_job_result};
