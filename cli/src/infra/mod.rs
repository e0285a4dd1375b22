//! Infrastructure layer: concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: the HTTP transport, the
//! embedded template source, the YAML config store and the model
//! collaborator.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod config;
pub mod http;
pub mod model;
pub mod templates;
