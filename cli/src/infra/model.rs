//! Model collaborator used by the command line.
//!
//! The CLI does not manipulate models itself. Opening a working copy records
//! which model endpoint the copy would be edited through; closing releases
//! nothing. Both steps are logged so a run can be traced end to end.

use crate::application::ports::{ModelConnection, ModelServer};
use crate::domain::ClientError;

/// Model server reached at `endpoints.model_url`, held without a live session.
#[derive(Debug, Clone)]
pub struct DetachedModelServer {
    model_url: Option<String>,
}

impl DetachedModelServer {
    #[must_use]
    pub fn new(model_url: Option<String>) -> Self {
        Self { model_url }
    }
}

/// Handle on a working copy opened through [`DetachedModelServer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetachedModel {
    pub working_copy_id: String,
    pub model_url: Option<String>,
}

impl ModelServer for DetachedModelServer {
    type Model = DetachedModel;

    async fn open_working_copy(&self, working_copy_id: &str) -> Result<DetachedModel, ClientError> {
        if working_copy_id.trim().is_empty() {
            return Err(ClientError::ModelServer(
                "working copy id is empty".to_string(),
            ));
        }
        tracing::debug!(
            working_copy = working_copy_id,
            model_url = self.model_url.as_deref().unwrap_or("(not set)"),
            "opened working copy"
        );
        Ok(DetachedModel {
            working_copy_id: working_copy_id.to_string(),
            model_url: self.model_url.clone(),
        })
    }
}

impl ModelConnection for DetachedModel {
    async fn close_connection(&self) -> Result<(), ClientError> {
        tracing::debug!(working_copy = %self.working_copy_id, "closed model connection");
        Ok(())
    }
}
