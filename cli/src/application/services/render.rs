//! Template rendering and request building.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::application::ports::TemplateSource;
use crate::domain::{Bindings, ClientError, RequestDescriptor, Template, TemplateId};

/// Renders named templates, loading and parsing each one at most once.
///
/// A failed load is not cached; the next render retries it.
pub struct TemplateRenderer<S> {
    source: S,
    cache: Mutex<HashMap<TemplateId, Arc<Template>>>,
}

impl<S: TemplateSource> TemplateRenderer<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// The template source behind the cache.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Render `id` against `bindings`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::TemplateLoad`] if the template text cannot be
    /// loaded.
    pub fn render(&self, id: TemplateId, bindings: &Bindings) -> Result<String, ClientError> {
        Ok(self.template(id)?.render(bindings))
    }

    fn template(&self, id: TemplateId) -> Result<Arc<Template>, ClientError> {
        if let Some(t) = self.lock().get(&id) {
            return Ok(Arc::clone(t));
        }
        // Load outside the lock; a racing render may parse the same text twice.
        let parsed = Arc::new(Template::parse(&self.source.load(id)?));
        Ok(Arc::clone(self.lock().entry(id).or_insert(parsed)))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<TemplateId, Arc<Template>>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Build the job service request for `id`.
///
/// # Errors
///
/// Returns [`ClientError::TemplateLoad`] if the template cannot be loaded.
pub fn build_request<S: TemplateSource>(
    renderer: &TemplateRenderer<S>,
    id: TemplateId,
    bindings: &Bindings,
) -> Result<RequestDescriptor, ClientError> {
    renderer.render(id, bindings).map(RequestDescriptor::soap)
}
