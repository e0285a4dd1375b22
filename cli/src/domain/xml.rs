//! XML response queries.
//!
//! Parses a response body into a tree and extracts the text of the first
//! element matching a simple path expression. Element names are matched on
//! their local part, so `soap:Fault/faultstring` and `faultstring` are the
//! same node for a query.

use modelhub_common::{JobId, JobResult, JobState};

use crate::domain::error::ClientError;

/// A descendant-or-self selection by local tag name with a zero-based ordinal.
///
/// Accepted spellings: `Name`, `Name[n]`, `descendant::Name[n]`,
/// `descendant-or-self::Name[n]`, `..Name[n]` and `//Name[n]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlPath {
    name: String,
    index: usize,
}

impl XmlPath {
    #[must_use]
    pub fn new(name: &str, index: usize) -> Self {
        Self {
            name: name.to_string(),
            index,
        }
    }

    /// Parse a path expression; `None` when the expression is not understood.
    #[must_use]
    pub fn parse(expr: &str) -> Option<Self> {
        let expr = expr.trim();
        let rest = ["descendant-or-self::", "descendant::", "..", "//"]
            .iter()
            .find_map(|prefix| expr.strip_prefix(prefix))
            .unwrap_or(expr);

        let (name, index) = match rest.split_once('[') {
            Some((name, tail)) => {
                let idx = tail.strip_suffix(']')?.trim().parse::<usize>().ok()?;
                (name, idx)
            }
            None => (rest, 0),
        };

        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':'));
        if !valid {
            return None;
        }
        // A prefixed name still selects by local name.
        let local = name.rsplit(':').next().unwrap_or(name);
        Some(Self::new(local, index))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }
}

/// A parsed XML document.
pub struct XmlTree<'input> {
    doc: roxmltree::Document<'input>,
}

impl<'input> XmlTree<'input> {
    /// # Errors
    ///
    /// Returns [`ClientError::Parse`] when `text` is not well-formed XML.
    pub fn parse(text: &'input str) -> Result<Self, ClientError> {
        roxmltree::Document::parse(text)
            .map(|doc| Self { doc })
            .map_err(|e| ClientError::Parse(e.to_string()))
    }

    /// Text of the first node matching `path`, or `None`.
    ///
    /// Elements that exist but hold no text are treated as absent.
    #[must_use]
    pub fn query(&self, path: &XmlPath) -> Option<String> {
        let node = self
            .doc
            .descendants()
            .filter(|n| n.is_element() && n.tag_name().name() == path.name)
            .nth(path.index)?;

        let text: String = node
            .descendants()
            .filter(roxmltree::Node::is_text)
            .filter_map(|n| n.text())
            .collect();
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }

    /// [`XmlTree::query`] over a path expression; unparseable expressions
    /// match nothing.
    #[must_use]
    pub fn query_expr(&self, expr: &str) -> Option<String> {
        XmlPath::parse(expr).and_then(|path| self.query(&path))
    }
}

/// Read a job status response into a [`JobResult`].
///
/// Each field is looked up independently and may be missing, except
/// `State`.
///
/// # Errors
///
/// Returns [`ClientError::InvalidResponse`] when `State` is missing or not a
/// known job state.
pub fn extract_job_result(tree: &XmlTree<'_>) -> Result<JobResult, ClientError> {
    let field = |name: &str| tree.query(&XmlPath::new(name, 0));

    let state_text = field("State")
        .ok_or_else(|| ClientError::InvalidResponse("job status has no State".to_string()))?;
    let state = state_text
        .parse::<JobState>()
        .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;

    Ok(JobResult::new(
        field("JobId").map(JobId::from),
        field("StartTime"),
        field("EndTime"),
        state,
        field("Result"),
        field("ErrorMessage"),
    ))
}
