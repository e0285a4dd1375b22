//! Request payload templates.
//!
//! Pure functions only: no I/O. Loading template text is the job of the
//! `TemplateSource` port; this module parses that text once into segments
//! and renders it against a set of [`Bindings`].

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// `{{Name}}`, whitespace inside the braces allowed.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // constant pattern
    Regex::new(r"\{\{\s*([A-Za-z][A-Za-z0-9_]*)\s*\}\}").expect("valid placeholder regex")
});

// ── Template identifiers ──────────────────────────────────────────────────────

/// The request templates known to the job service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TemplateId {
    CreateNewApp,
    CreateOnlineWorkingCopy,
    CommitWorkingCopyChanges,
    RetrieveJobStatus,
}

impl TemplateId {
    pub const ALL: [Self; 4] = [
        Self::CreateNewApp,
        Self::CreateOnlineWorkingCopy,
        Self::CommitWorkingCopyChanges,
        Self::RetrieveJobStatus,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::CreateNewApp => "CreateNewApp",
            Self::CreateOnlineWorkingCopy => "CreateOnlineWorkingCopy",
            Self::CommitWorkingCopyChanges => "CommitWorkingCopyChanges",
            Self::RetrieveJobStatus => "RetrieveJobStatus",
        }
    }

    /// File name of the template resource, e.g. `CreateNewApp.xml`.
    #[must_use]
    pub fn file_name(self) -> String {
        format!("{}.xml", self.name())
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Bindings ──────────────────────────────────────────────────────────────────

/// A value substituted for one placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    Text(String),
    Number(i64),
    Absent,
}

impl From<&str> for Binding {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Binding {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<i64> for Binding {
    fn from(v: i64) -> Self {
        Self::Number(v)
    }
}

impl<T: Into<Binding>> From<Option<T>> for Binding {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Absent, Into::into)
    }
}

/// Placeholder name → value map used for one render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings(BTreeMap<String, Binding>);

impl Bindings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &str, value: impl Into<Binding>) -> &mut Self {
        self.0.insert(name.to_string(), value.into());
        self
    }

    pub fn set_absent(&mut self, name: &str) -> &mut Self {
        self.0.insert(name.to_string(), Binding::Absent);
        self
    }

    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<Binding>) -> Self {
        self.set(name, value);
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.0.get(name)
    }

    /// Text substituted for `name`; missing and absent values are empty.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Cow<'_, str> {
        match self.0.get(name) {
            Some(Binding::Text(s)) => Cow::Borrowed(s),
            Some(Binding::Number(n)) => Cow::Owned(n.to_string()),
            Some(Binding::Absent) | None => Cow::Borrowed(""),
        }
    }
}

// ── Parsed template ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

/// A template split into literal text and placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut segments = Vec::new();
        let mut last = 0;
        for caps in PLACEHOLDER.captures_iter(text) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            if whole.start() > last {
                segments.push(Segment::Literal(text[last..whole.start()].to_string()));
            }
            segments.push(Segment::Placeholder(name.as_str().to_string()));
            last = whole.end();
        }
        if last < text.len() {
            segments.push(Segment::Literal(text[last..].to_string()));
        }
        Self { segments }
    }

    /// Placeholder names in order of first appearance.
    #[must_use]
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for seg in &self.segments {
            if let Segment::Placeholder(name) = seg {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
        }
        names
    }

    /// Substitute every placeholder. Values are inserted as-is, unescaped.
    #[must_use]
    pub fn render(&self, bindings: &Bindings) -> String {
        let mut out = String::new();
        for seg in &self.segments {
            match seg {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(name) => out.push_str(&bindings.resolve(name)),
            }
        }
        out
    }
}
