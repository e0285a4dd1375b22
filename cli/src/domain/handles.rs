//! Handles for the remote objects the job service creates.

/// Revision number meaning "the latest revision of the branch".
pub const LATEST_REVISION: i64 = -1;

pub const DEFAULT_BRANCH: &str = "main";

/// A remote app project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: String,
    pub name: String,
}

impl Project {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    #[must_use]
    pub fn branch(&self, name: &str) -> Branch {
        Branch {
            project_id: self.id.clone(),
            name: name.to_string(),
        }
    }
}

/// A named line of history in a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub project_id: String,
    pub name: String,
}

impl Branch {
    #[must_use]
    pub fn revision(&self, number: i64) -> Revision {
        Revision {
            number,
            branch: self.clone(),
        }
    }

    #[must_use]
    pub fn latest(&self) -> Revision {
        self.revision(LATEST_REVISION)
    }
}

/// An immutable point in a branch's history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revision {
    pub number: i64,
    pub branch: Branch,
}

/// A server-held working copy, together with the model connection opened on
/// it.
#[derive(Debug)]
pub struct OnlineWorkingCopy<M> {
    pub id: String,
    pub project: Project,
    pub source_revision: Revision,
    pub model: M,
}

/// Revisions below -1 do not exist; -1 means "latest".
#[must_use]
pub fn is_valid_base_revision(number: i64) -> bool {
    number >= LATEST_REVISION
}
