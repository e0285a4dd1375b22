//! Embedded request templates: the four XML bodies compiled into the binary.
//!
//! At compile time, `include_dir!` embeds everything under `cli/templates/`:
//!   - `CreateNewApp.xml`
//!   - `CreateOnlineWorkingCopy.xml`
//!   - `CommitWorkingCopyChanges.xml`
//!   - `RetrieveJobStatus.xml`

use include_dir::{Dir, include_dir};

use crate::application::ports::TemplateSource;
use crate::domain::{ClientError, TemplateId};

static EMBEDDED_TEMPLATES: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// `TemplateSource` backed by the templates embedded at build time.
pub struct EmbeddedTemplates;

impl TemplateSource for EmbeddedTemplates {
    fn load(&self, id: TemplateId) -> Result<String, ClientError> {
        let name = id.file_name();
        let file = EMBEDDED_TEMPLATES
            .get_file(&name)
            .ok_or_else(|| ClientError::TemplateLoad {
                template: name.clone(),
                detail: "not embedded in this build".to_string(),
            })?;
        file.contents_utf8()
            .map(str::to_string)
            .ok_or_else(|| ClientError::TemplateLoad {
                template: name,
                detail: "not valid UTF-8".to_string(),
            })
    }
}
