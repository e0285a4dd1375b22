//! Command implementations

pub mod commit;
pub mod config;
pub mod create_app;
pub mod job_status;
pub mod version;
pub mod working_copy;

use crate::domain::ClientError;
use crate::output::TerminalReporter;

/// End the reporter's spinner and hand back the operation's outcome.
///
/// # Errors
///
/// Returns the operation's own error unchanged.
pub(crate) fn finish<T>(
    reporter: &TerminalReporter<'_>,
    failure: &str,
    outcome: Result<T, ClientError>,
) -> Result<T, ClientError> {
    match &outcome {
        Ok(_) => reporter.finish(),
        Err(_) => reporter.finish_error(failure),
    }
    outcome
}
