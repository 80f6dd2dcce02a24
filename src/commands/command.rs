//! Command trait definition for the CLI.

use anyhow::Result;

/// Trait implemented by umidedup CLI commands.
///
/// The `command_line` parameter contains the full invocation, for logging.
pub trait Command {
    #[allow(clippy::missing_errors_doc)]
    fn execute(&self, command_line: &str) -> Result<()>;
}
