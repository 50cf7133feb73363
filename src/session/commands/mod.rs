use std::path::PathBuf;

mod cd;
mod ls;
mod naturecode;

pub use cd::CdCommand;
pub use ls::ListCommand;
pub use naturecode::NatureCodeCommand;

use crate::process::ProcessError;
use crate::sink::OutputSink;

#[derive(Debug)]
pub enum CommandError {
    IoError(std::io::Error),
    ProcessError(ProcessError),
    ResolveError(String),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::IoError(err) => write!(f, "IO error: {}", err),
            CommandError::ProcessError(err) => write!(f, "Process error: {}", err),
            CommandError::ResolveError(msg) => write!(f, "{}", msg),
        }
    }
}

impl From<std::io::Error> for CommandError {
    fn from(err: std::io::Error) -> Self {
        CommandError::IoError(err)
    }
}

impl From<ProcessError> for CommandError {
    fn from(err: ProcessError) -> Self {
        CommandError::ProcessError(err)
    }
}

/// The slice of session state a built-in may read or mutate.
pub struct CommandContext<'a> {
    pub current_dir: &'a mut PathBuf,
}

/// A built-in command. `args` is the text after the command word for `cd`
/// and `ls`, and the full line for the `naturecode` family (its
/// sub-dispatch matches whole lines).
pub trait Command {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        args: &str,
        sink: &mut dyn OutputSink,
    ) -> Result<(), CommandError>;
}
