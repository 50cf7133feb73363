use super::{Command, CommandContext, CommandError};
use crate::session::text;
use crate::sink::{Chunk, OutputSink};

/// The assistant placeholder family. Every branch emits static descriptive
/// text; no AI session ever starts.
#[derive(Clone, Default)]
pub struct NatureCodeCommand;

impl NatureCodeCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for NatureCodeCommand {
    fn execute(
        &self,
        _ctx: &mut CommandContext<'_>,
        line: &str,
        sink: &mut dyn OutputSink,
    ) -> Result<(), CommandError> {
        if line == "naturecode" || line == "naturecode --help" {
            sink.append(Chunk::info(text::assistant_help()));
        } else if line == "naturecode start" {
            sink.append(Chunk::info(text::assistant_start()));
        } else if line == "naturecode --version" {
            sink.append(Chunk::output(text::assistant_version()));
        } else if line.starts_with("naturecode ") {
            sink.append(Chunk::info(text::script_unavailable()));
        } else {
            sink.append(Chunk::error(text::assistant_unknown()));
        }
        Ok(())
    }
}
