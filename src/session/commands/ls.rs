use super::{Command, CommandContext, CommandError};
use crate::path::PathResolver;
use crate::sink::{Chunk, OutputSink};

/// In-process directory listing: one entry per line, `d`-prefixed for
/// directories and `-` for files, in the filesystem's enumeration order.
#[derive(Clone)]
pub struct ListCommand {
    resolver: PathResolver,
}

impl Default for ListCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl ListCommand {
    pub fn new() -> Self {
        Self {
            resolver: PathResolver::new(),
        }
    }
}

impl Command for ListCommand {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        args: &str,
        sink: &mut dyn OutputSink,
    ) -> Result<(), CommandError> {
        let target = match args.trim() {
            "" => ".",
            rest => rest,
        };
        let resolved = self
            .resolver
            .resolve(ctx.current_dir, target)
            .map_err(|e| CommandError::ResolveError(e.to_string()))?;

        if !resolved.is_dir() {
            sink.append(Chunk::error(format!("Directory not found: {}", target)));
            return Ok(());
        }

        for entry in std::fs::read_dir(&resolved)? {
            let entry = entry?;
            let marker = if entry.path().is_dir() { 'd' } else { '-' };
            sink.append(Chunk::output(format!(
                "{} {}",
                marker,
                entry.file_name().to_string_lossy()
            )));
        }
        Ok(())
    }
}
