use super::{Command, CommandContext, CommandError};
use crate::path::PathResolver;
use crate::sink::{Chunk, OutputSink};

#[derive(Clone)]
pub struct CdCommand {
    resolver: PathResolver,
}

impl Default for CdCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CdCommand {
    pub fn new() -> Self {
        Self {
            resolver: PathResolver::new(),
        }
    }
}

impl Command for CdCommand {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        args: &str,
        sink: &mut dyn OutputSink,
    ) -> Result<(), CommandError> {
        let target = args.trim();
        let resolved = self
            .resolver
            .resolve(ctx.current_dir, target)
            .map_err(|e| CommandError::ResolveError(e.to_string()))?;

        if resolved.is_dir() {
            *ctx.current_dir = resolved.canonicalize()?;
            sink.append(Chunk::success(format!(
                "Changed directory to: {}",
                ctx.current_dir.display()
            )));
        } else {
            sink.append(Chunk::error(format!("Directory not found: {}", target)));
        }
        Ok(())
    }
}
