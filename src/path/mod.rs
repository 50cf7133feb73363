use crate::error::TerminalError;
use std::path::{Path, PathBuf};

/// Resolves command arguments to paths using the session rules: `~` expands
/// to the home directory, a leading `/` is taken as absolute, anything else
/// is joined onto the session's current directory.
#[derive(Clone, Default)]
pub struct PathResolver;

impl PathResolver {
    pub fn new() -> Self {
        Self
    }

    pub fn resolve(&self, base: &Path, input: &str) -> Result<PathBuf, TerminalError> {
        if input.starts_with('~') {
            self.expand_tilde(input)
        } else if input.starts_with('/') {
            Ok(PathBuf::from(input))
        } else {
            Ok(base.join(input))
        }
    }

    fn expand_tilde(&self, path: &str) -> Result<PathBuf, TerminalError> {
        let home = dirs::home_dir().ok_or(TerminalError::HomeDirNotFound)?;
        match path.strip_prefix('~') {
            Some("") => Ok(home),
            Some(rest) => {
                if let Some(stripped) = rest.strip_prefix('/') {
                    let mut resolved = home;
                    for part in stripped.split('/') {
                        if !part.is_empty() {
                            resolved.push(part);
                        }
                    }
                    Ok(resolved)
                } else {
                    // "~user" lookups are not supported
                    Ok(Path::new(path).to_path_buf())
                }
            }
            None => Ok(Path::new(path).to_path_buf()),
        }
    }
}
