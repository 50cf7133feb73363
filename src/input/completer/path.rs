use std::{
    fs,
    path::{Path, PathBuf},
};

use rustyline::completion::Pair;

#[derive(Clone)]
pub struct PathCompleter;

impl PathCompleter {
    pub fn new() -> Self {
        Self
    }

    pub fn complete_path(&self, incomplete: &str) -> Vec<Pair> {
        let (dir_to_search, file_prefix) = self.split_input(incomplete);

        let mut matches = Vec::new();
        if let Ok(entries) = fs::read_dir(&dir_to_search) {
            for entry in entries.filter_map(Result::ok) {
                if let Some(name) = entry.file_name().to_str() {
                    if name.starts_with(&file_prefix) {
                        matches.push(self.to_pair(name, &entry.path(), &dir_to_search));
                    }
                }
            }
        }

        matches.sort_by(|a, b| a.display.cmp(&b.display));
        matches
    }

    fn split_input(&self, incomplete: &str) -> (PathBuf, String) {
        if incomplete.is_empty() {
            return (PathBuf::from("."), String::new());
        }
        if incomplete.ends_with('/') {
            return (PathBuf::from(incomplete), String::new());
        }

        let path = Path::new(incomplete);
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => (
                parent.to_path_buf(),
                path.file_name()
                    .and_then(|s| s.to_str())
                    .unwrap_or("")
                    .to_string(),
            ),
            _ => (PathBuf::from("."), incomplete.to_string()),
        }
    }

    fn to_pair(&self, name: &str, entry_path: &Path, dir_to_search: &Path) -> Pair {
        let completed = if dir_to_search == Path::new(".") {
            name.to_string()
        } else {
            dir_to_search.join(name).to_string_lossy().into_owned()
        };

        if entry_path.is_dir() {
            Pair {
                display: format!("{}/", completed),
                replacement: format!("{}/", completed),
            }
        } else {
            Pair {
                display: completed.clone(),
                replacement: format!("{} ", completed),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_bare_name_searches_current_dir() {
        let completer = PathCompleter::new();
        let (dir, prefix) = completer.split_input("par");
        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(prefix, "par");
    }

    #[test]
    fn test_split_nested_path() {
        let completer = PathCompleter::new();
        let (dir, prefix) = completer.split_input("/usr/bi");
        assert_eq!(dir, PathBuf::from("/usr"));
        assert_eq!(prefix, "bi");
    }

    #[test]
    fn test_trailing_slash_lists_directory() {
        let completer = PathCompleter::new();
        let (dir, prefix) = completer.split_input("/usr/");
        assert_eq!(dir, PathBuf::from("/usr/"));
        assert_eq!(prefix, "");
    }
}
