use std::{collections::BTreeSet, env, fs};

use rustyline::completion::Pair;

/// The dispatcher's built-ins; everything else a line can start with comes
/// from PATH.
const BUILTINS: [&str; 6] = ["cd", "clear", "help", "ls", "naturecode", "pwd"];

const ASSISTANT_SUBCOMMANDS: [&str; 8] = [
    "start",
    "model",
    "code",
    "project",
    "git",
    "plugin",
    "--help",
    "--version",
];

#[derive(Clone)]
pub struct CommandCompleter {
    commands: BTreeSet<String>,
}

impl CommandCompleter {
    pub fn new() -> Self {
        let mut completer = Self {
            commands: BTreeSet::new(),
        };
        completer.refresh_commands();
        completer
    }

    pub fn refresh_commands(&mut self) {
        self.commands.clear();
        for builtin in BUILTINS {
            self.commands.insert(builtin.to_string());
        }
        self.add_path_commands();
    }

    fn add_path_commands(&mut self) {
        if let Some(path_var) = env::var_os("PATH") {
            for path in env::split_paths(&path_var) {
                if let Ok(entries) = fs::read_dir(path) {
                    for entry in entries.filter_map(Result::ok) {
                        if let Ok(file_type) = entry.file_type() {
                            if file_type.is_file() || file_type.is_symlink() {
                                if let Some(name) = entry.file_name().to_str() {
                                    self.commands.insert(name.to_string());
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    pub fn complete_command(&self, input: &str) -> Vec<Pair> {
        let input = input.trim();
        self.commands
            .iter()
            .filter(|cmd| cmd.starts_with(input))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect()
    }

    pub fn complete_assistant(&self, input: &str) -> Vec<Pair> {
        ASSISTANT_SUBCOMMANDS
            .iter()
            .filter(|sub| sub.starts_with(input))
            .map(|sub| Pair {
                display: sub.to_string(),
                replacement: sub.to_string(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_complete() {
        let completer = CommandCompleter::new();
        let matches = completer.complete_command("natu");
        assert!(matches.iter().any(|p| p.replacement == "naturecode"));
    }

    #[test]
    fn test_assistant_subcommands_complete() {
        let completer = CommandCompleter::new();
        let matches = completer.complete_assistant("st");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].replacement, "start");
    }

    #[test]
    fn test_no_match_for_nonsense() {
        let completer = CommandCompleter::new();
        assert!(completer
            .complete_command("definitely-not-a-command-xyz")
            .is_empty());
    }
}
