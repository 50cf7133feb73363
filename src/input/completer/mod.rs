use std::borrow::Cow;

mod command;
mod path;

use command::CommandCompleter;
use path::PathCompleter;

use crate::highlight::OutputStyler;

use rustyline::{
    completion::{Completer, Pair},
    highlight::{CmdKind, Highlighter},
    hint::Hinter,
    validate::Validator,
    Context, Helper,
};

/// Line-editing helper: completes the command word (built-ins plus PATH),
/// `naturecode` subcommands, and paths for later words, and highlights the
/// line as it is typed.
#[derive(Clone)]
pub struct TerminalCompleter {
    command_completer: CommandCompleter,
    path_completer: PathCompleter,
    styler: OutputStyler,
}

impl Default for TerminalCompleter {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalCompleter {
    pub fn new() -> Self {
        TerminalCompleter {
            command_completer: CommandCompleter::new(),
            path_completer: PathCompleter::new(),
            styler: OutputStyler::new(),
        }
    }

    pub fn refresh_commands(&mut self) {
        self.command_completer.refresh_commands();
    }
}

impl Helper for TerminalCompleter {}

impl Highlighter for TerminalCompleter {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Owned(self.styler.highlight_command(line))
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(self.styler.highlight_hint(hint))
    }
}

impl Hinter for TerminalCompleter {
    type Hint = String;
}

impl Validator for TerminalCompleter {}

impl Completer for TerminalCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line_up_to_cursor = &line[..pos];
        let mut words: Vec<&str> = line_up_to_cursor.split_whitespace().collect();

        if line_up_to_cursor.ends_with(' ') {
            words.push("");
        }

        let (start, matches) = match words.len() {
            0 => (0, self.command_completer.complete_command("")),
            1 => {
                let word = words[0];
                let start = line_up_to_cursor.rfind(word).unwrap_or(0);
                (start, self.command_completer.complete_command(word))
            }
            2 if words[0] == "naturecode" => {
                let word = words[1];
                let start = if word.is_empty() {
                    pos
                } else {
                    line_up_to_cursor.rfind(word).unwrap_or(pos)
                };
                (start, self.command_completer.complete_assistant(word))
            }
            _ => {
                let last_word = words.last().unwrap_or(&"");
                let start = if last_word.is_empty() {
                    pos
                } else {
                    line_up_to_cursor.rfind(last_word).unwrap_or(pos)
                };
                (start, self.path_completer.complete_path(last_word))
            }
        };

        Ok((start, matches))
    }
}
