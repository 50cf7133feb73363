use std::env;
use std::path::{Path, PathBuf};

pub mod commands;
mod history;
mod text;

pub use history::CommandHistory;

use crate::error::TerminalError;
use crate::process::{CancelToken, ShellExecutor, StreamEvent};
use crate::sink::{Chunk, OutputSink};
use commands::{CdCommand, Command, CommandContext, CommandError, ListCommand, NatureCodeCommand};

pub const DEFAULT_HISTORY_LIMIT: usize = 50;
pub const DEFAULT_PROMPT: &str = text::PROMPT;

/// One terminal session: the current directory, the command log, and the
/// dispatcher. All observable output goes through the sink passed to
/// `submit`; the session itself never touches stdout.
pub struct Session {
    current_dir: PathBuf,
    history: CommandHistory,
    executor: ShellExecutor,
    cancel: CancelToken,
    prompt: String,
    cd: CdCommand,
    ls: ListCommand,
    naturecode: NatureCodeCommand,
}

impl Session {
    pub fn new() -> Result<Self, TerminalError> {
        Ok(Self::with_options(
            env::current_dir()?,
            text::PROMPT,
            DEFAULT_HISTORY_LIMIT,
        ))
    }

    pub fn with_options(
        start_dir: PathBuf,
        prompt: impl Into<String>,
        history_limit: usize,
    ) -> Self {
        Session {
            current_dir: start_dir,
            history: CommandHistory::new(history_limit),
            executor: ShellExecutor::new(),
            cancel: CancelToken::new(),
            prompt: prompt.into(),
            cd: CdCommand::new(),
            ls: ListCommand::new(),
            naturecode: NatureCodeCommand::new(),
        }
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Banner plus first prompt, shown once at startup and again after
    /// `clear`.
    pub fn emit_welcome(&self, sink: &mut dyn OutputSink) {
        sink.append(Chunk::welcome(text::welcome_banner()));
        self.emit_prompt(sink);
    }

    fn emit_prompt(&self, sink: &mut dyn OutputSink) {
        sink.append(Chunk::prompt(self.prompt.clone()));
    }

    /// Runs one line to completion. Blank input dispatches nothing and
    /// produces no output; everything else ends with a fresh prompt, and a
    /// failing command is reported inline so it never blocks the next one.
    pub fn submit(&mut self, line: &str, sink: &mut dyn OutputSink) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }

        self.history.record(line);
        sink.append(Chunk::command(format!("> {}", line)));

        if let Err(e) = self.dispatch(line, sink) {
            sink.append(Chunk::error(format!("Error: {}", e)));
        }
        self.emit_prompt(sink);
    }

    // First match wins, case-sensitive.
    fn dispatch(&mut self, line: &str, sink: &mut dyn OutputSink) -> Result<(), CommandError> {
        if line == "clear" {
            sink.clear();
            sink.append(Chunk::welcome(text::welcome_banner()));
            Ok(())
        } else if let Some(rest) = line.strip_prefix("cd ") {
            self.cd.execute(
                &mut CommandContext {
                    current_dir: &mut self.current_dir,
                },
                rest,
                sink,
            )
        } else if line == "pwd" {
            sink.append(Chunk::output(self.current_dir.display().to_string()));
            Ok(())
        } else if line == "help" {
            sink.append(Chunk::info(text::help_text()));
            Ok(())
        } else if line.starts_with("naturecode") {
            self.naturecode.execute(
                &mut CommandContext {
                    current_dir: &mut self.current_dir,
                },
                line,
                sink,
            )
        } else {
            self.system_command(line, sink)
        }
    }

    fn system_command(&mut self, line: &str, sink: &mut dyn OutputSink) -> Result<(), CommandError> {
        if line.starts_with("ls") {
            let target = line.split_once(' ').map(|(_, rest)| rest).unwrap_or("");
            return self.ls.execute(
                &mut CommandContext {
                    current_dir: &mut self.current_dir,
                },
                target,
                sink,
            );
        }

        let stream = match self
            .executor
            .spawn(line, &self.current_dir, self.cancel.clone())
        {
            Ok(stream) => stream,
            Err(e) => {
                sink.append(Chunk::error(format!("Command execution failed: {}", e)));
                return Ok(());
            }
        };

        for event in stream {
            match event {
                Ok(StreamEvent::Stdout(out)) => sink.append(Chunk::output(out)),
                Ok(StreamEvent::Stderr(err)) => {
                    sink.append(Chunk::error(format!("Error: {}", err)))
                }
                Ok(StreamEvent::Exited(code)) => {
                    if code != 0 {
                        sink.append(Chunk::error(format!("Command exited with code: {}", code)));
                    }
                }
                Err(e) => {
                    sink.append(Chunk::error(format!("Command execution failed: {}", e)));
                    break;
                }
            }
        }
        Ok(())
    }

    /// Teardown: cancels the session token, terminating the tracked child
    /// if one is still running.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{MemorySink, OutputKind, TerminalEvent};
    use std::fs;

    fn test_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ncterm_session_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn session_in(dir: &Path) -> Session {
        Session::with_options(dir.to_path_buf(), text::PROMPT, DEFAULT_HISTORY_LIMIT)
    }

    fn submit(session: &mut Session, line: &str) -> MemorySink {
        let mut sink = MemorySink::new();
        session.submit(line, &mut sink);
        sink
    }

    #[test]
    fn test_blank_input_produces_nothing() {
        let dir = test_dir("blank");
        let mut session = session_in(&dir);
        for line in ["", "   ", "\t"] {
            let sink = submit(&mut session, line);
            assert!(sink.events().is_empty());
        }
        assert!(session.history().is_empty());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_echo_streams_one_line_then_prompt() {
        let dir = test_dir("echo");
        let mut session = session_in(&dir);
        let sink = submit(&mut session, "echo hello");

        let kinds: Vec<OutputKind> = sink.chunks().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![OutputKind::Command, OutputKind::Output, OutputKind::Prompt]
        );
        assert_eq!(sink.texts_of(OutputKind::Output), vec!["hello"]);
        assert_eq!(sink.texts_of(OutputKind::Command), vec!["> echo hello"]);
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_failing_command_reports_exit_code() {
        let dir = test_dir("failing");
        let mut session = session_in(&dir);
        let sink = submit(&mut session, "false");
        assert_eq!(
            sink.texts_of(OutputKind::Error),
            vec!["Command exited with code: 1"]
        );

        // the session is fully usable afterwards
        let sink = submit(&mut session, "echo ok");
        assert_eq!(sink.texts_of(OutputKind::Output), vec!["ok"]);
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_stderr_lines_carry_error_prefix() {
        let dir = test_dir("stderr");
        let mut session = session_in(&dir);
        let sink = submit(&mut session, "echo oops 1>&2");
        assert_eq!(sink.texts_of(OutputKind::Error), vec!["Error: oops"]);
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_cd_then_pwd_prints_resolved_path() {
        let dir = test_dir("cdpwd");
        let mut session = session_in(&dir);
        fs::create_dir_all(dir.join("inner")).unwrap();

        let sink = submit(&mut session, "cd inner");
        assert_eq!(sink.texts_of(OutputKind::Error), Vec::<&str>::new());

        let expected = dir.join("inner").canonicalize().unwrap();
        let sink = submit(&mut session, "pwd");
        assert_eq!(
            sink.texts_of(OutputKind::Output),
            vec![expected.to_string_lossy().to_string()]
        );
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_cd_missing_keeps_directory() {
        let dir = test_dir("cdmissing");
        let mut session = session_in(&dir);
        let sink = submit(&mut session, "cd /no/such/place");
        assert_eq!(
            sink.texts_of(OutputKind::Error),
            vec!["Directory not found: /no/such/place"]
        );
        assert_eq!(session.current_dir(), dir.as_path());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_clear_emits_clear_then_welcome() {
        let dir = test_dir("clear");
        let mut session = session_in(&dir);
        let sink = submit(&mut session, "clear");

        // echo of the command, then the wipe, then the banner and prompt
        match &sink.events()[1] {
            TerminalEvent::Clear => {}
            other => panic!("expected Clear, got {:?}", other),
        }
        let welcome = sink.texts_of(OutputKind::Welcome);
        assert!(welcome[0].contains("NatureCode Terminal"));
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_clear_wipes_prior_output_in_buffer() {
        use crate::sink::TerminalBuffer;

        let dir = test_dir("wipe");
        let mut session = session_in(&dir);
        let mut buffer = TerminalBuffer::new(50);

        session.submit("echo hello", &mut buffer);
        session.submit("clear", &mut buffer);

        let lines: Vec<&str> = buffer.lines().map(|(_, line)| line.as_str()).collect();
        assert!(!lines.contains(&"hello"));
        assert!(!lines.contains(&"> echo hello"));
        assert!(lines.iter().any(|line| line.contains("NatureCode Terminal")));
        assert_eq!(lines.last(), Some(&text::PROMPT));
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_ls_marks_entries() {
        let dir = test_dir("ls");
        fs::write(dir.join("a.txt"), "x").unwrap();
        fs::create_dir(dir.join("b")).unwrap();
        let mut session = session_in(&dir);

        let sink = submit(&mut session, "ls");
        let mut lines: Vec<String> = sink
            .texts_of(OutputKind::Output)
            .into_iter()
            .map(String::from)
            .collect();
        lines.sort();
        assert_eq!(lines, vec!["- a.txt", "d b"]);
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_bare_cd_falls_through_to_shell() {
        // only the "cd " prefix is a built-in; bare "cd" goes to sh -c
        let dir = test_dir("barecd");
        let mut session = session_in(&dir);
        let sink = submit(&mut session, "cd");
        assert!(sink.texts_of(OutputKind::Error).is_empty());
        assert_eq!(session.current_dir(), dir.as_path());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_naturecode_start_is_static() {
        let dir = test_dir("nc");
        let mut session = session_in(&dir);
        let sink = submit(&mut session, "naturecode start");
        let info = sink.texts_of(OutputKind::Info);
        assert!(info[0].contains("[AI Session Started]"));

        let sink = submit(&mut session, "naturecode frobnicate");
        let info = sink.texts_of(OutputKind::Info);
        assert!(info[0].contains("not available in this version"));
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_help_is_info() {
        let dir = test_dir("help");
        let mut session = session_in(&dir);
        let sink = submit(&mut session, "help");
        let info = sink.texts_of(OutputKind::Info);
        assert!(info[0].contains("Terminal Help:"));
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_every_command_ends_with_prompt() {
        let dir = test_dir("prompt");
        let mut session = session_in(&dir);
        for line in ["pwd", "help", "clear", "false", "naturecode", "ls", "cd x"] {
            let sink = submit(&mut session, line);
            let last = sink.chunks().last().unwrap();
            assert_eq!(last.kind, OutputKind::Prompt, "line {:?}", line);
            assert_eq!(last.text, text::PROMPT);
        }
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_history_counts_unique_lines() {
        let dir = test_dir("history");
        let mut session = session_in(&dir);
        submit(&mut session, "pwd");
        submit(&mut session, "pwd");
        submit(&mut session, "help");
        assert_eq!(session.history().len(), 2);
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_welcome_banner_then_prompt() {
        let dir = test_dir("welcome");
        let session = session_in(&dir);
        let mut sink = MemorySink::new();
        session.emit_welcome(&mut sink);

        let kinds: Vec<OutputKind> = sink.chunks().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![OutputKind::Welcome, OutputKind::Prompt]);
        fs::remove_dir_all(dir).unwrap();
    }
}
