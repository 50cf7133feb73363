use std::env;
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;

use rustyline::{config::Configurer, history::FileHistory, Editor};

use crate::config::Config;
use crate::error::TerminalError;
use crate::flags::Flags;
use crate::highlight::OutputStyler;
use crate::input::TerminalCompleter;
use crate::session::Session;
use crate::sink::{MemorySink, OutputKind, TerminalEvent};
use crate::worker::SessionWorker;

/// Interactive front-end: a rustyline editor feeding the session worker,
/// with worker output rendered between reads. The presentation side never
/// executes commands itself; it only renders what the worker marshals over.
pub struct Terminal {
    editor: Editor<TerminalCompleter, FileHistory>,
    events: Receiver<TerminalEvent>,
    worker: SessionWorker,
    styler: OutputStyler,
    prompt: String,
    quiet: bool,
    shutdown: Arc<AtomicBool>,
}

impl Terminal {
    pub fn new(flags: Flags) -> Result<Self, TerminalError> {
        let completer = TerminalCompleter::new();
        let mut editor = Editor::<TerminalCompleter, FileHistory>::new()?;
        editor.set_helper(Some(completer));
        editor.set_auto_add_history(true);

        let mut config = match flags.get_value("config") {
            Some(path) => Config::with_path(PathBuf::from(path)),
            None => Config::new()?,
        };
        config.load()?;
        if flags.is_set("debug") {
            for key in config.unknown_keys() {
                eprintln!("Warning: unknown config key: {}", key);
            }
        }

        let session = build_session(&config)?;
        let (event_tx, events) = mpsc::channel();
        let worker = SessionWorker::spawn(session, event_tx);

        // SIGTERM/SIGHUP request an orderly teardown, which also terminates
        // a tracked child process
        let shutdown = Arc::new(AtomicBool::new(false));
        for sig in [signal_hook::consts::SIGTERM, signal_hook::consts::SIGHUP] {
            signal_hook::flag::register(sig, Arc::clone(&shutdown))?;
        }

        ctrlc::set_handler(move || {
            println!("\nUse Ctrl-D to exit");
        })?;

        Ok(Terminal {
            editor,
            events,
            worker,
            styler: OutputStyler::new(),
            prompt: String::new(),
            quiet: flags.is_set("quiet"),
            shutdown,
        })
    }

    pub fn run(&mut self) -> Result<(), TerminalError> {
        // welcome banner and first prompt
        self.drain_until_prompt();

        loop {
            if self.shutdown.load(Ordering::SeqCst) {
                break;
            }

            let prompt = self.prompt.clone();
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    if let Err(e) = self.editor.add_history_entry(line.as_str()) {
                        if !self.quiet {
                            eprintln!("Warning: couldn't add to history: {}", e);
                        }
                    }

                    self.worker.submit(&line)?;
                    self.drain_until_prompt();
                }
                Err(rustyline::error::ReadlineError::Interrupted) => {
                    if !self.quiet {
                        println!("CTRL-C");
                    }
                    continue;
                }
                Err(rustyline::error::ReadlineError::Eof) => break,
                Err(e) => {
                    if !self.quiet {
                        eprintln!("Error: {}", e);
                    }
                    continue;
                }
            }
        }

        self.worker.shutdown();
        Ok(())
    }

    fn drain_until_prompt(&mut self) {
        while let Ok(event) = self.events.recv() {
            match event {
                TerminalEvent::Clear => {
                    print!("\x1b[2J\x1b[H");
                    let _ = std::io::stdout().flush();
                }
                TerminalEvent::Append(chunk) => match chunk.kind {
                    OutputKind::Prompt => {
                        self.prompt = chunk.text;
                        return;
                    }
                    // the editor already echoed the typed line
                    OutputKind::Command => {}
                    OutputKind::Welcome if self.quiet => {}
                    _ => println!("{}", self.styler.render(&chunk)),
                },
            }
        }
        // the worker hung up; nothing more will arrive
    }
}

/// One-shot execution for `-e/--exec`: run a single line against a fresh
/// session and print its output, without the editor or the worker thread.
pub fn execute_line(line: &str) -> Result<(), TerminalError> {
    let mut session = Session::new()?;
    let mut sink = MemorySink::new();
    session.submit(line, &mut sink);

    let styler = OutputStyler::new();
    for event in sink.events() {
        if let TerminalEvent::Append(chunk) = event {
            match chunk.kind {
                OutputKind::Prompt | OutputKind::Command => {}
                _ => println!("{}", styler.render(chunk)),
            }
        }
    }
    Ok(())
}

fn build_session(config: &Config) -> Result<Session, TerminalError> {
    let start_dir = env::current_dir()?;
    let prompt = config
        .prompt
        .clone()
        .unwrap_or_else(|| crate::session::DEFAULT_PROMPT.to_string());
    Ok(Session::with_options(
        start_dir,
        prompt,
        config.history_limit,
    ))
}
