mod completer;

pub use completer::TerminalCompleter;
