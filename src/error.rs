use crate::config::ConfigError;

#[derive(Debug)]
pub enum TerminalError {
    Readline(rustyline::error::ReadlineError),
    Io(std::io::Error),
    HomeDirNotFound,
    Flag(String),
    CtrlC(String),
    Config(ConfigError),
    WorkerGone,
}

impl From<rustyline::error::ReadlineError> for TerminalError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        TerminalError::Readline(err)
    }
}

impl From<std::io::Error> for TerminalError {
    fn from(err: std::io::Error) -> Self {
        TerminalError::Io(err)
    }
}

impl From<ctrlc::Error> for TerminalError {
    fn from(err: ctrlc::Error) -> Self {
        TerminalError::CtrlC(err.to_string())
    }
}

impl From<ConfigError> for TerminalError {
    fn from(err: ConfigError) -> Self {
        TerminalError::Config(err)
    }
}

impl std::fmt::Display for TerminalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminalError::Readline(e) => write!(f, "Readline error: {}", e),
            TerminalError::Io(e) => write!(f, "IO error: {}", e),
            TerminalError::HomeDirNotFound => write!(f, "Home directory not found"),
            TerminalError::Flag(msg) => write!(f, "Flag error: {}", msg),
            TerminalError::CtrlC(msg) => write!(f, "Ctrl-C error: {}", msg),
            TerminalError::Config(e) => write!(f, "Config error: {}", e),
            TerminalError::WorkerGone => write!(f, "command worker is no longer running"),
        }
    }
}

impl std::error::Error for TerminalError {}
