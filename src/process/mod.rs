use std::fmt;

pub mod executor;
pub mod signal;

pub use executor::{CancelToken, CommandStream, ShellExecutor, StreamEvent};

#[derive(Debug)]
pub enum ProcessError {
    Launch(std::io::Error),
    Stream(std::io::Error),
    Wait(std::io::Error),
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::Launch(e) => write!(f, "failed to launch shell: {}", e),
            ProcessError::Stream(e) => write!(f, "failed to read process output: {}", e),
            ProcessError::Wait(e) => write!(f, "failed to collect exit status: {}", e),
        }
    }
}

impl std::error::Error for ProcessError {}
