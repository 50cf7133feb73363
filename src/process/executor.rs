use std::io::{BufRead, BufReader, Lines};
use std::path::Path;
use std::process::{Child, ChildStderr, ChildStdout, Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use super::{signal, ProcessError};

const SHELL: &str = "sh";

/// Session-lifetime cancellation handle. Cancelling terminates the tracked
/// child (at most one at a time) and makes every stream holding the token
/// finish on its next step.
#[derive(Clone, Default)]
pub struct CancelToken {
    inner: Arc<TokenState>,
}

#[derive(Default)]
struct TokenState {
    cancelled: AtomicBool,
    active_pid: Mutex<Option<u32>>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::SeqCst);
        if let Ok(active) = self.inner.active_pid.lock() {
            if let Some(pid) = *active {
                // SIGTERM unblocks a reader waiting on a long-lived child
                unsafe {
                    libc::kill(pid as libc::pid_t, libc::SIGTERM);
                }
            }
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    pub fn tracked_pid(&self) -> Option<u32> {
        self.inner.active_pid.lock().ok().and_then(|active| *active)
    }

    fn track(&self, pid: u32) {
        if let Ok(mut active) = self.inner.active_pid.lock() {
            *active = Some(pid);
        }
    }

    fn release(&self) {
        if let Ok(mut active) = self.inner.active_pid.lock() {
            *active = None;
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum StreamEvent {
    Stdout(String),
    Stderr(String),
    Exited(i32),
}

#[derive(Clone, Default)]
pub struct ShellExecutor;

impl ShellExecutor {
    pub fn new() -> Self {
        Self
    }

    /// Hands the full line to `sh -c` in `cwd` and returns the finite,
    /// non-restartable stream of its output: stdout lines, then stderr
    /// lines, then the exit status.
    pub fn spawn(
        &self,
        line: &str,
        cwd: &Path,
        cancel: CancelToken,
    ) -> Result<CommandStream, ProcessError> {
        let mut child = Command::new(SHELL)
            .arg("-c")
            .arg(line)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(ProcessError::Launch)?;

        signal::pass_sigint_to_child();
        cancel.track(child.id());

        let stdout = child.stdout.take().map(|out| BufReader::new(out).lines());
        let stderr = child.stderr.take().map(|err| BufReader::new(err).lines());

        Ok(CommandStream {
            child,
            stdout,
            stderr,
            cancel,
            finished: false,
        })
    }
}

pub struct CommandStream {
    child: Child,
    stdout: Option<Lines<BufReader<ChildStdout>>>,
    stderr: Option<Lines<BufReader<ChildStderr>>>,
    cancel: CancelToken,
    finished: bool,
}

impl CommandStream {
    fn terminate(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
        self.cancel.release();
        self.finished = true;
    }
}

impl Iterator for CommandStream {
    type Item = Result<StreamEvent, ProcessError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if self.cancel.is_cancelled() {
            self.terminate();
            return None;
        }

        if let Some(lines) = self.stdout.as_mut() {
            match lines.next() {
                Some(Ok(line)) => return Some(Ok(StreamEvent::Stdout(line))),
                Some(Err(e)) => {
                    self.terminate();
                    return Some(Err(ProcessError::Stream(e)));
                }
                None => self.stdout = None,
            }
        }

        if let Some(lines) = self.stderr.as_mut() {
            match lines.next() {
                Some(Ok(line)) => return Some(Ok(StreamEvent::Stderr(line))),
                Some(Err(e)) => {
                    self.terminate();
                    return Some(Err(ProcessError::Stream(e)));
                }
                None => self.stderr = None,
            }
        }

        self.finished = true;
        let status = self.child.wait();
        self.cancel.release();
        match status {
            Ok(status) => Some(Ok(StreamEvent::Exited(status.code().unwrap_or(-1)))),
            Err(e) => Some(Err(ProcessError::Wait(e))),
        }
    }
}

impl Drop for CommandStream {
    fn drop(&mut self) {
        // an abandoned stream must not leak its child
        if !self.finished {
            self.terminate();
        }
    }
}
