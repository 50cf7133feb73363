use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};

use crate::error::TerminalError;
use crate::process::CancelToken;
use crate::session::Session;
use crate::sink::{ChannelSink, TerminalEvent};

enum WorkerRequest {
    Line(String),
    Shutdown,
}

/// Owns a `Session` on a dedicated thread and executes submitted lines one
/// at a time, in order; all output is marshaled to the presentation side
/// through the event channel. The welcome banner and first prompt are
/// emitted as soon as the worker starts.
pub struct SessionWorker {
    requests: Sender<WorkerRequest>,
    cancel: CancelToken,
    handle: Option<JoinHandle<()>>,
}

impl SessionWorker {
    pub fn spawn(mut session: Session, events: Sender<TerminalEvent>) -> Self {
        let cancel = session.cancel_token();
        let (requests, inbox) = mpsc::channel();

        let handle = thread::spawn(move || {
            let mut sink = ChannelSink::new(events);
            session.emit_welcome(&mut sink);

            while let Ok(request) = inbox.recv() {
                match request {
                    WorkerRequest::Line(line) => session.submit(&line, &mut sink),
                    WorkerRequest::Shutdown => break,
                }
            }
            session.shutdown();
        });

        SessionWorker {
            requests,
            cancel,
            handle: Some(handle),
        }
    }

    pub fn submit(&self, line: &str) -> Result<(), TerminalError> {
        self.requests
            .send(WorkerRequest::Line(line.to_owned()))
            .map_err(|_| TerminalError::WorkerGone)
    }

    pub fn shutdown(&mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        let _ = self.requests.send(WorkerRequest::Shutdown);
        // terminate a tracked child so a streaming command cannot stall
        // the join
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for SessionWorker {
    fn drop(&mut self) {
        self.stop();
    }
}
