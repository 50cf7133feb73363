use std::sync::mpsc::Sender;

mod buffer;

pub use buffer::TerminalBuffer;

/// Role of a produced chunk; the presentation layer picks styling per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Command,
    Output,
    Error,
    Success,
    Info,
    Welcome,
    Prompt,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub kind: OutputKind,
    pub text: String,
}

impl Chunk {
    pub fn new(kind: OutputKind, text: impl Into<String>) -> Self {
        Chunk {
            kind,
            text: text.into(),
        }
    }

    pub fn command(text: impl Into<String>) -> Self {
        Chunk::new(OutputKind::Command, text)
    }

    pub fn output(text: impl Into<String>) -> Self {
        Chunk::new(OutputKind::Output, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Chunk::new(OutputKind::Error, text)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Chunk::new(OutputKind::Success, text)
    }

    pub fn info(text: impl Into<String>) -> Self {
        Chunk::new(OutputKind::Info, text)
    }

    pub fn welcome(text: impl Into<String>) -> Self {
        Chunk::new(OutputKind::Welcome, text)
    }

    pub fn prompt(text: impl Into<String>) -> Self {
        Chunk::new(OutputKind::Prompt, text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalEvent {
    Append(Chunk),
    Clear,
}

/// Ordered sink for everything a session produces. Implementations must
/// observe events in the order they were delivered; that ordering is the
/// whole contract between the dispatcher and any view.
pub trait OutputSink {
    fn append(&mut self, chunk: Chunk);
    fn clear(&mut self);
}

/// In-process sink recording the event log; used by tests and by one-shot
/// execution.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Vec<TerminalEvent>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[TerminalEvent] {
        &self.events
    }

    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.events.iter().filter_map(|event| match event {
            TerminalEvent::Append(chunk) => Some(chunk),
            TerminalEvent::Clear => None,
        })
    }

    pub fn texts_of(&self, kind: OutputKind) -> Vec<&str> {
        self.chunks()
            .filter(|chunk| chunk.kind == kind)
            .map(|chunk| chunk.text.as_str())
            .collect()
    }
}

impl OutputSink for MemorySink {
    fn append(&mut self, chunk: Chunk) {
        self.events.push(TerminalEvent::Append(chunk));
    }

    fn clear(&mut self) {
        self.events.push(TerminalEvent::Clear);
    }
}

/// Sink half of the worker-to-presentation channel. The channel's FIFO
/// guarantee is what keeps appends observed in submission order across
/// threads.
pub struct ChannelSink {
    tx: Sender<TerminalEvent>,
}

impl ChannelSink {
    pub fn new(tx: Sender<TerminalEvent>) -> Self {
        Self { tx }
    }
}

impl OutputSink for ChannelSink {
    fn append(&mut self, chunk: Chunk) {
        // a dropped receiver means the presentation side is gone; nothing
        // left to notify
        let _ = self.tx.send(TerminalEvent::Append(chunk));
    }

    fn clear(&mut self) {
        let _ = self.tx.send(TerminalEvent::Clear);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::thread;

    #[test]
    fn test_memory_sink_records_in_order() {
        let mut sink = MemorySink::new();
        sink.append(Chunk::output("one"));
        sink.clear();
        sink.append(Chunk::error("two"));

        assert_eq!(
            sink.events(),
            &[
                TerminalEvent::Append(Chunk::output("one")),
                TerminalEvent::Clear,
                TerminalEvent::Append(Chunk::error("two")),
            ]
        );
    }

    #[test]
    fn test_texts_of_filters_by_kind() {
        let mut sink = MemorySink::new();
        sink.append(Chunk::output("keep"));
        sink.append(Chunk::error("skip"));
        sink.append(Chunk::output("also"));

        assert_eq!(sink.texts_of(OutputKind::Output), vec!["keep", "also"]);
    }

    #[test]
    fn test_channel_sink_preserves_order_across_threads() {
        let (tx, rx) = mpsc::channel();
        let handle = thread::spawn(move || {
            let mut sink = ChannelSink::new(tx);
            for i in 0..100 {
                sink.append(Chunk::output(format!("line {}", i)));
            }
        });

        let received: Vec<TerminalEvent> = rx.iter().collect();
        handle.join().unwrap();

        assert_eq!(received.len(), 100);
        for (i, event) in received.iter().enumerate() {
            assert_eq!(
                *event,
                TerminalEvent::Append(Chunk::output(format!("line {}", i)))
            );
        }
    }

    #[test]
    fn test_channel_sink_survives_dropped_receiver() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let mut sink = ChannelSink::new(tx);
        sink.append(Chunk::output("nobody listening"));
        sink.clear();
    }
}
