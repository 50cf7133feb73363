use super::{Chunk, OutputKind, OutputSink};

pub const DEFAULT_MAX_LINES: usize = 1000;
pub const DEFAULT_TRIM_STEP: usize = 200;

/// Append-only scrollback model for embedders that render the log
/// themselves. Keeps at most `max_lines` lines, dropping the oldest
/// `trim_step` once the cap is exceeded, and tracks the scroll position:
/// after every append the view lands on the last line, or stays at the top
/// while the content does not yet fill the viewport.
pub struct TerminalBuffer {
    lines: Vec<(OutputKind, String)>,
    viewport_rows: usize,
    scroll_top: usize,
    max_lines: usize,
    trim_step: usize,
}

impl TerminalBuffer {
    pub fn new(viewport_rows: usize) -> Self {
        Self::with_limits(viewport_rows, DEFAULT_MAX_LINES, DEFAULT_TRIM_STEP)
    }

    pub fn with_limits(viewport_rows: usize, max_lines: usize, trim_step: usize) -> Self {
        TerminalBuffer {
            lines: Vec::new(),
            viewport_rows: viewport_rows.max(1),
            scroll_top: 0,
            max_lines: max_lines.max(1),
            trim_step: trim_step.max(1),
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    pub fn lines(&self) -> impl Iterator<Item = &(OutputKind, String)> {
        self.lines.iter()
    }

    /// The slice of lines currently inside the viewport.
    pub fn visible(&self) -> &[(OutputKind, String)] {
        let end = (self.scroll_top + self.viewport_rows).min(self.lines.len());
        &self.lines[self.scroll_top..end]
    }

    fn autoscroll(&mut self) {
        self.scroll_top = self.lines.len().saturating_sub(self.viewport_rows);
    }

    fn enforce_cap(&mut self) {
        if self.lines.len() > self.max_lines {
            let drop = self.trim_step.min(self.lines.len());
            self.lines.drain(..drop);
        }
    }
}

impl OutputSink for TerminalBuffer {
    fn append(&mut self, chunk: Chunk) {
        for line in chunk.text.lines() {
            self.lines.push((chunk.kind, line.to_string()));
        }
        self.enforce_cap();
        self.autoscroll();
    }

    fn clear(&mut self) {
        self.lines.clear();
        self.scroll_top = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stays_at_top_until_viewport_fills() {
        let mut buffer = TerminalBuffer::new(5);
        buffer.append(Chunk::output("one\ntwo\nthree"));
        assert_eq!(buffer.line_count(), 3);
        assert_eq!(buffer.scroll_top(), 0);
    }

    #[test]
    fn test_scrolls_to_last_line_after_append() {
        let mut buffer = TerminalBuffer::new(3);
        for i in 0..10 {
            buffer.append(Chunk::output(format!("line {}", i)));
        }
        assert_eq!(buffer.scroll_top(), 7);
        let visible: Vec<&str> = buffer.visible().iter().map(|(_, l)| l.as_str()).collect();
        assert_eq!(visible, vec!["line 7", "line 8", "line 9"]);
    }

    #[test]
    fn test_multiline_chunk_splits_into_lines() {
        let mut buffer = TerminalBuffer::new(10);
        buffer.append(Chunk::welcome("banner line 1\nbanner line 2\n"));
        assert_eq!(buffer.line_count(), 2);
        assert!(buffer.lines().all(|(kind, _)| *kind == OutputKind::Welcome));
    }

    #[test]
    fn test_cap_drops_oldest_lines() {
        let mut buffer = TerminalBuffer::with_limits(5, 10, 4);
        for i in 0..11 {
            buffer.append(Chunk::output(format!("line {}", i)));
        }
        // crossing the cap of 10 drops the oldest 4
        assert_eq!(buffer.line_count(), 7);
        let first = buffer.lines().next().unwrap();
        assert_eq!(first.1, "line 4");
    }

    #[test]
    fn test_clear_resets_content_and_scroll() {
        let mut buffer = TerminalBuffer::new(2);
        for i in 0..8 {
            buffer.append(Chunk::output(format!("line {}", i)));
        }
        assert!(buffer.scroll_top() > 0);
        buffer.clear();
        assert_eq!(buffer.line_count(), 0);
        assert_eq!(buffer.scroll_top(), 0);
        assert!(buffer.visible().is_empty());
    }
}
