//! Incremental `text/event-stream` decoding.
//!
//! The log stream arrives as arbitrary byte chunks; this decoder buffers
//! them and yields one [`SseEvent`] per blank-line-terminated block. Only
//! the `data` and `event` fields are kept; comment lines, `id`, `retry`,
//! and unknown fields are skipped as non-notification traffic.

use bytes::BytesMut;

/// A single decoded server-sent event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SseEvent {
    /// Value of the `event` field, if the server sent one.
    pub event: Option<String>,
    /// Concatenated `data` payload; empty for heartbeat events.
    pub data: String,
}

/// Streaming decoder for the `text/event-stream` wire format.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buf: BytesMut,
    event: Option<String>,
    data_lines: Vec<String>,
    saw_field: bool,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk and collect every event it completes, in arrival
    /// order.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        self.buf.extend_from_slice(chunk);

        let mut events = Vec::new();
        while let Some(line) = self.take_line() {
            if let Some(event) = self.process_line(&line) {
                events.push(event);
            }
        }
        events
    }

    /// Cut the next complete line out of the buffer, stripping the newline
    /// and any trailing carriage return. Multi-byte characters are never
    /// split: the buffer is only ever cut at a newline byte, which cannot
    /// occur inside a UTF-8 sequence.
    fn take_line(&mut self) -> Option<String> {
        let pos = self.buf.iter().position(|byte| *byte == b'\n')?;
        let mut line = self.buf.split_to(pos + 1);
        line.truncate(pos);
        if line.last() == Some(&b'\r') {
            line.truncate(line.len() - 1);
        }
        Some(String::from_utf8_lossy(&line).into_owned())
    }

    fn process_line(&mut self, line: &str) -> Option<SseEvent> {
        if line.is_empty() {
            return self.dispatch();
        }
        if line.starts_with(':') {
            // Comment / keep-alive line.
            return None;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };

        match field {
            "data" => {
                self.saw_field = true;
                self.data_lines.push(value.to_string());
            }
            "event" => {
                self.saw_field = true;
                self.event = Some(value.to_string());
            }
            // id, retry, and unknown fields carry nothing we consume.
            _ => {}
        }
        None
    }

    /// Blank line: dispatch the pending event, if any field was seen since
    /// the last dispatch.
    fn dispatch(&mut self) -> Option<SseEvent> {
        if !self.saw_field {
            return None;
        }

        let event = SseEvent {
            event: self.event.take(),
            data: self.data_lines.join("\n"),
        };
        self.data_lines.clear();
        self.saw_field = false;
        Some(event)
    }
}
