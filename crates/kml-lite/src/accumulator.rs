//! Character data buffer shared by the element builders.

/// Collects the text of the content-bearing element that is currently open.
///
/// Builders only push into it while one of their leaf sub-elements is open,
/// and drain it in the matching `end_*` call, so the buffer is empty between
/// leaves.
#[derive(Debug, Default, Clone)]
pub(crate) struct Accumulator {
    buffer: String,
}

impl Accumulator {
    pub(crate) fn push(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Drain the buffer, returning what it held.
    pub(crate) fn take(&mut self) -> String {
        std::mem::take(&mut self.buffer)
    }

    /// Drain the buffer, optionally trimming surrounding whitespace.
    pub(crate) fn take_text(&mut self, trim: bool) -> String {
        let text = self.take();
        if !trim {
            return text;
        }
        text.trim().to_string()
    }

    pub(crate) fn clear(&mut self) {
        self.buffer.clear();
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}
