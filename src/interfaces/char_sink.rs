// ============================================================================
// Character Sink Interface
// Output boundary between the number printer and the I/O collaborator
// ============================================================================

/// Receives the characters of a printed number one at a time.
pub trait CharSink {
    /// Emit one character
    fn put_char(&mut self, c: char);
}

impl CharSink for String {
    #[inline]
    fn put_char(&mut self, c: char) {
        self.push(c);
    }
}

impl<S: CharSink + ?Sized> CharSink for &mut S {
    #[inline]
    fn put_char(&mut self, c: char) {
        (**self).put_char(c);
    }
}

/// Adapts a closure into a sink.
pub struct FnSink<F>(pub F);

impl<F: FnMut(char)> CharSink for FnSink<F> {
    #[inline]
    fn put_char(&mut self, c: char) {
        (self.0)(c);
    }
}

/// Sink that discards everything
pub struct NoOpSink;

impl CharSink for NoOpSink {
    fn put_char(&mut self, _c: char) {
        // Do nothing
    }
}

/// Logging sink
///
/// Buffers characters and forwards each completed line to `tracing`.
#[derive(Debug, Default)]
pub struct LoggingSink {
    line: String,
}

impl LoggingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward a pending partial line, if any.
    pub fn flush(&mut self) {
        if !self.line.is_empty() {
            tracing::debug!("Number output: {}", self.line);
            self.line.clear();
        }
    }
}

impl CharSink for LoggingSink {
    fn put_char(&mut self, c: char) {
        if c == '\n' {
            tracing::debug!("Number output: {}", self.line);
            self.line.clear();
        } else {
            self.line.push(c);
        }
    }
}

impl Drop for LoggingSink {
    fn drop(&mut self) {
        self.flush();
    }
}
