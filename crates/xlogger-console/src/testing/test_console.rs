//! In-memory console sink.
//!
//! [`TestConsole`] records what a logger printed, per channel, instead of
//! writing to stdout/stderr.

use std::sync::{Arc, Mutex};

use strip_ansi_escapes::strip;
use xlogger_core::{ConsoleChannel, ConsoleHandle, ConsoleSink};

/// A console sink that captures output for testing
///
/// Clones share the same buffer, so keep one clone for assertions and hand
/// [`handle`](Self::handle) to the logger.
#[derive(Clone, Default)]
pub struct TestConsole {
    buffer: Arc<Mutex<TestBuffer>>,
}

#[derive(Debug, Default)]
struct TestBuffer {
    /// One entry per emit, ANSI codes preserved
    entries: Vec<(ConsoleChannel, String)>,
    /// Lines with ANSI codes stripped, tagged with their channel
    lines: Vec<(ConsoleChannel, String)>,
}

impl TestConsole {
    /// Empty capture buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink handle sharing this console's buffer
    #[must_use]
    pub fn handle(&self) -> ConsoleHandle {
        Arc::new(self.clone())
    }

    /// Every emit as `(channel, text)`, ANSI codes preserved
    #[must_use]
    pub fn entries(&self) -> Vec<(ConsoleChannel, String)> {
        self.buffer
            .lock()
            .map(|b| b.entries.clone())
            .unwrap_or_default()
    }

    /// Every printed line across channels, ANSI codes stripped.
    #[must_use]
    pub fn output(&self) -> Vec<String> {
        self.buffer
            .lock()
            .map(|b| b.lines.iter().map(|(_, line)| line.clone()).collect())
            .unwrap_or_default()
    }

    /// Captured lines emitted on `channel` (ANSI codes stripped)
    #[must_use]
    pub fn lines_on(&self, channel: ConsoleChannel) -> Vec<String> {
        self.buffer
            .lock()
            .map(|b| {
                b.lines
                    .iter()
                    .filter(|(c, _)| *c == channel)
                    .map(|(_, line)| line.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// [`output`](Self::output) joined with newlines.
    #[must_use]
    pub fn output_string(&self) -> String {
        self.output().join("\n")
    }

    /// Case-insensitive substring search over everything printed.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        let output = self.output_string().to_lowercase();
        output.contains(&needle.to_lowercase())
    }

    #[must_use]
    pub fn contains_all(&self, needles: &[&str]) -> bool {
        needles.iter().all(|n| self.contains(n))
    }

    /// Regex search over [`output_string`](Self::output_string). An invalid
    /// pattern never matches.
    #[must_use]
    pub fn matches(&self, pattern: &str) -> bool {
        regex::Regex::new(pattern).is_ok_and(|re| re.is_match(&self.output_string()))
    }

    /// # Panics
    ///
    /// If nothing printed so far contains `needle`.
    pub fn assert_contains(&self, needle: &str) {
        assert!(
            self.contains(needle),
            "console never printed {needle:?}; captured:\n{}",
            self.output_string()
        );
    }

    /// # Panics
    ///
    /// If anything printed so far contains `needle`.
    pub fn assert_not_contains(&self, needle: &str) {
        assert!(
            !self.contains(needle),
            "console printed {needle:?} but should not have; captured:\n{}",
            self.output_string()
        );
    }

    /// # Panics
    ///
    /// If the captured line count differs from `expected`.
    pub fn assert_line_count(&self, expected: usize) {
        let lines = self.output();
        assert_eq!(
            lines.len(),
            expected,
            "wrong number of console lines; captured:\n{}",
            lines.join("\n")
        );
    }

    /// Forget everything captured so far.
    pub fn clear(&self) {
        if let Ok(mut buf) = self.buffer.lock() {
            buf.entries.clear();
            buf.lines.clear();
        }
    }

    /// Dump the raw entries to stderr.
    pub fn debug_print(&self) {
        eprintln!("--- captured console ---");
        for (i, (channel, line)) in self.entries().iter().enumerate() {
            eprintln!("{:3} {:?}: {}", i + 1, channel, line);
        }
        eprintln!("------------------------");
    }
}

impl ConsoleSink for TestConsole {
    fn emit(&self, text: &str, channel: ConsoleChannel) {
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.entries.push((channel, text.to_string()));

            let stripped = strip(text.as_bytes());
            let stripped = String::from_utf8_lossy(&stripped);
            buffer
                .lines
                .extend(stripped.lines().map(|line| (channel, line.to_string())));
        }
    }
}

impl std::fmt::Debug for TestConsole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestConsole")
            .field("entries", &self.entries().len())
            .finish()
    }
}
