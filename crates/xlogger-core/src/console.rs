//! Standard stream console sink

use std::io::{self, Write};
use std::sync::Mutex;

use crate::severity::ConsoleChannel;
use crate::sink::ConsoleSink;

type Writer = Box<dyn Write + Send>;

/// Console sink over two writers: the default channel goes to `out`,
/// the warn and error channels go to `err`.
///
/// Write failures are ignored.
pub struct StdConsole {
    out: Mutex<Writer>,
    err: Mutex<Writer>,
}

impl StdConsole {
    /// stdout for the default channel, stderr for warn/error.
    #[must_use]
    pub fn new() -> Self {
        Self::with_writers(io::stdout(), io::stderr())
    }

    /// Create with custom writers
    #[must_use]
    pub fn with_writers<O, E>(out: O, err: E) -> Self
    where
        O: Write + Send + 'static,
        E: Write + Send + 'static,
    {
        Self {
            out: Mutex::new(Box::new(out)),
            err: Mutex::new(Box::new(err)),
        }
    }

    fn writer(&self, channel: ConsoleChannel) -> &Mutex<Writer> {
        match channel {
            ConsoleChannel::Default => &self.out,
            ConsoleChannel::Warn | ConsoleChannel::Error => &self.err,
        }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleSink for StdConsole {
    fn emit(&self, text: &str, channel: ConsoleChannel) {
        if let Ok(mut w) = self.writer(channel).lock() {
            let _ = writeln!(w, "{text}");
            let _ = w.flush();
        }
    }
}

impl std::fmt::Debug for StdConsole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StdConsole").finish_non_exhaustive()
    }
}

/// Console sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopConsole;

impl ConsoleSink for NoopConsole {
    fn emit(&self, _text: &str, _channel: ConsoleChannel) {}
}
