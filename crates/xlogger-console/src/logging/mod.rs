//! Bridges from other logging front ends.
//!
//! - [`BridgeLogger`] - a `log` crate logger
//! - [`XLoggerLayer`] - a `tracing` layer
//!
//! Both map the host's levels onto xlogger severities and then behave like
//! an ordinary level-named call: threshold, console channel and default
//! bypass flags all apply. Records emitted by xlogger itself (targets under
//! `xlogger`) are dropped so its diagnostics never loop back in.
//!
//! # Example
//!
//! ```ignore
//! use xlogger_console::logging::BridgeLoggerBuilder;
//!
//! BridgeLoggerBuilder::new()
//!     .level_filter(log::LevelFilter::Debug)
//!     .with_targets(true)
//!     .init()
//!     .expect("logger already set");
//!
//! log::warn!("disk almost full");
//! ```

mod logger;
mod subscriber;

use std::sync::Arc;

use xlogger_core::{Logger, Severity};

pub use logger::{BridgeLogger, BridgeLoggerBuilder};
pub use subscriber::{XLoggerLayer, XLoggerSubscriberBuilder};

/// Which xlogger a bridge feeds.
#[derive(Clone, Default)]
pub enum LoggerRef {
    /// The process-wide logger from [`xlogger_core::global`].
    #[default]
    Global,
    /// A specific logger.
    Shared(Arc<Logger>),
}

impl LoggerRef {
    #[must_use]
    pub fn get(&self) -> &Logger {
        match self {
            LoggerRef::Global => xlogger_core::global::logger(),
            LoggerRef::Shared(logger) => logger,
        }
    }
}

impl From<Arc<Logger>> for LoggerRef {
    fn from(logger: Arc<Logger>) -> Self {
        LoggerRef::Shared(logger)
    }
}

impl std::fmt::Debug for LoggerRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoggerRef::Global => f.write_str("Global"),
            LoggerRef::Shared(_) => f.write_str("Shared"),
        }
    }
}

/// `log` level to xlogger severity.
#[must_use]
pub fn severity_for_log(level: log::Level) -> Severity {
    match level {
        log::Level::Error => Severity::Error,
        log::Level::Warn => Severity::Warn,
        log::Level::Info => Severity::Info,
        log::Level::Debug => Severity::Debug,
        log::Level::Trace => Severity::Silly,
    }
}

/// `tracing` level to xlogger severity.
#[must_use]
pub fn severity_for_tracing(level: tracing::Level) -> Severity {
    if level == tracing::Level::ERROR {
        Severity::Error
    } else if level == tracing::Level::WARN {
        Severity::Warn
    } else if level == tracing::Level::INFO {
        Severity::Info
    } else if level == tracing::Level::DEBUG {
        Severity::Debug
    } else {
        Severity::Silly
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_mappings() {
        assert_eq!(severity_for_log(log::Level::Error), Severity::Error);
        assert_eq!(severity_for_log(log::Level::Trace), Severity::Silly);
        assert_eq!(severity_for_tracing(tracing::Level::WARN), Severity::Warn);
        assert_eq!(severity_for_tracing(tracing::Level::DEBUG), Severity::Debug);
    }
}
