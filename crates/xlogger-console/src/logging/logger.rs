//! `log` crate bridge.
//!
//! Provides a `log::Log` implementation that hands every record to an
//! xlogger [`Logger`], so libraries using `log::info!` and friends share the
//! application's thresholds and sinks.
//!
//! # Usage
//!
//! ```ignore
//! use xlogger_console::logging::BridgeLogger;
//! use log::LevelFilter;
//!
//! // Feed the global xlogger
//! BridgeLogger::init(LevelFilter::Info);
//!
//! // Or use the builder for more control
//! BridgeLoggerBuilder::new()
//!     .level_filter(LevelFilter::Trace)
//!     .with_targets(true)
//!     .logger(my_logger)
//!     .init();
//! ```

use std::sync::Arc;

use log::{LevelFilter, Log, Metadata, Record};
use xlogger_core::logging::is_internal;
use xlogger_core::{Bypass, Logger, Message};

use super::{LoggerRef, severity_for_log};

/// `log` logger that forwards into xlogger.
///
/// Records pass two filters: the bridge's own `LevelFilter` (which also
/// becomes `log`'s global max level on [`init`](Self::init)), then the
/// xlogger threshold.
pub struct BridgeLogger {
    logger: LoggerRef,
    max_level: LevelFilter,
    show_targets: bool,
}

impl BridgeLogger {
    /// Bridge into the global xlogger with the given maximum level.
    #[must_use]
    pub fn new(max_level: LevelFilter) -> Self {
        Self {
            logger: LoggerRef::Global,
            max_level,
            show_targets: false,
        }
    }

    /// Create a logger using the builder pattern.
    #[must_use]
    pub fn builder() -> BridgeLoggerBuilder {
        BridgeLoggerBuilder::new()
    }

    /// Initialize as the global `log` logger.
    ///
    /// Returns an error if a logger has already been set.
    pub fn init(max_level: LevelFilter) -> Result<(), log::SetLoggerError> {
        log::set_boxed_logger(Box::new(Self::new(max_level)))?;
        log::set_max_level(max_level);
        Ok(())
    }

    /// Initialize as the global `log` logger, ignoring errors if already set.
    pub fn try_init(max_level: LevelFilter) {
        let _ = Self::init(max_level);
    }

    fn record_to_message(&self, record: &Record) -> Message {
        if self.show_targets {
            Message::Text(format!("{}: {}", record.target(), record.args()))
        } else {
            Message::Text(record.args().to_string())
        }
    }
}

/// Builder for configuring the bridge.
#[derive(Debug)]
pub struct BridgeLoggerBuilder {
    logger: LoggerRef,
    max_level: LevelFilter,
    show_targets: bool,
}

impl Default for BridgeLoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BridgeLoggerBuilder {
    /// Global xlogger, `Trace` max level (xlogger's threshold does the filtering), no targets.
    #[must_use]
    pub fn new() -> Self {
        Self {
            logger: LoggerRef::Global,
            max_level: LevelFilter::Trace,
            show_targets: false,
        }
    }

    /// Set the maximum level accepted from `log`.
    #[must_use]
    pub fn level_filter(mut self, filter: LevelFilter) -> Self {
        self.max_level = filter;
        self
    }

    /// Prefix each message with the record's target.
    #[must_use]
    pub fn with_targets(mut self, show: bool) -> Self {
        self.show_targets = show;
        self
    }

    /// Feed a specific logger instead of the global one.
    #[must_use]
    pub fn logger(mut self, logger: Arc<Logger>) -> Self {
        self.logger = LoggerRef::Shared(logger);
        self
    }

    /// Build the bridge without installing it.
    #[must_use]
    pub fn build(self) -> BridgeLogger {
        BridgeLogger {
            logger: self.logger,
            max_level: self.max_level,
            show_targets: self.show_targets,
        }
    }

    /// Build and install as the global `log` logger.
    ///
    /// Returns an error if a logger has already been set.
    pub fn init(self) -> Result<(), log::SetLoggerError> {
        let level = self.max_level;
        log::set_boxed_logger(Box::new(self.build()))?;
        log::set_max_level(level);
        Ok(())
    }

    /// Build and install, ignoring errors if already set.
    pub fn try_init(self) {
        let _ = self.init();
    }
}

impl Log for BridgeLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
            && !is_internal(metadata.target())
            && self
                .logger
                .get()
                .accepts(severity_for_log(metadata.level()))
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let severity = severity_for_log(record.level());
        let message = self.record_to_message(record);
        self.logger
            .get()
            .log(severity, message, Bypass::for_level(severity));
    }

    fn flush(&self) {}
}

impl std::fmt::Debug for BridgeLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeLogger")
            .field("logger", &self.logger)
            .field("max_level", &self.max_level)
            .field("show_targets", &self.show_targets)
            .finish()
    }
}
