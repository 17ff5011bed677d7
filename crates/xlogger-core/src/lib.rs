//! Unified logging facade.
//!
//! One entry point filters log calls by severity, formats them, and fans
//! accepted calls out to up to three independently switchable sinks:
//!
//! - a console-like text sink (always, when the call is accepted),
//! - a structured-data inspector,
//! - a remote error reporter.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use xlogger_core::{ConfigPatch, Logger, NoopConsole, Severity};
//!
//! let logger = Logger::new(Arc::new(NoopConsole));
//! logger.configure(ConfigPatch::new().log_level(Severity::Info).print_time(true));
//!
//! logger.info("server started");
//! logger.verbose("suppressed: verbose is above the info threshold");
//! logger.out("always shown unless the threshold is silent");
//! ```
//!
//! For process-wide use, see [`global`] and the `log_*!` macros.

#![forbid(unsafe_code)]

pub mod config;
pub mod console;
pub mod dispatch;
pub mod format;
pub mod global;
pub mod logging;
pub mod message;
pub mod severity;
pub mod sink;
pub mod stats;

pub use config::{Config, ConfigError, ConfigPatch};
pub use console::{NoopConsole, StdConsole};
pub use dispatch::{Bypass, InspectorAccess, Logger, LoggerBuilder, RemoteAccess};
pub use format::{Rendered, render, to_remote_form};
pub use message::{ErrorLike, Message};
pub use severity::{ConsoleChannel, ParseSeverityError, RemoteSeverity, Severity};
pub use sink::{
    ConsoleHandle, ConsoleSink, InspectorHandle, InspectorSink, RemoteHandle, RemoteSink,
    SinkError, SinkKind,
};
pub use stats::{DeliverySnapshot, DeliveryStats};

/// Logs a formatted message at SILLY level through the global logger.
#[macro_export]
macro_rules! log_silly {
    ($($arg:tt)*) => {
        $crate::global::silly(::std::format!($($arg)*))
    };
}

/// Logs a formatted message at VERBOSE level through the global logger.
#[macro_export]
macro_rules! log_verbose {
    ($($arg:tt)*) => {
        $crate::global::verbose(::std::format!($($arg)*))
    };
}

/// Logs a formatted message at INFO level through the global logger.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::global::info(::std::format!($($arg)*))
    };
}

/// Logs a formatted message at WARN level through the global logger.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::global::warn(::std::format!($($arg)*))
    };
}

/// Logs a formatted message at ERROR level through the global logger.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::global::error(::std::format!($($arg)*))
    };
}

/// Logs a formatted message at DEBUG level through the global logger.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::global::debug(::std::format!($($arg)*))
    };
}

/// Always-emit formatted output through the global logger.
#[macro_export]
macro_rules! log_out {
    ($($arg:tt)*) => {
        $crate::global::out(::std::format!($($arg)*))
    };
}
