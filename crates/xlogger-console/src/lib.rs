//! Host integration for xlogger.
//!
//! - [`logging`]: route records from the `log` crate and events from
//!   `tracing` into an xlogger [`Logger`](xlogger_core::Logger).
//! - [`testing`]: capturing console, inspector and remote sinks for tests.

#![forbid(unsafe_code)]

pub mod logging;
pub mod testing;

pub use logging::{
    BridgeLogger, BridgeLoggerBuilder, LoggerRef, XLoggerLayer, XLoggerSubscriberBuilder,
};
pub use testing::{RecordingInspector, RecordingRemote, TestConsole};
pub use xlogger_core;
