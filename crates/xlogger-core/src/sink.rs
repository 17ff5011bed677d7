//! Sink capability traits.
//!
//! The dispatch engine only talks to these three traits. Concrete vendor
//! integrations (a debugging inspector, an error-reporting service) live
//! outside this crate and implement them.
//!
//! Console sinks are infallible: they swallow their own I/O errors. Inspector
//! and remote sinks report failure through [`SinkError`], which the logger
//! absorbs so a logging call never fails its caller.

use std::fmt;
use std::sync::Arc;

use crate::message::{ErrorLike, Message};
use crate::severity::{ConsoleChannel, RemoteSeverity};

/// A console-like text sink.
pub trait ConsoleSink: Send + Sync {
    /// Write one rendered line on `channel`.
    fn emit(&self, text: &str, channel: ConsoleChannel);
}

/// A structured-data debugging display.
pub trait InspectorSink: Send + Sync {
    /// Show a message in the inspector's log view.
    fn log(&self, message: &Message) -> Result<(), SinkError>;

    /// Show a message highlighted as important.
    fn log_important(&self, message: &Message) -> Result<(), SinkError>;

    /// Show a structured payload in the inspector's detail view.
    fn display(&self, payload: &Message) -> Result<(), SinkError>;
}

/// An external error-reporting service.
pub trait RemoteSink: Send + Sync {
    /// Send a text event tagged with the reporter's severity.
    fn report(&self, text: &str, severity: RemoteSeverity) -> Result<(), SinkError>;

    /// Send a structured error.
    fn report_exception(&self, error: &ErrorLike) -> Result<(), SinkError>;
}

/// Shared console handle.
pub type ConsoleHandle = Arc<dyn ConsoleSink>;

/// Shared inspector handle, bound through configuration.
pub type InspectorHandle = Arc<dyn InspectorSink>;

/// Shared remote reporter handle.
pub type RemoteHandle = Arc<dyn RemoteSink>;

/// Which sink a delivery targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SinkKind {
    Console,
    Inspector,
    Remote,
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SinkKind::Console => "console",
            SinkKind::Inspector => "inspector",
            SinkKind::Remote => "remote",
        })
    }
}

/// Delivery failure reported by a sink.
#[derive(Debug)]
pub enum SinkError {
    /// The sink is not connected or not ready.
    Unavailable,
    /// Transport-level failure.
    Io(std::io::Error),
    /// The sink refused the payload.
    Rejected(String),
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkError::Unavailable => f.write_str("sink unavailable"),
            SinkError::Io(e) => write!(f, "sink I/O error: {e}"),
            SinkError::Rejected(reason) => write!(f, "sink rejected payload: {reason}"),
        }
    }
}

impl std::error::Error for SinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SinkError::Io(e) => Some(e),
            SinkError::Unavailable | SinkError::Rejected(_) => None,
        }
    }
}

impl From<std::io::Error> for SinkError {
    fn from(err: std::io::Error) -> Self {
        SinkError::Io(err)
    }
}
