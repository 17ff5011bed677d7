//! Testing utilities for xlogger sinks
//!
//! Provides capturing implementations of the three sink traits for asserting
//! on what a [`Logger`](xlogger_core::Logger) delivered.

mod recording;
mod test_console;

pub use recording::{InspectorCall, RecordingInspector, RecordingRemote, RemoteCall};
pub use test_console::TestConsole;
