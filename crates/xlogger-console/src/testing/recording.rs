//! Recording inspector and remote sinks.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use xlogger_core::{ErrorLike, InspectorSink, Message, RemoteSeverity, RemoteSink, SinkError};

/// One call received by a [`RecordingInspector`].
#[derive(Debug, Clone, PartialEq)]
pub enum InspectorCall {
    Log(Message),
    LogImportant(Message),
    Display(Message),
}

/// One call received by a [`RecordingRemote`].
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteCall {
    Report { text: String, severity: RemoteSeverity },
    Exception(ErrorLike),
}

struct Shared<T> {
    calls: Mutex<Vec<T>>,
    failing: AtomicBool,
}

// Not derived: a derive would demand `T: Default`.
impl<T> Default for Shared<T> {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
        }
    }
}

impl<T: Clone> Shared<T> {
    /// Calls are recorded even when failing.
    fn record(&self, call: T) -> Result<(), SinkError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
        if self.failing.load(Ordering::SeqCst) {
            Err(SinkError::Unavailable)
        } else {
            Ok(())
        }
    }

    fn calls(&self) -> Vec<T> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn clear(&self) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.clear();
        }
    }
}

/// Inspector sink that records every call. Clones share state.
#[derive(Clone, Default)]
pub struct RecordingInspector {
    inner: Arc<Shared<InspectorCall>>,
}

impl RecordingInspector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call return [`SinkError::Unavailable`].
    pub fn set_failing(&self, failing: bool) {
        self.inner.failing.store(failing, Ordering::SeqCst);
    }

    #[must_use]
    pub fn calls(&self) -> Vec<InspectorCall> {
        self.inner.calls()
    }

    /// Messages received through `log`, in order.
    #[must_use]
    pub fn logged(&self) -> Vec<Message> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                InspectorCall::Log(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.inner.clear();
    }
}

impl InspectorSink for RecordingInspector {
    fn log(&self, message: &Message) -> Result<(), SinkError> {
        self.inner.record(InspectorCall::Log(message.clone()))
    }

    fn log_important(&self, message: &Message) -> Result<(), SinkError> {
        self.inner.record(InspectorCall::LogImportant(message.clone()))
    }

    fn display(&self, payload: &Message) -> Result<(), SinkError> {
        self.inner.record(InspectorCall::Display(payload.clone()))
    }
}

/// Remote sink that records every call. Clones share state.
#[derive(Clone, Default)]
pub struct RecordingRemote {
    inner: Arc<Shared<RemoteCall>>,
}

impl RecordingRemote {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call return [`SinkError::Unavailable`].
    pub fn set_failing(&self, failing: bool) {
        self.inner.failing.store(failing, Ordering::SeqCst);
    }

    #[must_use]
    pub fn calls(&self) -> Vec<RemoteCall> {
        self.inner.calls()
    }

    /// `(text, severity)` of every `report` call, in order.
    #[must_use]
    pub fn reports(&self) -> Vec<(String, RemoteSeverity)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                RemoteCall::Report { text, severity } => Some((text, severity)),
                RemoteCall::Exception(_) => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.inner.clear();
    }
}

impl RemoteSink for RecordingRemote {
    fn report(&self, text: &str, severity: RemoteSeverity) -> Result<(), SinkError> {
        self.inner.record(RemoteCall::Report {
            text: text.to_string(),
            severity,
        })
    }

    fn report_exception(&self, error: &ErrorLike) -> Result<(), SinkError> {
        self.inner.record(RemoteCall::Exception(error.clone()))
    }
}

impl std::fmt::Debug for RecordingInspector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordingInspector")
            .field("calls", &self.calls().len())
            .finish()
    }
}

impl std::fmt::Debug for RecordingRemote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordingRemote")
            .field("calls", &self.calls().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspector_records_and_fails_on_demand() {
        let inspector = RecordingInspector::new();
        assert!(inspector.log(&Message::from("a")).is_ok());
        inspector.set_failing(true);
        assert!(inspector.display(&Message::from("b")).is_err());
        assert_eq!(inspector.calls().len(), 2);
        assert_eq!(inspector.logged(), vec![Message::from("a")]);
    }

    #[test]
    fn test_default_shares_nothing_between_instances() {
        let first = RecordingInspector::default();
        let second = RecordingRemote::default();
        first.log(&Message::from("only here")).unwrap();
        assert_eq!(first.calls().len(), 1);
        assert!(second.calls().is_empty());
        assert!(RecordingInspector::default().calls().is_empty());
    }

    #[test]
    fn test_remote_reports() {
        let remote = RecordingRemote::new();
        remote.report("x", RemoteSeverity::Warning).unwrap();
        remote.report_exception(&ErrorLike::new("boom")).unwrap();
        assert_eq!(remote.reports(), vec![("x".to_string(), RemoteSeverity::Warning)]);
        remote.clear();
        assert!(remote.calls().is_empty());
    }
}
