//! The tracing bridge installed as the global subscriber.
//!
//! `init` also installs `LogTracer`, so xlogger's own `log` diagnostics come
//! back as tracing events. Kept to a single test: the global subscriber can
//! only be set once per process.

use std::sync::Arc;

use xlogger_console::testing::RecordingRemote;
use xlogger_console::{TestConsole, XLoggerSubscriberBuilder};
use xlogger_core::{ConfigPatch, ConsoleChannel, Logger, RemoteSeverity};

#[test]
fn failing_remote_under_global_subscriber() {
    let console = TestConsole::new();
    let remote = RecordingRemote::new();
    remote.set_failing(true);
    let logger = Arc::new(
        Logger::builder()
            .console(console.handle())
            .remote(Arc::new(remote.clone()))
            .config(ConfigPatch::new().use_remote(true))
            .build(),
    );

    XLoggerSubscriberBuilder::new()
        .logger(logger.clone())
        .init()
        .unwrap();

    logger.error("boom");
    tracing::error!("from tracing");
    log::warn!(target: "app::db", "from log");

    assert_eq!(
        console.lines_on(ConsoleChannel::Error),
        vec!["[ERROR]  boom", "[ERROR]  from tracing"]
    );
    assert_eq!(
        console.lines_on(ConsoleChannel::Warn),
        vec!["[WARN]  from log"]
    );
    assert_eq!(
        remote.reports(),
        vec![
            ("boom".to_string(), RemoteSeverity::Error),
            ("from tracing".to_string(), RemoteSeverity::Error),
            ("from log".to_string(), RemoteSeverity::Warning),
        ]
    );
    assert_eq!(logger.stats().failed_remote, 3);
}
