//! The `log` bridge installed as the global logger.
//!
//! Kept to a single test: the global `log` logger can only be set once per
//! process.

use std::sync::Arc;

use log::LevelFilter;
use xlogger_console::testing::RecordingRemote;
use xlogger_console::{BridgeLoggerBuilder, TestConsole};
use xlogger_core::{ConfigPatch, Logger, RemoteSeverity};

#[test]
fn failing_remote_under_global_log_bridge() {
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

    BridgeLoggerBuilder::new()
        .level_filter(LevelFilter::Trace)
        .logger(logger.clone())
        .init()
        .unwrap();

    log::warn!("disk at 91%");
    log::error!("disk full");

    assert_eq!(console.output(), vec!["[WARN]  disk at 91%", "[ERROR]  disk full"]);
    assert_eq!(
        remote.reports(),
        vec![
            ("disk at 91%".to_string(), RemoteSeverity::Warning),
            ("disk full".to_string(), RemoteSeverity::Error),
        ]
    );
    assert_eq!(logger.stats().failed_remote, 2);
}
