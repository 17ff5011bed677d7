//! The process-wide logger and the `log_*!` macros.
//!
//! Kept to a single test: the global logger can only be installed once per
//! process.

use std::sync::Arc;

use xlogger_console::TestConsole;
use xlogger_console::testing::RecordingRemote;
use xlogger_core::{Bypass, ConfigPatch, ConsoleChannel, Logger, RemoteSeverity, Severity, global};

#[test]
fn global_facade_round_trip() {
    let console = TestConsole::new();
    let remote = RecordingRemote::new();
    let logger = Logger::builder()
        .console(console.handle())
        .remote(Arc::new(remote.clone()))
        .build();
    assert!(global::install(logger).is_ok());
    assert!(global::install(Logger::new(console.handle())).is_err());

    xlogger_core::log_info!("listening on {}", 8080);
    xlogger_core::log_verbose!("not at debug threshold");
    xlogger_core::log_out!("{}-{}", "raw", 1);
    assert_eq!(console.output(), vec!["[INFO]  listening on 8080", "raw-1"]);

    global::update(ConfigPatch::new().use_remote(true));
    global::set_log_level(Severity::Warn);
    xlogger_core::log_debug!("quiet");
    xlogger_core::log_error!("disk {}", "full");
    global::log_fatal("shutting down");

    assert_eq!(
        console.lines_on(ConsoleChannel::Error),
        vec!["[ERROR]  disk full"]
    );
    assert_eq!(
        remote.reports(),
        vec![
            ("disk full".to_string(), RemoteSeverity::Error),
            ("shutting down".to_string(), RemoteSeverity::Fatal),
        ]
    );

    global::set_print_level(false);
    xlogger_core::log_warn!("bare");
    assert_eq!(console.lines_on(ConsoleChannel::Warn), vec!["  bare"]);

    remote.clear();
    global::warn_with("kept local", Bypass::NONE.remote(true));
    global::error_with("shipped", Bypass::NONE);
    global::info_with("below threshold", Bypass::NONE);
    assert_eq!(
        remote.reports(),
        vec![("shipped".to_string(), RemoteSeverity::Error)]
    );
    assert_eq!(
        console.lines_on(ConsoleChannel::Warn),
        vec!["  bare", "  kept local"]
    );

    global::configure(ConfigPatch::new());
    let config = global::config();
    assert_eq!(config.threshold, Severity::Debug);
    assert!(config.print_level);
    assert!(!config.use_remote);
}
