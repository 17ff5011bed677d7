//! Dispatch engine.
//!
//! A [`Logger`] owns one [`Config`] and the sinks it fans out to. Each call
//! goes through the same steps:
//!
//! 1. Check the level against the threshold. A rejected call has no side
//!    effects at all.
//! 2. Render the message for the console and emit it on the channel picked
//!    by [`ConsoleChannel::for_level`].
//! 3. Forward the original message to the inspector, if it is enabled, bound
//!    and not bypassed.
//! 4. Forward the remote form to the remote reporter, if it is enabled,
//!    installed and not bypassed.
//!
//! Sinks are always invoked in that order: console, inspector, remote.
//!
//! # Locking
//!
//! The configuration sits behind an `RwLock`. `configure` swaps the whole
//! record under the write lock; dispatch copies what it needs under the read
//! lock and releases it before touching any sink, so a sink may call back
//! into the logger. Poisoned locks are recovered rather than propagated.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{debug, trace, warn};
use time::OffsetDateTime;

use crate::config::{Config, ConfigPatch};
use crate::console::StdConsole;
use crate::format::{self, render};
use crate::logging::targets;
use crate::message::{ErrorLike, Message};
use crate::severity::{ConsoleChannel, RemoteSeverity, Severity};
use crate::sink::{ConsoleHandle, InspectorHandle, RemoteHandle, SinkError, SinkKind};
use crate::stats::{DeliverySnapshot, DeliveryStats};

/// Wall-clock source for time prefixes.
pub type Clock = Arc<dyn Fn() -> OffsetDateTime + Send + Sync>;

/// Per-call opt-out flags for the optional sinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bypass {
    /// Skip the inspector for this call.
    pub inspector: bool,
    /// Skip the remote reporter for this call.
    pub remote: bool,
}

impl Bypass {
    /// Deliver everywhere that is enabled.
    pub const NONE: Bypass = Bypass {
        inspector: false,
        remote: false,
    };

    /// Defaults for a call at `level`: only `warn` and `error` reach the
    /// remote reporter.
    #[must_use]
    pub fn for_level(level: Severity) -> Self {
        match level {
            Severity::Error | Severity::Warn => Bypass::NONE,
            _ => Bypass {
                inspector: false,
                remote: true,
            },
        }
    }

    /// Defaults for [`Logger::out`]: inspector yes, remote no.
    #[must_use]
    pub fn for_out() -> Self {
        Bypass {
            inspector: false,
            remote: true,
        }
    }

    #[must_use]
    pub fn inspector(mut self, bypass: bool) -> Self {
        self.inspector = bypass;
        self
    }

    #[must_use]
    pub fn remote(mut self, bypass: bool) -> Self {
        self.remote = bypass;
        self
    }
}

/// The logging facade: configuration plus sinks.
pub struct Logger {
    config: RwLock<Config>,
    console: ConsoleHandle,
    remote: RwLock<Option<RemoteHandle>>,
    clock: Clock,
    stats: DeliveryStats,
}

impl Logger {
    /// Logger over `console` with default configuration and no remote reporter.
    #[must_use]
    pub fn new(console: ConsoleHandle) -> Self {
        Self::builder().console(console).build()
    }

    /// Create a logger using the builder pattern.
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    // ─────────────────────────────────────────────────
    // Configuration
    // ─────────────────────────────────────────────────

    /// Replace the configuration with defaults overlaid by `patch`.
    ///
    /// Fields the patch omits go back to their defaults, not to their
    /// current values. Use [`update`](Self::update) to merge instead.
    pub fn configure(&self, patch: ConfigPatch) {
        let next = Config::from_patch(patch);
        debug!(target: targets::CONFIG, "configure: {next:?}");
        *self.write_config() = next;
    }

    /// Merge `patch` onto the current configuration.
    pub fn update(&self, patch: ConfigPatch) {
        let merged = {
            let mut config = self.write_config();
            config.apply(patch);
            config.clone()
        };
        debug!(target: targets::CONFIG, "update: {merged:?}");
    }

    /// Snapshot of the current configuration.
    #[must_use]
    pub fn config(&self) -> Config {
        self.read_config().clone()
    }

    pub fn set_log_level(&self, level: Severity) {
        self.write_config().threshold = level;
    }

    pub fn set_use_inspector(&self, enabled: bool) {
        self.write_config().use_inspector = enabled;
    }

    pub fn set_use_remote_reporting(&self, enabled: bool) {
        self.write_config().use_remote = enabled;
    }

    pub fn set_mirror_to_console(&self, mirror: bool) {
        self.write_config().mirror_to_console = mirror;
    }

    pub fn set_print_level(&self, print: bool) {
        self.write_config().print_level = print;
    }

    pub fn set_print_time(&self, print: bool) {
        self.write_config().print_time = print;
    }

    /// Bind the inspector. Delivery still requires [`set_use_inspector`](Self::set_use_inspector).
    pub fn set_inspector_instance(&self, handle: InspectorHandle) {
        self.write_config().inspector = Some(handle);
    }

    /// Install or remove the remote reporter.
    pub fn set_remote_sink(&self, sink: Option<RemoteHandle>) {
        *self
            .remote
            .write()
            .unwrap_or_else(PoisonError::into_inner) = sink;
    }

    /// Delivery counters since this logger was built.
    #[must_use]
    pub fn stats(&self) -> DeliverySnapshot {
        self.stats.snapshot()
    }

    // ─────────────────────────────────────────────────
    // Level-gated entry points
    // ─────────────────────────────────────────────────

    /// Whether a call at `level` would currently be emitted.
    #[must_use]
    pub fn accepts(&self, level: Severity) -> bool {
        level.passes(self.read_config().threshold)
    }

    /// Log at `level` with explicit bypass flags.
    pub fn log(&self, level: Severity, message: impl Into<Message>, bypass: Bypass) {
        let snapshot = {
            let config = self.read_config();
            if level.passes(config.threshold) {
                Ok(config.clone())
            } else {
                Err(config.threshold)
            }
        };
        let config = match snapshot {
            Ok(config) => config,
            Err(threshold) => {
                trace!(
                    target: targets::DISPATCH,
                    "dropped {} call (threshold {})",
                    level.as_str(),
                    threshold.as_str()
                );
                return;
            }
        };

        let message = message.into();
        let rendered = render(&message, level, &config, || (self.clock)());
        self.emit_console(
            &rendered.to_console_text(),
            ConsoleChannel::for_level(level, config.mirror_to_console),
        );
        self.forward(&config, &message, level.to_remote(), bypass);
    }

    pub fn silly(&self, message: impl Into<Message>) {
        self.log(Severity::Silly, message, Bypass::for_level(Severity::Silly));
    }

    pub fn silly_with(&self, message: impl Into<Message>, bypass: Bypass) {
        self.log(Severity::Silly, message, bypass);
    }

    pub fn verbose(&self, message: impl Into<Message>) {
        self.log(Severity::Verbose, message, Bypass::for_level(Severity::Verbose));
    }

    pub fn verbose_with(&self, message: impl Into<Message>, bypass: Bypass) {
        self.log(Severity::Verbose, message, bypass);
    }

    pub fn info(&self, message: impl Into<Message>) {
        self.log(Severity::Info, message, Bypass::for_level(Severity::Info));
    }

    pub fn info_with(&self, message: impl Into<Message>, bypass: Bypass) {
        self.log(Severity::Info, message, bypass);
    }

    /// Reaches the remote reporter by default.
    pub fn warn(&self, message: impl Into<Message>) {
        self.log(Severity::Warn, message, Bypass::for_level(Severity::Warn));
    }

    pub fn warn_with(&self, message: impl Into<Message>, bypass: Bypass) {
        self.log(Severity::Warn, message, bypass);
    }

    /// Reaches the remote reporter by default.
    pub fn error(&self, message: impl Into<Message>) {
        self.log(Severity::Error, message, Bypass::for_level(Severity::Error));
    }

    pub fn error_with(&self, message: impl Into<Message>, bypass: Bypass) {
        self.log(Severity::Error, message, bypass);
    }

    pub fn debug(&self, message: impl Into<Message>) {
        self.log(Severity::Debug, message, Bypass::for_level(Severity::Debug));
    }

    pub fn debug_with(&self, message: impl Into<Message>, bypass: Bypass) {
        self.log(Severity::Debug, message, bypass);
    }

    // ─────────────────────────────────────────────────
    // Unfiltered entry points
    // ─────────────────────────────────────────────────

    /// Always emit, whatever the threshold, unless it is `Silent`.
    ///
    /// Goes to the console's default channel without prefixes. Reaches the
    /// inspector but not the remote reporter unless told otherwise.
    pub fn out(&self, message: impl Into<Message>) {
        self.out_with(message, Bypass::for_out());
    }

    pub fn out_with(&self, message: impl Into<Message>, bypass: Bypass) {
        let config = self.config();
        if config.threshold == Severity::Silent {
            return;
        }

        let message = message.into();
        self.emit_console(&format::plain_text(&message), ConsoleChannel::Default);
        self.forward(&config, &message, Severity::Info.to_remote(), bypass);
    }

    /// Report to the remote reporter at `fatal`, regardless of threshold.
    ///
    /// Still requires remote reporting to be enabled.
    pub fn log_fatal(&self, message: impl Into<Message>) {
        self.remote().report_fatal(message);
    }

    /// Direct inspector access, gated only by the inspector being enabled and bound.
    #[must_use]
    pub fn inspector(&self) -> InspectorAccess<'_> {
        InspectorAccess { logger: self }
    }

    /// Direct remote reporter access, gated only by remote reporting being enabled.
    #[must_use]
    pub fn remote(&self) -> RemoteAccess<'_> {
        RemoteAccess { logger: self }
    }

    // ─────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────

    fn read_config(&self) -> RwLockReadGuard<'_, Config> {
        self.config.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_config(&self) -> RwLockWriteGuard<'_, Config> {
        self.config.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn remote_sink(&self) -> Option<RemoteHandle> {
        self.remote
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn active_inspector(&self) -> Option<InspectorHandle> {
        let config = self.read_config();
        if config.use_inspector {
            config.inspector.clone()
        } else {
            None
        }
    }

    fn active_remote(&self) -> Option<RemoteHandle> {
        if self.read_config().use_remote {
            self.remote_sink()
        } else {
            None
        }
    }

    fn emit_console(&self, text: &str, channel: ConsoleChannel) {
        self.console.emit(text, channel);
        self.stats.record_delivered(SinkKind::Console);
    }

    /// Inspector then remote, per the snapshot and bypass flags.
    fn forward(
        &self,
        config: &Config,
        message: &Message,
        severity: RemoteSeverity,
        bypass: Bypass,
    ) {
        if config.use_inspector && !bypass.inspector {
            if let Some(inspector) = &config.inspector {
                self.settle(SinkKind::Inspector, inspector.log(message));
            }
        }

        if config.use_remote && !bypass.remote {
            if let Some(remote) = self.remote_sink() {
                let text = format::to_remote_form(message);
                self.settle(SinkKind::Remote, remote.report(&text, severity));
            }
        }
    }

    fn settle(&self, kind: SinkKind, result: Result<(), SinkError>) {
        match result {
            Ok(()) => self.stats.record_delivered(kind),
            Err(e) => {
                self.stats.record_failed(kind);
                warn!(target: targets::SINK, "{kind} delivery failed: {e}");
            }
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(Arc::new(StdConsole::new()))
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("config", &*self.read_config())
            .field("remote_installed", &self.remote_sink().is_some())
            .field("stats", &self.stats.snapshot())
            .finish_non_exhaustive()
    }
}

/// Builder for [`Logger`].
pub struct LoggerBuilder {
    console: Option<ConsoleHandle>,
    remote: Option<RemoteHandle>,
    patch: ConfigPatch,
    clock: Option<Clock>,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerBuilder {
    /// Builder with stdout/stderr console and default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            console: None,
            remote: None,
            patch: ConfigPatch::default(),
            clock: None,
        }
    }

    #[must_use]
    pub fn console(mut self, console: ConsoleHandle) -> Self {
        self.console = Some(console);
        self
    }

    #[must_use]
    pub fn remote(mut self, remote: RemoteHandle) -> Self {
        self.remote = Some(remote);
        self
    }

    /// Initial configuration, laid over defaults.
    #[must_use]
    pub fn config(mut self, patch: ConfigPatch) -> Self {
        self.patch = patch;
        self
    }

    /// Clock used for time prefixes. Defaults to the local wall clock.
    #[must_use]
    pub fn clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> OffsetDateTime + Send + Sync + 'static,
    {
        self.clock = Some(Arc::new(clock));
        self
    }

    #[must_use]
    pub fn build(self) -> Logger {
        Logger {
            config: RwLock::new(Config::from_patch(self.patch)),
            console: self
                .console
                .unwrap_or_else(|| Arc::new(StdConsole::new())),
            remote: RwLock::new(self.remote),
            clock: self.clock.unwrap_or_else(|| Arc::new(format::local_now)),
            stats: DeliveryStats::new(),
        }
    }
}

/// Direct calls into the inspector, bypassing the threshold.
#[derive(Clone, Copy)]
pub struct InspectorAccess<'a> {
    logger: &'a Logger,
}

impl InspectorAccess<'_> {
    pub fn log(&self, message: impl Into<Message>) {
        if let Some(inspector) = self.logger.active_inspector() {
            let message = message.into();
            self.logger.settle(SinkKind::Inspector, inspector.log(&message));
        }
    }

    pub fn log_important(&self, message: impl Into<Message>) {
        if let Some(inspector) = self.logger.active_inspector() {
            let message = message.into();
            self.logger
                .settle(SinkKind::Inspector, inspector.log_important(&message));
        }
    }

    pub fn display(&self, payload: impl Into<Message>) {
        if let Some(inspector) = self.logger.active_inspector() {
            let payload = payload.into();
            self.logger.settle(SinkKind::Inspector, inspector.display(&payload));
        }
    }
}

/// Direct calls into the remote reporter, bypassing the threshold.
#[derive(Clone, Copy)]
pub struct RemoteAccess<'a> {
    logger: &'a Logger,
}

impl RemoteAccess<'_> {
    /// Report `message` tagged with `level`'s remote severity.
    pub fn report(&self, message: impl Into<Message>, level: Severity) {
        self.send(message, level.to_remote());
    }

    pub fn report_fatal(&self, message: impl Into<Message>) {
        self.send(message, RemoteSeverity::Fatal);
    }

    pub fn report_exception(&self, error: &ErrorLike) {
        if let Some(remote) = self.logger.active_remote() {
            self.logger
                .settle(SinkKind::Remote, remote.report_exception(error));
        }
    }

    fn send(&self, message: impl Into<Message>, severity: RemoteSeverity) {
        if let Some(remote) = self.logger.active_remote() {
            let text = format::to_remote_form(&message.into());
            self.logger.settle(SinkKind::Remote, remote.report(&text, severity));
        }
    }
}
