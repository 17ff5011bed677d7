//! `tracing` bridge.
//!
//! Provides a tracing `Layer` and builder that route events into an xlogger
//! [`Logger`]. Event fields are appended to the message as `key=value` pairs
//! and the active span path as `span=outer::inner`.

use std::fmt;
use std::sync::Arc;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use xlogger_core::logging::is_internal;
use xlogger_core::{Bypass, Logger, Message};

use super::{LoggerRef, severity_for_tracing};

/// A tracing layer that forwards events into xlogger.
pub struct XLoggerLayer {
    logger: LoggerRef,
    show_targets: bool,
}

impl XLoggerLayer {
    /// Create a layer feeding `logger`.
    #[must_use]
    pub fn new(logger: LoggerRef) -> Self {
        Self {
            logger,
            show_targets: false,
        }
    }

    /// Prefix each message with the event's target.
    #[must_use]
    pub fn with_targets(mut self, show: bool) -> Self {
        self.show_targets = show;
        self
    }
}

#[derive(Default)]
struct FieldCollector {
    message: Option<String>,
    fields: Vec<(String, String)>,
    /// Original target of a record forwarded from the `log` crate.
    log_target: Option<String>,
}

impl FieldCollector {
    fn record_value(&mut self, field: &Field, value: String) {
        match field.name() {
            "message" => {
                if self.message.is_none() {
                    self.message = Some(value);
                }
            }
            "log.target" => self.log_target = Some(value),
            // module path, file and line of a forwarded `log` record
            name if name.starts_with("log.") => {}
            name => self.fields.push((name.to_string(), value)),
        }
    }

    /// The target the event was emitted under. `LogTracer` re-targets
    /// forwarded `log` records to `log`; the real one is in `log.target`.
    fn target<'a>(&'a self, metadata_target: &'a str) -> &'a str {
        self.log_target.as_deref().unwrap_or(metadata_target)
    }

    fn into_text(self, fallback: &str) -> String {
        let mut text = self.message.unwrap_or_else(|| fallback.to_string());
        for (key, value) in self.fields {
            text.push(' ');
            text.push_str(&key);
            text.push('=');
            text.push_str(&value);
        }
        text
    }
}

impl Visit for FieldCollector {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.record_value(field, format!("{value:?}"));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.record_value(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.record_value(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_value(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.record_value(field, value.to_string());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.record_value(field, value.to_string());
    }
}

impl<S> Layer<S> for XLoggerLayer
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if is_internal(metadata.target()) {
            return;
        }

        // xlogger's own `log` diagnostics come back through `LogTracer`;
        // drop them before touching the logger.
        let mut collector = FieldCollector::default();
        event.record(&mut collector);
        let target = collector.target(metadata.target()).to_string();
        if is_internal(&target) {
            return;
        }

        let severity = severity_for_tracing(*metadata.level());
        let logger = self.logger.get();
        if !logger.accepts(severity) {
            return;
        }

        if let Some(scope) = ctx.event_scope(event) {
            let spans: Vec<String> = scope
                .from_root()
                .map(|span| span.name().to_string())
                .collect();
            if !spans.is_empty() {
                collector
                    .fields
                    .push(("span".to_string(), spans.join("::")));
            }
        }

        let mut text = collector.into_text(metadata.name());
        if self.show_targets {
            text = format!("{target}: {text}");
        }

        logger.log(severity, Message::Text(text), Bypass::for_level(severity));
    }
}

/// Builder for a subscriber that sends everything through xlogger.
#[derive(Debug)]
pub struct XLoggerSubscriberBuilder {
    logger: LoggerRef,
    show_targets: bool,
    level_filter: LevelFilter,
}

impl Default for XLoggerSubscriberBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl XLoggerSubscriberBuilder {
    /// Global xlogger, `TRACE` filter, no targets.
    #[must_use]
    pub fn new() -> Self {
        Self {
            logger: LoggerRef::Global,
            show_targets: false,
            level_filter: LevelFilter::TRACE,
        }
    }

    /// Feed a specific logger instead of the global one.
    #[must_use]
    pub fn logger(mut self, logger: Arc<Logger>) -> Self {
        self.logger = LoggerRef::Shared(logger);
        self
    }

    /// Prefix each message with the event's target.
    #[must_use]
    pub fn with_targets(mut self, show: bool) -> Self {
        self.show_targets = show;
        self
    }

    /// Set the tracing-side level filter.
    #[must_use]
    pub fn with_level_filter(mut self, filter: LevelFilter) -> Self {
        self.level_filter = filter;
        self
    }

    /// Build the layer without installing it.
    #[must_use]
    pub fn build_layer(&self) -> XLoggerLayer {
        XLoggerLayer::new(self.logger.clone()).with_targets(self.show_targets)
    }

    /// Build a subscriber without installing it.
    #[must_use]
    pub fn build(self) -> impl Subscriber + Send + Sync {
        let layer = self.build_layer();
        tracing_subscriber::registry()
            .with(self.level_filter)
            .with(layer)
    }

    /// Build and install as the global default subscriber.
    pub fn init(self) -> Result<(), tracing_subscriber::util::TryInitError> {
        let layer = self.build_layer();
        tracing_subscriber::registry()
            .with(self.level_filter)
            .with(layer)
            .try_init()
    }
}
