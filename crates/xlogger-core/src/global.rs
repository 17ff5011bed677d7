//! Process-wide logger.
//!
//! Most applications want one logger reachable from anywhere. The free
//! functions here forward to it; the first call initializes it from the
//! environment (see [`ConfigPatch::from_env`]) with a stdout/stderr console.
//! Call [`install`] before any logging to use a different logger.
//!
//! Libraries and tests should prefer an explicit [`Logger`] handle.

use std::sync::OnceLock;

use crate::config::{Config, ConfigPatch};
use crate::dispatch::{Bypass, InspectorAccess, Logger, RemoteAccess};
use crate::logging::targets;
use crate::message::Message;
use crate::severity::Severity;
use crate::sink::{InspectorHandle, RemoteHandle};

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Get the global logger instance
#[must_use]
pub fn logger() -> &'static Logger {
    LOGGER.get_or_init(from_env)
}

/// Install `logger` as the global logger.
///
/// Must be called before any output; hands the logger back if one is
/// already in place.
pub fn install(logger: Logger) -> Result<(), Logger> {
    LOGGER.set(logger)
}

fn from_env() -> Logger {
    let patch = ConfigPatch::from_env().unwrap_or_else(|e| {
        log::warn!(target: targets::CONFIG, "ignoring environment configuration: {e}");
        ConfigPatch::default()
    });
    Logger::builder().config(patch).build()
}

/// See [`Logger::configure`].
pub fn configure(patch: ConfigPatch) {
    logger().configure(patch);
}

/// See [`Logger::update`].
pub fn update(patch: ConfigPatch) {
    logger().update(patch);
}

/// See [`Logger::config`].
#[must_use]
pub fn config() -> Config {
    logger().config()
}

pub fn set_log_level(level: Severity) {
    logger().set_log_level(level);
}

pub fn set_use_inspector(enabled: bool) {
    logger().set_use_inspector(enabled);
}

pub fn set_use_remote_reporting(enabled: bool) {
    logger().set_use_remote_reporting(enabled);
}

pub fn set_mirror_to_console(mirror: bool) {
    logger().set_mirror_to_console(mirror);
}

pub fn set_print_level(print: bool) {
    logger().set_print_level(print);
}

pub fn set_print_time(print: bool) {
    logger().set_print_time(print);
}

pub fn set_inspector_instance(handle: InspectorHandle) {
    logger().set_inspector_instance(handle);
}

pub fn set_remote_sink(sink: Option<RemoteHandle>) {
    logger().set_remote_sink(sink);
}

pub fn silly(message: impl Into<Message>) {
    logger().silly(message);
}

pub fn silly_with(message: impl Into<Message>, bypass: Bypass) {
    logger().silly_with(message, bypass);
}

pub fn verbose(message: impl Into<Message>) {
    logger().verbose(message);
}

pub fn verbose_with(message: impl Into<Message>, bypass: Bypass) {
    logger().verbose_with(message, bypass);
}

pub fn info(message: impl Into<Message>) {
    logger().info(message);
}

pub fn info_with(message: impl Into<Message>, bypass: Bypass) {
    logger().info_with(message, bypass);
}

pub fn warn(message: impl Into<Message>) {
    logger().warn(message);
}

pub fn warn_with(message: impl Into<Message>, bypass: Bypass) {
    logger().warn_with(message, bypass);
}

pub fn error(message: impl Into<Message>) {
    logger().error(message);
}

pub fn error_with(message: impl Into<Message>, bypass: Bypass) {
    logger().error_with(message, bypass);
}

pub fn debug(message: impl Into<Message>) {
    logger().debug(message);
}

pub fn debug_with(message: impl Into<Message>, bypass: Bypass) {
    logger().debug_with(message, bypass);
}

/// Log at `level` with explicit bypass flags.
pub fn log(level: Severity, message: impl Into<Message>, bypass: Bypass) {
    logger().log(level, message, bypass);
}

/// See [`Logger::out`].
pub fn out(message: impl Into<Message>) {
    logger().out(message);
}

pub fn out_with(message: impl Into<Message>, bypass: Bypass) {
    logger().out_with(message, bypass);
}

/// See [`Logger::log_fatal`].
pub fn log_fatal(message: impl Into<Message>) {
    logger().log_fatal(message);
}

#[must_use]
pub fn inspector() -> InspectorAccess<'static> {
    logger().inspector()
}

#[must_use]
pub fn remote() -> RemoteAccess<'static> {
    logger().remote()
}
