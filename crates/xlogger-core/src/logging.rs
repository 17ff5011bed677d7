//! Internal diagnostics.
//!
//! xlogger reports on itself (configuration changes, failed sink deliveries)
//! through the standard [`log`] facade, so the host's logger decides whether
//! those diagnostics are shown.
//!
//! Bridges that feed `log` or `tracing` records back into a
//! [`Logger`](crate::Logger) must drop records whose target is under
//! [`targets::XLOGGER`]; [`is_internal`] does that check.
//!
//! Example filter: `RUST_LOG=xlogger::sink=warn`

/// Log targets used by xlogger itself.
pub mod targets {
    /// Root target.
    pub const XLOGGER: &str = "xlogger";

    /// Dispatch decisions.
    pub const DISPATCH: &str = "xlogger::dispatch";

    /// Configuration changes.
    pub const CONFIG: &str = "xlogger::config";

    /// Sink delivery failures.
    pub const SINK: &str = "xlogger::sink";
}

/// Whether `target` belongs to xlogger's own diagnostics.
#[inline]
#[must_use]
pub fn is_internal(target: &str) -> bool {
    target == targets::XLOGGER
        || target
            .strip_prefix(targets::XLOGGER)
            .is_some_and(|rest| rest.starts_with("::"))
}
