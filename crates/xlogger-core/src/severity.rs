//! Severity model.
//!
//! Seven totally ordered ranks, from most suppressive to most verbose:
//!
//! | Rank | Level     | Label     | Remote severity |
//! |------|-----------|-----------|-----------------|
//! | 0    | `silent`  | `SILENT`  | `debug`         |
//! | 1    | `error`   | `ERROR`   | `error`         |
//! | 2    | `warn`    | `WARN`    | `warning`       |
//! | 3    | `debug`   | `DEBUG`   | `debug`         |
//! | 4    | `info`    | `INFO`    | `log`           |
//! | 5    | `verbose` | `VERBOSE` | `log`           |
//! | 6    | `silly`   | `SILLY`   | `debug`         |
//!
//! A call is accepted when its rank is at most the configured threshold's rank.
//! `Silent` only makes sense as a threshold.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Log severity. Ordering follows rank: `Silent < Error < ... < Silly`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Threshold that suppresses everything. Never a valid call level.
    Silent = 0,
    Error = 1,
    Warn = 2,
    #[default]
    Debug = 3,
    Info = 4,
    Verbose = 5,
    Silly = 6,
}

impl Severity {
    /// Every severity, in rank order.
    pub const ALL: [Severity; 7] = [
        Severity::Silent,
        Severity::Error,
        Severity::Warn,
        Severity::Debug,
        Severity::Info,
        Severity::Verbose,
        Severity::Silly,
    ];

    /// Numeric rank. Lower means higher priority.
    #[inline]
    #[must_use]
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Upper-case tag used in the `[LABEL]` prefix.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Severity::Silent => "SILENT",
            Severity::Error => "ERROR",
            Severity::Warn => "WARN",
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Verbose => "VERBOSE",
            Severity::Silly => "SILLY",
        }
    }

    /// Lower-case name, as accepted by [`FromStr`].
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Silent => "silent",
            Severity::Error => "error",
            Severity::Warn => "warn",
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Verbose => "verbose",
            Severity::Silly => "silly",
        }
    }

    /// Whether a call at `self` passes a threshold of `threshold`.
    ///
    /// `Silent` never passes, not even a `Silly` threshold.
    #[inline]
    #[must_use]
    pub fn passes(self, threshold: Severity) -> bool {
        self != Severity::Silent && self.rank() <= threshold.rank()
    }

    /// Translate into the remote reporter's coarser vocabulary.
    #[must_use]
    pub fn to_remote(self) -> RemoteSeverity {
        RemoteSeverity::from(self)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "silent" | "off" | "none" => Ok(Severity::Silent),
            "error" => Ok(Severity::Error),
            "warn" | "warning" => Ok(Severity::Warn),
            "debug" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            "verbose" => Ok(Severity::Verbose),
            "silly" | "trace" => Ok(Severity::Silly),
            _ => Err(ParseSeverityError(s.to_string())),
        }
    }
}

/// Returned when a string names no known severity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSeverityError(pub String);

impl fmt::Display for ParseSeverityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log level: {:?}", self.0)
    }
}

impl std::error::Error for ParseSeverityError {}

/// Severity vocabulary understood by remote reporters.
///
/// Coarser than [`Severity`]: several levels collapse onto `Debug` and `Log`.
/// `Fatal` is only produced by the fatal reporting paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteSeverity {
    Debug,
    Log,
    Warning,
    Error,
    Fatal,
}

impl RemoteSeverity {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RemoteSeverity::Debug => "debug",
            RemoteSeverity::Log => "log",
            RemoteSeverity::Warning => "warning",
            RemoteSeverity::Error => "error",
            RemoteSeverity::Fatal => "fatal",
        }
    }
}

impl From<Severity> for RemoteSeverity {
    fn from(level: Severity) -> Self {
        match level {
            Severity::Silent | Severity::Silly | Severity::Debug => RemoteSeverity::Debug,
            Severity::Warn => RemoteSeverity::Warning,
            Severity::Error => RemoteSeverity::Error,
            Severity::Info | Severity::Verbose => RemoteSeverity::Log,
        }
    }
}

impl fmt::Display for RemoteSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output channel of a console-like sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConsoleChannel {
    #[default]
    Default,
    Warn,
    Error,
}

impl ConsoleChannel {
    /// Channel for a call at `level`.
    ///
    /// Only `Error` and `Warn` get their own channel, and only while mirroring
    /// to the native console methods is on.
    #[must_use]
    pub fn for_level(level: Severity, mirror: bool) -> Self {
        match level {
            Severity::Error if mirror => ConsoleChannel::Error,
            Severity::Warn if mirror => ConsoleChannel::Warn,
            _ => ConsoleChannel::Default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_are_strictly_increasing() {
        for pair in Severity::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert_eq!(pair[0].rank() + 1, pair[1].rank());
        }
        assert_eq!(Severity::Silent.rank(), 0);
        assert_eq!(Severity::Silly.rank(), 6);
    }

    #[test]
    fn threshold_admits_lower_ranks_only() {
        for threshold in Severity::ALL {
            for level in Severity::ALL {
                let expected = level != Severity::Silent && level <= threshold;
                assert_eq!(level.passes(threshold), expected, "{level:?} vs {threshold:?}");
            }
        }
    }

    #[test]
    fn silent_threshold_suppresses_everything() {
        assert!(Severity::ALL.iter().all(|l| !l.passes(Severity::Silent)));
    }

    #[test]
    fn labels() {
        assert_eq!(Severity::Info.label(), "INFO");
        assert_eq!(Severity::Verbose.to_string(), "VERBOSE");
    }

    #[test]
    fn parse_accepts_aliases() {
        assert_eq!("WARNING".parse::<Severity>(), Ok(Severity::Warn));
        assert_eq!(" trace ".parse::<Severity>(), Ok(Severity::Silly));
        assert_eq!("off".parse::<Severity>(), Ok(Severity::Silent));
        assert!("loud".parse::<Severity>().is_err());
    }

    #[test]
    fn remote_mapping_collapses_levels() {
        assert_eq!(RemoteSeverity::from(Severity::Silent), RemoteSeverity::Debug);
        assert_eq!(RemoteSeverity::from(Severity::Silly), RemoteSeverity::Debug);
        assert_eq!(RemoteSeverity::from(Severity::Debug), RemoteSeverity::Debug);
        assert_eq!(RemoteSeverity::from(Severity::Info), RemoteSeverity::Log);
        assert_eq!(RemoteSeverity::from(Severity::Verbose), RemoteSeverity::Log);
        assert_eq!(RemoteSeverity::from(Severity::Warn), RemoteSeverity::Warning);
        assert_eq!(RemoteSeverity::from(Severity::Error), RemoteSeverity::Error);
    }

    #[test]
    fn console_channel_depends_on_mirroring() {
        assert_eq!(ConsoleChannel::for_level(Severity::Error, true), ConsoleChannel::Error);
        assert_eq!(ConsoleChannel::for_level(Severity::Warn, true), ConsoleChannel::Warn);
        assert_eq!(ConsoleChannel::for_level(Severity::Info, true), ConsoleChannel::Default);
        assert_eq!(ConsoleChannel::for_level(Severity::Error, false), ConsoleChannel::Default);
        assert_eq!(ConsoleChannel::for_level(Severity::Warn, false), ConsoleChannel::Default);
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Severity::Verbose).unwrap();
        assert_eq!(json, "\"verbose\"");
        let parsed: Severity = serde_json::from_str("\"error\"").unwrap();
        assert_eq!(parsed, Severity::Error);
    }
}
