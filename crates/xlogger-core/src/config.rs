//! Logger configuration.
//!
//! [`Config`] is the live record a [`Logger`](crate::Logger) consults on every
//! call. [`ConfigPatch`] is a partial update: [`Config::from_patch`] builds a
//! fresh record from defaults, [`Config::apply`] merges onto an existing one.
//!
//! Patches can be built in code, parsed from TOML, or read from the
//! environment.

use std::env;
use std::fmt;

use serde::Deserialize;

use crate::severity::{ParseSeverityError, Severity};
use crate::sink::InspectorHandle;

/// Default threshold.
pub const DEFAULT_THRESHOLD: Severity = Severity::Debug;

/// The complete, live configuration of one logger.
#[derive(Clone)]
pub struct Config {
    /// Most verbose level still emitted.
    pub threshold: Severity,
    /// Route `error`/`warn` to the console's error/warn channels.
    pub mirror_to_console: bool,
    /// Prefix primitive messages with `[LABEL]`.
    pub print_level: bool,
    /// Prefix primitive messages with `[HH:MM:SS.mmm]`.
    pub print_time: bool,
    /// Forward to the inspector (needs a bound handle).
    pub use_inspector: bool,
    /// Bound inspector, if any.
    pub inspector: Option<InspectorHandle>,
    /// Forward to the remote reporter.
    pub use_remote: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            mirror_to_console: true,
            print_level: true,
            print_time: false,
            use_inspector: false,
            inspector: None,
            use_remote: false,
        }
    }
}

impl Config {
    /// Defaults with `patch` laid over them. Omitted fields keep their
    /// defaults, never a previous configuration's values.
    #[must_use]
    pub fn from_patch(patch: ConfigPatch) -> Self {
        let mut config = Self::default();
        config.apply(patch);
        config
    }

    /// Overwrite the fields `patch` sets, leaving the rest untouched.
    pub fn apply(&mut self, patch: ConfigPatch) {
        if let Some(level) = patch.log_level {
            self.threshold = level;
        }
        if let Some(mirror) = patch.mirror_to_console {
            self.mirror_to_console = mirror;
        }
        if let Some(print) = patch.print_level {
            self.print_level = print;
        }
        if let Some(print) = patch.print_time {
            self.print_time = print;
        }
        if let Some(use_inspector) = patch.use_inspector {
            self.use_inspector = use_inspector;
        }
        if let Some(handle) = patch.inspector {
            self.inspector = Some(handle);
        }
        if let Some(use_remote) = patch.use_remote {
            self.use_remote = use_remote;
        }
    }

    /// Whether inspector delivery is both enabled and bound.
    #[must_use]
    pub fn inspector_active(&self) -> bool {
        self.use_inspector && self.inspector.is_some()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("threshold", &self.threshold)
            .field("mirror_to_console", &self.mirror_to_console)
            .field("print_level", &self.print_level)
            .field("print_time", &self.print_time)
            .field("use_inspector", &self.use_inspector)
            .field("inspector_bound", &self.inspector.is_some())
            .field("use_remote", &self.use_remote)
            .finish()
    }
}

/// Partial configuration. `None` means "not specified".
///
/// Deserializes from snake_case keys. The legacy camelCase names
/// (`logLevel`, `useSentry`, ...) are accepted as aliases.
#[derive(Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigPatch {
    #[serde(alias = "logLevel", alias = "level")]
    pub log_level: Option<Severity>,
    #[serde(alias = "useCorrespondingConsoleMethod", alias = "mirrorToConsole")]
    pub mirror_to_console: Option<bool>,
    #[serde(alias = "printLogLevel")]
    pub print_level: Option<bool>,
    #[serde(alias = "printLogTime")]
    pub print_time: Option<bool>,
    #[serde(alias = "useInspector", alias = "useReactotron")]
    pub use_inspector: Option<bool>,
    #[serde(skip)]
    pub inspector: Option<InspectorHandle>,
    #[serde(alias = "useRemote", alias = "useSentry")]
    pub use_remote: Option<bool>,
}

impl ConfigPatch {
    /// An empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a patch from environment variables.
    ///
    /// | Variable | Values |
    /// |----------|--------|
    /// | `XLOGGER_LEVEL` | silent/error/warn/debug/info/verbose/silly |
    /// | `XLOGGER_MIRROR_CONSOLE` | boolean |
    /// | `XLOGGER_PRINT_LEVEL` | boolean |
    /// | `XLOGGER_PRINT_TIME` | boolean |
    /// | `XLOGGER_INSPECTOR` | boolean |
    /// | `XLOGGER_REMOTE` | boolean |
    ///
    /// Booleans accept `1/0`, `true/false`, `yes/no`, `on/off`. Unset
    /// variables leave the field unspecified.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut patch = Self::default();

        if let Some(level) = lookup("XLOGGER_LEVEL") {
            let level = level
                .parse::<Severity>()
                .map_err(|source| ConfigError::InvalidLevel {
                    var: "XLOGGER_LEVEL",
                    source,
                })?;
            patch.log_level = Some(level);
        }

        let flag = |var: &'static str| -> Result<Option<bool>, ConfigError> {
            lookup(var)
                .map(|value| parse_bool(&value).ok_or(ConfigError::InvalidBool { var, value }))
                .transpose()
        };

        patch.mirror_to_console = flag("XLOGGER_MIRROR_CONSOLE")?;
        patch.print_level = flag("XLOGGER_PRINT_LEVEL")?;
        patch.print_time = flag("XLOGGER_PRINT_TIME")?;
        patch.use_inspector = flag("XLOGGER_INSPECTOR")?;
        patch.use_remote = flag("XLOGGER_REMOTE")?;

        Ok(patch)
    }

    /// Parse a patch from a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        toml::from_str(source).map_err(ConfigError::Toml)
    }

    // ─────────────────────────────────────────────────
    // Builder Methods
    // ─────────────────────────────────────────────────

    #[must_use]
    pub fn log_level(mut self, level: Severity) -> Self {
        self.log_level = Some(level);
        self
    }

    #[must_use]
    pub fn mirror_to_console(mut self, mirror: bool) -> Self {
        self.mirror_to_console = Some(mirror);
        self
    }

    #[must_use]
    pub fn print_level(mut self, print: bool) -> Self {
        self.print_level = Some(print);
        self
    }

    #[must_use]
    pub fn print_time(mut self, print: bool) -> Self {
        self.print_time = Some(print);
        self
    }

    #[must_use]
    pub fn use_inspector(mut self, enabled: bool) -> Self {
        self.use_inspector = Some(enabled);
        self
    }

    /// Bind an inspector handle.
    #[must_use]
    pub fn inspector(mut self, handle: InspectorHandle) -> Self {
        self.inspector = Some(handle);
        self
    }

    #[must_use]
    pub fn use_remote(mut self, enabled: bool) -> Self {
        self.use_remote = Some(enabled);
        self
    }
}

impl fmt::Debug for ConfigPatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigPatch")
            .field("log_level", &self.log_level)
            .field("mirror_to_console", &self.mirror_to_console)
            .field("print_level", &self.print_level)
            .field("print_time", &self.print_time)
            .field("use_inspector", &self.use_inspector)
            .field("inspector", &self.inspector.as_ref().map(|_| "<bound>"))
            .field("use_remote", &self.use_remote)
            .finish()
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Failure to build a [`ConfigPatch`] from an external source.
#[derive(Debug)]
pub enum ConfigError {
    /// An environment variable named an unknown level.
    InvalidLevel {
        var: &'static str,
        source: ParseSeverityError,
    },
    /// An environment variable held something other than a boolean.
    InvalidBool { var: &'static str, value: String },
    /// The TOML document was malformed or had unknown keys.
    Toml(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidLevel { var, source } => write!(f, "{var}: {source}"),
            ConfigError::InvalidBool { var, value } => {
                write!(f, "{var}: expected a boolean, got {value:?}")
            }
            ConfigError::Toml(e) => write!(f, "invalid configuration: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidLevel { source, .. } => Some(source),
            ConfigError::InvalidBool { .. } => None,
            ConfigError::Toml(e) => Some(e),
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Toml(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.threshold, Severity::Debug);
        assert!(config.mirror_to_console);
        assert!(config.print_level);
        assert!(!config.print_time);
        assert!(!config.use_inspector);
        assert!(config.inspector.is_none());
        assert!(!config.use_remote);
    }

    #[test]
    fn test_from_patch_starts_from_defaults() {
        let config = Config::from_patch(ConfigPatch::new().print_time(true));
        assert_eq!(config.threshold, Severity::Debug);
        assert!(config.print_time);
    }

    #[test]
    fn test_explicit_false_is_honored() {
        let config = Config::from_patch(ConfigPatch::new().mirror_to_console(false));
        assert!(!config.mirror_to_console);
        let config = Config::from_patch(ConfigPatch::new().log_level(Severity::Silent));
        assert_eq!(config.threshold, Severity::Silent);
    }

    #[test]
    fn test_apply_merges() {
        let mut config = Config::from_patch(ConfigPatch::new().log_level(Severity::Error));
        config.apply(ConfigPatch::new().print_time(true));
        assert_eq!(config.threshold, Severity::Error);
        assert!(config.print_time);
    }

    #[test]
    fn test_inspector_active_needs_flag_and_handle() {
        let config = Config::from_patch(ConfigPatch::new().use_inspector(true));
        assert!(!config.inspector_active());
    }

    #[test]
    fn test_from_env() {
        let patch = ConfigPatch::from_lookup(lookup(&[
            ("XLOGGER_LEVEL", "warn"),
            ("XLOGGER_PRINT_TIME", "yes"),
            ("XLOGGER_REMOTE", "0"),
        ]))
        .unwrap();
        assert_eq!(patch.log_level, Some(Severity::Warn));
        assert_eq!(patch.print_time, Some(true));
        assert_eq!(patch.use_remote, Some(false));
        assert_eq!(patch.print_level, None);
        assert_eq!(patch.mirror_to_console, None);
    }

    #[test]
    fn test_from_env_rejects_bad_values() {
        let err = ConfigPatch::from_lookup(lookup(&[("XLOGGER_LEVEL", "loud")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLevel { var: "XLOGGER_LEVEL", .. }));

        let err = ConfigPatch::from_lookup(lookup(&[("XLOGGER_INSPECTOR", "maybe")])).unwrap_err();
        assert!(err.to_string().contains("XLOGGER_INSPECTOR"));
    }

    #[test]
    fn test_from_toml() {
        let patch = ConfigPatch::from_toml_str(
            r#"
            log_level = "verbose"
            print_time = true
            useSentry = true
            "#,
        )
        .unwrap();
        assert_eq!(patch.log_level, Some(Severity::Verbose));
        assert_eq!(patch.print_time, Some(true));
        assert_eq!(patch.use_remote, Some(true));
    }

    #[test]
    fn test_from_toml_rejects_unknown_keys() {
        assert!(ConfigPatch::from_toml_str("colour = true").is_err());
    }

    #[test]
    fn test_patch_from_json_with_legacy_names() {
        let patch: ConfigPatch =
            serde_json::from_str(r#"{"logLevel": "error", "printLogLevel": false}"#).unwrap();
        assert_eq!(patch.log_level, Some(Severity::Error));
        assert_eq!(patch.print_level, Some(false));
    }
}
