//! Message normalization.
//!
//! Turns a [`Message`] into what each kind of sink expects: prefixed text
//! for the console, the untouched payload for structured sinks, and a single
//! string for remote reporters.

use time::OffsetDateTime;
use time::macros::format_description;

use crate::config::Config;
use crate::message::Message;
use crate::severity::Severity;

/// Output of [`render`].
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered<'a> {
    /// A primitive with its prefixes applied.
    Text(String),
    /// A non-primitive payload, passed through unchanged.
    Structured(&'a Message),
}

impl Rendered<'_> {
    /// Text handed to a console-like sink.
    ///
    /// Structured payloads are pretty-printed as JSON.
    #[must_use]
    pub fn to_console_text(&self) -> String {
        match self {
            Rendered::Text(s) => s.clone(),
            Rendered::Structured(message) => pretty(message),
        }
    }
}

/// Render a message for a call at `level`.
///
/// Primitives become `"{time}{label}  {message}"`, where each prefix is
/// present only if enabled in `config`. `now` is only called when the time
/// prefix is on. Non-primitives never receive prefixes.
pub fn render<'a, F>(message: &'a Message, level: Severity, config: &Config, now: F) -> Rendered<'a>
where
    F: FnOnce() -> OffsetDateTime,
{
    let Some(text) = message.as_primitive_text() else {
        return Rendered::Structured(message);
    };

    let time_prefix = if config.print_time {
        time_prefix(now())
    } else {
        String::new()
    };
    let level_prefix = if config.print_level {
        format!("[{}]", level.label())
    } else {
        String::new()
    };

    Rendered::Text(format!("{time_prefix}{level_prefix}  {text}"))
}

/// `[HH:MM:SS.mmm]` for the given instant, or empty if formatting fails.
#[must_use]
pub fn time_prefix(at: OffsetDateTime) -> String {
    let fmt = format_description!("[hour]:[minute]:[second].[subsecond digits:3]");
    at.format(&fmt).map(|ts| format!("[{ts}]")).unwrap_or_default()
}

/// Current wall-clock time, local when the offset can be determined.
#[must_use]
pub fn local_now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// Single-string form for reporters that only accept text.
///
/// Primitives are stringified, everything else is compact JSON.
#[must_use]
pub fn to_remote_form(message: &Message) -> String {
    if let Some(text) = message.as_primitive_text() {
        return text;
    }
    let value = message.to_value();
    serde_json::to_string(&value).unwrap_or_else(|_| format!("{message:?}"))
}

/// Unprefixed text for the always-emit path.
#[must_use]
pub fn plain_text(message: &Message) -> String {
    message.as_primitive_text().unwrap_or_else(|| pretty(message))
}

fn pretty(message: &Message) -> String {
    serde_json::to_string_pretty(&message.to_value()).unwrap_or_else(|_| message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigPatch;
    use crate::message::ErrorLike;
    use serde_json::json;
    use time::macros::datetime;

    fn fixed() -> OffsetDateTime {
        datetime!(2024-03-05 09:07:04.012 UTC)
    }

    fn config(print_level: bool, print_time: bool) -> Config {
        Config::from_patch(
            ConfigPatch::new()
                .print_level(print_level)
                .print_time(print_time),
        )
    }

    #[test]
    fn level_prefix_only() {
        let msg = Message::from("hello");
        let out = render(&msg, Severity::Info, &config(true, false), fixed);
        assert_eq!(out, Rendered::Text("[INFO]  hello".into()));
    }

    #[test]
    fn time_and_level_prefix() {
        let msg = Message::from("hello");
        let out = render(&msg, Severity::Warn, &config(true, true), fixed);
        assert_eq!(out, Rendered::Text("[09:07:04.012][WARN]  hello".into()));
    }

    #[test]
    fn no_prefixes_keeps_separator() {
        let msg = Message::from(12);
        let out = render(&msg, Severity::Debug, &config(false, false), fixed);
        assert_eq!(out, Rendered::Text("  12".into()));
    }

    #[test]
    fn clock_not_read_without_time_prefix() {
        let msg = Message::from("x");
        let _ = render(&msg, Severity::Debug, &config(true, false), || {
            panic!("clock should not be read")
        });
    }

    #[test]
    fn structured_is_never_prefixed() {
        let msg = Message::from(json!({"a": 1}));
        let out = render(&msg, Severity::Error, &config(true, true), fixed);
        assert_eq!(out, Rendered::Structured(&msg));
    }

    #[test]
    fn remote_form() {
        assert_eq!(to_remote_form(&Message::from("plain")), "plain");
        assert_eq!(to_remote_form(&Message::from(3.5)), "3.5");
        assert_eq!(to_remote_form(&Message::from(json!({"a": 1}))), r#"{"a":1}"#);
        let err = Message::from(ErrorLike::new("boom"));
        assert_eq!(to_remote_form(&err), r#"{"message":"boom"}"#);
    }

    #[test]
    fn console_text_for_structured_is_pretty_json() {
        let msg = Message::from(json!({"a": 1}));
        let rendered = Rendered::Structured(&msg);
        assert_eq!(rendered.to_console_text(), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn plain_text_has_no_prefix() {
        assert_eq!(plain_text(&Message::from("banner")), "banner");
    }

    #[test]
    fn time_prefix_is_zero_padded() {
        assert_eq!(time_prefix(fixed()), "[09:07:04.012]");
    }
}
