use crate::layers::BoxedLayer;
use clap::ValueEnum;
use std::{
    fmt::{self, Display},
    io::IsTerminal,
};
use tracing_appender::non_blocking::NonBlocking;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// The output format of a log layer.
#[derive(Debug, Copy, Clone, ValueEnum, Eq, PartialEq)]
pub enum LogFormat {
    /// One JSON object per event.
    Json,
    /// `key=value` pairs, see <https://brandur.org/logfmt>.
    #[value(name = "logfmt")]
    LogFmt,
    /// Human readable, optionally colored output.
    Terminal,
}

impl LogFormat {
    /// Build a boxed layer in this format, writing to `file_writer` when given and to stdout
    /// otherwise.
    pub(crate) fn apply(
        &self,
        filter: EnvFilter,
        color: Option<String>,
        file_writer: Option<NonBlocking>,
    ) -> BoxedLayer<Registry> {
        let ansi = use_ansi(
            color.as_deref(),
            std::io::stdout().is_terminal(),
            std::env::var_os("NO_COLOR").is_some(),
        );
        let target = filter.max_level_hint().is_some_and(|level| level >= tracing::Level::DEBUG);

        match self {
            LogFormat::Json => {
                let layer =
                    tracing_subscriber::fmt::layer().json().with_ansi(ansi).with_target(target);
                match file_writer {
                    Some(writer) => layer.with_writer(writer).with_filter(filter).boxed(),
                    None => layer.with_filter(filter).boxed(),
                }
            }
            LogFormat::LogFmt => {
                let layer = tracing_logfmt::builder().layer();
                match file_writer {
                    Some(writer) => layer.with_writer(writer).with_filter(filter).boxed(),
                    None => layer.with_filter(filter).boxed(),
                }
            }
            LogFormat::Terminal => {
                let layer = tracing_subscriber::fmt::layer().with_ansi(ansi).with_target(target);
                match file_writer {
                    Some(writer) => {
                        layer.with_ansi(false).with_writer(writer).with_filter(filter).boxed()
                    }
                    None => layer.with_filter(filter).boxed(),
                }
            }
        }
    }
}

/// `auto` colors only an interactive stdout, and `NO_COLOR` turns it off.
fn use_ansi(color: Option<&str>, is_terminal: bool, no_color: bool) -> bool {
    match color {
        Some("always") => true,
        Some("auto") => is_terminal && !no_color,
        _ => false,
    }
}

impl Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Json => write!(f, "json"),
            LogFormat::LogFmt => write!(f, "logfmt"),
            LogFormat::Terminal => write!(f, "terminal"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_color_requires_terminal() {
        assert!(use_ansi(Some("auto"), true, false));
        assert!(!use_ansi(Some("auto"), false, false));
        assert!(!use_ansi(Some("auto"), true, true));
    }

    #[test]
    fn test_always_and_never_ignore_terminal() {
        assert!(use_ansi(Some("always"), false, true));
        assert!(!use_ansi(Some("never"), true, false));
        assert!(!use_ansi(None, true, false));
    }
}
