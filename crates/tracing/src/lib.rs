//! Tracing setup for dex2.
//!
//! A [`Dex2Tracer`] collects one [`LayerInfo`] per sink (stdout, and optionally a log file) and
//! installs them on a single [`tracing_subscriber::Registry`].

mod formatter;
mod layers;

pub use formatter::LogFormat;
pub use layers::{FileInfo, FileWorkerGuard};
// re-export so callers can build filter directives without depending on tracing-subscriber
pub use tracing_subscriber;

use layers::Layers;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Something that can install a global tracing subscriber.
pub trait Tracer {
    /// Install the subscriber. The returned guard, if any, must be held for as long as file
    /// logging should keep flushing.
    fn init(self) -> eyre::Result<Option<FileWorkerGuard>>;
}

/// Format, filters and color settings for one output layer.
#[derive(Debug, Clone)]
pub struct LayerInfo {
    format: LogFormat,
    default_directive: String,
    filters: String,
    color: Option<String>,
}

impl LayerInfo {
    /// Create a new [`LayerInfo`]. `filters` is a comma separated list of `EnvFilter`
    /// directives applied on top of `default_directive`.
    pub fn new(
        format: LogFormat,
        default_directive: String,
        filters: String,
        color: Option<String>,
    ) -> Self {
        Self { format, default_directive, filters, color }
    }
}

impl Default for LayerInfo {
    fn default() -> Self {
        Self {
            format: LogFormat::Terminal,
            default_directive: "info".to_string(),
            filters: String::new(),
            color: Some("always".to_string()),
        }
    }
}

/// The dex2 tracer: stdout plus an optional log file.
#[derive(Debug, Clone, Default)]
pub struct Dex2Tracer {
    stdout: LayerInfo,
    file: Option<(LayerInfo, FileInfo)>,
}

impl Dex2Tracer {
    /// Create a tracer with the default stdout layer and no file output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stdout layer configuration.
    pub fn with_stdout(mut self, config: LayerInfo) -> Self {
        self.stdout = config;
        self
    }

    /// Also write logs to the file described by `file`.
    pub fn with_file(mut self, config: LayerInfo, file: FileInfo) -> Self {
        self.file = Some((config, file));
        self
    }
}

impl Tracer for Dex2Tracer {
    fn init(self) -> eyre::Result<Option<FileWorkerGuard>> {
        let mut layers = Layers::new();

        layers.stdout(
            self.stdout.format,
            &self.stdout.default_directive,
            &self.stdout.filters,
            self.stdout.color,
        )?;

        let guard = match self.file {
            Some((config, file)) => Some(layers.file(
                config.format,
                &config.default_directive,
                &config.filters,
                file,
            )?),
            None => None,
        };

        tracing_subscriber::registry().with(layers.into_inner()).try_init()?;
        Ok(guard)
    }
}
