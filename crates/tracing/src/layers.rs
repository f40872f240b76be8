use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{filter::Directive, EnvFilter, Layer, Registry};

use crate::formatter::LogFormat;

/// A boxed tracing [Layer].
pub(crate) type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync>;

/// Keeps the non-blocking file writer flushing; dropping it stops file logging.
pub type FileWorkerGuard = WorkerGuard;

/// Where file logs are written.
#[derive(Debug, Clone)]
pub struct FileInfo {
    dir: PathBuf,
    file_name: String,
}

impl FileInfo {
    /// Log to `dir/file_name`.
    pub fn new(dir: PathBuf, file_name: impl Into<String>) -> Self {
        Self { dir, file_name: file_name.into() }
    }
}

/// The set of layers that will be installed on the registry.
#[derive(Default)]
pub(crate) struct Layers {
    inner: Vec<BoxedLayer<Registry>>,
}

impl Layers {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn into_inner(self) -> Vec<BoxedLayer<Registry>> {
        self.inner
    }

    pub(crate) fn stdout(
        &mut self,
        format: LogFormat,
        default_directive: &str,
        filters: &str,
        color: Option<String>,
    ) -> eyre::Result<()> {
        let filter = build_env_filter(default_directive, filters)?;
        self.inner.push(format.apply(filter, color, None));
        Ok(())
    }

    pub(crate) fn file(
        &mut self,
        format: LogFormat,
        default_directive: &str,
        filters: &str,
        file_info: FileInfo,
    ) -> eyre::Result<FileWorkerGuard> {
        std::fs::create_dir_all(&file_info.dir)?;
        let appender = tracing_appender::rolling::never(&file_info.dir, &file_info.file_name);
        let (writer, guard) = tracing_appender::non_blocking(appender);

        let filter = build_env_filter(default_directive, filters)?;
        self.inner.push(format.apply(filter, None, Some(writer)));
        Ok(guard)
    }
}

/// Build an [`EnvFilter`] from a default directive plus comma separated extra directives.
fn build_env_filter(default_directive: &str, directives: &str) -> eyre::Result<EnvFilter> {
    let default_directive: Directive = default_directive.parse()?;
    let mut env_filter =
        EnvFilter::builder().with_default_directive(default_directive).from_env_lossy();

    for directive in directives.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        env_filter = env_filter.add_directive(directive.parse::<Directive>()?);
    }
    Ok(env_filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_env_filter_with_directives() {
        let filter = build_env_filter("warn", "dex2_decoder=trace, dex2_common=debug")
            .expect("failed to build filter");
        assert!(filter.to_string().contains("dex2_decoder=trace"));
    }

    #[test]
    fn test_build_env_filter_skips_empty_directives() {
        let filter = build_env_filter("info", " , ,").expect("failed to build filter");
        assert!(filter.to_string().contains("info"));
    }
}
