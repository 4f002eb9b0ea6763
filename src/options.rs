//! Store configuration.

use std::fmt;
use std::sync::Arc;

use crate::{LogLevel, Logger, TracingLogger};

/// Options accepted by [`Store::open`](crate::Store::open).
///
/// # Example
///
/// ```rust
/// use docstore::{LogLevel, Options};
///
/// let options = Options::default()
///     .with_log_level(LogLevel::Debug)
///     .with_sync_writes(false);
/// assert!(!options.sync_writes);
/// ```
#[derive(Clone)]
pub struct Options {
    /// Diagnostics sink. `None` means a [`TracingLogger`] at [`LogLevel::Info`].
    pub logger: Option<Arc<dyn Logger>>,
    /// Flush staged files and the collection directory around each rename.
    ///
    /// On by default. Turning it off keeps writes atomic but lets a power
    /// loss roll back recently acknowledged writes.
    pub sync_writes: bool,
}

impl Options {
    /// Use `logger` for diagnostics.
    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Use the default [`TracingLogger`] at `level`.
    pub fn with_log_level(self, level: LogLevel) -> Self {
        self.with_logger(Arc::new(TracingLogger::new(level)))
    }

    /// Enable or disable fsync around writes.
    pub fn with_sync_writes(mut self, sync_writes: bool) -> Self {
        self.sync_writes = sync_writes;
        self
    }

    pub(crate) fn logger_or_default(&self) -> Arc<dyn Logger> {
        match &self.logger {
            Some(logger) => Arc::clone(logger),
            None => Arc::new(TracingLogger::default()),
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            logger: None,
            sync_writes: true,
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("logger", &self.logger.as_ref().map(|_| "<dyn Logger>"))
            .field("sync_writes", &self.sync_writes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = Options::default();
        assert!(options.logger.is_none());
        assert!(options.sync_writes);
        assert!(options.logger_or_default().enabled(LogLevel::Info));
        assert!(!options.logger_or_default().enabled(LogLevel::Debug));
    }

    #[test]
    fn with_log_level_installs_tracing_logger() {
        let options = Options::default().with_log_level(LogLevel::Trace);
        assert!(options.logger_or_default().enabled(LogLevel::Trace));
    }

    #[test]
    fn debug_hides_logger() {
        let rendered = format!("{:?}", Options::default().with_log_level(LogLevel::Warn));
        assert!(rendered.contains("<dyn Logger>"));
        assert!(rendered.contains("sync_writes: true"));
    }
}
