//! Progress notices for verbose runs.

use std::fmt;
use std::sync::Arc;

type Sink = Arc<dyn Fn(&str) + Send + Sync>;

/// Receiver for human-readable progress lines.
///
/// Passed explicitly to each stage that reports progress. The default sink
/// discards everything.
#[derive(Clone, Default)]
pub struct ProgressLog {
    sink: Option<Sink>,
}

impl ProgressLog {
    /// A sink that discards every notice.
    pub fn silent() -> Self {
        Self::default()
    }

    /// Forwards notices to `tracing` at info level.
    pub fn verbose() -> Self {
        Self::new(|line| tracing::info!("{line}"))
    }

    /// Wraps an arbitrary callback.
    pub fn new<F>(sink: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        Self {
            sink: Some(Arc::new(sink)),
        }
    }

    /// Emits one notice.
    pub fn log(&self, line: &str) {
        if let Some(sink) = &self.sink {
            sink(line);
        }
    }

    /// Whether notices go anywhere.
    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }
}

impl fmt::Debug for ProgressLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressLog")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

/// Test helper that records every notice.
#[cfg(test)]
pub(crate) fn recording() -> (ProgressLog, Arc<std::sync::Mutex<Vec<String>>>) {
    let lines = Arc::new(std::sync::Mutex::new(Vec::new()));
    let handle = lines.clone();
    let log = ProgressLog::new(move |line| {
        if let Ok(mut lines) = handle.lock() {
            lines.push(line.to_string());
        }
    });
    (log, lines)
}
