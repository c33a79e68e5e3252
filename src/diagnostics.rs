/// Diagnostics sink handed to the extractors
///
/// Extraction reports progress and data anomalies through this trait instead of
/// logging directly, so callers decide where the messages end up. The binaries
/// use [`TracingDiagnostics`]; tests use [`CollectingDiagnostics`] to assert on
/// what was reported.
use std::cell::RefCell;
use tracing::Level;

pub trait Diagnostics {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

/// Forwards to `tracing` under the `ugc_chart_data::extract` target
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn info(&self, message: &str) {
        tracing::info!(target: "ugc_chart_data::extract", "{}", message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "ugc_chart_data::extract", "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "ugc_chart_data::extract", "{}", message);
    }
}

/// Keeps every message in memory
#[derive(Debug, Default)]
pub struct CollectingDiagnostics {
    entries: RefCell<Vec<(Level, String)>>,
}

impl CollectingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages recorded at `level`, in order
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    fn push(&self, level: Level, message: &str) {
        self.entries.borrow_mut().push((level, message.to_string()));
    }
}

impl Diagnostics for CollectingDiagnostics {
    fn info(&self, message: &str) {
        self.push(Level::INFO, message);
    }

    fn warn(&self, message: &str) {
        self.push(Level::WARN, message);
    }

    fn error(&self, message: &str) {
        self.push(Level::ERROR, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_diagnostics_by_level() {
        let diag = CollectingDiagnostics::new();
        diag.info("one");
        diag.warn("two");
        diag.info("three");

        assert_eq!(diag.len(), 3);
        assert_eq!(diag.messages(Level::INFO), vec!["one", "three"]);
        assert_eq!(diag.messages(Level::WARN), vec!["two"]);
        assert!(diag.messages(Level::ERROR).is_empty());
    }
}
