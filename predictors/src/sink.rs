use std::{cell::RefCell, rc::Rc};

use log::debug;

/// A key to scalar reporting interface, fed with `{phase}_{metric}` keys.
pub trait MetricsSink {
    fn log(&mut self, key: &str, value: f32);
}

/// Discards every metric.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl MetricsSink for NoopSink {
    fn log(&mut self, _key: &str, _value: f32) {}
}

/// Forwards every metric to the `log` facade at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl MetricsSink for LogSink {
    fn log(&mut self, key: &str, value: f32) {
        debug!(metric = key, value = value; "reported");
    }
}

/// Keeps every reported metric in memory.
///
/// Clones share the same storage, so a handle kept outside of a predictor observes what the
/// predictor reports.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    records: Rc<RefCell<Vec<(String, f32)>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot of every `(key, value)` pair reported so far, in order.
    pub fn records(&self) -> Vec<(String, f32)> {
        self.records.borrow().clone()
    }

    /// The values reported under `key`, in order.
    pub fn values(&self, key: &str) -> Vec<f32> {
        self.records
            .borrow()
            .iter()
            .filter(|(k, _)| k == key)
            .map(|&(_, v)| v)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }
}

impl MetricsSink for MemorySink {
    fn log(&mut self, key: &str, value: f32) {
        self.records.borrow_mut().push((key.to_string(), value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_handles_share_records() {
        let handle = MemorySink::new();
        let mut sink = handle.clone();

        sink.log("train_loss", 2.3);
        sink.log("train_acc", 0.25);
        sink.log("train_loss", 2.1);

        assert_eq!(handle.len(), 3);
        assert_eq!(handle.values("train_loss"), [2.3, 2.1]);
        assert_eq!(handle.records()[1], ("train_acc".to_string(), 0.25));
    }

    #[test]
    fn noop_sink_accepts_anything() {
        let mut sink = NoopSink;
        sink.log("val_loss", f32::NAN);
    }
}
