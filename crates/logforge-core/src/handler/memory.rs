//! In-memory capturing handler

use std::sync::Arc;

use parking_lot::Mutex;

use crate::formatter::{Formatter, LineFormatter};
use crate::handler::{FormattableHandler, Handler, ProcessableHandler};
use crate::level::Level;
use crate::processor::SharedProcessor;
use crate::record::LogRecord;

/// Captures processed, formatted records in memory
///
/// Carries both optional capabilities: a processor chain with stack
/// attachment semantics and a replaceable formatter (a default
/// [`LineFormatter`] is used until one is attached). Primarily meant for
/// tests and assertions over what a logger graph actually emitted.
pub struct MemoryHandler {
    level: Level,
    bubble: bool,
    processors: Mutex<Vec<SharedProcessor>>,
    formatter: Mutex<Option<Arc<dyn Formatter>>>,
    captured: Mutex<Vec<(LogRecord, String)>>,
}

impl MemoryHandler {
    /// Create a capturing handler for records at or above `level`
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self {
            level,
            bubble: true,
            processors: Mutex::new(Vec::new()),
            formatter: Mutex::new(None),
            captured: Mutex::new(Vec::new()),
        }
    }

    /// Stop record propagation after this handler consumes a record
    #[inline]
    #[must_use]
    pub fn without_bubbling(mut self) -> Self {
        self.bubble = false;
        self
    }

    /// Records captured so far, in arrival order
    #[must_use]
    pub fn records(&self) -> Vec<LogRecord> {
        self.captured.lock().iter().map(|(r, _)| r.clone()).collect()
    }

    /// Formatted lines captured so far
    #[must_use]
    pub fn formatted(&self) -> Vec<String> {
        self.captured.lock().iter().map(|(_, s)| s.clone()).collect()
    }

    /// Whether any captured record's message equals `message`
    #[must_use]
    pub fn has_message(&self, message: &str) -> bool {
        self.captured.lock().iter().any(|(r, _)| r.message == message)
    }

    /// Drop all captured records
    pub fn clear(&self) {
        self.captured.lock().clear();
    }
}

impl Handler for MemoryHandler {
    fn is_handling(&self, level: Level) -> bool {
        level >= self.level
    }

    fn handle(&self, record: LogRecord) -> bool {
        if !self.is_handling(record.level) {
            return false;
        }

        let mut record = record;
        for processor in self.processors.lock().iter() {
            record = processor.process(record);
        }

        let formatted = match self.formatter.lock().as_ref() {
            Some(formatter) => formatter.format(&record),
            None => LineFormatter::default().format(&record),
        };
        self.captured.lock().push((record, formatted));

        !self.bubble
    }

    fn processable(&self) -> Option<&dyn ProcessableHandler> {
        Some(self)
    }

    fn formattable(&self) -> Option<&dyn FormattableHandler> {
        Some(self)
    }
}

impl ProcessableHandler for MemoryHandler {
    fn push_processor(&self, processor: SharedProcessor) {
        self.processors.lock().insert(0, processor);
    }

    fn processor_count(&self) -> usize {
        self.processors.lock().len()
    }
}

impl FormattableHandler for MemoryHandler {
    fn set_formatter(&self, formatter: Arc<dyn Formatter>) {
        *self.formatter.lock() = Some(formatter);
    }

    fn formatter(&self) -> Option<Arc<dyn Formatter>> {
        self.formatter.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use serde_json::Map;

    fn record(level: Level, message: &str) -> LogRecord {
        LogRecord::new(
            "t",
            level,
            message,
            Map::new(),
            FixedOffset::east_opt(0).unwrap(),
        )
    }

    #[test]
    fn captures_at_or_above_level() {
        let handler = MemoryHandler::new(Level::Warning);
        handler.handle(record(Level::Error, "kept"));
        handler.handle(record(Level::Debug, "dropped"));

        assert!(handler.has_message("kept"));
        assert!(!handler.has_message("dropped"));
        assert_eq!(handler.records().len(), 1);
    }

    #[test]
    fn push_processor_is_a_stack() {
        let handler = MemoryHandler::new(Level::Debug);
        handler.push_processor(Arc::new(|mut r: LogRecord| {
            r.message.push('a');
            r
        }));
        handler.push_processor(Arc::new(|mut r: LogRecord| {
            r.message.push('b');
            r
        }));

        handler.handle(record(Level::Info, "m-"));

        // Pushed last, runs first: the chain runs front to back.
        assert!(handler.has_message("m-ba"));
        assert_eq!(handler.processor_count(), 2);
    }

    #[test]
    fn attached_formatter_shapes_output() {
        let handler = MemoryHandler::new(Level::Debug);
        handler.set_formatter(Arc::new(LineFormatter::new("%message%", "%Y")));
        handler.handle(record(Level::Info, "short"));

        assert_eq!(handler.formatted(), vec!["short".to_string()]);
    }

    #[test]
    fn bubble_flag_controls_return() {
        let bubbling = MemoryHandler::new(Level::Debug);
        assert!(!bubbling.handle(record(Level::Info, "x")));

        let terminal = MemoryHandler::new(Level::Debug).without_bubbling();
        assert!(terminal.handle(record(Level::Info, "x")));
    }
}
