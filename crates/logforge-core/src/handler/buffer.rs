//! Buffering wrapper handler

use std::sync::Arc;

use parking_lot::Mutex;

use crate::handler::Handler;
use crate::level::Level;
use crate::record::LogRecord;

/// Buffers records and forwards them to a wrapped handler in batches
///
/// Records accumulate until [`BufferHandler::flush`] is called or the
/// buffer limit is reached; a limit of zero means unbounded. The buffer
/// is flushed on drop so no accepted record is lost.
pub struct BufferHandler {
    inner: Arc<dyn Handler>,
    level: Level,
    buffer_limit: usize,
    buffer: Mutex<Vec<LogRecord>>,
}

impl BufferHandler {
    /// Wrap `inner`, buffering up to `buffer_limit` records
    #[must_use]
    pub fn new(inner: Arc<dyn Handler>, level: Level, buffer_limit: usize) -> Self {
        Self {
            inner,
            level,
            buffer_limit,
            buffer: Mutex::new(Vec::new()),
        }
    }

    /// The wrapped handler
    #[inline]
    #[must_use]
    pub fn inner(&self) -> &Arc<dyn Handler> {
        &self.inner
    }

    /// Number of records currently buffered
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.buffer.lock().len()
    }

    /// Forward all buffered records to the wrapped handler
    pub fn flush(&self) {
        let drained: Vec<LogRecord> = self.buffer.lock().drain(..).collect();
        for record in drained {
            self.inner.handle(record);
        }
    }
}

impl Handler for BufferHandler {
    fn is_handling(&self, level: Level) -> bool {
        level >= self.level
    }

    fn handle(&self, record: LogRecord) -> bool {
        if !self.is_handling(record.level) {
            return false;
        }

        let should_flush = {
            let mut buffer = self.buffer.lock();
            buffer.push(record);
            self.buffer_limit > 0 && buffer.len() >= self.buffer_limit
        };
        if should_flush {
            self.flush();
        }

        false
    }
}

impl Drop for BufferHandler {
    fn drop(&mut self) {
        self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::MemoryHandler;
    use chrono::FixedOffset;
    use serde_json::Map;

    fn record(message: &str) -> LogRecord {
        LogRecord::new(
            "t",
            Level::Info,
            message,
            Map::new(),
            FixedOffset::east_opt(0).unwrap(),
        )
    }

    #[test]
    fn records_accumulate_until_flush() {
        let sink = Arc::new(MemoryHandler::new(Level::Debug));
        let buffer = BufferHandler::new(sink.clone(), Level::Debug, 0);

        buffer.handle(record("one"));
        buffer.handle(record("two"));
        assert_eq!(buffer.buffered(), 2);
        assert!(sink.records().is_empty());

        buffer.flush();
        assert_eq!(buffer.buffered(), 0);
        assert_eq!(sink.records().len(), 2);
        assert!(sink.has_message("one"));
    }

    #[test]
    fn limit_triggers_automatic_flush() {
        let sink = Arc::new(MemoryHandler::new(Level::Debug));
        let buffer = BufferHandler::new(sink.clone(), Level::Debug, 2);

        buffer.handle(record("one"));
        assert!(sink.records().is_empty());
        buffer.handle(record("two"));
        assert_eq!(sink.records().len(), 2);
    }

    #[test]
    fn drop_flushes_remaining_records() {
        let sink = Arc::new(MemoryHandler::new(Level::Debug));
        {
            let buffer = BufferHandler::new(sink.clone(), Level::Debug, 0);
            buffer.handle(record("pending"));
        }
        assert!(sink.has_message("pending"));
    }

    #[test]
    fn below_level_records_are_ignored() {
        let sink = Arc::new(MemoryHandler::new(Level::Debug));
        let buffer = BufferHandler::new(sink, Level::Error, 0);

        buffer.handle(record("info-level"));
        assert_eq!(buffer.buffered(), 0);
    }
}
