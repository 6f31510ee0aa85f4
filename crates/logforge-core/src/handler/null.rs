//! Discarding handler

use crate::handler::Handler;
use crate::level::Level;
use crate::record::LogRecord;

/// Swallows every record at or above its level
///
/// No processor or formatter capability; wiring steps that depend on
/// those are skipped for this handler.
#[derive(Debug, Clone, Copy)]
pub struct NullHandler {
    level: Level,
}

impl NullHandler {
    /// Create a handler discarding records at or above `level`
    #[inline]
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self { level }
    }

    /// The configured threshold
    #[inline]
    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }
}

impl Default for NullHandler {
    fn default() -> Self {
        Self::new(Level::Debug)
    }
}

impl Handler for NullHandler {
    fn is_handling(&self, level: Level) -> bool {
        level >= self.level
    }

    fn handle(&self, record: LogRecord) -> bool {
        self.is_handling(record.level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use serde_json::Map;

    fn record(level: Level) -> LogRecord {
        LogRecord::new("t", level, "m", Map::new(), FixedOffset::east_opt(0).unwrap())
    }

    #[test]
    fn swallows_at_or_above_level() {
        let handler = NullHandler::new(Level::Warning);
        assert!(handler.handle(record(Level::Warning)));
        assert!(handler.handle(record(Level::Emergency)));
        assert!(!handler.handle(record(Level::Info)));
    }

    #[test]
    fn has_no_optional_capabilities() {
        let handler = NullHandler::default();
        assert!(handler.processable().is_none());
        assert!(handler.formattable().is_none());
    }
}
