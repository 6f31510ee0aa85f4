//! The logger artifact
//!
//! A [`Logger`] owns an ordered handler list and an ordered processor
//! list. Both orders are exactly what the constructor received: handlers
//! are offered records first to last, logger-scoped processors run first
//! to last before any handler sees the record.

use std::sync::Arc;

use chrono::FixedOffset;
use serde_json::{Map, Value};

use crate::handler::Handler;
use crate::level::Level;
use crate::processor::SharedProcessor;
use crate::record::LogRecord;

/// A named logger owning ordered handlers and processors
pub struct Logger {
    name: String,
    handlers: Vec<Arc<dyn Handler>>,
    processors: Vec<SharedProcessor>,
    timezone: FixedOffset,
}

impl Logger {
    /// Create a logger from its wired parts
    ///
    /// Handler and processor order is preserved as given and determines
    /// invocation order at log time.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        handlers: Vec<Arc<dyn Handler>>,
        processors: Vec<SharedProcessor>,
        timezone: FixedOffset,
    ) -> Self {
        Self {
            name: name.into(),
            handlers,
            processors,
            timezone,
        }
    }

    /// The logger name; stamped on every record as its channel
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Handlers in invocation order
    #[inline]
    #[must_use]
    pub fn handlers(&self) -> &[Arc<dyn Handler>] {
        &self.handlers
    }

    /// Logger-scoped processors in invocation order
    #[inline]
    #[must_use]
    pub fn processors(&self) -> &[SharedProcessor] {
        &self.processors
    }

    /// Timezone used to stamp record times
    #[inline]
    #[must_use]
    pub fn timezone(&self) -> FixedOffset {
        self.timezone
    }

    /// Push a processor onto the FRONT of the logger-scoped chain
    pub fn push_processor(&mut self, processor: SharedProcessor) {
        self.processors.insert(0, processor);
    }

    /// Log a message with structured context
    ///
    /// The record runs through the logger-scoped processors in order,
    /// then is offered to each handler in order until one consumes it.
    pub fn log(&self, level: Level, message: impl Into<String>, context: Map<String, Value>) {
        let mut record = LogRecord::new(&self.name, level, message, context, self.timezone);

        for processor in &self.processors {
            record = processor.process(record);
        }

        for handler in &self.handlers {
            if handler.handle(record.clone()) {
                break;
            }
        }
    }

    /// Log at [`Level::Debug`] with no context
    pub fn debug(&self, message: impl Into<String>) {
        self.log(Level::Debug, message, Map::new());
    }

    /// Log at [`Level::Info`] with no context
    pub fn info(&self, message: impl Into<String>) {
        self.log(Level::Info, message, Map::new());
    }

    /// Log at [`Level::Warning`] with no context
    pub fn warning(&self, message: impl Into<String>) {
        self.log(Level::Warning, message, Map::new());
    }

    /// Log at [`Level::Error`] with no context
    pub fn error(&self, message: impl Into<String>) {
        self.log(Level::Error, message, Map::new());
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("handlers", &self.handlers.len())
            .field("processors", &self.processors.len())
            .field("timezone", &self.timezone)
            .finish()
    }
}
