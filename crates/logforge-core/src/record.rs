//! Log records
//!
//! A [`LogRecord`] is the unit of data flowing through processors,
//! handlers and formatters. Records are plain values; processors take a
//! record and return a (possibly mutated) record.

use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::level::Level;

/// A single log record
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    /// Creation time, in the owning logger's timezone
    pub time: DateTime<FixedOffset>,
    /// Name of the logger that produced the record
    pub channel: String,
    /// Severity
    pub level: Level,
    /// Log message, possibly containing `{placeholder}` tokens
    pub message: String,
    /// Caller-supplied structured context
    pub context: Map<String, Value>,
    /// Data attached by processors along the way
    pub extra: Map<String, Value>,
}

impl LogRecord {
    /// Create a record stamped with the current time in `timezone`
    #[must_use]
    pub fn new(
        channel: impl Into<String>,
        level: Level,
        message: impl Into<String>,
        context: Map<String, Value>,
        timezone: FixedOffset,
    ) -> Self {
        Self {
            time: Utc::now().with_timezone(&timezone),
            channel: channel.into(),
            level,
            message: message.into(),
            context,
            extra: Map::new(),
        }
    }
}
