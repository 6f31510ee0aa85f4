//! JSON formatter

use serde_json::{json, Value};

use crate::formatter::Formatter;
use crate::record::LogRecord;

/// Renders each record as one JSON object
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Create a compact JSON formatter
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Switch to pretty-printed output
    #[inline]
    #[must_use]
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    fn to_value(record: &LogRecord) -> Value {
        json!({
            "time": record.time.to_rfc3339(),
            "channel": record.channel,
            "level": record.level.name(),
            "message": record.message,
            "context": record.context,
            "extra": record.extra,
        })
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, record: &LogRecord) -> String {
        let value = Self::to_value(record);
        let mut line = if self.pretty {
            serde_json::to_string_pretty(&value).unwrap_or_default()
        } else {
            value.to_string()
        };
        line.push('\n');
        line
    }
}
