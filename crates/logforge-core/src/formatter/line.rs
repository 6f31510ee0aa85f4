//! Single-line template formatter

use serde_json::{Map, Value};

use crate::formatter::Formatter;
use crate::record::LogRecord;

/// Renders records through a `%token%` line template
///
/// Recognized tokens: `%datetime%`, `%channel%`, `%level_name%`,
/// `%message%`, `%context%`, `%extra%`. Context and extra render as
/// compact JSON, or as an empty string when they carry no data.
#[derive(Debug, Clone)]
pub struct LineFormatter {
    format: String,
    date_format: String,
}

impl LineFormatter {
    /// Default line template
    pub const DEFAULT_FORMAT: &'static str =
        "[%datetime%] %channel%.%level_name%: %message% %context% %extra%\n";

    /// Default `chrono` date format
    pub const DEFAULT_DATE_FORMAT: &'static str = "%Y-%m-%d %H:%M:%S";

    /// Create a formatter with a custom line and date template
    #[must_use]
    pub fn new(format: impl Into<String>, date_format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
            date_format: date_format.into(),
        }
    }

    fn render_map(map: &Map<String, Value>) -> String {
        if map.is_empty() {
            return String::new();
        }
        Value::Object(map.clone()).to_string()
    }
}

impl Default for LineFormatter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FORMAT, Self::DEFAULT_DATE_FORMAT)
    }
}

impl Formatter for LineFormatter {
    fn format(&self, record: &LogRecord) -> String {
        self.format
            .replace("%datetime%", &record.time.format(&self.date_format).to_string())
            .replace("%channel%", &record.channel)
            .replace("%level_name%", record.level.name())
            .replace("%message%", &record.message)
            .replace("%context%", &Self::render_map(&record.context))
            .replace("%extra%", &Self::render_map(&record.extra))
    }
}
