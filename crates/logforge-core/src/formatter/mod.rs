//! Record formatters

mod json;
mod line;

pub use json::JsonFormatter;
pub use line::LineFormatter;

use crate::record::LogRecord;

/// Capability of rendering a record as text
pub trait Formatter: Send + Sync {
    /// Render a single record
    fn format(&self, record: &LogRecord) -> String;

    /// Render a batch of records
    ///
    /// The default implementation concatenates single-record output.
    fn format_batch(&self, records: &[LogRecord]) -> String {
        records.iter().map(|r| self.format(r)).collect()
    }
}

impl std::fmt::Debug for dyn Formatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("formatter instance")
    }
}
