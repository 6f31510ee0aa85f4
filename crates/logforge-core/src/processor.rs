//! Record processors
//!
//! A processor is any capability invocable with a single record,
//! returning a (possibly mutated) record. Closures of the right shape
//! are processors; so are the built-in types below.

use std::sync::Arc;

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::record::LogRecord;

/// Capability of enriching or rewriting records before handling
pub trait Processor: Send + Sync {
    /// Transform the record
    fn process(&self, record: LogRecord) -> LogRecord;
}

impl std::fmt::Debug for dyn Processor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("processor")
    }
}

/// Shared, cheaply cloneable processor handle
pub type SharedProcessor = Arc<dyn Processor>;

impl<F> Processor for F
where
    F: Fn(LogRecord) -> LogRecord + Send + Sync,
{
    fn process(&self, record: LogRecord) -> LogRecord {
        self(record)
    }
}

/// Interpolates `{key}` placeholders in the message from context values
///
/// Non-scalar context values are rendered as compact JSON. Placeholders
/// without a matching context key are left untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderProcessor;

impl PlaceholderProcessor {
    /// Create a placeholder processor
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Processor for PlaceholderProcessor {
    fn process(&self, mut record: LogRecord) -> LogRecord {
        if !record.message.contains('{') {
            return record;
        }

        let mut message = record.message.clone();
        for (key, value) in &record.context {
            let token = format!("{{{key}}}");
            if !message.contains(&token) {
                continue;
            }
            let rendered = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            message = message.replace(&token, &rendered);
        }
        record.message = message;
        record
    }
}

/// Merges a fixed set of tags into every record's `extra` map
#[derive(Debug, Clone, Default)]
pub struct TagProcessor {
    tags: Map<String, Value>,
}

impl TagProcessor {
    /// Create a tag processor from a tag map
    #[inline]
    #[must_use]
    pub fn new(tags: Map<String, Value>) -> Self {
        Self { tags }
    }
}

impl Processor for TagProcessor {
    fn process(&self, mut record: LogRecord) -> LogRecord {
        for (key, value) in &self.tags {
            record.extra.insert(key.clone(), value.clone());
        }
        record
    }
}

/// Attaches a per-instance unique id under `extra.uid`
///
/// The id is generated once at construction, so all records flowing
/// through the same processor instance share it.
#[derive(Debug, Clone)]
pub struct UidProcessor {
    uid: String,
}

impl UidProcessor {
    /// Default uid length
    pub const DEFAULT_LENGTH: usize = 7;

    /// Create a uid processor with an id truncated to `length` hex chars
    #[must_use]
    pub fn new(length: usize) -> Self {
        let mut uid = Uuid::new_v4().simple().to_string();
        uid.truncate(length.max(1));
        Self { uid }
    }

    /// The id attached to every record
    #[inline]
    #[must_use]
    pub fn uid(&self) -> &str {
        &self.uid
    }
}

impl Default for UidProcessor {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LENGTH)
    }
}

impl Processor for UidProcessor {
    fn process(&self, mut record: LogRecord) -> LogRecord {
        record
            .extra
            .insert("uid".to_string(), Value::String(self.uid.clone()));
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;
    use chrono::FixedOffset;
    use serde_json::json;

    fn record_with_context(message: &str, context: Map<String, Value>) -> LogRecord {
        LogRecord::new(
            "test",
            Level::Info,
            message,
            context,
            FixedOffset::east_opt(0).unwrap(),
        )
    }

    #[test]
    fn closure_is_a_processor() {
        let processor = |mut record: LogRecord| {
            record.message.push('!');
            record
        };
        let record = record_with_context("hi", Map::new());
        assert_eq!(processor.process(record).message, "hi!");
    }

    #[test]
    fn placeholder_interpolates_from_context() {
        let mut context = Map::new();
        context.insert("user".to_string(), json!("alice"));
        context.insert("count".to_string(), json!(3));
        let record = record_with_context("{user} sent {count} messages", context);

        let processed = PlaceholderProcessor::new().process(record);
        assert_eq!(processed.message, "alice sent 3 messages");
    }

    #[test]
    fn placeholder_leaves_unmatched_tokens() {
        let record = record_with_context("missing {token}", Map::new());
        let processed = PlaceholderProcessor::new().process(record);
        assert_eq!(processed.message, "missing {token}");
    }

    #[test]
    fn tags_land_in_extra() {
        let mut tags = Map::new();
        tags.insert("env".to_string(), json!("prod"));
        let record = record_with_context("x", Map::new());

        let processed = TagProcessor::new(tags).process(record);
        assert_eq!(processed.extra["env"], json!("prod"));
    }

    #[test]
    fn uid_is_stable_per_instance() {
        let processor = UidProcessor::new(8);
        assert_eq!(processor.uid().len(), 8);

        let a = processor.process(record_with_context("a", Map::new()));
        let b = processor.process(record_with_context("b", Map::new()));
        assert_eq!(a.extra["uid"], b.extra["uid"]);
    }
}
