//! Logforge Core - the logging object model
//!
//! Defines the pieces a logger graph is assembled from:
//! - [`Level`] and [`LogRecord`]: the data flowing through the graph
//! - [`Handler`], [`Formatter`], [`Processor`]: the capability traits
//! - [`Logger`]: the assembled artifact owning ordered handlers and
//!   processors
//! - a small built-in component set (null/memory/buffer handlers,
//!   line/json formatters, placeholder/tag/uid processors)
//!
//! Assembly from declarative configuration lives in `logforge-factory`;
//! this crate knows nothing about configuration.

#![warn(unreachable_pub)]

pub mod formatter;
pub mod handler;
pub mod level;
pub mod logger;
pub mod processor;
pub mod record;

// Re-exports for convenience
pub use formatter::{Formatter, JsonFormatter, LineFormatter};
pub use handler::{
    BufferHandler, FormattableHandler, Handler, MemoryHandler, NullHandler, ProcessableHandler,
};
pub use level::{Level, ParseLevelError};
pub use logger::Logger;
pub use processor::{
    PlaceholderProcessor, Processor, SharedProcessor, TagProcessor, UidProcessor,
};
pub use record::LogRecord;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;
    use chrono::FixedOffset;
    use std::sync::Arc;

    #[test]
    fn wired_graph_end_to_end() {
        let sink = Arc::new(MemoryHandler::new(Level::Debug));
        sink.set_formatter(Arc::new(LineFormatter::new("%level_name%: %message%", "%Y")));
        sink.push_processor(Arc::new(PlaceholderProcessor::new()));

        let logger = Logger::new(
            "api",
            vec![sink.clone()],
            vec![Arc::new(UidProcessor::new(4)) as SharedProcessor],
            FixedOffset::east_opt(0).unwrap(),
        );

        let mut context = serde_json::Map::new();
        context.insert("user".to_string(), serde_json::json!("bob"));
        logger.log(Level::Warning, "{user} locked out", context);

        assert_eq!(sink.formatted(), vec!["WARNING: bob locked out".to_string()]);
        let record = &sink.records()[0];
        assert_eq!(record.extra["uid"].as_str().unwrap().len(), 4);
    }
}
