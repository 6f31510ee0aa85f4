//! Record handlers
//!
//! A handler is the sink side of a logger: it decides whether it cares
//! about a record ([`Handler::is_handling`]) and consumes it
//! ([`Handler::handle`]). Two optional capabilities are discovered at
//! runtime, mirroring the interface split of the classic handler stack:
//!
//! - [`ProcessableHandler`]: a per-handler processor chain. The chain is
//!   a stack; [`ProcessableHandler::push_processor`] inserts at the FRONT
//!   and the chain runs front to back, so the last pushed processor runs
//!   first.
//! - [`FormattableHandler`]: an attachable [`Formatter`].
//!
//! Handlers without a capability simply return `None` from the discovery
//! methods; callers skip the wiring step.

mod buffer;
mod memory;
mod null;

pub use buffer::BufferHandler;
pub use memory::MemoryHandler;
pub use null::NullHandler;

use std::sync::Arc;

use crate::formatter::Formatter;
use crate::level::Level;
use crate::processor::SharedProcessor;
use crate::record::LogRecord;

/// Capability of consuming log records
pub trait Handler: Send + Sync {
    /// Whether this handler accepts records of the given level
    fn is_handling(&self, level: Level) -> bool;

    /// Offer a record to the handler
    ///
    /// Returns `true` when the record was consumed and propagation to
    /// later handlers must stop.
    fn handle(&self, record: LogRecord) -> bool;

    /// Processor-attachment capability, if this handler has one
    fn processable(&self) -> Option<&dyn ProcessableHandler> {
        None
    }

    /// Formatter-attachment capability, if this handler has one
    fn formattable(&self) -> Option<&dyn FormattableHandler> {
        None
    }
}

impl std::fmt::Debug for dyn Handler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("handler instance")
    }
}

/// Capability of carrying a per-handler processor chain
pub trait ProcessableHandler {
    /// Push a processor onto the FRONT of the chain
    ///
    /// The chain runs front to back, so the processor pushed last runs
    /// first.
    fn push_processor(&self, processor: SharedProcessor);

    /// Number of processors currently attached
    fn processor_count(&self) -> usize;
}

/// Capability of carrying an attachable formatter
pub trait FormattableHandler {
    /// Replace the handler's formatter
    fn set_formatter(&self, formatter: Arc<dyn Formatter>);

    /// The currently attached formatter, if any
    fn formatter(&self) -> Option<Arc<dyn Formatter>>;
}
