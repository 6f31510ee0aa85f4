//! Logforge Factory - configuration-driven logger assembly
//!
//! Turns declarative configuration (nested maps of name/parameter
//! pairs) into fully wired [`Logger`](logforge_core::Logger) graphs:
//!
//! - [`ConfigValue`]/[`ConfigMap`]: the loose configuration model
//! - [`ComponentSpec`]: normalized "build type X with these parameters"
//! - [`LoggerOptions`]/[`HandlerOptions`]: per-role schema validation
//! - [`ObjectBuilder`]/[`ComponentRegistry`]: pluggable construction by
//!   type name
//! - [`LoggerFactory`]: the construction engine
//! - [`ServiceResolver`]/[`RegistryLoggerFactory`]: symbolic-name
//!   resolution against an external registry, and the registry-driven
//!   bootstrap entry point
//!
//! # Example
//!
//! ```
//! use logforge_factory::{map_from_json, LoggerFactory};
//! use serde_json::json;
//!
//! let factory = LoggerFactory::new();
//! let logger = factory
//!     .create_logger(
//!         "api",
//!         &map_from_json(json!({
//!             "handlers": [{
//!                 "name": "memory",
//!                 "params": {
//!                     "level": "info",
//!                     "formatter": {"name": "json"},
//!                     "processors": [{"name": "uid"}]
//!                 }
//!             }]
//!         })),
//!     )
//!     .unwrap();
//!
//! logger.info("assembled");
//! assert_eq!(logger.handlers().len(), 1);
//! ```

#![warn(unreachable_pub)]

pub mod builder;
pub mod container;
pub mod error;
pub mod factory;
pub mod options;
pub mod resolver;
pub mod spec;
pub mod value;

// Re-exports for convenience
pub use builder::{ComponentRegistry, ObjectBuilder, Params};
pub use container::{create_logger, RegistryLoggerFactory, LOGGER_CONFIG_KEY};
pub use error::{
    BuildError, CannotResolveComponent, ComponentRole, FactoryError, InvalidFactoryInput,
    InvalidOptions,
};
pub use factory::LoggerFactory;
pub use options::{FormatterRef, HandlerOptions, HandlerRef, LoggerOptions, ProcessorRef};
pub use resolver::{
    ComponentFactoryFn, InMemoryRegistry, RegistryEntry, ServiceRegistry, ServiceResolver,
};
pub use spec::ComponentSpec;
pub use value::{map_from_json, ConfigMap, ConfigValue};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
