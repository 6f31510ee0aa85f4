//! Registry-driven bootstrap adapter
//!
//! [`RegistryLoggerFactory`] exposes the construction engine as a
//! named entry point for registry-driven bootstraps: it locates the
//! configuration blob inside the registry, merges it over defaults,
//! pre-resolves bare symbolic references through the
//! [`ServiceResolver`], and hands the result to [`LoggerFactory`].

use logforge_core::Logger;
use once_cell::sync::OnceCell;

use crate::error::{CannotResolveComponent, FactoryError};
use crate::factory::LoggerFactory;
use crate::options::{KEY_FORMATTER, KEY_HANDLERS, KEY_PROCESSORS};
use crate::resolver::{RegistryEntry, ServiceRegistry, ServiceResolver};
use crate::value::{ConfigMap, ConfigValue};

/// Top-level configuration key the logger map lives under
pub const LOGGER_CONFIG_KEY: &str = "logger";

/// Registry entry names the configuration blob may be published under,
/// in lookup order; the first present entry wins
const CONFIG_ENTRY_NAMES: [&str; 2] = ["config", "Config"];

/// Named factory resolving one logger's configuration from a registry
///
/// The engine is created lazily on first use and memoized on the
/// factory instance; concurrent first use observes a single engine
/// thanks to single-assignment semantics.
pub struct RegistryLoggerFactory {
    logger_name: String,
    resolver: ServiceResolver,
    engine: OnceCell<LoggerFactory>,
}

impl RegistryLoggerFactory {
    /// Create a factory for the logger named `logger_name`
    #[must_use]
    pub fn new(logger_name: impl Into<String>) -> Self {
        Self {
            logger_name: logger_name.into(),
            resolver: ServiceResolver::new(),
            engine: OnceCell::new(),
        }
    }

    /// Replace the symbolic-name resolver
    #[must_use]
    pub fn with_resolver(mut self, resolver: ServiceResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Pre-seed the construction engine instead of lazily building one
    #[must_use]
    pub fn with_engine(self, engine: LoggerFactory) -> Self {
        Self {
            engine: OnceCell::with_value(engine),
            ..self
        }
    }

    /// The symbolic logger name this factory resolves
    #[inline]
    #[must_use]
    pub fn logger_name(&self) -> &str {
        &self.logger_name
    }

    /// Build the logger against the given registry
    ///
    /// A missing configuration entry yields a defaulted empty logger
    /// carrying the factory's name.
    ///
    /// # Errors
    /// Resolution failures for bare symbolic references, then anything
    /// the construction engine raises.
    pub fn create(&self, registry: &dyn ServiceRegistry) -> Result<Logger, FactoryError> {
        let config = self.logger_config(registry);

        let mut merged = ConfigMap::new();
        merged.insert(
            "name".to_string(),
            ConfigValue::String(self.logger_name.clone()),
        );
        merged.insert(KEY_HANDLERS.to_string(), ConfigValue::Sequence(Vec::new()));
        merged.insert(KEY_PROCESSORS.to_string(), ConfigValue::Sequence(Vec::new()));
        for (key, value) in config {
            merged.insert(key, value);
        }

        let name = merged
            .get("name")
            .and_then(ConfigValue::as_str)
            .unwrap_or(&self.logger_name)
            .to_string();

        self.prepare_handlers(registry, &mut merged)?;
        self.prepare_processors(registry, &mut merged)?;

        self.engine().create_logger(&name, &merged)
    }

    fn engine(&self) -> &LoggerFactory {
        self.engine.get_or_init(LoggerFactory::new)
    }

    /// Locate this logger's configuration map inside the registry
    ///
    /// Anything that is not a configuration map along the path reads as
    /// absent.
    fn logger_config(&self, registry: &dyn ServiceRegistry) -> ConfigMap {
        for entry_name in CONFIG_ENTRY_NAMES {
            if !registry.has(entry_name) {
                continue;
            }
            let Some(RegistryEntry::Config(blob)) = registry.get(entry_name) else {
                return ConfigMap::new();
            };
            return blob
                .as_map()
                .and_then(|map| map.get(LOGGER_CONFIG_KEY))
                .and_then(ConfigValue::as_map)
                .and_then(|loggers| loggers.get(&self.logger_name))
                .and_then(ConfigValue::as_map)
                .cloned()
                .unwrap_or_default();
        }
        ConfigMap::new()
    }

    /// Replace bare-string handler references, and bare-string
    /// formatter references inside handler spec maps
    fn prepare_handlers(
        &self,
        registry: &dyn ServiceRegistry,
        config: &mut ConfigMap,
    ) -> Result<(), FactoryError> {
        let Some(ConfigValue::Sequence(items)) = config.get_mut(KEY_HANDLERS) else {
            return Ok(());
        };

        for item in items {
            match item {
                ConfigValue::String(symbolic) => {
                    let handler = match self.resolver.resolve(registry, symbolic)? {
                        RegistryEntry::Handler(handler) => handler,
                        other => return Err(wrong_kind(symbolic, &other, "handler").into()),
                    };
                    *item = ConfigValue::Handler(handler);
                }
                ConfigValue::Map(spec) => {
                    let Some(ConfigValue::String(symbolic)) = spec.get(KEY_FORMATTER) else {
                        continue;
                    };
                    let formatter = match self.resolver.resolve(registry, symbolic)? {
                        RegistryEntry::Formatter(formatter) => formatter,
                        other => return Err(wrong_kind(symbolic, &other, "formatter").into()),
                    };
                    spec.insert(KEY_FORMATTER.to_string(), ConfigValue::Formatter(formatter));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Replace bare-string processor references
    fn prepare_processors(
        &self,
        registry: &dyn ServiceRegistry,
        config: &mut ConfigMap,
    ) -> Result<(), FactoryError> {
        let Some(ConfigValue::Sequence(items)) = config.get_mut(KEY_PROCESSORS) else {
            return Ok(());
        };

        for item in items {
            let ConfigValue::String(symbolic) = item else {
                continue;
            };
            let processor = match self.resolver.resolve(registry, symbolic)? {
                RegistryEntry::Processor(processor) => processor,
                other => return Err(wrong_kind(symbolic, &other, "processor").into()),
            };
            *item = ConfigValue::Processor(processor);
        }
        Ok(())
    }
}

fn wrong_kind(name: &str, entry: &RegistryEntry, expected: &str) -> CannotResolveComponent {
    CannotResolveComponent::ResolutionFailed {
        name: name.to_string(),
        source: format!("registry entry is a {}, not a {expected}", entry.kind()).into(),
    }
}

/// Build the logger named `name` straight from a registry
///
/// Convenience form of [`RegistryLoggerFactory`] for one-off bootstrap
/// calls.
///
/// # Errors
/// Everything [`RegistryLoggerFactory::create`] raises.
pub fn create_logger(registry: &dyn ServiceRegistry, name: &str) -> Result<Logger, FactoryError> {
    RegistryLoggerFactory::new(name).create(registry)
}
