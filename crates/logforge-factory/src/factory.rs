//! The construction engine
//!
//! [`LoggerFactory`] turns declarative configuration into fully wired
//! logger graphs. It owns the orchestration policy only: validation
//! order, declaration-order preservation, reverse-order processor
//! attachment, formatter attachment. Actual object construction is
//! delegated to the injected [`ObjectBuilder`].
//!
//! Every operation is deterministic and all-or-nothing: a failed build
//! surfaces the error unmodified and leaves no partial graph behind.

use std::sync::Arc;

use logforge_core::{Formatter, Handler, Logger, SharedProcessor};

use crate::builder::{ComponentRegistry, ObjectBuilder};
use crate::error::FactoryError;
use crate::options::{FormatterRef, HandlerOptions, HandlerRef, LoggerOptions, ProcessorRef};
use crate::spec::ComponentSpec;
use crate::value::ConfigMap;

/// Builds wired logger/handler/formatter/processor graphs from
/// configuration
pub struct LoggerFactory {
    builder: Arc<dyn ObjectBuilder>,
}

impl LoggerFactory {
    /// Create an engine over the default component registry
    #[must_use]
    pub fn new() -> Self {
        Self::with_builder(Arc::new(ComponentRegistry::with_defaults()))
    }

    /// Create an engine over an injected object builder
    #[must_use]
    pub fn with_builder(builder: Arc<dyn ObjectBuilder>) -> Self {
        Self { builder }
    }

    /// The object builder this engine delegates construction to
    #[inline]
    #[must_use]
    pub fn object_builder(&self) -> &Arc<dyn ObjectBuilder> {
        &self.builder
    }

    /// Build a logger named `name` from raw options
    ///
    /// Handlers and processors are attached in declaration order;
    /// already-built items pass through untouched.
    ///
    /// # Errors
    /// Any validation, parse or construction failure, unmodified.
    pub fn create_logger(&self, name: &str, options: &ConfigMap) -> Result<Logger, FactoryError> {
        let validated = LoggerOptions::from_map(options)?;

        let mut handlers: Vec<Arc<dyn Handler>> = Vec::with_capacity(validated.handlers.len());
        for reference in validated.handlers {
            handlers.push(self.resolve_handler(reference)?);
        }

        let mut processors: Vec<SharedProcessor> =
            Vec::with_capacity(validated.processors.len());
        for reference in validated.processors {
            processors.push(self.resolve_processor(reference)?);
        }

        Ok(Logger::new(name, handlers, processors, validated.timezone))
    }

    /// Build a handler of type `name` from raw options
    ///
    /// The reserved `formatter` and `processors` keys are interpreted
    /// here and never reach the object builder; the remaining options
    /// are the constructor parameter bag. Supplied processors are
    /// attached in reverse declaration order because the attachment
    /// primitive pushes to the front of the chain; the first-declared
    /// processor therefore ends up first-to-run. Handlers lacking a
    /// capability skip the corresponding wiring step.
    ///
    /// # Errors
    /// Any validation, parse or construction failure, unmodified.
    pub fn create_handler(
        &self,
        name: &str,
        options: &ConfigMap,
    ) -> Result<Arc<dyn Handler>, FactoryError> {
        let validated = HandlerOptions::from_map(options)?;

        let handler = self.builder.create_handler(name, &validated.params)?;

        if let Some(processable) = handler.processable() {
            for reference in validated.processors.into_iter().rev() {
                processable.push_processor(self.resolve_processor(reference)?);
            }
        }

        if let Some(formattable) = handler.formattable() {
            if let Some(reference) = validated.formatter {
                formattable.set_formatter(self.resolve_formatter(reference)?);
            }
        }

        Ok(handler)
    }

    /// Build a formatter of type `name` from raw options
    ///
    /// # Errors
    /// Any construction failure, unmodified.
    pub fn create_formatter(
        &self,
        name: &str,
        options: &ConfigMap,
    ) -> Result<Arc<dyn Formatter>, FactoryError> {
        Ok(self.builder.create_formatter(name, options)?)
    }

    /// Build a processor of type `name` from raw options
    ///
    /// # Errors
    /// Any construction failure, unmodified.
    pub fn create_processor(
        &self,
        name: &str,
        options: &ConfigMap,
    ) -> Result<SharedProcessor, FactoryError> {
        Ok(self.builder.create_processor(name, options)?)
    }

    fn resolve_handler(&self, reference: HandlerRef) -> Result<Arc<dyn Handler>, FactoryError> {
        match reference {
            HandlerRef::Instance(handler) => Ok(handler),
            HandlerRef::Spec(map) => {
                let spec = ComponentSpec::from_map(&map)?;
                self.create_handler(spec.name(), spec.options())
            }
        }
    }

    fn resolve_processor(&self, reference: ProcessorRef) -> Result<SharedProcessor, FactoryError> {
        match reference {
            ProcessorRef::Callback(processor) => Ok(processor),
            ProcessorRef::Spec(map) => {
                let spec = ComponentSpec::from_map(&map)?;
                self.create_processor(spec.name(), spec.options())
            }
        }
    }

    fn resolve_formatter(&self, reference: FormatterRef) -> Result<Arc<dyn Formatter>, FactoryError> {
        match reference {
            FormatterRef::Instance(formatter) => Ok(formatter),
            FormatterRef::Spec(map) => {
                let spec = ComponentSpec::from_map(&map)?;
                self.create_formatter(spec.name(), spec.options())
            }
        }
    }
}

impl Default for LoggerFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{map_from_json, ConfigMap, ConfigValue};
    use logforge_core::{Level, MemoryHandler};
    use serde_json::json;

    fn factory() -> LoggerFactory {
        LoggerFactory::new()
    }

    #[test]
    fn empty_options_build_an_empty_logger() {
        let logger = factory().create_logger("app", &ConfigMap::new()).unwrap();
        assert_eq!(logger.name(), "app");
        assert!(logger.handlers().is_empty());
        assert!(logger.processors().is_empty());
    }

    #[test]
    fn handler_declaration_order_is_preserved() {
        let options = map_from_json(json!({
            "handlers": [
                {"name": "memory", "params": {"level": "debug"}},
                {"name": "null", "params": {"level": "error"}}
            ]
        }));
        let logger = factory().create_logger("app", &options).unwrap();

        assert_eq!(logger.handlers().len(), 2);
        // The first handler is the memory one: it accepts debug records.
        assert!(logger.handlers()[0].is_handling(Level::Debug));
        assert!(!logger.handlers()[1].is_handling(Level::Debug));
    }

    #[test]
    fn invalid_handlers_value_fails_before_any_construction() {
        let options = map_from_json(json!({"handlers": "not-an-array"}));
        let err = factory().create_logger("app", &options).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("'handlers'"));
        assert!(message.contains("array"));
    }

    #[test]
    fn handler_spec_missing_name_surfaces_parse_error() {
        let options = map_from_json(json!({"handlers": [{"params": {}}]}));
        let err = factory().create_logger("app", &options).unwrap_err();
        assert!(matches!(err, FactoryError::Input(_)));
    }

    #[test]
    fn null_handler_spec_gets_no_wiring() {
        let handler = factory().create_handler("null", &ConfigMap::new()).unwrap();
        assert!(handler.processable().is_none());
        assert!(handler.formattable().is_none());
    }

    #[test]
    fn handler_processors_net_out_to_declaration_order() {
        let sink = factory()
            .create_handler(
                "memory",
                &map_from_json(json!({
                    "processors": [
                        {"name": "tags", "params": {"tags": {"first": 1}}},
                        {"name": "uid"}
                    ]
                })),
            )
            .unwrap();

        let processable = sink.processable().unwrap();
        assert_eq!(processable.processor_count(), 2);
    }

    #[test]
    fn processors_on_incapable_handler_are_skipped() {
        let handler = factory()
            .create_handler(
                "null",
                &map_from_json(json!({"processors": [{"name": "uid"}]})),
            )
            .unwrap();
        assert!(handler.processable().is_none());
    }

    #[test]
    fn formatter_spec_is_built_and_attached() {
        let handler = factory()
            .create_handler(
                "memory",
                &map_from_json(json!({"formatter": {"name": "line"}})),
            )
            .unwrap();
        assert!(handler.formattable().unwrap().formatter().is_some());
    }

    #[test]
    fn formatter_instance_passes_through_untouched() {
        let formatter: Arc<dyn Formatter> = Arc::new(logforge_core::LineFormatter::default());
        let mut options = ConfigMap::new();
        options.insert("formatter".to_string(), ConfigValue::from(formatter.clone()));

        let handler = factory().create_handler("memory", &options).unwrap();
        let attached = handler.formattable().unwrap().formatter().unwrap();
        assert!(Arc::ptr_eq(&attached, &formatter));
    }

    #[test]
    fn absent_formatter_leaves_handler_bare() {
        let handler = factory().create_handler("memory", &ConfigMap::new()).unwrap();
        assert!(handler.formattable().unwrap().formatter().is_none());
        assert_eq!(handler.processable().unwrap().processor_count(), 0);
    }

    #[test]
    fn handler_instances_in_logger_options_pass_through() {
        let instance: Arc<dyn Handler> = Arc::new(MemoryHandler::new(Level::Debug));
        let mut options = ConfigMap::new();
        options.insert(
            "handlers".to_string(),
            ConfigValue::Sequence(vec![ConfigValue::from(instance.clone())]),
        );

        let logger = factory().create_logger("app", &options).unwrap();
        assert!(Arc::ptr_eq(&logger.handlers()[0], &instance));
    }

    #[test]
    fn unknown_handler_type_surfaces_build_error() {
        let options = map_from_json(json!({"handlers": [{"name": "syslog"}]}));
        let err = factory().create_logger("app", &options).unwrap_err();
        assert!(matches!(err, FactoryError::Build(_)));
        assert!(err.to_string().contains("syslog"));
    }

    #[test]
    fn logger_timezone_is_applied() {
        let options = map_from_json(json!({"timezone": "+01:00"}));
        let logger = factory().create_logger("app", &options).unwrap();
        assert_eq!(logger.timezone().local_minus_utc(), 3600);
    }
}
