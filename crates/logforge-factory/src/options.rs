//! Per-role validation of raw options
//!
//! Raw configuration maps are validated against a role schema before
//! any construction happens: logger options here, handler options
//! there, each a pure function of its input. Validated items come out
//! as tagged unions ([`HandlerRef`], [`ProcessorRef`], [`FormatterRef`])
//! so downstream code resolves them by match instead of runtime type
//! inspection.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{FixedOffset, Offset, Utc};
use logforge_core::{Formatter, Handler, SharedProcessor};

use crate::error::InvalidOptions;
use crate::value::{ConfigMap, ConfigValue};

/// Reserved key: handler-scoped formatter
pub const KEY_FORMATTER: &str = "formatter";
/// Reserved key: component-scoped processor list
pub const KEY_PROCESSORS: &str = "processors";
/// Logger option: handler list
pub const KEY_HANDLERS: &str = "handlers";
/// Logger option: record timezone
pub const KEY_TIMEZONE: &str = "timezone";

/// A handler reference: already built, or a spec map to build from
#[derive(Clone)]
pub enum HandlerRef {
    /// Use as-is
    Instance(Arc<dyn Handler>),
    /// Parse and construct
    Spec(ConfigMap),
}

impl fmt::Debug for HandlerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerRef::Instance(_) => f.write_str("Instance(handler instance)"),
            HandlerRef::Spec(map) => f.debug_tuple("Spec").field(map).finish(),
        }
    }
}

/// A processor reference: already invocable, or a spec map
#[derive(Clone)]
pub enum ProcessorRef {
    /// Use as-is
    Callback(SharedProcessor),
    /// Parse and construct
    Spec(ConfigMap),
}

impl fmt::Debug for ProcessorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessorRef::Callback(_) => f.write_str("Callback(processor)"),
            ProcessorRef::Spec(map) => f.debug_tuple("Spec").field(map).finish(),
        }
    }
}

/// A formatter reference: already built, or a spec map
#[derive(Clone)]
pub enum FormatterRef {
    /// Use as-is
    Instance(Arc<dyn Formatter>),
    /// Parse and construct
    Spec(ConfigMap),
}

impl fmt::Debug for FormatterRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatterRef::Instance(_) => f.write_str("Instance(formatter instance)"),
            FormatterRef::Spec(map) => f.debug_tuple("Spec").field(map).finish(),
        }
    }
}

/// Validated logger-role options
#[derive(Debug, Clone)]
pub struct LoggerOptions {
    /// Handler references in declared order
    pub handlers: Vec<HandlerRef>,
    /// Processor references in declared order
    pub processors: Vec<ProcessorRef>,
    /// Timezone for record timestamps
    pub timezone: FixedOffset,
}

impl LoggerOptions {
    /// Validate raw options against the logger role schema
    ///
    /// Absent `handlers` and `processors` default to empty; absent
    /// `timezone` defaults to UTC. Unknown keys are ignored.
    ///
    /// # Errors
    /// [`InvalidOptions`] naming the offending field and observed kind.
    pub fn from_map(raw: &ConfigMap) -> Result<Self, InvalidOptions> {
        let handlers = match raw.get(KEY_HANDLERS) {
            None => Vec::new(),
            Some(ConfigValue::Sequence(items)) => items
                .iter()
                .map(handler_item)
                .collect::<Result<Vec<_>, _>>()?,
            Some(other) => {
                return Err(InvalidOptions::HandlersNotSequence { kind: other.kind() })
            }
        };

        let processors = validate_processors(raw)?;

        let timezone = match raw.get(KEY_TIMEZONE) {
            None => Utc.fix(),
            Some(ConfigValue::String(s)) => FixedOffset::from_str(s)
                .map_err(|_| InvalidOptions::InvalidTimezone { kind: "unparseable string" })?,
            Some(other) => {
                return Err(InvalidOptions::InvalidTimezone { kind: other.kind() })
            }
        };

        Ok(Self {
            handlers,
            processors,
            timezone,
        })
    }
}

/// Validated handler-role options
///
/// The reserved `formatter` and `processors` keys are interpreted and
/// stripped here; everything that remains in `params` is the
/// constructor parameter bag the object builder receives untouched.
#[derive(Debug, Clone)]
pub struct HandlerOptions {
    /// Formatter to attach, absent meaning "skip attachment"
    pub formatter: Option<FormatterRef>,
    /// Handler-scoped processor references in declared order
    pub processors: Vec<ProcessorRef>,
    /// Remaining constructor parameters
    pub params: ConfigMap,
}

impl HandlerOptions {
    /// Validate raw options against the handler role schema
    ///
    /// # Errors
    /// [`InvalidOptions`] naming the offending field and observed kind.
    pub fn from_map(raw: &ConfigMap) -> Result<Self, InvalidOptions> {
        let formatter = match raw.get(KEY_FORMATTER) {
            None => None,
            Some(ConfigValue::Formatter(f)) => Some(FormatterRef::Instance(f.clone())),
            Some(ConfigValue::Map(map)) => Some(FormatterRef::Spec(map.clone())),
            Some(other) => {
                return Err(InvalidOptions::InvalidFormatter { kind: other.kind() })
            }
        };

        let processors = validate_processors(raw)?;

        let params: ConfigMap = raw
            .iter()
            .filter(|(key, _)| key.as_str() != KEY_FORMATTER && key.as_str() != KEY_PROCESSORS)
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Ok(Self {
            formatter,
            processors,
            params,
        })
    }
}

fn handler_item(item: &ConfigValue) -> Result<HandlerRef, InvalidOptions> {
    match item {
        ConfigValue::Handler(handler) => Ok(HandlerRef::Instance(handler.clone())),
        ConfigValue::Map(map) => Ok(HandlerRef::Spec(map.clone())),
        other => Err(InvalidOptions::InvalidHandlerItem { kind: other.kind() }),
    }
}

fn processor_item(item: &ConfigValue) -> Result<ProcessorRef, InvalidOptions> {
    match item {
        ConfigValue::Processor(processor) => Ok(ProcessorRef::Callback(processor.clone())),
        ConfigValue::Map(map) => Ok(ProcessorRef::Spec(map.clone())),
        other => Err(InvalidOptions::InvalidProcessorItem { kind: other.kind() }),
    }
}

fn validate_processors(raw: &ConfigMap) -> Result<Vec<ProcessorRef>, InvalidOptions> {
    match raw.get(KEY_PROCESSORS) {
        None => Ok(Vec::new()),
        Some(ConfigValue::Sequence(items)) => {
            items.iter().map(processor_item).collect()
        }
        Some(other) => Err(InvalidOptions::ProcessorsNotSequence { kind: other.kind() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::map_from_json;
    use logforge_core::{Level, LineFormatter, LogRecord, NullHandler};
    use serde_json::json;

    fn null_handler() -> ConfigValue {
        let handler: Arc<dyn Handler> = Arc::new(NullHandler::new(Level::Debug));
        ConfigValue::from(handler)
    }

    #[test]
    fn absent_lists_default_to_empty() {
        let options = LoggerOptions::from_map(&ConfigMap::new()).unwrap();
        assert!(options.handlers.is_empty());
        assert!(options.processors.is_empty());
        assert_eq!(options.timezone.local_minus_utc(), 0);
    }

    #[test]
    fn handler_instances_and_specs_are_tagged() {
        let mut raw = map_from_json(json!({"handlers": [{"name": "null"}]}));
        if let Some(ConfigValue::Sequence(items)) = raw.get_mut(KEY_HANDLERS) {
            items.push(null_handler());
        }

        let options = LoggerOptions::from_map(&raw).unwrap();
        assert_eq!(options.handlers.len(), 2);
        assert!(matches!(options.handlers[0], HandlerRef::Spec(_)));
        assert!(matches!(options.handlers[1], HandlerRef::Instance(_)));
    }

    #[test]
    fn non_sequence_handlers_name_the_field() {
        let raw = map_from_json(json!({"handlers": "not-an-array"}));
        let err = LoggerOptions::from_map(&raw).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("'handlers'"));
        assert!(message.contains("array"));
        assert!(message.contains("string given"));
    }

    #[test]
    fn invalid_handler_item_reports_kind() {
        let raw = map_from_json(json!({"handlers": [42]}));
        let err = LoggerOptions::from_map(&raw).unwrap_err();
        assert!(matches!(
            err,
            InvalidOptions::InvalidHandlerItem { kind: "integer" }
        ));
    }

    #[test]
    fn bare_string_handler_is_invalid_at_this_layer() {
        // Symbolic names are resolved by the registry adapter before
        // options ever reach validation.
        let raw = map_from_json(json!({"handlers": ["SomeService"]}));
        assert!(matches!(
            LoggerOptions::from_map(&raw),
            Err(InvalidOptions::InvalidHandlerItem { kind: "string" })
        ));
    }

    #[test]
    fn callable_processor_items_pass_through() {
        let processor: SharedProcessor = Arc::new(|r: LogRecord| r);
        let mut raw = ConfigMap::new();
        raw.insert(
            KEY_PROCESSORS.to_string(),
            ConfigValue::Sequence(vec![ConfigValue::from(processor)]),
        );

        let options = LoggerOptions::from_map(&raw).unwrap();
        assert!(matches!(options.processors[0], ProcessorRef::Callback(_)));
    }

    #[test]
    fn timezone_parses_fixed_offsets() {
        let raw = map_from_json(json!({"timezone": "+02:00"}));
        let options = LoggerOptions::from_map(&raw).unwrap();
        assert_eq!(options.timezone.local_minus_utc(), 2 * 3600);

        let raw = map_from_json(json!({"timezone": "late"}));
        assert!(matches!(
            LoggerOptions::from_map(&raw),
            Err(InvalidOptions::InvalidTimezone { .. })
        ));
    }

    #[test]
    fn handler_options_strip_reserved_keys() {
        let raw = map_from_json(json!({
            "level": "warning",
            "formatter": {"name": "line"},
            "processors": [{"name": "placeholder"}]
        }));

        let options = HandlerOptions::from_map(&raw).unwrap();
        assert!(matches!(options.formatter, Some(FormatterRef::Spec(_))));
        assert_eq!(options.processors.len(), 1);
        assert_eq!(options.params.len(), 1);
        assert_eq!(options.params["level"].as_str(), Some("warning"));
        assert!(!options.params.contains_key(KEY_FORMATTER));
        assert!(!options.params.contains_key(KEY_PROCESSORS));
    }

    #[test]
    fn formatter_instance_is_tagged_as_instance() {
        let formatter: Arc<dyn Formatter> = Arc::new(LineFormatter::default());
        let mut raw = ConfigMap::new();
        raw.insert(KEY_FORMATTER.to_string(), ConfigValue::from(formatter));

        let options = HandlerOptions::from_map(&raw).unwrap();
        assert!(matches!(options.formatter, Some(FormatterRef::Instance(_))));
    }

    #[test]
    fn explicit_null_formatter_is_invalid() {
        let raw = map_from_json(json!({"formatter": null}));
        let err = HandlerOptions::from_map(&raw).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("'formatter'"));
        assert!(message.contains("null given"));
    }

    #[test]
    fn absent_formatter_means_skip() {
        let options = HandlerOptions::from_map(&ConfigMap::new()).unwrap();
        assert!(options.formatter.is_none());
    }
}
