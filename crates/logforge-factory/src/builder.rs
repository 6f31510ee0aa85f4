//! Object construction by type name
//!
//! [`ObjectBuilder`] is the pluggable capability that turns a type name
//! plus a flat parameter bag into a concrete component. The default
//! implementation, [`ComponentRegistry`], is an explicit
//! name-to-factory-function table per role; nothing in the construction
//! engine depends on how a builder maps names to code.
//!
//! Factories receive the invoking builder so object-valued parameters
//! (a nested map carrying the `name` marker key, or an already-built
//! instance) can be resolved recursively at this layer.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use logforge_core::{
    BufferHandler, Formatter, Handler, JsonFormatter, Level, LineFormatter, MemoryHandler,
    NullHandler, PlaceholderProcessor, SharedProcessor, TagProcessor, UidProcessor,
};

use crate::error::{BuildError, ComponentRole};
use crate::spec::ComponentSpec;
use crate::value::{ConfigMap, ConfigValue};

/// Capability of constructing components from a name and parameters
pub trait ObjectBuilder: Send + Sync {
    /// Construct a handler
    ///
    /// # Errors
    /// [`BuildError`] when the name is unknown or a parameter is bad.
    fn create_handler(&self, name: &str, params: &ConfigMap)
        -> Result<Arc<dyn Handler>, BuildError>;

    /// Construct a formatter
    ///
    /// # Errors
    /// [`BuildError`] when the name is unknown or a parameter is bad.
    fn create_formatter(
        &self,
        name: &str,
        params: &ConfigMap,
    ) -> Result<Arc<dyn Formatter>, BuildError>;

    /// Construct a processor
    ///
    /// # Errors
    /// [`BuildError`] when the name is unknown or a parameter is bad.
    fn create_processor(
        &self,
        name: &str,
        params: &ConfigMap,
    ) -> Result<SharedProcessor, BuildError>;
}

/// Typed accessor over a flat parameter bag
///
/// Absent keys read as `None`; wrong-typed values produce a
/// [`BuildError::InvalidParameter`] naming the parameter.
#[derive(Clone, Copy)]
pub struct Params<'a> {
    map: &'a ConfigMap,
}

impl<'a> Params<'a> {
    /// Wrap a parameter bag
    #[inline]
    #[must_use]
    pub fn new(map: &'a ConfigMap) -> Self {
        Self { map }
    }

    /// The underlying map
    #[inline]
    #[must_use]
    pub fn raw(&self) -> &'a ConfigMap {
        self.map
    }

    /// Read a string parameter
    pub fn str(&self, name: &str) -> Result<Option<&'a str>, BuildError> {
        match self.map.get(name) {
            None => Ok(None),
            Some(ConfigValue::String(s)) => Ok(Some(s)),
            Some(other) => Err(invalid(name, "a string", other)),
        }
    }

    /// Read a boolean parameter
    pub fn bool(&self, name: &str) -> Result<Option<bool>, BuildError> {
        match self.map.get(name) {
            None => Ok(None),
            Some(ConfigValue::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(invalid(name, "a boolean", other)),
        }
    }

    /// Read a non-negative integer parameter
    pub fn usize(&self, name: &str) -> Result<Option<usize>, BuildError> {
        match self.map.get(name) {
            None => Ok(None),
            Some(ConfigValue::Integer(i)) => usize::try_from(*i)
                .map(Some)
                .map_err(|_| invalid(name, "a non-negative integer", &ConfigValue::Integer(*i))),
            Some(other) => Err(invalid(name, "a non-negative integer", other)),
        }
    }

    /// Read a log level parameter given as a level name
    pub fn level(&self, name: &str) -> Result<Option<Level>, BuildError> {
        match self.str(name)? {
            None => Ok(None),
            Some(s) => Level::from_str(s).map(Some).map_err(|_| BuildError::InvalidParameter {
                name: name.to_string(),
                expected: "a log level name",
                kind: "unparseable string",
            }),
        }
    }

    /// Read a plain-data map parameter as JSON
    pub fn json_map(
        &self,
        name: &str,
    ) -> Result<Option<serde_json::Map<String, serde_json::Value>>, BuildError> {
        match self.map.get(name) {
            None => Ok(None),
            Some(value @ ConfigValue::Map(_)) => match value.to_json() {
                Some(serde_json::Value::Object(map)) => Ok(Some(map)),
                _ => Err(invalid(name, "a map of plain data", value)),
            },
            Some(other) => Err(invalid(name, "a map of plain data", other)),
        }
    }

    /// Read an object-valued handler parameter
    ///
    /// Accepts an already-built handler or a nested spec map, which is
    /// constructed recursively through `builder`.
    pub fn handler(
        &self,
        builder: &dyn ObjectBuilder,
        name: &str,
    ) -> Result<Option<Arc<dyn Handler>>, BuildError> {
        match self.map.get(name) {
            None => Ok(None),
            Some(ConfigValue::Handler(handler)) => Ok(Some(handler.clone())),
            Some(ConfigValue::Map(map)) => {
                let spec = ComponentSpec::from_map(map).map_err(|source| {
                    BuildError::InvalidNestedSpec {
                        name: name.to_string(),
                        source,
                    }
                })?;
                builder.create_handler(spec.name(), spec.options()).map(Some)
            }
            Some(other) => Err(invalid(name, "a handler instance or a factory input map", other)),
        }
    }

    /// Read a required object-valued handler parameter
    pub fn required_handler(
        &self,
        builder: &dyn ObjectBuilder,
        name: &str,
    ) -> Result<Arc<dyn Handler>, BuildError> {
        self.handler(builder, name)?.ok_or_else(|| BuildError::MissingParameter {
            name: name.to_string(),
        })
    }
}

fn invalid(name: &str, expected: &'static str, value: &ConfigValue) -> BuildError {
    BuildError::InvalidParameter {
        name: name.to_string(),
        expected,
        kind: value.kind(),
    }
}

type HandlerFactory =
    Box<dyn Fn(&dyn ObjectBuilder, Params<'_>) -> Result<Arc<dyn Handler>, BuildError> + Send + Sync>;
type FormatterFactory =
    Box<dyn Fn(&dyn ObjectBuilder, Params<'_>) -> Result<Arc<dyn Formatter>, BuildError> + Send + Sync>;
type ProcessorFactory =
    Box<dyn Fn(&dyn ObjectBuilder, Params<'_>) -> Result<SharedProcessor, BuildError> + Send + Sync>;

/// Name-to-factory-function tables, one per component role
///
/// Every create call runs the registered factory afresh; nothing is
/// cached, so two builds of the same type name are always independent
/// instances.
#[derive(Default)]
pub struct ComponentRegistry {
    handlers: HashMap<String, HandlerFactory>,
    formatters: HashMap<String, FormatterFactory>,
    processors: HashMap<String, ProcessorFactory>,
}

impl ComponentRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in component set
    ///
    /// Handlers: `null`, `memory`, `buffer`. Formatters: `line`,
    /// `json`. Processors: `placeholder`, `tags`, `uid`.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register_handler("null", |_, params| {
            let level = params.level("level")?.unwrap_or(Level::Debug);
            Ok(Arc::new(NullHandler::new(level)))
        });
        registry.register_handler("memory", |_, params| {
            let level = params.level("level")?.unwrap_or(Level::Debug);
            let mut handler = MemoryHandler::new(level);
            if !params.bool("bubble")?.unwrap_or(true) {
                handler = handler.without_bubbling();
            }
            Ok(Arc::new(handler))
        });
        registry.register_handler("buffer", |builder, params| {
            let inner = params.required_handler(builder, "handler")?;
            let level = params.level("level")?.unwrap_or(Level::Debug);
            let limit = params.usize("buffer_limit")?.unwrap_or(0);
            Ok(Arc::new(BufferHandler::new(inner, level, limit)))
        });

        registry.register_formatter("line", |_, params| {
            let format = params.str("format")?.unwrap_or(LineFormatter::DEFAULT_FORMAT);
            let date_format = params
                .str("date_format")?
                .unwrap_or(LineFormatter::DEFAULT_DATE_FORMAT);
            Ok(Arc::new(LineFormatter::new(format, date_format)))
        });
        registry.register_formatter("json", |_, params| {
            let formatter = JsonFormatter::new();
            Ok(if params.bool("pretty")?.unwrap_or(false) {
                Arc::new(formatter.pretty())
            } else {
                Arc::new(formatter)
            })
        });

        registry.register_processor("placeholder", |_, _| {
            Ok(Arc::new(PlaceholderProcessor::new()))
        });
        registry.register_processor("tags", |_, params| {
            let tags = params.json_map("tags")?.unwrap_or_default();
            Ok(Arc::new(TagProcessor::new(tags)))
        });
        registry.register_processor("uid", |_, params| {
            let length = params.usize("length")?.unwrap_or(UidProcessor::DEFAULT_LENGTH);
            Ok(Arc::new(UidProcessor::new(length)))
        });

        registry
    }

    /// Register a handler factory under `name`
    pub fn register_handler<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&dyn ObjectBuilder, Params<'_>) -> Result<Arc<dyn Handler>, BuildError>
            + Send
            + Sync
            + 'static,
    {
        self.handlers.insert(name.into(), Box::new(factory));
    }

    /// Register a formatter factory under `name`
    pub fn register_formatter<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&dyn ObjectBuilder, Params<'_>) -> Result<Arc<dyn Formatter>, BuildError>
            + Send
            + Sync
            + 'static,
    {
        self.formatters.insert(name.into(), Box::new(factory));
    }

    /// Register a processor factory under `name`
    pub fn register_processor<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&dyn ObjectBuilder, Params<'_>) -> Result<SharedProcessor, BuildError>
            + Send
            + Sync
            + 'static,
    {
        self.processors.insert(name.into(), Box::new(factory));
    }

    /// Whether a factory is registered for the given role and name
    #[must_use]
    pub fn contains(&self, role: ComponentRole, name: &str) -> bool {
        match role {
            ComponentRole::Handler => self.handlers.contains_key(name),
            ComponentRole::Formatter => self.formatters.contains_key(name),
            ComponentRole::Processor => self.processors.contains_key(name),
        }
    }
}

impl ObjectBuilder for ComponentRegistry {
    fn create_handler(
        &self,
        name: &str,
        params: &ConfigMap,
    ) -> Result<Arc<dyn Handler>, BuildError> {
        let factory = self.handlers.get(name).ok_or_else(|| BuildError::UnknownType {
            role: ComponentRole::Handler,
            name: name.to_string(),
        })?;
        factory(self, Params::new(params))
    }

    fn create_formatter(
        &self,
        name: &str,
        params: &ConfigMap,
    ) -> Result<Arc<dyn Formatter>, BuildError> {
        let factory = self.formatters.get(name).ok_or_else(|| BuildError::UnknownType {
            role: ComponentRole::Formatter,
            name: name.to_string(),
        })?;
        factory(self, Params::new(params))
    }

    fn create_processor(
        &self,
        name: &str,
        params: &ConfigMap,
    ) -> Result<SharedProcessor, BuildError> {
        let factory = self.processors.get(name).ok_or_else(|| BuildError::UnknownType {
            role: ComponentRole::Processor,
            name: name.to_string(),
        })?;
        factory(self, Params::new(params))
    }
}
