//! Loosely typed configuration values
//!
//! Declarative configuration is JSON-shaped data extended with three
//! extra leaf kinds: already-built handlers, formatters and processors.
//! [`ConfigValue`] models exactly that union; [`ConfigValue::kind`]
//! names the variant the way validation errors report it.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use logforge_core::{Formatter, Handler, SharedProcessor};
use serde_json::Value as JsonValue;

/// Order-preserving map of configuration values
pub type ConfigMap = IndexMap<String, ConfigValue>;

/// A configuration value: JSON-like data or a built component
#[derive(Clone)]
pub enum ConfigValue {
    /// Explicit null
    Null,
    /// Boolean
    Bool(bool),
    /// Integer
    Integer(i64),
    /// Floating point number
    Float(f64),
    /// String
    String(String),
    /// Ordered sequence
    Sequence(Vec<ConfigValue>),
    /// Nested map
    Map(ConfigMap),
    /// Already-built handler
    Handler(Arc<dyn Handler>),
    /// Already-built formatter
    Formatter(Arc<dyn Formatter>),
    /// Already-built processor (or callable)
    Processor(SharedProcessor),
}

impl ConfigValue {
    /// Human-readable name of this value's kind, as used in errors
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            ConfigValue::Null => "null",
            ConfigValue::Bool(_) => "boolean",
            ConfigValue::Integer(_) => "integer",
            ConfigValue::Float(_) => "float",
            ConfigValue::String(_) => "string",
            ConfigValue::Sequence(_) => "sequence",
            ConfigValue::Map(_) => "map",
            ConfigValue::Handler(_) => "handler instance",
            ConfigValue::Formatter(_) => "formatter instance",
            ConfigValue::Processor(_) => "processor",
        }
    }

    /// Borrow as a string, if this is one
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow as a map, if this is one
    #[inline]
    #[must_use]
    pub fn as_map(&self) -> Option<&ConfigMap> {
        match self {
            ConfigValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Borrow as a sequence, if this is one
    #[inline]
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[ConfigValue]> {
        match self {
            ConfigValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Convert back to plain JSON
    ///
    /// Returns `None` when the value holds a built component anywhere
    /// inside it; those have no data representation.
    #[must_use]
    pub fn to_json(&self) -> Option<JsonValue> {
        match self {
            ConfigValue::Null => Some(JsonValue::Null),
            ConfigValue::Bool(b) => Some(JsonValue::Bool(*b)),
            ConfigValue::Integer(i) => Some(JsonValue::from(*i)),
            ConfigValue::Float(f) => serde_json::Number::from_f64(*f).map(JsonValue::Number),
            ConfigValue::String(s) => Some(JsonValue::String(s.clone())),
            ConfigValue::Sequence(items) => items
                .iter()
                .map(ConfigValue::to_json)
                .collect::<Option<Vec<_>>>()
                .map(JsonValue::Array),
            ConfigValue::Map(map) => map
                .iter()
                .map(|(k, v)| v.to_json().map(|v| (k.clone(), v)))
                .collect::<Option<serde_json::Map<_, _>>>()
                .map(JsonValue::Object),
            _ => None,
        }
    }
}

impl fmt::Debug for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Null => f.write_str("Null"),
            ConfigValue::Bool(b) => write!(f, "Bool({b})"),
            ConfigValue::Integer(i) => write!(f, "Integer({i})"),
            ConfigValue::Float(v) => write!(f, "Float({v})"),
            ConfigValue::String(s) => write!(f, "String({s:?})"),
            ConfigValue::Sequence(items) => f.debug_list().entries(items).finish(),
            ConfigValue::Map(map) => f.debug_map().entries(map.iter()).finish(),
            other => f.write_str(other.kind()),
        }
    }
}

impl From<JsonValue> for ConfigValue {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => ConfigValue::Null,
            JsonValue::Bool(b) => ConfigValue::Bool(b),
            JsonValue::Number(n) => n
                .as_i64()
                .map_or_else(|| ConfigValue::Float(n.as_f64().unwrap_or(0.0)), ConfigValue::Integer),
            JsonValue::String(s) => ConfigValue::String(s),
            JsonValue::Array(items) => {
                ConfigValue::Sequence(items.into_iter().map(ConfigValue::from).collect())
            }
            JsonValue::Object(map) => ConfigValue::Map(
                map.into_iter()
                    .map(|(k, v)| (k, ConfigValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::String(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        ConfigValue::Integer(value)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

impl From<Vec<ConfigValue>> for ConfigValue {
    fn from(value: Vec<ConfigValue>) -> Self {
        ConfigValue::Sequence(value)
    }
}

impl From<ConfigMap> for ConfigValue {
    fn from(value: ConfigMap) -> Self {
        ConfigValue::Map(value)
    }
}

impl From<Arc<dyn Handler>> for ConfigValue {
    fn from(value: Arc<dyn Handler>) -> Self {
        ConfigValue::Handler(value)
    }
}

impl From<Arc<dyn Formatter>> for ConfigValue {
    fn from(value: Arc<dyn Formatter>) -> Self {
        ConfigValue::Formatter(value)
    }
}

impl From<SharedProcessor> for ConfigValue {
    fn from(value: SharedProcessor) -> Self {
        ConfigValue::Processor(value)
    }
}

/// Build a [`ConfigMap`] from plain JSON
///
/// Non-object input yields an empty map; configuration roots are always
/// maps.
#[must_use]
pub fn map_from_json(value: JsonValue) -> ConfigMap {
    match ConfigValue::from(value) {
        ConfigValue::Map(map) => map,
        _ => ConfigMap::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logforge_core::{Level, NullHandler};
    use serde_json::json;

    #[test]
    fn json_converts_recursively() {
        let value = ConfigValue::from(json!({
            "name": "null",
            "params": {"level": "warning", "limit": 5, "flag": true}
        }));

        let map = value.as_map().unwrap();
        assert_eq!(map["name"].as_str(), Some("null"));
        let params = map["params"].as_map().unwrap();
        assert!(matches!(params["limit"], ConfigValue::Integer(5)));
        assert!(matches!(params["flag"], ConfigValue::Bool(true)));
    }

    #[test]
    fn kinds_match_error_vocabulary() {
        assert_eq!(ConfigValue::Null.kind(), "null");
        assert_eq!(ConfigValue::from("x").kind(), "string");
        assert_eq!(ConfigValue::Sequence(Vec::new()).kind(), "sequence");
        let handler: Arc<dyn Handler> = Arc::new(NullHandler::new(Level::Debug));
        assert_eq!(ConfigValue::from(handler).kind(), "handler instance");
    }

    #[test]
    fn to_json_round_trips_data() {
        let original = json!({"a": [1, 2.5, "x", null], "b": {"c": false}});
        let value = ConfigValue::from(original.clone());
        assert_eq!(value.to_json(), Some(original));
    }

    #[test]
    fn to_json_rejects_instances() {
        let handler: Arc<dyn Handler> = Arc::new(NullHandler::new(Level::Debug));
        let mut map = ConfigMap::new();
        map.insert("h".to_string(), ConfigValue::from(handler));
        assert_eq!(ConfigValue::Map(map).to_json(), None);
    }

    #[test]
    fn map_from_json_ignores_non_objects() {
        assert!(map_from_json(json!([1, 2])).is_empty());
        assert_eq!(map_from_json(json!({"k": 1})).len(), 1);
    }
}
