//! Construction specs
//!
//! A [`ComponentSpec`] is the normalized form of "build type X with
//! these named parameters", parsed out of a loose configuration map.

use crate::error::InvalidFactoryInput;
use crate::value::{ConfigMap, ConfigValue};

/// Keys accepted for the parameter bag, in lookup order
const PARAMETER_KEYS: [&str; 2] = ["params", "options"];

/// Normalized construction request: a type name plus named parameters
#[derive(Debug, Clone)]
pub struct ComponentSpec {
    name: String,
    options: ConfigMap,
}

impl ComponentSpec {
    /// Parse a spec out of a raw configuration map
    ///
    /// The `name` key is required and must be a non-empty string. The
    /// parameter bag is taken from `params` or `options` (first found
    /// wins) and defaults to empty; a present bag of any other kind is
    /// rejected.
    ///
    /// # Errors
    /// [`InvalidFactoryInput`] describing the exact shape violation.
    pub fn from_map(raw: &ConfigMap) -> Result<Self, InvalidFactoryInput> {
        let name = match raw.get("name") {
            None => return Err(InvalidFactoryInput::MissingName),
            Some(ConfigValue::String(s)) if s.is_empty() => {
                return Err(InvalidFactoryInput::EmptyName)
            }
            Some(ConfigValue::String(s)) => s.clone(),
            Some(other) => {
                return Err(InvalidFactoryInput::NameNotString { kind: other.kind() })
            }
        };

        let mut options = ConfigMap::new();
        for key in PARAMETER_KEYS {
            match raw.get(key) {
                None => continue,
                Some(ConfigValue::Map(map)) => {
                    options = map.clone();
                    break;
                }
                Some(other) => {
                    return Err(InvalidFactoryInput::OptionsNotMap {
                        key,
                        kind: other.kind(),
                    })
                }
            }
        }

        Ok(Self { name, options })
    }

    /// The type name to construct
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The named parameter bag
    #[inline]
    #[must_use]
    pub fn options(&self) -> &ConfigMap {
        &self.options
    }
}
