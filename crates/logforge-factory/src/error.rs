//! Error taxonomy for the construction layer
//!
//! Four distinct failure classes, each its own type:
//! - [`InvalidFactoryInput`]: malformed construction request shape
//! - [`InvalidOptions`]: role-schema violation inside raw options
//! - [`BuildError`]: the object builder could not construct a component
//! - [`CannotResolveComponent`]: symbolic-name resolution failure
//!
//! [`FactoryError`] is the umbrella the public entry points return. All
//! errors are caller bugs or environment facts; nothing here is retried
//! and no failed build leaves a partial object graph behind.

use std::fmt;

/// Malformed construction request shape
#[derive(Debug, thiserror::Error)]
pub enum InvalidFactoryInput {
    /// The type-identifier key is absent
    #[error("'name' is missing from the factory input")]
    MissingName,

    /// The type-identifier key is present but empty
    #[error("'name' in the factory input cannot be empty")]
    EmptyName,

    /// The type-identifier key holds a non-string value
    #[error("'name' should be a string; {kind} given")]
    NameNotString {
        /// Observed kind of the value
        kind: &'static str,
    },

    /// The parameter bag is present but not a map
    #[error("'{key}' should be a map; {kind} given")]
    OptionsNotMap {
        /// The offending key (`options` or `params`)
        key: &'static str,
        /// Observed kind of the value
        kind: &'static str,
    },
}

/// Role-schema violation inside raw options
#[derive(Debug, thiserror::Error)]
pub enum InvalidOptions {
    /// `handlers` is not a sequence
    #[error("'handlers' should be an array; {kind} given")]
    HandlersNotSequence {
        /// Observed kind of the value
        kind: &'static str,
    },

    /// A `handlers` item is neither an instance nor a spec map
    #[error("'handlers' item should be either a handler instance or a factory input map; {kind} given")]
    InvalidHandlerItem {
        /// Observed kind of the item
        kind: &'static str,
    },

    /// `processors` is not a sequence
    #[error("'processors' should be an array; {kind} given")]
    ProcessorsNotSequence {
        /// Observed kind of the value
        kind: &'static str,
    },

    /// A `processors` item is neither a processor nor a spec map
    #[error("'processors' item should be either a processor or a factory input map; {kind} given")]
    InvalidProcessorItem {
        /// Observed kind of the item
        kind: &'static str,
    },

    /// `formatter` is neither an instance nor a spec map
    #[error("'formatter' should be either a formatter instance or a factory input map; {kind} given")]
    InvalidFormatter {
        /// Observed kind of the value
        kind: &'static str,
    },

    /// `timezone` is not a parseable UTC offset string
    #[error("'timezone' should be a UTC offset string like '+02:00'; {kind} given")]
    InvalidTimezone {
        /// Observed kind, or "unparseable string"
        kind: &'static str,
    },
}

/// Role a component plays in the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentRole {
    /// Record sink
    Handler,
    /// Record renderer
    Formatter,
    /// Record transformer
    Processor,
}

impl fmt::Display for ComponentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ComponentRole::Handler => "handler",
            ComponentRole::Formatter => "formatter",
            ComponentRole::Processor => "processor",
        };
        f.write_str(name)
    }
}

/// Component construction failure inside the object builder
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// No factory registered under the requested type name
    #[error("no {role} type registered under '{name}'")]
    UnknownType {
        /// Role that was requested
        role: ComponentRole,
        /// The unregistered type name
        name: String,
    },

    /// A required constructor parameter is absent
    #[error("missing required parameter '{name}'")]
    MissingParameter {
        /// Parameter name
        name: String,
    },

    /// A constructor parameter has the wrong type
    #[error("parameter '{name}' should be {expected}; {kind} given")]
    InvalidParameter {
        /// Parameter name
        name: String,
        /// What the factory expected
        expected: &'static str,
        /// Observed kind of the value
        kind: &'static str,
    },

    /// A nested object-valued parameter is not a well-formed spec
    #[error("parameter '{name}' holds an invalid nested factory input")]
    InvalidNestedSpec {
        /// Parameter name
        name: String,
        /// The underlying shape error
        #[source]
        source: InvalidFactoryInput,
    },
}

/// Symbolic-name resolution failure at the registry boundary
#[derive(Debug, thiserror::Error)]
pub enum CannotResolveComponent {
    /// Neither a registry entry nor a registered factory
    #[error("cannot resolve '{0}' logger component to a registry entry or a factory")]
    UnknownService(String),

    /// Lookup or factory invocation failed underneath
    #[error("resolution of the '{name}' logger component failed")]
    ResolutionFailed {
        /// The symbolic name being resolved
        name: String,
        /// The original failure
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Umbrella error returned by the public construction entry points
#[derive(Debug, thiserror::Error)]
pub enum FactoryError {
    /// Malformed construction request
    #[error("invalid factory input: {0}")]
    Input(#[from] InvalidFactoryInput),

    /// Role-schema violation
    #[error("invalid options: {0}")]
    Options(#[from] InvalidOptions),

    /// Component construction failed
    #[error("construction failed: {0}")]
    Build(#[from] BuildError),

    /// Symbolic-name resolution failed
    #[error("resolution failed: {0}")]
    Resolve(#[from] CannotResolveComponent),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_field_and_kind() {
        let err = InvalidOptions::HandlersNotSequence { kind: "string" };
        let message = err.to_string();
        assert!(message.contains("'handlers'"));
        assert!(message.contains("array"));
        assert!(message.contains("string given"));
    }

    #[test]
    fn factory_input_names_the_missing_key() {
        assert!(InvalidFactoryInput::MissingName.to_string().contains("'name'"));
        let err = InvalidFactoryInput::OptionsNotMap {
            key: "options",
            kind: "string",
        };
        assert!(err.to_string().contains("'options'"));
        assert!(err.to_string().contains("string given"));
    }

    #[test]
    fn resolve_error_carries_the_symbolic_name() {
        let err = CannotResolveComponent::UnknownService("MailHandler".to_string());
        assert!(err.to_string().contains("MailHandler"));
    }

    #[test]
    fn umbrella_preserves_inner_messages() {
        let err = FactoryError::from(InvalidOptions::InvalidFormatter { kind: "null" });
        assert!(err.to_string().contains("'formatter'"));
        assert!(err.to_string().contains("null given"));
    }

    #[test]
    fn build_error_names_role_and_type() {
        let err = BuildError::UnknownType {
            role: ComponentRole::Formatter,
            name: "html".to_string(),
        };
        assert_eq!(err.to_string(), "no formatter type registered under 'html'");
    }
}
