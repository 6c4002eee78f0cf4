//! Error types for fixture construction and population.

use std::fmt;

/// Failure raised by [`Factory::build`](crate::Factory::build).
///
/// Every failure surfaces to the caller; a partially populated instance is
/// never returned as success and nothing is retried. Unsupported field
/// types are not errors, they are skipped.
#[derive(Debug, Clone)]
pub enum ConstructionError {
    /// The target has no zero-argument constructor.
    MissingDefaultConstructor { type_name: &'static str },

    /// The target is nested and its enclosing type cannot be built.
    EnclosingNotConstructible {
        type_name: &'static str,
        enclosing: &'static str,
    },

    /// A constructor call itself failed.
    ConstructorFailed {
        type_name: &'static str,
        cause: String,
    },

    /// A field could not be assigned during the population pass.
    FieldAssignment {
        type_name: &'static str,
        field: String,
        cause: String,
    },
}

impl fmt::Display for ConstructionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstructionError::MissingDefaultConstructor { type_name } => {
                write!(
                    f,
                    "cannot instantiate type without default constructor (type: {})",
                    type_name
                )
            }
            ConstructionError::EnclosingNotConstructible {
                type_name,
                enclosing,
            } => {
                write!(
                    f,
                    "cannot instantiate type without default constructor (enclosing type {} of {})",
                    enclosing, type_name
                )
            }
            ConstructionError::ConstructorFailed { type_name, cause } => {
                write!(f, "constructor for {} failed: {}", type_name, cause)
            }
            ConstructionError::FieldAssignment {
                type_name,
                field,
                cause,
            } => {
                write!(
                    f,
                    "cannot assign field `{}` on {}: {}",
                    field, type_name, cause
                )
            }
        }
    }
}

impl std::error::Error for ConstructionError {}

/// Helper constructors keeping call sites short.
impl ConstructionError {
    pub fn missing_default(type_name: &'static str) -> Self {
        Self::MissingDefaultConstructor { type_name }
    }

    pub fn enclosing_not_constructible(type_name: &'static str, enclosing: &'static str) -> Self {
        Self::EnclosingNotConstructible {
            type_name,
            enclosing,
        }
    }

    pub fn constructor_failed(type_name: &'static str, cause: impl Into<String>) -> Self {
        Self::ConstructorFailed {
            type_name,
            cause: cause.into(),
        }
    }

    pub fn field_assignment(
        type_name: &'static str,
        field: impl Into<String>,
        cause: impl Into<String>,
    ) -> Self {
        Self::FieldAssignment {
            type_name,
            field: field.into(),
            cause: cause.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_default_display_carries_the_standard_phrase() {
        let error = ConstructionError::missing_default("Widget");
        assert_eq!(
            error.to_string(),
            "cannot instantiate type without default constructor (type: Widget)"
        );
    }

    #[test]
    fn enclosing_display_names_both_types() {
        let error = ConstructionError::enclosing_not_constructible("Inner", "Outer");
        let message = error.to_string();
        assert!(message.contains("without default constructor"));
        assert!(message.contains("Outer"));
        assert!(message.contains("Inner"));
    }

    #[test]
    fn field_assignment_display_names_the_field() {
        let error = ConstructionError::field_assignment("Widget", "label", "wrong value kind");
        assert_eq!(
            error.to_string(),
            "cannot assign field `label` on Widget: wrong value kind"
        );
    }

    #[test]
    fn constructor_failed_display_includes_cause() {
        let error = ConstructionError::constructor_failed("Widget", "owner missing");
        assert_eq!(
            error.to_string(),
            "constructor for Widget failed: owner missing"
        );
    }
}
