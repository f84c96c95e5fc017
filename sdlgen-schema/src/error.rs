//! Error types for catalog parsing and resolution.

use thiserror::Error;

/// Error type for type catalog parsing operations.
#[derive(Debug, Error)]
pub enum ParseError {
    /// XML parsing error.
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Missing required attribute.
    #[error("missing required attribute '{attribute}' on element '{element}'")]
    MissingAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: String,
    },

    /// Invalid attribute value.
    #[error("invalid value '{value}' for attribute '{attribute}' on element '{element}'")]
    InvalidAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: String,
        /// Invalid value.
        value: String,
    },

    /// Unknown element encountered.
    #[error("unknown element '{element}' in context '{context}'")]
    UnknownElement {
        /// Element name.
        element: String,
        /// Parent context.
        context: String,
    },

    /// Invalid catalog structure.
    #[error("invalid catalog structure: {message}")]
    InvalidStructure {
        /// Error message.
        message: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

/// Error type for catalog validation and resolution.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Parsing error.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Duplicate definition.
    #[error("duplicate {kind} definition: '{name}'")]
    DuplicateDefinition {
        /// Kind of definition (type, field, constant, ...).
        kind: String,
        /// Name of the duplicate.
        name: String,
    },

    /// Unknown type reference.
    #[error("unknown type '{type_name}' referenced in {context}")]
    UnknownType {
        /// Type name.
        type_name: String,
        /// Where the reference was found.
        context: String,
    },

    /// Supertype referenced with the wrong number of type arguments.
    #[error("type '{type_name}' expects {expected} type argument(s), found {found}")]
    ArityMismatch {
        /// Supertype name.
        type_name: String,
        /// Declared parameter count.
        expected: usize,
        /// Supplied argument count.
        found: usize,
    },

    /// Validation error.
    #[error("validation error: {message}")]
    Validation {
        /// Error message.
        message: String,
    },
}

impl ParseError {
    /// Creates a missing attribute error.
    pub fn missing_attr(element: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::MissingAttribute {
            element: element.into(),
            attribute: attribute.into(),
        }
    }

    /// Creates an invalid attribute error.
    pub fn invalid_attr(
        element: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidAttribute {
            element: element.into(),
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Creates an unknown element error.
    pub fn unknown_element(element: impl Into<String>, context: impl Into<String>) -> Self {
        Self::UnknownElement {
            element: element.into(),
            context: context.into(),
        }
    }
}

impl CatalogError {
    /// Creates a duplicate definition error.
    pub fn duplicate(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicateDefinition {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Creates an unknown type error.
    pub fn unknown_type(type_name: impl Into<String>, context: impl Into<String>) -> Self {
        Self::UnknownType {
            type_name: type_name.into(),
            context: context.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::missing_attr("field", "type");
        assert_eq!(
            err.to_string(),
            "missing required attribute 'type' on element 'field'"
        );

        let err = ParseError::invalid_attr("field", "nonNull", "maybe");
        assert!(err.to_string().contains("'maybe'"));
    }

    #[test]
    fn test_catalog_error_from_parse() {
        let err: CatalogError = ParseError::unknown_element("bogus", "catalog").into();
        assert!(matches!(err, CatalogError::Parse(_)));
        assert!(err.to_string().contains("bogus"));
    }

    #[test]
    fn test_catalog_error_helpers() {
        let err = CatalogError::duplicate("type", "User");
        assert_eq!(err.to_string(), "duplicate type definition: 'User'");

        let err = CatalogError::unknown_type("Rolee", "field 'User.roles'");
        assert_eq!(
            err.to_string(),
            "unknown type 'Rolee' referenced in field 'User.roles'"
        );
    }
}
