//! Error types for SDL generation.

use thiserror::Error;

/// Error type for SDL generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Catalog parsing error.
    #[error("catalog parse error: {0}")]
    Parse(#[from] sdlgen_schema::ParseError),

    /// Catalog validation or resolution error.
    #[error("catalog error: {0}")]
    Catalog(#[from] sdlgen_schema::CatalogError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The root type could not be located.
    #[error("cannot resolve type '{name}'")]
    TypeResolution {
        /// Requested type name.
        name: String,
    },
}

impl CodegenError {
    /// Creates a type resolution error for the given name.
    pub fn type_resolution(name: impl Into<String>) -> Self {
        Self::TypeResolution { name: name.into() }
    }
}
