//! # sdlgen Codegen
//!
//! SDL emission from type metadata.
//!
//! This crate provides:
//! - Primitive to built-in scalar mapping
//! - Array and iterable container detection
//! - Field naming and accessor filtering
//! - The recursive schema emitter
//! - Catalog integration (`format_from_xml`, `format_from_file`)

pub mod error;
pub mod sdl;

pub use error::CodegenError;
pub use sdl::SchemaEmitter;

use sdlgen_schema::{TypeHandle, TypeKind, TypeMetadataProvider, TypeRegistry};

/// Formats a root type and every type it references as SDL.
///
/// # Arguments
/// * `provider` - Type metadata provider
/// * `root` - Root type handle issued by `provider`
///
/// # Returns
/// The root's block followed by all transitively referenced blocks.
#[must_use]
pub fn format_schema_type<P>(provider: &P, root: TypeHandle) -> String
where
    P: TypeMetadataProvider + ?Sized,
{
    SchemaEmitter::new(provider).emit_all(root)
}

/// Formats the type named `name` as SDL.
///
/// Only object and enum types can be roots. Primitives, arrays and the
/// iterable capability have no block of their own.
///
/// # Errors
/// Returns `CodegenError::TypeResolution` if `provider` cannot resolve `name`
/// to an object or enum type.
pub fn format_schema_type_by_name<P>(provider: &P, name: &str) -> Result<String, CodegenError>
where
    P: TypeMetadataProvider + ?Sized,
{
    let root = provider
        .resolve_type(name)
        .filter(|&ty| {
            matches!(
                provider.type_def(ty).kind,
                TypeKind::Object | TypeKind::Enum(_)
            )
        })
        .ok_or_else(|| CodegenError::type_resolution(name))?;
    Ok(format_schema_type(provider, root))
}

/// Formats a type from an XML type catalog string.
///
/// # Arguments
/// * `xml` - XML catalog content
/// * `name` - Name of the root type
///
/// # Returns
/// Generated SDL as a string.
///
/// # Errors
/// Returns `CodegenError` if parsing, resolution, or type lookup fails.
pub fn format_from_xml(xml: &str, name: &str) -> Result<String, CodegenError> {
    let catalog = sdlgen_schema::parse_catalog(xml)?;
    let registry = TypeRegistry::from_catalog(&catalog)?;
    format_schema_type_by_name(&registry, name)
}

/// Formats a type from an XML type catalog file.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, resolution, or type lookup fails.
pub fn format_from_file(path: &std::path::Path, name: &str) -> Result<String, CodegenError> {
    let xml = std::fs::read_to_string(path)?;
    format_from_xml(&xml, name)
}
