//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```ignore
//! use sdlgen::prelude::*;
//! ```

// Metadata model
pub use sdlgen_schema::{
    AccessorDef, Describe, FieldDef, Marker, Markers, PrimitiveType, TypeArg, TypeDef, TypeHandle,
    TypeKind, TypeMetadataProvider, TypeRef, TypeRegistry,
};

// Catalogs
pub use sdlgen_schema::{Catalog, CatalogError, ParseError, parse_catalog, parse_catalog_file};

// Emission
pub use sdlgen_codegen::{
    CodegenError, SchemaEmitter, format_from_file, format_from_xml, format_schema_type,
    format_schema_type_by_name,
};

// Derive
pub use sdlgen_derive::SdlType;
