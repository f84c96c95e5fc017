//! # sdlgen Schema
//!
//! Type metadata model for SDL generation.
//!
//! This crate provides:
//! - Type definitions for host type metadata (objects, enums, arrays, markers)
//! - The [`TypeMetadataProvider`] capability consumed by emitters
//! - An in-memory [`TypeRegistry`] with built-in primitive shapes
//! - XML type catalog parsing and validation
//! - [`Describe`] for registering Rust types directly

pub mod catalog;
pub mod describe;
pub mod error;
pub mod parser;
pub mod provider;
pub mod registry;
pub mod types;
pub mod validation;

pub use catalog::Catalog;
pub use describe::Describe;
pub use error::{CatalogError, ParseError};
pub use parser::{parse_catalog, parse_catalog_file};
pub use provider::{ROOT_OBJECT_METHODS, TypeMetadataProvider};
pub use registry::{ITERABLE, TypeRegistry};
pub use types::{
    AccessorDef, FieldDef, Marker, Markers, PrimitiveType, TypeArg, TypeDef, TypeHandle, TypeKind,
    TypeRef,
};
pub use validation::validate_catalog;
