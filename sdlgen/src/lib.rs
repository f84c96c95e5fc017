//! # sdlgen
//!
//! GraphQL-style SDL generation from type metadata.
//!
//! sdlgen walks the structure of a root type (fields, accessor methods and
//! the markers attached to them) and emits `type`, `enum` and `scalar`
//! declarations for it and for every type it references, each exactly once.
//!
//! ## Quick Start
//!
//! ```ignore
//! use sdlgen::prelude::*;
//!
//! #[derive(SdlType)]
//! #[sdl(accessor(name = "getId", returns = "u64", scalar = "ID", non_null))]
//! struct User {
//!     name: String,
//!     age: i32,
//! }
//!
//! assert_eq!(
//!     sdlgen::format::<User>(),
//!     "type User {\n\tname: String\n\tage: Int\n\tid: ID!\n}\n"
//! );
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Type metadata model, registry and XML type catalogs
//! - [`codegen`] - SDL emission
//! - [`SdlType`] - Derive macro implementing [`schema::Describe`]

pub mod prelude;

/// Type metadata model, registry and XML type catalogs.
pub mod schema {
    pub use sdlgen_schema::*;
}

/// SDL emission from type metadata.
pub mod codegen {
    pub use sdlgen_codegen::*;
}

pub use sdlgen_codegen::{
    CodegenError, format_from_file, format_from_xml, format_schema_type,
    format_schema_type_by_name,
};
pub use sdlgen_derive::SdlType;
pub use sdlgen_schema::{Describe, TypeMetadataProvider, TypeRegistry};

/// Formats a Rust type and every type it references as SDL.
///
/// `T` is described into a fresh registry, so repeated calls are independent.
#[must_use]
pub fn format<T: Describe>() -> String {
    let mut registry = TypeRegistry::new();
    let root = T::register(&mut registry);
    format_schema_type(&registry, root)
}
