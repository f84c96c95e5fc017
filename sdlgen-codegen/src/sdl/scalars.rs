//! Primitive shape to built-in scalar mapping.

use sdlgen_schema::{PrimitiveType, TypeHandle, TypeKind, TypeMetadataProvider};
use std::fmt;

/// The four built-in SDL scalars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinScalar {
    /// `Boolean`.
    Boolean,
    /// `Int`.
    Int,
    /// `Float`.
    Float,
    /// `String`.
    String,
}

impl BuiltinScalar {
    /// Returns the SDL spelling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Boolean => "Boolean",
            Self::Int => "Int",
            Self::Float => "Float",
            Self::String => "String",
        }
    }

    /// Maps a primitive shape to its scalar.
    #[must_use]
    pub const fn for_primitive(prim: PrimitiveType) -> Self {
        if prim.is_integer() {
            Self::Int
        } else if prim.is_float() {
            Self::Float
        } else if prim.is_text() {
            Self::String
        } else {
            Self::Boolean
        }
    }
}

impl fmt::Display for BuiltinScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a primitive-like type to a built-in scalar.
///
/// An array of characters is a character sequence and maps to `String`.
/// Returns `None` for objects, enums and other containers.
pub fn map_primitive<P>(provider: &P, ty: TypeHandle) -> Option<BuiltinScalar>
where
    P: TypeMetadataProvider + ?Sized,
{
    match provider.type_def(ty).kind {
        TypeKind::Primitive(prim) => Some(BuiltinScalar::for_primitive(prim)),
        TypeKind::Array(component)
            if provider.type_def(component).primitive() == Some(PrimitiveType::Char) =>
        {
            Some(BuiltinScalar::String)
        }
        _ => None,
    }
}
