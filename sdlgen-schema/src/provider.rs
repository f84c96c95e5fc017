//! The metadata capability schema emission depends on.

use crate::types::{AccessorDef, FieldDef, Markers, TypeDef, TypeHandle, TypeKind, TypeRef};
use std::collections::HashSet;

/// Public method names of the universal root object type.
///
/// Only the root type's own methods are listed. Accessors named like Rust
/// trait methods (`hash`, `clone`, `fmt`) are ordinary accessors.
pub const ROOT_OBJECT_METHODS: &[&str] = &[
    "equals",
    "hashCode",
    "toString",
    "getClass",
    "notify",
    "notifyAll",
    "wait",
];

/// Structural metadata about types reachable from a root.
///
/// Implementors only need [`type_def`](Self::type_def) and
/// [`resolve_type`](Self::resolve_type); the remaining queries derive from
/// the definition.
pub trait TypeMetadataProvider {
    /// Returns the definition of `ty`.
    ///
    /// # Panics
    /// Implementations may panic when `ty` was not issued by this provider.
    fn type_def(&self, ty: TypeHandle) -> &TypeDef;

    /// Resolves a type by simple name.
    fn resolve_type(&self, name: &str) -> Option<TypeHandle>;

    /// Method names of the universal root object type.
    fn root_object_methods(&self) -> &[&str] {
        ROOT_OBJECT_METHODS
    }

    /// Returns the simple name of `ty`.
    fn type_name(&self, ty: TypeHandle) -> &str {
        &self.type_def(ty).name
    }

    /// Returns the declared fields of `ty`.
    fn fields(&self, ty: TypeHandle) -> &[FieldDef] {
        &self.type_def(ty).fields
    }

    /// Returns the declared methods of `ty`.
    fn accessors(&self, ty: TypeHandle) -> &[AccessorDef] {
        &self.type_def(ty).accessors
    }

    /// Returns the type-level markers of `ty`.
    fn type_markers(&self, ty: TypeHandle) -> &Markers {
        &self.type_def(ty).markers
    }

    /// Returns true if `ty` is an enumerated type.
    fn is_enum(&self, ty: TypeHandle) -> bool {
        self.type_def(ty).is_enum()
    }

    /// Returns the constants of an enumerated type, empty otherwise.
    fn enum_constants(&self, ty: TypeHandle) -> &[String] {
        match &self.type_def(ty).kind {
            TypeKind::Enum(constants) => constants,
            _ => &[],
        }
    }

    /// Returns the extension chain of `ty`: its first supertype, that type's
    /// first supertype, and so on.
    ///
    /// Stops at the first type without supertypes or when a type repeats.
    fn extension_chain(&self, ty: TypeHandle) -> Vec<TypeRef> {
        let mut chain = Vec::new();
        let mut seen = HashSet::from([ty]);
        let mut current = ty;

        while let Some(next) = self.type_def(current).supertypes.first() {
            if !seen.insert(next.target) {
                tracing::warn!(
                    "cyclic supertype chain at '{}'",
                    self.type_name(next.target)
                );
                break;
            }
            chain.push(next.clone());
            current = next.target;
        }

        chain
    }
}
