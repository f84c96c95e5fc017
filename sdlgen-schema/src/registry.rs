//! In-memory type registry.
//!
//! [`TypeRegistry`] owns every [`TypeDef`] and hands out [`TypeHandle`]s.
//! Types are registered by hand, resolved from a parsed [`Catalog`], or
//! described by Rust types through [`Describe`](crate::Describe).

use crate::catalog::{Catalog, MarkerDecl, TypeDecl, split_array_suffix};
use crate::error::CatalogError;
use crate::provider::TypeMetadataProvider;
use crate::types::{
    AccessorDef, FieldDef, Marker, PrimitiveType, TypeArg, TypeDef, TypeHandle, TypeKind, TypeRef,
};
use crate::validation::validate_catalog;
use std::any::TypeId;
use std::collections::HashMap;

/// Name of the pre-registered iterable capability.
pub const ITERABLE: &str = "Iterable";

/// Owner of type definitions and implementation of [`TypeMetadataProvider`].
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    types: Vec<TypeDef>,
    type_map: HashMap<String, TypeHandle>,
    primitives: HashMap<PrimitiveType, TypeHandle>,
    iterable: TypeHandle,
    arrays: HashMap<TypeHandle, TypeHandle>,
    sequences: HashMap<(String, TypeHandle), TypeHandle>,
    native: HashMap<TypeId, TypeHandle>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Creates a registry holding the primitive shapes and the iterable capability.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self {
            types: Vec::new(),
            type_map: HashMap::new(),
            primitives: HashMap::new(),
            iterable: TypeHandle::from_index(0),
            arrays: HashMap::new(),
            sequences: HashMap::new(),
            native: HashMap::new(),
        };

        for prim in PrimitiveType::ALL {
            let handle = registry.add(TypeDef::new(
                prim.canonical_name(),
                TypeKind::Primitive(prim),
            ));
            registry.primitives.insert(prim, handle);
        }
        registry.iterable = registry.add(TypeDef::new(ITERABLE, TypeKind::Iterable).param("T"));

        registry
    }

    /// Builds a registry from a parsed catalog.
    ///
    /// The catalog is validated first; names are then reserved for every
    /// declaration so members may reference types declared later, or the
    /// declaring type itself.
    ///
    /// # Errors
    /// Returns `CatalogError` if validation fails or a reference cannot be resolved.
    pub fn from_catalog(catalog: &Catalog) -> Result<Self, CatalogError> {
        validate_catalog(catalog)?;

        let mut registry = Self::new();
        let handles: Vec<TypeHandle> = catalog
            .types
            .iter()
            .map(|decl| registry.reserve(decl.name()))
            .collect();

        for (decl, &handle) in catalog.types.iter().zip(&handles) {
            let def = registry.resolve_decl(decl)?;
            registry.define(handle, def);
        }

        tracing::debug!(
            "resolved {} catalog types into {} registry entries",
            catalog.types.len(),
            registry.len()
        );
        Ok(registry)
    }

    /// Adds a definition and returns its handle.
    ///
    /// The first definition registered under a name wins name resolution.
    pub fn add(&mut self, def: TypeDef) -> TypeHandle {
        let handle = TypeHandle::from_index(self.types.len());
        self.type_map.entry(def.name.clone()).or_insert(handle);
        self.types.push(def);
        handle
    }

    /// Reserves a handle for a type that will be defined later.
    ///
    /// Until [`define`](Self::define) is called the slot holds an empty object type.
    pub fn reserve(&mut self, name: &str) -> TypeHandle {
        self.add(TypeDef::object(name))
    }

    /// Replaces the definition behind a reserved handle.
    ///
    /// # Panics
    /// Panics if `handle` was not issued by this registry.
    pub fn define(&mut self, handle: TypeHandle, def: TypeDef) {
        self.types[handle.index()] = def;
    }

    /// Gets a definition by handle.
    #[must_use]
    pub fn get(&self, handle: TypeHandle) -> Option<&TypeDef> {
        self.types.get(handle.index())
    }

    /// Returns the number of registered types, including built-ins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if the registry holds no types.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Returns an iterator over all `(handle, definition)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (TypeHandle, &TypeDef)> {
        self.types
            .iter()
            .enumerate()
            .map(|(idx, def)| (TypeHandle::from_index(idx), def))
    }

    /// Returns the handle of a primitive shape.
    #[must_use]
    pub fn primitive(&self, prim: PrimitiveType) -> TypeHandle {
        self.primitives[&prim]
    }

    /// Returns the handle of the iterable capability.
    #[must_use]
    pub const fn iterable(&self) -> TypeHandle {
        self.iterable
    }

    /// Returns the array type of `component`, registering it on first use.
    pub fn array_of(&mut self, component: TypeHandle) -> TypeHandle {
        if let Some(&handle) = self.arrays.get(&component) {
            return handle;
        }
        let name = format!("{}[]", self.types[component.index()].name);
        let handle = self.add(TypeDef::new(name, TypeKind::Array(component)));
        self.arrays.insert(component, handle);
        handle
    }

    /// Returns a sequence type named `name` that implements the iterable
    /// capability over `element`, registering it on first use.
    pub fn sequence_of(&mut self, name: &str, element: TypeHandle) -> TypeHandle {
        let key = (name.to_string(), element);
        if let Some(&handle) = self.sequences.get(&key) {
            return handle;
        }
        let def = TypeDef::object(name).extends(TypeRef::with_args(
            self.iterable,
            vec![TypeArg::Concrete(element)],
        ));
        let handle = self.add(def);
        self.sequences.insert(key, handle);
        handle
    }

    /// Returns the memberless object type registered under `name`, registering
    /// it on first use.
    pub fn opaque(&mut self, name: &str) -> TypeHandle {
        match self.type_map.get(name) {
            Some(&handle) => handle,
            None => self.add(TypeDef::object(name)),
        }
    }

    /// Returns the handle bound to a Rust type, if it has been described.
    #[must_use]
    pub fn native(&self, id: TypeId) -> Option<TypeHandle> {
        self.native.get(&id).copied()
    }

    /// Binds a Rust type to a handle.
    pub fn bind_native(&mut self, id: TypeId, handle: TypeHandle) {
        self.native.insert(id, handle);
    }

    /// Resolves a catalog type reference, including `[]` array suffixes.
    fn resolve_ref(&mut self, type_ref: &str, context: &str) -> Result<TypeHandle, CatalogError> {
        let (base, depth) = split_array_suffix(type_ref);
        let mut handle = self
            .resolve_type(base)
            .ok_or_else(|| CatalogError::unknown_type(base, context))?;
        for _ in 0..depth {
            handle = self.array_of(handle);
        }
        Ok(handle)
    }

    /// Converts catalog marker attributes into markers.
    fn resolve_markers(
        &mut self,
        decl: &MarkerDecl,
        context: &str,
    ) -> Result<Vec<Marker>, CatalogError> {
        let mut markers = Vec::new();
        if let Some(name) = &decl.scalar {
            markers.push(Marker::Scalar(name.clone()));
        }
        if let Some(element) = &decl.list_of {
            markers.push(Marker::List {
                element: self.resolve_ref(element, context)?,
                element_non_null: decl.element_non_null,
            });
        }
        if decl.non_null {
            markers.push(Marker::NonNull);
        }
        if decl.ignore {
            markers.push(Marker::Ignore);
        }
        if decl.id {
            markers.push(Marker::Id);
        }
        Ok(markers)
    }

    /// Resolves one catalog declaration into a definition.
    fn resolve_decl(&mut self, decl: &TypeDecl) -> Result<TypeDef, CatalogError> {
        match decl {
            TypeDecl::Enum(e) => {
                let mut def = TypeDef::enumeration(e.name.clone(), e.constants.iter().cloned());
                if let Some(name) = &e.scalar {
                    def = def.marker(Marker::Scalar(name.clone()));
                }
                Ok(def)
            }
            TypeDecl::Object(o) => {
                let mut def = TypeDef::object(o.name.clone());
                def.params = o.params.clone();
                if let Some(name) = &o.scalar {
                    def = def.marker(Marker::Scalar(name.clone()));
                }

                for field in &o.fields {
                    let context = format!("field '{}.{}'", o.name, field.name);
                    let ty = self.resolve_ref(&field.type_name, &context)?;
                    let mut resolved = FieldDef::new(field.name.clone(), ty);
                    for marker in self.resolve_markers(&field.markers, &context)? {
                        resolved = resolved.marker(marker);
                    }
                    def = def.field(resolved);
                }

                for accessor in &o.accessors {
                    let context = format!("accessor '{}.{}'", o.name, accessor.name);
                    let params = accessor
                        .params
                        .iter()
                        .map(|p| self.resolve_ref(p, &context))
                        .collect::<Result<Vec<_>, _>>()?;
                    let returns = match &accessor.returns {
                        Some(r) => Some(self.resolve_ref(r, &context)?),
                        None => None,
                    };
                    let mut resolved = AccessorDef::new(accessor.name.clone(), params, returns);
                    for marker in self.resolve_markers(&accessor.markers, &context)? {
                        resolved = resolved.marker(marker);
                    }
                    def = def.accessor(resolved);
                }

                for supertype in &o.supertypes {
                    let context = format!("supertype of '{}'", o.name);
                    let target = self.resolve_ref(&supertype.type_name, &context)?;
                    let args = supertype
                        .args
                        .iter()
                        .map(|arg| {
                            if o.params.contains(arg) {
                                Ok(TypeArg::Variable(arg.clone()))
                            } else {
                                self.resolve_ref(arg, &context).map(TypeArg::Concrete)
                            }
                        })
                        .collect::<Result<Vec<_>, _>>()?;
                    def = def.extends(TypeRef::with_args(target, args));
                }

                Ok(def)
            }
        }
    }
}

impl TypeMetadataProvider for TypeRegistry {
    fn type_def(&self, ty: TypeHandle) -> &TypeDef {
        &self.types[ty.index()]
    }

    fn resolve_type(&self, name: &str) -> Option<TypeHandle> {
        self.type_map
            .get(name)
            .copied()
            .or_else(|| PrimitiveType::from_name(name).map(|p| self.primitive(p)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_catalog;

    #[test]
    fn test_new_registers_builtins() {
        let registry = TypeRegistry::new();
        assert_eq!(registry.len(), PrimitiveType::ALL.len() + 1);
        assert_eq!(
            registry.resolve_type("String"),
            Some(registry.primitive(PrimitiveType::String))
        );
        assert_eq!(registry.resolve_type(ITERABLE), Some(registry.iterable()));
        assert_eq!(registry.type_def(registry.iterable()).params, vec!["T"]);
    }

    #[test]
    fn test_resolve_type_accepts_aliases() {
        let registry = TypeRegistry::new();
        assert_eq!(
            registry.resolve_type("i64"),
            Some(registry.primitive(PrimitiveType::Int64))
        );
        assert_eq!(
            registry.resolve_type("Integer"),
            Some(registry.primitive(PrimitiveType::Int32))
        );
        assert_eq!(registry.resolve_type("Unknown"), None);
    }

    #[test]
    fn test_array_of_is_interned() {
        let mut registry = TypeRegistry::new();
        let role = registry.add(TypeDef::object("Role"));
        let first = registry.array_of(role);
        let second = registry.array_of(role);
        assert_eq!(first, second);
        assert_eq!(registry.type_name(first), "Role[]");
        assert_eq!(registry.type_def(first).kind, TypeKind::Array(role));
        assert_eq!(registry.resolve_type("Role[]"), Some(first));
    }

    #[test]
    fn test_sequence_of_is_interned_per_element() {
        let mut registry = TypeRegistry::new();
        let int = registry.primitive(PrimitiveType::Int32);
        let string = registry.primitive(PrimitiveType::String);

        let ints = registry.sequence_of("Vec", int);
        assert_eq!(registry.sequence_of("Vec", int), ints);
        let strings = registry.sequence_of("Vec", string);
        assert_ne!(ints, strings);

        let def = registry.type_def(ints);
        assert_eq!(def.name, "Vec");
        assert_eq!(
            def.supertypes,
            vec![TypeRef::with_args(
                registry.iterable(),
                vec![TypeArg::Concrete(int)]
            )]
        );
    }

    #[test]
    fn test_opaque_reuses_name() {
        let mut registry = TypeRegistry::new();
        let first = registry.opaque("HashMap");
        assert_eq!(registry.opaque("HashMap"), first);
        assert!(registry.fields(first).is_empty());
    }

    #[test]
    fn test_reserve_then_define() {
        let mut registry = TypeRegistry::new();
        let node = registry.reserve("Node");
        registry.define(
            node,
            TypeDef::object("Node").field(FieldDef::new("next", node)),
        );
        assert_eq!(registry.fields(node)[0].ty, node);
    }

    #[test]
    fn test_first_registration_wins_name() {
        let mut registry = TypeRegistry::new();
        let first = registry.add(TypeDef::object("Dup"));
        let second = registry.add(TypeDef::object("Dup"));
        assert_ne!(first, second);
        assert_eq!(registry.resolve_type("Dup"), Some(first));
    }

    #[test]
    fn test_from_catalog_resolves_forward_and_self_references() {
        let xml = r#"<catalog>
    <object name="User">
        <field name="roles" type="Role[]"/>
        <field name="manager" type="User"/>
        <accessor name="getId" returns="long" scalar="ID" nonNull="true"/>
    </object>
    <object name="Role">
        <field name="name" type="String"/>
    </object>
</catalog>"#;

        let catalog = parse_catalog(xml).expect("Failed to parse");
        let registry = TypeRegistry::from_catalog(&catalog).expect("Failed to resolve");

        let user = registry.resolve_type("User").expect("User registered");
        let role = registry.resolve_type("Role").expect("Role registered");
        let fields = registry.fields(user);
        assert_eq!(registry.type_def(fields[0].ty).kind, TypeKind::Array(role));
        assert_eq!(fields[1].ty, user);

        let accessor = &registry.accessors(user)[0];
        assert_eq!(
            accessor.returns,
            Some(registry.primitive(PrimitiveType::Int64))
        );
        assert_eq!(accessor.markers.scalar(), Some("ID"));
        assert!(accessor.markers.is_non_null());
    }

    #[test]
    fn test_from_catalog_binds_type_variables() {
        let xml = r#"<catalog>
    <object name="ArrayList" params="E">
        <extends type="Iterable" args="E"/>
    </object>
    <object name="RoleList">
        <extends type="ArrayList" args="Role"/>
    </object>
    <object name="Role"/>
</catalog>"#;

        let catalog = parse_catalog(xml).expect("Failed to parse");
        let registry = TypeRegistry::from_catalog(&catalog).expect("Failed to resolve");

        let list = registry.resolve_type("ArrayList").expect("registered");
        let role_list = registry.resolve_type("RoleList").expect("registered");
        let role = registry.resolve_type("Role").expect("registered");

        assert_eq!(
            registry.type_def(list).supertypes[0].args,
            vec![TypeArg::Variable("E".to_string())]
        );
        assert_eq!(
            registry.type_def(role_list).supertypes[0],
            TypeRef::with_args(list, vec![TypeArg::Concrete(role)])
        );
    }

    #[test]
    fn test_from_catalog_list_marker() {
        let xml = r#"<catalog>
    <object name="School">
        <accessor name="getStudents" returns="Students" listOf="Student" elementNonNull="true" nonNull="true"/>
    </object>
    <object name="Students"/>
    <object name="Student"/>
</catalog>"#;

        let catalog = parse_catalog(xml).expect("Failed to parse");
        let registry = TypeRegistry::from_catalog(&catalog).expect("Failed to resolve");
        let school = registry.resolve_type("School").expect("registered");
        let student = registry.resolve_type("Student").expect("registered");

        let markers = &registry.accessors(school)[0].markers;
        assert_eq!(markers.list(), Some((student, true)));
        assert!(markers.is_non_null());
    }

    #[test]
    fn test_from_catalog_unknown_type() {
        let xml = r#"<catalog>
    <object name="User">
        <field name="role" type="Rolee"/>
    </object>
</catalog>"#;

        let catalog = parse_catalog(xml).expect("Failed to parse");
        let result = TypeRegistry::from_catalog(&catalog);
        assert!(matches!(result, Err(CatalogError::UnknownType { .. })));
    }
}
