//! Recursive SDL emitter.
//!
//! [`SchemaEmitter`] walks the type graph from a root type depth-first. Every
//! type is entered into an [`EmissionLedger`] before its members are
//! resolved, so a type reachable along several paths, or through a cycle, is
//! emitted once.

use crate::sdl::containers::{ContainerElement, as_container};
use crate::sdl::fields::FieldTable;
use crate::sdl::filter::include_accessor;
use crate::sdl::naming::field_name;
use crate::sdl::scalars::map_primitive;
use sdlgen_schema::{Markers, TypeHandle, TypeMetadataProvider};
use std::collections::HashSet;

/// Token of the legacy identifier marker.
const ID_SCALAR: &str = "ID";

/// Types already emitted or scheduled during one emission.
#[derive(Debug, Default)]
pub struct EmissionLedger {
    emitted: HashSet<TypeHandle>,
}

impl EmissionLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters a type. Returns false if it was already present.
    pub fn insert(&mut self, ty: TypeHandle) -> bool {
        self.emitted.insert(ty)
    }

    /// Returns true if the type has been entered.
    #[must_use]
    pub fn contains(&self, ty: TypeHandle) -> bool {
        self.emitted.contains(&ty)
    }

    /// Returns the number of entered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.emitted.len()
    }

    /// Returns true if no type has been entered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.emitted.is_empty()
    }
}

/// Non-scalar types referenced by one object block, in first-discovery order.
#[derive(Debug, Default)]
struct ReferencedTypes {
    order: Vec<TypeHandle>,
    seen: HashSet<TypeHandle>,
}

impl ReferencedTypes {
    fn record(&mut self, ty: TypeHandle) {
        if self.seen.insert(ty) {
            self.order.push(ty);
        }
    }
}

/// Emitter for one top-level emission.
///
/// The ledger lives inside the emitter and [`emit_all`](Self::emit_all)
/// consumes it, so independent emissions never share state.
pub struct SchemaEmitter<'a, P: TypeMetadataProvider + ?Sized> {
    provider: &'a P,
    ledger: EmissionLedger,
}

impl<'a, P: TypeMetadataProvider + ?Sized> SchemaEmitter<'a, P> {
    /// Creates a new emitter over `provider`.
    #[must_use]
    pub fn new(provider: &'a P) -> Self {
        Self {
            provider,
            ledger: EmissionLedger::new(),
        }
    }

    /// Emits the root type's block followed by every transitively referenced block.
    #[must_use]
    pub fn emit_all(mut self, root: TypeHandle) -> String {
        let mut output = String::new();
        self.emit(root, &mut output);
        tracing::debug!(
            "emitted {} type(s) from root '{}'",
            self.ledger.len(),
            self.provider.type_name(root)
        );
        output
    }

    /// Emits one type and, after it, the blocks of the types it references.
    fn emit(&mut self, ty: TypeHandle, output: &mut String) {
        let provider = self.provider;
        if !self.ledger.insert(ty) {
            tracing::trace!("'{}' already emitted", provider.type_name(ty));
            return;
        }
        let name = provider.type_name(ty);

        if let Some(scalar) = provider.type_markers(ty).scalar() {
            tracing::debug!("scalar block for '{}'", name);
            output.push_str(&format!("scalar {}\n", scalar));
            return;
        }

        if provider.is_enum(ty) {
            tracing::debug!("enum block for '{}'", name);
            output.push_str(&format!("enum {} {{\n", name));
            for constant in provider.enum_constants(ty) {
                output.push_str(&format!("\t{}\n", constant));
            }
            output.push_str("}\n");
            return;
        }

        let mut table = FieldTable::new();
        let mut referenced = ReferencedTypes::default();

        for field in provider.fields(ty) {
            if field.markers.is_ignored() {
                continue;
            }
            let token = self.resolve_member(field.ty, &field.markers, &mut referenced);
            table.insert(field.name.clone(), token);
        }

        for accessor in provider.accessors(ty) {
            if !include_accessor(provider, accessor) {
                continue;
            }
            let Some(returns) = accessor.returns else {
                continue;
            };
            let token = self.resolve_member(returns, &accessor.markers, &mut referenced);
            table.insert(field_name(&accessor.name), token);
        }

        tracing::debug!("type block for '{}' with {} field(s)", name, table.len());
        output.push_str(&format!("type {} {{\n", name));
        for (field, token) in table.iter() {
            output.push_str(&format!("\t{}: {}\n", field, token));
        }
        output.push_str("}\n");

        for next in referenced.order {
            self.emit(next, output);
        }
    }

    /// Resolves the type token of a field or accessor.
    ///
    /// Precedence: scalar override, legacy identifier, list override, default
    /// mapping. `NonNull` then appends `!`.
    fn resolve_member(
        &self,
        ty: TypeHandle,
        markers: &Markers,
        referenced: &mut ReferencedTypes,
    ) -> String {
        let mut token = if let Some(scalar) = markers.scalar() {
            scalar.to_string()
        } else if markers.is_id() {
            ID_SCALAR.to_string()
        } else if let Some((element, element_non_null)) = markers.list() {
            let bang = if element_non_null { "!" } else { "" };
            format!("[{}{}]", self.default_map(element, referenced), bang)
        } else {
            self.default_map(ty, referenced)
        };

        if markers.is_non_null() {
            token.push('!');
        }
        token
    }

    /// Maps a type to its token without member markers.
    fn default_map(&self, ty: TypeHandle, referenced: &mut ReferencedTypes) -> String {
        let provider = self.provider;

        if let Some(scalar) = map_primitive(provider, ty) {
            return scalar.as_str().to_string();
        }

        if provider.is_enum(ty) {
            referenced.record(ty);
            return provider.type_name(ty).to_string();
        }

        match as_container(provider, ty) {
            Some(ContainerElement::Resolved(element)) => {
                format!("[{}]", self.default_map(element, referenced))
            }
            Some(ContainerElement::Unresolved(name)) => {
                tracing::warn!(
                    "element of '{}' is not statically known, using '{}'",
                    provider.type_name(ty),
                    name
                );
                format!("[{}]", name)
            }
            None => {
                referenced.record(ty);
                provider.type_name(ty).to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdlgen_schema::{
        AccessorDef, FieldDef, Marker, PrimitiveType, TypeArg, TypeDef, TypeRef, TypeRegistry,
        parse_catalog,
    };

    fn emit(registry: &TypeRegistry, root: TypeHandle) -> String {
        SchemaEmitter::new(registry).emit_all(root)
    }

    fn primitive(registry: &TypeRegistry, prim: PrimitiveType) -> TypeHandle {
        registry.primitive(prim)
    }

    #[test]
    fn test_user_with_id_accessor() {
        let mut registry = TypeRegistry::new();
        let string = primitive(&registry, PrimitiveType::String);
        let int = primitive(&registry, PrimitiveType::Int32);
        let long = primitive(&registry, PrimitiveType::Int64);
        let user = registry.add(
            TypeDef::object("User")
                .field(FieldDef::new("name", string))
                .field(FieldDef::new("age", int))
                .accessor(
                    AccessorDef::getter("getId", long)
                        .marker(Marker::Scalar("ID".to_string()))
                        .marker(Marker::NonNull),
                ),
        );

        assert_eq!(
            emit(&registry, user),
            "type User {\n\tname: String\n\tage: Int\n\tid: ID!\n}\n"
        );
    }

    #[test]
    fn test_type_level_scalar_skips_members() {
        let mut registry = TypeRegistry::new();
        let int = primitive(&registry, PrimitiveType::Int32);
        let permission = registry.add(
            TypeDef::object("Permission")
                .marker(Marker::Scalar("Permission".to_string()))
                .field(FieldDef::new("id", int)),
        );

        assert_eq!(emit(&registry, permission), "scalar Permission\n");
    }

    #[test]
    fn test_enum_block() {
        let mut registry = TypeRegistry::new();
        let rank = registry.add(TypeDef::enumeration("Rank", ["FIRST", "SECOND", "THIRD"]));

        assert_eq!(
            emit(&registry, rank),
            "enum Rank {\n\tFIRST\n\tSECOND\n\tTHIRD\n}\n"
        );
    }

    #[test]
    fn test_array_of_objects_emitted_once() {
        let mut registry = TypeRegistry::new();
        let string = primitive(&registry, PrimitiveType::String);
        let role = registry.add(TypeDef::object("Role").field(FieldDef::new("name", string)));
        let roles = registry.array_of(role);
        let user = registry.add(
            TypeDef::object("User")
                .field(FieldDef::new("roles", roles))
                .field(FieldDef::new("primary", role)),
        );

        let output = emit(&registry, user);
        assert_eq!(
            output,
            "type User {\n\troles: [Role]\n\tprimary: Role\n}\ntype Role {\n\tname: String\n}\n"
        );
        assert_eq!(output.matches("type Role").count(), 1);
    }

    #[test]
    fn test_ignored_accessor_keeps_field() {
        let mut registry = TypeRegistry::new();
        let string = primitive(&registry, PrimitiveType::String);
        let int = primitive(&registry, PrimitiveType::Int32);
        let user = registry.add(
            TypeDef::object("User")
                .field(FieldDef::new("name", string))
                .accessor(AccessorDef::getter("getName", int).marker(Marker::Ignore)),
        );

        assert_eq!(emit(&registry, user), "type User {\n\tname: String\n}\n");
    }

    #[test]
    fn test_ignored_field_absent() {
        let mut registry = TypeRegistry::new();
        let string = primitive(&registry, PrimitiveType::String);
        let user = registry.add(
            TypeDef::object("User")
                .field(FieldDef::new("password", string).marker(Marker::Ignore))
                .field(FieldDef::new("name", string)),
        );

        assert_eq!(emit(&registry, user), "type User {\n\tname: String\n}\n");
    }

    #[test]
    fn test_accessor_overwrites_field_in_place() {
        let mut registry = TypeRegistry::new();
        let boolean = primitive(&registry, PrimitiveType::Bool);
        let string = primitive(&registry, PrimitiveType::String);
        let user = registry.add(
            TypeDef::object("User")
                .field(FieldDef::new("active", boolean))
                .field(FieldDef::new("name", string))
                .accessor(AccessorDef::getter("isActive", string).marker(Marker::NonNull)),
        );

        assert_eq!(
            emit(&registry, user),
            "type User {\n\tactive: String!\n\tname: String\n}\n"
        );
    }

    #[test]
    fn test_list_override_with_non_null() {
        let mut registry = TypeRegistry::new();
        let long = primitive(&registry, PrimitiveType::Int64);
        let student = registry.add(TypeDef::object("Student").field(FieldDef::new("id", long)));
        let students = registry.sequence_of("List", student);
        let school = registry.add(
            TypeDef::object("School").accessor(
                AccessorDef::getter("getStudents", students)
                    .marker(Marker::List {
                        element: student,
                        element_non_null: true,
                    })
                    .marker(Marker::NonNull),
            ),
        );

        assert_eq!(
            emit(&registry, school),
            "type School {\n\tstudents: [Student!]!\n}\ntype Student {\n\tid: Int\n}\n"
        );
    }

    #[test]
    fn test_marker_precedence() {
        let mut registry = TypeRegistry::new();
        let int = primitive(&registry, PrimitiveType::Int32);
        let list_marker = Marker::List {
            element: int,
            element_non_null: false,
        };
        let ty = registry.add(
            TypeDef::object("Precedence")
                .field(
                    FieldDef::new("a", int)
                        .marker(list_marker.clone())
                        .marker(Marker::Scalar("Custom".to_string())),
                )
                .field(FieldDef::new("b", int).marker(Marker::Id))
                .field(FieldDef::new("c", int).marker(Marker::Id).marker(Marker::NonNull))
                .field(FieldDef::new("d", int).marker(list_marker).marker(Marker::Id)),
        );

        assert_eq!(
            emit(&registry, ty),
            "type Precedence {\n\ta: Custom\n\tb: ID\n\tc: ID!\n\td: ID\n}\n"
        );
    }

    #[test]
    fn test_cycle_terminates() {
        let mut registry = TypeRegistry::new();
        let node = registry.reserve("Node");
        let tree = registry.add(TypeDef::object("Tree").field(FieldDef::new("root", node)));
        registry.define(
            node,
            TypeDef::object("Node")
                .field(FieldDef::new("next", node))
                .field(FieldDef::new("tree", tree)),
        );

        assert_eq!(
            emit(&registry, node),
            "type Node {\n\tnext: Node\n\ttree: Tree\n}\ntype Tree {\n\troot: Node\n}\n"
        );
    }

    #[test]
    fn test_referenced_enum_and_scalar() {
        let mut registry = TypeRegistry::new();
        let rank = registry.add(TypeDef::enumeration("Rank", ["FIRST"]));
        let permission = registry.add(
            TypeDef::object("Permission").marker(Marker::Scalar("Permission".to_string())),
        );
        let user = registry.add(
            TypeDef::object("User")
                .field(FieldDef::new("rank", rank))
                .field(FieldDef::new("permission", permission)),
        );

        assert_eq!(
            emit(&registry, user),
            "type User {\n\trank: Rank\n\tpermission: Permission\n}\nenum Rank {\n\tFIRST\n}\nscalar Permission\n"
        );
    }

    #[test]
    fn test_trailing_blocks_in_discovery_order() {
        let mut registry = TypeRegistry::new();
        let names = ["Zeta", "Alpha", "Mid", "Beta"];
        let handles: Vec<_> = names
            .iter()
            .map(|name| registry.add(TypeDef::object(*name)))
            .collect();
        let mut root = TypeDef::object("Root");
        for (name, &handle) in names.iter().zip(&handles) {
            root = root.field(FieldDef::new(name.to_lowercase(), handle));
        }
        let root = registry.add(root);

        let output = emit(&registry, root);
        let positions: Vec<_> = names
            .iter()
            .map(|name| output.find(&format!("type {} {{", name)).expect("block present"))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_nested_arrays_and_char_arrays() {
        let mut registry = TypeRegistry::new();
        let chars = registry.array_of(primitive(&registry, PrimitiveType::Char));
        let ints = registry.array_of(primitive(&registry, PrimitiveType::Int32));
        let matrix = registry.array_of(ints);
        let ty = registry.add(
            TypeDef::object("Arrays")
                .field(FieldDef::new("chars", chars))
                .field(FieldDef::new("matrix", matrix)),
        );

        assert_eq!(
            emit(&registry, ty),
            "type Arrays {\n\tchars: String\n\tmatrix: [[Int]]\n}\n"
        );
    }

    #[test]
    fn test_unbound_iterable_degrades_to_name() {
        let mut registry = TypeRegistry::new();
        let iterable = registry.iterable();
        let bag = registry.add(
            TypeDef::object("Bag")
                .param("E")
                .extends(TypeRef::with_args(
                    iterable,
                    vec![TypeArg::Variable("E".to_string())],
                )),
        );
        let ty = registry.add(
            TypeDef::object("Holder")
                .field(FieldDef::new("bag", bag))
                .field(FieldDef::new("raw", iterable)),
        );

        assert_eq!(
            emit(&registry, ty),
            "type Holder {\n\tbag: [E]\n\traw: [T]\n}\n"
        );
    }

    #[test]
    fn test_accessor_filter_applied() {
        let mut registry = TypeRegistry::new();
        let int = primitive(&registry, PrimitiveType::Int32);
        let ty = registry.add(
            TypeDef::object("Service")
                .accessor(AccessorDef::getter("hashCode", int))
                .accessor(AccessorDef::new("find", vec![int], Some(int)))
                .accessor(AccessorDef::new("reset", Vec::new(), None))
                .accessor(AccessorDef::getter("size", int)),
        );

        assert_eq!(emit(&registry, ty), "type Service {\n\tsize: Int\n}\n");
    }

    #[test]
    fn test_accessors_named_like_trait_methods_kept() {
        let mut registry = TypeRegistry::new();
        let string = primitive(&registry, PrimitiveType::String);
        let commit = registry.add(
            TypeDef::object("Commit")
                .accessor(AccessorDef::getter("hash", string))
                .accessor(AccessorDef::getter("clone", string))
                .accessor(AccessorDef::getter("fmt", string))
                .accessor(AccessorDef::getter("getClass", string)),
        );

        assert_eq!(
            emit(&registry, commit),
            "type Commit {\n\thash: String\n\tclone: String\n\tfmt: String\n}\n"
        );
    }

    #[test]
    fn test_concurrent_emissions_share_provider() {
        let mut registry = TypeRegistry::new();
        let string = primitive(&registry, PrimitiveType::String);
        let person = registry.reserve("Person");
        let friends = registry.sequence_of("Vec", person);
        registry.define(
            person,
            TypeDef::object("Person")
                .field(FieldDef::new("name", string))
                .field(FieldDef::new("friends", friends)),
        );
        let group = registry.add(
            TypeDef::object("Group")
                .field(FieldDef::new("owner", person))
                .field(FieldDef::new("members", friends)),
        );

        let registry = &registry;
        let expected_person = emit(registry, person);
        let expected_group = emit(registry, group);

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|i| {
                    let root = if i % 2 == 0 { person } else { group };
                    scope.spawn(move || (root, crate::format_schema_type(registry, root)))
                })
                .collect();

            for handle in handles {
                let (root, sdl) = handle.join().expect("emission thread panicked");
                let expected = if root == person {
                    &expected_person
                } else {
                    &expected_group
                };
                assert_eq!(&sdl, expected);
            }
        });

        assert_eq!(
            expected_group,
            "type Group {\n\towner: Person\n\tmembers: [Person]\n}\n\
             type Person {\n\tname: String\n\tfriends: [Person]\n}\n"
        );
    }

    #[test]
    fn test_empty_object() {
        let mut registry = TypeRegistry::new();
        let ty = registry.add(TypeDef::object("Empty"));
        assert_eq!(emit(&registry, ty), "type Empty {\n}\n");
    }

    #[test]
    fn test_catalog_with_generic_list() {
        let xml = r#"<catalog>
    <object name="ArrayList" params="E">
        <extends type="Iterable" args="E"/>
    </object>
    <object name="RoleList">
        <extends type="ArrayList" args="Role"/>
    </object>
    <object name="Role">
        <field name="name" type="String"/>
        <field name="users" type="User[][]"/>
    </object>
    <object name="User">
        <field name="roles" type="RoleList"/>
    </object>
</catalog>"#;

        let catalog = parse_catalog(xml).expect("Failed to parse");
        let registry = TypeRegistry::from_catalog(&catalog).expect("Failed to resolve");
        let user = registry.resolve_type("User").expect("registered");

        assert_eq!(
            emit(&registry, user),
            "type User {\n\troles: [Role]\n}\ntype Role {\n\tname: String\n\tusers: [[User]]\n}\n"
        );
    }

    #[test]
    fn test_deterministic() {
        let mut registry = TypeRegistry::new();
        let string = primitive(&registry, PrimitiveType::String);
        let a = registry.add(TypeDef::object("A").field(FieldDef::new("s", string)));
        let b = registry.add(TypeDef::object("B").field(FieldDef::new("s", string)));
        let root = registry.add(
            TypeDef::object("Root")
                .field(FieldDef::new("b", b))
                .field(FieldDef::new("a", a)),
        );

        let first = emit(&registry, root);
        for _ in 0..10 {
            assert_eq!(emit(&registry, root), first);
        }
    }

    #[test]
    fn test_ledger() {
        let mut ledger = EmissionLedger::new();
        let ty = TypeHandle::from_index(7);
        assert!(ledger.is_empty());
        assert!(ledger.insert(ty));
        assert!(!ledger.insert(ty));
        assert!(ledger.contains(ty));
        assert_eq!(ledger.len(), 1);
    }
}
