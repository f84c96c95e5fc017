//! Type catalog declarations.
//!
//! A catalog is the unresolved form of a set of types as read from XML: type
//! references are still names. [`TypeRegistry::from_catalog`] resolves it.
//!
//! [`TypeRegistry::from_catalog`]: crate::registry::TypeRegistry::from_catalog

use std::collections::HashMap;

/// Complete type catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Type declarations in document order.
    pub types: Vec<TypeDecl>,
    /// Type lookup map (built during parsing).
    type_map: HashMap<String, usize>,
}

impl Catalog {
    /// Creates a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a type declaration to the catalog.
    ///
    /// The first declaration under a name wins lookups; duplicates are
    /// reported by validation.
    pub fn add_type(&mut self, decl: TypeDecl) {
        let name = decl.name().to_string();
        let index = self.types.len();
        self.types.push(decl);
        self.type_map.entry(name).or_insert(index);
    }

    /// Looks up a declaration by name.
    #[must_use]
    pub fn get_type(&self, name: &str) -> Option<&TypeDecl> {
        self.type_map.get(name).map(|&idx| &self.types[idx])
    }

    /// Returns true if a declaration with the given name exists.
    #[must_use]
    pub fn has_type(&self, name: &str) -> bool {
        self.type_map.contains_key(name)
    }

    /// Builds the type lookup map from the declarations vector.
    pub fn build_type_map(&mut self) {
        self.type_map.clear();
        for (idx, decl) in self.types.iter().enumerate() {
            self.type_map.entry(decl.name().to_string()).or_insert(idx);
        }
    }
}

/// Type declaration variants.
#[derive(Debug, Clone)]
pub enum TypeDecl {
    /// Object type declaration.
    Object(ObjectDecl),
    /// Enum type declaration.
    Enum(EnumDecl),
}

impl TypeDecl {
    /// Returns the declared name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Object(o) => &o.name,
            Self::Enum(e) => &e.name,
        }
    }

    /// Returns the declared type parameters.
    #[must_use]
    pub fn params(&self) -> &[String] {
        match self {
            Self::Object(o) => &o.params,
            Self::Enum(_) => &[],
        }
    }
}

/// Object type declaration.
#[derive(Debug, Clone, Default)]
pub struct ObjectDecl {
    /// Type name.
    pub name: String,
    /// Type parameter names.
    pub params: Vec<String>,
    /// Type-level scalar override.
    pub scalar: Option<String>,
    /// Declared fields.
    pub fields: Vec<FieldDecl>,
    /// Declared methods.
    pub accessors: Vec<AccessorDecl>,
    /// Supertypes.
    pub supertypes: Vec<SupertypeDecl>,
}

impl ObjectDecl {
    /// Creates a new object declaration.
    #[must_use]
    pub fn new(name: String) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }
}

/// Enum type declaration.
#[derive(Debug, Clone, Default)]
pub struct EnumDecl {
    /// Type name.
    pub name: String,
    /// Constants in declaration order.
    pub constants: Vec<String>,
    /// Type-level scalar override.
    pub scalar: Option<String>,
}

impl EnumDecl {
    /// Creates a new enum declaration.
    #[must_use]
    pub fn new(name: String) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }
}

/// Field declaration.
#[derive(Debug, Clone)]
pub struct FieldDecl {
    /// Field name.
    pub name: String,
    /// Type reference.
    pub type_name: String,
    /// Marker attributes.
    pub markers: MarkerDecl,
}

/// Method declaration.
#[derive(Debug, Clone)]
pub struct AccessorDecl {
    /// Method name.
    pub name: String,
    /// Return type reference, `None` for `void`.
    pub returns: Option<String>,
    /// Parameter type references.
    pub params: Vec<String>,
    /// Marker attributes.
    pub markers: MarkerDecl,
}

/// Supertype declaration.
#[derive(Debug, Clone)]
pub struct SupertypeDecl {
    /// Supertype reference.
    pub type_name: String,
    /// Type arguments: parameter names of the declaring type or type references.
    pub args: Vec<String>,
}

/// Marker attributes of a member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerDecl {
    /// `scalar="..."`.
    pub scalar: Option<String>,
    /// `listOf="..."`.
    pub list_of: Option<String>,
    /// `elementNonNull="true"`.
    pub element_non_null: bool,
    /// `nonNull="true"`.
    pub non_null: bool,
    /// `ignore="true"`.
    pub ignore: bool,
    /// `id="true"`.
    pub id: bool,
}

/// Splits a type reference into its base name and array depth.
///
/// `"Role[][]"` yields `("Role", 2)`.
#[must_use]
pub fn split_array_suffix(type_ref: &str) -> (&str, usize) {
    let mut base = type_ref.trim();
    let mut depth = 0;
    while let Some(stripped) = base.strip_suffix("[]") {
        base = stripped.trim_end();
        depth += 1;
    }
    (base, depth)
}
