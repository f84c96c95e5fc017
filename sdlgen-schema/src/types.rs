//! Type metadata definitions.
//!
//! This module contains the structural description of host types consumed by
//! schema emission: primitive shapes, object and enum types, arrays, the
//! iterable capability, member descriptors and the markers attached to them.

use std::fmt;

/// Opaque, identity-comparable reference to a type held by a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeHandle(u32);

impl TypeHandle {
    /// Creates a handle from a registry slot index.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    /// Returns the registry slot index of this handle.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Primitive type shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// Boolean.
    Bool,
    /// Signed or unsigned 8-bit integer.
    Int8,
    /// Signed or unsigned 16-bit integer.
    Int16,
    /// Signed or unsigned 32-bit integer.
    Int32,
    /// Signed or unsigned 64-bit integer.
    Int64,
    /// Arbitrary-precision integer.
    BigInteger,
    /// 32-bit floating point.
    Float32,
    /// 64-bit floating point.
    Float64,
    /// Arbitrary-precision decimal.
    BigDecimal,
    /// Single character.
    Char,
    /// Character sequence.
    String,
}

impl PrimitiveType {
    /// All primitive shapes, in registration order.
    pub const ALL: [Self; 11] = [
        Self::Bool,
        Self::Int8,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::BigInteger,
        Self::Float32,
        Self::Float64,
        Self::BigDecimal,
        Self::Char,
        Self::String,
    ];

    /// Returns the canonical name the registry stores this primitive under.
    #[must_use]
    pub const fn canonical_name(&self) -> &'static str {
        match self {
            Self::Bool => "boolean",
            Self::Int8 => "byte",
            Self::Int16 => "short",
            Self::Int32 => "int",
            Self::Int64 => "long",
            Self::BigInteger => "BigInteger",
            Self::Float32 => "float",
            Self::Float64 => "double",
            Self::BigDecimal => "BigDecimal",
            Self::Char => "char",
            Self::String => "String",
        }
    }

    /// Parses a primitive from a catalog name.
    ///
    /// Accepts the canonical names, their boxed forms and the Rust spellings.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "boolean" | "Boolean" | "bool" => Some(Self::Bool),
            "byte" | "Byte" | "i8" | "u8" => Some(Self::Int8),
            "short" | "Short" | "i16" | "u16" => Some(Self::Int16),
            "int" | "Integer" | "i32" | "u32" => Some(Self::Int32),
            "long" | "Long" | "i64" | "u64" | "isize" | "usize" => Some(Self::Int64),
            "BigInteger" | "i128" | "u128" => Some(Self::BigInteger),
            "float" | "Float" | "f32" => Some(Self::Float32),
            "double" | "Double" | "f64" => Some(Self::Float64),
            "BigDecimal" => Some(Self::BigDecimal),
            "char" | "Character" => Some(Self::Char),
            "String" | "str" => Some(Self::String),
            _ => None,
        }
    }

    /// Returns true if this is an integer shape of any width.
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(
            self,
            Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64 | Self::BigInteger
        )
    }

    /// Returns true if this is a floating point or decimal shape.
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Self::Float32 | Self::Float64 | Self::BigDecimal)
    }

    /// Returns true if this is a character or text shape.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Char | Self::String)
    }
}

/// Structural kind of a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    /// Primitive shape.
    Primitive(PrimitiveType),
    /// Object type with members.
    Object,
    /// Enumerated type with its constants in declaration order.
    Enum(Vec<String>),
    /// Fixed-size homogeneous array of the component type.
    Array(TypeHandle),
    /// The generic "iterable of T" capability.
    Iterable,
}

/// A type argument bound in a supertype reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeArg {
    /// Statically known type.
    Concrete(TypeHandle),
    /// Type parameter of the declaring type, by name.
    Variable(String),
}

/// Supertype edge (extends/implements) with its bound type arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    /// Referenced supertype.
    pub target: TypeHandle,
    /// Type arguments, positionally matching the target's parameters.
    pub args: Vec<TypeArg>,
}

impl TypeRef {
    /// Creates a supertype reference without type arguments.
    #[must_use]
    pub fn new(target: TypeHandle) -> Self {
        Self {
            target,
            args: Vec::new(),
        }
    }

    /// Creates a supertype reference with the given arguments.
    #[must_use]
    pub fn with_args(target: TypeHandle, args: Vec<TypeArg>) -> Self {
        Self { target, args }
    }
}

/// Declarative marker attached to a member or a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marker {
    /// Emit `scalar <name>` for a type, or use `<name>` as a member's type token.
    Scalar(String),
    /// Emit the member as a list of `element`.
    List {
        /// Element type.
        element: TypeHandle,
        /// Whether the element carries `!`.
        element_non_null: bool,
    },
    /// Append `!` to the member's token.
    NonNull,
    /// Exclude the member from output.
    Ignore,
    /// Legacy identifier marker: bare `ID`, without an implied `!`.
    Id,
}

/// The set of markers attached to one member or type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markers(Vec<Marker>);

impl Markers {
    /// Creates an empty marker set.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Adds a marker.
    pub fn push(&mut self, marker: Marker) {
        self.0.push(marker);
    }

    /// Returns an iterator over the markers.
    pub fn iter(&self) -> impl Iterator<Item = &Marker> {
        self.0.iter()
    }

    /// Returns true if no markers are attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the scalar override name, if any.
    #[must_use]
    pub fn scalar(&self) -> Option<&str> {
        self.0.iter().find_map(|m| match m {
            Marker::Scalar(name) => Some(name.as_str()),
            _ => None,
        })
    }

    /// Returns the list override as `(element, element_non_null)`, if any.
    #[must_use]
    pub fn list(&self) -> Option<(TypeHandle, bool)> {
        self.0.iter().find_map(|m| match m {
            Marker::List {
                element,
                element_non_null,
            } => Some((*element, *element_non_null)),
            _ => None,
        })
    }

    /// Returns true if a `NonNull` marker is attached.
    #[must_use]
    pub fn is_non_null(&self) -> bool {
        self.0.contains(&Marker::NonNull)
    }

    /// Returns true if an `Ignore` marker is attached.
    #[must_use]
    pub fn is_ignored(&self) -> bool {
        self.0.contains(&Marker::Ignore)
    }

    /// Returns true if the legacy `Id` marker is attached.
    #[must_use]
    pub fn is_id(&self) -> bool {
        self.0.contains(&Marker::Id)
    }
}

impl FromIterator<Marker> for Markers {
    fn from_iter<I: IntoIterator<Item = Marker>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Declared member field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    /// Field name.
    pub name: String,
    /// Declared value type.
    pub ty: TypeHandle,
    /// Attached markers.
    pub markers: Markers,
}

impl FieldDef {
    /// Creates a new field without markers.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeHandle) -> Self {
        Self {
            name: name.into(),
            ty,
            markers: Markers::new(),
        }
    }

    /// Attaches a marker.
    #[must_use]
    pub fn marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }
}

/// Declared accessor method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessorDef {
    /// Method name.
    pub name: String,
    /// Parameter types.
    pub params: Vec<TypeHandle>,
    /// Return type, `None` when the method returns no value.
    pub returns: Option<TypeHandle>,
    /// Attached markers.
    pub markers: Markers,
}

impl AccessorDef {
    /// Creates a new method.
    #[must_use]
    pub fn new(name: impl Into<String>, params: Vec<TypeHandle>, returns: Option<TypeHandle>) -> Self {
        Self {
            name: name.into(),
            params,
            returns,
            markers: Markers::new(),
        }
    }

    /// Creates a zero-argument method returning `returns`.
    #[must_use]
    pub fn getter(name: impl Into<String>, returns: TypeHandle) -> Self {
        Self::new(name, Vec::new(), Some(returns))
    }

    /// Attaches a marker.
    #[must_use]
    pub fn marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }
}

/// Complete structural description of one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDef {
    /// Simple name.
    pub name: String,
    /// Structural kind.
    pub kind: TypeKind,
    /// Type parameter names, in declaration order.
    pub params: Vec<String>,
    /// Type-level markers.
    pub markers: Markers,
    /// Declared fields, in declaration order.
    pub fields: Vec<FieldDef>,
    /// Declared methods, in declaration order.
    pub accessors: Vec<AccessorDef>,
    /// Supertypes (extends first, then implements), in declaration order.
    pub supertypes: Vec<TypeRef>,
}

impl TypeDef {
    /// Creates a definition of the given kind with no members.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            params: Vec::new(),
            markers: Markers::new(),
            fields: Vec::new(),
            accessors: Vec::new(),
            supertypes: Vec::new(),
        }
    }

    /// Creates an empty object type definition.
    #[must_use]
    pub fn object(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Object)
    }

    /// Creates an enum type definition.
    #[must_use]
    pub fn enumeration<I, S>(name: impl Into<String>, constants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            name,
            TypeKind::Enum(constants.into_iter().map(Into::into).collect()),
        )
    }

    /// Adds a type parameter.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>) -> Self {
        self.params.push(name.into());
        self
    }

    /// Attaches a type-level marker.
    #[must_use]
    pub fn marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    /// Adds a field.
    #[must_use]
    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Adds a method.
    #[must_use]
    pub fn accessor(mut self, accessor: AccessorDef) -> Self {
        self.accessors.push(accessor);
        self
    }

    /// Adds a supertype.
    #[must_use]
    pub fn extends(mut self, supertype: TypeRef) -> Self {
        self.supertypes.push(supertype);
        self
    }

    /// Returns true if this is an enum type.
    #[must_use]
    pub const fn is_enum(&self) -> bool {
        matches!(self.kind, TypeKind::Enum(_))
    }

    /// Returns true if this is an array type.
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self.kind, TypeKind::Array(_))
    }

    /// Returns the primitive shape, if this is a primitive type.
    #[must_use]
    pub const fn primitive(&self) -> Option<PrimitiveType> {
        match self.kind {
            TypeKind::Primitive(p) => Some(p),
            _ => None,
        }
    }
}
