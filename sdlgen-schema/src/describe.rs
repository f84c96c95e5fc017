//! Native type descriptions.
//!
//! [`Describe`] maps a Rust type onto registry metadata. It is implemented
//! here for primitives, strings, standard containers and smart pointers, and
//! derived for user structs and enums by `#[derive(SdlType)]`.

use crate::registry::TypeRegistry;
use crate::types::{PrimitiveType, TypeHandle};
use std::any::TypeId;
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

/// A Rust type that can describe itself to a [`TypeRegistry`].
pub trait Describe: 'static {
    /// Registers this type's metadata and returns its handle.
    ///
    /// Implementations describing types with members should reserve and
    /// bind their own handle before describing member types, so that
    /// self-referential types terminate.
    fn describe(registry: &mut TypeRegistry) -> TypeHandle;

    /// Returns the handle of this type, describing it on first use.
    fn register(registry: &mut TypeRegistry) -> TypeHandle
    where
        Self: Sized,
    {
        let id = TypeId::of::<Self>();
        if let Some(handle) = registry.native(id) {
            return handle;
        }
        let handle = Self::describe(registry);
        registry.bind_native(id, handle);
        handle
    }

    /// Returns the handle used when this type is a method's return type,
    /// `None` for types that carry no value.
    fn returns(registry: &mut TypeRegistry) -> Option<TypeHandle>
    where
        Self: Sized,
    {
        Some(Self::register(registry))
    }
}

macro_rules! impl_describe_primitive {
    ($($ty:ty => $prim:ident),* $(,)?) => {
        $(
            impl Describe for $ty {
                fn describe(registry: &mut TypeRegistry) -> TypeHandle {
                    registry.primitive(PrimitiveType::$prim)
                }
            }
        )*
    };
}

impl_describe_primitive! {
    bool => Bool,
    i8 => Int8,
    u8 => Int8,
    i16 => Int16,
    u16 => Int16,
    i32 => Int32,
    u32 => Int32,
    i64 => Int64,
    u64 => Int64,
    isize => Int64,
    usize => Int64,
    i128 => BigInteger,
    u128 => BigInteger,
    f32 => Float32,
    f64 => Float64,
    char => Char,
    String => String,
    &'static str => String,
    Cow<'static, str> => String,
}

macro_rules! impl_describe_transparent {
    ($($wrapper:ident),*) => {
        $(
            impl<T: Describe> Describe for $wrapper<T> {
                fn describe(registry: &mut TypeRegistry) -> TypeHandle {
                    T::register(registry)
                }
            }
        )*
    };
}

impl_describe_transparent!(Option, Box, Rc, Arc);

macro_rules! impl_describe_sequence {
    ($($seq:ident),*) => {
        $(
            impl<T: Describe> Describe for $seq<T> {
                fn describe(registry: &mut TypeRegistry) -> TypeHandle {
                    let element = T::register(registry);
                    registry.sequence_of(stringify!($seq), element)
                }
            }
        )*
    };
}

impl_describe_sequence!(Vec, VecDeque, LinkedList, BTreeSet);

impl<T: Describe, S: 'static> Describe for HashSet<T, S> {
    fn describe(registry: &mut TypeRegistry) -> TypeHandle {
        let element = T::register(registry);
        registry.sequence_of("HashSet", element)
    }
}

impl<T: Describe, const N: usize> Describe for [T; N] {
    fn describe(registry: &mut TypeRegistry) -> TypeHandle {
        let component = T::register(registry);
        registry.array_of(component)
    }
}

// Maps have no list or object shape of their own.
impl<K: 'static, V: 'static, S: 'static> Describe for HashMap<K, V, S> {
    fn describe(registry: &mut TypeRegistry) -> TypeHandle {
        registry.opaque("HashMap")
    }
}

impl<K: 'static, V: 'static> Describe for BTreeMap<K, V> {
    fn describe(registry: &mut TypeRegistry) -> TypeHandle {
        registry.opaque("BTreeMap")
    }
}

impl Describe for () {
    fn describe(registry: &mut TypeRegistry) -> TypeHandle {
        registry.opaque("()")
    }

    fn returns(_registry: &mut TypeRegistry) -> Option<TypeHandle> {
        None
    }
}
