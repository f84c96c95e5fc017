//! Accessor inclusion filter.

use sdlgen_schema::{AccessorDef, TypeMetadataProvider};

/// Returns true if an accessor contributes a field.
///
/// It must take no parameters, return a value, carry no `Ignore` marker and
/// not share a name with a root object method. The name check ignores
/// signatures.
pub fn include_accessor<P>(provider: &P, accessor: &AccessorDef) -> bool
where
    P: TypeMetadataProvider + ?Sized,
{
    accessor.params.is_empty()
        && accessor.returns.is_some()
        && !accessor.markers.is_ignored()
        && !provider
            .root_object_methods()
            .contains(&accessor.name.as_str())
}
