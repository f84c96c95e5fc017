//! Catalog validation utilities.
//!
//! This module checks a parsed [`Catalog`] for consistency before it is
//! resolved into a registry.

use crate::catalog::{Catalog, MarkerDecl, ObjectDecl, SupertypeDecl, TypeDecl, split_array_suffix};
use crate::error::CatalogError;
use crate::registry::ITERABLE;
use crate::types::PrimitiveType;
use std::collections::HashSet;

/// Validates a parsed catalog for correctness.
///
/// # Arguments
/// * `catalog` - The catalog to validate
///
/// # Returns
/// Ok(()) if valid, or CatalogError describing the issue.
///
/// # Errors
/// Returns `CatalogError` if validation fails.
pub fn validate_catalog(catalog: &Catalog) -> Result<(), CatalogError> {
    validate_names(catalog)?;
    for decl in &catalog.types {
        match decl {
            TypeDecl::Object(object) => validate_object(catalog, object)?,
            TypeDecl::Enum(enum_decl) => {
                let mut seen = HashSet::new();
                for constant in &enum_decl.constants {
                    if !seen.insert(constant) {
                        return Err(CatalogError::duplicate(
                            "enum constant",
                            format!("{}.{}", enum_decl.name, constant),
                        ));
                    }
                }
            }
        }
    }
    Ok(())
}

/// Returns true if `name` is provided by every registry.
fn is_builtin(name: &str) -> bool {
    name == ITERABLE || PrimitiveType::from_name(name).is_some()
}

/// Validates that type names are unique and do not shadow built-ins.
fn validate_names(catalog: &Catalog) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for decl in &catalog.types {
        let name = decl.name();
        if name.is_empty() || name.contains("[]") {
            return Err(CatalogError::Validation {
                message: format!("invalid type name '{}'", name),
            });
        }
        if is_builtin(name) || !seen.insert(name) {
            return Err(CatalogError::duplicate("type", name));
        }
    }
    Ok(())
}

/// Validates that a type reference resolves.
fn validate_ref(catalog: &Catalog, type_ref: &str, context: &str) -> Result<(), CatalogError> {
    let (base, _) = split_array_suffix(type_ref);
    if is_builtin(base) || catalog.has_type(base) {
        Ok(())
    } else {
        Err(CatalogError::unknown_type(base, context))
    }
}

/// Validates the type references carried by marker attributes.
fn validate_markers(
    catalog: &Catalog,
    markers: &MarkerDecl,
    context: &str,
) -> Result<(), CatalogError> {
    if let Some(element) = &markers.list_of {
        validate_ref(catalog, element, context)?;
    }
    if markers.scalar.as_deref().is_some_and(str::is_empty) {
        return Err(CatalogError::Validation {
            message: format!("empty scalar name on {}", context),
        });
    }
    Ok(())
}

/// Validates an object type declaration.
fn validate_object(catalog: &Catalog, object: &ObjectDecl) -> Result<(), CatalogError> {
    let mut params = HashSet::new();
    for param in &object.params {
        if !params.insert(param) {
            return Err(CatalogError::duplicate(
                "type parameter",
                format!("{}<{}>", object.name, param),
            ));
        }
    }

    let mut fields = HashSet::new();
    for field in &object.fields {
        if !fields.insert(&field.name) {
            return Err(CatalogError::duplicate(
                "field",
                format!("{}.{}", object.name, field.name),
            ));
        }
        let context = format!("field '{}.{}'", object.name, field.name);
        validate_ref(catalog, &field.type_name, &context)?;
        validate_markers(catalog, &field.markers, &context)?;
    }

    for accessor in &object.accessors {
        let context = format!("accessor '{}.{}'", object.name, accessor.name);
        if let Some(returns) = &accessor.returns {
            validate_ref(catalog, returns, &context)?;
        }
        for param in &accessor.params {
            validate_ref(catalog, param, &context)?;
        }
        validate_markers(catalog, &accessor.markers, &context)?;
    }

    for supertype in &object.supertypes {
        validate_supertype(catalog, object, supertype)?;
    }

    Ok(())
}

/// Validates a supertype edge: the target must be an object type or the
/// iterable capability, and its arity must match.
fn validate_supertype(
    catalog: &Catalog,
    object: &ObjectDecl,
    supertype: &SupertypeDecl,
) -> Result<(), CatalogError> {
    let context = format!("supertype of '{}'", object.name);
    let target = supertype.type_name.trim();

    let expected = if target == ITERABLE {
        1
    } else {
        match catalog.get_type(target) {
            Some(TypeDecl::Object(parent)) => parent.params.len(),
            Some(TypeDecl::Enum(_)) => {
                return Err(CatalogError::Validation {
                    message: format!("'{}' cannot extend enum '{}'", object.name, target),
                });
            }
            None if is_builtin(target) || split_array_suffix(target).1 > 0 => {
                return Err(CatalogError::Validation {
                    message: format!("'{}' cannot extend '{}'", object.name, target),
                });
            }
            None => return Err(CatalogError::unknown_type(target, context)),
        }
    };

    if supertype.args.len() != expected {
        return Err(CatalogError::ArityMismatch {
            type_name: target.to_string(),
            expected,
            found: supertype.args.len(),
        });
    }

    for arg in &supertype.args {
        if !object.params.contains(arg) {
            validate_ref(catalog, arg, &context)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_catalog;

    fn validate(xml: &str) -> Result<(), CatalogError> {
        let catalog = parse_catalog(xml).expect("Failed to parse");
        validate_catalog(&catalog)
    }

    #[test]
    fn test_valid_catalog() {
        let xml = r#"<catalog>
    <enum name="Rank"><constant name="FIRST"/><constant name="SECOND"/></enum>
    <object name="ArrayList" params="E">
        <extends type="Iterable" args="E"/>
    </object>
    <object name="User">
        <field name="rank" type="Rank"/>
        <field name="friends" type="User[]"/>
        <accessor name="getTags" returns="ArrayList" listOf="String"/>
        <accessor name="find" returns="User" params="long"/>
    </object>
    <object name="Users">
        <extends type="ArrayList" args="User"/>
    </object>
</catalog>"#;
        assert!(validate(xml).is_ok());
    }

    #[test]
    fn test_duplicate_type() {
        let xml = r#"<catalog><object name="A"/><enum name="A"/></catalog>"#;
        assert!(matches!(
            validate(xml),
            Err(CatalogError::DuplicateDefinition { ref name, .. }) if name == "A"
        ));
    }

    #[test]
    fn test_builtin_name_clash() {
        let xml = r#"<catalog><object name="String"/></catalog>"#;
        assert!(matches!(
            validate(xml),
            Err(CatalogError::DuplicateDefinition { .. })
        ));
    }

    #[test]
    fn test_duplicate_enum_constant() {
        let xml = r#"<catalog><enum name="E"><constant name="A"/><constant name="A"/></enum></catalog>"#;
        assert!(matches!(
            validate(xml),
            Err(CatalogError::DuplicateDefinition { ref kind, .. }) if kind == "enum constant"
        ));
    }

    #[test]
    fn test_duplicate_field() {
        let xml = r#"<catalog><object name="A">
    <field name="x" type="int"/>
    <field name="x" type="long"/>
</object></catalog>"#;
        assert!(matches!(
            validate(xml),
            Err(CatalogError::DuplicateDefinition { ref kind, .. }) if kind == "field"
        ));
    }

    #[test]
    fn test_unknown_list_element() {
        let xml = r#"<catalog><object name="A">
    <accessor name="getItems" returns="A" listOf="Missing"/>
</object></catalog>"#;
        assert!(matches!(
            validate(xml),
            Err(CatalogError::UnknownType { ref type_name, .. }) if type_name == "Missing"
        ));
    }

    #[test]
    fn test_supertype_arity() {
        let xml = r#"<catalog><object name="A"><extends type="Iterable"/></object></catalog>"#;
        assert!(matches!(
            validate(xml),
            Err(CatalogError::ArityMismatch {
                expected: 1,
                found: 0,
                ..
            })
        ));
    }

    #[test]
    fn test_supertype_enum_rejected() {
        let xml = r#"<catalog>
    <enum name="E"/>
    <object name="A"><extends type="E"/></object>
</catalog>"#;
        assert!(matches!(validate(xml), Err(CatalogError::Validation { .. })));
    }

    #[test]
    fn test_supertype_unknown_arg() {
        let xml = r#"<catalog>
    <object name="A" params="T"><extends type="Iterable" args="U"/></object>
</catalog>"#;
        assert!(matches!(
            validate(xml),
            Err(CatalogError::UnknownType { ref type_name, .. }) if type_name == "U"
        ));
    }
}
