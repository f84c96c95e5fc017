//! XML type catalog parser.
//!
//! This module parses catalog documents into the unresolved [`Catalog`]
//! representation:
//!
//! ```xml
//! <catalog>
//!     <enum name="Rank"><constant name="FIRST"/></enum>
//!     <object name="User">
//!         <field name="name" type="String"/>
//!         <accessor name="getId" returns="long" scalar="ID" nonNull="true"/>
//!         <extends type="Person"/>
//!     </object>
//! </catalog>
//! ```

use crate::catalog::{
    AccessorDecl, Catalog, EnumDecl, FieldDecl, MarkerDecl, ObjectDecl, SupertypeDecl, TypeDecl,
};
use crate::error::ParseError;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Return type spelling for methods that produce no value.
const VOID: &str = "void";

/// Parses a type catalog from a string.
///
/// # Arguments
/// * `xml` - XML catalog content
///
/// # Returns
/// Parsed catalog or parse error.
///
/// # Errors
/// Returns `ParseError` if the XML is malformed or contains invalid catalog elements.
pub fn parse_catalog(xml: &str) -> Result<Catalog, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut catalog: Option<Catalog> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_bytes)?;
                match name {
                    "catalog" => catalog = Some(Catalog::new()),
                    "object" => {
                        let decl = parse_object(&mut reader, e)?;
                        in_catalog(&mut catalog, name)?.add_type(TypeDecl::Object(decl));
                    }
                    "enum" => {
                        let decl = parse_enum(&mut reader, e)?;
                        in_catalog(&mut catalog, name)?.add_type(TypeDecl::Enum(decl));
                    }
                    other => return Err(ParseError::unknown_element(other, "catalog")),
                }
            }
            Ok(Event::Empty(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_bytes)?;
                match name {
                    "catalog" => catalog = Some(Catalog::new()),
                    "object" => {
                        let decl = parse_object_attrs(e)?;
                        in_catalog(&mut catalog, name)?.add_type(TypeDecl::Object(decl));
                    }
                    "enum" => {
                        let decl = parse_enum_attrs(e)?;
                        in_catalog(&mut catalog, name)?.add_type(TypeDecl::Enum(decl));
                    }
                    other => return Err(ParseError::unknown_element(other, "catalog")),
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    let catalog = catalog.ok_or_else(|| ParseError::InvalidStructure {
        message: "No catalog element found".to_string(),
    })?;
    tracing::debug!("parsed catalog with {} type declarations", catalog.types.len());
    Ok(catalog)
}

/// Parses a type catalog from a file.
///
/// # Errors
/// Returns `ParseError` if the file cannot be read or parsed.
pub fn parse_catalog_file(path: &std::path::Path) -> Result<Catalog, ParseError> {
    let xml = std::fs::read_to_string(path)?;
    parse_catalog(&xml)
}

/// Returns the open catalog, or an error for a declaration outside one.
fn in_catalog<'c>(
    catalog: &'c mut Option<Catalog>,
    element: &str,
) -> Result<&'c mut Catalog, ParseError> {
    catalog.as_mut().ok_or_else(|| ParseError::InvalidStructure {
        message: format!("'{}' declared outside of a catalog element", element),
    })
}

/// Parses a boolean attribute value.
fn parse_bool(element: &str, attribute: &str, value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::invalid_attr(element, attribute, value)),
    }
}

/// Splits a comma-separated attribute value.
fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Applies a marker attribute. Returns false if `key` is not a marker attribute.
fn apply_marker_attr(
    markers: &mut MarkerDecl,
    element: &str,
    key: &str,
    value: &str,
) -> Result<bool, ParseError> {
    match key {
        "scalar" => markers.scalar = Some(value.to_string()),
        "listOf" => markers.list_of = Some(value.to_string()),
        "elementNonNull" => markers.element_non_null = parse_bool(element, key, value)?,
        "nonNull" => markers.non_null = parse_bool(element, key, value)?,
        "ignore" => markers.ignore = parse_bool(element, key, value)?,
        "id" => markers.id = parse_bool(element, key, value)?,
        _ => return Ok(false),
    }
    Ok(true)
}

/// Parses the attributes of an object element.
fn parse_object_attrs(e: &BytesStart<'_>) -> Result<ObjectDecl, ParseError> {
    let mut name = None;
    let mut params = Vec::new();
    let mut scalar = None;

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;

        match key {
            "name" => name = Some(value.to_string()),
            "params" => params = parse_list(value),
            "scalar" => scalar = Some(value.to_string()),
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr("object", "name"))?;
    let mut decl = ObjectDecl::new(name);
    decl.params = params;
    decl.scalar = scalar;
    Ok(decl)
}

/// Parses an object type declaration with members.
fn parse_object(reader: &mut Reader<&[u8]>, e: &BytesStart<'_>) -> Result<ObjectDecl, ParseError> {
    let mut decl = parse_object_attrs(e)?;
    let mut buf = Vec::new();
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                depth += 1;
                parse_member(&mut decl, e)?;
            }
            Ok(Event::Empty(ref e)) => parse_member(&mut decl, e)?,
            Ok(Event::End(_)) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Ok(Event::Eof) => {
                return Err(ParseError::InvalidStructure {
                    message: format!("unterminated object '{}'", decl.name),
                });
            }
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(decl)
}

/// Parses one member element of an object declaration.
fn parse_member(decl: &mut ObjectDecl, e: &BytesStart<'_>) -> Result<(), ParseError> {
    let name_bytes = e.name().as_ref().to_vec();
    let tag_name = std::str::from_utf8(&name_bytes)?;
    match tag_name {
        "field" => decl.fields.push(parse_field(e)?),
        "accessor" => decl.accessors.push(parse_accessor(e)?),
        "extends" => decl.supertypes.push(parse_supertype(e)?),
        other => {
            return Err(ParseError::unknown_element(
                other,
                format!("object '{}'", decl.name),
            ));
        }
    }
    Ok(())
}

/// Parses a field declaration.
fn parse_field(e: &BytesStart<'_>) -> Result<FieldDecl, ParseError> {
    let mut name = None;
    let mut type_name = None;
    let mut markers = MarkerDecl::default();

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;

        match key {
            "name" => name = Some(value.to_string()),
            "type" => type_name = Some(value.to_string()),
            _ => {
                apply_marker_attr(&mut markers, "field", key, value)?;
            }
        }
    }

    Ok(FieldDecl {
        name: name.ok_or_else(|| ParseError::missing_attr("field", "name"))?,
        type_name: type_name.ok_or_else(|| ParseError::missing_attr("field", "type"))?,
        markers,
    })
}

/// Parses an accessor declaration.
fn parse_accessor(e: &BytesStart<'_>) -> Result<AccessorDecl, ParseError> {
    let mut name = None;
    let mut returns = None;
    let mut params = Vec::new();
    let mut markers = MarkerDecl::default();

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;

        match key {
            "name" => name = Some(value.to_string()),
            "returns" if value == VOID => returns = None,
            "returns" => returns = Some(value.to_string()),
            "params" => params = parse_list(value),
            _ => {
                apply_marker_attr(&mut markers, "accessor", key, value)?;
            }
        }
    }

    Ok(AccessorDecl {
        name: name.ok_or_else(|| ParseError::missing_attr("accessor", "name"))?,
        returns,
        params,
        markers,
    })
}

/// Parses a supertype declaration.
fn parse_supertype(e: &BytesStart<'_>) -> Result<SupertypeDecl, ParseError> {
    let mut type_name = None;
    let mut args = Vec::new();

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;

        match key {
            "type" => type_name = Some(value.to_string()),
            "args" => args = parse_list(value),
            _ => {}
        }
    }

    Ok(SupertypeDecl {
        type_name: type_name.ok_or_else(|| ParseError::missing_attr("extends", "type"))?,
        args,
    })
}

/// Parses the attributes of an enum element.
fn parse_enum_attrs(e: &BytesStart<'_>) -> Result<EnumDecl, ParseError> {
    let mut name = None;
    let mut scalar = None;

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;

        match key {
            "name" => name = Some(value.to_string()),
            "scalar" => scalar = Some(value.to_string()),
            _ => {}
        }
    }

    let mut decl = EnumDecl::new(name.ok_or_else(|| ParseError::missing_attr("enum", "name"))?);
    decl.scalar = scalar;
    Ok(decl)
}

/// Parses an enum type declaration with constants.
fn parse_enum(reader: &mut Reader<&[u8]>, e: &BytesStart<'_>) -> Result<EnumDecl, ParseError> {
    let mut decl = parse_enum_attrs(e)?;
    let mut buf = Vec::new();
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                depth += 1;
                decl.constants.push(parse_constant(&decl.name, e)?);
            }
            Ok(Event::Empty(ref e)) => decl.constants.push(parse_constant(&decl.name, e)?),
            Ok(Event::End(_)) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Ok(Event::Eof) => {
                return Err(ParseError::InvalidStructure {
                    message: format!("unterminated enum '{}'", decl.name),
                });
            }
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(decl)
}

/// Parses an enum constant.
fn parse_constant(enum_name: &str, e: &BytesStart<'_>) -> Result<String, ParseError> {
    let name_bytes = e.name().as_ref().to_vec();
    let tag_name = std::str::from_utf8(&name_bytes)?;
    if tag_name != "constant" {
        return Err(ParseError::unknown_element(
            tag_name,
            format!("enum '{}'", enum_name),
        ));
    }

    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == b"name" {
            return Ok(std::str::from_utf8(&attr.value)?.to_string());
        }
    }

    Err(ParseError::missing_attr("constant", "name"))
}
