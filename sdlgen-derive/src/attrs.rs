use proc_macro2::Span;
use syn::meta::ParseNestedMeta;
use syn::punctuated::Punctuated;
use syn::{Attribute, Error, LitStr, Path, Token, Type, spanned::Spanned};

/// `list(element = "...", element_non_null)`.
#[derive(Clone)]
pub(crate) struct ListAttr {
    pub(crate) element: Type,
    pub(crate) element_non_null: bool,
}

/// Markers accepted on fields and accessors.
#[derive(Clone, Default)]
pub(crate) struct MemberAttrs {
    pub(crate) scalar: Option<String>,
    pub(crate) list: Option<ListAttr>,
    pub(crate) non_null: bool,
    pub(crate) ignore: bool,
    pub(crate) id: bool,
}

#[derive(Clone, Default)]
pub(crate) struct FieldAttrs {
    pub(crate) rename: Option<String>,
    pub(crate) markers: MemberAttrs,
}

/// `accessor(name = "...", returns = "...", params = "...", <markers>)`.
#[derive(Clone)]
pub(crate) struct AccessorAttr {
    pub(crate) name: String,
    pub(crate) returns: Option<Type>,
    pub(crate) params: Vec<Type>,
    pub(crate) markers: MemberAttrs,
}

#[derive(Clone)]
pub(crate) struct ContainerAttrs {
    pub(crate) crate_path: Path,
    pub(crate) rename: Option<String>,
    pub(crate) scalar: Option<String>,
    pub(crate) accessors: Vec<AccessorAttr>,
}

impl Default for ContainerAttrs {
    fn default() -> Self {
        Self {
            crate_path: syn::parse_quote!(::sdlgen::schema),
            rename: None,
            scalar: None,
            accessors: Vec::new(),
        }
    }
}

#[derive(Clone, Default)]
pub(crate) struct VariantAttrs {
    pub(crate) rename: Option<String>,
}

fn parse_type(lit: &LitStr) -> syn::Result<Type> {
    syn::parse_str::<Type>(&lit.value())
        .map_err(|e| Error::new(lit.span(), format!("sdl: invalid type \"{}\": {e}", lit.value())))
}

fn parse_list(meta: &ParseNestedMeta<'_>) -> syn::Result<ListAttr> {
    let mut element = None;
    let mut element_non_null = false;

    meta.parse_nested_meta(|inner| {
        if inner.path.is_ident("element") {
            let v: LitStr = inner.value()?.parse()?;
            element = Some(parse_type(&v)?);
            return Ok(());
        }
        if inner.path.is_ident("element_non_null") {
            element_non_null = true;
            return Ok(());
        }
        Err(Error::new(
            inner.path.span(),
            "sdl: unsupported list(...) option",
        ))
    })?;

    let element = element.ok_or_else(|| {
        Error::new(
            meta.path.span(),
            "sdl: list(...) requires element = \"Type\"",
        )
    })?;
    Ok(ListAttr {
        element,
        element_non_null,
    })
}

/// Consumes a marker option. Returns false if `meta` is not a marker.
fn parse_marker(meta: &ParseNestedMeta<'_>, out: &mut MemberAttrs) -> syn::Result<bool> {
    if meta.path.is_ident("scalar") {
        let v: LitStr = meta.value()?.parse()?;
        out.scalar = Some(v.value());
    } else if meta.path.is_ident("list") {
        out.list = Some(parse_list(meta)?);
    } else if meta.path.is_ident("non_null") {
        out.non_null = true;
    } else if meta.path.is_ident("ignore") {
        out.ignore = true;
    } else if meta.path.is_ident("id") {
        out.id = true;
    } else {
        return Ok(false);
    }
    Ok(true)
}

fn parse_accessor(meta: &ParseNestedMeta<'_>) -> syn::Result<AccessorAttr> {
    let mut name = None;
    let mut returns = None;
    let mut params = Vec::new();
    let mut markers = MemberAttrs::default();

    meta.parse_nested_meta(|inner| {
        if inner.path.is_ident("name") {
            let v: LitStr = inner.value()?.parse()?;
            name = Some(v.value());
            return Ok(());
        }
        if inner.path.is_ident("returns") {
            let v: LitStr = inner.value()?.parse()?;
            returns = Some(parse_type(&v)?);
            return Ok(());
        }
        if inner.path.is_ident("params") {
            let v: LitStr = inner.value()?.parse()?;
            let parsed = v
                .parse_with(Punctuated::<Type, Token![,]>::parse_terminated)
                .map_err(|e| Error::new(v.span(), format!("sdl: invalid params: {e}")))?;
            params = parsed.into_iter().collect();
            return Ok(());
        }
        if parse_marker(&inner, &mut markers)? {
            return Ok(());
        }
        Err(Error::new(
            inner.path.span(),
            "sdl: unsupported accessor(...) option",
        ))
    })?;

    let name = name.ok_or_else(|| {
        Error::new(
            meta.path.span(),
            "sdl: accessor(...) requires name = \"...\"",
        )
    })?;
    Ok(AccessorAttr {
        name,
        returns,
        params,
        markers,
    })
}

pub(crate) fn parse_container_attrs(attrs: &[Attribute]) -> syn::Result<ContainerAttrs> {
    let mut out = ContainerAttrs::default();

    for attr in attrs {
        if !attr.path().is_ident("sdl") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("crate") {
                let v: LitStr = meta.value()?.parse()?;
                out.crate_path = syn::parse_str::<Path>(&v.value()).map_err(|e| {
                    Error::new(
                        v.span(),
                        format!("sdl: invalid path for #[sdl(crate = \"...\")]: {e}"),
                    )
                })?;
                return Ok(());
            }
            if meta.path.is_ident("rename") {
                let v: LitStr = meta.value()?.parse()?;
                out.rename = Some(v.value());
                return Ok(());
            }
            if meta.path.is_ident("scalar") {
                let v: LitStr = meta.value()?.parse()?;
                out.scalar = Some(v.value());
                return Ok(());
            }
            if meta.path.is_ident("accessor") {
                out.accessors.push(parse_accessor(&meta)?);
                return Ok(());
            }

            Err(Error::new(
                meta.path.span(),
                "sdl: unsupported #[sdl(...)] container attribute",
            ))
        })?;
    }

    Ok(out)
}

pub(crate) fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();

    for attr in attrs {
        if !attr.path().is_ident("sdl") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let v: LitStr = meta.value()?.parse()?;
                out.rename = Some(v.value());
                return Ok(());
            }
            if parse_marker(&meta, &mut out.markers)? {
                return Ok(());
            }

            Err(Error::new(
                meta.path.span(),
                "sdl: unsupported #[sdl(...)] field attribute",
            ))
        })?;
    }

    Ok(out)
}

pub(crate) fn parse_variant_attrs(attrs: &[Attribute]) -> syn::Result<VariantAttrs> {
    let mut out = VariantAttrs::default();

    for attr in attrs {
        if !attr.path().is_ident("sdl") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let v: LitStr = meta.value()?.parse()?;
                out.rename = Some(v.value());
                return Ok(());
            }

            Err(Error::new(
                meta.path.span(),
                "sdl: unsupported #[sdl(...)] variant attribute",
            ))
        })?;
    }

    Ok(out)
}

/// Error for an input shape the derive does not describe.
pub(crate) fn unsupported(span: Span, what: &str) -> Error {
    Error::new(span, format!("sdl: #[derive(SdlType)] does not support {what}"))
}
