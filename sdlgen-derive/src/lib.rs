//! # sdlgen Derive
//!
//! Procedural macro describing Rust types to an sdlgen type registry.
//!
//! `#[derive(SdlType)]` implements `Describe` for structs with named fields
//! and for enums whose variants carry no data.

mod attrs;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    Data, DataEnum, DataStruct, DeriveInput, Fields, GenericParam, Path, parse_macro_input,
    spanned::Spanned,
};

use crate::attrs::{
    ContainerAttrs, MemberAttrs, parse_container_attrs, parse_field_attrs, parse_variant_attrs,
    unsupported,
};

/// Derives `Describe` for a struct or a fieldless enum.
///
/// # Example
/// ```ignore
/// #[derive(SdlType)]
/// #[sdl(accessor(name = "getId", returns = "u64", scalar = "ID", non_null))]
/// struct User {
///     name: String,
///     age: i32,
///     #[sdl(ignore)]
///     password: String,
/// }
/// ```
///
/// Container options: `scalar = "..."`, `rename = "..."`, `crate = "..."`,
/// `accessor(name = "...", returns = "...", params = "...", <markers>)`.
/// Field options: `scalar = "..."`, `list(element = "...", element_non_null)`,
/// `non_null`, `ignore`, `id`, `rename = "..."`.
///
/// Ignored fields are left out of the description, so their types need not
/// implement `Describe`.
#[proc_macro_derive(SdlType, attributes(sdl))]
pub fn derive_sdl_type(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand_sdl_type(&input) {
        Ok(ts) => ts.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn expand_sdl_type(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let ident = &input.ident;

    if let Some(lifetime) = input.generics.lifetimes().next() {
        return Err(unsupported(lifetime.span(), "lifetime parameters"));
    }

    let container = parse_container_attrs(&input.attrs)?;
    let sc = &container.crate_path;

    let mut generics = input.generics.clone();
    for param in &mut generics.params {
        if let GenericParam::Type(ty) = param {
            ty.bounds.push(syn::parse_quote!(#sc::Describe));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let body = match &input.data {
        Data::Struct(ds) => describe_struct(ds, &container, &ident.to_string())?,
        Data::Enum(de) => describe_enum(de, &container, &ident.to_string())?,
        Data::Union(u) => return Err(unsupported(u.union_token.span(), "unions")),
    };

    Ok(quote! {
        impl #impl_generics #sc::Describe for #ident #ty_generics #where_clause {
            fn describe(registry: &mut #sc::TypeRegistry) -> #sc::TypeHandle {
                #body
            }
        }
    })
}

/// Marker constructor expressions for one member.
fn marker_exprs(markers: &MemberAttrs, sc: &Path) -> Vec<TokenStream2> {
    let mut out = Vec::new();
    if let Some(name) = &markers.scalar {
        out.push(quote! { #sc::Marker::Scalar(::std::string::String::from(#name)) });
    }
    if let Some(list) = &markers.list {
        let element = &list.element;
        let element_non_null = list.element_non_null;
        out.push(quote! {
            #sc::Marker::List {
                element: <#element as #sc::Describe>::register(registry),
                element_non_null: #element_non_null,
            }
        });
    }
    if markers.non_null {
        out.push(quote! { #sc::Marker::NonNull });
    }
    if markers.ignore {
        out.push(quote! { #sc::Marker::Ignore });
    }
    if markers.id {
        out.push(quote! { #sc::Marker::Id });
    }
    out
}

fn describe_struct(
    ds: &DataStruct,
    container: &ContainerAttrs,
    default_name: &str,
) -> syn::Result<TokenStream2> {
    let sc = &container.crate_path;
    let name = container.rename.as_deref().unwrap_or(default_name);

    let named = match &ds.fields {
        Fields::Named(fields) => Some(&fields.named),
        Fields::Unit => None,
        Fields::Unnamed(fields) => return Err(unsupported(fields.span(), "tuple structs")),
    };

    let mut statements = Vec::new();

    if let Some(scalar) = &container.scalar {
        statements.push(quote! {
            def = def.marker(#sc::Marker::Scalar(::std::string::String::from(#scalar)));
        });
    }

    for field in named.into_iter().flatten() {
        let attrs = parse_field_attrs(&field.attrs)?;
        if attrs.markers.ignore {
            continue;
        }
        let ty = &field.ty;
        let field_name = match (&attrs.rename, &field.ident) {
            (Some(rename), _) => rename.clone(),
            (None, Some(ident)) => ident.to_string(),
            (None, None) => return Err(unsupported(field.span(), "unnamed fields")),
        };
        let markers = marker_exprs(&attrs.markers, sc);
        statements.push(quote! {
            let ty = <#ty as #sc::Describe>::register(registry);
            def = def.field(#sc::FieldDef::new(#field_name, ty) #(.marker(#markers))*);
        });
    }

    for accessor in &container.accessors {
        let accessor_name = &accessor.name;
        let params = &accessor.params;
        let returns = match &accessor.returns {
            Some(ty) => quote! { <#ty as #sc::Describe>::returns(registry) },
            None => quote! { ::std::option::Option::None },
        };
        let markers = marker_exprs(&accessor.markers, sc);
        statements.push(quote! {
            let params = ::std::vec![#(<#params as #sc::Describe>::register(registry)),*];
            let returns = #returns;
            def = def.accessor(#sc::AccessorDef::new(#accessor_name, params, returns) #(.marker(#markers))*);
        });
    }

    Ok(quote! {
        let handle = registry.reserve(#name);
        registry.bind_native(::std::any::TypeId::of::<Self>(), handle);
        #[allow(unused_mut)]
        let mut def = #sc::TypeDef::object(#name);
        #(#statements)*
        registry.define(handle, def);
        handle
    })
}

fn describe_enum(
    de: &DataEnum,
    container: &ContainerAttrs,
    default_name: &str,
) -> syn::Result<TokenStream2> {
    let sc = &container.crate_path;
    let name = container.rename.as_deref().unwrap_or(default_name);

    if !container.accessors.is_empty() {
        return Err(unsupported(de.enum_token.span(), "accessors on enums"));
    }

    let mut constants = Vec::new();
    for variant in &de.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(unsupported(variant.span(), "enum variants with data"));
        }
        let attrs = parse_variant_attrs(&variant.attrs)?;
        constants.push(attrs.rename.unwrap_or_else(|| variant.ident.to_string()));
    }

    let scalar = container.scalar.as_ref().map(|scalar| {
        quote! { .marker(#sc::Marker::Scalar(::std::string::String::from(#scalar))) }
    });

    let constants = if constants.is_empty() {
        quote! { ::std::iter::empty::<&str>() }
    } else {
        quote! { [#(#constants),*] }
    };

    Ok(quote! {
        registry.add(#sc::TypeDef::enumeration(#name, #constants) #scalar)
    })
}
