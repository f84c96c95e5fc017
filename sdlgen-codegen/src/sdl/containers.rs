//! Array and sequence detection.

use sdlgen_schema::{TypeArg, TypeHandle, TypeKind, TypeMetadataProvider};
use std::collections::HashMap;

/// Element of a container type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerElement {
    /// Statically known element type.
    Resolved(TypeHandle),
    /// Element bound to a type variable that never became concrete; carries
    /// the variable's declared name.
    Unresolved(String),
}

/// Returns the element of an array or iterable type, or `None` for
/// non-containers.
///
/// Sequence detection walks the extension chain and stops at the first link
/// reaching the iterable capability. Type arguments are substituted through
/// each link's parameters on the way, so `RoleList extends ArrayList<Role>`
/// and `ArrayList<E> extends Iterable<E>` resolve to `Role`.
pub fn as_container<P>(provider: &P, ty: TypeHandle) -> Option<ContainerElement>
where
    P: TypeMetadataProvider + ?Sized,
{
    let def = provider.type_def(ty);
    match def.kind {
        TypeKind::Array(component) => return Some(ContainerElement::Resolved(component)),
        TypeKind::Iterable => return Some(unbound(&def.params, &def.name)),
        _ => {}
    }

    let mut bindings: HashMap<&str, TypeArg> = HashMap::new();
    for link in provider.extension_chain(ty) {
        let bound: Vec<TypeArg> = link
            .args
            .iter()
            .map(|arg| match arg {
                TypeArg::Variable(name) => bindings
                    .get(name.as_str())
                    .cloned()
                    .unwrap_or_else(|| arg.clone()),
                TypeArg::Concrete(_) => arg.clone(),
            })
            .collect();

        let target = provider.type_def(link.target);
        if target.kind == TypeKind::Iterable {
            return Some(match bound.into_iter().next() {
                Some(TypeArg::Concrete(element)) => ContainerElement::Resolved(element),
                Some(TypeArg::Variable(name)) => ContainerElement::Unresolved(name),
                None => unbound(&target.params, &target.name),
            });
        }

        bindings = target.params.iter().map(String::as_str).zip(bound).collect();
    }

    None
}

/// Element of an iterable whose parameter is never bound.
fn unbound(params: &[String], fallback: &str) -> ContainerElement {
    ContainerElement::Unresolved(params.first().map_or(fallback, String::as_str).to_string())
}
