//! Field, method and constructor lookup over the class hierarchy.

use std::collections::VecDeque;

use jexpr_types::{
    AccessModifier, ClassId, ConstructorDef, FieldDef, MethodDef, Type, TypeStore,
};

#[derive(Debug, Clone, Copy)]
pub(crate) struct FieldRef<'s> {
    pub owner: ClassId,
    pub def: &'s FieldDef,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct MethodRef<'s> {
    pub owner: ClassId,
    pub def: &'s MethodDef,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct ConstructorRef<'s> {
    pub owner: ClassId,
    pub def: &'s ConstructorDef,
}

/// `ty` itself followed by its supertypes, nearest first. Arrays and interfaces end in
/// `Object`.
pub(crate) fn hierarchy(store: &TypeStore, ty: &Type) -> Vec<ClassId> {
    let start = match ty {
        Type::Class(class) => class.def,
        Type::Array(_) => store.well_known().object,
        _ => return Vec::new(),
    };

    let mut order = Vec::new();
    let mut queue = VecDeque::from([start]);
    while let Some(id) = queue.pop_front() {
        if order.contains(&id) {
            continue;
        }
        order.push(id);
        for sup in store.direct_supertypes(id) {
            if let Some(next) = sup.class_id() {
                queue.push_back(next);
            }
        }
    }

    // Interfaces list `Object` as a supertype; keep it last.
    let object = store.well_known().object;
    if let Some(idx) = order.iter().position(|id| *id == object) {
        if idx + 1 != order.len() {
            order.remove(idx);
            order.push(object);
        }
    }
    order
}

/// Visible fields of `ty`. Fields hide same-named fields of supertypes.
pub(crate) fn fields<'s>(
    store: &'s TypeStore,
    ty: &Type,
    static_only: bool,
    minimum: AccessModifier,
) -> Vec<FieldRef<'s>> {
    let mut out: Vec<FieldRef<'s>> = Vec::new();
    for owner in hierarchy(store, ty) {
        let Some(def) = store.class(owner) else {
            continue;
        };
        for field in &def.fields {
            if out.iter().any(|f| f.def.name == field.name) {
                continue;
            }
            if (static_only && !field.is_static) || !field.access.satisfies(minimum) {
                continue;
            }
            out.push(FieldRef { owner, def: field });
        }
    }
    out
}

/// Visible methods of `ty`. Overrides shadow the methods they override.
pub(crate) fn methods<'s>(
    store: &'s TypeStore,
    ty: &Type,
    static_only: bool,
    minimum: AccessModifier,
) -> Vec<MethodRef<'s>> {
    let mut out: Vec<MethodRef<'s>> = Vec::new();
    let mut seen: Vec<&MethodDef> = Vec::new();
    for owner in hierarchy(store, ty) {
        let Some(def) = store.class(owner) else {
            continue;
        };
        for method in &def.methods {
            if seen.iter().any(|m| same_signature(m, method)) {
                continue;
            }
            seen.push(method);
            if (static_only && !method.is_static) || !method.access.satisfies(minimum) {
                continue;
            }
            out.push(MethodRef { owner, def: method });
        }
    }
    out
}

pub(crate) fn constructors(
    store: &TypeStore,
    class: ClassId,
    minimum: AccessModifier,
) -> Vec<ConstructorRef<'_>> {
    store
        .class(class)
        .map(|def| {
            def.constructors
                .iter()
                .filter(|ctor| ctor.access.satisfies(minimum))
                .map(|ctor| ConstructorRef { owner: class, def: ctor })
                .collect()
        })
        .unwrap_or_default()
}

/// The implementation `runtime_class` uses for `method`: the nearest override with a body.
pub(crate) fn find_override<'s>(
    store: &'s TypeStore,
    runtime_class: ClassId,
    method: &MethodDef,
) -> Option<MethodRef<'s>> {
    hierarchy(store, &Type::class(runtime_class, vec![]))
        .into_iter()
        .find_map(|owner| {
            let def = store.class(owner)?;
            def.methods
                .iter()
                .find(|m| m.body.is_some() && same_signature(m, method))
                .map(|def| MethodRef { owner, def })
        })
}

fn same_signature(a: &MethodDef, b: &MethodDef) -> bool {
    a.name == b.name
        && a.params.len() == b.params.len()
        && a
            .params
            .iter()
            .zip(&b.params)
            .all(|(x, y)| x.erasure() == y.erasure())
}
