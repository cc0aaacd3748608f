use std::collections::VecDeque;

use crate::{ClassId, Type, TypeStore};

/// Whether `sub` is `sup` or (transitively) extends or implements it. Type arguments are
/// ignored.
pub fn is_subclass(store: &TypeStore, sub: ClassId, sup: ClassId) -> bool {
    if sub == sup || sup == store.well_known().object {
        return true;
    }

    let mut queue = VecDeque::from([sub]);
    let mut seen = vec![sub];
    while let Some(id) = queue.pop_front() {
        for ty in store.direct_supertypes(id) {
            let Some(next) = ty.class_id() else {
                continue;
            };
            if next == sup {
                return true;
            }
            if !seen.contains(&next) {
                seen.push(next);
                queue.push_back(next);
            }
        }
    }
    false
}

/// Reference subtyping (`sub <: sup`), plus identity for primitives.
///
/// Parameterized types only have to agree on their arguments when both sides name the same
/// class and both carry arguments; raw types and different classes compare by erasure.
pub fn is_subtype(store: &TypeStore, sub: &Type, sup: &Type) -> bool {
    if sub == sup {
        return true;
    }

    match (sub, sup) {
        (Type::Null, sup) => sup.is_reference(),
        (Type::Unknown, sup) | (sup, Type::Unknown) => sup.is_reference(),
        (Type::Class(a), Type::Class(b)) => {
            if a.def == b.def {
                a.args.is_empty() || b.args.is_empty() || a.args == b.args
            } else {
                is_subclass(store, a.def, b.def)
            }
        }
        (Type::Array(a), Type::Array(b)) => {
            if a.is_primitive() || b.is_primitive() {
                a == b
            } else {
                is_subtype(store, a, b)
            }
        }
        (Type::Array(_), Type::Class(b)) => {
            let wk = store.well_known();
            b.def == wk.object || b.def == wk.cloneable || b.def == wk.serializable
        }
        _ => false,
    }
}
