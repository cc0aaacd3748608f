use crate::java::subtyping::is_subtype;
use crate::{PrimitiveType, Type, TypeStore};

/// How well a value of one type fits a slot of another type.
///
/// Ordered best first. Anything but [`TypeMatch::None`] is an implicit (assignment or loose
/// invocation) conversion; narrowing is never implicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeMatch {
    Full,
    Inheritance,
    PrimitiveWidening,
    Boxed,
    BoxedAndWidening,
    BoxedAndInheritance,
    None,
}

impl TypeMatch {
    pub fn is_match(self) -> bool {
        self != TypeMatch::None
    }
}

/// Rate the implicit conversion of a value of type `from` into a slot of type `to`.
pub fn rate_type_match(store: &TypeStore, from: &Type, to: &Type) -> TypeMatch {
    if from == to {
        return TypeMatch::Full;
    }

    match (from, to) {
        (Type::Void, _) | (_, Type::Void) => TypeMatch::None,
        (Type::Unknown, _) | (_, Type::Unknown) => TypeMatch::Inheritance,
        (Type::Null, to) => {
            if to.is_reference() {
                TypeMatch::Inheritance
            } else {
                TypeMatch::None
            }
        }
        (Type::Primitive(from), Type::Primitive(to)) => {
            if from.widens_to(*to) {
                TypeMatch::PrimitiveWidening
            } else {
                TypeMatch::None
            }
        }
        (Type::Primitive(from), to) => {
            let boxed = store.boxed_type(*from);
            if &boxed == to {
                TypeMatch::Boxed
            } else if is_subtype(store, &boxed, to) {
                TypeMatch::BoxedAndInheritance
            } else {
                TypeMatch::None
            }
        }
        (from, Type::Primitive(to)) => match store.unboxed_type(from) {
            Some(unboxed) if unboxed == *to => TypeMatch::Boxed,
            Some(unboxed) if unboxed.widens_to(*to) => TypeMatch::BoxedAndWidening,
            _ => TypeMatch::None,
        },
        (from, to) => {
            if is_subtype(store, from, to) {
                TypeMatch::Inheritance
            } else {
                TypeMatch::None
            }
        }
    }
}

/// Whether an explicit cast from `from` to `to` is legal at compile time.
///
/// Reference casts are allowed in both directions along the hierarchy and whenever an
/// interface is involved; the runtime check happens during evaluation.
pub fn is_castable(store: &TypeStore, from: &Type, to: &Type) -> bool {
    if from == to {
        return true;
    }

    match (from, to) {
        (Type::Void, _) | (_, Type::Void) => false,
        (Type::Primitive(a), Type::Primitive(b)) => {
            (*a == PrimitiveType::Boolean) == (*b == PrimitiveType::Boolean)
        }
        (Type::Primitive(_), _) | (_, Type::Primitive(_)) => {
            rate_type_match(store, from, to).is_match()
        }
        (Type::Null | Type::Unknown, _) | (_, Type::Unknown) => true,
        (Type::Class(a), Type::Class(b)) => {
            let is_interface = |id| {
                store
                    .class(id)
                    .is_some_and(|def| def.kind == crate::ClassKind::Interface)
            };
            is_subtype(store, from, to)
                || is_subtype(store, to, from)
                || is_interface(a.def)
                || is_interface(b.def)
        }
        _ => is_subtype(store, from, to) || is_subtype(store, to, from),
    }
}

/// Binary numeric promotion (JLS 5.6.2). `None` when either side is not numeric after
/// unboxing.
pub fn binary_numeric_promotion(store: &TypeStore, a: &Type, b: &Type) -> Option<PrimitiveType> {
    let a = numeric_of(store, a)?;
    let b = numeric_of(store, b)?;
    let promoted = if a == PrimitiveType::Double || b == PrimitiveType::Double {
        PrimitiveType::Double
    } else if a == PrimitiveType::Float || b == PrimitiveType::Float {
        PrimitiveType::Float
    } else if a == PrimitiveType::Long || b == PrimitiveType::Long {
        PrimitiveType::Long
    } else {
        PrimitiveType::Int
    };
    Some(promoted)
}

/// Unary numeric promotion (JLS 5.6.1): `byte`, `short` and `char` become `int`.
pub fn unary_numeric_promotion(store: &TypeStore, ty: &Type) -> Option<PrimitiveType> {
    Some(match numeric_of(store, ty)? {
        PrimitiveType::Byte | PrimitiveType::Short | PrimitiveType::Char => PrimitiveType::Int,
        other => other,
    })
}

fn numeric_of(store: &TypeStore, ty: &Type) -> Option<PrimitiveType> {
    let primitive = match ty {
        Type::Primitive(p) => *p,
        other => store.unboxed_type(other)?,
    };
    primitive.is_numeric().then_some(primitive)
}
