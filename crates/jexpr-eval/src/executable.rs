//! Methods and constructors as overload candidates, resolution and invocation.

use jexpr_types::{
    format_executable, rate_type_match, AccessModifier, Array, ClassId, ClassKind, Invocation, MethodDef,
    NativeFn, Object, Thrown, Type, TypeMatch, TypeStore, Value,
};

use crate::members::{find_override, methods, ConstructorRef, MethodRef};
use crate::object_info::ObjectInfo;
use crate::outcome::{ParseError, Parsed};
use crate::toolbox::Toolbox;

/// Name providers use for constructors.
pub const CONSTRUCTOR_NAME: &str = "<init>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExecutableKind {
    Method,
    Constructor,
}

/// One view of a method or constructor.
///
/// A varargs executable yields two views: the regular one takes the trailing array as is, the
/// variadic one takes any number of trailing component values.
#[derive(Clone)]
pub(crate) struct ExecutableInfo<'s> {
    pub owner: ClassId,
    pub name: &'s str,
    pub params: &'s [Type],
    pub return_type: Type,
    pub is_static: bool,
    pub is_varargs: bool,
    pub variadic: bool,
    pub kind: ExecutableKind,
    method: Option<&'s MethodDef>,
    body: Option<&'s NativeFn>,
}

impl<'s> ExecutableInfo<'s> {
    pub fn for_method(method: MethodRef<'s>) -> Vec<Self> {
        let regular = ExecutableInfo {
            owner: method.owner,
            name: &method.def.name,
            params: &method.def.params,
            return_type: method.def.return_type.clone(),
            is_static: method.def.is_static,
            is_varargs: method.def.is_varargs,
            variadic: false,
            kind: ExecutableKind::Method,
            method: Some(method.def),
            body: method.def.body.as_ref(),
        };
        regular.with_variadic_view()
    }

    pub fn for_constructor(store: &'s TypeStore, ctor: ConstructorRef<'s>) -> Vec<Self> {
        let name = store
            .class(ctor.owner)
            .map_or("<unknown>", |def| def.simple_name());
        let regular = ExecutableInfo {
            owner: ctor.owner,
            name,
            params: &ctor.def.params,
            return_type: Type::class(ctor.owner, vec![]),
            is_static: true,
            is_varargs: ctor.def.is_varargs,
            variadic: false,
            kind: ExecutableKind::Constructor,
            method: None,
            body: ctor.def.body.as_ref(),
        };
        regular.with_variadic_view()
    }

    fn with_variadic_view(self) -> Vec<Self> {
        let variadic = (self.is_varargs && !self.params.is_empty()).then(|| ExecutableInfo {
            variadic: true,
            ..self.clone()
        });
        std::iter::once(self).chain(variadic).collect()
    }

    /// Name under which completion providers are registered.
    pub fn provider_name(&self) -> &str {
        match self.kind {
            ExecutableKind::Method => self.name,
            ExecutableKind::Constructor => CONSTRUCTOR_NAME,
        }
    }

    /// Type of argument `index` in this view.
    pub fn parameter_type(&self, index: usize) -> Option<Type> {
        let fixed = self.params.len().saturating_sub(1);
        if self.variadic && index >= fixed {
            return self.params.last()?.component_type().cloned();
        }
        self.params.get(index).cloned()
    }

    pub fn accepts_argument_count(&self, count: usize) -> bool {
        if self.variadic {
            count + 1 >= self.params.len()
        } else {
            count == self.params.len()
        }
    }

    /// Whether an argument at `index` can exist at all.
    pub fn accepts_argument_at(&self, index: usize) -> bool {
        self.variadic || index < self.params.len()
    }

    /// Worst per-argument match, or [`TypeMatch::None`] when the count does not fit.
    pub fn rate_arguments(&self, store: &TypeStore, argument_types: &[Type]) -> TypeMatch {
        if !self.accepts_argument_count(argument_types.len()) {
            return TypeMatch::None;
        }
        self.rate_leading_arguments(store, argument_types)
    }

    /// Worst match of the arguments parsed so far, ignoring the ones still missing.
    pub fn rate_leading_arguments(&self, store: &TypeStore, argument_types: &[Type]) -> TypeMatch {
        argument_types
            .iter()
            .enumerate()
            .map(|(idx, arg)| match self.parameter_type(idx) {
                Some(param) => rate_type_match(store, arg, &param),
                None => TypeMatch::None,
            })
            .max()
            .unwrap_or(TypeMatch::Full)
    }

    pub fn signature(&self, store: &TypeStore) -> String {
        format_executable(store, self.name, self.params, self.is_varargs)
    }

    /// `name(,,)` with one comma less than there are parameters.
    pub fn completion_text(&self) -> String {
        let commas = ",".repeat(self.params.len().saturating_sub(1));
        format!("{}({commas})", self.name)
    }

    fn is_more_specific_than(&self, other: &ExecutableInfo<'_>, store: &TypeStore, count: usize) -> bool {
        (0..count).all(|idx| match (self.parameter_type(idx), other.parameter_type(idx)) {
            (Some(mine), Some(theirs)) => rate_type_match(store, &mine, &theirs).is_match(),
            _ => false,
        })
    }
}

pub(crate) enum Resolution<'s> {
    Unique(ExecutableInfo<'s>),
    NoMatch,
    Ambiguous(Vec<ExecutableInfo<'s>>),
}

/// Loosest-last rating buckets tried within a pass.
const BUCKETS: [&[TypeMatch]; 3] = [
    &[TypeMatch::Full],
    &[TypeMatch::Inheritance, TypeMatch::PrimitiveWidening],
    &[
        TypeMatch::Boxed,
        TypeMatch::BoxedAndWidening,
        TypeMatch::BoxedAndInheritance,
    ],
];

/// Pick the executable for `argument_types`: regular views first, then variadic ones; within
/// a pass the strictest non-empty rating bucket, narrowed to its most specific member.
pub(crate) fn resolve_overload<'s>(
    store: &TypeStore,
    candidates: &[ExecutableInfo<'s>],
    argument_types: &[Type],
) -> Resolution<'s> {
    let ratings: Vec<TypeMatch> = candidates
        .iter()
        .map(|c| c.rate_arguments(store, argument_types))
        .collect();

    for allow_variadic in [false, true] {
        for bucket in BUCKETS {
            let matching: Vec<&ExecutableInfo<'s>> = candidates
                .iter()
                .zip(&ratings)
                .filter(|(c, rating)| (allow_variadic || !c.variadic) && bucket.contains(rating))
                .map(|(c, _)| c)
                .collect();
            if matching.is_empty() {
                continue;
            }

            let count = argument_types.len();
            let most_specific: Vec<&ExecutableInfo<'s>> = matching
                .iter()
                .copied()
                .filter(|m| {
                    matching
                        .iter()
                        .all(|other| std::ptr::eq(*m, *other) || m.is_more_specific_than(other, store, count))
                })
                .collect();
            return match most_specific.as_slice() {
                [single] => Resolution::Unique((*single).clone()),
                _ => Resolution::Ambiguous(matching.into_iter().cloned().collect()),
            };
        }
    }
    Resolution::NoMatch
}

/// Type used for overload resolution of an argument.
pub(crate) fn argument_type(tb: &Toolbox<'_>, argument: &ObjectInfo) -> Type {
    tb.lookup_type(argument)
}

/// Invoke `exec` once. Without evaluation only the declared result type is produced.
pub(crate) fn invoke(
    tb: &Toolbox<'_>,
    exec: &ExecutableInfo<'_>,
    receiver: &ObjectInfo,
    arguments: &[ObjectInfo],
    position: usize,
) -> Parsed<ObjectInfo> {
    let needs_receiver = exec.kind == ExecutableKind::Method && !exec.is_static;
    if !tb.evaluates()
        || (needs_receiver && receiver.value.is_indeterminate())
        || arguments.iter().any(|a| a.value.is_indeterminate())
    {
        return Ok(ObjectInfo::indeterminate(exec.return_type.clone()));
    }

    tracing::debug!(
        target: "jexpr.eval",
        executable = %exec.signature(tb.store),
        "invoking"
    );
    let result = call(tb.store, exec, &receiver.value, arguments)
        .map_err(|thrown| ParseError::evaluation(position, thrown))?;
    Ok(ObjectInfo::new(result, exec.return_type.clone()))
}

fn call(
    store: &TypeStore,
    exec: &ExecutableInfo<'_>,
    receiver: &Value,
    arguments: &[ObjectInfo],
) -> Result<Value, Thrown> {
    let args = prepare_arguments(exec, arguments)?;

    match exec.kind {
        ExecutableKind::Constructor => {
            if store
                .class(exec.owner)
                .is_some_and(|def| def.kind == ClassKind::Interface)
            {
                return Err(Thrown::new(
                    "java.lang.InstantiationException",
                    store.class_name(exec.owner),
                ));
            }
            let instance = Value::Object(Object::instantiate(store, exec.owner));
            match exec.body {
                Some(body) => body(&Invocation {
                    store,
                    receiver: &instance,
                    args: &args,
                }),
                None => Ok(instance),
            }
        }
        ExecutableKind::Method if exec.is_static => {
            let body = exec
                .body
                .ok_or_else(|| abstract_method(store, exec))?;
            body(&Invocation {
                store,
                receiver: &Value::Null,
                args: &args,
            })
        }
        ExecutableKind::Method => {
            if receiver.is_null() {
                return Err(Thrown::null_pointer(format!(
                    "Cannot invoke \"{}\" because the receiver is null",
                    exec.signature(store)
                )));
            }
            let dispatched = match (receiver_class(store, receiver), exec.method) {
                (Some(class), Some(method)) => {
                    find_override(store, class, method).and_then(|m| m.def.body.as_ref())
                }
                _ => None,
            };
            let body = dispatched
                .or(exec.body)
                .ok_or_else(|| abstract_method(store, exec))?;
            body(&Invocation {
                store,
                receiver,
                args: &args,
            })
        }
    }
}

fn abstract_method(store: &TypeStore, exec: &ExecutableInfo<'_>) -> Thrown {
    Thrown::new("java.lang.AbstractMethodError", exec.signature(store))
}

fn receiver_class(store: &TypeStore, receiver: &Value) -> Option<ClassId> {
    match receiver {
        Value::Object(obj) => Some(obj.class()),
        other => other.runtime_type(store).and_then(|ty| match ty {
            Type::Array(_) => Some(store.well_known().object),
            ty => ty.class_id(),
        }),
    }
}

/// Convert argument values to the parameter types; the variadic view packs the trailing ones
/// into an array.
fn prepare_arguments(exec: &ExecutableInfo<'_>, arguments: &[ObjectInfo]) -> Result<Vec<Value>, Thrown> {
    let fixed = if exec.variadic {
        exec.params.len().saturating_sub(1)
    } else {
        exec.params.len()
    };

    let mut values = Vec::with_capacity(exec.params.len());
    for (idx, arg) in arguments.iter().take(fixed).enumerate() {
        values.push(convert_for_assignment(&arg.value, &exec.params[idx])?);
    }

    if exec.variadic {
        let component = exec
            .params
            .last()
            .and_then(Type::component_type)
            .cloned()
            .unwrap_or(Type::Unknown);
        let rest = arguments
            .iter()
            .skip(fixed)
            .map(|arg| convert_for_assignment(&arg.value, &component))
            .collect::<Result<Vec<_>, _>>()?;
        values.push(Value::Array(Array::new(component, rest)));
    }
    Ok(values)
}

/// Assignment conversion of a value whose type already matched `target`.
pub(crate) fn convert_for_assignment(value: &Value, target: &Type) -> Result<Value, Thrown> {
    match target {
        Type::Primitive(primitive) => {
            if value.is_null() {
                return Err(Thrown::null_pointer("Cannot unbox null value"));
            }
            value.convert_primitive(*primitive).ok_or_else(|| {
                Thrown::class_cast(format!("{value:?} cannot be converted to {}", primitive.name()))
            })
        }
        _ => Ok(value.clone()),
    }
}

/// Java string conversion, calling `toString()` on objects.
pub(crate) fn java_string(store: &TypeStore, value: &Value) -> Result<String, Thrown> {
    if let Some(text) = value.to_java_string() {
        return Ok(text);
    }
    let Some(class) = receiver_class(store, value) else {
        return Ok("null".to_owned());
    };
    let to_string = methods(store, &Type::class(class, vec![]), false, AccessModifier::Private)
        .into_iter()
        .find(|m| m.def.name == "toString" && m.def.params.is_empty() && !m.def.is_static);
    let body = to_string
        .and_then(|m| find_override(store, class, m.def))
        .and_then(|m| m.def.body.clone());
    match body {
        Some(body) => {
            let result = body(&Invocation {
                store,
                receiver: value,
                args: &[],
            })?;
            Ok(result.to_java_string().unwrap_or_else(|| "null".to_owned()))
        }
        None => Ok(format!("{}@0", store.class_name(class))),
    }
}
