//! The slice of `java.lang` and `java.util` expressions commonly touch.

use std::rc::Rc;

use crate::{
    format_type_qualified, AccessModifier, Array, ArrayRef, ClassDef, ClassKind, ConstructorDef,
    FieldDef, Invocation, MethodDef, PrimitiveType, Thrown, Type, TypeStore, Value,
};

const ELEMENTS: &str = "elements";

pub(crate) fn install(store: &mut TypeStore) {
    let wk = *store.well_known();
    let object = Type::class(wk.object, vec![]);
    let string = Type::class(wk.string, vec![]);

    store.add_class(ClassDef {
        name: "java.lang.Object".to_owned(),
        methods: vec![
            MethodDef::new("toString", vec![], string.clone())
                .with_body(|inv| Ok(Value::string(default_to_string(inv.store, inv.receiver)))),
            MethodDef::new("hashCode", vec![], Type::int())
                .with_body(|inv| Ok(Value::Int(hash_code(inv.receiver)))),
            MethodDef::new("equals", vec![object.clone()], Type::boolean())
                .with_body(|inv| Ok(Value::Boolean(inv.receiver.same_identity(&inv.arg(0))))),
            MethodDef::new("getClass", vec![], Type::class(wk.class, vec![])).with_body(|inv| {
                let ty = inv
                    .receiver
                    .runtime_type(inv.store)
                    .ok_or_else(|| Thrown::null_pointer("getClass() on null"))?;
                Ok(Value::Class(ty))
            }),
        ],
        constructors: vec![ConstructorDef::new(vec![])],
        ..ClassDef::default()
    });

    for name in ["java.lang.Cloneable", "java.io.Serializable"] {
        store.add_class(ClassDef {
            name: name.to_owned(),
            kind: ClassKind::Interface,
            ..ClassDef::default()
        });
    }

    store.add_class(ClassDef {
        name: "java.lang.CharSequence".to_owned(),
        kind: ClassKind::Interface,
        methods: vec![
            MethodDef::new("length", vec![], Type::int()),
            MethodDef::new("charAt", vec![Type::int()], Type::char()),
        ],
        ..ClassDef::default()
    });

    store.add_class(ClassDef {
        name: "java.lang.Comparable".to_owned(),
        kind: ClassKind::Interface,
        type_params: vec!["T".to_owned()],
        methods: vec![MethodDef::new("compareTo", vec![object.clone()], Type::int())],
        ..ClassDef::default()
    });

    install_string(store, &object, &string);
    install_class(store, &string);
    install_boxes(store, &object, &string);
    install_math(store);
    install_collections(store, &object);
}

fn install_string(store: &mut TypeStore, object: &Type, string: &Type) {
    let wk = *store.well_known();
    store.add_class(ClassDef {
        name: "java.lang.String".to_owned(),
        super_class: Some(object.clone()),
        interfaces: vec![
            Type::class(wk.char_sequence, vec![]),
            Type::class(wk.comparable, vec![string.clone()]),
            Type::class(wk.serializable, vec![]),
        ],
        methods: vec![
            MethodDef::new("length", vec![], Type::int())
                .with_body(|inv| Ok(Value::Int(utf16(this_str(inv)?).len() as i32))),
            MethodDef::new("isEmpty", vec![], Type::boolean())
                .with_body(|inv| Ok(Value::Boolean(this_str(inv)?.is_empty()))),
            MethodDef::new("charAt", vec![Type::int()], Type::char()).with_body(|inv| {
                let units = utf16(this_str(inv)?);
                let index = int_arg(inv, 0);
                usize::try_from(index)
                    .ok()
                    .and_then(|idx| units.get(idx).copied())
                    .map(Value::Char)
                    .ok_or_else(|| string_index_out_of_bounds(index, units.len()))
            }),
            MethodDef::new("substring", vec![Type::int()], string.clone()).with_body(|inv| {
                let units = utf16(this_str(inv)?);
                substring(&units, int_arg(inv, 0), units.len() as i64)
            }),
            MethodDef::new("substring", vec![Type::int(), Type::int()], string.clone()).with_body(
                |inv| {
                    let units = utf16(this_str(inv)?);
                    substring(&units, int_arg(inv, 0), int_arg(inv, 1))
                },
            ),
            MethodDef::new("indexOf", vec![string.clone()], Type::int()).with_body(|inv| {
                let haystack = utf16(this_str(inv)?);
                let needle = utf16(str_arg(inv, 0)?.as_str());
                let found = if needle.is_empty() {
                    Some(0)
                } else {
                    haystack
                        .windows(needle.len())
                        .position(|window| window == needle.as_slice())
                };
                Ok(Value::Int(found.map_or(-1, |idx| idx as i32)))
            }),
            MethodDef::new("toUpperCase", vec![], string.clone())
                .with_body(|inv| Ok(Value::string(this_str(inv)?.to_uppercase()))),
            MethodDef::new("toLowerCase", vec![], string.clone())
                .with_body(|inv| Ok(Value::string(this_str(inv)?.to_lowercase()))),
            MethodDef::new("trim", vec![], string.clone()).with_body(|inv| {
                Ok(Value::string(
                    this_str(inv)?.trim_matches(|c: char| c <= ' '),
                ))
            }),
            MethodDef::new("equals", vec![object.clone()], Type::boolean())
                .with_body(|inv| Ok(Value::Boolean(inv.receiver == &inv.arg(0)))),
            MethodDef::new("hashCode", vec![], Type::int())
                .with_body(|inv| Ok(Value::Int(hash_code(inv.receiver)))),
            MethodDef::new("toString", vec![], string.clone())
                .with_body(|inv| Ok(inv.receiver.clone())),
            MethodDef::new("concat", vec![string.clone()], string.clone()).with_body(|inv| {
                let tail = str_arg(inv, 0)?;
                Ok(Value::string(format!("{}{tail}", this_str(inv)?)))
            }),
            MethodDef::new("startsWith", vec![string.clone()], Type::boolean()).with_body(|inv| {
                let prefix = str_arg(inv, 0)?;
                Ok(Value::Boolean(this_str(inv)?.starts_with(prefix.as_str())))
            }),
            MethodDef::new("contains", vec![Type::class(wk.char_sequence, vec![])], Type::boolean())
                .with_body(|inv| {
                    let needle = str_arg(inv, 0)?;
                    Ok(Value::Boolean(this_str(inv)?.contains(needle.as_str())))
                }),
            MethodDef::new("compareTo", vec![string.clone()], Type::int()).with_body(|inv| {
                let other = utf16(str_arg(inv, 0)?.as_str());
                let this = utf16(this_str(inv)?);
                let diff = this
                    .iter()
                    .zip(other.iter())
                    .find(|(a, b)| a != b)
                    .map(|(a, b)| i32::from(*a) - i32::from(*b))
                    .unwrap_or(this.len() as i32 - other.len() as i32);
                Ok(Value::Int(diff))
            }),
            MethodDef::new("valueOf", vec![object.clone()], string.clone())
                .make_static()
                .with_body(|inv| Ok(Value::string(default_to_string(inv.store, &inv.arg(0))))),
            MethodDef::new("valueOf", vec![Type::int()], string.clone())
                .make_static()
                .with_body(|inv| Ok(Value::string(default_to_string(inv.store, &inv.arg(0))))),
            MethodDef::new("valueOf", vec![Type::char()], string.clone())
                .make_static()
                .with_body(|inv| Ok(Value::string(default_to_string(inv.store, &inv.arg(0))))),
            MethodDef::new("valueOf", vec![Type::double()], string.clone())
                .make_static()
                .with_body(|inv| Ok(Value::string(default_to_string(inv.store, &inv.arg(0))))),
            MethodDef::new("valueOf", vec![Type::boolean()], string.clone())
                .make_static()
                .with_body(|inv| Ok(Value::string(default_to_string(inv.store, &inv.arg(0))))),
        ],
        constructors: vec![
            ConstructorDef::new(vec![]).with_body(|_| Ok(Value::string(""))),
            ConstructorDef::new(vec![string.clone()]).with_body(|inv| {
                let text = str_arg(inv, 0)?;
                Ok(Value::string(text))
            }),
        ],
        ..ClassDef::default()
    });
}

fn install_class(store: &mut TypeStore, string: &Type) {
    let object = store.object_type();
    store.add_class(ClassDef {
        name: "java.lang.Class".to_owned(),
        type_params: vec!["T".to_owned()],
        super_class: Some(object),
        methods: vec![
            MethodDef::new("getName", vec![], string.clone()).with_body(|inv| match inv.receiver {
                Value::Class(ty) => Ok(Value::string(class_name(inv.store, ty))),
                _ => Err(Thrown::null_pointer("getName() on null")),
            }),
            MethodDef::new("getSimpleName", vec![], string.clone()).with_body(|inv| {
                match inv.receiver {
                    Value::Class(ty) => {
                        Ok(Value::string(crate::format_type(inv.store, &ty.erasure())))
                    }
                    _ => Err(Thrown::null_pointer("getSimpleName() on null")),
                }
            }),
        ],
        ..ClassDef::default()
    });
}

fn install_boxes(store: &mut TypeStore, object: &Type, string: &Type) {
    let wk = *store.well_known();
    let number = Type::class(wk.number, vec![]);

    store.add_class(ClassDef {
        name: "java.lang.Number".to_owned(),
        super_class: Some(object.clone()),
        interfaces: vec![Type::class(wk.serializable, vec![])],
        methods: vec![
            MethodDef::new("intValue", vec![], Type::int()),
            MethodDef::new("longValue", vec![], Type::long()),
            MethodDef::new("doubleValue", vec![], Type::double()),
        ],
        ..ClassDef::default()
    });

    for primitive in PrimitiveType::ALL {
        let boxed = store.boxed_type(primitive);
        let prim = Type::Primitive(primitive);
        let mut fields = Vec::new();
        let mut methods = vec![
            MethodDef::new("valueOf", vec![prim.clone()], boxed.clone())
                .make_static()
                .with_body(move |inv| convert_arg(inv, 0, primitive)),
            MethodDef::new("toString", vec![], string.clone())
                .with_body(|inv| Ok(Value::string(default_to_string(inv.store, inv.receiver)))),
            MethodDef::new("equals", vec![object.clone()], Type::boolean())
                .with_body(|inv| Ok(Value::Boolean(inv.receiver == &inv.arg(0)))),
            MethodDef::new("hashCode", vec![], Type::int())
                .with_body(|inv| Ok(Value::Int(hash_code(inv.receiver)))),
            MethodDef::new(format!("{}Value", primitive.name()), vec![], prim.clone())
                .with_body(move |inv| convert_value(inv.receiver, primitive)),
        ];

        if primitive.is_numeric() {
            for (target, name) in [
                (PrimitiveType::Int, "intValue"),
                (PrimitiveType::Long, "longValue"),
                (PrimitiveType::Double, "doubleValue"),
            ] {
                if target != primitive && primitive != PrimitiveType::Char {
                    methods.push(
                        MethodDef::new(name, vec![], Type::Primitive(target))
                            .with_body(move |inv| convert_value(inv.receiver, target)),
                    );
                }
            }
            let (min, max) = bounds(primitive);
            fields.push(
                FieldDef::new("MIN_VALUE", prim.clone())
                    .make_static()
                    .make_final()
                    .with_initial_value(min),
            );
            fields.push(
                FieldDef::new("MAX_VALUE", prim.clone())
                    .make_static()
                    .make_final()
                    .with_initial_value(max),
            );
        }

        match primitive {
            PrimitiveType::Boolean => {
                for (name, value) in [("TRUE", true), ("FALSE", false)] {
                    fields.push(
                        FieldDef::new(name, boxed.clone())
                            .make_static()
                            .make_final()
                            .with_initial_value(Value::Boolean(value)),
                    );
                }
                methods.push(
                    MethodDef::new("parseBoolean", vec![string.clone()], Type::boolean())
                        .make_static()
                        .with_body(|inv| {
                            let text = inv.arg(0);
                            Ok(Value::Boolean(
                                text.as_str().is_some_and(|s| s.eq_ignore_ascii_case("true")),
                            ))
                        }),
                );
            }
            PrimitiveType::Int => methods.push(
                MethodDef::new("parseInt", vec![string.clone()], Type::int())
                    .make_static()
                    .with_body(|inv| {
                        let text = str_arg(inv, 0)?;
                        text.trim_start_matches('+')
                            .parse::<i32>()
                            .map(Value::Int)
                            .map_err(|_| number_format(&text))
                    }),
            ),
            PrimitiveType::Long => methods.push(
                MethodDef::new("parseLong", vec![string.clone()], Type::long())
                    .make_static()
                    .with_body(|inv| {
                        let text = str_arg(inv, 0)?;
                        text.trim_start_matches('+')
                            .parse::<i64>()
                            .map(Value::Long)
                            .map_err(|_| number_format(&text))
                    }),
            ),
            PrimitiveType::Double => methods.push(
                MethodDef::new("parseDouble", vec![string.clone()], Type::double())
                    .make_static()
                    .with_body(|inv| {
                        let text = str_arg(inv, 0)?;
                        text.trim()
                            .parse::<f64>()
                            .map(Value::Double)
                            .map_err(|_| number_format(&text))
                    }),
            ),
            _ => {}
        }

        let (super_class, interfaces) = match primitive {
            PrimitiveType::Boolean | PrimitiveType::Char => (
                object.clone(),
                vec![
                    Type::class(wk.comparable, vec![boxed.clone()]),
                    Type::class(wk.serializable, vec![]),
                ],
            ),
            _ => (
                number.clone(),
                vec![Type::class(wk.comparable, vec![boxed.clone()])],
            ),
        };

        store.add_class(ClassDef {
            name: primitive.box_class_name().to_owned(),
            super_class: Some(super_class),
            interfaces,
            fields,
            methods,
            ..ClassDef::default()
        });
    }
}

fn install_math(store: &mut TypeStore) {
    let object = store.object_type();
    let mut methods = Vec::new();
    for ty in [Type::int(), Type::long(), Type::float(), Type::double()] {
        let primitive = ty.as_primitive().unwrap_or(PrimitiveType::Double);
        methods.push(
            MethodDef::new("max", vec![ty.clone(), ty.clone()], ty.clone())
                .make_static()
                .with_body(move |inv| pick(inv, primitive, |a, b| a >= b)),
        );
        methods.push(
            MethodDef::new("min", vec![ty.clone(), ty.clone()], ty.clone())
                .make_static()
                .with_body(move |inv| pick(inv, primitive, |a, b| a <= b)),
        );
        methods.push(
            MethodDef::new("abs", vec![ty.clone()], ty.clone())
                .make_static()
                .with_body(move |inv| {
                    Ok(match inv.arg(0) {
                        Value::Int(v) => Value::Int(v.wrapping_abs()),
                        Value::Long(v) => Value::Long(v.wrapping_abs()),
                        Value::Float(v) => Value::Float(v.abs()),
                        Value::Double(v) => Value::Double(v.abs()),
                        other => other,
                    })
                }),
        );
    }
    methods.push(
        MethodDef::new("sqrt", vec![Type::double()], Type::double())
            .make_static()
            .with_body(|inv| Ok(Value::Double(double_arg(inv, 0).sqrt()))),
    );
    methods.push(
        MethodDef::new("pow", vec![Type::double(), Type::double()], Type::double())
            .make_static()
            .with_body(|inv| Ok(Value::Double(double_arg(inv, 0).powf(double_arg(inv, 1))))),
    );

    store.add_class(ClassDef {
        name: "java.lang.Math".to_owned(),
        super_class: Some(object),
        fields: vec![
            FieldDef::new("PI", Type::double())
                .make_static()
                .make_final()
                .with_initial_value(Value::Double(std::f64::consts::PI)),
            FieldDef::new("E", Type::double())
                .make_static()
                .make_final()
                .with_initial_value(Value::Double(std::f64::consts::E)),
        ],
        methods,
        constructors: vec![ConstructorDef::new(vec![]).with_access(AccessModifier::Private)],
        ..ClassDef::default()
    });
}

fn install_collections(store: &mut TypeStore, object: &Type) {
    let collection = store.intern_class_id("java.util.Collection");
    let set = store.intern_class_id("java.util.Set");
    let list = store.intern_class_id("java.util.List");
    store.add_class(ClassDef {
        name: "java.util.Collection".to_owned(),
        kind: ClassKind::Interface,
        type_params: vec!["E".to_owned()],
        methods: vec![
            MethodDef::new("size", vec![], Type::int()),
            MethodDef::new("isEmpty", vec![], Type::boolean()),
            MethodDef::new("add", vec![object.clone()], Type::boolean()),
            MethodDef::new("contains", vec![object.clone()], Type::boolean()),
        ],
        ..ClassDef::default()
    });
    store.add_class(ClassDef {
        name: "java.util.Set".to_owned(),
        kind: ClassKind::Interface,
        type_params: vec!["E".to_owned()],
        interfaces: vec![Type::class(collection, vec![])],
        ..ClassDef::default()
    });
    store.add_class(ClassDef {
        name: "java.util.List".to_owned(),
        kind: ClassKind::Interface,
        type_params: vec!["E".to_owned()],
        interfaces: vec![Type::class(collection, vec![])],
        methods: vec![MethodDef::new("get", vec![Type::int()], object.clone())],
        ..ClassDef::default()
    });

    for (name, interface, unique) in [
        ("java.util.HashSet", set, true),
        ("java.util.ArrayList", list, false),
    ] {
        let mut methods = vec![
            MethodDef::new("size", vec![], Type::int())
                .with_body(|inv| Ok(Value::Int(elements(inv)?.len() as i32))),
            MethodDef::new("isEmpty", vec![], Type::boolean())
                .with_body(|inv| Ok(Value::Boolean(elements(inv)?.is_empty()))),
            MethodDef::new("add", vec![object.clone()], Type::boolean()).with_body(move |inv| {
                let elements = elements(inv)?;
                let value = inv.arg(0);
                if unique && elements.elements().contains(&value) {
                    return Ok(Value::Boolean(false));
                }
                elements.push(value);
                Ok(Value::Boolean(true))
            }),
            MethodDef::new("contains", vec![object.clone()], Type::boolean()).with_body(|inv| {
                let value = inv.arg(0);
                Ok(Value::Boolean(elements(inv)?.elements().contains(&value)))
            }),
        ];
        if !unique {
            methods.push(
                MethodDef::new("get", vec![Type::int()], object.clone()).with_body(|inv| {
                    let elements = elements(inv)?;
                    let index = int_arg(inv, 0);
                    usize::try_from(index)
                        .ok()
                        .and_then(|idx| elements.get(idx))
                        .ok_or_else(|| {
                            Thrown::new(
                                "java.lang.IndexOutOfBoundsException",
                                format!("Index {index} out of bounds for length {}", elements.len()),
                            )
                        })
                }),
            );
        }

        let object = object.clone();
        store.add_class(ClassDef {
            name: name.to_owned(),
            type_params: vec!["E".to_owned()],
            super_class: Some(object.clone()),
            interfaces: vec![
                Type::class(interface, vec![]),
                Type::class(store.well_known().cloneable, vec![]),
                Type::class(store.well_known().serializable, vec![]),
            ],
            fields: vec![FieldDef::new(ELEMENTS, Type::array(object.clone()))
                .with_access(AccessModifier::Private)],
            methods,
            constructors: vec![ConstructorDef::new(vec![]).with_body(move |inv| {
                if let Some(this) = inv.receiver.as_object() {
                    this.set_field(ELEMENTS, Value::Array(Array::new(object.clone(), vec![])));
                }
                Ok(inv.receiver.clone())
            })],
            ..ClassDef::default()
        });
    }
}

/// `Object.toString()` for values that have no user-defined override.
fn default_to_string(store: &TypeStore, value: &Value) -> String {
    if let Some(text) = value.to_java_string() {
        return text;
    }
    match value {
        Value::Object(obj) => format!(
            "{}@{:x}",
            store.class_name(obj.class()),
            hash_code(value) as u32
        ),
        Value::Array(_) => format!("[@{:x}", hash_code(value) as u32),
        Value::Class(ty) => match ty {
            Type::Class(class) if store
                .class(class.def)
                .is_some_and(|def| def.kind == ClassKind::Interface) =>
            {
                format!("interface {}", class_name(store, ty))
            }
            Type::Primitive(p) => p.name().to_owned(),
            _ => format!("class {}", class_name(store, ty)),
        },
        _ => String::new(),
    }
}

fn class_name(store: &TypeStore, ty: &Type) -> String {
    match ty {
        Type::Class(class) => store.class_name(class.def).to_owned(),
        other => format_type_qualified(store, other),
    }
}

fn hash_code(value: &Value) -> i32 {
    match value {
        Value::Null | Value::Indeterminate => 0,
        Value::Boolean(b) => {
            if *b {
                1231
            } else {
                1237
            }
        }
        Value::Long(v) => (*v ^ (*v >> 32)) as i32,
        Value::Float(v) => v.to_bits() as i32,
        Value::Double(v) => {
            let bits = v.to_bits();
            (bits ^ (bits >> 32)) as i32
        }
        Value::String(s) => utf16(s)
            .iter()
            .fold(0i32, |h, &unit| h.wrapping_mul(31).wrapping_add(i32::from(unit))),
        Value::Object(obj) => Rc::as_ptr(obj) as usize as i32,
        Value::Array(array) => Rc::as_ptr(array) as usize as i32,
        Value::Class(ty) => ty.class_id().map_or(0, |id| id.to_raw() as i32),
        other => other.as_i64().unwrap_or(0) as i32,
    }
}

fn utf16(text: &str) -> Vec<u16> {
    text.encode_utf16().collect()
}

fn this_str<'a>(inv: &Invocation<'a>) -> Result<&'a str, Thrown> {
    inv.receiver
        .as_str()
        .ok_or_else(|| Thrown::null_pointer("receiver is null"))
}

fn str_arg(inv: &Invocation<'_>, index: usize) -> Result<String, Thrown> {
    inv.arg(index)
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| Thrown::null_pointer(format!("argument {index} is null")))
}

fn int_arg(inv: &Invocation<'_>, index: usize) -> i64 {
    inv.arg(index).as_i64().unwrap_or(0)
}

fn double_arg(inv: &Invocation<'_>, index: usize) -> f64 {
    inv.arg(index).as_f64().unwrap_or(0.0)
}

fn convert_arg(inv: &Invocation<'_>, index: usize, target: PrimitiveType) -> Result<Value, Thrown> {
    convert_value(&inv.arg(index), target)
}

fn convert_value(value: &Value, target: PrimitiveType) -> Result<Value, Thrown> {
    if value.is_null() {
        return Err(Thrown::null_pointer("cannot unbox null"));
    }
    value
        .convert_primitive(target)
        .ok_or_else(|| Thrown::class_cast(format!("cannot convert {value:?} to {}", target.name())))
}

fn pick(
    inv: &Invocation<'_>,
    primitive: PrimitiveType,
    keep_first: impl Fn(f64, f64) -> bool,
) -> Result<Value, Thrown> {
    let a = convert_arg(inv, 0, primitive)?;
    let b = convert_arg(inv, 1, primitive)?;
    let (x, y) = (a.as_f64().unwrap_or(0.0), b.as_f64().unwrap_or(0.0));
    if x.is_nan() {
        return Ok(a);
    }
    if y.is_nan() {
        return Ok(b);
    }
    Ok(if keep_first(x, y) { a } else { b })
}

fn substring(units: &[u16], begin: i64, end: i64) -> Result<Value, Thrown> {
    let len = units.len() as i64;
    if begin < 0 || end > len || begin > end {
        return Err(Thrown::new(
            "java.lang.StringIndexOutOfBoundsException",
            format!("begin {begin}, end {end}, length {len}"),
        ));
    }
    Ok(Value::string(String::from_utf16_lossy(
        &units[begin as usize..end as usize],
    )))
}

fn string_index_out_of_bounds(index: i64, len: usize) -> Thrown {
    Thrown::new(
        "java.lang.StringIndexOutOfBoundsException",
        format!("index {index}, length {len}"),
    )
}

fn number_format(text: &str) -> Thrown {
    Thrown::new(
        "java.lang.NumberFormatException",
        format!("For input string: \"{text}\""),
    )
}

fn bounds(primitive: PrimitiveType) -> (Value, Value) {
    match primitive {
        PrimitiveType::Byte => (Value::Byte(i8::MIN), Value::Byte(i8::MAX)),
        PrimitiveType::Short => (Value::Short(i16::MIN), Value::Short(i16::MAX)),
        PrimitiveType::Char => (Value::Char(u16::MIN), Value::Char(u16::MAX)),
        PrimitiveType::Int => (Value::Int(i32::MIN), Value::Int(i32::MAX)),
        PrimitiveType::Long => (Value::Long(i64::MIN), Value::Long(i64::MAX)),
        PrimitiveType::Float => (Value::Float(f32::from_bits(1)), Value::Float(f32::MAX)),
        PrimitiveType::Double => (Value::Double(f64::from_bits(1)), Value::Double(f64::MAX)),
        PrimitiveType::Boolean => (Value::Boolean(false), Value::Boolean(true)),
    }
}

fn elements(inv: &Invocation<'_>) -> Result<ArrayRef, Thrown> {
    let this = inv
        .receiver
        .as_object()
        .ok_or_else(|| Thrown::null_pointer("receiver is null"))?;
    match this.field(ELEMENTS) {
        Some(Value::Array(array)) => Ok(array),
        _ => {
            let array = Array::new(inv.store.object_type(), vec![]);
            this.set_field(ELEMENTS, Value::Array(array.clone()));
            Ok(array)
        }
    }
}
