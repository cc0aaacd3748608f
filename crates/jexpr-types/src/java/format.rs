//! Java-like rendering of types and signatures for messages and completion display text.

use crate::{simple_name_of, Type, TypeStore};

/// `List<String>`, `int[]`, `Map.Entry`.
pub fn format_type(store: &TypeStore, ty: &Type) -> String {
    let mut out = String::new();
    write_type(store, ty, false, &mut out);
    out
}

/// `java.util.List<java.lang.String>`, `java.util.Map.Entry`.
pub fn format_type_qualified(store: &TypeStore, ty: &Type) -> String {
    let mut out = String::new();
    write_type(store, ty, true, &mut out);
    out
}

/// `name(int, String...)`. Constructors pass the simple class name.
pub fn format_executable(store: &TypeStore, name: &str, params: &[Type], is_varargs: bool) -> String {
    let mut out = String::new();
    out.push_str(name);
    out.push('(');
    for (idx, param) in params.iter().enumerate() {
        if idx > 0 {
            out.push_str(", ");
        }
        let is_last = idx + 1 == params.len();
        match param {
            Type::Array(component) if is_varargs && is_last => {
                write_type(store, component, false, &mut out);
                out.push_str("...");
            }
            _ => write_type(store, param, false, &mut out),
        }
    }
    out.push(')');
    out
}

fn write_type(store: &TypeStore, ty: &Type, qualified: bool, out: &mut String) {
    match ty {
        Type::Void => out.push_str("void"),
        Type::Null => out.push_str("null"),
        Type::Unknown => out.push('?'),
        Type::Primitive(p) => out.push_str(p.name()),
        Type::Array(component) => {
            write_type(store, component, qualified, out);
            out.push_str("[]");
        }
        Type::Class(class) => {
            let binary = store.class_name(class.def);
            if qualified {
                out.push_str(&binary.replace('$', "."));
            } else {
                out.push_str(&source_name(binary));
            }
            if !class.args.is_empty() {
                out.push('<');
                for (idx, arg) in class.args.iter().enumerate() {
                    if idx > 0 {
                        out.push_str(", ");
                    }
                    write_type(store, arg, qualified, out);
                }
                out.push('>');
            }
        }
    }
}

/// Simple name including enclosing classes (`Map.Entry` for `java.util.Map$Entry`).
fn source_name(binary: &str) -> String {
    let without_package = binary.rsplit('.').next().unwrap_or(binary);
    if without_package.contains('$') {
        without_package.replace('$', ".")
    } else {
        simple_name_of(binary).to_owned()
    }
}
