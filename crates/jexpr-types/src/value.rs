use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::{ClassId, PrimitiveType, Type, TypeStore};

/// A runtime value.
///
/// Primitive variants double as their boxed counterparts: whether an `Int` is an `int` or an
/// `Integer` is decided by the declared type it travels with.
#[derive(Clone)]
pub enum Value {
    Null,
    /// A value that was intentionally not computed (no-evaluation passes).
    Indeterminate,
    Boolean(bool),
    Byte(i8),
    Short(i16),
    Char(u16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(Rc<str>),
    Object(ObjectRef),
    Array(ArrayRef),
    /// A `java.lang.Class` instance.
    Class(Type),
}

impl Value {
    pub fn string(text: impl AsRef<str>) -> Self {
        Value::String(Rc::from(text.as_ref()))
    }

    pub fn char(c: char) -> Self {
        let mut buf = [0u16; 2];
        Value::Char(c.encode_utf16(&mut buf)[0])
    }

    /// Default value of a field or array element of type `ty`.
    pub fn default_for(ty: &Type) -> Self {
        match ty {
            Type::Primitive(PrimitiveType::Boolean) => Value::Boolean(false),
            Type::Primitive(PrimitiveType::Byte) => Value::Byte(0),
            Type::Primitive(PrimitiveType::Short) => Value::Short(0),
            Type::Primitive(PrimitiveType::Char) => Value::Char(0),
            Type::Primitive(PrimitiveType::Int) => Value::Int(0),
            Type::Primitive(PrimitiveType::Long) => Value::Long(0),
            Type::Primitive(PrimitiveType::Float) => Value::Float(0.0),
            Type::Primitive(PrimitiveType::Double) => Value::Double(0.0),
            _ => Value::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_indeterminate(&self) -> bool {
        matches!(self, Value::Indeterminate)
    }

    pub fn primitive_type(&self) -> Option<PrimitiveType> {
        Some(match self {
            Value::Boolean(_) => PrimitiveType::Boolean,
            Value::Byte(_) => PrimitiveType::Byte,
            Value::Short(_) => PrimitiveType::Short,
            Value::Char(_) => PrimitiveType::Char,
            Value::Int(_) => PrimitiveType::Int,
            Value::Long(_) => PrimitiveType::Long,
            Value::Float(_) => PrimitiveType::Float,
            Value::Double(_) => PrimitiveType::Double,
            _ => return None,
        })
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Integral value (including `char`) widened to `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Byte(v) => Some(i64::from(*v)),
            Value::Short(v) => Some(i64::from(*v)),
            Value::Char(v) => Some(i64::from(*v)),
            Value::Int(v) => Some(i64::from(*v)),
            Value::Long(v) => Some(*v),
            _ => None,
        }
    }

    /// Any numeric value widened to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(f64::from(*v)),
            Value::Double(v) => Some(*v),
            other => other.as_i64().map(|v| v as f64),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayRef> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    /// Primitive conversion with cast semantics (widening and narrowing). `None` when the value
    /// is not a primitive or the conversion crosses between `boolean` and numbers.
    pub fn convert_primitive(&self, target: PrimitiveType) -> Option<Value> {
        let source = self.primitive_type()?;
        if source == target {
            return Some(self.clone());
        }
        if source == PrimitiveType::Boolean || target == PrimitiveType::Boolean {
            return None;
        }

        // Rust's `as` matches Java here: integer narrowing truncates, float-to-integer
        // saturates and maps NaN to zero.
        let converted = match (self, target) {
            (Value::Float(_) | Value::Double(_), _) => {
                let v = self.as_f64()?;
                match target {
                    PrimitiveType::Byte => Value::Byte(v as i32 as i8),
                    PrimitiveType::Short => Value::Short(v as i32 as i16),
                    PrimitiveType::Char => Value::Char(v as i32 as u16),
                    PrimitiveType::Int => Value::Int(v as i32),
                    PrimitiveType::Long => Value::Long(v as i64),
                    PrimitiveType::Float => Value::Float(v as f32),
                    PrimitiveType::Double => Value::Double(v),
                    PrimitiveType::Boolean => return None,
                }
            }
            _ => {
                let v = self.as_i64()?;
                match target {
                    PrimitiveType::Byte => Value::Byte(v as i8),
                    PrimitiveType::Short => Value::Short(v as i16),
                    PrimitiveType::Char => Value::Char(v as u16),
                    PrimitiveType::Int => Value::Int(v as i32),
                    PrimitiveType::Long => Value::Long(v),
                    PrimitiveType::Float => Value::Float(v as f32),
                    PrimitiveType::Double => Value::Double(v as f64),
                    PrimitiveType::Boolean => return None,
                }
            }
        };
        Some(converted)
    }

    /// Class of the value at runtime; primitives report their wrapper class.
    pub fn runtime_type(&self, store: &TypeStore) -> Option<Type> {
        match self {
            Value::Null | Value::Indeterminate => None,
            Value::String(_) => Some(store.string_type()),
            Value::Object(obj) => Some(Type::class(obj.class(), vec![])),
            Value::Array(array) => Some(Type::array(array.component().clone())),
            Value::Class(_) => Some(Type::class(store.well_known().class, vec![])),
            primitive => primitive.primitive_type().map(|p| store.boxed_type(p)),
        }
    }

    /// Java string conversion for values that do not need a `toString()` call.
    pub fn to_java_string(&self) -> Option<String> {
        Some(match self {
            Value::Null => "null".to_owned(),
            Value::Indeterminate => return None,
            Value::Boolean(b) => b.to_string(),
            Value::Byte(v) => v.to_string(),
            Value::Short(v) => v.to_string(),
            Value::Char(c) => char::from_u32(u32::from(*c))
                .unwrap_or(char::REPLACEMENT_CHARACTER)
                .to_string(),
            Value::Int(v) => v.to_string(),
            Value::Long(v) => v.to_string(),
            Value::Float(v) => format_float(*v),
            Value::Double(v) => format_double(*v),
            Value::String(s) => s.to_string(),
            Value::Object(_) | Value::Array(_) | Value::Class(_) => return None,
        })
    }

    /// Reference identity for objects and arrays, value equality otherwise.
    pub fn same_identity(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (a, b) => a == b,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Indeterminate, Value::Indeterminate) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Byte(a), Value::Byte(b)) => a == b,
            (Value::Short(a), Value::Short(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Class(a), Value::Class(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Indeterminate => f.write_str("<indeterminate>"),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Byte(v) => write!(f, "(byte) {v}"),
            Value::Short(v) => write!(f, "(short) {v}"),
            Value::Char(v) => write!(f, "'{}'", char::from_u32(u32::from(*v)).unwrap_or('?')),
            Value::Int(v) => write!(f, "{v}"),
            Value::Long(v) => write!(f, "{v}L"),
            Value::Float(v) => write!(f, "{}f", format_float(*v)),
            Value::Double(v) => f.write_str(&format_double(*v)),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Object(obj) => write!(f, "{:?}@{:p}", obj.class(), Rc::as_ptr(obj)),
            Value::Array(array) => write!(f, "array[{}]@{:p}", array.len(), Rc::as_ptr(array)),
            Value::Class(ty) => write!(f, "class {ty:?}"),
        }
    }
}

/// `Double.toString` formatting: plain notation in `[1e-3, 1e7)`, otherwise `1.0E10` style.
pub fn format_double(v: f64) -> String {
    format_floating(v, v.to_string(), format!("{v:e}"))
}

/// `Float.toString` formatting.
pub fn format_float(v: f32) -> String {
    format_floating(f64::from(v), v.to_string(), format!("{v:e}"))
}

fn format_floating(v: f64, plain: String, scientific: String) -> String {
    if v.is_nan() {
        return "NaN".to_owned();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    let magnitude = v.abs();
    if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
        if plain.contains('.') {
            plain
        } else {
            format!("{plain}.0")
        }
    } else {
        let (mantissa, exponent) = scientific
            .split_once('e')
            .unwrap_or((scientific.as_str(), "0"));
        if mantissa.contains('.') {
            format!("{mantissa}E{exponent}")
        } else {
            format!("{mantissa}.0E{exponent}")
        }
    }
}

pub type ObjectRef = Rc<Object>;

/// An instance of a user-described class.
pub struct Object {
    class: ClassId,
    fields: RefCell<IndexMap<String, Value>>,
}

impl Object {
    pub fn new(class: ClassId) -> ObjectRef {
        Rc::new(Object {
            class,
            fields: RefCell::new(IndexMap::new()),
        })
    }

    /// Allocate an instance whose instance fields (including inherited ones) hold their
    /// type's default value.
    pub fn instantiate(store: &TypeStore, class: ClassId) -> ObjectRef {
        let object = Object::new(class);
        let mut pending = vec![class];
        let mut seen = Vec::new();
        while let Some(id) = pending.pop() {
            if seen.contains(&id) {
                continue;
            }
            seen.push(id);
            let Some(def) = store.class(id) else {
                continue;
            };
            for field in def.fields.iter().filter(|f| !f.is_static) {
                object
                    .fields
                    .borrow_mut()
                    .entry(field.name.clone())
                    .or_insert_with(|| Value::default_for(&field.ty));
            }
            if let Some(sc) = def.super_class.as_ref().and_then(Type::class_id) {
                pending.push(sc);
            }
        }
        object
    }

    pub fn class(&self) -> ClassId {
        self.class
    }

    pub fn field(&self, name: &str) -> Option<Value> {
        self.fields.borrow().get(name).cloned()
    }

    pub fn set_field(&self, name: &str, value: Value) {
        self.fields.borrow_mut().insert(name.to_owned(), value);
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("class", &self.class)
            .field("fields", &self.fields.borrow())
            .finish()
    }
}

pub type ArrayRef = Rc<Array>;

pub struct Array {
    component: Type,
    elements: RefCell<Vec<Value>>,
}

impl Array {
    pub fn new(component: Type, elements: Vec<Value>) -> ArrayRef {
        Rc::new(Array {
            component,
            elements: RefCell::new(elements),
        })
    }

    /// `new T[len]`.
    pub fn with_len(component: Type, len: usize) -> ArrayRef {
        let elements = vec![Value::default_for(&component); len];
        Array::new(component, elements)
    }

    pub fn component(&self) -> &Type {
        &self.component
    }

    pub fn len(&self) -> usize {
        self.elements.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.borrow().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.elements.borrow().get(index).cloned()
    }

    /// Returns `false` when `index` is out of bounds.
    pub fn set(&self, index: usize, value: Value) -> bool {
        match self.elements.borrow_mut().get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn push(&self, value: Value) {
        self.elements.borrow_mut().push(value);
    }

    pub fn elements(&self) -> Vec<Value> {
        self.elements.borrow().clone()
    }
}

impl fmt::Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Array")
            .field("component", &self.component)
            .field("elements", &self.elements.borrow())
            .finish()
    }
}

/// An exception raised by native code.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{class_name}: {message}")]
pub struct Thrown {
    pub class_name: String,
    pub message: String,
    /// The thrown object when native code produced one, `Value::Null` otherwise.
    pub value: Value,
}

impl Thrown {
    pub fn new(class_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            message: message.into(),
            value: Value::Null,
        }
    }

    pub fn with_value(mut self, value: Value) -> Self {
        self.value = value;
        self
    }

    pub fn null_pointer(message: impl Into<String>) -> Self {
        Self::new("java.lang.NullPointerException", message)
    }

    pub fn arithmetic(message: impl Into<String>) -> Self {
        Self::new("java.lang.ArithmeticException", message)
    }

    pub fn index_out_of_bounds(index: i64, len: usize) -> Self {
        Self::new(
            "java.lang.ArrayIndexOutOfBoundsException",
            format!("Index {index} out of bounds for length {len}"),
        )
    }

    pub fn class_cast(message: impl Into<String>) -> Self {
        Self::new("java.lang.ClassCastException", message)
    }

    pub fn illegal_argument(message: impl Into<String>) -> Self {
        Self::new("java.lang.IllegalArgumentException", message)
    }
}
