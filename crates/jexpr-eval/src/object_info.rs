use std::rc::Rc;

use jexpr_types::{ArrayRef, ClassId, ObjectRef, Thrown, Type, TypeStore, Value};

use crate::settings::Variable;

/// A value together with the type it was declared with.
///
/// The value is [`Value::Indeterminate`] when the parse does not evaluate. A present setter
/// marks an assignable location.
#[derive(Debug, Clone)]
pub struct ObjectInfo {
    pub value: Value,
    pub declared_type: Type,
    pub setter: Option<ValueSetter>,
}

impl ObjectInfo {
    pub fn new(value: Value, declared_type: Type) -> Self {
        Self {
            value,
            declared_type,
            setter: None,
        }
    }

    pub fn indeterminate(declared_type: Type) -> Self {
        Self::new(Value::Indeterminate, declared_type)
    }

    pub fn null() -> Self {
        Self::new(Value::Null, Type::Null)
    }

    pub fn with_setter(mut self, setter: ValueSetter) -> Self {
        self.setter = Some(setter);
        self
    }

    pub fn is_assignable(&self) -> bool {
        self.setter.is_some()
    }

    /// The declared type, or the runtime type when nothing was declared.
    pub fn static_type(&self, store: &TypeStore) -> Type {
        match &self.declared_type {
            Type::Unknown => self.value.runtime_type(store).unwrap_or(Type::Unknown),
            declared => declared.clone(),
        }
    }

    /// The runtime type of references that hold a value; the static type otherwise.
    pub fn dynamic_type(&self, store: &TypeStore) -> Type {
        let declared = self.static_type(store);
        if declared.is_primitive() {
            return declared;
        }
        self.value.runtime_type(store).unwrap_or(declared)
    }
}

/// Where an assignment to an [`ObjectInfo`] writes to.
#[derive(Debug, Clone)]
pub enum ValueSetter {
    Variable(Rc<Variable>),
    Field { object: ObjectRef, name: String },
    StaticField { class: ClassId, name: String },
    ArrayElement { array: ArrayRef, index: usize },
    /// An assignable location whose target was not computed.
    Unevaluated,
}

impl ValueSetter {
    pub fn set(&self, store: &TypeStore, value: Value) -> Result<(), Thrown> {
        match self {
            ValueSetter::Variable(variable) => variable.set(value),
            ValueSetter::Field { object, name } => object.set_field(name, value),
            ValueSetter::StaticField { class, name } => store.set_static_value(*class, name, value),
            ValueSetter::ArrayElement { array, index } => {
                if !array.set(*index, value) {
                    return Err(Thrown::index_out_of_bounds(*index as i64, array.len()));
                }
            }
            ValueSetter::Unevaluated => {}
        }
        Ok(())
    }
}
