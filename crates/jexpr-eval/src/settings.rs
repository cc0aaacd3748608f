use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use jexpr_config::{AccessLevel, ExpressionConfig};
use jexpr_types::{AccessModifier, Type, Value};

use crate::object_tree::ObjectTreeNode;

/// A named value expressions can read and, unless final, assign.
pub struct Variable {
    name: String,
    declared_type: Type,
    value: RefCell<Value>,
    is_final: bool,
}

impl Variable {
    pub fn new(name: impl Into<String>, declared_type: Type, value: Value) -> Self {
        Self {
            name: name.into(),
            declared_type,
            value: RefCell::new(value),
            is_final: false,
        }
    }

    pub fn make_final(mut self) -> Self {
        self.is_final = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declared_type(&self) -> &Type {
        &self.declared_type
    }

    pub fn value(&self) -> Value {
        self.value.borrow().clone()
    }

    pub fn is_final(&self) -> bool {
        self.is_final
    }

    pub(crate) fn set(&self, value: Value) {
        *self.value.borrow_mut() = value;
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variable")
            .field("name", &self.name)
            .field("declared_type", &self.declared_type)
            .field("value", &self.value.borrow())
            .field("is_final", &self.is_final)
            .finish()
    }
}

/// Everything a parse consults besides the class index.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Least visible access level a member may have and still be used.
    pub minimum_access: AccessModifier,
    /// Fully qualified (binary) names usable by their simple name.
    pub imported_classes: Vec<String>,
    pub imported_packages: Vec<String>,
    pub variables: Vec<Rc<Variable>>,
    /// Root of the tree addressed by `{Name#Child}`; its children are the top-level nodes.
    pub custom_hierarchy: Option<Rc<ObjectTreeNode>>,
    pub dynamic_typing: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            minimum_access: AccessModifier::Private,
            imported_classes: Vec::new(),
            imported_packages: Vec::new(),
            variables: Vec::new(),
            custom_hierarchy: None,
            dynamic_typing: false,
        }
    }
}

impl Settings {
    pub fn from_config(config: &ExpressionConfig) -> Self {
        Self {
            minimum_access: access_modifier(config.access.minimum),
            imported_classes: config.imports.classes.clone(),
            imported_packages: config.imports.packages.clone(),
            dynamic_typing: config.evaluation.dynamic_typing,
            ..Self::default()
        }
    }

    pub fn with_minimum_access(mut self, minimum: AccessModifier) -> Self {
        self.minimum_access = minimum;
        self
    }

    pub fn with_imported_class(mut self, name: impl Into<String>) -> Self {
        self.imported_classes.push(name.into());
        self
    }

    pub fn with_imported_package(mut self, name: impl Into<String>) -> Self {
        self.imported_packages.push(name.into());
        self
    }

    /// Adds `variable`, replacing one with the same name.
    pub fn with_variable(mut self, variable: Variable) -> Self {
        self.variables.retain(|existing| existing.name() != variable.name());
        self.variables.push(Rc::new(variable));
        self
    }

    pub fn with_custom_hierarchy(mut self, root: ObjectTreeNode) -> Self {
        self.custom_hierarchy = Some(Rc::new(root));
        self
    }

    pub fn with_dynamic_typing(mut self, enabled: bool) -> Self {
        self.dynamic_typing = enabled;
        self
    }

    pub fn variable(&self, name: &str) -> Option<&Rc<Variable>> {
        self.variables.iter().find(|v| v.name() == name)
    }
}

fn access_modifier(level: AccessLevel) -> AccessModifier {
    match level {
        AccessLevel::Public => AccessModifier::Public,
        AccessLevel::Protected => AccessModifier::Protected,
        AccessLevel::PackagePrivate => AccessModifier::PackagePrivate,
        AccessLevel::Private => AccessModifier::Private,
    }
}
