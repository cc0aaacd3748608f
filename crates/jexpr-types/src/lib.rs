//! Class model, runtime values and Java typing rules.
//!
//! Rust has no runtime reflection, so embedders describe the classes an expression may touch
//! with [`ClassDef`]s registered in a [`TypeStore`]. Methods and constructors carry native
//! closures ([`NativeFn`]) that run only when an expression is actually evaluated; every other
//! consumer (completion, overload resolution, validation passes) looks at declared metadata only.

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::rc::Rc;

pub mod java;
mod jdk;
mod value;

pub use java::conversion::{
    binary_numeric_promotion, is_castable, rate_type_match, unary_numeric_promotion, TypeMatch,
};
pub use java::format::{format_executable, format_type, format_type_qualified};
pub use java::subtyping::{is_subclass, is_subtype};
pub use value::{format_double, format_float, Array, ArrayRef, Object, ObjectRef, Thrown, Value};

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(u32);

impl ClassId {
    pub const fn to_raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassId({})", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveType {
    pub const ALL: [PrimitiveType; 8] = [
        PrimitiveType::Boolean,
        PrimitiveType::Byte,
        PrimitiveType::Short,
        PrimitiveType::Char,
        PrimitiveType::Int,
        PrimitiveType::Long,
        PrimitiveType::Float,
        PrimitiveType::Double,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Short => "short",
            PrimitiveType::Char => "char",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    pub fn is_numeric(self) -> bool {
        self != PrimitiveType::Boolean
    }

    pub fn is_integral(self) -> bool {
        matches!(
            self,
            PrimitiveType::Byte
                | PrimitiveType::Short
                | PrimitiveType::Char
                | PrimitiveType::Int
                | PrimitiveType::Long
        )
    }

    /// Binary name of the wrapper class.
    pub fn box_class_name(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "java.lang.Boolean",
            PrimitiveType::Byte => "java.lang.Byte",
            PrimitiveType::Short => "java.lang.Short",
            PrimitiveType::Char => "java.lang.Character",
            PrimitiveType::Int => "java.lang.Integer",
            PrimitiveType::Long => "java.lang.Long",
            PrimitiveType::Float => "java.lang.Float",
            PrimitiveType::Double => "java.lang.Double",
        }
    }

    /// Widening primitive conversion (JLS 5.1.2). Identity is not a widening.
    pub fn widens_to(self, target: PrimitiveType) -> bool {
        use PrimitiveType::*;
        matches!(
            (self, target),
            (Byte, Short | Int | Long | Float | Double)
                | (Short, Int | Long | Float | Double)
                | (Char, Int | Long | Float | Double)
                | (Int, Long | Float | Double)
                | (Long, Float | Double)
                | (Float, Double)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassType {
    pub def: ClassId,
    pub args: Vec<Type>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Void,
    /// Type of the `null` literal.
    Null,
    /// Not known statically; the runtime type decides.
    Unknown,
    Primitive(PrimitiveType),
    Class(ClassType),
    Array(Box<Type>),
}

impl Type {
    pub fn class(def: ClassId, args: Vec<Type>) -> Self {
        Type::Class(ClassType { def, args })
    }

    pub fn array(component: Type) -> Self {
        Type::Array(Box::new(component))
    }

    pub fn boolean() -> Self {
        Type::Primitive(PrimitiveType::Boolean)
    }

    pub fn char() -> Self {
        Type::Primitive(PrimitiveType::Char)
    }

    pub fn int() -> Self {
        Type::Primitive(PrimitiveType::Int)
    }

    pub fn long() -> Self {
        Type::Primitive(PrimitiveType::Long)
    }

    pub fn float() -> Self {
        Type::Primitive(PrimitiveType::Float)
    }

    pub fn double() -> Self {
        Type::Primitive(PrimitiveType::Double)
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, Type::Primitive(_))
    }

    pub fn is_reference(&self) -> bool {
        matches!(
            self,
            Type::Null | Type::Unknown | Type::Class(_) | Type::Array(_)
        )
    }

    pub fn as_primitive(&self) -> Option<PrimitiveType> {
        match self {
            Type::Primitive(p) => Some(*p),
            _ => None,
        }
    }

    pub fn class_id(&self) -> Option<ClassId> {
        match self {
            Type::Class(ClassType { def, .. }) => Some(*def),
            _ => None,
        }
    }

    pub fn component_type(&self) -> Option<&Type> {
        match self {
            Type::Array(component) => Some(component),
            _ => None,
        }
    }

    /// The type with all type arguments removed.
    pub fn erasure(&self) -> Type {
        match self {
            Type::Class(ClassType { def, .. }) => Type::class(*def, vec![]),
            Type::Array(component) => Type::array(component.erasure()),
            other => other.clone(),
        }
    }
}

/// Java access levels, ordered from most to least visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AccessModifier {
    Public,
    Protected,
    PackagePrivate,
    Private,
}

impl AccessModifier {
    /// Whether a member with this access is visible when `minimum` is the least visible level
    /// that should still be shown.
    pub fn satisfies(self, minimum: AccessModifier) -> bool {
        self <= minimum
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    Class,
    Interface,
}

/// Everything a native method or constructor body gets to see.
pub struct Invocation<'a> {
    pub store: &'a TypeStore,
    /// The receiver for instance methods, the freshly allocated object for constructors and
    /// `Value::Null` for static methods.
    pub receiver: &'a Value,
    pub args: &'a [Value],
}

impl Invocation<'_> {
    pub fn arg(&self, index: usize) -> Value {
        self.args.get(index).cloned().unwrap_or(Value::Null)
    }
}

pub type NativeFn = Rc<dyn Fn(&Invocation<'_>) -> Result<Value, Thrown>>;

#[derive(Debug, Clone)]
pub struct FieldDef {
    pub name: String,
    pub ty: Type,
    pub access: AccessModifier,
    pub is_static: bool,
    pub is_final: bool,
    /// Initial value of static fields; instance fields start with their type's default.
    pub initial_value: Option<Value>,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            access: AccessModifier::Public,
            is_static: false,
            is_final: false,
            initial_value: None,
        }
    }

    pub fn with_access(mut self, access: AccessModifier) -> Self {
        self.access = access;
        self
    }

    pub fn make_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn make_final(mut self) -> Self {
        self.is_final = true;
        self
    }

    pub fn with_initial_value(mut self, value: Value) -> Self {
        self.initial_value = Some(value);
        self
    }
}

#[derive(Clone)]
pub struct MethodDef {
    pub name: String,
    pub params: Vec<Type>,
    pub return_type: Type,
    pub access: AccessModifier,
    pub is_static: bool,
    pub is_varargs: bool,
    /// `None` for abstract methods; invocation dispatches to an override.
    pub body: Option<NativeFn>,
}

impl MethodDef {
    pub fn new(name: impl Into<String>, params: Vec<Type>, return_type: Type) -> Self {
        Self {
            name: name.into(),
            params,
            return_type,
            access: AccessModifier::Public,
            is_static: false,
            is_varargs: false,
            body: None,
        }
    }

    pub fn with_access(mut self, access: AccessModifier) -> Self {
        self.access = access;
        self
    }

    pub fn make_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn make_varargs(mut self) -> Self {
        self.is_varargs = true;
        self
    }

    pub fn with_body(
        mut self,
        body: impl Fn(&Invocation<'_>) -> Result<Value, Thrown> + 'static,
    ) -> Self {
        self.body = Some(Rc::new(body));
        self
    }
}

impl fmt::Debug for MethodDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDef")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("return_type", &self.return_type)
            .field("access", &self.access)
            .field("is_static", &self.is_static)
            .field("is_varargs", &self.is_varargs)
            .field("has_body", &self.body.is_some())
            .finish()
    }
}

#[derive(Clone)]
pub struct ConstructorDef {
    pub params: Vec<Type>,
    pub access: AccessModifier,
    pub is_varargs: bool,
    /// Runs against the freshly allocated object and returns the constructed value (usually
    /// the receiver itself). `None` only allocates.
    pub body: Option<NativeFn>,
}

impl ConstructorDef {
    pub fn new(params: Vec<Type>) -> Self {
        Self {
            params,
            access: AccessModifier::Public,
            is_varargs: false,
            body: None,
        }
    }

    pub fn with_access(mut self, access: AccessModifier) -> Self {
        self.access = access;
        self
    }

    pub fn make_varargs(mut self) -> Self {
        self.is_varargs = true;
        self
    }

    pub fn with_body(
        mut self,
        body: impl Fn(&Invocation<'_>) -> Result<Value, Thrown> + 'static,
    ) -> Self {
        self.body = Some(Rc::new(body));
        self
    }
}

impl fmt::Debug for ConstructorDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorDef")
            .field("params", &self.params)
            .field("access", &self.access)
            .field("is_varargs", &self.is_varargs)
            .field("has_body", &self.body.is_some())
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ClassDef {
    /// Binary name, e.g. `java.util.Map$Entry`.
    pub name: String,
    pub kind: ClassKind,
    pub access: AccessModifier,
    pub type_params: Vec<String>,
    pub super_class: Option<Type>,
    pub interfaces: Vec<Type>,
    pub fields: Vec<FieldDef>,
    pub methods: Vec<MethodDef>,
    pub constructors: Vec<ConstructorDef>,
}

impl Default for ClassDef {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: ClassKind::Class,
            access: AccessModifier::Public,
            type_params: Vec::new(),
            super_class: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
        }
    }
}

impl ClassDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn package(&self) -> &str {
        package_of(&self.name)
    }

    pub fn simple_name(&self) -> &str {
        simple_name_of(&self.name)
    }

    pub fn is_nested(&self) -> bool {
        self.name.contains('$')
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Package part of a binary class name (`""` for the default package).
pub fn package_of(binary_name: &str) -> &str {
    binary_name
        .rfind('.')
        .map(|idx| &binary_name[..idx])
        .unwrap_or("")
}

/// Simple name of a binary class name (`Entry` for `java.util.Map$Entry`).
pub fn simple_name_of(binary_name: &str) -> &str {
    let start = binary_name
        .rfind(|c| c == '.' || c == '$')
        .map(|idx| idx + 1)
        .unwrap_or(0);
    &binary_name[start..]
}

/// IDs of classes the typing rules refer to directly.
#[derive(Debug, Clone, Copy)]
pub struct WellKnownTypes {
    pub object: ClassId,
    pub string: ClassId,
    pub class: ClassId,
    pub cloneable: ClassId,
    pub serializable: ClassId,
    pub number: ClassId,
    pub char_sequence: ClassId,
    pub comparable: ClassId,
    pub boolean: ClassId,
    pub byte: ClassId,
    pub short: ClassId,
    pub character: ClassId,
    pub integer: ClassId,
    pub long: ClassId,
    pub float: ClassId,
    pub double: ClassId,
}

/// The class index consulted by parsing, ranking and evaluation.
///
/// Class IDs can be interned before their definition is added so native bodies can refer to
/// the class they belong to.
pub struct TypeStore {
    names: Vec<String>,
    defs: Vec<Option<ClassDef>>,
    by_name: HashMap<String, ClassId>,
    packages: BTreeSet<String>,
    statics: RefCell<HashMap<(ClassId, String), Value>>,
    well_known: WellKnownTypes,
}

impl Default for TypeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TypeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeStore")
            .field("classes", &self.names.len())
            .field("packages", &self.packages.len())
            .finish_non_exhaustive()
    }
}

impl TypeStore {
    /// A store that knows the names of the well-known classes but defines none of them.
    pub fn new() -> Self {
        let mut store = TypeStore {
            names: Vec::new(),
            defs: Vec::new(),
            by_name: HashMap::new(),
            packages: BTreeSet::new(),
            statics: RefCell::new(HashMap::new()),
            well_known: WellKnownTypes {
                object: ClassId(0),
                string: ClassId(0),
                class: ClassId(0),
                cloneable: ClassId(0),
                serializable: ClassId(0),
                number: ClassId(0),
                char_sequence: ClassId(0),
                comparable: ClassId(0),
                boolean: ClassId(0),
                byte: ClassId(0),
                short: ClassId(0),
                character: ClassId(0),
                integer: ClassId(0),
                long: ClassId(0),
                float: ClassId(0),
                double: ClassId(0),
            },
        };
        store.well_known = WellKnownTypes {
            object: store.intern_class_id("java.lang.Object"),
            string: store.intern_class_id("java.lang.String"),
            class: store.intern_class_id("java.lang.Class"),
            cloneable: store.intern_class_id("java.lang.Cloneable"),
            serializable: store.intern_class_id("java.io.Serializable"),
            number: store.intern_class_id("java.lang.Number"),
            char_sequence: store.intern_class_id("java.lang.CharSequence"),
            comparable: store.intern_class_id("java.lang.Comparable"),
            boolean: store.intern_class_id("java.lang.Boolean"),
            byte: store.intern_class_id("java.lang.Byte"),
            short: store.intern_class_id("java.lang.Short"),
            character: store.intern_class_id("java.lang.Character"),
            integer: store.intern_class_id("java.lang.Integer"),
            long: store.intern_class_id("java.lang.Long"),
            float: store.intern_class_id("java.lang.Float"),
            double: store.intern_class_id("java.lang.Double"),
        };
        store
    }

    /// A store with the small slice of `java.lang`/`java.util` the engine relies on.
    pub fn with_minimal_jdk() -> Self {
        let mut store = Self::new();
        jdk::install(&mut store);
        store
    }

    pub fn well_known(&self) -> &WellKnownTypes {
        &self.well_known
    }

    pub fn intern_class_id(&mut self, name: &str) -> ClassId {
        if let Some(id) = self.by_name.get(name) {
            return *id;
        }
        let id = ClassId(self.names.len() as u32);
        self.names.push(name.to_owned());
        self.defs.push(None);
        self.by_name.insert(name.to_owned(), id);
        id
    }

    /// Define (or redefine) a class.
    pub fn add_class(&mut self, def: ClassDef) -> ClassId {
        let id = self.intern_class_id(&def.name);

        let mut package = package_of(&def.name);
        while !package.is_empty() {
            self.packages.insert(package.to_owned());
            package = package_of(package);
        }

        {
            let mut statics = self.statics.borrow_mut();
            for field in def.fields.iter().filter(|f| f.is_static) {
                let value = field
                    .initial_value
                    .clone()
                    .unwrap_or_else(|| Value::default_for(&field.ty));
                statics.insert((id, field.name.clone()), value);
            }
        }

        self.defs[id.0 as usize] = Some(def);
        id
    }

    pub fn class(&self, id: ClassId) -> Option<&ClassDef> {
        self.defs.get(id.0 as usize).and_then(Option::as_ref)
    }

    /// ID of a *defined* class.
    pub fn class_id(&self, name: &str) -> Option<ClassId> {
        let id = *self.by_name.get(name)?;
        self.class(id).map(|_| id)
    }

    pub fn class_name(&self, id: ClassId) -> &str {
        self.names
            .get(id.0 as usize)
            .map(String::as_str)
            .unwrap_or("<unknown>")
    }

    pub fn classes(&self) -> impl Iterator<Item = (ClassId, &ClassDef)> + '_ {
        self.defs
            .iter()
            .enumerate()
            .filter_map(|(idx, def)| def.as_ref().map(|def| (ClassId(idx as u32), def)))
    }

    /// Top-level classes declared directly in `package` (`""` is the default package).
    pub fn top_level_classes_in(&self, package: &str) -> Vec<ClassId> {
        self.classes()
            .filter(|(_, def)| !def.is_nested() && def.package() == package)
            .map(|(id, _)| id)
            .collect()
    }

    /// Classes nested directly inside `outer`.
    pub fn nested_classes_of(&self, outer: ClassId) -> Vec<ClassId> {
        let prefix = format!("{}$", self.class_name(outer));
        self.classes()
            .filter(|(_, def)| {
                def.name
                    .strip_prefix(&prefix)
                    .is_some_and(|rest| !rest.contains('$'))
            })
            .map(|(id, _)| id)
            .collect()
    }

    pub fn is_package(&self, name: &str) -> bool {
        self.packages.contains(name)
    }

    /// Fully qualified names of the packages directly below `parent` (top-level packages for
    /// `None`).
    pub fn sub_packages(&self, parent: Option<&str>) -> Vec<&str> {
        self.packages
            .iter()
            .map(String::as_str)
            .filter(|pkg| match parent {
                None => !pkg.contains('.'),
                Some(parent) => pkg
                    .strip_prefix(parent)
                    .and_then(|rest| rest.strip_prefix('.'))
                    .is_some_and(|rest| !rest.is_empty() && !rest.contains('.')),
            })
            .collect()
    }

    pub fn static_value(&self, class: ClassId, field: &str) -> Option<Value> {
        self.statics
            .borrow()
            .get(&(class, field.to_owned()))
            .cloned()
    }

    pub fn set_static_value(&self, class: ClassId, field: &str, value: Value) {
        self.statics
            .borrow_mut()
            .insert((class, field.to_owned()), value);
    }

    pub fn box_class(&self, primitive: PrimitiveType) -> ClassId {
        let wk = &self.well_known;
        match primitive {
            PrimitiveType::Boolean => wk.boolean,
            PrimitiveType::Byte => wk.byte,
            PrimitiveType::Short => wk.short,
            PrimitiveType::Char => wk.character,
            PrimitiveType::Int => wk.integer,
            PrimitiveType::Long => wk.long,
            PrimitiveType::Float => wk.float,
            PrimitiveType::Double => wk.double,
        }
    }

    pub fn boxed_type(&self, primitive: PrimitiveType) -> Type {
        Type::class(self.box_class(primitive), vec![])
    }

    /// The primitive a wrapper class unboxes to.
    pub fn unboxed_type(&self, ty: &Type) -> Option<PrimitiveType> {
        let id = ty.class_id()?;
        PrimitiveType::ALL
            .into_iter()
            .find(|p| self.box_class(*p) == id)
    }

    /// Direct supertypes: the superclass, the interfaces and, for interfaces, `Object`.
    pub fn direct_supertypes(&self, id: ClassId) -> Vec<Type> {
        let Some(def) = self.class(id) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        if let Some(sc) = &def.super_class {
            out.push(sc.clone());
        }
        out.extend(def.interfaces.iter().cloned());
        if def.kind == ClassKind::Interface {
            out.push(Type::class(self.well_known.object, vec![]));
        }
        out
    }

    pub fn object_type(&self) -> Type {
        Type::class(self.well_known.object, vec![])
    }

    pub fn string_type(&self) -> Type {
        Type::class(self.well_known.string, vec![])
    }
}
