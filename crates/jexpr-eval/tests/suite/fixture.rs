//! A class with the members the integration tests exercise, and an instance of it to evaluate
//! against.

use jexpr_eval::{ExpressionEngine, ObjectInfo, Settings};
use jexpr_types::{
    AccessModifier, ClassDef, ClassId, ConstructorDef, FieldDef, Invocation, MethodDef, Object,
    PrimitiveType, Thrown, Type, TypeStore, Value,
};

pub const FIXTURE: &str = "Fixture";

pub struct Fixture {
    pub store: TypeStore,
    pub this: ObjectInfo,
}

impl Fixture {
    pub fn new() -> Self {
        let mut store = TypeStore::with_minimal_jdk();
        let class = store.intern_class_id(FIXTURE);
        let def = fixture_class(&store, class);
        store.add_class(def);
        let inner = ClassDef {
            name: format!("{FIXTURE}$Inner"),
            super_class: Some(store.object_type()),
            fields: vec![FieldDef::new("NAME", store.string_type())
                .make_static()
                .make_final()
                .with_initial_value(Value::string("inner"))],
            ..ClassDef::default()
        };
        store.add_class(inner);

        let this = ObjectInfo::new(
            Value::Object(Object::instantiate(&store, class)),
            Type::class(class, vec![]),
        );
        Self { store, this }
    }

    pub fn engine<'a>(&'a self, settings: &'a Settings) -> ExpressionEngine<'a> {
        ExpressionEngine::new(&self.store, settings)
    }

    /// How often a counting method has run on `this`.
    pub fn counter(&self) -> i64 {
        self.this
            .value
            .as_object()
            .and_then(|object| object.field("counter"))
            .and_then(|value| value.as_i64())
            .unwrap_or_default()
    }

    pub fn class_type(&self, name: &str) -> Type {
        let id = self
            .store
            .class_id(name)
            .unwrap_or_else(|| panic!("{name} is not defined"));
        Type::class(id, vec![])
    }
}

/// Increments the counter of the receiver and returns the new count.
fn bump(inv: &Invocation<'_>) -> i32 {
    let Some(this) = inv.receiver.as_object() else {
        return 0;
    };
    let next = this
        .field("counter")
        .and_then(|value| value.as_i64())
        .unwrap_or_default() as i32
        + 1;
    this.set_field("counter", Value::Int(next));
    next
}

fn counter(inv: &Invocation<'_>) -> Result<Value, Thrown> {
    let this = inv
        .receiver
        .as_object()
        .ok_or_else(|| Thrown::null_pointer("no receiver"))?;
    Ok(this.field("counter").unwrap_or(Value::Int(0)))
}

fn constant(value: i32) -> impl Fn(&Invocation<'_>) -> Result<Value, Thrown> {
    move |_| Ok(Value::Int(value))
}

fn fixture_class(store: &TypeStore, class: ClassId) -> ClassDef {
    let int = Type::int;
    let string = store.string_type();
    let this_type = Type::class(class, vec![]);
    let integer = store.boxed_type(PrimitiveType::Int);
    let set_of_integer = Type::class(
        store.class_id("java.util.Set").unwrap_or(class),
        vec![integer.clone()],
    );

    let fields = vec![
        FieldDef::new("counter", int()).with_access(AccessModifier::Private),
        FieldDef::new("value", int()),
        FieldDef::new("nameVisible", string.clone()),
        FieldDef::new("nameHidden", string.clone()).with_access(AccessModifier::PackagePrivate),
        FieldDef::new("CONSTANT", int())
            .make_static()
            .make_final()
            .with_initial_value(Value::Int(42)),
        FieldDef::new("count", int()).make_static(),
        FieldDef::new("size", int()),
    ];

    let methods = vec![
        // Ranking fixture: declaration order decides ties.
        MethodDef::new("xy", vec![Type::char(), Type::float()], int()).with_body(constant(1)),
        MethodDef::new("XY", vec![Type::float(), int()], int()).with_body(constant(2)),
        MethodDef::new(
            "xy_z",
            vec![int(), Type::char(), Type::float(), Type::double()],
            int(),
        )
        .with_body(constant(3)),
        MethodDef::new("XYZ", vec![Type::float(), int(), Type::double()], int())
            .with_body(constant(4)),
        MethodDef::new("XYZ", vec![string.clone(), int(), int()], int()).with_body(constant(5)),
        MethodDef::new("x", vec![], int()).with_body(constant(6)),
        MethodDef::new("X", vec![], int()).with_body(constant(7)),
        // Side effects.
        MethodDef::new("f", vec![int(), Type::float()], string.clone())
            .with_body(|_| Ok(Value::string("float"))),
        MethodDef::new("f", vec![int(), string.clone()], string.clone())
            .with_body(|inv| Ok(Value::string(format!("f{}", inv.arg(0).as_i64().unwrap_or(-1))))),
        // Neither accepts (int, String).
        MethodDef::new("pick", vec![int(), Type::float()], int()).with_body(constant(1)),
        MethodDef::new("pick", vec![string.clone(), int()], int()).with_body(constant(2)),
        MethodDef::new("g", vec![], int()).with_body(|inv| Ok(Value::Int(bump(inv)))),
        MethodDef::new("getInt", vec![], int()).with_body(|inv| {
            bump(inv);
            Ok(Value::Int(7))
        }),
        MethodDef::new("getCounter", vec![], int()).with_body(counter),
        MethodDef::new("getCounter", vec![Type::boolean()], int()).with_body(counter),
        MethodDef::new("reset", vec![], this_type).with_body(|inv| {
            if let Some(this) = inv.receiver.as_object() {
                this.set_field("counter", Value::Int(0));
            }
            Ok(inv.receiver.clone())
        }),
        MethodDef::new("TRUE", vec![], Type::boolean()).with_body(|inv| {
            bump(inv);
            Ok(Value::Boolean(true))
        }),
        MethodDef::new("FALSE", vec![], Type::boolean()).with_body(|inv| {
            bump(inv);
            Ok(Value::Boolean(false))
        }),
        // Shares its name with a field.
        MethodDef::new("size", vec![], int()).with_body(constant(99)),
        // Typing.
        MethodDef::new("testSetInt", vec![set_of_integer], int()).with_body(constant(1)),
        MethodDef::new("m", vec![integer.clone(), int()], int()).with_body(constant(1)),
        MethodDef::new("m", vec![int(), integer], int()).with_body(constant(2)),
        MethodDef::new("twice", vec![int()], int())
            .make_static()
            .with_body(|inv| Ok(Value::Int(inv.arg(0).as_i64().unwrap_or_default() as i32 * 2))),
        MethodDef::new("sum", vec![Type::array(int())], int())
            .make_varargs()
            .with_body(|inv| {
                let total = inv
                    .arg(0)
                    .as_array()
                    .map(|array| array.elements().iter().filter_map(Value::as_i64).sum::<i64>())
                    .unwrap_or_default();
                Ok(Value::Int(total as i32))
            }),
        // String arguments completed by providers.
        MethodDef::new("readFile", vec![string.clone()], string.clone())
            .with_body(|inv| Ok(inv.arg(0))),
        MethodDef::new("readFileIn", vec![string.clone(), string.clone()], string.clone())
            .with_body(|inv| Ok(inv.arg(1))),
    ];

    let constructors = vec![
        ConstructorDef::new(vec![]),
        ConstructorDef::new(vec![int()]).with_body(|inv| {
            if let Some(this) = inv.receiver.as_object() {
                this.set_field("value", inv.arg(0));
            }
            Ok(inv.receiver.clone())
        }),
    ];

    ClassDef {
        name: FIXTURE.to_owned(),
        super_class: Some(store.object_type()),
        fields,
        methods,
        constructors,
        ..ClassDef::default()
    }
}
