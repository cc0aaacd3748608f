use jexpr_types::{Array, Object, PrimitiveType, Type, TypeStore, Value};

#[test]
fn objects_compare_by_identity_and_strings_by_content() {
    let store = TypeStore::with_minimal_jdk();
    let object = store.well_known().object;

    let a = Value::Object(Object::new(object));
    let b = Value::Object(Object::new(object));
    assert_eq!(a, a.clone());
    assert_ne!(a, b);
    assert_eq!(Value::string("abc"), Value::string("abc"));
    assert_ne!(Value::Null, Value::Indeterminate);
}

#[test]
fn runtime_types_box_primitives() {
    let store = TypeStore::with_minimal_jdk();
    assert_eq!(
        Value::Int(1).runtime_type(&store),
        Some(store.boxed_type(PrimitiveType::Int))
    );
    assert_eq!(
        Value::string("x").runtime_type(&store),
        Some(store.string_type())
    );
    assert_eq!(Value::Null.runtime_type(&store), None);
    assert_eq!(Value::Indeterminate.runtime_type(&store), None);
}

#[test]
fn arrays_start_with_default_elements() {
    let array = Array::with_len(Type::int(), 3);
    assert_eq!(array.elements(), vec![Value::Int(0); 3]);
    assert!(array.set(2, Value::Int(7)));
    assert!(!array.set(3, Value::Int(7)));
    assert_eq!(array.get(2), Some(Value::Int(7)));
}

#[test]
fn instantiation_initializes_inherited_fields() {
    use jexpr_types::{ClassDef, FieldDef};

    let mut store = TypeStore::with_minimal_jdk();
    let base = store.add_class(ClassDef {
        name: "Base".to_owned(),
        super_class: Some(store.object_type()),
        fields: vec![FieldDef::new("count", Type::int())],
        ..ClassDef::default()
    });
    let derived = store.add_class(ClassDef {
        name: "Derived".to_owned(),
        super_class: Some(Type::class(base, vec![])),
        fields: vec![
            FieldDef::new("name", store.string_type()),
            FieldDef::new("shared", Type::long()).make_static(),
        ],
        ..ClassDef::default()
    });

    let object = Object::instantiate(&store, derived);
    assert_eq!(object.field("count"), Some(Value::Int(0)));
    assert_eq!(object.field("name"), Some(Value::Null));
    assert_eq!(object.field("shared"), None);
    assert_eq!(store.static_value(derived, "shared"), Some(Value::Long(0)));
}

#[test]
fn java_string_conversion() {
    assert_eq!(Value::Double(100.0).to_java_string().as_deref(), Some("100.0"));
    assert_eq!(Value::Float(1.5).to_java_string().as_deref(), Some("1.5"));
    assert_eq!(Value::char('x').to_java_string().as_deref(), Some("x"));
    assert_eq!(Value::Null.to_java_string().as_deref(), Some("null"));
    assert_eq!(Value::Indeterminate.to_java_string(), None);
}
