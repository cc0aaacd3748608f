use jexpr_types::{
    is_subclass, is_subtype, ClassDef, ClassKind, Invocation, MethodDef, PrimitiveType, Type,
    TypeStore, Value,
};

#[test]
fn collections_form_the_usual_hierarchy() {
    let store = TypeStore::with_minimal_jdk();

    let collection = store
        .class_id("java.util.Collection")
        .expect("Collection must exist in minimal JDK");
    let set = store.class_id("java.util.Set").expect("Set");
    let hash_set = store.class_id("java.util.HashSet").expect("HashSet");
    let integer = store.boxed_type(PrimitiveType::Int);

    assert!(is_subclass(&store, hash_set, set));
    assert!(is_subclass(&store, hash_set, collection));
    assert!(!is_subclass(&store, collection, set));

    let collection_of_int = Type::class(collection, vec![integer.clone()]);
    let set_of_int = Type::class(set, vec![integer.clone()]);
    assert!(!is_subtype(&store, &collection_of_int, &set_of_int));
    assert!(is_subtype(&store, &set_of_int, &collection_of_int));
    assert!(is_subtype(
        &store,
        &Type::class(hash_set, vec![]),
        &set_of_int
    ));
    assert!(!is_subtype(
        &store,
        &set_of_int,
        &Type::class(set, vec![store.string_type()])
    ));
}

#[test]
fn interfaces_are_subtypes_of_object() {
    let store = TypeStore::with_minimal_jdk();
    let object = store.object_type();
    let char_sequence = Type::class(store.well_known().char_sequence, vec![]);

    assert!(is_subtype(&store, &char_sequence, &object));
    assert!(is_subtype(&store, &store.string_type(), &char_sequence));
}

#[test]
fn packages_are_registered_with_their_parents() {
    let store = TypeStore::with_minimal_jdk();

    assert!(store.is_package("java"));
    assert!(store.is_package("java.lang"));
    assert!(!store.is_package("java.lang.String"));
    assert_eq!(store.sub_packages(None), vec!["java"]);
    assert_eq!(store.sub_packages(Some("java")), vec!["java.io", "java.lang", "java.util"]);
}

#[test]
fn nested_classes_are_found_by_binary_name() {
    let mut store = TypeStore::with_minimal_jdk();
    let outer = store.add_class(ClassDef {
        name: "com.example.Outer".to_owned(),
        super_class: Some(store.object_type()),
        ..ClassDef::default()
    });
    let inner = store.add_class(ClassDef {
        name: "com.example.Outer$Inner".to_owned(),
        kind: ClassKind::Interface,
        ..ClassDef::default()
    });

    assert_eq!(store.nested_classes_of(outer), vec![inner]);
    assert_eq!(store.top_level_classes_in("com.example"), vec![outer]);
    assert_eq!(
        jexpr_types::format_type(&store, &Type::class(inner, vec![])),
        "Outer.Inner"
    );
}

#[test]
fn native_bodies_see_receiver_and_arguments() {
    let store = TypeStore::with_minimal_jdk();
    let string = store.class(store.well_known().string).expect("String");
    let substring = string
        .methods
        .iter()
        .find(|m| m.name == "substring" && m.params.len() == 2)
        .expect("substring(int, int)");
    let body = substring.body.as_ref().expect("native body");

    let receiver = Value::string("expression");
    let args = [Value::Int(2), Value::Int(5)];
    let result = body(&Invocation {
        store: &store,
        receiver: &receiver,
        args: &args,
    });
    assert_eq!(result.ok(), Some(Value::string("pre")));

    let args = [Value::Int(5), Value::Int(2)];
    let err = body(&Invocation {
        store: &store,
        receiver: &receiver,
        args: &args,
    })
    .expect_err("reversed bounds must throw");
    assert_eq!(err.class_name, "java.lang.StringIndexOutOfBoundsException");
}

#[test]
fn statics_are_initialized_on_registration() {
    let store = TypeStore::with_minimal_jdk();
    let integer = store.box_class(PrimitiveType::Int);
    assert_eq!(
        store.static_value(integer, "MAX_VALUE"),
        Some(Value::Int(i32::MAX))
    );

    store.set_static_value(integer, "MAX_VALUE", Value::Int(0));
    assert_eq!(store.static_value(integer, "MAX_VALUE"), Some(Value::Int(0)));
}

#[test]
fn redefining_a_class_keeps_its_id() {
    let mut store = TypeStore::new();
    let id = store.add_class(ClassDef::new("Foo"));
    let again = store.add_class(ClassDef {
        name: "Foo".to_owned(),
        methods: vec![MethodDef::new("bar", vec![], Type::Void)],
        ..ClassDef::default()
    });
    assert_eq!(id, again);
    assert_eq!(store.class(id).map(|def| def.methods.len()), Some(1));
}
