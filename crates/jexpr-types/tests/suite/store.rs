use jexpr_types::{
    format_type, format_type_qualified, ClassDef, FieldDef, Type, TypeStore, Value,
};
use pretty_assertions::assert_eq;

fn store_with_nested() -> TypeStore {
    let mut store = TypeStore::with_minimal_jdk();
    let int = Type::int();
    store.add_class(ClassDef {
        name: "demo.shapes.Shape".to_owned(),
        fields: vec![FieldDef::new("COUNT", int.clone()).make_static()],
        ..ClassDef::default()
    });
    store.add_class(ClassDef {
        name: "demo.shapes.Shape$Corner".to_owned(),
        fields: vec![FieldDef::new("ORIGIN", int)
            .make_static()
            .make_final()
            .with_initial_value(Value::Int(7))],
        ..ClassDef::default()
    });
    store
}

#[test]
fn packages_are_registered_with_their_parents() {
    let store = store_with_nested();
    assert!(store.is_package("demo"));
    assert!(store.is_package("demo.shapes"));
    assert!(!store.is_package("demo.shapes.Shape"));
    assert_eq!(store.sub_packages(Some("demo")), ["demo.shapes"]);
    assert!(store.sub_packages(None).contains(&"demo"));
}

#[test]
fn nested_classes_are_not_top_level() {
    let store = store_with_nested();
    let shape = store.class_id("demo.shapes.Shape").unwrap();
    let corner = store.class_id("demo.shapes.Shape$Corner").unwrap();
    assert_eq!(store.top_level_classes_in("demo.shapes"), vec![shape]);
    assert_eq!(store.nested_classes_of(shape), vec![corner]);
    assert!(store.class(corner).unwrap().is_nested());
}

#[test]
fn static_fields_start_with_their_initial_value() {
    let store = store_with_nested();
    let shape = store.class_id("demo.shapes.Shape").unwrap();
    let corner = store.class_id("demo.shapes.Shape$Corner").unwrap();
    assert_eq!(store.static_value(shape, "COUNT"), Some(Value::Int(0)));
    assert_eq!(store.static_value(corner, "ORIGIN"), Some(Value::Int(7)));

    store.set_static_value(shape, "COUNT", Value::Int(3));
    assert_eq!(store.static_value(shape, "COUNT"), Some(Value::Int(3)));
}

#[test]
fn interned_names_are_not_defined_classes() {
    let mut store = TypeStore::with_minimal_jdk();
    let id = store.intern_class_id("demo.Later");
    assert_eq!(store.class_id("demo.Later"), None);
    assert_eq!(store.class_name(id), "demo.Later");
}

#[test]
fn nested_types_format_with_dots() {
    let store = store_with_nested();
    let corner = Type::class(store.class_id("demo.shapes.Shape$Corner").unwrap(), vec![]);
    assert_eq!(format_type(&store, &corner), "Shape.Corner");
    assert_eq!(
        format_type_qualified(&store, &Type::array(corner)),
        "demo.shapes.Shape.Corner[]"
    );
}
