use jexpr_types::{is_castable, is_subtype, rate_type_match, PrimitiveType, Type, TypeMatch, TypeStore};

fn class(store: &TypeStore, name: &str, args: Vec<Type>) -> Type {
    Type::class(store.class_id(name).unwrap(), args)
}

#[test]
fn collections_follow_their_interfaces() {
    let store = TypeStore::with_minimal_jdk();
    let hash_set = class(&store, "java.util.HashSet", vec![]);
    let set = class(&store, "java.util.Set", vec![]);
    let collection = class(&store, "java.util.Collection", vec![]);
    let list = class(&store, "java.util.List", vec![]);

    assert!(is_subtype(&store, &hash_set, &set));
    assert!(is_subtype(&store, &hash_set, &collection));
    assert!(is_subtype(&store, &set, &store.object_type()));
    assert!(!is_subtype(&store, &hash_set, &list));
    assert!(!is_subtype(&store, &collection, &set));
}

#[test]
fn type_arguments_only_matter_on_the_same_class() {
    let store = TypeStore::with_minimal_jdk();
    let integer = store.boxed_type(PrimitiveType::Int);
    let set_of_integer = class(&store, "java.util.Set", vec![integer.clone()]);
    let set_of_string = class(&store, "java.util.Set", vec![store.string_type()]);
    let raw_hash_set = class(&store, "java.util.HashSet", vec![]);
    let collection_of_integer = class(&store, "java.util.Collection", vec![integer]);

    assert!(!is_subtype(&store, &set_of_string, &set_of_integer));
    assert!(is_subtype(&store, &raw_hash_set, &set_of_integer));
    assert_eq!(
        rate_type_match(&store, &collection_of_integer, &set_of_integer),
        TypeMatch::None
    );
}

#[test]
fn casts_between_unrelated_classes_are_rejected() {
    let store = TypeStore::with_minimal_jdk();
    let string = store.string_type();
    let integer = store.boxed_type(PrimitiveType::Int);
    let collection = class(&store, "java.util.Collection", vec![]);

    assert!(is_castable(&store, &store.object_type(), &string));
    assert!(!is_castable(&store, &string, &integer));
    assert!(is_castable(&store, &integer, &collection));
    assert!(is_castable(&store, &Type::double(), &Type::char()));
    assert!(!is_castable(&store, &Type::boolean(), &Type::int()));
}
