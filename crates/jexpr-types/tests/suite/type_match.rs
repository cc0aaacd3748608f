use jexpr_types::{is_castable, rate_type_match, PrimitiveType, Type, TypeMatch, TypeStore};

#[test]
fn ratings_are_ordered_best_first() {
    let mut ratings = vec![
        TypeMatch::None,
        TypeMatch::BoxedAndInheritance,
        TypeMatch::Boxed,
        TypeMatch::Full,
        TypeMatch::PrimitiveWidening,
        TypeMatch::BoxedAndWidening,
        TypeMatch::Inheritance,
    ];
    ratings.sort();
    assert_eq!(
        ratings,
        vec![
            TypeMatch::Full,
            TypeMatch::Inheritance,
            TypeMatch::PrimitiveWidening,
            TypeMatch::Boxed,
            TypeMatch::BoxedAndWidening,
            TypeMatch::BoxedAndInheritance,
            TypeMatch::None,
        ]
    );
}

#[test]
fn references_match_by_inheritance() {
    let store = TypeStore::with_minimal_jdk();
    let object = store.object_type();
    let string = store.string_type();

    assert_eq!(
        rate_type_match(&store, &string, &object),
        TypeMatch::Inheritance
    );
    assert_eq!(rate_type_match(&store, &object, &string), TypeMatch::None);
    assert_eq!(
        rate_type_match(&store, &Type::Null, &string),
        TypeMatch::Inheritance
    );
    assert_eq!(
        rate_type_match(&store, &Type::Unknown, &string),
        TypeMatch::Inheritance
    );
}

#[test]
fn narrowing_is_never_implicit() {
    let store = TypeStore::with_minimal_jdk();
    assert_eq!(
        rate_type_match(&store, &Type::long(), &Type::int()),
        TypeMatch::None
    );
    assert_eq!(
        rate_type_match(&store, &Type::char(), &Type::Primitive(PrimitiveType::Short)),
        TypeMatch::None
    );
    assert_eq!(
        rate_type_match(&store, &store.boxed_type(PrimitiveType::Long), &Type::int()),
        TypeMatch::None
    );
}

#[test]
fn casts_allow_narrowing_and_downcasts() {
    let store = TypeStore::with_minimal_jdk();
    assert!(is_castable(&store, &Type::double(), &Type::int()));
    assert!(!is_castable(&store, &Type::boolean(), &Type::int()));
    assert!(is_castable(&store, &store.object_type(), &store.string_type()));

    let integer = store.boxed_type(PrimitiveType::Int);
    assert!(!is_castable(&store, &store.string_type(), &integer));
}
