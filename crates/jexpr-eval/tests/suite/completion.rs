use jexpr_eval::{CompletionKind, Settings};
use jexpr_types::AccessModifier;
use pretty_assertions::assert_eq;

use super::fixture::Fixture;

fn texts(fx: &Fixture, settings: &Settings, text: &str, caret: usize) -> Vec<String> {
    fx.engine(settings)
        .completions(text, caret, &fx.this)
        .unwrap()
        .into_iter()
        .map(|completion| completion.text_to_insert)
        .collect()
}

#[test]
fn methods_rank_by_name_match_then_declaration() {
    let fx = Fixture::new();
    let settings = Settings::default();
    assert_eq!(
        texts(&fx, &settings, "xy", 2),
        ["xy(,)", "XY(,)", "xy_z(,,,)", "XYZ(,,)", "XYZ(,,)", "x()", "X()"]
    );
}

#[test]
fn completing_twice_gives_the_same_list() {
    let fx = Fixture::new();
    let settings = Settings::default();
    let engine = fx.engine(&settings);
    let first = engine.completions("xy", 2, &fx.this).unwrap();
    let second = engine.completions("xy", 2, &fx.this).unwrap();
    assert_eq!(first, second);
}

#[test]
fn method_completion_places_caret_inside_parentheses() {
    let fx = Fixture::new();
    let settings = Settings::default();
    let completions = fx.engine(&settings).completions("xy", 2, &fx.this).unwrap();
    let xy = &completions[0];
    assert_eq!(xy.display_text, "xy(char, float)");
    assert_eq!(xy.kind, CompletionKind::Method);
    assert_eq!(xy.insertion_range, 0..2);
    assert_eq!(xy.caret_position_after_insertion, 3);
}

#[test]
fn minimum_access_hides_less_visible_fields() {
    let fx = Fixture::new();
    let public_only = Settings::default().with_minimum_access(AccessModifier::Public);
    assert_eq!(texts(&fx, &public_only, "name", 4), ["nameVisible"]);

    let everything = Settings::default();
    let mut all = texts(&fx, &everything, "name", 4);
    all.sort();
    assert_eq!(all, ["nameHidden", "nameVisible"]);
}

#[test]
fn class_names_are_completed() {
    let fx = Fixture::new();
    let settings = Settings::default();
    let completions = fx.engine(&settings).completions("Str", 3, &fx.this).unwrap();
    let string = completions
        .iter()
        .find(|completion| completion.text_to_insert == "String")
        .expect("String is suggested");
    assert_eq!(string.kind, CompletionKind::Class);
}

#[test]
fn packages_and_their_classes_are_completed() {
    let fx = Fixture::new();
    let settings = Settings::default();
    let engine = fx.engine(&settings);

    let packages = engine.completions("java.ut", 7, &fx.this).unwrap();
    assert!(packages
        .iter()
        .any(|c| c.text_to_insert == "util" && c.kind == CompletionKind::Package));

    let classes = engine.completions("java.util.Ha", 12, &fx.this).unwrap();
    assert!(classes.iter().any(|c| c.text_to_insert == "HashSet"));
}

#[test]
fn class_literal_keyword_is_completed() {
    let fx = Fixture::new();
    let settings = Settings::default();
    let completions = fx.engine(&settings).completions("String.cl", 9, &fx.this).unwrap();
    assert!(completions
        .iter()
        .any(|c| c.text_to_insert == "class" && c.kind == CompletionKind::Keyword));
}

#[test]
fn argument_info_tracks_the_current_argument() {
    let fx = Fixture::new();
    let settings = Settings::default();
    let info = fx
        .engine(&settings)
        .executable_argument_info("xy('a', ", 8, &fx.this)
        .unwrap()
        .expect("caret is inside a call");
    assert_eq!(info.current_argument_index, 1);
    assert_eq!(info.signatures, vec![("xy(char, float)".to_owned(), true)]);

    let narrowed = fx
        .engine(&settings)
        .executable_argument_info("xy(1, ", 6, &fx.this)
        .unwrap()
        .expect("caret is inside a call");
    assert_eq!(narrowed.signatures, vec![("xy(char, float)".to_owned(), false)]);
}

#[test]
fn overloads_complete_with_their_own_arity() {
    let fx = Fixture::new();
    let settings = Settings::default();
    let completions = fx.engine(&settings).completions("XYZ", 3, &fx.this).unwrap();
    let overloads: Vec<(&str, &str, usize)> = completions
        .iter()
        .take(2)
        .map(|completion| {
            (
                completion.text_to_insert.as_str(),
                completion.display_text.as_str(),
                completion.caret_position_after_insertion,
            )
        })
        .collect();
    assert_eq!(
        overloads,
        [
            ("XYZ(,,)", "XYZ(float, int, double)", 4),
            ("XYZ(,,)", "XYZ(String, int, int)", 4),
        ]
    );
}

#[test]
fn caret_outside_the_text_is_rejected() {
    let fx = Fixture::new();
    let settings = Settings::default();
    assert!(fx.engine(&settings).completions("xy", 3, &fx.this).is_err());
}
