use std::fs;
use std::rc::Rc;

use jexpr_eval::{CompletionKind, CompletionProviders, PathCompletionProvider, Settings};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use super::fixture::{Fixture, FIXTURE};

fn workspace() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("src")).unwrap();
    fs::create_dir_all(dir.path().join("data").join("nested")).unwrap();
    fs::write(dir.path().join("notes.txt"), "").unwrap();
    dir
}

fn providers(dir: &TempDir) -> CompletionProviders {
    CompletionProviders::default()
        .with(FIXTURE, "readFile", 0, Rc::new(PathCompletionProvider::new(dir.path())))
        .with(
            FIXTURE,
            "readFileIn",
            1,
            Rc::new(PathCompletionProvider::new(dir.path()).relative_to_argument(0)),
        )
}

#[test]
fn paths_are_completed_inside_string_arguments() {
    let dir = workspace();
    let fx = Fixture::new();
    let settings = Settings::default();
    let engine = fx.engine(&settings).with_providers(providers(&dir));

    let text = "readFile(\"sr";
    let completions = engine.completions(text, text.len(), &fx.this).unwrap();
    assert_eq!(completions.len(), 1);
    assert_eq!(completions[0].text_to_insert, "src/");
    assert_eq!(completions[0].insertion_range, 10..12);
    assert_eq!(completions[0].caret_position_after_insertion, 14);
    assert_eq!(completions[0].kind, CompletionKind::StringLiteral);
}

#[test]
fn empty_literal_lists_the_whole_directory() {
    let dir = workspace();
    let fx = Fixture::new();
    let settings = Settings::default();
    let engine = fx.engine(&settings).with_providers(providers(&dir));

    let text = "readFile(\"\")";
    let completions = engine.completions(text, 10, &fx.this).unwrap();
    let names: Vec<&str> = completions.iter().map(|c| c.text_to_insert.as_str()).collect();
    assert_eq!(names, ["data/", "notes.txt", "src/"]);
    assert_eq!(completions[0].insertion_range, 10..10);
}

#[test]
fn earlier_argument_selects_the_base_directory() {
    let dir = workspace();
    let fx = Fixture::new();
    let settings = Settings::default();
    let engine = fx.engine(&settings).with_providers(providers(&dir));

    let text = "readFileIn(\"data\", \"ne";
    let completions = engine.completions(text, text.len(), &fx.this).unwrap();
    let names: Vec<&str> = completions.iter().map(|c| c.text_to_insert.as_str()).collect();
    assert_eq!(names, ["nested/"]);
    assert_eq!(completions[0].insertion_range, 20..22);
}

#[test]
fn argument_info_accompanies_string_completions() {
    let dir = workspace();
    let fx = Fixture::new();
    let settings = Settings::default();
    let engine = fx.engine(&settings).with_providers(providers(&dir));

    let info = engine
        .executable_argument_info("readFile(\"sr", 12, &fx.this)
        .unwrap()
        .expect("caret is inside a call");
    assert_eq!(info.current_argument_index, 0);
    assert_eq!(info.signatures, vec![("readFile(String)".to_owned(), true)]);
}

#[test]
fn unregistered_parameters_get_no_suggestions() {
    let dir = workspace();
    let fx = Fixture::new();
    let settings = Settings::default();
    let engine = fx.engine(&settings).with_providers(providers(&dir));

    let text = "readFileIn(\"sr";
    let completions = engine.completions(text, text.len(), &fx.this).unwrap();
    assert_eq!(completions, vec![]);
}
