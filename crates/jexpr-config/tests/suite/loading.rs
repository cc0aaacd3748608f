use jexpr_config::{AccessLevel, ConfigError, ExpressionConfig, LoggingConfig};
use pretty_assertions::assert_eq;

#[test]
fn empty_file_uses_defaults() {
    let config = ExpressionConfig::load_from_str("").unwrap();
    assert_eq!(config, ExpressionConfig::default());
    assert_eq!(config.access.minimum, AccessLevel::Private);
    assert_eq!(config.logging, LoggingConfig::default());
    assert!(!config.evaluation.dynamic_typing);
}

#[test]
fn full_config_round_trips_sections() {
    let config = ExpressionConfig::load_from_str(
        r#"
[access]
minimum = "package-private"

[imports]
classes = ["java.util.ArrayList", "java.util.Map$Entry"]
packages = ["java.util"]

[evaluation]
dynamic_typing = true

[logging]
level = "debug"
json = true
"#,
    )
    .unwrap();

    assert_eq!(config.access.minimum, AccessLevel::PackagePrivate);
    assert_eq!(
        config.imports.classes,
        vec![
            "java.util.ArrayList".to_owned(),
            "java.util.Map$Entry".to_owned()
        ]
    );
    assert_eq!(config.imports.packages, vec!["java.util".to_owned()]);
    assert!(config.evaluation.dynamic_typing);
    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.json);
}

#[test]
fn unknown_keys_are_rejected() {
    let err = ExpressionConfig::load_from_str("[access]\nminimal = \"public\"\n").unwrap_err();
    match err {
        ConfigError::Toml(message) => assert!(message.contains("minimal"), "{message}"),
        other => panic!("expected toml error, got {other:?}"),
    }

    let err = ExpressionConfig::load_from_str("[ranking]\n").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn unknown_access_level_is_rejected() {
    let err = ExpressionConfig::load_from_str("[access]\nminimum = \"friend\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn malformed_import_names_are_invalid() {
    let err =
        ExpressionConfig::load_from_str("[imports]\npackages = [\"java..util\"]\n").unwrap_err();
    match err {
        ConfigError::Invalid { key, .. } => assert_eq!(key, "imports.packages"),
        other => panic!("expected invalid value, got {other:?}"),
    }
}

#[test]
fn load_from_path_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jexpr.toml");
    std::fs::write(&path, "[access]\nminimum = \"public\"\n").unwrap();

    let config = ExpressionConfig::load_from_path(&path).unwrap();
    assert_eq!(config.access.minimum, AccessLevel::Public);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ExpressionConfig::load_from_path(dir.path().join("missing.toml")).unwrap_err();
    match err {
        ConfigError::Io { path, .. } => assert!(path.ends_with("missing.toml")),
        other => panic!("expected io error, got {other:?}"),
    }
}

#[test]
fn tracing_is_installed_at_most_once() {
    let config = LoggingConfig {
        level: "jexpr_eval=debug".to_owned(),
        ..LoggingConfig::default()
    };
    jexpr_config::init_tracing(&config);
    assert!(!jexpr_config::init_tracing(&config));
}
