use std::ffi::OsString;
use std::sync::Mutex;

use jexpr_config::{discover_config_path, load_for_dir, AccessLevel, JEXPR_CONFIG_ENV_VAR};

static ENV_LOCK: Mutex<()> = Mutex::new(());

struct EnvVarGuard {
    key: &'static str,
    prev: Option<OsString>,
}

impl EnvVarGuard {
    fn set(key: &'static str, value: impl Into<OsString>) -> Self {
        let prev = std::env::var_os(key);
        std::env::set_var(key, value.into());
        Self { key, prev }
    }

    fn remove(key: &'static str) -> Self {
        let prev = std::env::var_os(key);
        std::env::remove_var(key);
        Self { key, prev }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        match self.prev.take() {
            Some(value) => std::env::set_var(self.key, value),
            None => std::env::remove_var(self.key),
        }
    }
}

#[test]
fn missing_config_falls_back_to_defaults() {
    let _lock = ENV_LOCK.lock().unwrap_or_else(|err| err.into_inner());
    let _env = EnvVarGuard::remove(JEXPR_CONFIG_ENV_VAR);
    let dir = tempfile::tempdir().unwrap();

    let (config, path) = load_for_dir(dir.path()).unwrap();
    assert!(path.is_none());
    assert_eq!(config.access.minimum, AccessLevel::Private);
}

#[test]
fn plain_name_is_preferred_over_dotted() {
    let _lock = ENV_LOCK.lock().unwrap_or_else(|err| err.into_inner());
    let _env = EnvVarGuard::remove(JEXPR_CONFIG_ENV_VAR);
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("jexpr.toml"), "[access]\nminimum = \"public\"\n").unwrap();
    std::fs::write(
        dir.path().join(".jexpr.toml"),
        "[access]\nminimum = \"protected\"\n",
    )
    .unwrap();

    let (config, path) = load_for_dir(dir.path()).unwrap();
    assert!(path.unwrap().ends_with("jexpr.toml"));
    assert_eq!(config.access.minimum, AccessLevel::Public);
}

#[test]
fn env_var_overrides_discovery_relative_to_root() {
    let _lock = ENV_LOCK.lock().unwrap_or_else(|err| err.into_inner());
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("conf")).unwrap();
    std::fs::write(
        dir.path().join("conf/custom.toml"),
        "[evaluation]\ndynamic_typing = true\n",
    )
    .unwrap();
    std::fs::write(dir.path().join("jexpr.toml"), "").unwrap();
    let _env = EnvVarGuard::set(JEXPR_CONFIG_ENV_VAR, "conf/custom.toml");

    let discovered = discover_config_path(dir.path()).unwrap();
    assert!(discovered.ends_with("conf/custom.toml"));

    let (config, _) = load_for_dir(dir.path()).unwrap();
    assert!(config.evaluation.dynamic_typing);
}
