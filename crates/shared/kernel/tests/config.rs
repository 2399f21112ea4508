use serial_test::serial;
use std::fs;
use switcharoo_kernel::config::load_config;
use switcharoo_kernel::domain::config::AppConfig;
use tempfile::tempdir;

#[test]
#[serial]
fn missing_file_yields_defaults() {
    let dir = tempdir().expect("temp dir");
    let cfg: AppConfig = load_config(Some(dir.path().join("absent"))).expect("defaults");

    assert_eq!(cfg.store.toggle_retries, 8);
    assert_eq!(cfg.logging.name, "switcharoo");
}

#[test]
#[serial]
fn file_values_are_loaded() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("switcharoo.toml");
    fs::write(
        &path,
        "[logging]\nname = \"flags-api\"\nlevel = \"debug\"\n\n[store]\ntoggle_retries = 2\n",
    )
    .expect("write config");

    let cfg: AppConfig = load_config(Some(&path)).expect("load config");

    assert_eq!(cfg.logging.name, "flags-api");
    assert_eq!(cfg.logging.level, "debug");
    assert_eq!(cfg.store.toggle_retries, 2);
    assert_eq!(cfg.store.initial_capacity, 64);
}

#[test]
#[serial]
fn malformed_file_is_an_error() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[store]\ntoggle_retries = \"many\"\n").expect("write config");

    assert!(load_config::<AppConfig>(Some(&path)).is_err());
}
