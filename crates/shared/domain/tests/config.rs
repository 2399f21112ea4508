use serde_json::json;
use switcharoo_domain::config::{AppConfig, LoggingConfig, StoreConfig};

#[test]
fn config_defaults_are_sane() {
    let logging = LoggingConfig::default();
    assert_eq!(logging.name, "switcharoo");
    assert_eq!(logging.level, "info");
    assert!(logging.console);
    assert!(logging.path.is_none());

    let store = StoreConfig::default();
    assert_eq!(store.toggle_retries, 8);
    assert_eq!(store.initial_capacity, 64);
}

#[test]
fn app_config_deserializes_partial_sections() {
    let raw = json!({
        "logging": { "level": "debug", "json": true },
        "store": { "toggle_retries": 3 }
    });

    let cfg: AppConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.logging.level, "debug");
    assert!(cfg.logging.json);
    assert_eq!(cfg.logging.name, "switcharoo");
    assert_eq!(cfg.store.toggle_retries, 3);
    assert_eq!(cfg.store.initial_capacity, 64);
}

#[test]
fn app_config_clones_share_until_mutated() {
    let mut cfg = AppConfig::default();
    let snapshot = cfg.clone();

    cfg.store.toggle_retries = 1;

    assert_eq!(cfg.store.toggle_retries, 1);
    assert_eq!(snapshot.store.toggle_retries, 8);
}
