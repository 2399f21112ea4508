use switcharoo::domain::config::AppConfig;
use switcharoo::{SwitcharooError, init_logging};

#[test]
fn init_logging_installs_once() {
    let mut config = AppConfig::default();
    config.logging.level = "debug".to_owned();
    config.logging.directives = Some("switcharoo_flags=trace".to_owned());

    let logger = init_logging(&config).expect("first install should succeed");
    assert!(!logger.writes_files());

    let err = init_logging(&config).expect_err("second install should fail");
    assert!(matches!(err, SwitcharooError::Logger { .. }));
}
