use std::fs;
use std::time::Duration;
use switcharoo_domain::config::LoggingConfig;
use switcharoo_logger::Logger;
use tempfile::tempdir;

#[test]
fn config_with_path_writes_json_lines() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let log_dir = tmp_dir.path().join("logs");

    let config = LoggingConfig {
        name: "switcharoo-file".to_owned(),
        level: "debug".to_owned(),
        console: false,
        path: Some(log_dir.clone()),
        json: true,
        max_files: 2,
        ..LoggingConfig::default()
    };
    let logger = Logger::from_config(&config)?;
    assert!(logger.writes_files());

    tracing::info!(feature = "dark-mode", "hello from the file test");

    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let log_file = fs::read_dir(&log_dir)?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| path.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .expect("log file should be created");

    let contents = fs::read_to_string(&log_file)?;
    let line = contents.lines().find(|line| line.contains("hello from the file test")).unwrap();
    assert!(line.starts_with('{'), "file output should be JSON: {line}");
    assert!(line.contains("dark-mode"));

    Ok(())
}
