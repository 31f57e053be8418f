use code_nexus::config::LoggingConfig;
use code_nexus::logging::init_logging;
use code_nexus::NexusError;

#[test]
fn test_file_logging_creates_directory_and_installs_once() {
    let temp_dir = tempfile::tempdir().unwrap();
    let log_dir = temp_dir.path().join("logs");
    let config = LoggingConfig {
        level: "code_nexus=debug".to_string(),
        file: true,
        directory: log_dir.to_string_lossy().into_owned(),
        file_name: "nexus.log".to_string(),
    };

    let guard = init_logging(&config).unwrap();
    assert!(guard.is_some());
    assert!(log_dir.is_dir());
    tracing::info!("logging smoke test");

    // A global subscriber is already installed
    let console_only = LoggingConfig::default();
    let err = init_logging(&console_only).unwrap_err();
    assert!(matches!(err, NexusError::Logging(_)));
}

#[test]
fn test_unwritable_log_directory_is_reported() {
    let blocker = tempfile::NamedTempFile::new().unwrap();
    let config = LoggingConfig {
        file: true,
        directory: blocker.path().join("logs").to_string_lossy().into_owned(),
        ..LoggingConfig::default()
    };

    let err = init_logging(&config).unwrap_err();
    assert!(matches!(err, NexusError::Io(_)));
}
