// Configuration loading tests

use hw_pragma_scan::config::{ConfigError, ScanConfig};
use hw_pragma_scan::logging::LogFormat;
use std::io::Write;
use std::time::Duration;

#[test]
fn test_can_load_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "timeout_secs: 20\nuser_agent: \"edge-probe/2\"\npragma: \"X-HW-Cache-All\"\nlog_format: json"
    )
    .unwrap();

    let config = ScanConfig::from_file(file.path()).unwrap();
    assert_eq!(config.timeout(), Some(Duration::from_secs(20)));
    assert_eq!(config.user_agent, "edge-probe/2");
    assert_eq!(config.log_format, LogFormat::Json);
    assert!(config.validate().is_ok());
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ScanConfig::from_file(dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
    assert!(err.to_string().starts_with("Failed to read config file"));
}

#[test]
fn test_unset_fields_take_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "timeout_secs: 5").unwrap();

    let config = ScanConfig::from_file(file.path()).unwrap();
    let defaults = ScanConfig::default();
    assert_eq!(config.pragma, defaults.pragma);
    assert_eq!(config.user_agent, defaults.user_agent);
    assert_eq!(config.log_format, LogFormat::Text);
}

#[test]
fn test_comment_only_file_loads_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "# hw-pragma-scan settings\n# timeout_secs: 10").unwrap();

    let config = ScanConfig::from_file(file.path()).unwrap();
    assert_eq!(config, ScanConfig::default());
}
