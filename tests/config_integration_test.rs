//! Integration tests for configuration loading and validation
//!
//! Note: Tests that modify environment variables should be run with --test-threads=1
//! to avoid interference between tests.

use figsync::config::load_config;
use secrecy::ExposeSecret;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("FIGSYNC_APPLICATION_LOG_LEVEL");
    std::env::remove_var("FIGSYNC_API_BASE_URL");
    std::env::remove_var("FIGSYNC_API_FILE_KEY");
    std::env::remove_var("FIGSYNC_API_TOKEN");
    std::env::remove_var("FIGSYNC_API_TIMEOUT_SECONDS");
    std::env::remove_var("FIGSYNC_DOWNLOADS_MAX_CONCURRENT");
    std::env::remove_var("FIGSYNC_LOGGING_FILE_ENABLED");
    std::env::remove_var("FIGSYNC_LOGGING_FILE_PATH");
    std::env::remove_var("TEST_FIGSYNC_TOKEN");
}

fn write_config(toml_content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[application]
log_level = "debug"

[api]
base_url = "https://figma.internal.example.com"
file_key = "hJb5c0eXzY4kFM2vTqRnwA"
token = "figd_integration_token"
timeout_seconds = 60

[api.retry]
max_retries = 5
initial_delay_ms = 250
max_delay_ms = 4000
backoff_multiplier = 1.5

[downloads]
max_concurrent = 8

[logging]
file_enabled = false
file_path = "logs"
file_rotation = "hourly"
ansi = false

[[jobs]]
name = "icons"
node_id = "12:34"
export_directory = "assets/icons"
batch_size = 25
auto_crop = true
padding = 2
resize_to = { width = 64, height = 64 }
expand_to_power_of_two = true

[jobs.import]
readable = true
android_format = "ETC2_RGBA8"

[[jobs]]
name = "illustrations"
node_id = "20:1"
export_directory = "assets/illustrations"
"#;

    let temp_file = write_config(toml_content);
    let config = load_config(temp_file.path()).expect("Failed to load config");

    // Verify application config
    assert_eq!(config.application.log_level, "debug");

    // Verify API config
    assert_eq!(config.api.base_url, "https://figma.internal.example.com");
    assert_eq!(config.api.file_key, "hJb5c0eXzY4kFM2vTqRnwA");
    assert_eq!(
        config.api.token.expose_secret().as_ref(),
        "figd_integration_token"
    );
    assert_eq!(config.api.timeout_seconds, 60);
    assert_eq!(config.api.retry.max_retries, 5);
    assert_eq!(config.api.retry.initial_delay_ms, 250);
    assert_eq!(config.api.retry.max_delay_ms, 4000);
    assert!((config.api.retry.backoff_multiplier - 1.5).abs() < f64::EPSILON);

    // Verify download config
    assert_eq!(config.downloads.max_concurrent, 8);

    // Verify logging config
    assert!(!config.logging.file_enabled);
    assert_eq!(config.logging.file_rotation, "hourly");
    assert!(!config.logging.ansi);

    // Verify jobs
    assert_eq!(config.jobs.len(), 2);

    let icons = &config.jobs[0];
    assert_eq!(icons.name, "icons");
    assert_eq!(icons.node_id, "12:34");
    assert_eq!(icons.export_directory, "assets/icons");
    assert_eq!(icons.batch_size, 25);
    assert!(icons.auto_crop);
    assert_eq!(icons.padding, 2);
    let resize = icons.resize_to.expect("resize_to should be set");
    assert_eq!((resize.width, resize.height), (64, 64));
    assert!(icons.expand_to_power_of_two);
    assert!(icons.import.readable);
    assert_eq!(icons.import.android_format.as_deref(), Some("ETC2_RGBA8"));

    let illustrations = &config.jobs[1];
    assert_eq!(illustrations.name, "illustrations");
    assert_eq!(illustrations.batch_size, 50);
    assert!(!illustrations.auto_crop);
    assert!(illustrations.resize_to.is_none());
}

#[test]
fn test_load_minimal_config_with_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[api]
file_key = "hJb5c0eXzY4kFM2vTqRnwA"
token = "figd_test_token"

[[jobs]]
name = "icons"
node_id = "1:2"
export_directory = "assets/icons"
"#;

    let temp_file = write_config(toml_content);
    let config = load_config(temp_file.path()).expect("Failed to load config");

    // Verify defaults are applied
    assert_eq!(config.application.log_level, "info");
    assert_eq!(config.api.base_url, "https://api.figma.com");
    assert_eq!(config.api.timeout_seconds, 30);
    assert_eq!(config.api.retry.max_retries, 3);
    assert_eq!(config.api.retry.initial_delay_ms, 1000);
    assert_eq!(config.api.retry.max_delay_ms, 30000);
    assert_eq!(config.downloads.max_concurrent, 5);
    assert!(!config.logging.file_enabled);
    assert_eq!(config.logging.file_path, "logs");
    assert_eq!(config.logging.file_rotation, "daily");
    assert!(config.logging.ansi);

    let job = &config.jobs[0];
    assert_eq!(job.batch_size, 50);
    assert!(!job.auto_crop);
    assert_eq!(job.padding, 0);
    assert!(job.resize_to.is_none());
    assert!(!job.expand_to_power_of_two);
    assert!(!job.import.readable);
    assert!(job.import.android_format.is_none());
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_FIGSYNC_TOKEN", "figd_from_env");

    let toml_content = r#"
[api]
file_key = "hJb5c0eXzY4kFM2vTqRnwA"
token = "${TEST_FIGSYNC_TOKEN}"

[[jobs]]
name = "icons"
node_id = "1:2"
export_directory = "assets/icons"
"#;

    let temp_file = write_config(toml_content);
    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.api.token.expose_secret().as_ref(), "figd_from_env");

    std::env::remove_var("TEST_FIGSYNC_TOKEN");
}

#[test]
fn test_missing_env_var_fails_load() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[api]
file_key = "hJb5c0eXzY4kFM2vTqRnwA"
token = "${TEST_FIGSYNC_TOKEN}"

[[jobs]]
name = "icons"
node_id = "1:2"
export_directory = "assets/icons"
"#;

    let temp_file = write_config(toml_content);
    let result = load_config(temp_file.path());

    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("TEST_FIGSYNC_TOKEN"));
}

#[test]
fn test_env_var_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("FIGSYNC_APPLICATION_LOG_LEVEL", "trace");
    std::env::set_var("FIGSYNC_DOWNLOADS_MAX_CONCURRENT", "12");
    std::env::set_var("FIGSYNC_API_TIMEOUT_SECONDS", "90");

    let toml_content = r#"
[application]
log_level = "info"

[api]
file_key = "hJb5c0eXzY4kFM2vTqRnwA"
token = "figd_test_token"
timeout_seconds = 30

[downloads]
max_concurrent = 5

[[jobs]]
name = "icons"
node_id = "1:2"
export_directory = "assets/icons"
"#;

    let temp_file = write_config(toml_content);
    let config = load_config(temp_file.path()).expect("Failed to load config");

    // Verify env var overrides took effect
    assert_eq!(config.application.log_level, "trace");
    assert_eq!(config.downloads.max_concurrent, 12);
    assert_eq!(config.api.timeout_seconds, 90);

    cleanup_env_vars();
}

#[test]
fn test_token_override_replaces_file_value() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("FIGSYNC_API_TOKEN", "figd_override");

    let toml_content = r#"
[api]
file_key = "hJb5c0eXzY4kFM2vTqRnwA"
token = "figd_from_file"

[[jobs]]
name = "icons"
node_id = "1:2"
export_directory = "assets/icons"
"#;

    let temp_file = write_config(toml_content);
    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.api.token.expose_secret().as_ref(), "figd_override");

    cleanup_env_vars();
}

#[test]
fn test_invalid_config_validation() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[application]
log_level = "invalid_level"

[api]
file_key = "hJb5c0eXzY4kFM2vTqRnwA"
token = "figd_test_token"

[[jobs]]
name = "icons"
node_id = "1:2"
export_directory = "assets/icons"
"#;

    let temp_file = write_config(toml_content);
    let result = load_config(temp_file.path());
    assert!(result.is_err());
}

#[test]
fn test_invalid_job_batch_size_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[api]
file_key = "hJb5c0eXzY4kFM2vTqRnwA"
token = "figd_test_token"

[[jobs]]
name = "icons"
node_id = "1:2"
export_directory = "assets/icons"
batch_size = 0
"#;

    let temp_file = write_config(toml_content);
    let result = load_config(temp_file.path());

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("batch_size"));
}
