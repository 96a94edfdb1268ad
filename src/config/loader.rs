//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::FigsyncConfig;
use crate::config::secret::secret_string;
use crate::domain::errors::FigsyncError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into FigsyncConfig
/// 4. Applies environment variable overrides (FIGSYNC_* prefix)
/// 5. Validates the configuration
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use figsync::config::loader::load_config;
///
/// let config = load_config("figsync.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<FigsyncConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(FigsyncError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        FigsyncError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    // Perform environment variable substitution
    let contents = substitute_env_vars(&contents)?;

    // Parse TOML
    let mut config: FigsyncConfig = toml::from_str(&contents)
        .map_err(|e| FigsyncError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    // Apply environment variable overrides
    apply_env_overrides(&mut config);

    // Validate configuration
    config.validate().map_err(|e| {
        FigsyncError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Arguments
///
/// * `input` - String containing ${VAR} placeholders
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    // Process line by line to skip comments
    for line in input.lines() {
        let trimmed = line.trim_start();

        // Skip comment lines - don't process env vars in comments
        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(FigsyncError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using FIGSYNC_* prefix
///
/// Environment variables follow the pattern: FIGSYNC_<SECTION>_<KEY>
/// For example: FIGSYNC_API_TOKEN, FIGSYNC_DOWNLOADS_MAX_CONCURRENT
///
/// # Arguments
///
/// * `config` - Mutable reference to the configuration to update
fn apply_env_overrides(config: &mut FigsyncConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("FIGSYNC_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // API overrides
    if let Ok(val) = std::env::var("FIGSYNC_API_BASE_URL") {
        config.api.base_url = val;
    }
    if let Ok(val) = std::env::var("FIGSYNC_API_FILE_KEY") {
        config.api.file_key = val;
    }
    if let Ok(val) = std::env::var("FIGSYNC_API_TOKEN") {
        config.api.token = secret_string(val);
    }
    if let Ok(val) = std::env::var("FIGSYNC_API_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.api.timeout_seconds = timeout;
        }
    }

    // Download overrides
    if let Ok(val) = std::env::var("FIGSYNC_DOWNLOADS_MAX_CONCURRENT") {
        if let Ok(concurrent) = val.parse() {
            config.downloads.max_concurrent = concurrent;
        }
    }

    // Logging overrides
    if let Ok(val) = std::env::var("FIGSYNC_LOGGING_FILE_ENABLED") {
        config.logging.file_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("FIGSYNC_LOGGING_FILE_PATH") {
        config.logging.file_path = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("FIGSYNC_TEST_SUB_VAR", "figd_secret");
        let input = "token = \"${FIGSYNC_TEST_SUB_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "token = \"figd_secret\"\n");
        std::env::remove_var("FIGSYNC_TEST_SUB_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("FIGSYNC_TEST_MISSING_VAR");
        let input = "token = \"${FIGSYNC_TEST_MISSING_VAR}\"";
        let result = substitute_env_vars(input);
        assert!(result.is_err());
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        let input = "# token = \"${FIGSYNC_TEST_COMMENTED_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert!(result.contains("FIGSYNC_TEST_COMMENTED_VAR"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "info"

[api]
file_key = "hJb5c0eXzY4kFM2vTqRnwA"
token = "figd_test_token"

[downloads]
max_concurrent = 5

[[jobs]]
name = "icons"
node_id = "12:34"
export_directory = "assets/icons"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let result = load_config(temp_file.path());
        assert!(result.is_ok());

        let config = result.unwrap();
        assert_eq!(config.api.base_url, "https://api.figma.com");
        assert_eq!(config.api.file_key, "hJb5c0eXzY4kFM2vTqRnwA");
        assert_eq!(config.jobs.len(), 1);
        assert_eq!(config.jobs[0].name, "icons");
        assert_eq!(config.jobs[0].batch_size, 50);
    }

    #[test]
    fn test_load_config_rejects_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[api\nfile_key = ").unwrap();
        temp_file.flush().unwrap();

        let result = load_config(temp_file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_rejects_missing_jobs() {
        let toml_content = r#"
[api]
file_key = "hJb5c0eXzY4kFM2vTqRnwA"
token = "figd_test_token"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let result = load_config(temp_file.path());
        assert!(result.is_err());
    }
}
