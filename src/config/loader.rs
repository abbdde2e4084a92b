//! Configuration loading from the environment.

use std::io::ErrorKind;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::AppConfig;

/// Local env file read before the process environment is consulted.
pub const ENV_FILE: &str = ".env.development";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The local env file exists but could not be read or parsed.
    #[error("failed to read env file {path}: {source}")]
    EnvFile {
        path: String,
        #[source]
        source: dotenvy::Error,
    },
}

/// Load configuration from [`ENV_FILE`] (if present) and the process environment.
pub fn load() -> Result<AppConfig, ConfigError> {
    load_from(Path::new(ENV_FILE))
}

/// Load configuration using `env_file` as the local env file.
///
/// A broken env file is logged and skipped; resolution then proceeds from
/// whatever the process environment holds. This never fails today, the
/// `Result` is kept so callers do not change if a hard error is introduced.
pub fn load_from(env_file: &Path) -> Result<AppConfig, ConfigError> {
    if let Err(e) = load_env_file(env_file) {
        tracing::warn!(error = %e, "Ignoring unreadable env file");
    }
    Ok(AppConfig::from_lookup(|key| std::env::var(key).ok()))
}

/// Merge an env file into the process environment.
///
/// Variables already set in the environment keep their value. A missing file
/// is not an error.
pub fn load_env_file(path: &Path) -> Result<(), ConfigError> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(()),
        Err(dotenvy::Error::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(source) => Err(ConfigError::EnvFile {
            path: path.display().to_string(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    fn missing_env_file_is_not_an_error() {
        let path = Path::new("definitely/not/here/.env.development");
        assert!(load_env_file(path).is_ok());
    }

    #[test]
    #[serial]
    fn env_file_does_not_override_existing_variables() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env.development");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "BUDGET_API_TEST_FROM_FILE=file").unwrap();
        writeln!(file, "BUDGET_API_TEST_PRESET=file").unwrap();
        drop(file);

        std::env::set_var("BUDGET_API_TEST_PRESET", "process");

        load_env_file(&path).unwrap();

        assert_eq!(std::env::var("BUDGET_API_TEST_FROM_FILE").unwrap(), "file");
        assert_eq!(std::env::var("BUDGET_API_TEST_PRESET").unwrap(), "process");

        std::env::remove_var("BUDGET_API_TEST_FROM_FILE");
        std::env::remove_var("BUDGET_API_TEST_PRESET");
    }

    #[test]
    fn malformed_env_file_is_reported_by_the_file_reader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env.development");
        std::fs::write(&path, "THIS IS NOT VALID\n").unwrap();

        let err = load_env_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::EnvFile { .. }));
    }

    #[test]
    #[serial]
    fn malformed_env_file_still_yields_a_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env.development");
        std::fs::write(&path, "THIS IS NOT VALID\nLOG_LEVEL=debug\n").unwrap();

        std::env::remove_var("PORT");
        let config = load_from(&path).expect("a broken env file must not abort loading");

        assert_eq!(config.server.port, "8080");
        std::env::remove_var("LOG_LEVEL");
    }

    #[test]
    #[serial]
    fn load_reads_port_from_environment() {
        std::env::set_var("PORT", "9191");
        let config = load().unwrap();
        assert_eq!(config.server.port, "9191");
        std::env::remove_var("PORT");
    }
}
