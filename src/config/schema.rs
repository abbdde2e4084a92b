//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the API and
//! the rules used to resolve it from environment variables. Resolution is
//! lenient: a value that fails to parse is replaced by the field's default.

use std::fmt;
use std::time::Duration;

use url::Url;

/// Fallback used whenever a duration string fails to parse.
pub const DURATION_FALLBACK: Duration = Duration::from_secs(15 * 60);

/// Root configuration for the API.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// PostgreSQL connection and pool sizing.
    pub database: DatabaseConfig,

    /// Listener, CORS and logging settings.
    pub server: ServerConfig,

    /// Token signing and lifetimes.
    pub jwt: JwtConfig,

    /// Object storage provider selection.
    pub storage: StorageConfig,

    /// Cache backend address and TTL.
    pub redis: RedisConfig,

    /// Public-facing application URLs.
    pub app: AppUrlConfig,

    /// Directory holding SQL migrations.
    pub migrations_path: String,

    /// Apply pending migrations before serving.
    pub auto_migrate: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl AppConfig {
    /// Resolve every field through `lookup`, falling back to defaults.
    ///
    /// `lookup` returns the raw value of an environment variable. Unset and
    /// empty values are treated the same way.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env { lookup };

        Self {
            database: DatabaseConfig {
                url: env.string(
                    "DATABASE_URL",
                    "postgres://postgres:password@db:5432/rental_mvp?sslmode=disable",
                ),
                host: env.string("DATABASE_HOST", "db"),
                port: env.string("DATABASE_PORT", "5432"),
                name: env.string("DATABASE_NAME", "rental_mvp"),
                user: env.string("DATABASE_USER", "postgres"),
                password: env.string("DATABASE_PASSWORD", "password"),
                ssl_mode: env.string("DATABASE_SSL_MODE", "disable"),
                max_connections: env.int("DATABASE_MAX_CONNECTIONS", 25),
                max_idle_connections: env.int("DATABASE_MAX_IDLE_CONNECTIONS", 10),
                max_lifetime: env.minutes("DATABASE_MAX_LIFETIME_MINUTES", 5),
            },
            server: ServerConfig {
                port: env.string("PORT", "8080"),
                host: env.string("HOST", "0.0.0.0"),
                environment: env.string("ENVIRONMENT", "development"),
                cors_origins: env.list("CORS_ORIGINS", "http://localhost:3000"),
                trusted_proxies: env.list("TRUSTED_PROXIES", "127.0.0.1"),
                log_level: env.string("LOG_LEVEL", "info"),
                log_format: env.string("LOG_FORMAT", "json"),
            },
            jwt: JwtConfig {
                secret: env.string("JWT_SECRET", "your-secret-key"),
                expires_in: env.duration("JWT_EXPIRES_IN", "15m"),
                refresh_token_expires_in: env.duration("REFRESH_TOKEN_EXPIRES_IN", "168h"),
                refresh_token_cookie_name: env
                    .string("REFRESH_TOKEN_COOKIE_NAME", "refresh_token"),
            },
            storage: StorageConfig {
                provider: env.string("STORAGE_PROVIDER", "local"),
                local_path: env.string("LOCAL_STORAGE_PATH", "./uploads"),
                aws_region: env.string("AWS_REGION", "us-east-1"),
                aws_bucket: env.string("AWS_BUCKET", ""),
                aws_access_key: env.string("AWS_ACCESS_KEY_ID", ""),
                aws_secret_key: env.string("AWS_SECRET_ACCESS_KEY", ""),
                aws_endpoint: env.string("AWS_ENDPOINT", ""),
            },
            redis: RedisConfig {
                url: env.string("REDIS_URL", "redis://localhost:6379/0"),
                password: env.string("REDIS_PASSWORD", ""),
                cache_ttl: env.minutes("CACHE_TTL_MINUTES", 60),
            },
            app: AppUrlConfig {
                url: env.string("APP_URL", "http://localhost:3000"),
                frontend_url: env.string("FRONTEND_URL", "http://localhost:3000"),
            },
            migrations_path: env.string("MIGRATIONS_PATH", "./migrations"),
            auto_migrate: env.bool("AUTO_MIGRATE", true),
        }
    }
}

/// PostgreSQL configuration.
#[derive(Clone)]
pub struct DatabaseConfig {
    /// Full connection URL; used to open the pool.
    pub url: String,
    pub host: String,
    pub port: String,
    pub name: String,
    pub user: String,
    pub password: String,
    pub ssl_mode: String,

    /// Upper bound on pooled connections.
    pub max_connections: u32,

    /// Connections kept open while idle (pool minimum).
    pub max_idle_connections: u32,

    /// Maximum lifetime of a single connection.
    pub max_lifetime: Duration,
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &redact_url(&self.url))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("ssl_mode", &self.ssl_mode)
            .field("max_connections", &self.max_connections)
            .field("max_idle_connections", &self.max_idle_connections)
            .field("max_lifetime", &self.max_lifetime)
            .finish()
    }
}

/// Listener configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: String,
    pub host: String,

    /// Deployment environment; `production` switches logs to JSON.
    pub environment: String,

    /// Origins allowed to make cross-origin requests.
    pub cors_origins: Vec<String>,

    /// Proxies whose forwarding headers may be trusted.
    pub trusted_proxies: Vec<String>,

    /// Minimum log level (debug, info, warn, error).
    pub log_level: String,

    /// Log encoding (`json` or `text`).
    pub log_format: String,
}

impl ServerConfig {
    /// Socket address string the listener binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Token signing configuration.
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expires_in: Duration,
    pub refresh_token_expires_in: Duration,
    pub refresh_token_cookie_name: String,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .field("refresh_token_expires_in", &self.refresh_token_expires_in)
            .field("refresh_token_cookie_name", &self.refresh_token_cookie_name)
            .finish()
    }
}

/// Object storage configuration.
#[derive(Clone)]
pub struct StorageConfig {
    /// `local` or `s3`.
    pub provider: String,
    pub local_path: String,
    pub aws_region: String,
    pub aws_bucket: String,
    pub aws_access_key: String,
    pub aws_secret_key: String,
    pub aws_endpoint: String,
}

impl fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageConfig")
            .field("provider", &self.provider)
            .field("local_path", &self.local_path)
            .field("aws_region", &self.aws_region)
            .field("aws_bucket", &self.aws_bucket)
            .field("aws_access_key", &self.aws_access_key)
            .field("aws_secret_key", &"<redacted>")
            .field("aws_endpoint", &self.aws_endpoint)
            .finish()
    }
}

/// Cache backend configuration.
#[derive(Clone)]
pub struct RedisConfig {
    pub url: String,
    pub password: String,

    /// Default time-to-live for cached entries.
    pub cache_ttl: Duration,
}

impl fmt::Debug for RedisConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisConfig")
            .field("url", &redact_url(&self.url))
            .field("password", &"<redacted>")
            .field("cache_ttl", &self.cache_ttl)
            .finish()
    }
}

/// Public-facing URLs.
#[derive(Debug, Clone)]
pub struct AppUrlConfig {
    pub url: String,
    pub frontend_url: String,
}

/// Replace the password component of a connection URL.
///
/// Strings that do not parse as a URL are returned unchanged.
fn redact_url(raw: &str) -> String {
    let Ok(mut url) = Url::parse(raw) else {
        return raw.to_string();
    };
    if url.password().is_some() && url.set_password(Some("redacted")).is_ok() {
        return url.to_string();
    }
    raw.to_string()
}

/// Lenient accessors over an environment lookup function.
struct Env<F> {
    lookup: F,
}

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn raw(&self, key: &str) -> Option<String> {
        (self.lookup)(key).filter(|v| !v.is_empty())
    }

    fn string(&self, key: &str, default: &str) -> String {
        self.raw(key).unwrap_or_else(|| default.to_string())
    }

    fn int(&self, key: &str, default: u32) -> u32 {
        self.raw(key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    fn minutes(&self, key: &str, default: u32) -> Duration {
        Duration::from_secs(u64::from(self.int(key, default)) * 60)
    }

    fn bool(&self, key: &str, default: bool) -> bool {
        self.raw(key)
            .and_then(|v| parse_bool(&v))
            .unwrap_or(default)
    }

    fn duration(&self, key: &str, default: &str) -> Duration {
        let value = self.string(key, default);
        if !has_go_duration_units(&value) {
            return DURATION_FALLBACK;
        }
        humantime::parse_duration(&value).unwrap_or(DURATION_FALLBACK)
    }

    fn list(&self, key: &str, default: &str) -> Vec<String> {
        self.string(key, default)
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(String::from)
            .collect()
    }
}

/// Accepts the same spellings as the conventional `ParseBool`.
/// Units accepted in duration values.
const DURATION_UNITS: [&str; 8] = ["ns", "us", "µs", "μs", "ms", "s", "m", "h"];

/// Whether `value` is a run of `<digits><unit>` groups using only
/// [`DURATION_UNITS`], with no spaces. Calendar units such as `d`, `w` or
/// `days` are rejected.
fn has_go_duration_units(value: &str) -> bool {
    if value == "0" {
        return true;
    }

    let mut rest = value;
    if rest.is_empty() {
        return false;
    }
    while !rest.is_empty() {
        let digits = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        if !rest[..digits].chars().any(|c| c.is_ascii_digit()) {
            return false;
        }
        rest = &rest[digits..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        if !DURATION_UNITS.contains(&&rest[..unit_len]) {
            return false;
        }
        rest = &rest[unit_len..];
    }
    true
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_with_empty_environment() {
        let config = AppConfig::default();

        assert_eq!(config.server.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.server.environment, "development");
        assert_eq!(config.server.cors_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.server.trusted_proxies, vec!["127.0.0.1"]);
        assert_eq!(config.server.log_level, "info");
        assert_eq!(config.server.log_format, "json");
        assert_eq!(config.database.max_connections, 25);
        assert_eq!(config.database.max_idle_connections, 10);
        assert_eq!(config.database.max_lifetime, Duration::from_secs(5 * 60));
        assert_eq!(config.jwt.expires_in, Duration::from_secs(15 * 60));
        assert_eq!(config.jwt.refresh_token_expires_in, Duration::from_secs(168 * 3600));
        assert_eq!(config.jwt.refresh_token_cookie_name, "refresh_token");
        assert_eq!(config.storage.provider, "local");
        assert_eq!(config.redis.cache_ttl, Duration::from_secs(60 * 60));
        assert_eq!(config.migrations_path, "./migrations");
        assert!(config.auto_migrate);
    }

    #[test]
    fn test_explicit_values_are_reflected() {
        let config = config_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "3001"),
            ("ENVIRONMENT", "production"),
            ("DATABASE_URL", "postgres://u:p@localhost/budget"),
            ("DATABASE_MAX_CONNECTIONS", "50"),
            ("DATABASE_MAX_LIFETIME_MINUTES", "2"),
            ("JWT_EXPIRES_IN", "90s"),
            ("REFRESH_TOKEN_EXPIRES_IN", "24h"),
            ("CACHE_TTL_MINUTES", "5"),
            ("AUTO_MIGRATE", "false"),
            ("AWS_BUCKET", "receipts"),
        ]);

        assert_eq!(config.server.bind_address(), "127.0.0.1:3001");
        assert!(config.server.is_production());
        assert_eq!(config.database.url, "postgres://u:p@localhost/budget");
        assert_eq!(config.database.max_connections, 50);
        assert_eq!(config.database.max_lifetime, Duration::from_secs(120));
        assert_eq!(config.jwt.expires_in, Duration::from_secs(90));
        assert_eq!(config.jwt.refresh_token_expires_in, Duration::from_secs(24 * 3600));
        assert_eq!(config.redis.cache_ttl, Duration::from_secs(300));
        assert!(!config.auto_migrate);
        assert_eq!(config.storage.aws_bucket, "receipts");
    }

    #[test]
    fn test_malformed_values_fall_back_to_defaults() {
        let config = config_from(&[
            ("DATABASE_MAX_CONNECTIONS", "lots"),
            ("DATABASE_MAX_IDLE_CONNECTIONS", "-3"),
            ("CACHE_TTL_MINUTES", "1.5"),
            ("AUTO_MIGRATE", "yes"),
        ]);

        assert_eq!(config.database.max_connections, 25);
        assert_eq!(config.database.max_idle_connections, 10);
        assert_eq!(config.redis.cache_ttl, Duration::from_secs(3600));
        assert!(config.auto_migrate);
    }

    #[test]
    fn test_malformed_duration_uses_fixed_fallback() {
        let config = config_from(&[
            ("JWT_EXPIRES_IN", "soon"),
            ("REFRESH_TOKEN_EXPIRES_IN", "a week"),
        ]);

        assert_eq!(config.jwt.expires_in, DURATION_FALLBACK);
        // Fallback is 15 minutes, not the field's own default.
        assert_eq!(config.jwt.refresh_token_expires_in, DURATION_FALLBACK);
    }

    #[test]
    fn test_empty_value_counts_as_unset() {
        let config = config_from(&[("PORT", ""), ("LOG_LEVEL", "")]);
        assert_eq!(config.server.port, "8080");
        assert_eq!(config.server.log_level, "info");
    }

    #[test]
    fn test_bool_spellings() {
        for value in ["1", "t", "T", "TRUE", "true", "True"] {
            assert_eq!(parse_bool(value), Some(true), "{value}");
        }
        for value in ["0", "f", "F", "FALSE", "false", "False"] {
            assert_eq!(parse_bool(value), Some(false), "{value}");
        }
        assert_eq!(parse_bool("tRuE"), None);
        assert_eq!(parse_bool("on"), None);
    }

    #[test]
    fn test_lists_are_split_and_trimmed() {
        let config = config_from(&[(
            "CORS_ORIGINS",
            "https://app.example.com, https://admin.example.com,,",
        )]);
        assert_eq!(
            config.server.cors_origins,
            vec!["https://app.example.com", "https://admin.example.com"]
        );
    }

    #[test]
    fn test_debug_output_redacts_secrets() {
        let config = config_from(&[
            ("DATABASE_PASSWORD", "hunter2"),
            ("DATABASE_URL", "postgres://app:hunter2@db/budget"),
            ("JWT_SECRET", "signing-key"),
            ("AWS_SECRET_ACCESS_KEY", "aws-secret"),
            ("REDIS_PASSWORD", "redis-secret"),
        ]);
        let rendered = format!("{config:?}");

        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("signing-key"));
        assert!(!rendered.contains("aws-secret"));
        assert!(!rendered.contains("redis-secret"));
        assert!(rendered.contains("postgres://app:redacted@db/budget"));
    }

    #[test]
    fn test_redact_url_without_password_or_unparseable() {
        assert_eq!(redact_url("redis://localhost:6379/0"), "redis://localhost:6379/0");
        assert_eq!(redact_url("not a url"), "not a url");
        assert_eq!(
            redact_url("redis://:s3cret@cache:6379/0"),
            "redis://:redacted@cache:6379/0"
        );
    }

    #[test]
    fn test_durations_accept_clock_units_only() {
        let config = config_from(&[
            ("JWT_EXPIRES_IN", "1h30m"),
            ("REFRESH_TOKEN_EXPIRES_IN", "2days"),
        ]);
        assert_eq!(config.jwt.expires_in, Duration::from_secs(90 * 60));
        assert_eq!(config.jwt.refresh_token_expires_in, DURATION_FALLBACK);

        for value in ["1w", "3d", "1 h", "h", "10"] {
            let config = config_from(&[("JWT_EXPIRES_IN", value)]);
            assert_eq!(config.jwt.expires_in, DURATION_FALLBACK, "{value}");
        }
        assert!(has_go_duration_units("250ms"));
        assert!(has_go_duration_units("0"));
    }
}
