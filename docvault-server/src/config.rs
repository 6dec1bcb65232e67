//! Server configuration

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Default request body ceiling: 500 MiB file plus base64 overhead
const DEFAULT_MAX_BODY_BYTES: usize = 700 * 1024 * 1024;

/// DocVault server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection URL
    pub database_url: String,
    /// HTTP listen port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// HS256 signing key for session tokens
    pub jwt_secret: String,
    /// Trust `role` / `userId` query parameters when the request carries no token
    pub allow_role_query: bool,
    /// Request body limit in bytes
    pub max_body_bytes: usize,
    /// Bootstrap administrator, created at startup if absent
    pub admin_email: String,
    pub admin_password: String,
    pub admin_name: String,
    /// Body of `GET /api/ping`
    pub ping_message: String,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Directory for daily-rolling log files
    pub log_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://docvault.db?mode=rwc".into(),
            http_port: 8080,
            environment: "development".into(),
            jwt_secret: "dev-JWT_SECRET-not-for-production".into(),
            allow_role_query: true,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            admin_email: "admin@cafe.com".into(),
            admin_password: "admin123".into(),
            admin_name: "Admin User".into(),
            ping_message: "ping".into(),
            log_level: "info".into(),
            log_dir: None,
        }
    }
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let defaults = Self::default();
        let environment = std::env::var("ENVIRONMENT").unwrap_or(defaults.environment);

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.http_port),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            environment,
            allow_role_query: std::env::var("ALLOW_ROLE_QUERY")
                .ok()
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.allow_role_query),
            max_body_bytes: std::env::var("MAX_BODY_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_body_bytes),
            admin_email: std::env::var("ADMIN_EMAIL").unwrap_or(defaults.admin_email),
            admin_password: std::env::var("ADMIN_PASSWORD").unwrap_or(defaults.admin_password),
            admin_name: std::env::var("ADMIN_NAME").unwrap_or(defaults.admin_name),
            ping_message: std::env::var("PING_MESSAGE").unwrap_or(defaults.ping_message),
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
        })
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_bootstrap_values() {
        let config = Config::default();
        assert_eq!(config.admin_email, "admin@cafe.com");
        assert_eq!(config.admin_password, "admin123");
        assert_eq!(config.http_port, 8080);
        assert!(config.allow_role_query);
        assert_eq!(config.max_body_bytes, 734_003_200);
    }

    #[test]
    fn flag_parsing() {
        assert!(parse_flag("true"));
        assert!(parse_flag(" YES "));
        assert!(parse_flag("1"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("nope"));
    }
}
