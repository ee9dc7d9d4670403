use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
    pub test_before_acquire: bool,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub log_level: String,
    pub log_format: LogFormat,
    pub http_port: u16,
    pub environment: String,
    pub audit_log_dir: PathBuf,
    pub migrations_dir: PathBuf,
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse::<T>().ok())
}

impl DatabaseConfig {
    /// Create database config from environment variables
    pub fn from_env() -> Result<Self, String> {
        let url = env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL environment variable is required")?;

        let max_connections = parse_env("DATABASE_MAX_CONNECTIONS").unwrap_or(10);
        let acquire_timeout_secs = parse_env("DATABASE_ACQUIRE_TIMEOUT_SECS").unwrap_or(30);
        let idle_timeout_secs = parse_env("DATABASE_IDLE_TIMEOUT_SECS").unwrap_or(600); // 10 minutes
        let max_lifetime_secs = parse_env("DATABASE_MAX_LIFETIME_SECS").unwrap_or(1800); // 30 minutes
        let test_before_acquire = parse_env("DATABASE_TEST_BEFORE_ACQUIRE").unwrap_or(true);

        let config = Self {
            url,
            max_connections,
            acquire_timeout_secs,
            idle_timeout_secs,
            max_lifetime_secs,
            test_before_acquire,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the pool cannot work with
    pub fn validate(&self) -> Result<(), String> {
        if self.max_connections == 0 {
            return Err("DATABASE_MAX_CONNECTIONS must be greater than 0".to_string());
        }

        if self.acquire_timeout_secs == 0 {
            return Err("DATABASE_ACQUIRE_TIMEOUT_SECS must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Get acquire timeout as Duration
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    /// Get idle timeout as Duration
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    /// Get max lifetime as Duration
    pub fn max_lifetime(&self) -> Duration {
        Duration::from_secs(self.max_lifetime_secs)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgresql://localhost/osusu".to_string(),
            max_connections: 10,
            acquire_timeout_secs: 30,
            idle_timeout_secs: 600,
            max_lifetime_secs: 1800,
            test_before_acquire: true,
        }
    }
}

impl LogFormat {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid LOG_FORMAT: {}. Must be one of: text, json", s)),
        }
    }
}

impl AppConfig {
    /// Create application config from environment variables
    pub fn from_env() -> Result<Self, String> {
        let database = DatabaseConfig::from_env()?;

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let log_format = match env::var("LOG_FORMAT") {
            Ok(s) => LogFormat::from_str(&s)?,
            Err(_) => LogFormat::Text,
        };

        let http_port = match env::var("HTTP_PORT") {
            Ok(s) => s
                .parse::<u16>()
                .map_err(|_| format!("Invalid HTTP_PORT: {}", s))?,
            Err(_) => 8080,
        };

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let audit_log_dir = PathBuf::from(
            env::var("AUDIT_LOG_DIR").unwrap_or_else(|_| "./logs".to_string()),
        );

        let migrations_dir = PathBuf::from(
            env::var("MIGRATIONS_DIR").unwrap_or_else(|_| "./migrations".to_string()),
        );

        let config = Self {
            database,
            log_level: log_level.to_lowercase(),
            log_format,
            http_port,
            environment: environment.to_lowercase(),
            audit_log_dir,
            migrations_dir,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check log level and environment names
    pub fn validate(&self) -> Result<(), String> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid LOG_LEVEL: {}. Must be one of: {:?}",
                self.log_level, valid_log_levels
            ));
        }

        let valid_environments = ["development", "staging", "production"];
        if !valid_environments.contains(&self.environment.as_str()) {
            return Err(format!(
                "Invalid ENVIRONMENT: {}. Must be one of: {:?}",
                self.environment, valid_environments
            ));
        }

        self.database.validate()
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Check if running in development
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Get database URL (convenience method)
    pub fn database_url(&self) -> &str {
        &self.database.url
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            http_port: 8080,
            environment: "development".to_string(),
            audit_log_dir: PathBuf::from("./logs"),
            migrations_dir: PathBuf::from("./migrations"),
        }
    }
}
