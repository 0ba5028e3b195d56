use serde::Deserialize;
use std::env;
use std::str::FromStr;

/// Bounds bcrypt accepts for its cost factor.
pub const MIN_BCRYPT_COST: u32 = 4;
pub const MAX_BCRYPT_COST: u32 = 31;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub bcrypt_cost: Option<u32>,
    /// Comma separated list; empty or unset means any origin.
    pub cors_allowed_origins: Option<String>,
    pub max_body_bytes: Option<usize>,
}

impl Config {
    pub fn from_env() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let cfg = config::Config::builder()
            .set_default("host", "127.0.0.1")?
            .set_default("port", 5000)?
            .add_source(config::Environment::default())
            .build()?;

        let config: Config = cfg.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        if !self
            .host
            .chars()
            .all(|c| c.is_alphanumeric() || ".:-_".contains(c))
        {
            return Err(config::ConfigError::Message(
                "Invalid host format".to_string(),
            ));
        }

        if self.port < 1024 {
            return Err(config::ConfigError::Message(
                "Port must be 1024 or higher".to_string(),
            ));
        }

        if self.database_url.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "DATABASE_URL must not be empty".to_string(),
            ));
        }

        if let Some(cost) = self.bcrypt_cost {
            if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
                return Err(config::ConfigError::Message(format!(
                    "bcrypt_cost must be between {} and {}",
                    MIN_BCRYPT_COST, MAX_BCRYPT_COST
                )));
            }
        }

        // 1KB..10MB
        if let Some(limit) = self.max_body_bytes {
            let min = 1024;
            let max = 10 * 1024 * 1024;
            if limit < min || limit > max {
                return Err(config::ConfigError::Message(format!(
                    "max_body_bytes must be between {} and {} bytes",
                    min, max
                )));
            }
        }

        Ok(())
    }

    pub fn effective_bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost.unwrap_or(bcrypt::DEFAULT_COST)
    }

    pub fn effective_max_body_bytes(&self) -> usize {
        self.max_body_bytes.unwrap_or(256 * 1024)
    }

    pub fn allowed_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn database_settings(&self) -> DatabaseSettings {
        DatabaseSettings::default_from_url(self.database_url.clone())
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub connect_timeout_secs: Option<u64>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
    pub sql_log: Option<bool>,
}

impl DatabaseSettings {
    pub fn default_from_url(url: String) -> Self {
        Self {
            url,
            max_connections: parse_env_var("DATABASE_MAX_CONNECTIONS"),
            min_connections: parse_env_var("DATABASE_MIN_CONNECTIONS"),
            connect_timeout_secs: parse_env_var("DATABASE_CONNECT_TIMEOUT_SECS"),
            acquire_timeout_secs: parse_env_var("DATABASE_ACQUIRE_TIMEOUT_SECS"),
            idle_timeout_secs: parse_env_var("DATABASE_IDLE_TIMEOUT_SECS"),
            sql_log: parse_env_var("DATABASE_SQL_LOG"),
        }
    }

    /// In-memory SQLite only lives as long as its single connection.
    pub fn in_memory_sqlite() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: Some(1),
            min_connections: Some(1),
            connect_timeout_secs: None,
            acquire_timeout_secs: None,
            idle_timeout_secs: None,
            sql_log: Some(false),
        }
    }
}

fn parse_env_var<T>(key: &str) -> Option<T>
where
    T: FromStr,
{
    env::var(key).ok().and_then(|value| value.parse::<T>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Config {
        Config {
            host: "127.0.0.1".to_string(),
            port: 5000,
            database_url: "sqlite::memory:".to_string(),
            bcrypt_cost: None,
            cors_allowed_origins: None,
            max_body_bytes: None,
        }
    }

    #[test]
    fn accepts_defaults() {
        let config = base();
        assert!(config.validate().is_ok());
        assert_eq!(config.effective_bcrypt_cost(), bcrypt::DEFAULT_COST);
        assert!(config.allowed_origins().is_empty());
    }

    #[test]
    fn rejects_privileged_port_and_bad_host() {
        let mut config = base();
        config.port = 80;
        assert!(config.validate().is_err());

        let mut config = base();
        config.host = "local host;".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_bcrypt_cost() {
        let mut config = base();
        config.bcrypt_cost = Some(2);
        assert!(config.validate().is_err());
        config.bcrypt_cost = Some(MAX_BCRYPT_COST + 1);
        assert!(config.validate().is_err());
        config.bcrypt_cost = Some(MIN_BCRYPT_COST);
        assert!(config.validate().is_ok());
        config.bcrypt_cost = Some(MAX_BCRYPT_COST);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn splits_cors_origins() {
        let mut config = base();
        config.cors_allowed_origins =
            Some(" http://localhost:5173, ,https://jobs.example.com".to_string());
        assert_eq!(
            config.allowed_origins(),
            vec!["http://localhost:5173", "https://jobs.example.com"]
        );
    }
}
