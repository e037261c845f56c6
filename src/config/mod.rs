use std::env;
use std::fmt;

/// Distinguishes runtime behavior for different stages of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub scoring: ScoringConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let base_url =
            env::var("APP_SCORING_URL").unwrap_or_else(|_| "http://127.0.0.1:5000".to_string());
        let scoring = ScoringConfig::new(base_url)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            scoring,
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Location of the remote scoring service. Both endpoints derive from one
/// base URL so the host/port is configured in a single place.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    base_url: String,
}

impl ScoringConfig {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let mut base_url = base_url.into();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::InvalidScoringUrl { value: base_url });
        }
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self { base_url })
    }

    pub fn catalog_endpoint(&self) -> String {
        format!("{}/dropdowns", self.base_url)
    }

    pub fn recommend_endpoint(&self) -> String {
        format!("{}/recommend", self.base_url)
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidScoringUrl { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidScoringUrl { value } => {
                write!(f, "APP_SCORING_URL must be an http(s) URL, got '{}'", value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_SCORING_URL");
        env::remove_var("APP_LOG_LEVEL");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(
            config.scoring.catalog_endpoint(),
            "http://127.0.0.1:5000/dropdowns"
        );
        assert_eq!(
            config.scoring.recommend_endpoint(),
            "http://127.0.0.1:5000/recommend"
        );
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn trailing_slash_is_normalized() {
        let scoring = ScoringConfig::new("http://scoring.internal:8080/").expect("valid base url");
        assert_eq!(
            scoring.recommend_endpoint(),
            "http://scoring.internal:8080/recommend"
        );
    }

    #[test]
    fn rejects_non_http_base_url() {
        let err = ScoringConfig::new("scoring.internal:8080").expect_err("scheme required");
        assert!(err.to_string().contains("APP_SCORING_URL"));
    }
}
