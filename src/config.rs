use std::env;
use std::fmt;
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the tool.
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
    pub telemetry: TelemetryConfig,
    pub storage: StorageConfig,
    pub export: ExportConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let draft_path =
            env::var("MINDSCREEN_DRAFT_PATH").unwrap_or_else(|_| "assessment-draft.json".to_string());
        if draft_path.trim().is_empty() {
            return Err(ConfigError::EmptyDraftPath);
        }

        let user_id = env::var("MINDSCREEN_USER_ID").unwrap_or_else(|_| "demo-user".to_string());
        if user_id.trim().is_empty() {
            return Err(ConfigError::EmptyUserId);
        }

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            storage: StorageConfig {
                draft_path: PathBuf::from(draft_path),
            },
            export: ExportConfig { user_id },
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where the single local draft snapshot lives.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub draft_path: PathBuf,
}

/// Identity stamped onto exported screening records.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub user_id: String,
}

#[derive(Debug)]
pub enum ConfigError {
    EmptyDraftPath,
    EmptyUserId,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyDraftPath => {
                write!(f, "MINDSCREEN_DRAFT_PATH must not be empty when set")
            }
            ConfigError::EmptyUserId => {
                write!(f, "MINDSCREEN_USER_ID must not be empty when set")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
