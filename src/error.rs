use crate::config::ConfigError;
use crate::screening::{DraftError, ExportError, LevelTableError, SessionError};
use crate::telemetry::TelemetryError;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Table(LevelTableError),
    Session(SessionError),
    Draft(DraftError),
    Export(ExportError),
    Json(serde_json::Error),
    InvalidArgument(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Table(err) => write!(f, "rule table error: {}", err),
            AppError::Session(err) => write!(f, "assessment error: {}", err),
            AppError::Draft(err) => write!(f, "draft error: {}", err),
            AppError::Export(err) => write!(f, "export error: {}", err),
            AppError::Json(err) => write!(f, "serialization error: {}", err),
            AppError::InvalidArgument(message) => write!(f, "invalid argument: {}", message),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Table(err) => Some(err),
            AppError::Session(err) => Some(err),
            AppError::Draft(err) => Some(err),
            AppError::Export(err) => Some(err),
            AppError::Json(err) => Some(err),
            AppError::InvalidArgument(_) => None,
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<LevelTableError> for AppError {
    fn from(value: LevelTableError) -> Self {
        Self::Table(value)
    }
}

impl From<SessionError> for AppError {
    fn from(value: SessionError) -> Self {
        Self::Session(value)
    }
}

impl From<DraftError> for AppError {
    fn from(value: DraftError) -> Self {
        Self::Draft(value)
    }
}

impl From<ExportError> for AppError {
    fn from(value: ExportError) -> Self {
        Self::Export(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}
