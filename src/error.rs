// Error taxonomy shared by generation, discovery, storage and the CLI
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidAsteroid {
    #[error("asteroid name must not be empty")]
    EmptyName,
    #[error("distance must be a non-negative number of light years, got {0}")]
    Distance(f64),
}

/// A lookup matched nothing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Asteroid with ID {0} not found!")]
    IdNotFound(u64),
    #[error("Asteroid with name {0} not found!")]
    NameNotFound(String),
}

/// Failures of the external text-generation collaborator itself.
#[derive(Error, Debug)]
pub enum TextGenerationError {
    #[error("text generation request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("text generation service returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("text generation service returned no content")]
    EmptyResponse,
    #[error("could not decode text generation response: {0}")]
    Decode(String),
    #[error("API key environment variable {0} is not set")]
    MissingApiKey(String),
    #[error("invalid API key: {0}")]
    InvalidApiKey(String),
}

#[derive(Error, Debug)]
pub enum GenerationError {
    /// The generation service was unreachable or answered with an error.
    #[error("asteroid generation service unavailable: {0}")]
    ServiceUnavailable(#[from] TextGenerationError),
    /// The service answered, but the content could not be turned into a valid asteroid.
    #[error("asteroid generation returned malformed output: {reason}")]
    MalformedOutput { reason: String, raw: String },
}

impl GenerationError {
    pub fn malformed(reason: impl Into<String>, raw: impl Into<String>) -> Self {
        GenerationError::MalformedOutput {
            reason: reason.into(),
            raw: raw.into(),
        }
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, GenerationError::ServiceUnavailable(_))
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("asteroid {0} is already persisted")]
    AlreadyPersisted(u64),
    #[error("corrupt asteroid snapshot: {0}")]
    CorruptSnapshot(String),
}

/// A discovery attempt broke. Distinct from the empty "nothing found this scan" outcome.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("Asteroid discovery failed: {0}")]
    Generation(#[from] GenerationError),
    #[error("Asteroid discovery failed to record the asteroid: {0}")]
    Storage(#[from] StoreError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("configuration parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("configuration serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Umbrella error for the command-line front end.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    NotFound(#[from] LookupError),
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    TextGeneration(#[from] TextGenerationError),
    #[error("{0}")]
    Other(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorClass {
    NotFound,
    ServiceUnavailable,
    InvalidConfiguration,
    Internal,
}

/// What the caller gets to see about a failure.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReport {
    pub timestamp: DateTime<Utc>,
    pub class: ErrorClass,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_id: Option<String>,
}

impl ErrorReport {
    fn plain(class: ErrorClass, message: String) -> Self {
        Self {
            timestamp: Utc::now(),
            class,
            message,
            tracking_id: None,
        }
    }

    /// Logs the full error under a fresh tracking id; the report only carries the id.
    fn tracked(class: ErrorClass, user_message: &str, error: &dyn std::error::Error) -> Self {
        let tracking_id = Uuid::new_v4().to_string();
        tracing::error!(tracking_id = %tracking_id, error = %error, "{:?}", class);

        Self {
            timestamp: Utc::now(),
            class,
            message: format!("{} (Ref: {})", user_message, tracking_id),
            tracking_id: Some(tracking_id),
        }
    }
}

impl AppError {
    pub fn report(&self) -> ErrorReport {
        match self {
            AppError::NotFound(e) => {
                tracing::info!("Asteroid not found: {}", e);
                ErrorReport::plain(ErrorClass::NotFound, e.to_string())
            }
            AppError::Discovery(e) => {
                ErrorReport::tracked(ErrorClass::ServiceUnavailable, &e.to_string(), e)
            }
            AppError::Config(e) => ErrorReport::plain(ErrorClass::InvalidConfiguration, e.to_string()),
            other => ErrorReport::tracked(
                ErrorClass::Internal,
                "An internal error occurred. Please try again later.",
                other,
            ),
        }
    }
}
