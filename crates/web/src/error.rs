use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use roster::RosterError;
use serde_json::json;
use std::fmt;
use storage::error::StorageError;
use validator::ValidationErrors;

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    Roster(RosterError),
    Validation(ValidationErrors),
    BadRequest(String),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Roster(e) => write!(f, "Roster error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
        }
    }
}

impl WebError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Storage(StorageError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Roster(RosterError::PlayerNotFound(_)) => StatusCode::NOT_FOUND,
            Self::Roster(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            Self::Roster(RosterError::InvalidUrl(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Roster(_) => StatusCode::BAD_GATEWAY,
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        let body = match &self {
            Self::Storage(StorageError::NoLockRecord) => {
                tracing::error!("Locked leaderboard row has not been seeded");
                json!({
                    "error": "Could not fetch leaderboard"
                })
            }
            Self::Storage(StorageError::Timeout(operation)) => {
                tracing::error!("Snapshot store timed out during {}", operation);
                json!({
                    "error": "Leaderboard store timed out"
                })
            }
            Self::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                json!({
                    "error": "An internal error occurred"
                })
            }
            Self::Roster(RosterError::PlayerNotFound(name)) => {
                json!({
                    "error": format!("Player '{}' not found", name)
                })
            }
            Self::Roster(RosterError::MalformedRoster(msg)) => {
                tracing::error!("Malformed roster payload: {}", msg);
                json!({
                    "error": "Guild data was malformed"
                })
            }
            Self::Roster(RosterError::InvalidUrl(msg)) => {
                tracing::error!("Invalid roster API URL: {}", msg);
                json!({
                    "error": "An internal error occurred"
                })
            }
            Self::Roster(e) => {
                tracing::error!("Failed to fetch guild data: {}", e);
                json!({
                    "error": "Failed to fetch guild data"
                })
            }
            Self::Validation(errors) => {
                let field_errors: Vec<String> = errors
                    .errors()
                    .iter()
                    .flat_map(|(field, kind)| flatten_errors(field, kind))
                    .collect();

                json!({
                    "error": "Validation failed",
                    "details": field_errors
                })
            }
            Self::BadRequest(msg) => {
                json!({
                    "error": msg
                })
            }
        };

        (status_code, Json(body)).into_response()
    }
}

fn flatten_errors(path: &str, kind: &validator::ValidationErrorsKind) -> Vec<String> {
    use validator::ValidationErrorsKind;

    match kind {
        ValidationErrorsKind::Field(errors) => errors
            .iter()
            .map(|e| {
                format!(
                    "{}: {}",
                    path,
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                )
            })
            .collect(),
        ValidationErrorsKind::Struct(inner) => inner
            .errors()
            .iter()
            .flat_map(|(field, kind)| flatten_errors(&format!("{}.{}", path, field), kind))
            .collect(),
        ValidationErrorsKind::List(items) => items
            .iter()
            .flat_map(|(idx, inner)| {
                inner
                    .errors()
                    .iter()
                    .flat_map(|(field, kind)| {
                        flatten_errors(&format!("{}[{}].{}", path, idx, field), kind)
                    })
                    .collect::<Vec<_>>()
            })
            .collect(),
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

impl From<RosterError> for WebError {
    fn from(error: RosterError) -> Self {
        match error {
            RosterError::StorageError(e) => Self::Storage(e),
            other => Self::Roster(other),
        }
    }
}

impl From<JsonRejection> for WebError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}
