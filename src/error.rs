//! Error types for link operations

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::persistence::PersistenceError;

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("invalid destination URL: {0}")]
    InvalidDestination(String),

    #[error("invalid owner: {0}")]
    InvalidOwner(String),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error("could not generate a unique id after {attempts} attempts")]
    GenerationExhausted { attempts: u32 },
}

impl LinkError {
    /// Input errors are rejected before any state change.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidDestination(_) | Self::InvalidOwner(_))
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidDestination(_) => "invalid_destination",
            Self::InvalidOwner(_) => "invalid_owner",
            Self::Persistence(_) => "persistence_error",
            Self::GenerationExhausted { .. } => "generation_exhausted",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::InvalidDestination(_) | Self::InvalidOwner(_) => StatusCode::BAD_REQUEST,
            Self::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::GenerationExhausted { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for LinkError {
    fn into_response(self) -> Response {
        (
            self.status(),
            Json(json!({
                "error": self.to_string(),
                "code": self.code(),
            })),
        )
            .into_response()
    }
}
