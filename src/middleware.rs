use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::handler::AppState;

/// Middleware to check for Authorization header
///
/// When the service is configured with an authorization token, requests must
/// carry an `Authorization` header with exactly that value. Without a
/// configured token the check is skipped.
pub async fn auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, Response> {
    if let Some(secret) = &state.config.auth_token {
        let provided = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        if provided != Some(secret.as_str()) {
            tracing::debug!(path = %request.uri().path(), "rejected request with bad authorization");
            return Err((
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "Unauthorized",
                    "message": "Invalid or missing authorization header"
                })),
            )
                .into_response());
        }
    }

    Ok(next.run(request).await)
}
