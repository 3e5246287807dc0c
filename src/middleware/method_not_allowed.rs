use axum::{
    extract::{Request, State},
    http::{Method, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::{
    error::{ApiError, ErrorVerbosityProvider, MethodNotAllowedError},
    state::ApiState,
};

/// Methods served by the book routes, as sent in the `Allow` header.
pub const ALLOWED_METHODS: &str = "GET, POST, PUT, PATCH, DELETE";

/// Middleware to map axum's `MethodNotAllowed` rejection to our [`ApiError`].
///
/// `HEAD` is rejected as well, instead of being answered by the `GET` handler.
pub async fn method_not_allowed(
    State(state): State<ApiState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let method = req.method().clone();

    if method == Method::HEAD {
        tracing::warn!(%method, "Method not allowed");

        return Err(MethodNotAllowedError::new(state.error_verbosity(), ALLOWED_METHODS).into());
    }

    let resp = next.run(req).await;

    match resp.status() {
        StatusCode::METHOD_NOT_ALLOWED => {
            tracing::warn!(%method, "Method not allowed");

            Err(MethodNotAllowedError::new(state.error_verbosity(), ALLOWED_METHODS).into())
        }
        _ => Ok(resp),
    }
}
