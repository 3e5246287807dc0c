use axum::{extract::State, http::Uri};

use crate::{
    error::{ApiError, ErrorVerbosityProvider, NotFoundError},
    state::ApiState,
};

pub async fn not_found(State(state): State<ApiState>, uri: Uri) -> ApiError {
    tracing::warn!(%uri, "No route");

    ApiError::NotFound(NotFoundError::new(state.error_verbosity()))
}
