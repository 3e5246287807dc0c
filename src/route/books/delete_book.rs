use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    error::{ApiError, BookNotFoundError, ErrorVerbosityProvider, IsbnAction, MissingIsbnError},
    extractor::query::ApiQuery,
    server_error,
    state::ApiState,
};

use super::{IsbnParam, IsbnQuery, MessageResponse, REPEATED_ISBN};

#[derive(Debug)]
pub struct DeleteBookResponse;

impl IntoResponse for DeleteBookResponse {
    fn into_response(self) -> Response {
        let body = MessageResponse {
            message: "Book deleted successfully".to_string(),
        };

        (StatusCode::OK, Json(body)).into_response()
    }
}

/// Delete every book with the given isbn.
#[utoipa::path(
    delete,
    path = "/",
    tag = "books",
    params(IsbnQuery),
    responses(
        (status = 200, description = "At least one book was deleted", body = MessageResponse),
        (status = 400, description = "Missing isbn", body = MessageResponse),
        (status = 404, description = "No book has the given isbn", body = MessageResponse),
        (status = 500, description = "The store could not be read or written", body = MessageResponse),
    )
)]
pub async fn delete_book(
    ApiQuery(query): ApiQuery<IsbnQuery>,
    State(state): State<ApiState>,
) -> Result<DeleteBookResponse, ApiError> {
    let verbosity = state.error_verbosity();

    let isbn = match query.param() {
        IsbnParam::Missing => {
            return Err(MissingIsbnError::new(verbosity, IsbnAction::Delete).into());
        }
        IsbnParam::Repeated => {
            return Err(BookNotFoundError::new(verbosity, REPEATED_ISBN).into());
        }
        IsbnParam::Single(isbn) => isbn,
    };

    let removed = state
        .library()
        .remove(isbn)
        .await
        .map_err(server_error!(state))?;

    if removed == 0 {
        return Err(BookNotFoundError::new(verbosity, isbn).into());
    }

    tracing::info!(%isbn, removed, "Book deleted");

    Ok(DeleteBookResponse)
}
