use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    book::Book,
    error::ApiError,
    extractor::{json::ApiJson, validated::Validated},
    server_error,
    state::ApiState,
};

use super::MessageResponse;

#[derive(Debug)]
pub struct CreateBookResponse {
    pub book: Book,
}

impl IntoResponse for CreateBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self.book)).into_response()
    }
}

/// Append a book to the collection.
#[utoipa::path(
    post,
    path = "/",
    tag = "books",
    request_body = Book,
    responses(
        (status = 201, description = "The created book", body = Book),
        (status = 400, description = "Missing fields or non-numeric isbn", body = MessageResponse),
        (status = 500, description = "The store could not be read or written", body = MessageResponse),
    )
)]
pub async fn create_book(
    State(state): State<ApiState>,
    Validated(ApiJson(book)): Validated<ApiJson<Book>>,
) -> Result<CreateBookResponse, ApiError> {
    let book = state.library().add(book).await.map_err(server_error!(state))?;

    tracing::info!(isbn = %book.isbn, "Book created");

    Ok(CreateBookResponse { book })
}
