use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    book::Book,
    error::{ApiError, BookNotFoundError, ErrorVerbosityProvider},
    extractor::query::ApiQuery,
    server_error,
    state::ApiState,
};

use super::{IsbnParam, IsbnQuery, MessageResponse, REPEATED_ISBN};

#[derive(Debug)]
pub enum GetBooksResponse {
    All(Vec<Book>),
    One(Book),
}

impl IntoResponse for GetBooksResponse {
    fn into_response(self) -> Response {
        match self {
            GetBooksResponse::All(books) => (StatusCode::OK, Json(books)).into_response(),
            GetBooksResponse::One(book) => (StatusCode::OK, Json(book)).into_response(),
        }
    }
}

/// List all books, or get the first book with the given isbn.
#[utoipa::path(
    get,
    path = "/",
    tag = "books",
    params(IsbnQuery),
    responses(
        (status = 200, description = "The whole collection, or a single book when `isbn` is given", body = [Book]),
        (status = 404, description = "No book has the given isbn", body = MessageResponse),
        (status = 500, description = "The store could not be read", body = MessageResponse),
    )
)]
pub async fn get_books(
    ApiQuery(query): ApiQuery<IsbnQuery>,
    State(state): State<ApiState>,
) -> Result<GetBooksResponse, ApiError> {
    let isbn = match query.param() {
        IsbnParam::Missing => {
            let books = state.library().list().await.map_err(server_error!(state))?;

            return Ok(GetBooksResponse::All(books));
        }
        IsbnParam::Repeated => {
            return Err(BookNotFoundError::new(state.error_verbosity(), REPEATED_ISBN).into());
        }
        IsbnParam::Single(isbn) => isbn,
    };

    let book = state
        .library()
        .find(isbn)
        .await
        .map_err(server_error!(state))?;

    match book {
        Some(book) => Ok(GetBooksResponse::One(book)),
        None => Err(BookNotFoundError::new(state.error_verbosity(), isbn).into()),
    }
}
