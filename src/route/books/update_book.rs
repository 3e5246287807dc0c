use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    book::Book,
    error::{ApiError, BookNotFoundError, ErrorVerbosityProvider, IsbnAction, MissingIsbnError},
    extractor::{json::ApiJson, query::ApiQuery, validated::validate, Extractor},
    server_error,
    state::ApiState,
};

use super::{IsbnParam, IsbnQuery, MessageResponse, REPEATED_ISBN};

#[derive(Debug)]
pub struct UpdateBookResponse {
    pub book: Book,
}

impl IntoResponse for UpdateBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self.book)).into_response()
    }
}

/// Replace the first book with the given isbn.
#[utoipa::path(
    put,
    path = "/",
    tag = "books",
    params(IsbnQuery),
    request_body = Book,
    responses(
        (status = 200, description = "The stored replacement", body = Book),
        (status = 400, description = "Missing isbn, missing fields or non-numeric isbn", body = MessageResponse),
        (status = 404, description = "No book has the given isbn", body = MessageResponse),
        (status = 500, description = "The store could not be read or written", body = MessageResponse),
    )
)]
pub async fn put_book(
    ApiQuery(query): ApiQuery<IsbnQuery>,
    State(state): State<ApiState>,
    body: Bytes,
) -> Result<UpdateBookResponse, ApiError> {
    replace_book(query, state, body).await
}

/// Replace the first book with the given isbn. Fields missing from the body are not kept.
#[utoipa::path(
    patch,
    path = "/",
    tag = "books",
    params(IsbnQuery),
    request_body = Book,
    responses(
        (status = 200, description = "The stored replacement", body = Book),
        (status = 400, description = "Missing isbn, missing fields or non-numeric isbn", body = MessageResponse),
        (status = 404, description = "No book has the given isbn", body = MessageResponse),
        (status = 500, description = "The store could not be read or written", body = MessageResponse),
    )
)]
pub async fn patch_book(
    ApiQuery(query): ApiQuery<IsbnQuery>,
    State(state): State<ApiState>,
    body: Bytes,
) -> Result<UpdateBookResponse, ApiError> {
    replace_book(query, state, body).await
}

/// The isbn is checked before the body is parsed.
async fn replace_book(
    query: IsbnQuery,
    state: ApiState,
    body: Bytes,
) -> Result<UpdateBookResponse, ApiError> {
    let verbosity = state.error_verbosity();

    let param = query.param();

    if param == IsbnParam::Missing {
        return Err(MissingIsbnError::new(verbosity, IsbnAction::Update).into());
    }

    let book = ApiJson::<Book>::from_bytes(verbosity, &body)?.into_extracted();
    validate(verbosity, &book)?;

    let IsbnParam::Single(isbn) = param else {
        return Err(BookNotFoundError::new(verbosity, REPEATED_ISBN).into());
    };

    let replaced = state
        .library()
        .replace(isbn, book)
        .await
        .map_err(server_error!(state))?;

    match replaced {
        Some(book) => {
            tracing::info!(%isbn, new_isbn = %book.isbn, "Book replaced");

            Ok(UpdateBookResponse { book })
        }
        None => Err(BookNotFoundError::new(verbosity, isbn).into()),
    }
}
