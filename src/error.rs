use axum::{
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use derive_more::From;
use serde::{Deserialize, Serialize};
use validator::ValidationErrors;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum ErrorVerbosity {
    /// Server returns only the appropriate status code and headers.
    StatusCode,
    /// Server returns only the message with the appropriate status code.
    Message,
    /// Server returns the message, the underlying error of internal failures and the appropriate status code.
    #[default]
    Full,
}

impl ErrorVerbosity {
    pub fn should_generate_message(&self) -> bool {
        match self {
            ErrorVerbosity::Message | ErrorVerbosity::Full => true,
            ErrorVerbosity::StatusCode => false,
        }
    }

    pub fn should_generate_error_reason(&self) -> bool {
        match self {
            ErrorVerbosity::Full => true,
            _ => false,
        }
    }
}

pub trait ErrorVerbosityProvider {
    fn error_verbosity(&self) -> ErrorVerbosity;
}

/// Maps any error into an [`InternalServerError`] using the verbosity of the given state.
///
/// ```ignore
/// state.library().list().await.map_err(server_error!(state))?;
/// ```
#[macro_export]
macro_rules! server_error {
    ($state:expr) => {
        |err| {
            $crate::error::InternalServerError::from_generic_error(
                $crate::error::ErrorVerbosityProvider::error_verbosity(&$state),
                err,
            )
        }
    };
}

#[derive(Debug, Serialize)]
struct ApiErrorResponse {
    message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, From)]
/// API error
pub enum ApiError {
    /// Internal server error
    ///
    /// This error is returned when the store could not be read or written.
    InternalServerError(InternalServerError),
    /// Query error
    ///
    /// This error is returned when the query string could not be parsed.
    Query(QueryError),
    /// Body error
    ///
    /// This error is returned when the body could not be read or is not a book.
    Body(BodyError),
    /// Validation error
    ///
    /// This error is returned when a book is missing fields or its isbn is not numeric.
    Validation(ValidationError),
    /// Missing isbn
    ///
    /// This error is returned when an update or delete is sent without an isbn.
    MissingIsbn(MissingIsbnError),
    /// Book not found
    ///
    /// This error is returned when no book has the requested isbn.
    BookNotFound(BookNotFoundError),
    /// Not found error
    ///
    /// This error is returned when no route matches the path.
    NotFound(NotFoundError),
    /// Method not allowed
    ///
    /// This error is returned when the method is not allowed.
    MethodNotAllowed(MethodNotAllowedError),
}

impl ApiError {
    fn verbosity(&self) -> ErrorVerbosity {
        match self {
            ApiError::InternalServerError(err) => err.verbosity,
            ApiError::Query(err) => err.verbosity,
            ApiError::Body(err) => err.verbosity,
            ApiError::Validation(err) => err.verbosity,
            ApiError::MissingIsbn(err) => err.verbosity,
            ApiError::BookNotFound(err) => err.verbosity,
            ApiError::NotFound(err) => err.verbosity,
            ApiError::MethodNotAllowed(err) => err.verbosity,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            ApiError::InternalServerError(_) => "Internal Server Error",
            ApiError::Query(_) => "Invalid query parameters",
            ApiError::Body(_) | ApiError::Validation(_) => "Invalid book data",
            ApiError::MissingIsbn(err) => err.message(),
            ApiError::BookNotFound(_) => "Book not found",
            ApiError::NotFound(_) => "Not Found",
            ApiError::MethodNotAllowed(_) => "Method Not Allowed",
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Query(_)
            | ApiError::Body(_)
            | ApiError::Validation(_)
            | ApiError::MissingIsbn(_) => StatusCode::BAD_REQUEST,
            ApiError::BookNotFound(_) | ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        if let ApiError::MethodNotAllowed(err) = self {
            headers.insert(header::ALLOW, HeaderValue::from_static(err.allow));
        }

        headers
    }

    fn into_error_reason(self) -> Option<String> {
        match self {
            ApiError::InternalServerError(err) => err.internal_server_error,
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        let headers = self.headers();

        if !self.verbosity().should_generate_message() {
            return (status_code, headers).into_response();
        }

        let response = ApiErrorResponse {
            message: self.message(),
            error: self.into_error_reason(),
        };

        (status_code, headers, Json(response)).into_response()
    }
}

#[derive(Debug)]
pub struct InternalServerError {
    verbosity: ErrorVerbosity,
    internal_server_error: Option<String>,
}

impl InternalServerError {
    pub fn from_generic_error<E: Into<anyhow::Error>>(verbosity: ErrorVerbosity, err: E) -> Self {
        let err: anyhow::Error = err.into();
        let err = format!("{err:#}");
        tracing::error!(%err, "Internal server error");

        let internal_server_error = verbosity.should_generate_error_reason().then_some(err);

        InternalServerError {
            verbosity,
            internal_server_error,
        }
    }
}

#[derive(Debug)]
pub struct QueryError {
    verbosity: ErrorVerbosity,
}

impl QueryError {
    pub fn new(verbosity: ErrorVerbosity, query_error_reason: String) -> Self {
        tracing::warn!(reason = %query_error_reason, "Query error");

        QueryError { verbosity }
    }
}

#[derive(Debug)]
pub struct BodyError {
    verbosity: ErrorVerbosity,
}

impl BodyError {
    pub fn new(verbosity: ErrorVerbosity, body_error_reason: String) -> Self {
        tracing::warn!(reason = %body_error_reason, "Body error");

        BodyError { verbosity }
    }
}

#[derive(Debug)]
pub struct ValidationError {
    verbosity: ErrorVerbosity,
}

impl ValidationError {
    pub fn from_validation_errors(verbosity: ErrorVerbosity, errors: ValidationErrors) -> Self {
        tracing::warn!(%errors, "Validation errors");

        ValidationError { verbosity }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsbnAction {
    Update,
    Delete,
}

#[derive(Debug)]
pub struct MissingIsbnError {
    verbosity: ErrorVerbosity,
    action: IsbnAction,
}

impl MissingIsbnError {
    pub fn new(verbosity: ErrorVerbosity, action: IsbnAction) -> Self {
        MissingIsbnError { verbosity, action }
    }

    fn message(&self) -> &'static str {
        match self.action {
            IsbnAction::Update => "ISBN required to update book",
            IsbnAction::Delete => "ISBN required to delete book",
        }
    }
}

#[derive(Debug)]
pub struct BookNotFoundError {
    verbosity: ErrorVerbosity,
}

impl BookNotFoundError {
    pub fn new(verbosity: ErrorVerbosity, isbn: &str) -> Self {
        tracing::debug!(%isbn, "Book not found");

        BookNotFoundError { verbosity }
    }
}

#[derive(Debug)]
pub struct NotFoundError {
    verbosity: ErrorVerbosity,
}

impl NotFoundError {
    pub fn new(verbosity: ErrorVerbosity) -> Self {
        NotFoundError { verbosity }
    }
}

#[derive(Debug)]
pub struct MethodNotAllowedError {
    verbosity: ErrorVerbosity,
    allow: &'static str,
}

impl MethodNotAllowedError {
    /// `allow` is sent as the `Allow` header.
    pub fn new(verbosity: ErrorVerbosity, allow: &'static str) -> Self {
        MethodNotAllowedError { verbosity, allow }
    }
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;
    use serde_json::{json, Value};

    use super::*;

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        serde_json::from_slice(&bytes).unwrap()
    }

    fn store_failure(verbosity: ErrorVerbosity) -> ApiError {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");

        InternalServerError::from_generic_error(verbosity, err).into()
    }

    #[tokio::test]
    async fn internal_error_exposes_reason_at_full_verbosity() {
        let response = store_failure(ErrorVerbosity::Full).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "message": "Internal Server Error", "error": "no such file" })
        );
    }

    #[tokio::test]
    async fn internal_error_hides_reason_at_message_verbosity() {
        let response = store_failure(ErrorVerbosity::Message).into_response();

        assert_eq!(
            body_json(response).await,
            json!({ "message": "Internal Server Error" })
        );
    }

    #[tokio::test]
    async fn status_code_verbosity_sends_no_body() {
        let err: ApiError = BookNotFoundError::new(ErrorVerbosity::StatusCode, "1").into();
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn method_not_allowed_sets_allow_header() {
        let err: ApiError = MethodNotAllowedError::new(ErrorVerbosity::Full, "GET, POST").into();
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ALLOW], "GET, POST");
        assert_eq!(
            body_json(response).await,
            json!({ "message": "Method Not Allowed" })
        );
    }

    #[tokio::test]
    async fn missing_isbn_message_depends_on_action() {
        let update: ApiError = MissingIsbnError::new(ErrorVerbosity::Full, IsbnAction::Update).into();
        let delete: ApiError = MissingIsbnError::new(ErrorVerbosity::Full, IsbnAction::Delete).into();

        assert_eq!(
            body_json(update.into_response()).await["message"],
            "ISBN required to update book"
        );
        assert_eq!(
            body_json(delete.into_response()).await["message"],
            "ISBN required to delete book"
        );
    }
}
