use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub mod app;
pub mod create_book;
pub mod delete_book;
pub mod get_book;
pub mod update_book;

/// The `isbn` query parameter.
///
/// Collected from raw pairs so a repeated `isbn` is not a parse error.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(from = "Vec<(String, String)>")]
#[into_params(parameter_in = Query)]
pub struct IsbnQuery {
    /// Isbn of the book to operate on. An empty value counts as absent.
    pub isbn: Option<String>,
    #[serde(skip)]
    repeated: bool,
}

/// Logged in place of the isbn when the parameter was repeated.
pub const REPEATED_ISBN: &str = "<repeated>";

/// How the `isbn` parameter was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsbnParam<'a> {
    Missing,
    Single(&'a str),
    /// Given more than once. Present, but equal to no stored isbn.
    Repeated,
}

impl IsbnQuery {
    pub fn param(&self) -> IsbnParam<'_> {
        if self.repeated {
            return IsbnParam::Repeated;
        }

        match self.isbn.as_deref() {
            Some(isbn) if !isbn.is_empty() => IsbnParam::Single(isbn),
            _ => IsbnParam::Missing,
        }
    }
}

impl From<Vec<(String, String)>> for IsbnQuery {
    fn from(pairs: Vec<(String, String)>) -> Self {
        let mut values = pairs
            .into_iter()
            .filter(|(key, _)| key == "isbn")
            .map(|(_, value)| value);

        let isbn = values.next();
        let repeated = values.next().is_some();

        IsbnQuery { isbn, repeated }
    }
}

/// Plain message body, also used by error responses.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> IsbnQuery {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn isbn_param_kinds() {
        assert_eq!(query(&[]).param(), IsbnParam::Missing);
        assert_eq!(query(&[("isbn", "")]).param(), IsbnParam::Missing);
        assert_eq!(query(&[("other", "1")]).param(), IsbnParam::Missing);
        assert_eq!(
            query(&[("isbn", "111"), ("other", "2")]).param(),
            IsbnParam::Single("111")
        );
        assert_eq!(
            query(&[("isbn", "1"), ("isbn", "2")]).param(),
            IsbnParam::Repeated
        );
    }
}
