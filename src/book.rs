use std::borrow::Cow;

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

/// A book record as stored in the collection.
///
/// Missing fields deserialize to empty strings and are caught by [`Validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Book {
    #[schema(example = "The Catcher in the Rye")]
    pub title: String,
    #[schema(example = "J.D. Salinger")]
    pub author: String,
    #[schema(example = "Little, Brown and Company")]
    pub publisher: String,
    #[schema(example = "1951")]
    pub published_date: String,
    /// Identifier used for lookups. Stored as text, must be numeric.
    ///
    /// A JSON number is accepted and kept as its text.
    #[serde(deserialize_with = "isbn_text")]
    #[schema(example = "9780316769488")]
    pub isbn: String,
}

impl Book {
    /// Returns `true` if every field is present and the isbn is numeric.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    fn fields(&self) -> [(&'static str, &str); 5] {
        [
            ("title", &self.title),
            ("author", &self.author),
            ("publisher", &self.publisher),
            ("publishedDate", &self.published_date),
            ("isbn", &self.isbn),
        ]
    }
}

impl Validate for Book {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        for (field, value) in self.fields() {
            if value.is_empty() {
                errors.add(field, validation_error("required", "Must not be empty"));
            }
        }

        if !self.isbn.is_empty() && !is_numeric_text(&self.isbn) {
            errors.add("isbn", validation_error("numeric", "Must be a number"));
        }

        match errors.errors().is_empty() {
            true => Ok(()),
            false => Err(errors),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IsbnRepr {
    Text(String),
    Number(serde_json::Number),
}

fn isbn_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match IsbnRepr::deserialize(deserializer)? {
        IsbnRepr::Text(text) => Ok(text),
        IsbnRepr::Number(number) => Ok(number.to_string()),
    }
}

fn validation_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));

    error
}

/// Checks whether `text` coerces to a number the way a JavaScript `Number(text)` does.
///
/// Whitespace-only text coerces to `0` and therefore counts as numeric.
pub fn is_numeric_text(text: &str) -> bool {
    // JavaScript also trims the byte order mark.
    let text = text.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}');

    if text.is_empty() {
        return true;
    }

    if let Some((radix, digits)) = radix_literal(text) {
        return !digits.is_empty() && digits.chars().all(|c| c.is_digit(radix));
    }

    let unsigned = text
        .strip_prefix('+')
        .or_else(|| text.strip_prefix('-'))
        .unwrap_or(text);

    if unsigned == "Infinity" {
        return true;
    }

    // Rust's float grammar also accepts `inf` and `nan`, which JavaScript does not.
    let starts_like_decimal = unsigned
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || c == '.');
    let decimal_chars = unsigned
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));

    starts_like_decimal && decimal_chars && unsigned.parse::<f64>().is_ok()
}

fn radix_literal(text: &str) -> Option<(u32, &str)> {
    let prefix = text.get(..2)?;
    let digits = &text[2..];

    match prefix {
        "0x" | "0X" => Some((16, digits)),
        "0o" | "0O" => Some((8, digits)),
        "0b" | "0B" => Some((2, digits)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> Book {
        Book {
            title: "A".to_string(),
            author: "B".to_string(),
            publisher: "C".to_string(),
            published_date: "2020".to_string(),
            isbn: "111".to_string(),
        }
    }

    #[test]
    fn complete_book_is_valid() {
        assert!(book().is_valid());
    }

    #[test]
    fn every_field_is_required() {
        let clear: [fn(&mut Book); 5] = [
            |b| b.title.clear(),
            |b| b.author.clear(),
            |b| b.publisher.clear(),
            |b| b.published_date.clear(),
            |b| b.isbn.clear(),
        ];

        for clear in clear {
            let mut book = book();
            clear(&mut book);

            assert!(!book.is_valid(), "{book:?} should be invalid");
        }
    }

    #[test]
    fn validation_errors_name_the_fields() {
        let book = Book {
            isbn: "abc".to_string(),
            title: String::new(),
            ..book()
        };

        let errors = book.validate().unwrap_err();
        let fields = errors.field_errors();

        assert_eq!(fields["isbn"][0].code, "numeric");
        assert_eq!(fields["title"][0].code, "required");
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn isbn_with_dashes_is_rejected() {
        let book = Book {
            isbn: "978-0-316-76948-0".to_string(),
            ..book()
        };

        assert!(!book.is_valid());
    }

    #[test]
    fn numeric_text_follows_number_coercion() {
        for text in [
            "111",
            "9780316769488",
            " 42 ",
            "   ",
            "1.5",
            "1.",
            ".5",
            "1e3",
            "-2.5E-3",
            "+7",
            "0x1F",
            "0b101",
            "0o17",
            "Infinity",
            "-Infinity",
            "\u{FEFF}1",
            "2\u{FEFF} ",
        ] {
            assert!(is_numeric_text(text), "{text:?} should be numeric");
        }

        for text in [
            "abc", "12abc", "NaN", "nan", "inf", "infinity", "+-1", ".", "e5", "1e", "0x",
            "0xZ", "-0x1", "1_000", "1,5", "1\u{FEFF}2",
        ] {
            assert!(!is_numeric_text(text), "{text:?} should not be numeric");
        }
    }

    #[test]
    fn missing_fields_deserialize_empty() {
        let book: Book = serde_json::from_str(r#"{"title":"A","isbn":"1"}"#).unwrap();

        assert_eq!(book.author, "");
        assert!(!book.is_valid());
    }

    #[test]
    fn numeric_isbn_is_kept_as_text() {
        let book: Book = serde_json::from_str(
            r#"{"title":"A","author":"B","publisher":"C","publishedDate":"2020","isbn":111}"#,
        )
        .unwrap();

        assert_eq!(book.isbn, "111");
        assert!(book.is_valid());
    }

    #[test]
    fn non_scalar_isbn_is_rejected() {
        for isbn in ["null", "true", "[1]", r#"{"a":1}"#] {
            let json = format!(r#"{{"title":"A","isbn":{isbn}}}"#);

            assert!(serde_json::from_str::<Book>(&json).is_err(), "{isbn}");
        }
    }

    #[test]
    fn serializes_with_camel_case_published_date() {
        let json = serde_json::to_value(book()).unwrap();

        assert_eq!(json["publishedDate"], "2020");
        assert!(json.get("published_date").is_none());
    }
}
