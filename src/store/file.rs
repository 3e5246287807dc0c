use std::path::{Path, PathBuf};

use axum::async_trait;

use crate::book::Book;

use super::{BookStore, StoreError};

/// Keeps the collection as a pretty-printed JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes an empty collection if the file does not exist yet.
    ///
    /// Returns `true` if the file was created.
    pub async fn create_if_missing(&self) -> Result<bool, StoreError> {
        let exists = tokio::fs::try_exists(&self.path)
            .await
            .map_err(|source| self.read_error(source))?;

        if exists {
            return Ok(false);
        }

        tracing::info!(path = %self.path.display(), "Creating empty store file");

        self.save(&[]).await?;

        Ok(true)
    }

    /// Sibling file the collection is written to before it replaces the store file.
    fn temp_path(&self) -> PathBuf {
        let mut path = self.path.clone().into_os_string();
        path.push(".tmp");

        PathBuf::from(path)
    }

    fn read_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Read {
            path: self.path.clone(),
            source,
        }
    }

    fn write_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait]
impl BookStore for JsonFileStore {
    #[tracing::instrument(name = "load_books", skip_all)]
    async fn load(&self) -> Result<Vec<Book>, StoreError> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| self.read_error(source))?;

        let books: Vec<Book> =
            serde_json::from_str(&contents).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })?;

        tracing::trace!(path = %self.path.display(), count = books.len(), "Loaded");

        Ok(books)
    }

    #[tracing::instrument(name = "save_books", skip_all)]
    async fn save(&self, books: &[Book]) -> Result<(), StoreError> {
        let contents = serde_json::to_string_pretty(books).map_err(StoreError::Serialize)?;

        let temp_path = self.temp_path();

        tokio::fs::write(&temp_path, contents)
            .await
            .map_err(|source| self.write_error(source))?;

        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|source| self.write_error(source))?;

        tracing::trace!(path = %self.path.display(), count = books.len(), "Saved");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(isbn: &str) -> Book {
        Book {
            title: format!("Title {isbn}"),
            author: "Author".to_string(),
            publisher: "Publisher".to_string(),
            published_date: "2020".to_string(),
            isbn: isbn.to_string(),
        }
    }

    #[tokio::test]
    async fn saved_books_load_back_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("books.json"));
        let books = vec![book("3"), book("1"), book("2")];

        store.save(&books).await.unwrap();

        assert_eq!(store.load().await.unwrap(), books);
    }

    #[tokio::test]
    async fn writes_two_space_pretty_json() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("books.json"));

        store.save(&[book("111")]).await.unwrap();

        let contents = std::fs::read_to_string(store.path()).unwrap();
        let expected = r#"[
  {
    "title": "Title 111",
    "author": "Author",
    "publisher": "Publisher",
    "publishedDate": "2020",
    "isbn": "111"
  }
]"#;

        assert_eq!(contents, expected);
        assert!(!dir.path().join("books.json.tmp").exists());
    }

    #[tokio::test]
    async fn empty_collection_is_written_as_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("books.json"));

        store.save(&[]).await.unwrap();

        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "[]");
    }

    #[tokio::test]
    async fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("missing.json"));

        let err = store.load().await.unwrap_err();

        assert!(matches!(err, StoreError::Read { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonFileStore::new(path).load().await.unwrap_err();

        assert!(matches!(err, StoreError::Parse { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn numeric_isbn_loads_as_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books.json");
        std::fs::write(&path, r#"[{"title":"A","isbn":111},{"title":"B","isbn":"2"}]"#).unwrap();

        let books = JsonFileStore::new(path).load().await.unwrap();

        assert_eq!(books[0].isbn, "111");
        assert_eq!(books[1].isbn, "2");
    }

    #[tokio::test]
    async fn create_if_missing_only_creates_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("books.json"));

        assert!(store.create_if_missing().await.unwrap());
        store.save(&[book("1")]).await.unwrap();
        assert!(!store.create_if_missing().await.unwrap());

        assert_eq!(store.load().await.unwrap(), vec![book("1")]);
    }
}
