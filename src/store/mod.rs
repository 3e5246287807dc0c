use std::{path::PathBuf, sync::Arc};

use axum::async_trait;

use crate::book::Book;

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to read store file `{}`", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write store file `{}`", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse store file `{}`", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to serialize books")]
    Serialize(#[source] serde_json::Error),
}

/// Storage capability for the whole book collection.
///
/// Implementations always load and save the complete collection.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Loads every book in stored order.
    async fn load(&self) -> Result<Vec<Book>, StoreError>;

    /// Replaces the stored collection with `books`.
    async fn save(&self, books: &[Book]) -> Result<(), StoreError>;
}

#[async_trait]
impl<T> BookStore for Arc<T>
where
    T: BookStore + ?Sized,
{
    async fn load(&self) -> Result<Vec<Book>, StoreError> {
        (**self).load().await
    }

    async fn save(&self, books: &[Book]) -> Result<(), StoreError> {
        (**self).save(books).await
    }
}
