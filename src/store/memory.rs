use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

use axum::async_trait;

use crate::book::Book;

use super::{BookStore, StoreError};

/// Keeps the collection in memory. Useful as a stand-in for [`JsonFileStore`](super::JsonFileStore).
#[derive(Debug, Default)]
pub struct MemoryStore {
    books: Mutex<Vec<Book>>,
    saves: AtomicUsize,
}

impl MemoryStore {
    pub fn new(books: Vec<Book>) -> Self {
        Self {
            books: Mutex::new(books),
            saves: AtomicUsize::new(0),
        }
    }

    /// Number of times the collection has been saved.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    fn books(&self) -> std::sync::MutexGuard<'_, Vec<Book>> {
        self.books
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl BookStore for MemoryStore {
    async fn load(&self) -> Result<Vec<Book>, StoreError> {
        Ok(self.books().clone())
    }

    async fn save(&self, books: &[Book]) -> Result<(), StoreError> {
        *self.books() = books.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);

        Ok(())
    }
}
