use tokio::sync::Mutex;

use crate::{
    book::Book,
    store::{BookStore, StoreError},
};

/// Single access point to a [`BookStore`].
///
/// Every operation holds the same lock from load to save, so concurrent
/// requests never lose each other's updates.
pub struct Library {
    store: Box<dyn BookStore>,
    access: Mutex<()>,
}

impl Library {
    pub fn new<S: BookStore + 'static>(store: S) -> Self {
        Self {
            store: Box::new(store),
            access: Mutex::new(()),
        }
    }

    /// Returns the whole collection.
    pub async fn list(&self) -> Result<Vec<Book>, StoreError> {
        let _access = self.access.lock().await;

        self.store.load().await
    }

    /// Returns the first book with the given isbn.
    pub async fn find(&self, isbn: &str) -> Result<Option<Book>, StoreError> {
        let _access = self.access.lock().await;

        let books = self.store.load().await?;

        Ok(books.into_iter().find(|book| book.isbn == isbn))
    }

    /// Appends `book` to the collection.
    pub async fn add(&self, book: Book) -> Result<Book, StoreError> {
        let _access = self.access.lock().await;

        let mut books = self.store.load().await?;
        books.push(book.clone());
        self.store.save(&books).await?;

        Ok(book)
    }

    /// Replaces the first book with the given isbn.
    ///
    /// Returns `None` without touching the store if no book matches.
    pub async fn replace(&self, isbn: &str, book: Book) -> Result<Option<Book>, StoreError> {
        let _access = self.access.lock().await;

        let mut books = self.store.load().await?;

        let Some(index) = books.iter().position(|b| b.isbn == isbn) else {
            return Ok(None);
        };

        books[index] = book.clone();
        self.store.save(&books).await?;

        Ok(Some(book))
    }

    /// Removes every book with the given isbn and returns how many were removed.
    ///
    /// Nothing is saved if no book matches.
    pub async fn remove(&self, isbn: &str) -> Result<usize, StoreError> {
        let _access = self.access.lock().await;

        let mut books = self.store.load().await?;
        let before = books.len();
        books.retain(|book| book.isbn != isbn);

        let removed = before - books.len();
        if removed > 0 {
            self.store.save(&books).await?;
        }

        Ok(removed)
    }
}
