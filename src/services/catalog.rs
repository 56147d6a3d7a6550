//! Catalog service: listing, filtering and checking out books

use std::sync::Arc;

use crate::{
    api::LibraryApi,
    error::AppResult,
    models::{Book, BookId},
};

/// Books whose title or author contains `term`, ignoring case.
///
/// An empty term keeps every book. Order is preserved.
pub fn filter_books(books: &[Book], term: &str) -> Vec<Book> {
    let needle = term.to_lowercase();
    books
        .iter()
        .filter(|book| {
            book.title.to_lowercase().contains(&needle)
                || book.author.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Books currently flagged available
pub fn available_only(books: &[Book]) -> Vec<Book> {
    books.iter().filter(|b| b.available).cloned().collect()
}

#[derive(Clone)]
pub struct CatalogService {
    api: Arc<dyn LibraryApi>,
}

impl CatalogService {
    pub fn new(api: Arc<dyn LibraryApi>) -> Self {
        Self { api }
    }

    /// Full catalog
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        self.api.list_books().await
    }

    /// Single book
    pub async fn get(&self, id: BookId) -> AppResult<Book> {
        self.api.get_book(id).await
    }

    /// Fetch the catalog and keep the available books
    pub async fn available(&self) -> AppResult<Vec<Book>> {
        let books = self.api.list_books().await?;
        Ok(available_only(&books))
    }

    /// Check a book out for the token's owner
    pub async fn checkout(&self, id: BookId, token: &str) -> AppResult<Book> {
        tracing::info!("Checking out book {}", id);
        self.api.update_availability(id, false, token).await
    }
}
