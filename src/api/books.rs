//! Catalog calls

use reqwest::Method;

use crate::{
    error::AppResult,
    models::{AvailabilityUpdate, Book, BookId, BookList},
};

use super::ApiClient;

impl ApiClient {
    /// Fetch all books from the library
    pub async fn fetch_books(&self) -> AppResult<Vec<Book>> {
        let builder = self.request(Method::GET, "/books", None);
        let list: BookList = self
            .send(builder)
            .await
            .inspect_err(|e| tracing::error!("Error fetching books: {}", e))?;

        tracing::debug!("Fetched {} books", list.books.len());
        Ok(list.books)
    }

    /// Fetch a single book by ID
    pub async fn fetch_book(&self, id: BookId) -> AppResult<Book> {
        let builder = self.request(Method::GET, &format!("/books/{}", id), None);
        self.send(builder)
            .await
            .inspect_err(|e| tracing::error!("Error fetching book {}: {}", id, e))
    }

    /// Update the availability of a book; `false` checks it out
    pub async fn patch_availability(
        &self,
        id: BookId,
        available: bool,
        token: &str,
    ) -> AppResult<Book> {
        let builder = self
            .request(Method::PATCH, &format!("/books/{}", id), Some(token))
            .json(&AvailabilityUpdate { available });

        let book: Book = self
            .send(builder)
            .await
            .inspect_err(|e| tracing::error!("Error updating availability of book {}: {}", id, e))?;

        tracing::info!("Book {} is now {}", id, book.availability_label());
        Ok(book)
    }
}
