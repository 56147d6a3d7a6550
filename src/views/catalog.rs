//! Catalog screen: the full book list with a title/author search

use crate::{
    models::Book,
    services::{catalog::filter_books, Services},
};

use super::load::{LoadState, Loader};

pub const LOAD_FAILED: &str = "Failed to load books. Please try again later.";

pub struct CatalogView {
    books: Loader<Vec<Book>>,
    search_term: String,
}

impl CatalogView {
    /// Open the screen; the catalog is fetched once, right away
    pub fn open(services: &Services) -> Self {
        let catalog = services.catalog.clone();
        Self {
            books: Loader::spawn(async move { catalog.list().await }, LOAD_FAILED),
            search_term: String::new(),
        }
    }

    /// Open the screen restricted to the books that can be checked out
    pub fn open_available(services: &Services) -> Self {
        let catalog = services.catalog.clone();
        Self {
            books: Loader::spawn(async move { catalog.available().await }, LOAD_FAILED),
            search_term: String::new(),
        }
    }

    pub async fn loaded(&self) {
        self.books.wait().await;
    }

    pub fn is_loading(&self) -> bool {
        self.books.state().is_pending()
    }

    pub fn error(&self) -> Option<String> {
        self.books.state().error().map(str::to_string)
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Update the search field; filtering happens on the next read
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Books matching the current search term (empty until loaded)
    pub fn visible_books(&self) -> Vec<Book> {
        match &*self.books.state() {
            LoadState::Ready(books) => filter_books(books, &self.search_term),
            _ => Vec::new(),
        }
    }
}
