//! Routing: URL-style paths to screens

use std::{fmt, time::Duration};

use crate::models::BookId;

/// A screen the application can show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Catalog,
    BookDetail(BookId),
    Account,
    Login,
    Register,
    NotFound(String),
}

impl Route {
    /// Map a path such as `/books/12` to its route
    pub fn parse(path: &str) -> Route {
        let trimmed = path.trim();
        let segments: Vec<&str> = trimmed
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            [] => Route::Catalog,
            ["books", id] => match id.parse::<BookId>() {
                Ok(id) => Route::BookDetail(id),
                Err(_) => Route::NotFound(trimmed.to_string()),
            },
            ["account"] => Route::Account,
            ["login"] => Route::Login,
            ["register"] => Route::Register,
            _ => Route::NotFound(trimmed.to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Catalog => "/".to_string(),
            Route::BookDetail(id) => format!("/books/{}", id),
            Route::Account => "/account".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::NotFound(path) => path.clone(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// What a screen action asks the shell to do next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Stay,
    To(Route),
    /// Navigate once `delay` has elapsed
    After { route: Route, delay: Duration },
}
