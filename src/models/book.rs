//! Book (catalog entry) model and related types

use serde::{Deserialize, Serialize};

pub type BookId = i64;

/// Catalog entry as returned by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "coverimage", default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub available: bool,
}

impl Book {
    /// Availability label shown next to the book
    pub fn availability_label(&self) -> &'static str {
        if self.available {
            "Available"
        } else {
            "Checked Out"
        }
    }

    /// Route to the detail screen of this book
    pub fn detail_path(&self) -> String {
        format!("/books/{}", self.id)
    }
}

/// Envelope of `GET /books`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookList {
    pub books: Vec<Book>,
}

/// Body of `PATCH /books/:id`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityUpdate {
    pub available: bool,
}

impl AvailabilityUpdate {
    pub fn checkout() -> Self {
        Self { available: false }
    }
}
