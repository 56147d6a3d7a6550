//! Book Buddy Library Catalog
//!
//! A client for the Book Buddy catalog service: browse and search the
//! catalog, look at a book, check books out and return them, and manage
//! the login session.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod render;
pub mod router;
pub mod services;
pub mod views;

pub use app::{App, Screen};
pub use config::AppConfig;
pub use error::{AppError, AppResult};
