//! Client for the Book Buddy REST service
//!
//! [`LibraryApi`] is the seam the screens depend on; [`ApiClient`] is the
//! HTTP implementation. Each operation issues exactly one request and
//! awaits one JSON response. Non-2xx responses are turned into
//! [`AppError::Api`](crate::error::AppError::Api) carrying the service
//! message.

pub mod books;
pub mod client;
pub mod reservations;
pub mod users;

use async_trait::async_trait;

use crate::{
    error::AppResult,
    models::{
        AuthResponse, Book, BookId, LoginRequest, RegisterRequest, Reservation, ReservationId,
        ReturnConfirmation, User,
    },
};

pub use client::ApiClient;

/// Operations offered by the remote catalog service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LibraryApi: Send + Sync {
    /// `GET /books`
    async fn list_books(&self) -> AppResult<Vec<Book>>;

    /// `GET /books/:id`
    async fn get_book(&self, id: BookId) -> AppResult<Book>;

    /// `PATCH /books/:id` (authorized)
    async fn update_availability(&self, id: BookId, available: bool, token: &str)
        -> AppResult<Book>;

    /// `GET /reservations` (authorized)
    async fn list_reservations(&self, token: &str) -> AppResult<Vec<Reservation>>;

    /// `DELETE /reservations/:id` (authorized)
    async fn return_book(&self, id: ReservationId, token: &str) -> AppResult<ReturnConfirmation>;

    /// `POST /users/register`
    async fn register(&self, request: &RegisterRequest) -> AppResult<AuthResponse>;

    /// `POST /users/login`
    async fn login(&self, request: &LoginRequest) -> AppResult<AuthResponse>;

    /// `GET /users/me` (authorized)
    async fn current_user(&self, token: &str) -> AppResult<User>;
}

#[async_trait]
impl LibraryApi for ApiClient {
    async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.fetch_books().await
    }

    async fn get_book(&self, id: BookId) -> AppResult<Book> {
        self.fetch_book(id).await
    }

    async fn update_availability(
        &self,
        id: BookId,
        available: bool,
        token: &str,
    ) -> AppResult<Book> {
        self.patch_availability(id, available, token).await
    }

    async fn list_reservations(&self, token: &str) -> AppResult<Vec<Reservation>> {
        self.fetch_reservations(token).await
    }

    async fn return_book(&self, id: ReservationId, token: &str) -> AppResult<ReturnConfirmation> {
        self.delete_reservation(id, token).await
    }

    async fn register(&self, request: &RegisterRequest) -> AppResult<AuthResponse> {
        self.register_user(request).await
    }

    async fn login(&self, request: &LoginRequest) -> AppResult<AuthResponse> {
        self.login_user(request).await
    }

    async fn current_user(&self, token: &str) -> AppResult<User> {
        self.fetch_current_user(token).await
    }
}
