//! Data models exchanged with the Book Buddy service

pub mod book;
pub mod reservation;
pub mod user;

// Re-export commonly used types
pub use book::{AvailabilityUpdate, Book, BookId, BookList};
pub use reservation::{Reservation, ReservationId, ReservationList, ReturnConfirmation};
pub use user::{AuthResponse, LoginRequest, RegisterRequest, User};
