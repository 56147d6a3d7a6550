//! Reservation (checked-out book) model

use serde::{Deserialize, Serialize};

use super::book::BookId;

pub type ReservationId = i64;

/// A book currently checked out by the session user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "coverimage", default)]
    pub cover_image: Option<String>,
    /// Catalog id of the reserved book, when the service provides it
    #[serde(rename = "bookid", default)]
    pub book_id: Option<BookId>,
}

/// Body of `GET /reservations`.
///
/// The service has been seen returning either a bare array or an envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ReservationList {
    Plain(Vec<Reservation>),
    Singular { reservation: Vec<Reservation> },
    Plural { reservations: Vec<Reservation> },
}

impl ReservationList {
    pub fn into_vec(self) -> Vec<Reservation> {
        match self {
            ReservationList::Plain(list)
            | ReservationList::Singular { reservation: list }
            | ReservationList::Plural { reservations: list } => list,
        }
    }
}

/// Body of `DELETE /reservations/:id`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReturnConfirmation {
    #[serde(default)]
    pub message: Option<String>,
}
