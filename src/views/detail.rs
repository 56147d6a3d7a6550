//! Book detail screen with the checkout action
//!
//! Checkout is pessimistic: the displayed book only changes once the
//! service has answered with the updated record.

use std::time::Duration;

use crate::{
    models::{Book, BookId},
    router::{Navigation, Route},
    services::{session::Session, Services},
};

use super::{
    load::{LoadState, Loader},
    user_message,
};

pub const LOAD_FAILED: &str = "Failed to load book details. Please try again later.";
pub const CHECKOUT_FAILED: &str = "Failed to checkout book. Please try again.";
pub const CHECKOUT_SUCCEEDED: &str =
    "Book successfully checked out! Redirecting to your account...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutStatus {
    Idle,
    Processing,
    Success,
    Failed(String),
}

pub struct BookDetailView {
    id: BookId,
    book: Loader<Book>,
    checkout: CheckoutStatus,
    services: Services,
    redirect_delay: Duration,
}

impl BookDetailView {
    /// Open the screen for book `id`; the book is fetched right away
    pub fn open(id: BookId, services: &Services, redirect_delay: Duration) -> Self {
        let catalog = services.catalog.clone();
        Self {
            id,
            book: Loader::spawn(async move { catalog.get(id).await }, LOAD_FAILED),
            checkout: CheckoutStatus::Idle,
            services: services.clone(),
            redirect_delay,
        }
    }

    pub fn id(&self) -> BookId {
        self.id
    }

    pub async fn loaded(&self) {
        self.book.wait().await;
    }

    pub fn is_loading(&self) -> bool {
        self.book.state().is_pending()
    }

    pub fn book(&self) -> Option<Book> {
        self.book.state().ready().cloned()
    }

    pub fn error(&self) -> Option<String> {
        self.book.state().error().map(str::to_string)
    }

    pub fn checkout_status(&self) -> &CheckoutStatus {
        &self.checkout
    }

    /// Whether the checkout button is enabled for `session`
    pub fn can_checkout(&self, session: &Session) -> bool {
        session.is_authenticated()
            && self.checkout != CheckoutStatus::Processing
            && matches!(&*self.book.state(), LoadState::Ready(book) if book.available)
    }

    /// Label of the checkout button, `None` when the book is unavailable
    pub fn checkout_label(&self, session: &Session) -> Option<&'static str> {
        let available = self.book.state().ready().map(|b| b.available)?;
        if !available {
            return None;
        }
        Some(if !session.is_authenticated() {
            "Login to Check Out"
        } else if self.checkout == CheckoutStatus::Processing {
            "Processing..."
        } else {
            "Check Out Book"
        })
    }

    /// Check the book out for the session user.
    ///
    /// Without a session this navigates to the login screen. On success the
    /// local book is replaced by the service's copy and the account screen
    /// follows after the redirect delay.
    pub async fn checkout(&mut self) -> Navigation {
        let session = self.services.session.snapshot().await;
        let Some((_, token)) = session.credentials() else {
            return Navigation::To(Route::Login);
        };

        if !self.can_checkout(&session) {
            tracing::debug!("Checkout of book {} not possible right now", self.id);
            return Navigation::Stay;
        }

        self.checkout = CheckoutStatus::Processing;
        match self.services.catalog.checkout(self.id, token).await {
            Ok(updated) => {
                self.book.modify(|book| *book = updated);
                self.checkout = CheckoutStatus::Success;
                Navigation::After {
                    route: Route::Account,
                    delay: self.redirect_delay,
                }
            }
            Err(e) => {
                tracing::error!("Error checking out book {}: {}", self.id, e);
                self.checkout = CheckoutStatus::Failed(user_message(&e, CHECKOUT_FAILED));
                Navigation::Stay
            }
        }
    }
}
