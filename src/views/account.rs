//! Account screen: the session user's checked-out books
//!
//! Returning a book is pessimistic: the entry leaves the list only after
//! the service confirmed the deletion.

use crate::{
    models::{Reservation, ReservationId, User},
    router::Route,
    services::Services,
};

use super::{load::Loader, Opened};

pub const LOAD_FAILED: &str = "Failed to load your books";
pub const RETURN_FAILED: &str = "Failed to return book. Please try again.";

pub struct AccountView {
    user: User,
    token: String,
    reservations: Loader<Vec<Reservation>>,
    action_error: Option<String>,
    services: Services,
}

impl AccountView {
    /// Open the screen. Without a session this redirects to the login
    /// screen and nothing is fetched.
    pub async fn open(services: &Services) -> Opened<Self> {
        let session = services.session.snapshot().await;
        let Some((user, token)) = session.credentials() else {
            tracing::debug!("Account screen requires a session, redirecting to login");
            return Opened::Redirect(Route::Login);
        };

        let api = services.api.clone();
        let fetch_token = token.to_string();
        let reservations = Loader::spawn(
            async move { api.list_reservations(&fetch_token).await },
            LOAD_FAILED,
        );

        Opened::View(Self {
            user: user.clone(),
            token: token.to_string(),
            reservations,
            action_error: None,
            services: services.clone(),
        })
    }

    pub async fn loaded(&self) {
        self.reservations.wait().await;
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn greeting(&self) -> String {
        format!("Welcome, {}!", self.user.display_name())
    }

    pub fn is_loading(&self) -> bool {
        self.reservations.state().is_pending()
    }

    /// Full-screen error from the initial load
    pub fn error(&self) -> Option<String> {
        self.reservations.state().error().map(str::to_string)
    }

    /// Inline error from the last action
    pub fn action_error(&self) -> Option<&str> {
        self.action_error.as_deref()
    }

    pub fn reservations(&self) -> Vec<Reservation> {
        self.reservations.state().ready().cloned().unwrap_or_default()
    }

    /// Return reservation `id`; `true` when the service confirmed it
    pub async fn return_book(&mut self, id: ReservationId) -> bool {
        match self.services.api.return_book(id, &self.token).await {
            Ok(_) => {
                self.reservations.modify(|list| list.retain(|r| r.id != id));
                self.action_error = None;
                true
            }
            Err(e) => {
                tracing::error!("Error returning reservation {}: {}", id, e);
                self.action_error = Some(RETURN_FAILED.to_string());
                false
            }
        }
    }
}
