//! Screens of the application
//!
//! Each screen owns its state and exposes the actions a user can take on it.
//! Actions return a [`Navigation`](crate::router::Navigation) telling the
//! shell where to go next; rendering lives in [`crate::render`].

pub mod account;
pub mod catalog;
pub mod detail;
pub mod load;
pub mod login;
pub mod nav;
pub mod register;

use crate::{error::AppError, router::Route};

pub use account::AccountView;
pub use catalog::CatalogView;
pub use detail::{BookDetailView, CheckoutStatus};
pub use load::{LoadState, Loader};
pub use login::LoginView;
pub use nav::{nav_links, NavLink, NavTarget};
pub use register::RegisterView;

/// Result of opening a screen that may refuse to show
#[derive(Debug)]
pub enum Opened<V> {
    View(V),
    Redirect(Route),
}

/// Message to show for `err`: the service's own message when there is one
pub(crate) fn user_message(err: &AppError, fallback: &str) -> String {
    match err {
        AppError::Api { .. } | AppError::Validation(_) => err.to_string(),
        _ => fallback.to_string(),
    }
}
