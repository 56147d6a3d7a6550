//! Plain-text rendering of screens for the terminal front-end

use std::fmt::Write;

use crate::{
    app::Screen,
    services::session::Session,
    views::{
        detail::CHECKOUT_SUCCEEDED, nav_links, AccountView, BookDetailView, CatalogView,
        CheckoutStatus, LoginView, NavTarget, RegisterView,
    },
};

const NO_COVER: &str = "https://via.placeholder.com/400x600?text=No+Cover+Available";

/// Render `screen` for `session`
pub fn screen(screen: &Screen, session: &Session) -> String {
    match screen {
        Screen::Catalog(view) => catalog(view),
        Screen::Detail(view) => detail(view, session),
        Screen::Account(view) => account(view),
        Screen::Login(view) => login(view),
        Screen::Register(view) => register(view),
        Screen::NotFound(path) => format!("Page not found: {}\n", path),
    }
}

pub fn nav(session: &Session) -> String {
    let links: Vec<String> = nav_links(session)
        .into_iter()
        .map(|link| match link.target {
            NavTarget::Route(route) => format!("{} ({})", link.label, route),
            NavTarget::Logout => link.label.to_string(),
        })
        .collect();
    format!("{}\n", links.join(" | "))
}

pub fn catalog(view: &CatalogView) -> String {
    if view.is_loading() {
        return "Loading books...\n".to_string();
    }
    if let Some(error) = view.error() {
        return format!("{}\n", error);
    }

    let mut out = String::from("Library Catalog\n\n");
    if !view.search_term().is_empty() {
        let _ = writeln!(out, "Search: {}\n", view.search_term());
    }
    for book in view.visible_books() {
        let _ = writeln!(
            out,
            "[{}] {} by {} - {} ({})",
            book.id,
            book.title,
            book.author,
            book.availability_label(),
            book.detail_path()
        );
    }
    out
}

pub fn detail(view: &BookDetailView, session: &Session) -> String {
    if view.is_loading() {
        return "Loading book details...\n".to_string();
    }
    if let Some(error) = view.error() {
        return format!("{}\n", error);
    }
    let Some(book) = view.book() else {
        return "Book not found\n".to_string();
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", book.title);
    let _ = writeln!(out, "by {}\n", book.author);
    let _ = writeln!(out, "Cover: {}", book.cover_image.as_deref().unwrap_or(NO_COVER));
    let _ = writeln!(out, "\nDescription\n{}\n", book.description);

    match view.checkout_label(session) {
        Some(label) if view.can_checkout(session) => {
            let _ = writeln!(out, "{}", label);
        }
        Some(label) => {
            let _ = writeln!(out, "{} (disabled)", label);
        }
        None => {
            let _ = writeln!(out, "Currently Unavailable");
        }
    }

    match view.checkout_status() {
        CheckoutStatus::Success => {
            let _ = writeln!(out, "\n{}", CHECKOUT_SUCCEEDED);
        }
        CheckoutStatus::Failed(message) => {
            let _ = writeln!(out, "\n{}", message);
        }
        CheckoutStatus::Idle | CheckoutStatus::Processing => {}
    }
    out
}

pub fn account(view: &AccountView) -> String {
    if view.is_loading() {
        return "Loading your books...\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}\n", view.greeting());
    if let Some(error) = view.error() {
        let _ = writeln!(out, "{}\n", error);
    }
    if let Some(error) = view.action_error() {
        let _ = writeln!(out, "{}\n", error);
    }

    let _ = writeln!(out, "Your Checked Out Books");
    let reservations = view.reservations();
    if reservations.is_empty() {
        let _ = writeln!(out, "You haven't checked out any books yet.");
    }
    for reservation in reservations {
        let _ = writeln!(
            out,
            "[{}] {} by {}",
            reservation.id, reservation.title, reservation.author
        );
    }
    out
}

pub fn login(view: &LoginView) -> String {
    form("Login", view.error(), view.submit_label())
}

pub fn register(view: &RegisterView) -> String {
    form("Create Account", view.error(), view.submit_label())
}

fn form(title: &str, error: Option<&str>, submit: &str) -> String {
    let mut out = format!("{}\n", title);
    if let Some(error) = error {
        let _ = writeln!(out, "{}", error);
    }
    let _ = writeln!(out, "[{}]", submit);
    out
}
