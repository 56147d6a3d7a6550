//! Book Buddy - Library Catalog
//!
//! Terminal front-end for the Book Buddy catalog service.

use std::{ffi::OsStr, path::Path};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::writer::BoxMakeWriter, layer::SubscriberExt, util::SubscriberInitExt,
};

use book_buddy::{
    config::{AppConfig, LoggingConfig},
    models::{BookId, ReservationId},
    render,
    router::{Navigation, Route},
    views::{CatalogView, LoginView, RegisterView},
    App, Screen,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the catalog, optionally filtered by title or author
    Books {
        #[arg(short, long)]
        search: Option<String>,
        /// Only show books that can be checked out
        #[arg(short, long)]
        available: bool,
    },
    /// Show one book
    Book { id: BookId },
    /// Check a book out
    Checkout { id: BookId },
    /// Show your checked-out books
    Account,
    /// Return a checked-out book
    Return { id: ReservationId },
    /// Log in
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account
    Register {
        #[arg(long, default_value = "")]
        firstname: String,
        #[arg(long, default_value = "")]
        lastname: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// End the session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Open the screen at a path, e.g. `/books/3`
    Open { path: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Failed to load configuration")?;
    let _log_guard = init_tracing(&config.logging);

    tracing::debug!("Starting Book Buddy v{}", env!("CARGO_PKG_VERSION"));

    let app = App::new(config).context("Failed to create the service client")?;
    if let Err(e) = app.start().await {
        tracing::warn!("Could not restore the previous session: {}", e);
    }

    run(cli.command, &app).await
}

async fn run(command: Command, app: &App) -> anyhow::Result<()> {
    match command {
        Command::Books { search, available } => {
            let mut screen = if available {
                Screen::Catalog(CatalogView::open_available(&app.services))
            } else {
                app.open(Route::Catalog).await
            };
            if let (Screen::Catalog(view), Some(term)) = (&mut screen, search) {
                view.set_search_term(term);
            }
            show(app, &screen).await;
        }
        Command::Book { id } => {
            let screen = app.open(Route::BookDetail(id)).await;
            show(app, &screen).await;
        }
        Command::Checkout { id } => {
            let mut screen = app.open(Route::BookDetail(id)).await;
            screen.loaded().await;
            let next = match &mut screen {
                Screen::Detail(view) => view.checkout().await,
                _ => Navigation::Stay,
            };
            show(app, &screen).await;
            follow(app, next).await;
        }
        Command::Account => {
            let screen = app.open(Route::Account).await;
            show(app, &screen).await;
        }
        Command::Return { id } => {
            let mut screen = app.open(Route::Account).await;
            screen.loaded().await;
            if let Screen::Account(view) = &mut screen {
                view.return_book(id).await;
            }
            show(app, &screen).await;
        }
        Command::Login { email, password } => {
            let mut view = LoginView::new();
            view.set_email(email);
            view.set_password(password);
            let next = view.submit(&app.services).await;
            if next == Navigation::Stay {
                show(app, &Screen::Login(view)).await;
            }
            follow(app, next).await;
        }
        Command::Register {
            firstname,
            lastname,
            email,
            password,
        } => {
            let mut view = RegisterView::new();
            view.set_firstname(firstname);
            view.set_lastname(lastname);
            view.set_email(email);
            view.set_password(password);
            let next = view.submit(&app.services).await;
            if next == Navigation::Stay {
                show(app, &Screen::Register(view)).await;
            }
            follow(app, next).await;
        }
        Command::Logout => {
            let next = app.logout().await?;
            println!("Logged out.");
            follow(app, next).await;
        }
        Command::Whoami => match app.session().await.user {
            Some(user) => println!(
                "{} {} <{}>",
                user.firstname, user.lastname, user.email
            ),
            None => println!("Not logged in."),
        },
        Command::Open { path } => {
            let screen = app.open_path(&path).await;
            show(app, &screen).await;
        }
    }

    Ok(())
}

/// Wait for the screen's data, then print it under the navigation bar
async fn show(app: &App, screen: &Screen) {
    screen.loaded().await;
    let session = app.session().await;
    println!("{}", render::nav(&session));
    print!("{}", render::screen(screen, &session));
}

async fn follow(app: &App, next: Navigation) {
    let route = match next {
        Navigation::Stay => return,
        Navigation::To(route) => route,
        Navigation::After { route, delay } => {
            tokio::time::sleep(delay).await;
            route
        }
    };
    println!();
    let screen = app.open(route).await;
    show(app, &screen).await;
}

/// Initialize tracing; logs go to stderr or, when configured, to a file
fn init_tracing(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("book_buddy={}", config.level).into());

    let (writer, guard) = match &config.file {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .unwrap_or_else(|| OsStr::new("book-buddy.log"));
            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(writer), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stderr), None),
    };

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(config.file.is_none());

    if config.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer.json())
            .init();
    } else {
        tracing_subscriber::registry().with(filter).with(layer).init();
    }

    guard
}
