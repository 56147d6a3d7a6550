//! Application shell: owns configuration and services, opens screens by route

use std::sync::Arc;

use crate::{
    api::{ApiClient, LibraryApi},
    config::AppConfig,
    error::AppResult,
    router::{Navigation, Route},
    services::{
        session::{Restored, Session},
        storage::{FileStore, KeyValueStore},
        Services,
    },
    views::{AccountView, BookDetailView, CatalogView, LoginView, Opened, RegisterView},
};

/// A screen ready to be rendered
pub enum Screen {
    Catalog(CatalogView),
    Detail(BookDetailView),
    Account(AccountView),
    Login(LoginView),
    Register(RegisterView),
    NotFound(String),
}

impl Screen {
    /// Wait for the screen's initial load, if it has one
    pub async fn loaded(&self) {
        match self {
            Screen::Catalog(view) => view.loaded().await,
            Screen::Detail(view) => view.loaded().await,
            Screen::Account(view) => view.loaded().await,
            Screen::Login(_) | Screen::Register(_) | Screen::NotFound(_) => {}
        }
    }
}

/// Application state shared by every screen
#[derive(Clone)]
pub struct App {
    pub config: Arc<AppConfig>,
    pub services: Services,
}

impl App {
    /// Build the application against the configured service and storage
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let api = ApiClient::new(&config.api)?;
        let store = FileStore::new(config.storage.path.clone());
        Ok(Self::with_parts(config, Arc::new(api), Arc::new(store)))
    }

    pub fn with_parts(
        config: AppConfig,
        api: Arc<dyn LibraryApi>,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            services: Services::new(api, store),
        }
    }

    /// Start-up reconciliation of the persisted session
    pub async fn start(&self) -> AppResult<Restored> {
        let restored = self
            .services
            .session
            .restore(self.services.api.as_ref())
            .await?;

        match &restored {
            Restored::Authenticated(user) => tracing::info!("Resumed session of user {}", user.id),
            Restored::Rejected => tracing::info!("Stored session expired"),
            Restored::Anonymous => tracing::debug!("Starting without a session"),
        }
        Ok(restored)
    }

    pub async fn session(&self) -> Session {
        self.services.session.snapshot().await
    }

    /// Open the screen for `route`, following redirects
    pub async fn open(&self, route: Route) -> Screen {
        tracing::debug!("Opening {}", route);
        match route {
            Route::Catalog => Screen::Catalog(CatalogView::open(&self.services)),
            Route::BookDetail(id) => Screen::Detail(BookDetailView::open(
                id,
                &self.services,
                self.config.checkout_redirect_delay(),
            )),
            Route::Account => match AccountView::open(&self.services).await {
                Opened::View(view) => Screen::Account(view),
                Opened::Redirect(_) => Screen::Login(LoginView::new()),
            },
            Route::Login => Screen::Login(LoginView::new()),
            Route::Register => Screen::Register(RegisterView::new()),
            Route::NotFound(path) => Screen::NotFound(path),
        }
    }

    /// Open the screen at `path`
    pub async fn open_path(&self, path: &str) -> Screen {
        self.open(Route::parse(path)).await
    }

    /// End the session and go back to the catalog
    pub async fn logout(&self) -> AppResult<Navigation> {
        self.services.session.logout().await?;
        Ok(Navigation::To(Route::Catalog))
    }
}
