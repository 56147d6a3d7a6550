//! Client-side services shared by all screens

pub mod catalog;
pub mod session;
pub mod storage;

use std::sync::Arc;

use crate::api::LibraryApi;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub api: Arc<dyn LibraryApi>,
    pub catalog: catalog::CatalogService,
    pub session: Arc<session::SessionContext>,
}

impl Services {
    /// Create all services around the given API and storage backend
    pub fn new(api: Arc<dyn LibraryApi>, store: Arc<dyn storage::KeyValueStore>) -> Self {
        Self {
            catalog: catalog::CatalogService::new(api.clone()),
            session: Arc::new(session::SessionContext::new(store)),
            api,
        }
    }
}
