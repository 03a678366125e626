pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod seed;
pub mod store;
pub mod validate;

use std::sync::Arc;

use crate::config::Config;
use crate::store::Store;

pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<Store>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self { config: Arc::new(config), store: Arc::new(Store::new()) }
    }
}

pub use routes::router;
