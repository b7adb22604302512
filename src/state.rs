use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::AppConfig;

// `DatabaseConnection` is not `Clone` when sea-orm's `mock` feature is on.
#[derive(Clone)]
pub struct AppState {
    pub orm: Arc<DatabaseConnection>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(orm: DatabaseConnection, config: AppConfig) -> Self {
        Self {
            orm: Arc::new(orm),
            config: Arc::new(config),
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.orm
    }
}
