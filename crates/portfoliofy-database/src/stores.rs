//! The bundle of stores handed to the service layer.

use std::sync::Arc;

use tracing::info;

use portfoliofy_core::config::{DatabaseBackend, DatabaseConfig};
use portfoliofy_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::MemoryStore;
use crate::migration;
use crate::repositories::{
    AccessRequestRepository, NotificationRepository, PortfolioRepository, UserRepository,
    ViewLogRepository,
};
use crate::store::{AccessRequestStore, NotificationStore, PortfolioStore, UserStore, ViewLogStore};

/// One handle per store trait, all pointing at the same backend.
#[derive(Debug, Clone)]
pub struct Stores {
    /// Users.
    pub users: Arc<dyn UserStore>,
    /// Portfolios.
    pub portfolios: Arc<dyn PortfolioStore>,
    /// Access requests.
    pub access_requests: Arc<dyn AccessRequestStore>,
    /// Notifications.
    pub notifications: Arc<dyn NotificationStore>,
    /// Portfolio view logs.
    pub view_logs: Arc<dyn ViewLogStore>,
}

impl Stores {
    /// Open the configured backend.
    ///
    /// For PostgreSQL this connects, runs migrations when enabled, and
    /// also returns the pool so the caller can health-check and close it.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<(Self, Option<DatabasePool>)> {
        match config.backend {
            DatabaseBackend::Postgres => {
                let db = DatabasePool::connect(config).await?;
                migration::run_if_enabled(db.pool(), config).await?;
                Ok((Self::postgres(&db), Some(db)))
            }
            DatabaseBackend::Memory => {
                info!("Using in-memory store; data is lost on shutdown");
                Ok((Self::in_memory(), None))
            }
        }
    }

    /// PostgreSQL repositories sharing one pool.
    pub fn postgres(db: &DatabasePool) -> Self {
        let pool = db.pool().clone();
        Self {
            users: Arc::new(UserRepository::new(pool.clone())),
            portfolios: Arc::new(PortfolioRepository::new(pool.clone())),
            access_requests: Arc::new(AccessRequestRepository::new(pool.clone())),
            notifications: Arc::new(NotificationRepository::new(pool.clone())),
            view_logs: Arc::new(ViewLogRepository::new(pool)),
        }
    }

    /// A fresh, empty in-memory store.
    pub fn in_memory() -> Self {
        Self::from_memory(Arc::new(MemoryStore::new()))
    }

    /// Wrap an existing in-memory store.
    pub fn from_memory(store: Arc<MemoryStore>) -> Self {
        Self {
            users: store.clone(),
            portfolios: store.clone(),
            access_requests: store.clone(),
            notifications: store.clone(),
            view_logs: store,
        }
    }
}
