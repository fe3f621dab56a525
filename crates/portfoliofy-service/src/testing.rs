//! Shared fixtures for service tests.

use portfoliofy_core::config::AppConfig;
use portfoliofy_core::events::EventBus;
use portfoliofy_database::Stores;
use portfoliofy_entity::portfolio::{CreatePortfolio, Portfolio};
use portfoliofy_entity::user::{CreateUser, User};

use crate::context::RequestContext;
use crate::registry::Services;

/// In-memory stores with every service wired on top.
pub(crate) struct Harness {
    pub stores: Stores,
    pub services: Services,
    pub bus: EventBus,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_stores(Stores::in_memory())
    }

    pub fn with_stores(stores: Stores) -> Self {
        Self::with_config(stores, &AppConfig::default())
    }

    pub fn with_config(stores: Stores, config: &AppConfig) -> Self {
        let bus = EventBus::new(64);
        let services = Services::new(&stores, config, bus.clone());
        Self {
            stores,
            services,
            bus,
        }
    }

    /// Insert a user directly, bypassing password policy.
    pub async fn user(&self, username: &str) -> (User, RequestContext) {
        let user = self
            .stores
            .users
            .create(CreateUser {
                username: username.to_string(),
                email: format!("{username}@example.com"),
                password_hash: "unused".to_string(),
                full_name: None,
            })
            .await
            .unwrap();
        let ctx = RequestContext::new(user.id, &user.username);
        (user, ctx)
    }

    pub async fn portfolio(&self, owner: &RequestContext, is_public: bool) -> Portfolio {
        self.services
            .portfolios
            .create(
                owner,
                CreatePortfolio {
                    title: format!("{}'s portfolio", owner.username),
                    is_public,
                    ..Default::default()
                },
            )
            .await
            .unwrap()
    }
}
