//! Wiring of every service from one store bundle.

use std::sync::Arc;

use portfoliofy_auth::{JwtEncoder, PasswordHasher, PasswordValidator};
use portfoliofy_core::config::AppConfig;
use portfoliofy_core::events::EventBus;
use portfoliofy_database::Stores;

use crate::access::AccessRequestService;
use crate::notification::NotificationService;
use crate::portfolio::PortfolioService;
use crate::user::UserService;
use crate::view_log::ViewService;
use crate::visibility::VisibilityResolver;

/// All application services, sharing one store bundle and one event bus.
#[derive(Debug, Clone)]
pub struct Services {
    /// Registration, login, profiles.
    pub users: Arc<UserService>,
    /// Portfolio CRUD and the resolved view.
    pub portfolios: Arc<PortfolioService>,
    /// Access-request workflow.
    pub access_requests: Arc<AccessRequestService>,
    /// Notification engine.
    pub notifications: Arc<NotificationService>,
    /// View logging.
    pub views: Arc<ViewService>,
    /// Visibility resolver.
    pub visibility: Arc<VisibilityResolver>,
}

impl Services {
    /// Build the service graph.
    pub fn new(stores: &Stores, config: &AppConfig, bus: EventBus) -> Self {
        let notifications = Arc::new(NotificationService::new(
            stores.notifications.clone(),
            bus.clone(),
        ));
        let visibility = Arc::new(VisibilityResolver::new(stores.access_requests.clone()));
        let views = Arc::new(ViewService::new(
            stores.view_logs.clone(),
            stores.portfolios.clone(),
            stores.users.clone(),
            notifications.clone(),
            config.notifications.notify_on_view,
        ));
        let portfolios = Arc::new(PortfolioService::new(
            stores.portfolios.clone(),
            stores.access_requests.clone(),
            visibility.clone(),
            views.clone(),
        ));
        let access_requests = Arc::new(AccessRequestService::new(
            stores.access_requests.clone(),
            stores.portfolios.clone(),
            stores.users.clone(),
            notifications.clone(),
            bus,
            config.access.clone(),
        ));
        let users = Arc::new(UserService::new(
            stores.users.clone(),
            Arc::new(PasswordHasher::new()),
            Arc::new(PasswordValidator::new(&config.auth)),
            Arc::new(JwtEncoder::new(&config.auth)),
        ));

        Self {
            users,
            portfolios,
            access_requests,
            notifications,
            views,
            visibility,
        }
    }
}
