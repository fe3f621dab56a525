//! In-memory store backed by `DashMap`.
//!
//! One [`MemoryStore`] implements every store trait so cross-table rules
//! (received requests by portfolio owner, cascading deletes) can see all
//! tables. Uniqueness rules are kept in secondary index maps claimed
//! through the `entry` API, so two concurrent inserts cannot both win.

mod access_request;
mod notification;
mod portfolio;
mod user;
mod view_log;

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use portfoliofy_entity::access_request::AccessRequest;
use portfoliofy_entity::notification::Notification;
use portfoliofy_entity::portfolio::Portfolio;
use portfoliofy_entity::user::User;
use portfoliofy_entity::view_log::PortfolioViewLog;

/// A stored value plus its insertion sequence, used to break
/// `created_at` ties.
#[derive(Debug, Clone)]
struct Row<T> {
    seq: u64,
    value: T,
}

/// Process-local store for development and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    seq: AtomicU64,
    users: DashMap<Uuid, Row<User>>,
    usernames: DashMap<String, Uuid>,
    emails: DashMap<String, Uuid>,
    portfolios: DashMap<Uuid, Row<Portfolio>>,
    access_requests: DashMap<Uuid, Row<AccessRequest>>,
    /// (portfolio, requester) → id of the pending or approved request.
    active_pairs: DashMap<(Uuid, Uuid), Uuid>,
    notifications: DashMap<Uuid, Row<Notification>>,
    view_logs: DashMap<Uuid, Row<PortfolioViewLog>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn row<T>(&self, value: T) -> Row<T> {
        Row {
            seq: self.seq.fetch_add(1, Ordering::Relaxed),
            value,
        }
    }
}

/// Sort `(timestamp, seq, value)` triples newest first.
fn newest_first<T>(mut rows: Vec<(DateTime<Utc>, u64, T)>) -> Vec<T> {
    rows.sort_by(|a, b| (b.0, b.1).cmp(&(a.0, a.1)));
    rows.into_iter().map(|(_, _, value)| value).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_first_breaks_ties_by_sequence() {
        let now = Utc::now();
        let earlier = now - chrono::Duration::seconds(1);
        let sorted = newest_first(vec![(earlier, 0, "a"), (now, 1, "b"), (now, 2, "c")]);
        assert_eq!(sorted, vec!["c", "b", "a"]);
    }
}
