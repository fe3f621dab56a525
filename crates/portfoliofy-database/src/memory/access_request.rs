use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use std::collections::HashSet;
use uuid::Uuid;

use portfoliofy_core::error::AppError;
use portfoliofy_core::result::AppResult;
use portfoliofy_entity::access_request::{
    AccessRequest, AccessRequestStatus, CreateAccessRequest, Decision,
};

use super::{MemoryStore, newest_first};
use crate::store::AccessRequestStore;

impl MemoryStore {
    fn requests_where(&self, pred: impl Fn(&AccessRequest) -> bool) -> Vec<AccessRequest> {
        newest_first(
            self.access_requests
                .iter()
                .filter(|r| pred(&r.value))
                .map(|r| (r.value.created_at, r.seq, r.value.clone()))
                .collect(),
        )
    }
}

#[async_trait]
impl AccessRequestStore for MemoryStore {
    async fn create(&self, request: CreateAccessRequest) -> AppResult<AccessRequest> {
        let request = request.into_request();
        match self
            .active_pairs
            .entry((request.portfolio_id, request.requester_id))
        {
            Entry::Occupied(_) => Err(AppError::conflict(
                "An access request for this portfolio is already pending or approved",
            )),
            Entry::Vacant(slot) => {
                slot.insert(request.id);
                self.access_requests
                    .insert(request.id, self.row(request.clone()));
                Ok(request)
            }
        }
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<AccessRequest>> {
        Ok(self.access_requests.get(&id).map(|r| r.value.clone()))
    }

    async fn find_active(
        &self,
        portfolio_id: Uuid,
        requester_id: Uuid,
    ) -> AppResult<Option<AccessRequest>> {
        let Some(id) = self
            .active_pairs
            .get(&(portfolio_id, requester_id))
            .map(|r| *r)
        else {
            return Ok(None);
        };
        Ok(self
            .access_requests
            .get(&id)
            .map(|r| r.value.clone())
            .filter(|r| r.status.blocks_new_request()))
    }

    async fn find_latest(
        &self,
        portfolio_id: Uuid,
        requester_id: Uuid,
    ) -> AppResult<Option<AccessRequest>> {
        Ok(self
            .requests_where(|r| r.portfolio_id == portfolio_id && r.requester_id == requester_id)
            .into_iter()
            .next())
    }

    async fn has_approved(&self, portfolio_id: Uuid, requester_id: Uuid) -> AppResult<bool> {
        Ok(self
            .find_active(portfolio_id, requester_id)
            .await?
            .is_some_and(|r| r.is_approved()))
    }

    async fn decide(
        &self,
        id: Uuid,
        decision: Decision,
        note: Option<String>,
        at: DateTime<Utc>,
    ) -> AppResult<AccessRequest> {
        // The row guard is released before touching `active_pairs`;
        // `create` takes the two locks in the opposite order.
        let decided = {
            let mut row = self
                .access_requests
                .get_mut(&id)
                .ok_or_else(|| AppError::not_found(format!("Access request {id} not found")))?;
            row.value.decide(decision, note, at)?;
            row.value.clone()
        };

        if decided.status == AccessRequestStatus::Rejected {
            self.active_pairs
                .remove_if(&(decided.portfolio_id, decided.requester_id), |_, v| {
                    *v == id
                });
        }
        Ok(decided)
    }

    async fn list_received(&self, owner_id: Uuid) -> AppResult<Vec<AccessRequest>> {
        let owned: HashSet<Uuid> = self
            .portfolios
            .iter()
            .filter(|r| r.value.owner_id == owner_id)
            .map(|r| r.value.id)
            .collect();
        Ok(self.requests_where(|r| owned.contains(&r.portfolio_id)))
    }

    async fn list_sent(&self, requester_id: Uuid) -> AppResult<Vec<AccessRequest>> {
        Ok(self.requests_where(|r| r.requester_id == requester_id))
    }

    async fn list_all(&self, portfolio_id: Option<Uuid>) -> AppResult<Vec<AccessRequest>> {
        Ok(self.requests_where(|r| portfolio_id.is_none_or(|p| r.portfolio_id == p)))
    }
}
