use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use portfoliofy_core::error::AppError;
use portfoliofy_core::result::AppResult;
use portfoliofy_entity::user::{CreateUser, User};

use super::{MemoryStore, newest_first};
use crate::store::UserStore;

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, user: CreateUser) -> AppResult<User> {
        let user = user.into_user();
        let username_key = user.username.to_lowercase();
        let email_key = user.email.to_lowercase();

        match self.usernames.entry(username_key.clone()) {
            Entry::Occupied(_) => {
                return Err(AppError::conflict(format!(
                    "Username '{}' is already taken",
                    user.username
                )));
            }
            Entry::Vacant(slot) => {
                slot.insert(user.id);
            }
        }
        match self.emails.entry(email_key) {
            Entry::Occupied(_) => {
                self.usernames.remove(&username_key);
                return Err(AppError::conflict(format!(
                    "Email '{}' is already registered",
                    user.email
                )));
            }
            Entry::Vacant(slot) => {
                slot.insert(user.id);
            }
        }

        self.users.insert(user.id, self.row(user.clone()));
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.get(&id).map(|r| r.value.clone()))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let Some(id) = self.usernames.get(&username.to_lowercase()).map(|r| *r) else {
            return Ok(None);
        };
        Ok(self.users.get(&id).map(|r| r.value.clone()))
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        Ok(newest_first(
            self.users
                .iter()
                .map(|r| (r.value.created_at, r.seq, r.value.clone()))
                .collect(),
        ))
    }
}
