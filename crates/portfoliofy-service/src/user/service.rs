//! User registration and credential checks.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use portfoliofy_auth::{IssuedToken, JwtEncoder, PasswordHasher, PasswordValidator};
use portfoliofy_core::error::AppError;
use portfoliofy_database::store::UserStore;
use portfoliofy_entity::user::{CreateUser, User};

use crate::context::RequestContext;

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 50;

/// Input for creating an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUser {
    /// Login name, 3-50 characters.
    pub username: String,
    /// Contact email; stored lowercased.
    pub email: String,
    /// Plaintext password, checked against the policy then hashed.
    pub password: String,
    /// Optional display name.
    pub full_name: Option<String>,
}

/// Handles accounts and sign-in.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User store.
    users: Arc<dyn UserStore>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password policy.
    validator: Arc<PasswordValidator>,
    /// Token signer.
    encoder: Arc<JwtEncoder>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        encoder: Arc<JwtEncoder>,
    ) -> Self {
        Self {
            users,
            hasher,
            validator,
            encoder,
        }
    }

    /// Create an account after checking the username and password policy.
    pub async fn register(&self, input: RegisterUser) -> Result<User, AppError> {
        let username = input.username.trim().to_string();
        let email = input.email.trim().to_lowercase();
        validate_username(&username)?;
        if !email.contains('@') {
            return Err(AppError::validation("Invalid email address"));
        }
        self.validator
            .validate(&input.password, &[username.as_str(), email.as_str()])?;

        if self.users.find_by_username(&username).await?.is_some() {
            return Err(AppError::conflict(format!(
                "Username '{username}' is already taken"
            )));
        }

        let password_hash = self.hasher.hash(&input.password)?;
        let user = self
            .users
            .create(CreateUser {
                username,
                email,
                password_hash,
                full_name: input
                    .full_name
                    .map(|n| n.trim().to_string())
                    .filter(|n| !n.is_empty()),
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Check credentials and issue a bearer token.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(User, IssuedToken), AppError> {
        let invalid = || AppError::unauthorized("Invalid username or password");

        let Some(user) = self.users.find_by_username(username.trim()).await? else {
            warn!(username = %username, "Login failed: unknown user");
            return Err(invalid());
        };
        if !self.hasher.verify(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(invalid());
        }

        let token = self.encoder.issue(user.id, &user.username)?;
        info!(user_id = %user.id, "User logged in");
        Ok((user, token))
    }

    /// The caller's own account.
    pub async fn me(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.find(ctx.user_id).await
    }

    /// Any user by ID.
    pub async fn find(&self, id: Uuid) -> Result<User, AppError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// A user by login name, ignoring case.
    pub async fn find_by_username(&self, username: &str) -> Result<User, AppError> {
        self.users
            .find_by_username(username.trim())
            .await?
            .ok_or_else(|| AppError::not_found(format!("User '{}' not found", username.trim())))
    }

    /// Every user, newest first. Administrative use.
    pub async fn list(&self) -> Result<Vec<User>, AppError> {
        self.users.list().await
    }
}

fn validate_username(username: &str) -> Result<(), AppError> {
    let len = username.chars().count();
    if !(USERNAME_MIN..=USERNAME_MAX).contains(&len) {
        return Err(AppError::validation(format!(
            "Username must be between {USERNAME_MIN} and {USERNAME_MAX} characters"
        )));
    }
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
    {
        return Err(AppError::validation(
            "Username may only contain letters, digits, '_', '-' and '.'",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use portfoliofy_core::error::ErrorKind;

    use super::*;
    use crate::testing::Harness;

    const STRONG: &str = "violet-tundra-Harbor-1987!";

    fn input(username: &str, email: &str) -> RegisterUser {
        RegisterUser {
            username: username.to_string(),
            email: email.to_string(),
            password: STRONG.to_string(),
            full_name: Some("Alice Example".to_string()),
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let h = Harness::new();
        let svc = &h.services.users;
        let user = svc.register(input("alice", "Alice@Example.com")).await.unwrap();
        assert_eq!(user.email, "alice@example.com");
        assert_ne!(user.password_hash, STRONG);

        let (logged_in, token) = svc.login("alice", STRONG).await.unwrap();
        assert_eq!(logged_in.id, user.id);
        assert!(!token.access_token.is_empty());
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let h = Harness::new();
        let svc = &h.services.users;
        svc.register(input("alice", "alice@example.com")).await.unwrap();

        let wrong_password = svc.login("alice", "nope").await.unwrap_err();
        let unknown_user = svc.login("zed", STRONG).await.unwrap_err();
        assert_eq!(wrong_password.kind, ErrorKind::Unauthorized);
        assert_eq!(wrong_password.message, unknown_user.message);
    }

    #[tokio::test]
    async fn test_register_rejects_duplicates_and_bad_input() {
        let h = Harness::new();
        let svc = &h.services.users;
        svc.register(input("alice", "alice@example.com")).await.unwrap();

        let err = svc
            .register(input("alice", "other@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);

        let err = svc
            .register(input("alice2", "alice@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);

        let err = svc.register(input("al", "al@example.com")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let mut weak = input("bobby", "bob@example.com");
        weak.password = "password".to_string();
        let err = svc.register(weak).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
