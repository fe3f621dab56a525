//! Registration password policy.

use portfoliofy_core::config::AuthConfig;
use portfoliofy_core::error::AppError;

/// Enforces a minimum length and a minimum zxcvbn score.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    min_length: usize,
    min_score: u8,
}

impl PasswordValidator {
    /// Create a validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
            min_score: config.password_min_score.min(4),
        }
    }

    /// Validate a new password. `user_inputs` (username, email) are
    /// penalized by the strength estimator.
    pub fn validate(&self, password: &str, user_inputs: &[&str]) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        let estimate = zxcvbn::zxcvbn(password, user_inputs);
        if u8::from(estimate.score()) < self.min_score {
            return Err(AppError::validation(
                "Password is too weak. Avoid common words and personal details.",
            ));
        }

        Ok(())
    }
}
